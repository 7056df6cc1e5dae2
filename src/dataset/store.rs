//! Read-only view of the crawler's dataset directory
//!
//! The crawler writes one zero-padded, sequence-numbered JSON file per page
//! (`000000001.json`, `000000002.json`, ...). The store lists them most
//! recent first; the batch writer reverses that sequence so the first
//! crawled page leads the output.

use std::path::{Path, PathBuf};

use crate::errors::{OutputError, OutputResult};

use super::schema::PageRecord;

#[derive(Debug, Clone)]
pub struct DatasetStore {
    dir: PathBuf,
    files: Vec<PathBuf>,
}

impl DatasetStore {
    /// List the record files of a dataset directory
    ///
    /// # Errors
    ///
    /// Returns `DatasetRead` if the directory cannot be listed.
    pub async fn open(dir: impl Into<PathBuf>) -> OutputResult<Self> {
        let dir = dir.into();
        let read_err = |source| OutputError::DatasetRead {
            path: dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&dir).await.map_err(read_err)?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
            let path = entry.path();
            let is_file = entry.file_type().await.map_err(read_err)?.is_file();
            if is_file && path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }

        // Most recent first
        files.sort_unstable_by(|a, b| b.file_name().cmp(&a.file_name()));

        log::debug!("Dataset {} holds {} record files", dir.display(), files.len());

        Ok(Self { dir, files })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Record files in enumeration order
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Read and parse every record, in enumeration order
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable file or malformed record, naming it.
    /// Records are never skipped.
    pub async fn load_records(&self) -> OutputResult<Vec<PageRecord>> {
        let mut records = Vec::with_capacity(self.files.len());
        for path in &self.files {
            records.push(read_record(path).await?);
        }
        Ok(records)
    }
}

/// Read and parse a single record file
pub async fn read_record(path: &Path) -> OutputResult<PageRecord> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| OutputError::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&raw).map_err(|source| OutputError::MalformedRecord {
        path: path.to_path_buf(),
        source,
    })
}
