//! Accumulation state of one batch writer run

use std::path::{Path, PathBuf};

use crate::dataset::PageRecord;

/// Lifecycle of a batch writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriterState {
    #[default]
    Accumulating,
    /// An artifact is being rendered and written
    Flushing,
    /// `finish()` completed; no further records are accepted
    Done,
    /// A flush failed and its batch was lost
    Failed,
}

/// Records of the batch in progress and the running budget counters
///
/// `file_counter` is 1-based and names the artifact the current batch will
/// be flushed to.
#[derive(Debug, Clone)]
pub struct BatchState {
    pub(crate) records: Vec<PageRecord>,
    pub(crate) cumulative_bytes: usize,
    pub(crate) cumulative_tokens: usize,
    pub(crate) file_counter: usize,
}

impl Default for BatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            cumulative_bytes: 0,
            cumulative_tokens: 0,
            file_counter: 1,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    #[must_use]
    pub fn cumulative_bytes(&self) -> usize {
        self.cumulative_bytes
    }

    #[must_use]
    pub fn cumulative_tokens(&self) -> usize {
        self.cumulative_tokens
    }

    #[must_use]
    pub fn file_counter(&self) -> usize {
        self.file_counter
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Take the batch's records and reset both counters
    ///
    /// The file counter is left alone; it only advances once the artifact
    /// is on disk.
    pub(crate) fn take_records(&mut self) -> Vec<PageRecord> {
        self.cumulative_bytes = 0;
        self.cumulative_tokens = 0;
        std::mem::take(&mut self.records)
    }
}

/// Artifacts produced by a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Artifact paths in write order
    pub files: Vec<PathBuf>,
    /// Total records written across all artifacts
    pub records: usize,
}

impl WriteSummary {
    /// Path of the last artifact written, if any
    #[must_use]
    pub fn last_file(&self) -> Option<&Path> {
        self.files.last().map(PathBuf::as_path)
    }
}
