//! Output stage of the citescrape crawler
//!
//! Folds the per-page records of a crawl into one or more size-bounded
//! artifacts: pretty-printed JSON arrays, plain Markdown, or a single
//! navigable Markdown document with a table of contents.

pub mod batch_writer;
pub mod budget;
pub mod config;
pub mod content_saver;
pub mod dataset;
pub mod errors;
pub mod utils;

use std::sync::Arc;

pub use batch_writer::{
    BatchState, BatchWriter, LogProgress, NoOpProgress, WriteProgress, WriteSummary, WriterState,
};
pub use budget::{BpeTokenCounter, TokenCounter, TokenEstimate};
pub use config::{OutputConfig, OutputFormat, load_configs};
pub use content_saver::markdown_converter::{TableOfContents, TocEntry, slugify};
pub use dataset::{DatasetStore, PageRecord};
pub use errors::{OutputError, OutputResult};

/// Combine the dataset of one run into its output artifacts
///
/// # Errors
///
/// Fails on an invalid configuration, an unreadable or malformed record
/// (naming the file), or an artifact that cannot be written.
pub async fn write_output(config: OutputConfig) -> OutputResult<WriteSummary> {
    write_output_with(config, Arc::new(NoOpProgress)).await
}

/// [`write_output`] with a progress reporter
pub async fn write_output_with(
    config: OutputConfig,
    progress: Arc<dyn WriteProgress>,
) -> OutputResult<WriteSummary> {
    config.validate()?;

    let store = DatasetStore::open(config.dataset_dir()).await?;
    log::info!("Found {} files to combine...", store.len());

    let records = match store.load_records().await {
        Ok(records) => records,
        Err(e) => {
            progress.report_error(&e.to_string());
            return Err(e);
        }
    };

    let mut writer = BatchWriter::with_parts(&config, Arc::new(BpeTokenCounter::new()), progress)?;
    writer.write_records(records).await
}

/// Run one independent writer per configuration, concurrently
///
/// Summaries are returned in configuration order. The first failure fails
/// the whole call.
pub async fn write_all(configs: Vec<OutputConfig>) -> OutputResult<Vec<WriteSummary>> {
    futures::future::try_join_all(configs.into_iter().map(write_output)).await
}
