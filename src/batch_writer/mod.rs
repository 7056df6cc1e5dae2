//! Budgeted batching of page records into output artifacts
//!
//! A `BatchWriter` is a sequential fold over the record sequence of one run.
//! Records accumulate in a [`BatchState`] until the token or byte budget
//! would be exceeded, at which point the batch is flushed to the next
//! numbered artifact (`output.json`, `output-2.json`, ...).
//!
//! Writers own all of their state, so independent runs can execute
//! concurrently (see [`crate::write_all`]).

mod progress;
mod state;

pub use progress::{LogProgress, NoOpProgress, WriteProgress};
pub use state::{BatchState, WriteSummary, WriterState};

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use crate::budget::{BpeTokenCounter, TokenCounter, byte_size, estimate_tokens};
use crate::config::{OutputBudget, OutputConfig, OutputFormat};
use crate::content_saver::{artifact_path, json_entry_size, save_json_batch, save_markdown_batch};
use crate::dataset::PageRecord;
use crate::errors::{OutputError, OutputResult};
use crate::utils::host_of;

pub struct BatchWriter {
    output_file_name: String,
    format: OutputFormat,
    budget: OutputBudget,
    /// Hostname heading for the run's first page
    document_heading: String,
    counter: Arc<dyn TokenCounter>,
    progress: Arc<dyn WriteProgress>,
    /// Every page URL of the run, for link localization
    page_urls: Arc<HashSet<String>>,
    batch: BatchState,
    state: WriterState,
    /// Message of the flush error that moved the writer to `Failed`
    failure: Option<String>,
    summary: WriteSummary,
}

impl BatchWriter {
    /// Writer with the cl100k tokenizer and no progress reporting
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn new(config: &OutputConfig) -> OutputResult<Self> {
        Self::with_parts(config, Arc::new(BpeTokenCounter::new()), Arc::new(NoOpProgress))
    }

    /// Writer with an explicit token counter and progress reporter
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration does not validate.
    pub fn with_parts(
        config: &OutputConfig,
        counter: Arc<dyn TokenCounter>,
        progress: Arc<dyn WriteProgress>,
    ) -> OutputResult<Self> {
        config.validate()?;

        Ok(Self {
            output_file_name: config.output_file_name().to_string(),
            format: config.output_file_format(),
            budget: config.budget(),
            document_heading: host_of(config.start_url())?,
            counter,
            progress,
            page_urls: Arc::new(HashSet::new()),
            batch: BatchState::new(),
            state: WriterState::Accumulating,
            failure: None,
            summary: WriteSummary::default(),
        })
    }

    #[must_use]
    pub fn state(&self) -> WriterState {
        self.state
    }

    /// The batch in progress
    #[must_use]
    pub fn batch(&self) -> &BatchState {
        &self.batch
    }

    /// Make page URLs known for link localization before their records arrive
    pub fn register_page_urls<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) {
        let page_urls = Arc::make_mut(&mut self.page_urls);
        page_urls.extend(urls.into_iter().map(str::to_string));
    }

    /// Add one record, flushing first and/or after as the budgets require
    ///
    /// A record that alone exceeds the token budget is still placed: it
    /// starts a fresh batch whose token count is set to half its estimate.
    /// A record that alone exceeds the byte budget is flushed on its own.
    ///
    /// # Errors
    ///
    /// Returns `WriterFinished` after `finish()`, `WriterFailed` after a
    /// failed flush, or any error of a flush this record triggers.
    pub async fn add_record(&mut self, record: PageRecord) -> OutputResult<()> {
        self.ensure_open()?;

        let serialized = record.to_compact_json()?;
        let estimate = estimate_tokens(self.counter.as_ref(), &serialized, self.budget.max_tokens);
        let tokens = estimate.tokens();
        let bytes = match self.format {
            OutputFormat::Json => json_entry_size(&record)?,
            OutputFormat::Markdown | OutputFormat::HumanReadableMarkdown => byte_size(&serialized),
        };

        if let Some(max_tokens) = self.budget.max_tokens
            && self.batch.cumulative_tokens + tokens > max_tokens
        {
            self.flush().await?;
        }

        if let Some(max_bytes) = self.budget.max_file_size_bytes
            && !self.batch.is_empty()
            && self.batch.cumulative_bytes + bytes > max_bytes
        {
            self.flush().await?;
        }

        if estimate.exceeds() {
            // Over-budget record opens its own batch, counted as half consumed
            self.batch.cumulative_tokens = tokens / 2;
        } else {
            self.batch.cumulative_tokens += tokens;
        }

        log::debug!(
            "Adding {} ({} bytes, {} tokens) to batch {}",
            record.url,
            bytes,
            tokens,
            self.batch.file_counter
        );

        if !self.page_urls.contains(&record.url) {
            Arc::make_mut(&mut self.page_urls).insert(record.url.clone());
        }
        self.progress.report_record_added(&record.url);
        self.batch.cumulative_bytes += bytes;
        self.batch.records.push(record);

        if let Some(max_bytes) = self.budget.max_file_size_bytes
            && self.batch.cumulative_bytes > max_bytes
        {
            self.flush().await?;
        }

        Ok(())
    }

    /// Render the current batch to the next artifact
    ///
    /// Returns the artifact path, or `None` when the batch is empty.
    ///
    /// # Errors
    ///
    /// Rendering or write failures are returned as is; the batch is lost and
    /// the writer moves to `Failed`.
    pub async fn flush(&mut self) -> OutputResult<Option<PathBuf>> {
        self.check_failed()?;
        if self.batch.is_empty() {
            return Ok(None);
        }

        self.state = WriterState::Flushing;

        let file_counter = self.batch.file_counter;
        let path = artifact_path(&self.output_file_name, self.format, file_counter);
        let records = self.batch.take_records();
        let count = records.len();

        let result = match self.format {
            OutputFormat::Json => save_json_batch(records, &path).await,
            format => {
                // The run's first record always lands in the first artifact
                let document_heading = (file_counter == 1).then(|| self.document_heading.clone());
                save_markdown_batch(
                    records,
                    &path,
                    Arc::clone(&self.page_urls),
                    format.include_extras(),
                    document_heading,
                )
                .await
            }
        };

        if let Err(e) = result {
            let message = e.to_string();
            self.progress.report_error(&message);
            self.failure = Some(message);
            self.state = WriterState::Failed;
            return Err(e);
        }

        log::info!("Wrote {} items to {}", count, path.display());
        self.progress.report_artifact_written(&path, count);

        self.batch.file_counter += 1;
        self.summary.files.push(path.clone());
        self.summary.records += count;
        self.state = WriterState::Accumulating;

        Ok(Some(path))
    }

    /// Flush what remains and stop accepting records
    ///
    /// Idempotent: once `Done`, returns the same summary without writing.
    ///
    /// # Errors
    ///
    /// After a failed flush every call returns `WriterFailed`.
    pub async fn finish(&mut self) -> OutputResult<WriteSummary> {
        self.check_failed()?;
        if self.state != WriterState::Done {
            self.flush().await?;
            self.state = WriterState::Done;
            self.progress.report_completed(&self.summary);
        }

        Ok(self.summary.clone())
    }

    fn check_failed(&self) -> OutputResult<()> {
        match &self.failure {
            Some(message) => Err(OutputError::WriterFailed(message.clone())),
            None => Ok(()),
        }
    }

    fn ensure_open(&self) -> OutputResult<()> {
        self.check_failed()?;
        if self.state == WriterState::Done {
            return Err(OutputError::WriterFinished);
        }
        Ok(())
    }

    /// Fold a whole run and finish it
    ///
    /// `records` is the dataset store's enumeration order; the sequence is
    /// reversed once before batching, so the store's last record becomes the
    /// first page of the output.
    pub async fn write_records(&mut self, records: Vec<PageRecord>) -> OutputResult<WriteSummary> {
        self.progress.report_records_found(records.len());
        self.register_page_urls(records.iter().map(|r| r.url.as_str()));

        for record in records.into_iter().rev() {
            self.add_record(record).await?;
        }

        self.finish().await
    }
}
