//! Progress reporting abstraction for output runs
//!
//! Defines the `WriteProgress` trait for lifecycle event reporting
//! and provides no-op and logging implementations.

use std::path::Path;

use super::state::WriteSummary;

/// Trait for reporting batch writer progress at key lifecycle events
///
/// Implementations can send updates to channels, log to console, update UI, etc.
pub trait WriteProgress: Send + Sync {
    /// Report how many records the run will fold
    fn report_records_found(&self, count: usize);

    /// Report that a record joined the current batch
    fn report_record_added(&self, url: &str);

    /// Report that a batch was flushed to an artifact
    fn report_artifact_written(&self, path: &Path, records: usize);

    /// Report that the run has completed successfully
    fn report_completed(&self, summary: &WriteSummary);

    /// Report an error that failed the run
    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
///
/// All methods are no-ops and will be inlined away by the compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl WriteProgress for NoOpProgress {
    #[inline(always)]
    fn report_records_found(&self, _count: usize) {}

    #[inline(always)]
    fn report_record_added(&self, _url: &str) {}

    #[inline(always)]
    fn report_artifact_written(&self, _path: &Path, _records: usize) {}

    #[inline(always)]
    fn report_completed(&self, _summary: &WriteSummary) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}

/// Progress reporter that forwards every event to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl WriteProgress for LogProgress {
    fn report_records_found(&self, count: usize) {
        log::debug!("Folding {count} records");
    }

    fn report_record_added(&self, url: &str) {
        log::debug!("Added {url} to batch");
    }

    fn report_artifact_written(&self, path: &Path, records: usize) {
        log::debug!("Flushed {records} records to {}", path.display());
    }

    fn report_completed(&self, summary: &WriteSummary) {
        log::info!(
            "Output complete: {} records in {} files",
            summary.records,
            summary.files.len()
        );
    }

    fn report_error(&self, error: &str) {
        log::error!("Output run failed: {error}");
    }
}
