use std::path::Path;

use crate::dataset::PageRecord;
use crate::errors::OutputResult;

use super::{render_blocking, write_artifact};

/// Pretty-printed JSON array of a batch, records in batch order
pub fn render_json_batch(records: &[PageRecord]) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Bytes one record contributes to a JSON artifact
///
/// Measured as a single-element pretty array. The brackets it includes
/// over-cover the `,\n` separators of a longer array, so the sum over a
/// batch never undercounts the rendered artifact.
pub fn json_entry_size(record: &PageRecord) -> OutputResult<usize> {
    Ok(serde_json::to_string_pretty(std::slice::from_ref(record))?.len())
}

/// Render a batch as JSON and write it to `path`
pub async fn save_json_batch(records: Vec<PageRecord>, path: &Path) -> OutputResult<()> {
    // JSON serialization (keep spawn_blocking - CPU intensive)
    let json = render_blocking("JSON", move || render_json_batch(&records)).await?;
    write_artifact(path, json).await
}
