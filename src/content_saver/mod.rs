//! Artifact rendering and saving
//!
//! A flushed batch becomes exactly one artifact: a pretty-printed JSON array
//! or one Markdown document. Rendering runs on the blocking pool with a
//! timeout; the write itself goes through `tokio::fs`.

use std::path::Path;
use std::time::Duration;

use tokio::time::timeout;

use crate::errors::{OutputError, OutputResult};
use crate::utils::{RENDER_TIMEOUT_SECS, ensure_parent_dir};

// Module declarations
mod json_saver;
pub mod markdown_converter;
mod markdown_saver;
mod naming;

// Re-export public API from json_saver module
pub use json_saver::{json_entry_size, render_json_batch, save_json_batch};

// Re-export public API from markdown_saver module
pub use markdown_saver::{render_markdown_batch, save_markdown_batch};

// Re-export public API from naming module
pub use naming::artifact_path;

const RENDER_TIMEOUT: Duration = Duration::from_secs(RENDER_TIMEOUT_SECS);

/// Run a CPU-bound render on the blocking pool, bounded by a timeout
async fn render_blocking<F>(what: &'static str, render: F) -> OutputResult<String>
where
    F: FnOnce() -> OutputResult<String> + Send + 'static,
{
    let blocking_task = tokio::task::spawn_blocking(render);

    match timeout(RENDER_TIMEOUT, blocking_task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(OutputError::TaskFailed(format!(
            "{what} render task panicked: {e}"
        ))),
        Err(_) => {
            log::warn!("{what} rendering timeout (timeout: {RENDER_TIMEOUT:?})");
            Err(OutputError::TaskFailed(format!(
                "{what} rendering timed out after {RENDER_TIMEOUT:?}"
            )))
        }
    }
}

/// Write a rendered artifact, creating missing parent directories
async fn write_artifact(path: &Path, content: String) -> OutputResult<()> {
    let write_err = |source| OutputError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    };

    ensure_parent_dir(path).await.map_err(write_err)?;
    tokio::fs::write(path, content.into_bytes())
        .await
        .map_err(write_err)
}
