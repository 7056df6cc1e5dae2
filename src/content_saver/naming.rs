use std::path::PathBuf;

use crate::config::OutputFormat;
use crate::utils::strip_extension;

/// Path of the `file_counter`-th artifact (1-based)
///
/// The configured name loses its extension; the first artifact keeps the
/// bare base name, later ones get `-<counter>`. The extension follows the
/// output format, not the configured name.
#[must_use]
pub fn artifact_path(output_file_name: &str, format: OutputFormat, file_counter: usize) -> PathBuf {
    let base = strip_extension(output_file_name);
    let ext = format.extension();

    if file_counter <= 1 {
        PathBuf::from(format!("{base}.{ext}"))
    } else {
        PathBuf::from(format!("{base}-{file_counter}.{ext}"))
    }
}
