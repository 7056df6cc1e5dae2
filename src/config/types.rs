//! Core configuration types for the output stage
//!
//! `OutputConfig` mirrors the output-related keys of the crawler's JSON
//! config file. Crawl-only keys in the same file are ignored.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::{BYTES_PER_MEGABYTE, DEFAULT_DATASET_DIR, DEFAULT_OUTPUT_FILE_NAME};

/// Format of the artifacts produced by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Pretty-printed array of page records
    #[default]
    Json,
    /// Plain Markdown concatenation of every page
    Markdown,
    /// Markdown with anchors, "Back to Top" links and a table of contents
    HumanReadableMarkdown,
}

impl OutputFormat {
    /// File extension used for artifacts of this format
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown | OutputFormat::HumanReadableMarkdown => "md",
        }
    }

    #[must_use]
    pub fn is_markdown(self) -> bool {
        !matches!(self, OutputFormat::Json)
    }

    /// Whether pages are rendered with anchors, back-links and a TOC
    #[must_use]
    pub fn include_extras(self) -> bool {
        matches!(self, OutputFormat::HumanReadableMarkdown)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::HumanReadableMarkdown => "human_readable_markdown",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "markdown" => Ok(OutputFormat::Markdown),
            "human_readable_markdown" => Ok(OutputFormat::HumanReadableMarkdown),
            other => Err(format!(
                "unknown output format '{other}' (expected json, markdown or human_readable_markdown)"
            )),
        }
    }
}

/// Size ceilings for one run, derived from `OutputConfig`
///
/// `None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputBudget {
    pub max_tokens: Option<usize>,
    pub max_file_size_bytes: Option<usize>,
}

/// Main configuration struct for one output run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Starting URL of the crawl. Its hostname becomes the document heading
    /// of human-readable Markdown output.
    pub(crate) url: String,

    /// Artifact file name. Any extension is replaced by the format's own.
    #[serde(default = "default_output_file_name")]
    pub(crate) output_file_name: String,

    #[serde(default)]
    pub(crate) output_file_format: OutputFormat,

    /// Byte budget per artifact, in megabytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) max_file_size: Option<u64>,

    /// Token budget per artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) max_tokens: Option<u64>,

    /// Directory holding one JSON file per crawled page
    #[serde(default = "default_dataset_dir")]
    pub(crate) dataset_dir: PathBuf,
}

fn default_output_file_name() -> String {
    DEFAULT_OUTPUT_FILE_NAME.to_string()
}

fn default_dataset_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATASET_DIR)
}

impl OutputConfig {
    /// Reject configurations the writer cannot honor
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending field.
    pub fn validate(&self) -> anyhow::Result<()> {
        let parsed = url::Url::parse(&self.url)
            .map_err(|e| anyhow::anyhow!("url '{}' is not a valid URL: {e}", self.url))?;
        if parsed.host_str().is_none_or(str::is_empty) {
            anyhow::bail!("url '{}' has no host", self.url);
        }

        if self.output_file_name.trim().is_empty() {
            anyhow::bail!("outputFileName must not be empty");
        }

        if self.max_file_size == Some(0) {
            anyhow::bail!("maxFileSize must be a positive number of megabytes");
        }

        if self.max_tokens == Some(0) {
            anyhow::bail!("maxTokens must be a positive integer");
        }

        Ok(())
    }

    /// Budget ceilings for this run
    #[must_use]
    pub fn budget(&self) -> OutputBudget {
        OutputBudget {
            max_tokens: self.max_tokens.map(|t| usize::try_from(t).unwrap_or(usize::MAX)),
            max_file_size_bytes: self.max_file_size.map(|mb| {
                usize::try_from(mb.saturating_mul(BYTES_PER_MEGABYTE)).unwrap_or(usize::MAX)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_round_trips_through_str() {
        for format in [
            OutputFormat::Json,
            OutputFormat::Markdown,
            OutputFormat::HumanReadableMarkdown,
        ] {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_budget_converts_megabytes() {
        let config: OutputConfig = serde_json::from_str(
            r#"{"url": "https://example.com", "maxFileSize": 2, "maxTokens": 5000}"#,
        )
        .unwrap();

        let budget = config.budget();
        assert_eq!(budget.max_file_size_bytes, Some(2 * 1024 * 1024));
        assert_eq!(budget.max_tokens, Some(5000));
    }

    #[test]
    fn test_unbounded_budget_by_default() {
        let config: OutputConfig =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(config.budget(), OutputBudget::default());
        assert_eq!(config.output_file_format, OutputFormat::Json);
        assert_eq!(config.output_file_name, "output.json");
    }
}
