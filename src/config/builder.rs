//! Type-safe builder for `OutputConfig` using the typestate pattern
//!
//! The starting URL is the only required field; `build()` is only available
//! once it has been set.

use anyhow::{Context, Result, anyhow};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::utils::{DEFAULT_DATASET_DIR, DEFAULT_OUTPUT_FILE_NAME};

use super::types::{OutputConfig, OutputFormat};

// Type states for the builder
pub struct WithStartUrl;

pub struct OutputConfigBuilder<State = ()> {
    pub(crate) url: Option<String>,
    pub(crate) output_file_name: String,
    pub(crate) output_file_format: OutputFormat,
    pub(crate) max_file_size: Option<u64>,
    pub(crate) max_tokens: Option<u64>,
    pub(crate) dataset_dir: PathBuf,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for OutputConfigBuilder<()> {
    fn default() -> Self {
        Self {
            url: None,
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            output_file_format: OutputFormat::default(),
            max_file_size: None,
            max_tokens: None,
            dataset_dir: PathBuf::from(DEFAULT_DATASET_DIR),
            _phantom: PhantomData,
        }
    }
}

impl OutputConfig {
    /// Create a builder for configuring an `OutputConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> OutputConfigBuilder<()> {
        OutputConfigBuilder::default()
    }
}

impl OutputConfigBuilder<()> {
    pub fn start_url(self, url: impl Into<String>) -> OutputConfigBuilder<WithStartUrl> {
        let url_string = url.into();

        // Normalize URL: add https:// if no scheme is present
        let normalized_url =
            if url_string.starts_with("http://") || url_string.starts_with("https://") {
                url_string
            } else {
                format!("https://{url_string}")
            };

        OutputConfigBuilder {
            url: Some(normalized_url),
            output_file_name: self.output_file_name,
            output_file_format: self.output_file_format,
            max_file_size: self.max_file_size,
            max_tokens: self.max_tokens,
            dataset_dir: self.dataset_dir,
            _phantom: PhantomData,
        }
    }
}

// Build method only available when the start URL is set
impl OutputConfigBuilder<WithStartUrl> {
    pub fn build(self) -> Result<OutputConfig> {
        let config = OutputConfig {
            url: self.url.ok_or_else(|| anyhow!("url is required"))?,
            output_file_name: self.output_file_name,
            output_file_format: self.output_file_format,
            max_file_size: self.max_file_size,
            max_tokens: self.max_tokens,
            dataset_dir: self.dataset_dir,
        };
        config.validate()?;
        Ok(config)
    }
}

// Builder methods available at any state
impl<State> OutputConfigBuilder<State> {
    #[must_use]
    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = name.into();
        self
    }

    #[must_use]
    pub fn output_file_format(mut self, format: OutputFormat) -> Self {
        self.output_file_format = format;
        self
    }

    /// Set the per-artifact byte budget, in megabytes
    ///
    /// # Example
    /// ```rust
    /// # use citescrape_output::config::{OutputConfig, OutputFormat};
    /// # fn main() -> anyhow::Result<()> {
    /// let config = OutputConfig::builder()
    ///     .start_url("https://example.com/docs")
    ///     .output_file_format(OutputFormat::Markdown)
    ///     .max_file_size(5)
    ///     .build()?;
    /// assert_eq!(config.budget().max_file_size_bytes, Some(5 * 1024 * 1024));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn max_file_size(mut self, megabytes: u64) -> Self {
        self.max_file_size = Some(megabytes);
        self
    }

    #[must_use]
    pub fn max_tokens(mut self, tokens: u64) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    #[must_use]
    pub fn dataset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dataset_dir = dir.into();
        self
    }
}

/// Load one or more configurations from a JSON file
///
/// The file holds either a single config object or an array of them.
/// Every loaded config is validated.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or any
/// config fails validation.
pub async fn load_configs(path: &Path) -> Result<Vec<OutputConfig>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Config file {} is not valid JSON", path.display()))?;

    let configs: Vec<OutputConfig> = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        other => vec![serde_json::from_value(other)?],
    };

    for (index, config) in configs.iter().enumerate() {
        config
            .validate()
            .with_context(|| format!("Config #{} in {}", index + 1, path.display()))?;
    }

    Ok(configs)
}
