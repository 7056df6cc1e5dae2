//! Getter methods for `OutputConfig`

use std::path::Path;

use super::types::{OutputConfig, OutputFormat};

impl OutputConfig {
    #[must_use]
    pub fn start_url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn output_file_name(&self) -> &str {
        &self.output_file_name
    }

    #[must_use]
    pub fn output_file_format(&self) -> OutputFormat {
        self.output_file_format
    }

    #[must_use]
    pub fn max_file_size(&self) -> Option<u64> {
        self.max_file_size
    }

    #[must_use]
    pub fn max_tokens(&self) -> Option<u64> {
        self.max_tokens
    }

    #[must_use]
    pub fn dataset_dir(&self) -> &Path {
        &self.dataset_dir
    }

    /// Override the starting URL after loading; callers re-validate
    pub fn set_start_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Override the artifact file name after loading
    pub fn set_output_file_name(&mut self, name: impl Into<String>) {
        self.output_file_name = name.into();
    }

    pub fn set_output_file_format(&mut self, format: OutputFormat) {
        self.output_file_format = format;
    }

    pub fn set_max_file_size(&mut self, megabytes: Option<u64>) {
        self.max_file_size = megabytes;
    }

    pub fn set_max_tokens(&mut self, tokens: Option<u64>) {
        self.max_tokens = tokens;
    }

    pub fn set_dataset_dir(&mut self, dir: impl Into<std::path::PathBuf>) {
        self.dataset_dir = dir.into();
    }
}
