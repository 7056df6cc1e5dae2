//! Test utilities shared by the integration tests

use std::path::{Path, PathBuf};
use std::sync::Arc;

use citescrape_output::{OutputConfig, OutputFormat, PageRecord, TokenCounter};
use tempfile::TempDir;

/// Token counter that charges the same amount for every record
#[allow(dead_code)]
pub struct FixedTokens(pub usize);

impl TokenCounter for FixedTokens {
    fn count_tokens(&self, _text: &str) -> Option<usize> {
        Some(self.0)
    }
}

#[allow(dead_code)]
pub fn fixed_tokens(n: usize) -> Arc<dyn TokenCounter> {
    Arc::new(FixedTokens(n))
}

/// Store records the way the crawler does: one sequence-numbered file per
/// page, in crawl order
#[allow(dead_code)]
pub fn write_dataset(dir: &TempDir, records: &[PageRecord]) -> PathBuf {
    let dataset = dir.path().join("storage/datasets/default");
    std::fs::create_dir_all(&dataset).unwrap();

    for (i, record) in records.iter().enumerate() {
        let path = dataset.join(format!("{:09}.json", i + 1));
        std::fs::write(path, serde_json::to_string(record).unwrap()).unwrap();
    }

    dataset
}

/// Config writing `<dir>/out.<ext>` from `dataset`
#[allow(dead_code)]
pub fn config(dir: &TempDir, dataset: &Path, format: OutputFormat) -> OutputConfig {
    OutputConfig::builder()
        .start_url("https://x/intro")
        .output_file_name(dir.path().join("out.json").to_string_lossy())
        .output_file_format(format)
        .dataset_dir(dataset)
        .build()
        .unwrap()
}

/// Pages of a small documentation site, in crawl order
#[allow(dead_code)]
pub fn docs_site() -> Vec<PageRecord> {
    vec![
        PageRecord::new("Intro", "https://x/intro").with_content("<h2>Setup</h2><p>go</p>"),
        PageRecord::new("API", "https://x/api")
            .with_content(r#"<p>see <a href="https://x/intro">Intro</a></p>"#),
    ]
}
