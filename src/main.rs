//! Combines the page records of a finished crawl into output artifacts.
//!
//! Reads the crawler's config file (single object or array), applies flag
//! overrides, and runs one batch writer per config.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use citescrape_output::{LogProgress, OutputConfig, OutputFormat, load_configs, write_output_with};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "citescrape-output",
    about = "Combine crawled page records into size-bounded JSON or Markdown artifacts"
)]
struct Cli {
    /// Crawler config file holding one config object or an array of them
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting URL of the crawl (required without --config)
    #[arg(long)]
    url: Option<String>,

    /// Artifact file name; its extension is replaced by the format's
    #[arg(long)]
    output: Option<String>,

    /// json, markdown or human_readable_markdown
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Token budget per artifact
    #[arg(long)]
    max_tokens: Option<u64>,

    /// Byte budget per artifact, in megabytes
    #[arg(long)]
    max_file_size: Option<u64>,

    /// Directory holding one JSON file per crawled page
    #[arg(long)]
    dataset: Option<PathBuf>,
}

impl Cli {
    async fn configs(&self) -> Result<Vec<OutputConfig>> {
        let mut configs = match (&self.config, &self.url) {
            (Some(path), _) => load_configs(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            (None, Some(url)) => vec![OutputConfig::builder().start_url(url.as_str()).build()?],
            (None, None) => anyhow::bail!("either --config or --url is required"),
        };

        for config in &mut configs {
            if self.config.is_some()
                && let Some(url) = &self.url
            {
                config.set_start_url(url.as_str());
            }
            if let Some(output) = &self.output {
                config.set_output_file_name(output.as_str());
            }
            if let Some(format) = self.format {
                config.set_output_file_format(format);
            }
            if self.max_tokens.is_some() {
                config.set_max_tokens(self.max_tokens);
            }
            if self.max_file_size.is_some() {
                config.set_max_file_size(self.max_file_size);
            }
            if let Some(dataset) = &self.dataset {
                config.set_dataset_dir(dataset.clone());
            }
            config.validate()?;
        }

        Ok(configs)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let configs = cli.configs().await?;

    let runs = configs.into_iter().map(|config| async move {
        let name = config.output_file_name().to_string();
        write_output_with(config, std::sync::Arc::new(LogProgress))
            .await
            .with_context(|| format!("Output run for {name} failed"))
    });
    let summaries = futures::future::try_join_all(runs).await?;

    for summary in summaries {
        match summary.last_file() {
            Some(path) => println!("{}", path.display()),
            None => tracing::warn!("No records found, nothing written"),
        }
    }

    Ok(())
}
