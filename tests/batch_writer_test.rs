//! End-to-end tests for JSON output runs

use std::sync::Arc;

use citescrape_output::{
    BatchWriter, NoOpProgress, OutputConfig, OutputFormat, PageRecord, write_all, write_output,
};
use tempfile::TempDir;

mod common;

fn read_json(path: &std::path::Path) -> Vec<PageRecord> {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_unbounded_json_run_round_trips() {
    let dir = TempDir::new().unwrap();
    let crawled: Vec<PageRecord> = (1..=5)
        .map(|i| {
            PageRecord::new(format!("Page {i}"), format!("https://x/{i}"))
                .with_content(format!("<p>body {i}</p>"))
                .with_byline("Ada")
        })
        .collect();
    let dataset = common::write_dataset(&dir, &crawled);

    let summary = write_output(common::config(&dir, &dataset, OutputFormat::Json))
        .await
        .unwrap();

    assert_eq!(summary.files, vec![dir.path().join("out.json")]);
    assert_eq!(summary.records, 5);
    // Store order is newest first; the output reverses it back to crawl order
    assert_eq!(read_json(&dir.path().join("out.json")), crawled);
}

#[tokio::test]
async fn test_token_budget_numbers_artifacts() {
    let dir = TempDir::new().unwrap();
    let config = OutputConfig::builder()
        .start_url("https://x")
        .output_file_name(dir.path().join("docs.json").to_string_lossy())
        .max_tokens(100)
        .build()
        .unwrap();
    let mut writer =
        BatchWriter::with_parts(&config, common::fixed_tokens(40), Arc::new(NoOpProgress)).unwrap();

    let newest_first = vec![
        PageRecord::new("C", "https://x/c"),
        PageRecord::new("B", "https://x/b"),
        PageRecord::new("A", "https://x/a"),
    ];
    let summary = writer.write_records(newest_first).await.unwrap();

    assert_eq!(
        summary.files,
        vec![dir.path().join("docs.json"), dir.path().join("docs-2.json")]
    );
    let first: Vec<String> = read_json(&summary.files[0]).into_iter().map(|r| r.title).collect();
    let second: Vec<String> = read_json(&summary.files[1]).into_iter().map(|r| r.title).collect();
    assert_eq!(first, vec!["A", "B"]);
    assert_eq!(second, vec!["C"]);
    assert_eq!(summary.last_file(), Some(dir.path().join("docs-2.json").as_path()));
}

#[tokio::test]
async fn test_byte_budget_is_respected() {
    const MIB: usize = 1024 * 1024;

    let dir = TempDir::new().unwrap();
    let config = OutputConfig::builder()
        .start_url("https://x")
        .output_file_name(dir.path().join("out.json").to_string_lossy())
        .max_file_size(1)
        .build()
        .unwrap();
    let mut writer =
        BatchWriter::with_parts(&config, common::fixed_tokens(0), Arc::new(NoOpProgress)).unwrap();

    let sizes = [400_000, 400_000, 400_000, 1_500_000, 10];
    let crawled: Vec<PageRecord> = sizes
        .iter()
        .enumerate()
        .map(|(i, n)| PageRecord::new(i.to_string(), format!("https://x/{i}")).with_content("a".repeat(*n)))
        .collect();
    let summary = writer
        .write_records(crawled.iter().rev().cloned().collect())
        .await
        .unwrap();

    assert_eq!(summary.files.len(), 4);

    let mut concatenated = Vec::new();
    for path in &summary.files {
        let size = std::fs::metadata(path).unwrap().len() as usize;
        let records = read_json(path);
        if size > MIB {
            // Only a record that alone exceeds the budget may overshoot it
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].content.len(), 1_500_000);
        }
        concatenated.extend(records);
    }
    assert_eq!(concatenated, crawled);
}

#[tokio::test]
async fn test_one_record_can_trip_both_budgets() {
    let dir = TempDir::new().unwrap();
    let config = OutputConfig::builder()
        .start_url("https://x")
        .output_file_name(dir.path().join("o.json").to_string_lossy())
        .max_tokens(100)
        .max_file_size(1)
        .build()
        .unwrap();
    let mut writer =
        BatchWriter::with_parts(&config, common::fixed_tokens(60), Arc::new(NoOpProgress)).unwrap();

    writer.add_record(PageRecord::new("A", "https://x/a")).await.unwrap();
    writer
        .add_record(PageRecord::new("B", "https://x/b").with_content("b".repeat(2 * 1024 * 1024)))
        .await
        .unwrap();

    // Token flush of [A], then byte flush of [B], within the same call
    assert!(writer.batch().is_empty());
    assert_eq!(writer.batch().file_counter(), 3);

    let summary = writer.finish().await.unwrap();
    assert_eq!(
        summary.files,
        vec![dir.path().join("o.json"), dir.path().join("o-2.json")]
    );
    let first: Vec<String> = read_json(&summary.files[0]).into_iter().map(|r| r.title).collect();
    let second: Vec<String> = read_json(&summary.files[1]).into_iter().map(|r| r.title).collect();
    assert_eq!(first, vec!["A"]);
    assert_eq!(second, vec!["B"]);
}

#[tokio::test]
async fn test_malformed_record_fails_run_without_artifacts() {
    let dir = TempDir::new().unwrap();
    let dataset = common::write_dataset(&dir, &common::docs_site());
    std::fs::write(dataset.join("000000003.json"), "[]").unwrap();

    let err = write_output(common::config(&dir, &dataset, OutputFormat::Json))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("000000003.json"));
    assert!(!dir.path().join("out.json").exists());
}

#[tokio::test]
async fn test_empty_dataset_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let dataset = common::write_dataset(&dir, &[]);

    let summary = write_output(common::config(&dir, &dataset, OutputFormat::Json))
        .await
        .unwrap();

    assert!(summary.files.is_empty());
    assert_eq!(summary.last_file(), None);
}

#[tokio::test]
async fn test_independent_runs_execute_concurrently() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let dataset_a = common::write_dataset(&a, &[PageRecord::new("A", "https://a/")]);
    let dataset_b = common::write_dataset(&b, &common::docs_site());

    let summaries = write_all(vec![
        common::config(&a, &dataset_a, OutputFormat::Json),
        common::config(&b, &dataset_b, OutputFormat::Markdown),
    ])
    .await
    .unwrap();

    assert_eq!(summaries[0].files, vec![a.path().join("out.json")]);
    assert_eq!(summaries[0].records, 1);
    assert_eq!(summaries[1].files, vec![b.path().join("out.md")]);
    assert_eq!(summaries[1].records, 2);
}
