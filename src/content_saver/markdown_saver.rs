use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::dataset::PageRecord;
use crate::errors::OutputResult;

use super::markdown_converter::{MarkdownPageConverter, TableOfContents};
use super::{render_blocking, write_artifact};

/// Render a batch as one Markdown document
///
/// `document_heading` is the hostname heading for the run's first page and
/// must only be passed for the batch that holds it. In human-readable mode
/// the table of contents is spliced in right after the document heading, or
/// prepended when this batch has none.
pub fn render_markdown_batch(
    records: &[PageRecord],
    page_urls: Arc<HashSet<String>>,
    include_extras: bool,
    document_heading: Option<&str>,
) -> OutputResult<String> {
    let converter = MarkdownPageConverter::new(page_urls, include_extras);

    let mut body = String::new();
    let mut toc = TableOfContents::new();
    for (i, record) in records.iter().enumerate() {
        let heading = if i == 0 { document_heading } else { None };
        let page = converter.convert_page(record, heading)?;
        body.push_str(&page.markdown);
        toc.extend(page.toc_entries);
    }

    if !include_extras || toc.is_empty() {
        return Ok(body);
    }

    let toc = toc.render();
    let has_heading = document_heading.is_some() && !records.is_empty();
    Ok(splice_toc(body, &toc, has_heading))
}

/// Insert the TOC after the first blank-line boundary, or prepend it
fn splice_toc(mut body: String, toc: &str, has_heading: bool) -> String {
    if has_heading && let Some(pos) = body.find("\n\n") {
        body.insert_str(pos + 2, toc);
        return body;
    }

    let mut document = String::with_capacity(toc.len() + body.len());
    document.push_str(toc);
    document.push_str(&body);
    document
}

/// Render a batch as Markdown and write it to `path`
pub async fn save_markdown_batch(
    records: Vec<PageRecord>,
    path: &Path,
    page_urls: Arc<HashSet<String>>,
    include_extras: bool,
    document_heading: Option<String>,
) -> OutputResult<()> {
    let markdown = render_blocking("Markdown", move || {
        render_markdown_batch(
            &records,
            page_urls,
            include_extras,
            document_heading.as_deref(),
        )
    })
    .await?;

    write_artifact(path, markdown).await
}
