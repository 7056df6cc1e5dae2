//! Page record to Markdown conversion
//!
//! Each page becomes one Markdown fragment:
//!
//! 1. Page heading (`## <title>`), with an anchor id and a "Back to Top"
//!    link in human-readable mode
//! 2. Metadata lines: URL, excerpt, `Author:`, `Site:` (each only when present)
//! 3. Article body converted with htmd plus the custom handlers in
//!    [`custom_handlers`], then run through the heading pass in
//!    [`markdown_postprocessing`]
//! 4. A closing `---` separator
//!
//! The first page of a human-readable run is additionally preceded by the
//! document heading (`# <hostname>`).
//!
//! # Usage
//!
//! ```rust
//! # use std::{collections::HashSet, sync::Arc};
//! # use citescrape_output::content_saver::markdown_converter::MarkdownPageConverter;
//! # use citescrape_output::dataset::PageRecord;
//! let urls: HashSet<String> = ["https://x/intro".to_string()].into();
//! let converter = MarkdownPageConverter::new(Arc::new(urls), true);
//! let page = PageRecord::new("Intro", "https://x/intro").with_content("<h2>Setup</h2><p>go</p>");
//!
//! let converted = converter.convert_page(&page, Some("x"))?;
//! assert!(converted.markdown.starts_with("# x\n\n## Intro {#intro}"));
//! assert_eq!(converted.toc_entries.len(), 2);
//! # Ok::<(), citescrape_output::OutputError>(())
//! ```

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::Arc;

use htmd::HtmlToMarkdown;

// Declare sub-modules
pub mod custom_handlers;
pub mod markdown_postprocessing;
pub mod slug;
pub mod toc;

pub use custom_handlers::create_converter;
pub use markdown_postprocessing::{HeadingPass, extract_heading_level, process_body_headings};
pub use slug::slugify;
pub use toc::{TableOfContents, TocEntry};

use crate::dataset::PageRecord;
use crate::errors::{OutputError, OutputResult};
use crate::utils::{BACK_TO_TOP_LINK, PAGE_SEPARATOR};

/// Markdown fragment for one page plus the headings it contributes to the TOC
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertedPage {
    pub markdown: String,
    pub toc_entries: Vec<TocEntry>,
}

/// Converts page records of one run into Markdown fragments
///
/// Built once per rendered document; the htmd converter and the set of
/// known page URLs are shared by every page in it.
pub struct MarkdownPageConverter {
    converter: HtmlToMarkdown,
    include_extras: bool,
}

impl MarkdownPageConverter {
    #[must_use]
    pub fn new(page_urls: Arc<HashSet<String>>, include_extras: bool) -> Self {
        Self {
            converter: create_converter(page_urls, include_extras),
            include_extras,
        }
    }

    #[must_use]
    pub fn include_extras(&self) -> bool {
        self.include_extras
    }

    /// Convert one page record
    ///
    /// `document_heading` is the hostname to emit as `# <host>` before the
    /// page; pass it only for the first page of the run. It is ignored in
    /// plain Markdown mode.
    ///
    /// # Errors
    ///
    /// Returns `Conversion` if htmd fails on the page body.
    pub fn convert_page(
        &self,
        record: &PageRecord,
        document_heading: Option<&str>,
    ) -> OutputResult<ConvertedPage> {
        let mut markdown = String::with_capacity(record.content.len() / 2 + 256);
        let mut toc_entries = Vec::new();

        if self.include_extras
            && let Some(host) = document_heading
        {
            let _ = write!(markdown, "# {host}\n\n");
        }

        if self.include_extras {
            let slug = slugify(&record.title);
            let _ = write!(
                markdown,
                "## {} {{#{slug}}}\n\n{BACK_TO_TOP_LINK}\n\n",
                record.title
            );
            toc_entries.push(TocEntry::new(2, record.title.as_str(), slug));
        } else {
            let _ = write!(markdown, "## {}\n\n", record.title);
        }

        push_line(&mut markdown, "URL: ", &record.url);
        push_line(&mut markdown, "", &record.excerpt);
        push_line(&mut markdown, "Author: ", &record.byline);
        push_line(&mut markdown, "Site: ", &record.site_name);

        if !record.content.trim().is_empty() {
            let body = self.converter.convert(&record.content).map_err(|e| {
                tracing::debug!("htmd conversion failed for {}: {}", record.url, e);
                OutputError::Conversion {
                    url: record.url.clone(),
                    message: e.to_string(),
                }
            })?;

            let pass = process_body_headings(body.trim(), self.include_extras);
            if !pass.markdown.trim().is_empty() {
                markdown.push_str(&pass.markdown);
                markdown.push_str("\n\n");
            }
            toc_entries.extend(pass.toc_entries);
        }

        markdown.push_str(PAGE_SEPARATOR);
        markdown.push_str("\n\n");

        Ok(ConvertedPage {
            markdown,
            toc_entries,
        })
    }
}

/// Append `<label><value>` and a blank line when `value` is present
fn push_line(markdown: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        let _ = write!(markdown, "{label}{value}\n\n");
    }
}
