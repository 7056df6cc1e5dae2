//! Table of contents accumulated across every page of one document

use std::fmt::Write;

use crate::utils::{TOC_ANCHOR, TOC_HEADING};

/// One navigable heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level, 2-6
    pub level: usize,
    pub text: String,
    pub slug: String,
}

impl TocEntry {
    pub fn new(level: usize, text: impl Into<String>, slug: String) -> Self {
        Self {
            level,
            text: text.into(),
            slug,
        }
    }
}

/// Append-only list of TOC entries in document order
///
/// Entries are never deduplicated; two headings with the same slug produce
/// two bullets pointing at the same anchor.
#[derive(Debug, Clone, Default)]
pub struct TableOfContents {
    entries: Vec<TocEntry>,
}

impl TableOfContents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = TocEntry>) {
        self.entries.extend(entries);
    }

    #[must_use]
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the TOC block, ending in a blank line
    ///
    /// Each bullet is indented two spaces per level below 2.
    #[must_use]
    pub fn render(&self) -> String {
        let mut toc = format!("## {TOC_HEADING} {{#{TOC_ANCHOR}}}\n\n");

        for entry in &self.entries {
            let indent = "  ".repeat(entry.level.saturating_sub(2));
            let _ = writeln!(toc, "{indent}- [{}](#{})", entry.text, entry.slug);
        }

        toc.push('\n');
        toc
    }
}
