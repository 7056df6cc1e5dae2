//! Heading pass over a converted page body.
//!
//! The body produced by htmd is classified once into lines of three kinds
//! (heading, code, text). A single walk over that list then, for every
//! heading:
//!
//! 1. records a table-of-contents entry and appends the anchor id and the
//!    "Back to Top" link (human-readable mode, source levels 2-4),
//! 2. demotes it by two levels so page-body headings sit below the page
//!    heading (level 2) and the document heading (level 1),
//! 3. renders headings that would fall below level 6 as `***text***`.
//!
//! Lines inside fenced code blocks are never treated as headings.

mod code_fence_detection;
mod heading_extraction;

pub use code_fence_detection::{CodeFence, detect_code_fence};
pub use heading_extraction::{HEADING_PREFIXES, extract_heading_level};

use std::fmt::Write;

use super::slug::slugify;
use super::toc::TocEntry;
use crate::utils::BACK_TO_TOP_LINK;

/// Levels every page-body heading is demoted by
pub const HEADING_SHIFT: usize = 2;

/// Deepest heading level Markdown supports
pub const MAX_HEADING_LEVEL: usize = 6;

/// Semantic classification of one body line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyLine<'a> {
    Heading { level: usize, text: &'a str },
    /// Fence delimiter or line inside a fenced block
    Code(&'a str),
    Text(&'a str),
}

/// Classify every line of `markdown`, tracking fenced code blocks
fn classify_body(markdown: &str) -> Vec<BodyLine<'_>> {
    let mut lines = Vec::new();
    let mut open_fence: Option<CodeFence> = None;

    for line in markdown.lines() {
        if let Some(fence) = open_fence {
            if fence.is_closed_by(line) {
                open_fence = None;
            }
            lines.push(BodyLine::Code(line));
            continue;
        }

        if let Some((char, count)) = detect_code_fence(line) {
            open_fence = Some(CodeFence { char, count });
            lines.push(BodyLine::Code(line));
            continue;
        }

        match extract_heading_level(line) {
            Some((level, text)) => lines.push(BodyLine::Heading { level, text }),
            None => lines.push(BodyLine::Text(line)),
        }
    }

    lines
}

/// Result of the heading pass over one page body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingPass {
    pub markdown: String,
    pub toc_entries: Vec<TocEntry>,
}

/// Shift headings and collect TOC entries in one walk over the body
#[must_use]
pub fn process_body_headings(markdown: &str, include_extras: bool) -> HeadingPass {
    let lines = classify_body(markdown);
    let mut out = String::with_capacity(markdown.len() + lines.len() * 8);
    let mut toc_entries = Vec::new();

    let mut first = true;
    let mut skip_blank = false;

    for line in &lines {
        // An empty heading is dropped together with the blank line after it
        if let BodyLine::Heading { text: "", .. } = *line {
            skip_blank = true;
            continue;
        }
        if std::mem::take(&mut skip_blank) && matches!(*line, BodyLine::Text("")) {
            continue;
        }

        if !first {
            out.push('\n');
        }
        first = false;

        match *line {
            BodyLine::Code(text) | BodyLine::Text(text) => out.push_str(text),
            BodyLine::Heading { level, text } => {
                let shifted = level + HEADING_SHIFT;
                if shifted > MAX_HEADING_LEVEL {
                    // No heading token, no anchor, no TOC entry
                    let _ = write!(out, "***{text}***");
                    continue;
                }

                out.push_str(HEADING_PREFIXES[shifted - 1]);
                out.push_str(text);

                if include_extras && level >= 2 {
                    let slug = slugify(text);
                    let _ = write!(out, " {{#{slug}}}\n\n{BACK_TO_TOP_LINK}");
                    toc_entries.push(TocEntry::new(level, text, slug));
                }
            }
        }
    }

    HeadingPass {
        markdown: out,
        toc_entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_by_two_levels() {
        let pass = process_body_headings("# One\n\n## Two\n\n### Three\n\n#### Four", false);
        assert_eq!(
            pass.markdown,
            "### One\n\n#### Two\n\n##### Three\n\n###### Four"
        );
        assert!(pass.toc_entries.is_empty());
    }

    #[test]
    fn test_headings_past_level_six_become_bold_italic() {
        let pass = process_body_headings("##### Five\n\n###### Six", true);
        assert_eq!(pass.markdown, "***Five***\n\n***Six***");
        assert!(pass.toc_entries.is_empty());
    }

    #[test]
    fn test_extras_add_anchor_backlink_and_toc_entry() {
        let pass = process_body_headings("## Setup\n\ngo", true);
        assert_eq!(
            pass.markdown,
            "#### Setup {#setup}\n\n[Back to Top](#table-of-contents)\n\ngo"
        );
        assert_eq!(pass.toc_entries, vec![TocEntry::new(2, "Setup", "setup".into())]);
    }

    #[test]
    fn test_level_one_body_heading_has_no_anchor() {
        let pass = process_body_headings("# Overview", true);
        assert_eq!(pass.markdown, "### Overview");
        assert!(pass.toc_entries.is_empty());
    }

    #[test]
    fn test_level_four_is_deepest_anchored_heading() {
        let pass = process_body_headings("#### Details", true);
        assert!(pass.markdown.starts_with("###### Details {#details}"));
        assert_eq!(pass.toc_entries[0].level, 4);
    }

    #[test]
    fn test_code_fences_are_left_alone() {
        let body = "```bash\n# not a heading\n## nor this\n```\n\n## Real";
        let pass = process_body_headings(body, true);
        assert!(pass.markdown.contains("# not a heading\n## nor this"));
        assert!(pass.markdown.contains("#### Real {#real}"));
        assert_eq!(pass.toc_entries.len(), 1);
    }

    #[test]
    fn test_empty_heading_leaves_no_gap() {
        let pass = process_body_headings("before\n\n##\n\nafter", true);
        assert_eq!(pass.markdown, "before\n\nafter");
        assert!(pass.toc_entries.is_empty());
    }

    #[test]
    fn test_text_lines_pass_through() {
        let pass = process_body_headings("para one\n\n* item\n    more\n#hashtag", true);
        assert_eq!(pass.markdown, "para one\n\n* item\n    more\n#hashtag");
    }
}
