//! Custom handlers for htmd HTML-to-Markdown conversion
//!
//! Extends htmd's default element handling with:
//! - Headings (`<h1>`..`<h6>`): always ATX, single line
//! - Lists (`<ul>`, `<ol>`, `<li>`): `* ` bullets with four-space continuation
//! - Links (`<a>`): localization of links to pages of the current run
//! - Code (`<pre>`, `<code>`): fenced blocks with the language from class hints

use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use htmd::{
    Element, HtmlToMarkdown,
    element_handler::{ElementHandler, HandlerResult, Handlers},
};
use markup5ever_rcdom::{Node, NodeData};

use super::slug::slugify;

/// Continuation indent for multi-line list items
const LIST_ITEM_INDENT: &str = "    ";

/// Create an htmd converter for one page of the run
///
/// `page_urls` holds every page URL of the run; links whose `href` matches
/// one exactly are rewritten to in-document anchors when `include_extras`
/// is set.
pub fn create_converter(page_urls: Arc<HashSet<String>>, include_extras: bool) -> HtmlToMarkdown {
    HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style", "noscript"])
        .add_handler(vec!["h1", "h2", "h3", "h4", "h5", "h6"], heading_handler)
        .add_handler(vec!["ul", "ol"], list_handler)
        .add_handler(vec!["li"], list_item_handler)
        .add_handler(vec!["pre"], pre_handler)
        .add_handler(vec!["code"], code_handler)
        .add_handler(
            vec!["a"],
            LocalLinkHandler {
                page_urls,
                include_extras,
            },
        )
        .build()
}

/// Handle `<h1>`..`<h6>` - one ATX heading line per element
fn heading_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let level = element
        .tag
        .strip_prefix('h')
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| (1..=6).contains(n))?;

    let content = handlers.walk_children(element.node).content;
    // Headings must stay on one line for the heading pass to see them
    let text = content.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.is_empty() {
        return Some(HandlerResult::from(String::new()));
    }

    Some(HandlerResult::from(format!(
        "\n\n{} {}\n\n",
        "#".repeat(level),
        text
    )))
}

/// Handle `<ul>` and `<ol>` - both render as `*` bullet lists
fn list_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node).content;

    if content.trim().is_empty() {
        return Some(HandlerResult::from(String::new()));
    }

    if is_inside(element.node, "li") {
        // Nested list: single newline wrapping
        Some(HandlerResult::from(format!("\n{content}\n")))
    } else {
        // Root list: block element
        Some(HandlerResult::from(format!("\n\n{content}\n\n")))
    }
}

/// Handle `<li>` elements
///
/// Leading blank lines are trimmed, trailing blank lines collapse into the
/// single newline that ends the item, and continuation lines are indented
/// by four spaces under the `* ` marker.
fn list_item_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node).content;
    Some(HandlerResult::from(format_list_item(&content)))
}

pub(crate) fn format_list_item(content: &str) -> String {
    let trimmed = content.trim_start_matches(['\n', '\r']).trim_end();
    let trimmed = trimmed.trim_start();

    let mut item = String::with_capacity(trimmed.len() + 8);
    item.push_str("\n* ");
    for (i, line) in trimmed.lines().enumerate() {
        if i > 0 {
            item.push('\n');
            if !line.is_empty() {
                item.push_str(LIST_ITEM_INDENT);
            }
        }
        item.push_str(line);
    }
    item.push('\n');
    item
}

/// Handle `<a>` elements, localizing links to pages of the current run
struct LocalLinkHandler {
    page_urls: Arc<HashSet<String>>,
    include_extras: bool,
}

impl ElementHandler for LocalLinkHandler {
    fn handle(&self, handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        let content = handlers.walk_children(element.node).content;
        let text = content.trim();

        let Some(href) = get_attr(element.attrs, "href") else {
            // Named anchors and href-less links keep only their text
            return Some(HandlerResult::from(text.to_string()));
        };

        let link_text = if text.is_empty() {
            // Fallback: aria-label, then title, then cleaned href
            get_attr(element.attrs, "aria-label")
                .or_else(|| get_attr(element.attrs, "title"))
                .unwrap_or_else(|| clean_url_for_display(&href))
        } else {
            text.to_string()
        };

        Some(HandlerResult::from(render_link(
            &link_text,
            &href,
            &self.page_urls,
            self.include_extras,
        )))
    }
}

/// Render one Markdown link, localizing it when `href` is a page of the run
pub(crate) fn render_link(
    text: &str,
    href: &str,
    page_urls: &HashSet<String>,
    include_extras: bool,
) -> String {
    if include_extras && page_urls.contains(href) {
        format!("[{}](#{})", text, slugify(text))
    } else {
        format!("[{text}]({href})")
    }
}

/// Handle `<pre>` elements - code blocks with fences
fn pre_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let result = handlers.walk_children(element.node);
    let content = result.content.trim_matches('\n');

    // The child <code> already produced a fenced block
    if content.starts_with("```") {
        return Some(HandlerResult::from(format!("\n\n{content}\n\n")));
    }

    let fence = match language_from_attrs(element.attrs) {
        Some(lang) => format!("```{lang}"),
        None => "```".to_string(),
    };

    Some(HandlerResult::from(format!("\n\n{fence}\n{content}\n```\n\n")))
}

/// Handle `<code>` elements - inline code or code block content
fn code_handler(_handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    // Raw text keeps angle brackets and other characters htmd would escape
    let content = extract_raw_text(element.node);

    if is_inside(element.node, "pre") {
        let fence = match language_from_attrs(element.attrs) {
            Some(lang) => format!("```{lang}"),
            None => "```".to_string(),
        };
        let body = content.trim_end_matches('\n');
        return Some(HandlerResult::from(format!("{fence}\n{body}\n```")));
    }

    let trimmed = content.trim();
    if trimmed.contains('`') {
        Some(HandlerResult::from(format!("`` {trimmed} ``")))
    } else {
        Some(HandlerResult::from(format!("`{trimmed}`")))
    }
}

// === Helper Functions ===

/// Extract raw text content from a node tree, preserving all whitespace
fn extract_raw_text(node: &Rc<Node>) -> String {
    let mut text = String::new();

    match &node.data {
        NodeData::Text { contents } => {
            text.push_str(&contents.borrow());
        }
        NodeData::Element { .. } | NodeData::Document | NodeData::Doctype { .. } => {
            for child in node.children.borrow().iter() {
                text.push_str(&extract_raw_text(child));
            }
        }
        NodeData::Comment { .. } | NodeData::ProcessingInstruction { .. } => {}
    }

    text
}

/// Check if a node has an ancestor element with the given tag name
fn is_inside(node: &Rc<Node>, tag: &str) -> bool {
    let mut current = node.parent.take();
    node.parent.set(current.clone());

    while let Some(weak_parent) = current {
        let Some(parent) = weak_parent.upgrade() else {
            break;
        };
        if let NodeData::Element { ref name, .. } = parent.data
            && &*name.local == tag
        {
            return true;
        }
        current = parent.parent.take();
        parent.parent.set(current.clone());
    }
    false
}

/// Language hint from `data-language` or a `language-*` / `lang-*` class
fn language_from_attrs(attrs: &[html5ever::Attribute]) -> Option<String> {
    if let Some(lang) = get_attr(attrs, "data-language") {
        return Some(lang);
    }

    get_attr(attrs, "class")?
        .split_whitespace()
        .find_map(|class| {
            class
                .strip_prefix("language-")
                .or_else(|| class.strip_prefix("lang-"))
        })
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

/// Get a non-blank attribute value from element attributes
fn get_attr(attrs: &[html5ever::Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| a.value.to_string())
        .filter(|v| !v.trim().is_empty())
}

/// Clean URL for display when used as link text fallback
fn clean_url_for_display(url: &str) -> String {
    let cleaned = url.trim_start_matches('/');

    // Remove query parameters and fragments
    let cleaned = cleaned.split('?').next().unwrap_or(cleaned);
    let cleaned = cleaned.split('#').next().unwrap_or(cleaned);

    let cleaned = cleaned.trim_end_matches(".html");
    let cleaned = cleaned.trim_end_matches(".htm");
    let cleaned = cleaned.trim_end_matches("/index");

    let cleaned = cleaned.replace(['-', '_'], " ");

    if let Some(first_char) = cleaned.chars().next() {
        format!(
            "{}{}",
            first_char.to_uppercase(),
            &cleaned[first_char.len_utf8()..]
        )
    } else {
        cleaned
    }
}
