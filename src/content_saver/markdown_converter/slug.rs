//! Heading text to anchor id conversion

/// Convert heading text into a URL-safe anchor id
///
/// Lowercases, drops everything except ASCII letters, digits, whitespace,
/// `_` and `-`, collapses each whitespace/underscore/hyphen run into a single
/// `-`, and trims hyphens from both ends. The result is stable under
/// re-application.
///
/// Two headings with the same text produce the same slug. Slugs are not
/// disambiguated; the first matching anchor in a document wins.
///
/// ```rust
/// # use citescrape_output::content_saver::markdown_converter::slugify;
/// assert_eq!(slugify("Getting Started: The Basics!"), "getting-started-the-basics");
/// assert_eq!(slugify("  snake_case -- Names "), "snake-case-names");
/// assert_eq!(slugify(""), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_separator = false;

    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || matches!(c, '\u{FEFF}' | '_' | '-') {
            pending_separator = true;
        }
        // Any other character is removed without ending a separator run
    }

    slug
}
