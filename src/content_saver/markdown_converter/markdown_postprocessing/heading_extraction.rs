//! Heading extraction utilities.

/// Pre-built heading prefixes to avoid repeated string allocations
pub const HEADING_PREFIXES: [&str; 6] = ["# ", "## ", "### ", "#### ", "##### ", "###### "];

/// Extract heading level and content from an ATX heading line
///
/// The hashes must start the line and be followed by a space, a tab or the
/// end of the line. Optional closing hashes are removed per `CommonMark`:
/// `## Title ##` becomes `(2, "Title")`.
#[must_use]
pub fn extract_heading_level(line: &str) -> Option<(usize, &str)> {
    if !line.starts_with('#') {
        return None;
    }

    let level = line.bytes().take_while(|&b| b == b'#').count();
    if level > 6 {
        return None;
    }

    let rest = &line[level..];
    if !(rest.is_empty() || rest.starts_with([' ', '\t'])) {
        return None;
    }

    let content = rest.trim();

    // Strategy: scan from right, skip hashes, then require whitespace before them
    let bytes = content.as_bytes();
    let mut end = bytes.len();
    let mut hash_start = end;

    while hash_start > 0 && bytes[hash_start - 1] == b'#' {
        hash_start -= 1;
    }

    if hash_start < end {
        let mut ws_start = hash_start;
        while ws_start > 0 && bytes[ws_start - 1].is_ascii_whitespace() {
            ws_start -= 1;
        }

        // Whitespace between content and hashes, or nothing but hashes
        if ws_start < hash_start || hash_start == 0 {
            end = ws_start;
        }
    }

    Some((level, &content[..end]))
}
