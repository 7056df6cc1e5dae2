//! Code fence detection utilities.

/// An open code fence: its marker character and length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeFence {
    pub char: char,   // '`' or '~'
    pub count: usize, // Number of characters in the fence
}

impl CodeFence {
    /// Whether `line` closes this fence
    ///
    /// A closing fence uses the same character, is at least as long, and
    /// carries no info string.
    #[must_use]
    pub fn is_closed_by(&self, line: &str) -> bool {
        match detect_code_fence(line) {
            Some((c, count)) => {
                c == self.char
                    && count >= self.count
                    && line.trim().chars().all(|ch| ch == self.char)
            }
            None => false,
        }
    }
}

/// Detect code fence marker at the start of a line
/// Returns Some((char, count)) if the line starts with 3+ backticks or tildes
#[must_use]
pub fn detect_code_fence(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start();

    for marker in ['`', '~'] {
        if trimmed.starts_with(marker) {
            let count = trimmed.chars().take_while(|&c| c == marker).count();
            if count >= 3 {
                return Some((marker, count));
            }
        }
    }

    None
}
