//! Token/size estimation primitives
//!
//! The batch writer needs exactly two numbers per record: the UTF-8 byte
//! length of its serialized form and a token estimate. Token accounting is
//! advisory, so a tokenizer that cannot process a record reports zero
//! tokens instead of failing the run.

use std::sync::OnceLock;
use tiktoken_rs::CoreBPE;

/// Counts tokens in serialized records
///
/// Returns `None` when the text cannot be tokenized.
pub trait TokenCounter: Send + Sync {
    fn count_tokens(&self, text: &str) -> Option<usize>;
}

/// Result of checking one record against the token budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenEstimate {
    /// Record fits within the budget on its own (always the case when unbounded)
    Within(usize),
    /// Record alone is larger than the budget
    Exceeds(usize),
}

impl TokenEstimate {
    #[must_use]
    pub fn tokens(self) -> usize {
        match self {
            TokenEstimate::Within(n) | TokenEstimate::Exceeds(n) => n,
        }
    }

    #[must_use]
    pub fn exceeds(self) -> bool {
        matches!(self, TokenEstimate::Exceeds(_))
    }
}

/// Estimate tokens of `text` against an optional budget
pub fn estimate_tokens(
    counter: &dyn TokenCounter,
    text: &str,
    max_tokens: Option<usize>,
) -> TokenEstimate {
    let tokens = counter.count_tokens(text).unwrap_or_else(|| {
        log::warn!(
            "Token estimation failed for a {} byte record, counting it as zero tokens",
            text.len()
        );
        0
    });

    match max_tokens {
        Some(max) if tokens > max => TokenEstimate::Exceeds(tokens),
        _ => TokenEstimate::Within(tokens),
    }
}

/// UTF-8 byte length of a string
#[inline]
#[must_use]
pub fn byte_size(s: &str) -> usize {
    s.len()
}

/// cl100k_base BPE shared by every counter in the process
static CL100K: OnceLock<Option<CoreBPE>> = OnceLock::new();

fn cl100k() -> Option<&'static CoreBPE> {
    CL100K
        .get_or_init(|| match tiktoken_rs::cl100k_base() {
            Ok(bpe) => Some(bpe),
            Err(e) => {
                log::warn!("cl100k_base tokenizer unavailable, token budgets disabled: {e}");
                None
            }
        })
        .as_ref()
}

/// GPT-style BPE token counter (cl100k_base)
#[derive(Debug, Clone, Copy, Default)]
pub struct BpeTokenCounter;

impl BpeTokenCounter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TokenCounter for BpeTokenCounter {
    fn count_tokens(&self, text: &str) -> Option<usize> {
        cl100k().map(|bpe| bpe.encode_with_special_tokens(text).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<usize>);

    impl TokenCounter for Fixed {
        fn count_tokens(&self, _text: &str) -> Option<usize> {
            self.0
        }
    }

    #[test]
    fn test_unbounded_budget_never_exceeds() {
        let estimate = estimate_tokens(&Fixed(Some(1_000_000)), "x", None);
        assert_eq!(estimate, TokenEstimate::Within(1_000_000));
    }

    #[test]
    fn test_exceeds_carries_count() {
        let estimate = estimate_tokens(&Fixed(Some(150)), "x", Some(100));
        assert_eq!(estimate, TokenEstimate::Exceeds(150));
        assert_eq!(estimate.tokens(), 150);
        assert!(estimate.exceeds());

        assert_eq!(
            estimate_tokens(&Fixed(Some(100)), "x", Some(100)),
            TokenEstimate::Within(100)
        );
    }

    #[test]
    fn test_tokenizer_failure_counts_zero() {
        assert_eq!(
            estimate_tokens(&Fixed(None), "x", Some(10)),
            TokenEstimate::Within(0)
        );
    }

    #[test]
    fn test_byte_size_is_utf8_length() {
        assert_eq!(byte_size("abc"), 3);
        assert_eq!(byte_size("é"), 2);
        assert_eq!(byte_size("🎉"), 4);
    }

    #[test]
    fn test_bpe_counter_counts_something() {
        let counter = BpeTokenCounter::new();
        let tokens = counter.count_tokens(r#"{"title":"Intro","url":"https://x/intro"}"#);
        assert!(tokens.is_some_and(|n| n > 0));
        assert_eq!(counter.count_tokens(""), Some(0));
    }
}
