//! Word Tokenizer Module
//!
//! Second stage of the text processing pipeline: takes normalized text and
//! splits it into word tokens for labeling.
//!
//! ## What It Does
//!
//! Given normalized input like `"ዋጋ 100ብር!"`, it emits each token with its
//! position in the message:
//!
//! ```ignore
//! ("ዋጋ", 0)
//! ("100ብር", 1)
//! ("!", 2)
//! ```
//!
//! ## Boundary Rules
//!
//! Boundaries come from the generic Unicode word segmentation algorithm
//! (UAX #29) provided by `unicode-segmentation`:
//!
//! - Whitespace is trimmed off segments; whitespace-only segments are dropped
//! - Punctuation becomes its own token instead of being glued to a word
//! - Digits followed by letters (`100ብር`) stay one token
//!
//! There are no Amharic-specific rules. Ethiopic text is segmented the same
//! way as any other alphabetic script, so the result approximates Amharic
//! word boundaries rather than guaranteeing them.
//!
//! ## Zero Allocation
//!
//! Tokens are slices of the input string. `tokens` collects them into a
//! `Vec<&str>`; `tokenize` streams them through a callback.

use unicode_segmentation::UnicodeSegmentation;

/// Unicode word-boundary tokenizer.
///
/// ## Example
///
/// ```
/// use amharic_ner_core::analyzer::tokenizer::Tokenizer;
///
/// let tokenizer = Tokenizer::new();
/// assert_eq!(tokenizer.tokens("ሰላም ዓለም"), vec!["ሰላም", "ዓለም"]);
/// assert_eq!(tokenizer.tokens_opt(None), None);
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct Tokenizer;

impl Tokenizer {
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes normalized input and emits `(text, position)`.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop (overflow protection).
    pub fn tokenize<'n, F>(&self, normalized: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, u32),
    {
        let mut pos = 0u32;

        for segment in normalized.split_word_bounds() {
            // A combining mark after a space attaches to the space segment.
            let token = segment.trim();
            if token.is_empty() {
                continue;
            }
            emit(token, pos);
            if pos == u32::MAX {
                return;
            }
            pos += 1;
        }
    }

    /// Collects all tokens of `normalized` in order.
    pub fn tokens<'n>(&self, normalized: &'n str) -> Vec<&'n str> {
        let mut out = Vec::new();
        self.tokenize(normalized, |text, _| out.push(text));
        out
    }

    /// Like [`Tokenizer::tokens`], passing `None` through unchanged.
    #[inline]
    pub fn tokens_opt<'n>(&self, normalized: Option<&'n str>) -> Option<Vec<&'n str>> {
        normalized.map(|s| self.tokens(s))
    }
}
