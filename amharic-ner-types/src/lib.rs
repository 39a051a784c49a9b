//! Core types for the Amharic NER corpus preparation pipeline.
//!
//! This crate provides the value types shared between the analyzer, the
//! labeler and the corpus exporter. Keeping them separate ensures:
//!
//! - **Stable wire form**: tags have exactly one textual spelling
//! - **Cross-crate compatibility**: core and tooling share the same types
//! - **Clean boundaries**: no dependency on regex or tokenizer crates here

#![warn(missing_docs)]

use core::fmt;
use core::str::FromStr;

/// Entity tag assigned to a single token.
///
/// The label set is closed. Only beginning-of-entity tags exist, so two
/// adjacent tokens of the same entity type are indistinguishable from two
/// separate single-token entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Tag {
    /// Price-like token, e.g. `100ብር`.
    Price = 0,
    /// Product keyword.
    Product = 1,
    /// Known location name.
    Location = 2,
    /// Outside any entity.
    Outside = 3,
}

impl Tag {
    /// Every tag, in rule priority order with `Outside` last.
    pub const ALL: [Tag; 4] = [Tag::Price, Tag::Product, Tag::Location, Tag::Outside];

    /// Returns the CoNLL spelling of this tag.
    #[inline(always)]
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::Price => "B-PRICE",
            Tag::Product => "B-Product",
            Tag::Location => "B-LOC",
            Tag::Outside => "O",
        }
    }

    /// Returns `true` for every tag except [`Tag::Outside`].
    #[inline(always)]
    pub const fn is_entity(self) -> bool {
        !matches!(self, Tag::Outside)
    }

    /// Dense index usable for per-tag counters.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known tag spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag: {0:?}")]
pub struct TagParseError(pub String);

impl FromStr for Tag {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B-PRICE" => Ok(Tag::Price),
            "B-Product" => Ok(Tag::Product),
            "B-LOC" => Ok(Tag::Location),
            "O" => Ok(Tag::Outside),
            other => Err(TagParseError(other.to_owned())),
        }
    }
}

/// A token paired with its tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabeledToken {
    /// Token text, never containing whitespace.
    pub text: String,
    /// Assigned tag.
    pub tag: Tag,
}

impl LabeledToken {
    /// Creates a labeled token.
    #[inline]
    pub fn new(text: impl Into<String>, tag: Tag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }
}

impl fmt::Display for LabeledToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.text, self.tag)
    }
}

/// Ordered sequence of labeled tokens produced from one input record.
///
/// Token order is the left-to-right order of the source message and is
/// never rearranged or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    tokens: Vec<LabeledToken>,
}

impl Document {
    /// Creates an empty document.
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Creates an empty document with room for `capacity` tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
        }
    }

    /// Appends a labeled token at the end.
    #[inline]
    pub fn push(&mut self, token: LabeledToken) {
        self.tokens.push(token);
    }

    /// Number of tokens.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the document holds no tokens.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates over the labeled tokens in order.
    pub fn iter(&self) -> core::slice::Iter<'_, LabeledToken> {
        self.tokens.iter()
    }

    /// Token texts in order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(|t| t.text.as_str())
    }

    /// Tags in order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.tokens.iter().map(|t| t.tag)
    }

    /// Borrows the labeled tokens as a slice.
    pub fn as_slice(&self) -> &[LabeledToken] {
        &self.tokens
    }
}

impl From<Vec<LabeledToken>> for Document {
    fn from(tokens: Vec<LabeledToken>) -> Self {
        Self { tokens }
    }
}

impl FromIterator<LabeledToken> for Document {
    fn from_iter<I: IntoIterator<Item = LabeledToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a LabeledToken;
    type IntoIter = core::slice::Iter<'a, LabeledToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for Document {
    type Item = LabeledToken;
    type IntoIter = std::vec::IntoIter<LabeledToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Fields of one raw input line.
///
/// When the line does not follow the `Sender: .., Timestamp: .., Message: ..`
/// shape, `sender` and `timestamp` are `None` and `message` holds the whole
/// line unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    /// Message author, when present.
    pub sender: Option<String>,
    /// Timestamp text as written, when present.
    pub timestamp: Option<String>,
    /// Message body.
    pub message: String,
}

impl RawRecord {
    /// Record with no metadata.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            sender: None,
            timestamp: None,
            message: message.into(),
        }
    }

    /// Returns `true` when sender and timestamp were both extracted.
    #[inline]
    pub fn has_metadata(&self) -> bool {
        self.sender.is_some() && self.timestamp.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_spellings() {
        assert_eq!(Tag::Price.as_str(), "B-PRICE");
        assert_eq!(Tag::Product.as_str(), "B-Product");
        assert_eq!(Tag::Location.as_str(), "B-LOC");
        assert_eq!(Tag::Outside.as_str(), "O");
    }

    #[test]
    fn tag_parse_matches_display() {
        for tag in Tag::ALL {
            assert_eq!(tag.to_string().parse::<Tag>(), Ok(tag));
        }
    }

    #[test]
    fn tag_parse_is_case_sensitive() {
        assert_eq!(
            "B-product".parse::<Tag>(),
            Err(TagParseError("B-product".to_owned()))
        );
        assert!("I-LOC".parse::<Tag>().is_err());
        assert!("".parse::<Tag>().is_err());
    }

    #[test]
    fn tag_index_is_dense() {
        for (i, tag) in Tag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
    }

    #[test]
    fn tag_size_is_1_byte() {
        assert_eq!(size_of::<Tag>(), 1);
    }

    #[test]
    fn only_outside_is_not_entity() {
        assert!(Tag::Price.is_entity());
        assert!(Tag::Location.is_entity());
        assert!(!Tag::Outside.is_entity());
    }

    #[test]
    fn labeled_token_display_is_conll_line() {
        let t = LabeledToken::new("ቦሌ", Tag::Location);
        assert_eq!(t.to_string(), "ቦሌ B-LOC");
    }

    #[test]
    fn document_preserves_order_and_duplicates() {
        let doc: Document = ["a", "b", "a"]
            .into_iter()
            .map(|t| LabeledToken::new(t, Tag::Outside))
            .collect();

        assert_eq!(doc.len(), 3);
        assert_eq!(doc.tokens().collect::<Vec<_>>(), vec!["a", "b", "a"]);
    }

    #[test]
    fn document_from_vec_keeps_tokens() {
        let tokens = vec![
            LabeledToken::new("ቦሌ", Tag::Location),
            LabeledToken::new("100ብር", Tag::Price),
        ];
        let doc = Document::from(tokens.clone());
        assert_eq!(doc.as_slice(), tokens.as_slice());
        assert_eq!(doc.tags().collect::<Vec<_>>(), vec![Tag::Location, Tag::Price]);
    }

    #[test]
    fn with_capacity_starts_empty() {
        let mut doc = Document::with_capacity(2);
        assert!(doc.is_empty());
        doc.push(LabeledToken::new("x", Tag::Outside));
        assert_eq!(doc.as_slice(), &[LabeledToken::new("x", Tag::Outside)]);
    }

    #[test]
    fn empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.iter().count(), 0);
    }

    #[test]
    fn message_only_record() {
        let r = RawRecord::message_only("hello");
        assert!(!r.has_metadata());
        assert_eq!(r.message, "hello");
    }
}
