//! Error type for the fallible parts of the pipeline.
//!
//! Absent input is never an error: it travels through the pipeline as `None`.
//! Only I/O, bad configuration, malformed corpus files and frame misuse end
//! up here.

use amharic_ner_types::TagParseError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid price pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A non-blank CoNLL line without a `<token> <tag>` shape.
    #[error("malformed CoNLL line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("CoNLL line {line}: {source}")]
    UnknownTag {
        line: usize,
        #[source]
        source: TagParseError,
    },

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("column {column} has {found} rows, frame has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("column {column} row {row}: expected {expected} cell")]
    UnexpectedCell {
        column: String,
        row: usize,
        expected: &'static str,
    },
}
