//! Amharic NER corpus preparation.
//!
//! Raw messages flow through four stages:
//!
//! 1. [`metadata`] splits `Sender: .., Timestamp: .., Message: ..` lines
//! 2. [`analyzer`] normalizes and tokenizes the message
//! 3. [`labeler`] tags each token with a first-match-wins rule list
//! 4. [`conll`] writes the labeled documents as a CoNLL corpus
//!
//! [`Pipeline`] wires stages 2 and 3 together and [`frame`] applies them to
//! named table columns.

pub mod analyzer;
pub mod conll;
pub mod error;
pub mod frame;
pub mod labeler;
pub mod metadata;
pub mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineConfig, PipelineMetrics};
