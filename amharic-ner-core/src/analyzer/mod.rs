//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Strips Ethiopic punctuation and numerals, collapses whitespace
//! - **Tokenizer**: Splits normalized text into word tokens

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{NormalizationMode, NormalizerConfig, TextNormalizer};
pub use tokenizer::Tokenizer;
