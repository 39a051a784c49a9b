//! Labeler configuration and lexicon loading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;

/// Default price rule: digits, optional whitespace, then the currency word.
pub const DEFAULT_PRICE_PATTERN: &str = r"\d+\s*ብር";

pub const DEFAULT_PRODUCT_KEYWORDS: [&str; 2] = ["ምርት", "ምርቶች"];

pub const DEFAULT_LOCATIONS: [&str; 4] = ["አዲስ", "ቦሌ", "ቡልጋሪ", "በረራ"];

/// Lookup structures for the rule-based labeler.
///
/// The price pattern is matched as a prefix of each token: `100ብር` and
/// `100ብርም` are prices, `ዋጋ100ብር` is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelerConfig {
    pub price_pattern: String,
    pub product_keywords: Vec<String>,
    pub locations: Vec<String>,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        Self {
            price_pattern: DEFAULT_PRICE_PATTERN.to_owned(),
            product_keywords: DEFAULT_PRODUCT_KEYWORDS.map(str::to_owned).to_vec(),
            locations: DEFAULT_LOCATIONS.map(str::to_owned).to_vec(),
        }
    }
}

impl LabelerConfig {
    /// A configuration with the default price pattern and empty lexicons.
    pub fn empty() -> Self {
        Self {
            price_pattern: DEFAULT_PRICE_PATTERN.to_owned(),
            product_keywords: Vec::new(),
            locations: Vec::new(),
        }
    }

    pub fn with_price_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.price_pattern = pattern.into();
        self
    }

    pub fn with_product_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = locations.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces both lexicons with entries read from `products` and
    /// `locations`. See [`read_lexicon`] for the accepted format.
    pub fn with_lexicons_from<P, L>(self, products: P, locations: L) -> Result<Self>
    where
        P: BufRead,
        L: BufRead,
    {
        Ok(self
            .with_product_keywords(read_lexicon(products)?)
            .with_locations(read_lexicon(locations)?))
    }
}

/// Reads one lexicon entry per line.
///
/// Entries are trimmed; blank lines and lines starting with `#` are skipped.
pub fn read_lexicon<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        entries.push(entry.to_owned());
    }

    Ok(entries)
}

/// Opens `path` and reads it with [`read_lexicon`].
pub fn load_lexicon(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let file = File::open(path)?;
    read_lexicon(BufReader::new(file))
}
