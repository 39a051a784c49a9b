//! Rule-based entity labeling.
//!
//! Every token is checked against an ordered list of rules and receives the
//! tag of the first rule that matches. The default order is:
//!
//! 1. price pattern → `B-PRICE`
//! 2. product keyword → `B-Product`
//! 3. location → `B-LOC`
//! 4. nothing matched → `O`
//!
//! The order matters: a location name that also looks like a price is
//! tagged `B-PRICE`. Only beginning tags are produced, so a multi-token
//! entity shows up as several adjacent `B-` tags.

pub mod config;

pub use config::LabelerConfig;

use amharic_ner_types::{Document, LabeledToken, Tag};
use regex::Regex;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::error::Result;

/// How a rule decides whether a token belongs to it.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Regex anchored at the token start.
    Pattern(Regex),
    /// Exact membership in a fixed set.
    Lexicon(FxHashSet<Box<str>>),
}

impl Matcher {
    /// Compiles `pattern` so that it only matches at the start of a token.
    pub fn prefix_pattern(pattern: &str) -> Result<Self> {
        Ok(Matcher::Pattern(Regex::new(&format!("^(?:{pattern})"))?))
    }

    pub fn lexicon<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Matcher::Lexicon(
            entries
                .into_iter()
                .map(|e| Box::<str>::from(e.as_ref()))
                .collect(),
        )
    }

    #[inline]
    pub fn matches(&self, token: &str) -> bool {
        match self {
            Matcher::Pattern(re) => re.is_match(token),
            Matcher::Lexicon(set) => set.contains(token),
        }
    }
}

/// A matcher paired with the tag it assigns.
#[derive(Debug, Clone)]
pub struct Rule {
    pub matcher: Matcher,
    pub tag: Tag,
}

/// First-match-wins labeler over an ordered rule list.
///
/// # Examples
///
/// ```
/// use amharic_ner_core::labeler::{LabelerConfig, RuleBasedLabeler};
/// use amharic_ner_types::Tag;
///
/// let labeler = RuleBasedLabeler::new(&LabelerConfig::default()).unwrap();
/// let doc = labeler.label(["አዲስ", "ቦሌ", "100ብር", "ምርት", "xyz"]);
/// let tags: Vec<Tag> = doc.tags().collect();
/// assert_eq!(tags, [Tag::Location, Tag::Location, Tag::Price, Tag::Product, Tag::Outside]);
/// ```
#[derive(Debug, Clone)]
pub struct RuleBasedLabeler {
    rules: SmallVec<[Rule; 4]>,
}

impl RuleBasedLabeler {
    /// Builds the price, product and location rules from `config`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if the price pattern does not compile.
    pub fn new(config: &LabelerConfig) -> Result<Self> {
        let rules = [
            Rule {
                matcher: Matcher::prefix_pattern(&config.price_pattern)?,
                tag: Tag::Price,
            },
            Rule {
                matcher: Matcher::lexicon(&config.product_keywords),
                tag: Tag::Product,
            },
            Rule {
                matcher: Matcher::lexicon(&config.locations),
                tag: Tag::Location,
            },
        ];

        Ok(Self::from_rules(rules))
    }

    /// Labeler over an explicit rule list, evaluated in iteration order.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = Rule>,
    {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Tag of the first matching rule, or [`Tag::Outside`].
    #[inline]
    pub fn tag(&self, token: &str) -> Tag {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(token))
            .map_or(Tag::Outside, |rule| rule.tag)
    }

    /// Labels every token, keeping order and duplicates.
    pub fn label<I, S>(&self, tokens: I) -> Document
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens.into_iter();
        let mut document = Document::with_capacity(tokens.size_hint().0);
        for token in tokens {
            let token = token.as_ref();
            document.push(LabeledToken::new(token, self.tag(token)));
        }
        document
    }

    /// Like [`RuleBasedLabeler::label`], passing `None` through.
    pub fn label_opt<I, S>(&self, tokens: Option<I>) -> Option<Document>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens.map(|t| self.label(t))
    }
}
