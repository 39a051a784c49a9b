//! End-to-end record processing: normalize → tokenize → label.

use amharic_ner_types::{Document, RawRecord, Tag};
use tracing::{debug, trace};

use crate::analyzer::{NormalizerConfig, TextNormalizer, Tokenizer};
use crate::error::Result;
use crate::labeler::{LabelerConfig, RuleBasedLabeler};
use crate::metadata;

/// Configuration for every pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineConfig {
    pub normalizer: NormalizerConfig,
    pub labeler: LabelerConfig,
}

impl PipelineConfig {
    /// Default lexicons with Ethiopic-only normalization.
    pub fn script_only() -> Self {
        Self {
            normalizer: NormalizerConfig::script_only(),
            ..Self::default()
        }
    }
}

/// Counters accumulated across [`Pipeline::process_batch`] calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Records seen, absent ones included.
    pub records: u64,
    /// Records that were absent.
    pub missing: u64,
    /// Tokens labeled.
    pub tokens: u64,
    tag_counts: [u64; Tag::ALL.len()],
}

impl PipelineMetrics {
    /// Number of tokens that received `tag`.
    pub fn tag_count(&self, tag: Tag) -> u64 {
        self.tag_counts[tag.index()]
    }

    /// Tokens that received an entity tag.
    pub fn entities(&self) -> u64 {
        Tag::ALL
            .iter()
            .filter(|t| t.is_entity())
            .map(|t| self.tag_count(*t))
            .sum()
    }

    fn record(&mut self, document: Option<&Document>) {
        self.records += 1;
        let Some(doc) = document else {
            self.missing += 1;
            return;
        };

        for tag in doc.tags() {
            self.tag_counts[tag.index()] += 1;
        }
        self.tokens += doc.len() as u64;
    }
}

/// Normalizer, tokenizer and labeler wired together.
///
/// # Examples
///
/// ```
/// use amharic_ner_core::Pipeline;
/// use amharic_ner_types::Tag;
///
/// let pipeline = Pipeline::new().unwrap();
/// let doc = pipeline.process(Some("ቦሌ፣ ምርት 100ብር።")).unwrap();
/// let tags: Vec<Tag> = doc.tags().collect();
/// assert_eq!(tags, [Tag::Location, Tag::Product, Tag::Price]);
///
/// assert!(pipeline.process(None).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: TextNormalizer,
    tokenizer: Tokenizer,
    labeler: RuleBasedLabeler,
    metrics: PipelineMetrics,
}

impl Pipeline {
    /// Pipeline with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(&PipelineConfig::default())
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if the price pattern does not compile.
    pub fn with_config(config: &PipelineConfig) -> Result<Self> {
        Ok(Self::from_parts(
            TextNormalizer::new(config.normalizer),
            Tokenizer::new(),
            RuleBasedLabeler::new(&config.labeler)?,
        ))
    }

    pub fn from_parts(
        normalizer: TextNormalizer,
        tokenizer: Tokenizer,
        labeler: RuleBasedLabeler,
    ) -> Self {
        Self {
            normalizer,
            tokenizer,
            labeler,
            metrics: PipelineMetrics::default(),
        }
    }

    #[inline(always)]
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    #[inline(always)]
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    #[inline(always)]
    pub fn labeler(&self) -> &RuleBasedLabeler {
        &self.labeler
    }

    /// Normalizes and tokenizes, without labeling.
    pub fn preprocess(&self, text: Option<&str>) -> Option<Vec<String>> {
        let normalized = self.normalizer.normalize_opt(text)?;
        Some(
            self.tokenizer
                .tokens(&normalized)
                .into_iter()
                .map(str::to_owned)
                .collect(),
        )
    }

    /// Runs the full chain on one message.
    pub fn process(&self, text: Option<&str>) -> Option<Document> {
        let normalized = self.normalizer.normalize_opt(text)?;
        let tokens = self.tokenizer.tokens(&normalized);
        trace!(tokens = tokens.len(), "processed record");
        Some(self.labeler.label(tokens))
    }

    /// Extracts metadata from `line`, then processes its message.
    pub fn process_line(&self, line: &str) -> (RawRecord, Option<Document>) {
        let record = metadata::extract(line);
        let document = self.process(Some(&record.message));
        (record, document)
    }

    /// Processes every record in order, one output per input.
    ///
    /// An absent record yields `None` at its position and never stops the
    /// batch.
    pub fn process_batch<'a, I>(&mut self, texts: I) -> Vec<Option<Document>>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let before = self.metrics.records;
        let mut documents = Vec::new();
        for text in texts {
            let doc = self.process(text);
            self.metrics.record(doc.as_ref());
            documents.push(doc);
        }

        debug!(
            records = self.metrics.records - before,
            total_tokens = self.metrics.tokens,
            missing = self.metrics.missing,
            "batch processed"
        );
        documents
    }

    #[inline(always)]
    #[must_use]
    pub fn metrics(&self) -> &PipelineMetrics {
        &self.metrics
    }

    pub fn reset_metrics(&mut self) {
        self.metrics = PipelineMetrics::default();
    }
}
