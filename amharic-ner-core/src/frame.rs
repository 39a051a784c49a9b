//! Column table and the augmentation steps that add derived columns.
//!
//! A [`Frame`] is a small in-memory table of named, equally long columns.
//! Each augmentation takes a frame and a source column name and returns the
//! frame with new columns appended. Derived column names are fixed:
//!
//! | step                   | adds                                          |
//! |------------------------|-----------------------------------------------|
//! | [`preprocess_column`]  | `<column>_preprocessed`                       |
//! | [`label_column`]       | `Labeled`                                     |
//! | [`extract_metadata`]   | `sender`, `timestamp`, `preprocessed_message` |
//!
//! Missing cells stay missing in every derived column, so one absent row
//! never aborts the batch.

use amharic_ner_types::Document;

use crate::analyzer::TextNormalizer;
use crate::error::{Error, Result};
use crate::labeler::RuleBasedLabeler;
use crate::metadata;
use crate::pipeline::Pipeline;

pub const PREPROCESSED_SUFFIX: &str = "_preprocessed";
pub const LABELED_COLUMN: &str = "Labeled";
pub const SENDER_COLUMN: &str = "sender";
pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const PREPROCESSED_MESSAGE_COLUMN: &str = "preprocessed_message";

/// One table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Missing,
    Text(String),
    Tokens(Vec<String>),
    Labeled(Document),
}

impl Cell {
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tokens(&self) -> Option<&[String]> {
        match self {
            Cell::Tokens(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Cell::Labeled(d) => Some(d),
            _ => None,
        }
    }
}

impl From<Option<String>> for Cell {
    fn from(value: Option<String>) -> Self {
        value.map_or(Cell::Missing, Cell::Text)
    }
}

impl From<Option<Vec<String>>> for Cell {
    fn from(value: Option<Vec<String>>) -> Self {
        value.map_or(Cell::Missing, Cell::Tokens)
    }
}

impl From<Option<Document>> for Cell {
    fn from(value: Option<Document>) -> Self {
        value.map_or(Cell::Missing, Cell::Labeled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, row: usize) -> Option<&Cell> {
        self.cells.get(row)
    }
}

/// Named columns of equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    columns: Vec<Column>,
    rows: usize,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single text column; `None` entries become missing cells.
    pub fn from_texts<I, S>(name: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        let cells: Vec<Cell> = texts
            .into_iter()
            .map(|t| t.map_or(Cell::Missing, |s| Cell::Text(s.into())))
            .collect();
        Self {
            rows: cells.len(),
            columns: vec![Column {
                name: name.into(),
                cells,
            }],
        }
    }

    /// Adds a column, replacing any existing column with the same name.
    ///
    /// The first column of an empty frame fixes the row count.
    pub fn with_column(mut self, name: impl Into<String>, cells: Vec<Cell>) -> Result<Self> {
        let name = name.into();
        if self.columns.is_empty() {
            self.rows = cells.len();
        } else if cells.len() != self.rows {
            return Err(Error::LengthMismatch {
                column: name,
                expected: self.rows,
                found: cells.len(),
            });
        }

        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.cells = cells,
            None => self.columns.push(Column { name, cells }),
        }
        Ok(self)
    }

    /// Number of rows.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// # Errors
    ///
    /// Returns `Error::UnknownColumn` if no column is called `name`.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_owned()))
    }
}

fn unexpected(column: &Column, row: usize, expected: &'static str) -> Error {
    Error::UnexpectedCell {
        column: column.name.clone(),
        row,
        expected,
    }
}

/// Reads `column` as text: missing stays `None`, other kinds are errors.
fn texts<'f>(column: &'f Column) -> Result<Vec<Option<&'f str>>> {
    column
        .cells
        .iter()
        .enumerate()
        .map(|(row, cell)| match cell {
            Cell::Missing => Ok(None),
            Cell::Text(s) => Ok(Some(s.as_str())),
            _ => Err(unexpected(column, row, "text")),
        })
        .collect()
}

/// Adds `<column>_preprocessed`: the normalized, tokenized text.
pub fn preprocess_column(frame: Frame, column: &str, pipeline: &Pipeline) -> Result<Frame> {
    let cells: Vec<Cell> = texts(frame.column(column)?)?
        .into_iter()
        .map(|text| Cell::from(pipeline.preprocess(text)))
        .collect();

    frame.with_column(format!("{column}{PREPROCESSED_SUFFIX}"), cells)
}

/// Adds `Labeled` from a token column.
pub fn label_column(frame: Frame, token_column: &str, labeler: &RuleBasedLabeler) -> Result<Frame> {
    let source = frame.column(token_column)?;
    let cells = source
        .cells
        .iter()
        .enumerate()
        .map(|(row, cell)| match cell {
            Cell::Missing => Ok(Cell::Missing),
            cell => cell
                .as_tokens()
                .map(|tokens| Cell::Labeled(labeler.label(tokens)))
                .ok_or_else(|| unexpected(source, row, "tokens")),
        })
        .collect::<Result<Vec<_>>>()?;

    frame.with_column(LABELED_COLUMN, cells)
}

/// Adds `sender`, `timestamp` and `preprocessed_message` from raw lines.
///
/// `preprocessed_message` holds the normalized message text. Lines without
/// metadata get missing `sender`/`timestamp` cells and their whole text as
/// the message.
pub fn extract_metadata(frame: Frame, column: &str, normalizer: &TextNormalizer) -> Result<Frame> {
    let lines = texts(frame.column(column)?)?;

    let mut senders = Vec::with_capacity(lines.len());
    let mut timestamps = Vec::with_capacity(lines.len());
    let mut messages = Vec::with_capacity(lines.len());

    for line in lines {
        match line.map(metadata::extract) {
            Some(record) => {
                senders.push(Cell::from(record.sender));
                timestamps.push(Cell::from(record.timestamp));
                messages.push(Cell::Text(normalizer.normalize(&record.message)));
            }
            None => {
                senders.push(Cell::Missing);
                timestamps.push(Cell::Missing);
                messages.push(Cell::Missing);
            }
        }
    }

    frame
        .with_column(SENDER_COLUMN, senders)?
        .with_column(TIMESTAMP_COLUMN, timestamps)?
        .with_column(PREPROCESSED_MESSAGE_COLUMN, messages)
}

/// The `Labeled` column, one entry per row, ready for export.
pub fn labeled_documents(frame: &Frame) -> Result<Vec<Option<&Document>>> {
    let column = frame.column(LABELED_COLUMN)?;
    column
        .cells
        .iter()
        .enumerate()
        .map(|(row, cell)| match cell {
            Cell::Missing => Ok(None),
            cell => cell
                .as_document()
                .map(Some)
                .ok_or_else(|| unexpected(column, row, "labeled")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use amharic_ner_types::Tag;
    use pretty_assertions::assert_eq;

    fn messages() -> Frame {
        Frame::from_texts(
            "Message",
            [Some("ቦሌ፣ 100ብር"), None, Some("።")],
        )
    }

    #[test]
    fn from_texts_marks_missing() {
        let frame = messages();
        assert_eq!(frame.len(), 3);
        assert!(frame.column("Message").unwrap().cells()[1].is_missing());
    }

    #[test]
    fn preprocess_adds_suffixed_column() {
        let pipeline = Pipeline::new().unwrap();
        let frame = preprocess_column(messages(), "Message", &pipeline).unwrap();

        assert_eq!(
            frame.column_names().collect::<Vec<_>>(),
            vec!["Message", "Message_preprocessed"]
        );
        let col = frame.column("Message_preprocessed").unwrap();
        assert_eq!(
            col.cells(),
            &[
                Cell::Tokens(vec!["ቦሌ".into(), "100ብር".into()]),
                Cell::Missing,
                Cell::Tokens(vec![]),
            ]
        );
    }

    #[test]
    fn label_adds_labeled_column() {
        let pipeline = Pipeline::new().unwrap();
        let frame = preprocess_column(messages(), "Message", &pipeline).unwrap();
        let frame = label_column(frame, "Message_preprocessed", pipeline.labeler()).unwrap();

        let docs = labeled_documents(&frame).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(
            docs[0].unwrap().tags().collect::<Vec<_>>(),
            vec![Tag::Location, Tag::Price]
        );
        assert!(docs[1].is_none());
        assert!(docs[2].unwrap().is_empty());
    }

    #[test]
    fn extract_metadata_adds_three_columns() {
        let frame = Frame::from_texts(
            "raw",
            [
                Some("Sender: Abebe, Timestamp: 2021-01-01, Message: ሰላም፣ ዋጋ 100ብር"),
                Some("just text።"),
                None,
            ],
        );
        let frame = extract_metadata(frame, "raw", &TextNormalizer::default()).unwrap();

        let sender = frame.column(SENDER_COLUMN).unwrap();
        let ts = frame.column(TIMESTAMP_COLUMN).unwrap();
        let msg = frame.column(PREPROCESSED_MESSAGE_COLUMN).unwrap();

        assert_eq!(sender.cells()[0].as_text(), Some("Abebe"));
        assert_eq!(ts.cells()[0].as_text(), Some("2021-01-01"));
        assert_eq!(msg.cells()[0].as_text(), Some("ሰላም ዋጋ 100ብር"));

        assert!(sender.cells()[1].is_missing());
        assert!(ts.cells()[1].is_missing());
        assert_eq!(msg.cells()[1].as_text(), Some("just text"));

        assert!(msg.cells()[2].is_missing());
    }

    #[test]
    fn unknown_column_is_error() {
        let pipeline = Pipeline::new().unwrap();
        let err = preprocess_column(messages(), "nope", &pipeline).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(name) if name == "nope"));
    }

    #[test]
    fn wrong_cell_kind_is_error() {
        let pipeline = Pipeline::new().unwrap();
        let err = label_column(messages(), "Message", pipeline.labeler()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedCell { row: 0, expected: "tokens", .. }
        ));
    }

    #[test]
    fn labeled_documents_requires_labeled_column() {
        assert!(matches!(
            labeled_documents(&messages()),
            Err(Error::UnknownColumn(_))
        ));
    }

    #[test]
    fn with_column_checks_length() {
        let err = messages()
            .with_column("extra", vec![Cell::Missing])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch { expected: 3, found: 1, .. }
        ));
    }

    #[test]
    fn with_column_replaces_same_name() {
        let frame = messages()
            .with_column("Message", vec![Cell::Missing; 3])
            .unwrap();
        assert_eq!(frame.column_names().count(), 1);
        assert!(frame.column("Message").unwrap().cells()[0].is_missing());
    }

    #[test]
    fn cells_by_row() {
        let pipeline = Pipeline::new().unwrap();
        let frame = preprocess_column(messages(), "Message", &pipeline).unwrap();
        let frame = label_column(frame, "Message_preprocessed", pipeline.labeler()).unwrap();

        let tokens = frame.column("Message_preprocessed").unwrap();
        assert_eq!(
            tokens.get(0).and_then(Cell::as_tokens),
            Some(&["ቦሌ".to_owned(), "100ብር".to_owned()][..])
        );
        assert_eq!(tokens.get(1).and_then(Cell::as_tokens), None);
        assert_eq!(tokens.get(3), None);

        let labeled = frame.column(LABELED_COLUMN).unwrap();
        let doc = labeled.get(0).and_then(Cell::as_document).unwrap();
        assert_eq!(doc.tokens().collect::<Vec<_>>(), vec!["ቦሌ", "100ብር"]);
        assert_eq!(labeled.get(0).and_then(Cell::as_text), None);
    }

    #[test]
    fn labeled_documents_rejects_text_cells() {
        let frame = messages()
            .with_column(
                LABELED_COLUMN,
                vec![Cell::Text("x".into()), Cell::Missing, Cell::Missing],
            )
            .unwrap();
        assert!(matches!(
            labeled_documents(&frame),
            Err(Error::UnexpectedCell { row: 0, expected: "labeled", .. })
        ));
    }

    #[test]
    fn first_column_sets_row_count() {
        let frame = Frame::new()
            .with_column("a", vec![Cell::Text("x".into())])
            .unwrap();
        assert_eq!(frame.len(), 1);
        assert!(!frame.is_empty());
    }
}
