//! CoNLL-style corpus export and import.
//!
//! Each document is written as one `<token> <tag>` line per token followed
//! by exactly one blank line. There is no header and nothing after the last
//! blank line. An empty document therefore shows up as a lone blank line,
//! and the reader turns every blank line back into a document boundary.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use amharic_ner_types::{Document, LabeledToken, Tag};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Streams documents to any writer.
pub struct ConllWriter<W: Write> {
    inner: W,
    documents: usize,
    tokens: usize,
}

impl<W: Write> ConllWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            documents: 0,
            tokens: 0,
        }
    }

    /// Writes one document and its trailing blank line.
    pub fn write_document(&mut self, document: &Document) -> Result<()> {
        for token in document {
            writeln!(self.inner, "{} {}", token.text, token.tag)?;
        }
        self.inner.write_all(b"\n")?;

        self.documents += 1;
        self.tokens += document.len();
        Ok(())
    }

    /// Writes every present document; absent ones are skipped.
    pub fn write_documents<'d, I>(&mut self, documents: I) -> Result<()>
    where
        I: IntoIterator<Item = Option<&'d Document>>,
    {
        for (row, document) in documents.into_iter().enumerate() {
            match document {
                Some(doc) => self.write_document(doc)?,
                None => warn!(row, "skipping missing document"),
            }
        }
        Ok(())
    }

    #[inline]
    pub fn documents_written(&self) -> usize {
        self.documents
    }

    #[inline]
    pub fn tokens_written(&self) -> usize {
        self.tokens
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush()?;
        debug!(
            documents = self.documents,
            tokens = self.tokens,
            "conll export finished"
        );
        Ok(self.inner)
    }
}

/// Writes `documents` to a new file at `path`, replacing any existing file.
///
/// Returns the number of documents written.
pub fn save<'d, P, I>(path: P, documents: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'d Document>,
{
    let file = File::create(path.as_ref())?;
    let mut writer = ConllWriter::new(BufWriter::new(file));
    writer.write_documents(documents.into_iter().map(Some))?;

    let written = writer.documents_written();
    writer.finish()?;
    Ok(written)
}

/// Parses a corpus back into documents.
///
/// # Errors
///
/// `MalformedLine` when a non-blank line has no `<token> <tag>` shape,
/// `UnknownTag` when the tag is not one of the known spellings. Line
/// numbers are 1-based.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    let mut current = Document::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if line.is_empty() {
            documents.push(core::mem::take(&mut current));
            continue;
        }

        let (text, tag) = line
            .rsplit_once(' ')
            .filter(|(text, _)| !text.is_empty())
            .ok_or_else(|| Error::MalformedLine {
                line: line_no,
                content: line.to_owned(),
            })?;

        let tag: Tag = tag.parse().map_err(|source| Error::UnknownTag {
            line: line_no,
            source,
        })?;

        current.push(LabeledToken::new(text, tag));
    }

    // Tolerate a missing final blank line.
    if !current.is_empty() {
        documents.push(current);
    }

    Ok(documents)
}

/// Opens `path` and parses it with [`read`].
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let file = File::open(path)?;
    read(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(pairs: &[(&str, Tag)]) -> Document {
        pairs
            .iter()
            .map(|(text, tag)| LabeledToken::new(*text, *tag))
            .collect()
    }

    fn render(docs: &[Document]) -> String {
        let mut writer = ConllWriter::new(Vec::new());
        for d in docs {
            writer.write_document(d).unwrap();
        }
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn writes_token_tag_lines_and_blank_separator() {
        let out = render(&[
            doc(&[("ቦሌ", Tag::Location), ("100ብር", Tag::Price)]),
            doc(&[("ምርት", Tag::Product)]),
        ]);
        assert_eq!(out, "ቦሌ B-LOC\n100ብር B-PRICE\n\nምርት B-Product\n\n");
    }

    #[test]
    fn empty_document_is_single_blank_line() {
        assert_eq!(render(&[Document::new()]), "\n");
    }

    #[test]
    fn no_documents_no_output() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn counters_track_output() {
        let mut writer = ConllWriter::new(Vec::new());
        writer
            .write_document(&doc(&[("a", Tag::Outside), ("b", Tag::Outside)]))
            .unwrap();
        writer.write_document(&Document::new()).unwrap();
        assert_eq!(writer.documents_written(), 2);
        assert_eq!(writer.tokens_written(), 2);
    }

    #[test]
    fn write_documents_skips_missing() {
        let d = doc(&[("x", Tag::Outside)]);
        let mut writer = ConllWriter::new(Vec::new());
        writer.write_documents([Some(&d), None, Some(&d)]).unwrap();
        assert_eq!(writer.documents_written(), 2);
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(out, "x O\n\nx O\n\n");
    }

    #[test]
    fn read_back_rendered_documents() {
        let docs = vec![
            doc(&[("አዲስ", Tag::Location), ("ዋጋ", Tag::Outside)]),
            Document::new(),
            doc(&[("ምርቶች", Tag::Product)]),
        ];
        let parsed = read(render(&docs).as_bytes()).unwrap();
        assert_eq!(parsed, docs);
    }

    #[test]
    fn read_without_final_blank_line() {
        let parsed = read("a O\nb B-LOC".as_bytes()).unwrap();
        assert_eq!(parsed, vec![doc(&[("a", Tag::Outside), ("b", Tag::Location)])]);
    }

    #[test]
    fn read_crlf() {
        let parsed = read("a O\r\n\r\n".as_bytes()).unwrap();
        assert_eq!(parsed, vec![doc(&[("a", Tag::Outside)])]);
    }

    #[test]
    fn read_rejects_missing_tag() {
        let err = read("a O\nlonely\n".as_bytes()).unwrap_err();
        match err {
            Error::MalformedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "lonely");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_rejects_empty_token() {
        assert!(matches!(
            read(" O\n".as_bytes()),
            Err(Error::MalformedLine { line: 1, .. })
        ));
    }

    #[test]
    fn read_rejects_unknown_tag() {
        let err = read("ቦሌ I-LOC\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::UnknownTag { line: 1, .. }));
    }
}
