//! Extraction of sender/timestamp/message fields from raw lines.
//!
//! Accepted shape, literally:
//!
//! ```text
//! Sender: <sender>, Timestamp: <timestamp>, Message: <message>
//! ```
//!
//! The sender ends at the first `, Timestamp: `, the timestamp at the first
//! `, Message: ` after it, and the message runs to the end of the line.
//! No field spans a newline. Anything else is not an error: the whole input
//! becomes the message and the other fields stay unset.

use amharic_ner_types::RawRecord;
use memchr::memmem;

const SENDER_PREFIX: &str = "Sender: ";
const TIMESTAMP_SEP: &str = ", Timestamp: ";
const MESSAGE_SEP: &str = ", Message: ";

/// Borrowed view of a matched line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields<'a> {
    pub sender: &'a str,
    pub timestamp: &'a str,
    pub message: &'a str,
}

/// Splits `line` into its fields, or returns `None` when it does not follow
/// the fixed shape.
pub fn parse_fields(line: &str) -> Option<Fields<'_>> {
    let rest = line.strip_prefix(SENDER_PREFIX)?;
    // Only the first line can match.
    let rest = match memchr::memchr(b'\n', rest.as_bytes()) {
        Some(nl) => &rest[..nl],
        None => rest,
    };

    let ts = memmem::find(rest.as_bytes(), TIMESTAMP_SEP.as_bytes())?;
    let sender = &rest[..ts];
    let rest = &rest[ts + TIMESTAMP_SEP.len()..];

    let msg = memmem::find(rest.as_bytes(), MESSAGE_SEP.as_bytes())?;
    let timestamp = &rest[..msg];
    let message = &rest[msg + MESSAGE_SEP.len()..];

    Some(Fields {
        sender,
        timestamp,
        message,
    })
}

/// Extracts a [`RawRecord`] from one raw line.
///
/// # Examples
///
/// ```
/// use amharic_ner_core::metadata::extract;
///
/// let record = extract("Sender: Abebe, Timestamp: 2021-01-01, Message: ሰላም ዋጋ 100ብር");
/// assert_eq!(record.sender.as_deref(), Some("Abebe"));
/// assert_eq!(record.message, "ሰላም ዋጋ 100ብር");
///
/// let plain = extract("ሰላም");
/// assert_eq!(plain.sender, None);
/// assert_eq!(plain.message, "ሰላም");
/// ```
pub fn extract(line: &str) -> RawRecord {
    match parse_fields(line) {
        Some(fields) => RawRecord {
            sender: Some(fields.sender.to_owned()),
            timestamp: Some(fields.timestamp.to_owned()),
            message: fields.message.to_owned(),
        },
        None => RawRecord::message_only(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_line() {
        let r = extract("Sender: Abebe, Timestamp: 2021-01-01, Message: ሰላም ዋጋ 100ብር");
        assert_eq!(r.sender.as_deref(), Some("Abebe"));
        assert_eq!(r.timestamp.as_deref(), Some("2021-01-01"));
        assert_eq!(r.message, "ሰላም ዋጋ 100ብር");
        assert!(r.has_metadata());
    }

    #[test]
    fn missing_prefix_is_whole_message() {
        let line = "From: Abebe, Timestamp: 2021-01-01, Message: ሰላም";
        let r = extract(line);
        assert_eq!(r, RawRecord::message_only(line));
    }

    #[test]
    fn prefix_must_start_the_line() {
        let line = " Sender: a, Timestamp: b, Message: c";
        assert_eq!(extract(line).message, line);
        assert_eq!(extract(line).sender, None);
    }

    #[test]
    fn missing_separators_do_not_match() {
        assert_eq!(parse_fields("Sender: a, Message: c"), None);
        assert_eq!(parse_fields("Sender: a, Timestamp: b"), None);
        assert_eq!(parse_fields("Sender: a Timestamp: b Message: c"), None);
    }

    #[test]
    fn empty_fields_are_allowed() {
        let f = parse_fields("Sender: , Timestamp: , Message: ").unwrap();
        assert_eq!(f.sender, "");
        assert_eq!(f.timestamp, "");
        assert_eq!(f.message, "");
    }

    #[test]
    fn message_may_contain_separators() {
        let f = parse_fields("Sender: a, Timestamp: b, Message: x, Message: y").unwrap();
        assert_eq!(f.timestamp, "b");
        assert_eq!(f.message, "x, Message: y");
    }

    #[test]
    fn sender_ends_at_first_timestamp_separator() {
        let f = parse_fields("Sender: a, b, Timestamp: t, Message: m").unwrap();
        assert_eq!(f.sender, "a, b");
        assert_eq!(f.timestamp, "t");
    }

    #[test]
    fn fields_stop_at_newline() {
        let f = parse_fields("Sender: a, Timestamp: t, Message: first\nsecond").unwrap();
        assert_eq!(f.message, "first");

        let line = "Sender: a\n, Timestamp: t, Message: m";
        assert_eq!(parse_fields(line), None);
        assert_eq!(extract(line).message, line);
    }

    #[test]
    fn empty_line() {
        assert_eq!(extract(""), RawRecord::message_only(""));
    }
}
