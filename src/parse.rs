//! Parsing dash text into a flat store.
//!
//! Each line is split at its **first** `=`: the text before it is the
//! composite key, everything after it is the value (which may contain more
//! `=` characters). Later lines overwrite earlier lines with the same key.
//!
//! Lines that do not fit the format are handled according to
//! [`MalformedLines`]:
//!
//! - a line with no `=` becomes a key with an empty value under
//!   [`MalformedLines::Keep`], is dropped under [`MalformedLines::Skip`] and
//!   aborts the parse under [`MalformedLines::Reject`]
//! - a key that breaks the segment rules is treated the same way when
//!   [`DashOptions::validate_keys`] is set
//!
//! Whitespace-only lines carry no entry and are never reported. Every line
//! except the ones dropped by [`MalformedLines::Skip`] is retained verbatim
//! for list length inference, so lengths only count indices the store can
//! actually hold.
//!
//! ```rust
//! use dashdb::{DashOptions, Parser};
//!
//! let options = DashOptions::new();
//! let parsed = Parser::new("a-0-x=1\nnote=a=b\nbroken\n", &options).parse().unwrap();
//!
//! assert_eq!(parsed.entries.get("note"), Some("a=b"));
//! assert_eq!(parsed.entries.get("broken"), Some(""));
//! assert_eq!(parsed.malformed.len(), 1);
//! assert_eq!(parsed.lines.len(), 3);
//! ```

use crate::key::{KeyError, KeyPath, SEPARATOR};
use crate::options::{DashOptions, MalformedLines};
use crate::{Error, FlatMap, Result};
use std::fmt;

/// Why a line was reported as malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    MissingSeparator,
    InvalidKey(KeyError),
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingSeparator => write!(f, "missing '{}' separator", SEPARATOR),
            MalformedReason::InvalidKey(err) => write!(f, "invalid key: {}", err),
        }
    }
}

/// A line the parser could not take at face value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    pub content: String,
    pub reason: MalformedReason,
}

/// Splits a line at its first separator.
///
/// # Examples
///
/// ```rust
/// use dashdb::parse::split_line;
///
/// assert_eq!(split_line("a-0-x=1"), Some(("a-0-x", "1")));
/// assert_eq!(split_line("eq=x=y"), Some(("eq", "x=y")));
/// assert_eq!(split_line("no separator"), None);
/// ```
#[inline]
#[must_use]
pub fn split_line(line: &str) -> Option<(&str, &str)> {
    line.split_once(SEPARATOR)
}

/// The outcome of a parse.
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub entries: FlatMap,
    /// Input lines, unmodified, in input order. Skipped malformed lines are
    /// left out.
    pub lines: Vec<String>,
    pub malformed: Vec<MalformedLine>,
}

/// Line parser for dash text.
pub struct Parser<'a> {
    input: &'a str,
    options: &'a DashOptions,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: &'a DashOptions) -> Self {
        Parser { input, options }
    }

    /// Parses the whole input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLine`] for the first malformed line when the
    /// policy is [`MalformedLines::Reject`].
    pub fn parse(self) -> Result<Parsed> {
        let mut parsed = Parsed::default();

        for (index, line) in self.input.lines().enumerate() {
            let number = index + 1;

            if line.trim().is_empty() {
                parsed.lines.push(line.to_string());
                continue;
            }

            let (key, value, problem) = match split_line(line) {
                Some((key, value)) => (key, value, self.check_key(key)),
                None => (line, "", Some(MalformedReason::MissingSeparator)),
            };

            if let Some(reason) = problem {
                if self.options.malformed_lines == MalformedLines::Reject {
                    return Err(Error::malformed_line(number, line, &reason));
                }
                tracing::warn!(line = number, %reason, "malformed dash line: {}", line);
                parsed.malformed.push(MalformedLine {
                    line: number,
                    content: line.to_string(),
                    reason,
                });
                if self.options.malformed_lines == MalformedLines::Skip {
                    continue;
                }
            }

            parsed.lines.push(line.to_string());
            parsed.entries.insert(key.to_string(), value.to_string());
        }

        tracing::debug!(
            lines = parsed.lines.len(),
            entries = parsed.entries.len(),
            malformed = parsed.malformed.len(),
            "parsed dash text"
        );
        Ok(parsed)
    }

    fn check_key(&self, key: &str) -> Option<MalformedReason> {
        if !self.options.validate_keys {
            return None;
        }
        KeyPath::parse(key).err().map(MalformedReason::InvalidKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str, options: DashOptions) -> Result<Parsed> {
        Parser::new(input, &options).parse()
    }

    #[test]
    fn test_last_line_wins() {
        let parsed = parse("a=1\nb=2\na=3\n", DashOptions::new()).unwrap();
        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.entries.get("a"), Some("3"));
        assert_eq!(parsed.lines, vec!["a=1", "b=2", "a=3"]);
    }

    #[test]
    fn test_empty_value_and_blank_lines() {
        let parsed = parse("a=\n\n   \nb=x\r\n", DashOptions::new()).unwrap();
        assert_eq!(parsed.entries.get("a"), Some(""));
        assert_eq!(parsed.entries.get("b"), Some("x"));
        assert_eq!(parsed.entries.len(), 2);
        assert!(parsed.malformed.is_empty());
        assert_eq!(parsed.lines.len(), 4);
    }

    #[test]
    fn test_missing_separator_policies() {
        let parsed = parse("lonely key\n", DashOptions::new()).unwrap();
        assert_eq!(parsed.entries.get("lonely key"), Some(""));
        assert_eq!(
            parsed.malformed,
            vec![MalformedLine {
                line: 1,
                content: "lonely key".to_string(),
                reason: MalformedReason::MissingSeparator,
            }]
        );

        let options = DashOptions::new().with_malformed_lines(MalformedLines::Skip);
        let parsed = parse("a=1\nlonely key\n", options).unwrap();
        assert!(!parsed.entries.contains_key("lonely key"));
        assert_eq!(parsed.malformed.len(), 1);
        assert_eq!(parsed.lines, vec!["a=1"]);

        let err = parse("a=1\nlonely key\n", DashOptions::strict()).unwrap_err();
        assert!(matches!(err, Error::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_invalid_keys_are_reported() {
        let parsed = parse("a--b=1\n2nd=x\nok-0=y\n", DashOptions::new()).unwrap();
        assert_eq!(parsed.entries.len(), 3);
        let lines: Vec<_> = parsed.malformed.iter().map(|m| m.line).collect();
        assert_eq!(lines, vec![1, 2]);

        let parsed = parse("a--b=1\n2nd=x\n", DashOptions::lenient()).unwrap();
        assert!(parsed.malformed.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse("", DashOptions::strict()).unwrap();
        assert!(parsed.entries.is_empty());
        assert!(parsed.lines.is_empty());
    }
}
