//! Composite keys.
//!
//! A composite key is a sequence of segments joined by [`DELIMITER`]. A segment
//! is either a name or a decimal list index:
//!
//! ```text
//! kernels-0-arguments-1-element size
//! ^^^^^^^ ^ ^^^^^^^^^ ^ ^^^^^^^^^^^^
//!  name   |   name    |    name
//!       index       index
//! ```
//!
//! The format has no escaping, so the rules below are what keeps a key
//! decodable. [`KeyPath`] accumulates a key one segment at a time and remembers
//! the first rule it saw broken; [`KeyPath::parse`] checks a finished key.
//!
//! ```rust
//! use dashdb::{KeyPath, Segment};
//!
//! let key = KeyPath::new().with_name("kernels").with_index(0).with_name("name");
//! assert_eq!(key.as_str(), "kernels-0-name");
//! assert!(key.validate().is_ok());
//!
//! let segments: Vec<_> = key.segments().collect();
//! assert_eq!(segments, vec![Segment::Name("kernels"), Segment::Index(0), Segment::Name("name")]);
//! ```

use std::fmt;
use thiserror::Error;

/// Joins the segments of a composite key.
pub const DELIMITER: char = '-';

/// Splits a line into key and value.
pub const SEPARATOR: char = '=';

/// A broken segment rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("key is empty")]
    Empty,

    #[error("key contains an empty segment")]
    EmptySegment,

    #[error("segment '{segment}' contains reserved character {ch:?}")]
    ReservedChar { segment: String, ch: char },

    #[error("name segment '{segment}' begins with a digit")]
    LeadingDigit { segment: String },

    #[error("list index {index} cannot be the first segment")]
    TopLevelIndex { index: usize },
}

/// One piece of a composite key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Name(&'a str),
    Index(usize),
}

impl<'a> Segment<'a> {
    /// Classifies raw segment text: all decimal digits is an index, anything else a name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::Segment;
    ///
    /// assert_eq!(Segment::classify("12"), Segment::Index(12));
    /// assert_eq!(Segment::classify("name"), Segment::Name("name"));
    /// ```
    #[must_use]
    pub fn classify(segment: &'a str) -> Self {
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = segment.parse() {
                return Segment::Index(index);
            }
        }
        Segment::Name(segment)
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Name(name) => write!(f, "{}", name),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// An accumulated composite key.
///
/// Pushing never fails; the first broken rule is kept and reported by
/// [`KeyPath::validate`], so reads through an odd key still work while writes
/// can refuse it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath {
    key: String,
    error: Option<KeyError>,
}

impl KeyPath {
    /// Creates an empty key.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a complete composite key against the segment rules.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::{KeyError, KeyPath};
    ///
    /// assert!(KeyPath::parse("meta information-0").is_ok());
    /// assert_eq!(KeyPath::parse("a--b"), Err(KeyError::EmptySegment));
    /// assert!(matches!(KeyPath::parse("a-2nd"), Err(KeyError::LeadingDigit { .. })));
    /// ```
    pub fn parse(key: &str) -> Result<Self, KeyError> {
        if key.is_empty() {
            return Err(KeyError::Empty);
        }
        for (position, segment) in key.split(DELIMITER).enumerate() {
            check_raw_segment(position, segment)?;
        }
        Ok(KeyPath {
            key: key.to_string(),
            error: None,
        })
    }

    /// Returns the composite key built so far.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Appends a name segment.
    pub fn push_name(&mut self, name: &str) {
        if self.error.is_none() {
            self.error = check_name(name).err();
        }
        self.push_raw(name);
    }

    /// Appends a list index segment.
    pub fn push_index(&mut self, index: usize) {
        if self.error.is_none() && self.key.is_empty() {
            self.error = Some(KeyError::TopLevelIndex { index });
        }
        self.push_raw(&index.to_string());
    }

    /// Consuming form of [`KeyPath::push_name`].
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.push_name(name);
        self
    }

    /// Consuming form of [`KeyPath::push_index`].
    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.push_index(index);
        self
    }

    /// Returns the first broken rule, if any.
    pub fn validate(&self) -> Result<(), KeyError> {
        if self.key.is_empty() {
            return Err(KeyError::Empty);
        }
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Iterates over the segments of the key.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        segments(&self.key)
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.key
    }

    fn push_raw(&mut self, segment: &str) {
        if !self.key.is_empty() {
            self.key.push(DELIMITER);
        }
        self.key.push_str(segment);
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

/// Iterates over the segments of a raw composite key.
pub fn segments(key: &str) -> impl Iterator<Item = Segment<'_>> {
    key.split(DELIMITER)
        .filter(|segment| !segment.is_empty())
        .map(Segment::classify)
}

/// Yields `(list prefix, index)` for every index segment in `key`.
///
/// The prefix is the key of the list itself, i.e. everything before the
/// delimiter that precedes the index.
///
/// # Examples
///
/// ```rust
/// use dashdb::key::list_prefixes;
///
/// let lists: Vec<_> = list_prefixes("kernels-1-arguments-0-name").collect();
/// assert_eq!(lists, vec![("kernels", 1), ("kernels-1-arguments", 0)]);
/// ```
pub fn list_prefixes(key: &str) -> impl Iterator<Item = (&str, usize)> + '_ {
    let mut start: usize = 0;
    key.split(DELIMITER).filter_map(move |segment| {
        let prefix = &key[..start.saturating_sub(1)];
        start += segment.len() + DELIMITER.len_utf8();
        match Segment::classify(segment) {
            Segment::Index(index) => Some((prefix, index)),
            Segment::Name(_) => None,
        }
    })
}

fn check_name(name: &str) -> Result<(), KeyError> {
    if name.is_empty() {
        return Err(KeyError::EmptySegment);
    }
    if let Some(ch) = name.chars().find(|&c| is_reserved(c)) {
        return Err(KeyError::ReservedChar {
            segment: name.to_string(),
            ch,
        });
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(KeyError::LeadingDigit {
            segment: name.to_string(),
        });
    }
    Ok(())
}

fn check_raw_segment(position: usize, segment: &str) -> Result<(), KeyError> {
    match Segment::classify(segment) {
        Segment::Index(index) if position == 0 => Err(KeyError::TopLevelIndex { index }),
        Segment::Index(_) => Ok(()),
        Segment::Name(name) => check_name(name),
    }
}

#[inline]
fn is_reserved(c: char) -> bool {
    c == DELIMITER || c == SEPARATOR || c == '\n' || c == '\r'
}
