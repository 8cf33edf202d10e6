//! The dash store.
//!
//! A [`DashDb`] owns the flat key/value entries decoded from dash text, the
//! original input lines, and a cache of inferred list lengths. Reads and
//! writes go through [`Cursor`] and [`CursorMut`], which accumulate a
//! composite key one segment at a time.
//!
//! ## Examples
//!
//! ```rust
//! use dashdb::DashDb;
//!
//! let mut db: DashDb = "kernels-0-name=update_positions\nkernels-1-name=update_speed\n"
//!     .parse()
//!     .unwrap();
//!
//! assert_eq!(db.key("kernels").length(), 2);
//! assert_eq!(db.key("kernels").index(1).key("name").read_string(), "update_speed");
//!
//! db.key_mut("kernels").index(2).key("name").write("foo_kernel").unwrap();
//! assert_eq!(db.key("kernels").length(), 3);
//!
//! assert_eq!(
//!     db.to_string(),
//!     "kernels-0-name=update_positions\nkernels-1-name=update_speed\nkernels-2-name=foo_kernel\n"
//! );
//! ```

use crate::cursor::{Cursor, CursorMut};
use crate::key::{list_prefixes, KeyPath, SEPARATOR};
use crate::length::LengthCache;
use crate::options::DashOptions;
use crate::parse::{MalformedLine, Parser};
use crate::value::ToDashValue;
use crate::{Error, FlatMap, Result};
use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// A flat key/value store decoded from dash text.
///
/// The length cache sits behind a [`RefCell`] so that read-only cursors can
/// record list indices they pass through. A `DashDb` is therefore not `Sync`;
/// it is meant for a single owner on a single thread.
#[derive(Debug, Clone, Default)]
pub struct DashDb {
    entries: FlatMap,
    lines: Vec<String>,
    malformed: Vec<MalformedLine>,
    lengths: RefCell<LengthCache>,
    options: DashOptions,
}

impl DashDb {
    /// Creates an empty store with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with custom options.
    #[must_use]
    pub fn with_options(options: DashOptions) -> Self {
        DashDb {
            options,
            ..Default::default()
        }
    }

    /// Parses dash text with custom options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLine`] when the options reject malformed lines
    /// and the input contains one.
    pub fn parse_with_options(content: &str, options: DashOptions) -> Result<Self> {
        let mut db = DashDb::with_options(options);
        db.read(content)?;
        Ok(db)
    }

    /// Reads a dash file with default options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the file does not exist and [`Error::Io`]
    /// for any other read failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, DashOptions::default())
    }

    /// Reads a dash file with custom options.
    ///
    /// # Errors
    ///
    /// See [`DashDb::open`] and [`DashDb::parse_with_options`].
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: DashOptions) -> Result<Self> {
        let mut db = DashDb::with_options(options);
        db.read_path(path)?;
        Ok(db)
    }

    /// Replaces the whole content of the store with parsed `content`.
    ///
    /// Entries, retained lines, malformed-line reports and cached lengths are
    /// all discarded. If parsing fails the store is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedLine`] under [`MalformedLines::Reject`](crate::MalformedLines::Reject).
    pub fn read(&mut self, content: &str) -> Result<()> {
        let parsed = Parser::new(content, &self.options).parse()?;
        self.entries = parsed.entries;
        self.lines = parsed.lines;
        self.malformed = parsed.malformed;
        self.lengths.get_mut().clear();
        Ok(())
    }

    /// Replaces the whole content of the store with a parsed file.
    ///
    /// # Errors
    ///
    /// See [`DashDb::open`] and [`DashDb::read`].
    pub fn read_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::from_io(path, &e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "reading dash file");
        self.read(&content)
    }

    /// Options the store was created with.
    #[must_use]
    pub fn options(&self) -> &DashOptions {
        &self.options
    }

    /// Number of entries in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a complete composite key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }

    /// Returns `true` if the complete composite key has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &FlatMap {
        &self.entries
    }

    /// The input lines of the last read, unmodified.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines of the last read that did not fit the format.
    #[must_use]
    pub fn malformed_lines(&self) -> &[MalformedLine] {
        &self.malformed
    }

    /// Starts a read chain at the empty key.
    #[must_use]
    pub fn root(&self) -> Cursor<'_> {
        Cursor::new(self, KeyPath::new())
    }

    /// Starts a read chain with a name segment.
    #[must_use]
    pub fn key(&self, name: &str) -> Cursor<'_> {
        self.root().key(name)
    }

    /// Starts a read chain with a top-level list index.
    #[must_use]
    pub fn index(&self, index: usize) -> Cursor<'_> {
        self.root().index(index)
    }

    /// Starts a write chain at the empty key.
    #[must_use]
    pub fn root_mut(&mut self) -> CursorMut<'_> {
        CursorMut::new(self, KeyPath::new())
    }

    /// Starts a write chain with a name segment.
    #[must_use]
    pub fn key_mut(&mut self, name: &str) -> CursorMut<'_> {
        self.root_mut().key(name)
    }

    /// Starts a write chain with a top-level list index.
    #[must_use]
    pub fn index_mut(&mut self, index: usize) -> CursorMut<'_> {
        self.root_mut().index(index)
    }

    /// Stores `value` under a complete composite key.
    ///
    /// # Errors
    ///
    /// With write validation on, returns [`Error::InvalidKey`] for a key that
    /// breaks the segment rules and [`Error::InvalidValue`] for a value with a
    /// line break.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::DashDb;
    ///
    /// let mut db = DashDb::new();
    /// db.insert("kernels-0-name", "a").unwrap();
    /// assert_eq!(db.key("kernels").length(), 1);
    /// assert!(db.insert("user-id", 7).is_ok());
    /// assert!(db.insert("2nd", 7).is_err());
    /// ```
    pub fn insert<V: ToDashValue>(&mut self, key: &str, value: V) -> Result<()> {
        let value = value.to_dash_value();
        if self.options.validate_writes {
            KeyPath::parse(key).map_err(|e| Error::invalid_key(key, e))?;
            check_value(key, &value)?;
        }
        self.commit(key.to_string(), value);
        Ok(())
    }

    /// Stores `value` under `key` without any validation.
    pub fn insert_unchecked<K: Into<String>, V: ToDashValue>(&mut self, key: K, value: V) {
        self.commit(key.into(), value.to_dash_value());
    }

    /// Writes every entry as `key=value` lines, sorted byte-wise by key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        for (key, value) in self.entries.sorted() {
            writeln!(writer, "{}{}{}", key, SEPARATOR, value)
                .map_err(|e| Error::io(&e.to_string()))?;
        }
        writer.flush().map_err(|e| Error::io(&e.to_string()))
    }

    /// Writes the sorted text to a file, replacing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the parent directory does not exist and
    /// [`Error::Io`] for any other failure.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = fs::File::create(path).map_err(|e| Error::from_io(path, &e))?;
        self.to_writer(BufWriter::new(file))?;
        tracing::debug!(path = %path.display(), entries = self.len(), "saved dash file");
        Ok(())
    }

    /// Writes every entry as a `key=value` line in insertion order, for debugging.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn dump<W: Write>(&self, mut writer: W) -> Result<()> {
        for (key, value) in self.entries.iter() {
            writeln!(writer, "{}{}{}", key, SEPARATOR, value)
                .map_err(|e| Error::io(&e.to_string()))?;
        }
        Ok(())
    }

    /// [`DashDb::dump`] to standard output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing to standard output fails.
    pub fn dump_stdout(&self) -> Result<()> {
        self.dump(io::stdout().lock())
    }

    pub(crate) fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key)
    }

    pub(crate) fn observe_index(&self, prefix: &str, index: usize) {
        self.lengths.borrow_mut().observe(prefix, index);
    }

    pub(crate) fn observe_index_mut(&mut self, prefix: &str, index: usize) {
        self.lengths.get_mut().observe(prefix, index);
    }

    pub(crate) fn length_of(&self, prefix: &str) -> usize {
        self.lengths.borrow_mut().resolve(prefix, &self.lines)
    }

    pub(crate) fn store(&mut self, key: KeyPath, value: String) -> Result<()> {
        if self.options.validate_writes {
            key.validate()
                .map_err(|e| Error::invalid_key(key.as_str(), e))?;
            check_value(key.as_str(), &value)?;
        }
        self.commit(key.into_string(), value);
        Ok(())
    }

    fn commit(&mut self, key: String, value: String) {
        let lengths = self.lengths.get_mut();
        for (prefix, index) in list_prefixes(&key) {
            lengths.observe(prefix, index);
        }
        self.entries.insert(key, value);
    }
}

fn check_value(key: &str, value: &str) -> Result<()> {
    if value.contains(['\n', '\r']) {
        return Err(Error::invalid_value(key, "value contains a line break"));
    }
    Ok(())
}

impl FromStr for DashDb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DashDb::parse_with_options(s, DashOptions::default())
    }
}

impl fmt::Display for DashDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.entries.sorted() {
            writeln!(f, "{}{}{}", key, SEPARATOR, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MalformedLines;

    #[test]
    fn test_read_replaces_everything() {
        let mut db: DashDb = "a-0=x\na-1=y\nbroken\n".parse().unwrap();
        assert_eq!(db.key("a").length(), 2);
        assert_eq!(db.malformed_lines().len(), 1);

        db.read("b=1\n").unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db.get("a-0"), None);
        assert_eq!(db.lines(), ["b=1".to_string()]);
        assert!(db.malformed_lines().is_empty());
        assert_eq!(db.key("a").length(), 0);
    }

    #[test]
    fn test_failed_read_keeps_store() {
        let options = DashOptions::new().with_malformed_lines(MalformedLines::Reject);
        let mut db = DashDb::parse_with_options("a=1\n", options).unwrap();
        assert!(db.read("b=2\nbroken\n").is_err());
        assert_eq!(db.get("a"), Some("1"));
        assert_eq!(db.get("b"), None);
    }

    #[test]
    fn test_display_is_sorted() {
        let mut db = DashDb::new();
        db.insert("b", 2).unwrap();
        db.insert("a", 1).unwrap();
        assert_eq!(db.to_string(), "a=1\nb=2\n");

        let mut dumped = Vec::new();
        db.dump(&mut dumped).unwrap();
        assert_eq!(String::from_utf8(dumped).unwrap(), "b=2\na=1\n");
    }

    #[test]
    fn test_insert_validation() {
        let mut db = DashDb::new();
        assert!(matches!(
            db.insert("a--b", "x"),
            Err(Error::InvalidKey { .. })
        ));
        assert!(matches!(
            db.insert("a", "two\nlines"),
            Err(Error::InvalidValue { .. })
        ));
        assert!(db.is_empty());

        db.insert_unchecked("a--b", "x");
        assert_eq!(db.get("a--b"), Some("x"));

        let mut lenient = DashDb::with_options(DashOptions::lenient());
        lenient.insert("2nd", "x").unwrap();
        assert_eq!(lenient.get("2nd"), Some("x"));
    }

    #[test]
    fn test_writes_grow_every_list_in_the_key() {
        let mut db = DashDb::new();
        db.insert("kernels-3-arguments-1-size", 8).unwrap();
        assert_eq!(db.key("kernels").length(), 4);
        assert_eq!(db.key("kernels").index(3).key("arguments").length(), 2);
    }
}
