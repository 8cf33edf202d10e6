//! Path cursors over a [`DashDb`].
//!
//! A cursor pairs a borrow of the store with the composite key built so far.
//! Navigation consumes the cursor and returns a longer one; every terminal
//! operation (a read, a write or a length query) consumes it for good. There
//! is no shared "current key" to reset, so a chain that fails half-way leaves
//! nothing behind.
//!
//! ```rust
//! use dashdb::DashDb;
//!
//! let db: DashDb = "a-0-x=1\na-0-y=2\na-1-x=3\n".parse().unwrap();
//!
//! assert_eq!(db.key("a").length(), 2);
//! assert_eq!(db.key("a").index(0).key("x").read_int().unwrap(), 1);
//! assert_eq!(db.key("a").index(1).key("x").read_int().unwrap(), 3);
//!
//! // A cursor is an ordinary value: branch off a shared prefix by cloning it.
//! let first = db.key("a").index(0);
//! assert_eq!(first.clone().key("y").read_string(), "2");
//! assert_eq!(first.key("x").read_string(), "1");
//! ```
//!
//! Absent keys read as the empty string, which in turn reads as `false`, fails
//! as an integer, and fails as a float. [`Cursor::get`] tells absence apart
//! from a present value instead.

use crate::key::KeyPath;
use crate::value::{FromDashValue, ToDashValue};
use crate::{DashDb, Error, Result};

/// A read-only cursor.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    db: &'a DashDb,
    key: KeyPath,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(db: &'a DashDb, key: KeyPath) -> Self {
        Cursor { db, key }
    }

    /// Appends a name segment.
    #[must_use]
    pub fn key(mut self, name: &str) -> Self {
        self.key.push_name(name);
        self
    }

    /// Appends a list index segment.
    ///
    /// Passing through an index records that the list built so far has at
    /// least `index + 1` elements.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.db.observe_index(self.key.as_str(), index);
        self.key.push_index(index);
        self
    }

    /// The composite key built so far.
    #[must_use]
    pub fn path(&self) -> &KeyPath {
        &self.key
    }

    /// The stored value, or `None` if the key is absent.
    #[must_use]
    pub fn raw(&self) -> Option<&'a str> {
        self.db.lookup(self.key.as_str())
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.raw().is_some()
    }

    /// Reads the value as `T`, telling an absent key apart from a present one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] or [`Error::Conversion`] if the value is
    /// present but is not a valid `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::DashDb;
    ///
    /// let db: DashDb = "size=32\nname=x\n".parse().unwrap();
    /// assert_eq!(db.key("size").get::<u32>().unwrap(), Some(32));
    /// assert_eq!(db.key("missing").get::<u32>().unwrap(), None);
    /// assert!(db.key("name").get::<u32>().is_err());
    /// ```
    pub fn get<T: FromDashValue>(self) -> Result<Option<T>> {
        match self.raw() {
            Some(raw) => self.coerce(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Reads the value as `T`; an absent key reads as the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] or [`Error::Conversion`] if the value is not a
    /// valid `T`.
    pub fn read<T: FromDashValue>(self) -> Result<T> {
        let raw = self.raw().unwrap_or_default();
        self.coerce(raw)
    }

    /// Reads the value as a string; an absent key reads as `""`.
    #[must_use]
    pub fn read_string(self) -> String {
        self.raw().unwrap_or_default().to_string()
    }

    /// Reads the value as a float.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the value is empty or not a decimal number.
    pub fn read_float(self) -> Result<f64> {
        self.read()
    }

    /// Reads the value as a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] if the value is empty or not an integer.
    pub fn read_int(self) -> Result<i64> {
        self.read()
    }

    /// Reads the value as a signed integer, using `fallback` when that fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::DashDb;
    ///
    /// let db: DashDb = "a=12\nb=twelve\n".parse().unwrap();
    /// assert_eq!(db.key("a").read_int_or(-1), 12);
    /// assert_eq!(db.key("b").read_int_or(-1), -1);
    /// assert_eq!(db.key("c").read_int_or(-1), -1);
    /// ```
    #[must_use]
    pub fn read_int_or(self, fallback: i64) -> i64 {
        self.read_int().unwrap_or(fallback)
    }

    /// Reads the value as a boolean: `True`, `true` and `1` are true, anything
    /// else (including an absent key) is false.
    #[must_use]
    pub fn read_bool(self) -> bool {
        crate::value::is_true(self.raw().unwrap_or_default())
    }

    /// The number of elements of the list at this key, 0 if there is no list.
    #[must_use]
    pub fn length(self) -> usize {
        self.db.length_of(self.key.as_str())
    }

    fn coerce<T: FromDashValue>(&self, raw: &str) -> Result<T> {
        T::from_dash_value(raw).map_err(|e| Error::from_value_error(self.key.as_str(), raw, e))
    }
}

/// A cursor that can write.
#[derive(Debug)]
pub struct CursorMut<'a> {
    db: &'a mut DashDb,
    key: KeyPath,
}

impl<'a> CursorMut<'a> {
    pub(crate) fn new(db: &'a mut DashDb, key: KeyPath) -> Self {
        CursorMut { db, key }
    }

    /// Appends a name segment.
    #[must_use]
    pub fn key(mut self, name: &str) -> Self {
        self.key.push_name(name);
        self
    }

    /// Appends a list index segment, growing the known length of the list.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.db.observe_index_mut(self.key.as_str(), index);
        self.key.push_index(index);
        self
    }

    /// The composite key built so far.
    #[must_use]
    pub fn path(&self) -> &KeyPath {
        &self.key
    }

    /// Stores `value` at this key, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// With write validation on, returns [`Error::InvalidKey`] if a segment
    /// breaks the key rules and [`Error::InvalidValue`] if the value contains
    /// a line break. No entry is stored in either case, but lengths raised
    /// by earlier [`CursorMut::index`] calls on this chain stay raised: after
    /// a failed `key_mut("list").index(7).key("bad-name").write(1)` the list
    /// `list` reports length 8.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::DashDb;
    ///
    /// let mut db = DashDb::new();
    /// db.key_mut("kernels").index(0).key("is read").write(true).unwrap();
    /// db.key_mut("kernels").index(0).key("size").write(20u32).unwrap();
    ///
    /// assert!(db.key("kernels").index(0).key("is read").read_bool());
    /// assert_eq!(db.get("kernels-0-is read"), Some("1"));
    /// assert!(db.key_mut("user-id").write("x").is_err());
    /// ```
    pub fn write<V: ToDashValue>(self, value: V) -> Result<()> {
        let value = value.to_dash_value();
        self.db.store(self.key, value)
    }

    /// Turns this cursor into a read-only one at the same key.
    #[must_use]
    pub fn into_cursor(self) -> Cursor<'a> {
        Cursor::new(self.db, self.key)
    }

    /// The number of elements of the list at this key, 0 if there is no list.
    #[must_use]
    pub fn length(self) -> usize {
        self.into_cursor().length()
    }
}
