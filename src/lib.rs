//! # dashdb
//!
//! A flat-text key/value format that encodes nested, JSON-like data as lines of
//! `composite-key=value`, plus a typed accessor layer over it.
//!
//! ## What is dash text?
//!
//! Nesting and list indices are folded into dash-joined keys:
//!
//! ```text
//! kernels-0-name=update_positions
//! kernels-0-arguments-0-element size=32
//! kernels-1-name=update_speed
//! meta information=None
//! ```
//!
//! It targets programs that need structured configuration but cannot carry a
//! structured-data dependency. See [`format`] for the full rules.
//!
//! ## Key Features
//!
//! - **Fluent cursors**: `db.key("kernels").index(0).key("name").read_string()`
//! - **List lengths without headers**: inferred from the input and cached
//! - **Typed reads and writes**: strings, booleans, integers, floats, big integers, timestamps
//! - **Deterministic output**: saved files are sorted by key
//! - **Serde flattening**: turn any `T: Serialize` into dash text
//! - **Validation**: keys and values that would corrupt the format are caught
//!
//! ## Quick Start
//!
//! ```rust
//! use dashdb::DashDb;
//!
//! let text = "kernels-0-name=update_positions\n\
//!             kernels-0-arguments-0-element size=32\n\
//!             kernels-1-name=update_speed\n";
//!
//! let mut db: DashDb = text.parse().unwrap();
//!
//! // Read
//! assert_eq!(db.key("kernels").length(), 2);
//! let size = db
//!     .key("kernels")
//!     .index(0)
//!     .key("arguments")
//!     .index(0)
//!     .key("element size")
//!     .read_int()
//!     .unwrap();
//! assert_eq!(size, 32);
//!
//! // Missing keys are not errors
//! assert_eq!(db.key("nothing").read_string(), "");
//! assert_eq!(db.key("nothing").read_int_or(7), 7);
//!
//! // Write
//! db.key_mut("kernels").index(1).key("is read").write(true).unwrap();
//! assert!(db.key("kernels").index(1).key("is read").read_bool());
//! ```
//!
//! ### Flattening Rust values
//!
//! ```rust
//! use dashdb::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Config { name: String, ports: Vec<u16> }
//!
//! let config = Config { name: "edge".to_string(), ports: vec![80, 443] };
//! assert_eq!(to_string(&config).unwrap(), "name=edge\nports-0=80\nports-1=443\n");
//! ```
//!
//! ### Building fixtures with the dash! macro
//!
//! ```rust
//! use dashdb::dash;
//!
//! let db = dash!({ "b": 2, "a": 1 });
//! assert_eq!(db.to_string(), "a=1\nb=2\n");
//! ```
//!
//! ## Threading
//!
//! A [`DashDb`] is a single-owner, single-thread value. Read-only cursors
//! record list indices in a cache behind a `RefCell`, so the store is `Send`
//! but not `Sync`.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (debug for parses, scans and file I/O,
//! warn for malformed lines) and never installs a subscriber itself.

pub mod cursor;
pub mod db;
pub mod error;
pub mod format;
pub mod key;
pub mod length;
pub mod macros;
pub mod map;
pub mod options;
pub mod parse;
pub mod ser;
pub mod value;

pub use cursor::{Cursor, CursorMut};
pub use db::DashDb;
pub use error::{ConversionFailure, Error, Result};
pub use key::{KeyError, KeyPath, Segment, DELIMITER, SEPARATOR};
pub use length::{LengthCache, LengthHint};
pub use map::FlatMap;
pub use options::{DashOptions, MalformedLines};
pub use parse::{MalformedLine, MalformedReason, Parser};
pub use ser::Serializer;
pub use value::{FromDashValue, ToDashValue, ValueError};

use serde::Serialize;
use std::io;
use std::path::Path;

/// Parses dash text with default options.
///
/// # Examples
///
/// ```rust
/// let db = dashdb::from_str("a-0-x=1\na-1-x=3\n").unwrap();
/// assert_eq!(db.key("a").length(), 2);
/// ```
///
/// # Errors
///
/// Never fails with default options; see [`DashDb::parse_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<DashDb> {
    s.parse()
}

/// Reads a dash file with default options.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if the file does not exist and [`Error::Io`]
/// if it cannot be read.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<DashDb> {
    DashDb::open(path)
}

/// Reads dash text from an I/O stream with default options.
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// let db = dashdb::from_reader(Cursor::new(b"name=x\n")).unwrap();
/// assert_eq!(db.key("name").read_string(), "x");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails or the input is not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(mut reader: R) -> Result<DashDb> {
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Flattens any `T: Serialize` into a [`DashDb`].
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("tags", vec!["a", "b", "c"]);
/// let db = dashdb::to_db(&map).unwrap();
/// assert_eq!(db.key("tags").length(), 3);
/// ```
///
/// # Errors
///
/// Returns an error if the top-level value is a scalar, a map key is not a
/// scalar, or a key or value breaks the format rules.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_db<T>(value: &T) -> Result<DashDb>
where
    T: ?Sized + Serialize,
{
    to_db_with_options(value, DashOptions::default())
}

/// Flattens any `T: Serialize` into a [`DashDb`] with custom options.
///
/// # Errors
///
/// See [`to_db`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_db_with_options<T>(value: &T, options: DashOptions) -> Result<DashDb>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serializes any `T: Serialize` to sorted dash text.
///
/// # Errors
///
/// See [`to_db`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_db(value)?.to_string())
}

/// Serializes any `T: Serialize` to a writer as sorted dash text.
///
/// # Errors
///
/// Returns an error if flattening fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_db(value)?.to_writer(writer)
}
