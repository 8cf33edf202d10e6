//! Error types for dash-format parsing, typed reads and writes.
//!
//! Missing keys are never an error: a lookup of an absent key reads as the
//! empty string. Errors only describe text that could not be interpreted as
//! the requested type, keys or values that would corrupt the format, and
//! I/O failures.
//!
//! ## Error Categories
//!
//! - **Typed read failures**: [`Error::Parse`] and [`Error::Conversion`]
//! - **Format violations**: [`Error::InvalidKey`], [`Error::InvalidValue`], [`Error::MalformedLine`]
//! - **I/O failures**: [`Error::Io`] and [`Error::NotFound`]
//!
//! ## Examples
//!
//! ```rust
//! use dashdb::{DashDb, Error};
//!
//! let db: DashDb = "size=large\n".parse().unwrap();
//! match db.key("size").read_int() {
//!     Err(Error::Conversion { key, .. }) => assert_eq!(key, "size"),
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

use crate::key::KeyError;
use crate::value::ValueError;
use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Represents all possible errors raised by a [`DashDb`](crate::DashDb) or its accessors.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The file to read does not exist
    #[error("File not found: {0}")]
    NotFound(String),

    /// A value could not be read as the requested non-integer type
    #[error("Could not parse value '{value}' belonging to key '{key}' as {expected}: {msg}")]
    Parse {
        key: String,
        value: String,
        expected: &'static str,
        msg: String,
    },

    /// A value could not be converted to an integer
    #[error("Could not convert {reason} belonging to key '{key}' to an int")]
    Conversion {
        key: String,
        value: String,
        reason: ConversionFailure,
    },

    /// A composite key breaks the segment rules
    #[error("Invalid key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: KeyError,
    },

    /// A value cannot be stored on a single line
    #[error("Invalid value for key '{key}': {msg}")]
    InvalidValue { key: String, msg: String },

    /// An input line rejected by the parser
    #[error("Malformed line {line}: {reason}\n{content}")]
    MalformedLine {
        line: usize,
        content: String,
        reason: String,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

/// Why an integer conversion failed.
///
/// The distinction is informational; both causes surface as
/// [`Error::Conversion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionFailure {
    Empty,
    Malformed,
}

impl fmt::Display for ConversionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionFailure::Empty => write!(f, "empty value"),
            ConversionFailure::Malformed => write!(f, "malformed value"),
        }
    }
}

impl Error {
    /// Builds the error for a failed typed read of `value` stored at `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::{Error, ValueError};
    ///
    /// let err = Error::from_value_error("a-0-x", "", ValueError::EmptyInteger);
    /// assert!(err.to_string().contains("empty value"));
    /// ```
    pub fn from_value_error(key: &str, value: &str, err: ValueError) -> Self {
        match err {
            ValueError::EmptyInteger => Error::Conversion {
                key: key.to_string(),
                value: value.to_string(),
                reason: ConversionFailure::Empty,
            },
            ValueError::MalformedInteger(_) => Error::Conversion {
                key: key.to_string(),
                value: value.to_string(),
                reason: ConversionFailure::Malformed,
            },
            ValueError::Malformed { expected, msg } => Error::Parse {
                key: key.to_string(),
                value: value.to_string(),
                expected,
                msg,
            },
        }
    }

    /// Creates an invalid key error.
    pub fn invalid_key(key: &str, source: KeyError) -> Self {
        Error::InvalidKey {
            key: key.to_string(),
            source,
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(key: &str, msg: &str) -> Self {
        Error::InvalidValue {
            key: key.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a malformed line error; `line` is 1-based.
    pub fn malformed_line(line: usize, content: &str, reason: impl fmt::Display) -> Self {
        Error::MalformedLine {
            line,
            content: content.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Maps an I/O failure on `path`, keeping a missing file distinguishable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::Error;
    /// use std::io;
    /// use std::path::Path;
    ///
    /// let err = io::Error::from(io::ErrorKind::NotFound);
    /// assert!(matches!(Error::from_io(Path::new("db.txt"), &err), Error::NotFound(_)));
    /// ```
    pub fn from_io(path: &Path, err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path.display().to_string()),
            _ => Error::Io(format!("{}: {}", path.display(), err)),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
