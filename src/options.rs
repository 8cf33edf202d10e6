//! Configuration options for parsing and writing dash text.
//!
//! This module provides types to tune how strictly a [`DashDb`](crate::DashDb)
//! treats its input and its writes:
//!
//! - [`DashOptions`]: Main configuration struct
//! - [`MalformedLines`]: What to do with lines the parser cannot split cleanly
//!
//! ## Examples
//!
//! ```rust
//! use dashdb::{DashDb, DashOptions, MalformedLines};
//!
//! // Drop lines without a '=' instead of keeping them as empty entries
//! let options = DashOptions::new().with_malformed_lines(MalformedLines::Skip);
//! let db = DashDb::parse_with_options("name=x\ngarbage\n", options).unwrap();
//! assert_eq!(db.len(), 1);
//!
//! // Refuse anything suspicious
//! let result = DashDb::parse_with_options("garbage\n", DashOptions::strict());
//! assert!(result.is_err());
//! ```

/// Policy for input lines that have no `=` or whose key breaks the segment rules.
///
/// Every policy except [`MalformedLines::Reject`] records the line in
/// [`DashDb::malformed_lines`](crate::DashDb::malformed_lines).
///
/// # Examples
///
/// ```rust
/// use dashdb::MalformedLines;
///
/// assert_eq!(MalformedLines::default(), MalformedLines::Keep);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MalformedLines {
    /// Store the line anyway: a line without `=` becomes a key with an empty value.
    #[default]
    Keep,
    /// Leave the line out of the store.
    Skip,
    /// Abort parsing with [`Error::MalformedLine`](crate::Error::MalformedLine).
    Reject,
}

/// Configuration options for a [`DashDb`](crate::DashDb).
///
/// Options travel with the store, so a later [`DashDb::read`](crate::DashDb::read)
/// applies the same policy.
///
/// # Examples
///
/// ```rust
/// use dashdb::{DashOptions, MalformedLines};
///
/// // Defaults: keep and report malformed lines, validate writes
/// let options = DashOptions::new();
/// assert!(options.validate_keys);
/// assert!(options.validate_writes);
///
/// // Accept anything, report nothing
/// let options = DashOptions::lenient();
/// assert!(!options.validate_keys);
///
/// // Custom configuration
/// let options = DashOptions::new()
///     .with_malformed_lines(MalformedLines::Skip)
///     .with_validate_writes(false);
/// ```
#[derive(Clone, Debug)]
pub struct DashOptions {
    pub malformed_lines: MalformedLines,
    pub validate_keys: bool,
    pub validate_writes: bool,
}

impl Default for DashOptions {
    fn default() -> Self {
        DashOptions {
            malformed_lines: MalformedLines::default(),
            validate_keys: true,
            validate_writes: true,
        }
    }
}

impl DashOptions {
    /// Creates default options (keep and report malformed lines, validate writes).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that reject malformed input and invalid writes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::{DashOptions, MalformedLines};
    ///
    /// let options = DashOptions::strict();
    /// assert_eq!(options.malformed_lines, MalformedLines::Reject);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        DashOptions {
            malformed_lines: MalformedLines::Reject,
            ..Default::default()
        }
    }

    /// Creates options that accept any input and any write, like the bare format.
    ///
    /// Lines without `=` are still reported; only key validation is turned off.
    #[must_use]
    pub fn lenient() -> Self {
        DashOptions {
            malformed_lines: MalformedLines::Keep,
            validate_keys: false,
            validate_writes: false,
        }
    }

    /// Sets the policy for malformed input lines.
    #[must_use]
    pub fn with_malformed_lines(mut self, policy: MalformedLines) -> Self {
        self.malformed_lines = policy;
        self
    }

    /// Enables or disables segment validation of parsed keys.
    #[must_use]
    pub fn with_validate_keys(mut self, validate: bool) -> Self {
        self.validate_keys = validate;
        self
    }

    /// Enables or disables validation of keys and values on write.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::DashOptions;
    ///
    /// let options = DashOptions::new().with_validate_writes(false);
    /// assert!(!options.validate_writes);
    /// ```
    #[must_use]
    pub fn with_validate_writes(mut self, validate: bool) -> Self {
        self.validate_writes = validate;
        self
    }
}
