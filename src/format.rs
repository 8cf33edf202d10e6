//! Dash Format Reference
//!
//! This module documents the dash text format as implemented by this library.
//!
//! # Overview
//!
//! Dash text is a flat alternative to JSON for programs that cannot take on a
//! structured-data dependency. Nesting and list positions are folded into the
//! key, so every record fits on one line and the file can be read, grepped
//! and diffed line by line.
//!
//! # Records
//!
//! ```text
//! <key>=<value>
//! ```
//!
//! - One record per line, terminated by `\n` (`\r\n` is accepted on input)
//! - The key ends at the **first** `=`; the value is the rest of the line and
//!   may contain further `=` characters
//! - Values are raw text: there is no quoting and no escaping
//! - When two lines have the same key, the later one wins
//!
//! # Keys
//!
//! A key is one or more segments joined by `-`:
//!
//! | Segment | Rule | Example |
//! |---------|------|---------|
//! | Name | Non-empty, no `-`, no `=`, no line break, does not start with a digit | `element size` |
//! | Index | Decimal digits, never the first segment | `0`, `12` |
//!
//! Because nothing is escaped, a name containing `-` silently changes the
//! shape of the data. [`KeyPath`](crate::KeyPath) and the write validation in
//! [`DashOptions`](crate::DashOptions) exist to catch that.
//!
//! # From JSON
//!
//! ```json
//! {
//!     "kernels": [
//!         { "name": "update_positions", "partitioning": "x" },
//!         { "name": "update_speed", "partitioning": "x" }
//!     ],
//!     "meta information": "None"
//! }
//! ```
//!
//! becomes
//!
//! ```text
//! kernels-0-name=update_positions
//! kernels-0-partitioning=x
//! kernels-1-name=update_speed
//! kernels-1-partitioning=x
//! meta information=None
//! ```
//!
//! [`to_string`](crate::to_string) performs this transformation for any
//! `T: Serialize`.
//!
//! # Lists
//!
//! There are no list headers. The length of the list at key `k` is one more
//! than the highest index `i` such that some line starts with `k-i`. Empty
//! lists are indistinguishable from absent ones and have length 0. Sparse
//! lists are allowed: a list with only `k-4-…` has length 5.
//!
//! # Values
//!
//! | Written from | Text |
//! |--------------|------|
//! | `true` / `false` | `1` / `0` |
//! | integers | decimal, e.g. `-42` |
//! | floats | shortest round-trip decimal, e.g. `0.1`, `32` |
//! | timestamps | RFC 3339, e.g. `2024-01-15T10:30:00+00:00` |
//!
//! On read, `True`, `true` and `1` are true and everything else is false.
//! An absent key reads exactly like an empty value.
//!
//! # Output
//!
//! Saved text lists every entry sorted byte-wise by key, one per line, so the
//! same content always produces the same file regardless of how it was built.
//!
//! # Malformed input
//!
//! | Input | Default handling |
//! |-------|------------------|
//! | Blank or whitespace-only line | Ignored |
//! | Line without `=` | Whole line is the key, value is empty; reported |
//! | Key breaking the segment rules | Stored as written; reported |
//!
//! See [`MalformedLines`](crate::MalformedLines) for the alternatives.
