//! List length inference.
//!
//! The format has no list headers: the length of a list is one more than the
//! highest index that appears directly below the list key. Lengths are
//! memoized per list key in a [`LengthCache`], where each entry is either
//!
//! - [`LengthHint::Observed`]: a lower bound learned from navigating to or
//!   writing at an index, or
//! - [`LengthHint::Known`]: the result of scanning the raw input lines,
//!   merged with every bound observed so far.
//!
//! A prefix without an entry is unknown. Only `Known` entries skip the scan,
//! so an empty list is scanned once and a partial observation never hides
//! elements that exist in the input.

use crate::key::DELIMITER;
use std::collections::HashMap;

/// Cached knowledge about one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthHint {
    Observed(usize),
    Known(usize),
}

impl LengthHint {
    #[inline]
    #[must_use]
    pub const fn value(self) -> usize {
        match self {
            LengthHint::Observed(n) | LengthHint::Known(n) => n,
        }
    }
}

/// Memoized list lengths keyed by list key.
#[derive(Debug, Clone, Default)]
pub struct LengthCache {
    entries: HashMap<String, LengthHint>,
}

impl LengthCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `prefix` has an element at `index`.
    pub fn observe(&mut self, prefix: &str, index: usize) {
        let len = index.saturating_add(1);
        match self.entries.get_mut(prefix) {
            Some(LengthHint::Observed(n)) | Some(LengthHint::Known(n)) => {
                if *n < len {
                    *n = len;
                }
            }
            None => {
                self.entries
                    .insert(prefix.to_string(), LengthHint::Observed(len));
            }
        }
    }

    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<LengthHint> {
        self.entries.get(prefix).copied()
    }

    /// Returns the length of `prefix`, scanning `lines` unless it is already known.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dashdb::{LengthCache, LengthHint};
    ///
    /// let lines = vec!["a-0-x=1".to_string(), "a-3-x=2".to_string()];
    /// let mut cache = LengthCache::new();
    /// cache.observe("a", 0);
    ///
    /// assert_eq!(cache.resolve("a", &lines), 4);
    /// assert_eq!(cache.get("a"), Some(LengthHint::Known(4)));
    /// assert_eq!(cache.resolve("missing", &lines), 0);
    /// assert_eq!(cache.get("missing"), Some(LengthHint::Known(0)));
    /// ```
    pub fn resolve(&mut self, prefix: &str, lines: &[String]) -> usize {
        let observed = match self.get(prefix) {
            Some(LengthHint::Known(n)) => return n,
            Some(LengthHint::Observed(n)) => n,
            None => 0,
        };
        let scanned = scan_length(prefix, lines);
        tracing::debug!(prefix, scanned, observed, "scanned list length");
        let len = scanned.max(observed);
        self.entries
            .insert(prefix.to_string(), LengthHint::Known(len));
        len
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Infers the length of the list at `prefix` from raw lines.
///
/// A line counts when it starts with `prefix`, then the delimiter, then a
/// decimal digit; the maximal digit run there is the element index. An empty
/// prefix denotes a top-level list, whose lines start directly with the index.
///
/// # Examples
///
/// ```rust
/// use dashdb::length::scan_length;
///
/// let lines: Vec<String> = ["k-0-name=a", "k-12-name=b", "kx-40=c", "k-name=d"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// assert_eq!(scan_length("k", &lines), 13);
/// assert_eq!(scan_length("nope", &lines), 0);
/// ```
#[must_use]
pub fn scan_length(prefix: &str, lines: &[String]) -> usize {
    lines
        .iter()
        .filter_map(|line| index_after(prefix, line))
        .map(|index| index.saturating_add(1))
        .max()
        .unwrap_or(0)
}

fn index_after(prefix: &str, line: &str) -> Option<usize> {
    let rest = if prefix.is_empty() {
        line
    } else {
        line.strip_prefix(prefix)?.strip_prefix(DELIMITER)?
    };
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    if digits.is_empty() {
        return None;
    }
    match digits.parse() {
        Ok(index) => Some(index),
        Err(_) => {
            tracing::debug!(prefix, line, "list index out of range, ignored");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &str) -> Vec<String> {
        raw.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_scan_nested_lists() {
        let lines = lines(
            "kernels-0-name=a\n\
             kernels-0-arguments-0-size=32\n\
             kernels-0-arguments-1-size=16\n\
             kernels-1-arguments-0-size=64\n\
             meta information-0=None\n",
        );
        assert_eq!(scan_length("kernels", &lines), 2);
        assert_eq!(scan_length("kernels-0-arguments", &lines), 2);
        assert_eq!(scan_length("kernels-1-arguments", &lines), 1);
        assert_eq!(scan_length("meta information", &lines), 1);
        assert_eq!(scan_length("kernels-0-name", &lines), 0);
    }

    #[test]
    fn test_scan_requires_delimiter_and_digit() {
        let lines = lines("ab-0=x\na=y\na-=z\na-x1=w\n");
        assert_eq!(scan_length("a", &lines), 0);
    }

    #[test]
    fn test_scan_top_level_list() {
        let lines = lines("0-name=a\n1-name=b\nname=c\n");
        assert_eq!(scan_length("", &lines), 2);
    }

    #[test]
    fn test_observe_keeps_maximum() {
        let mut cache = LengthCache::new();
        cache.observe("a", 4);
        cache.observe("a", 1);
        assert_eq!(cache.get("a"), Some(LengthHint::Observed(5)));
    }

    #[test]
    fn test_known_entries_skip_scan_but_grow() {
        let mut cache = LengthCache::new();
        assert_eq!(cache.resolve("a", &lines("a-1=x\n")), 2);
        assert_eq!(cache.resolve("a", &[]), 2);
        cache.observe("a", 5);
        assert_eq!(cache.get("a"), Some(LengthHint::Known(6)));
        assert_eq!(cache.resolve("a", &[]), 6);
    }

    #[test]
    fn test_empty_list_is_cached() {
        let mut cache = LengthCache::new();
        assert_eq!(cache.resolve("empty", &[]), 0);
        assert_eq!(cache.get("empty"), Some(LengthHint::Known(0)));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
