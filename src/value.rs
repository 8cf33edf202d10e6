//! Conversions between raw dash values and typed Rust values.
//!
//! Every value in a dash file is a plain string. This module defines how
//! typed values are written ([`ToDashValue`]) and read back ([`FromDashValue`]).
//!
//! ## Canonical forms
//!
//! | Type | Written as | Read from |
//! |------|------------|-----------|
//! | `bool` | `1` / `0` | `True`, `true`, `1` are true; anything else is false |
//! | integers | decimal | optional sign and decimal digits, nothing else |
//! | floats | shortest round-trip decimal | anything [`str::parse`] accepts |
//! | `BigInt` | decimal | like integers, unbounded |
//! | `DateTime<Utc>` | RFC 3339 | RFC 3339 with any offset |
//! | strings | as-is | as-is |
//!
//! ## Examples
//!
//! ```rust
//! use dashdb::{FromDashValue, ToDashValue};
//!
//! assert_eq!(true.to_dash_value(), "1");
//! assert_eq!(42u8.to_dash_value(), "42");
//!
//! assert_eq!(i64::from_dash_value("-7"), Ok(-7));
//! assert!(bool::from_dash_value("True").unwrap());
//! assert!(!bool::from_dash_value("yes").unwrap());
//! ```

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use thiserror::Error;

/// Strings that read as `true`.
pub const TRUE_TOKENS: [&str; 3] = ["True", "true", "1"];

/// Returns `true` iff `raw` is one of [`TRUE_TOKENS`].
#[inline]
#[must_use]
pub fn is_true(raw: &str) -> bool {
    TRUE_TOKENS.contains(&raw)
}

/// Why a raw value could not be read as the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("empty value where an integer was expected")]
    EmptyInteger,

    #[error("malformed integer: {0}")]
    MalformedInteger(String),

    #[error("expected {expected}: {msg}")]
    Malformed { expected: &'static str, msg: String },
}

/// A value that can be stored in a dash file.
pub trait ToDashValue {
    /// Renders the value as the text stored after the `=`.
    fn to_dash_value(&self) -> String;
}

/// A value that can be read from a dash file.
pub trait FromDashValue: Sized {
    /// Interprets the text stored after the `=`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValueError`] when `raw` is not a valid rendering of `Self`.
    fn from_dash_value(raw: &str) -> Result<Self, ValueError>;
}

impl<T: ToDashValue + ?Sized> ToDashValue for &T {
    fn to_dash_value(&self) -> String {
        (**self).to_dash_value()
    }
}

impl ToDashValue for str {
    fn to_dash_value(&self) -> String {
        self.to_string()
    }
}

impl ToDashValue for String {
    fn to_dash_value(&self) -> String {
        self.clone()
    }
}

impl ToDashValue for char {
    fn to_dash_value(&self) -> String {
        self.to_string()
    }
}

impl ToDashValue for bool {
    fn to_dash_value(&self) -> String {
        let token = if *self { "1" } else { "0" };
        token.to_string()
    }
}

impl ToDashValue for BigInt {
    fn to_dash_value(&self) -> String {
        self.to_str_radix(10)
    }
}

impl ToDashValue for DateTime<Utc> {
    fn to_dash_value(&self) -> String {
        self.to_rfc3339()
    }
}

macro_rules! numeric_to_dash {
    ($($ty:ty),*) => {
        $(
            impl ToDashValue for $ty {
                fn to_dash_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_to_dash!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl FromDashValue for String {
    fn from_dash_value(raw: &str) -> Result<Self, ValueError> {
        Ok(raw.to_string())
    }
}

impl FromDashValue for bool {
    fn from_dash_value(raw: &str) -> Result<Self, ValueError> {
        Ok(is_true(raw))
    }
}

impl FromDashValue for char {
    fn from_dash_value(raw: &str) -> Result<Self, ValueError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ValueError::Malformed {
                expected: "a single character",
                msg: format!("found {} characters", raw.chars().count()),
            }),
        }
    }
}

impl FromDashValue for BigInt {
    fn from_dash_value(raw: &str) -> Result<Self, ValueError> {
        if raw.is_empty() {
            return Err(ValueError::EmptyInteger);
        }
        raw.parse()
            .map_err(|e: num_bigint::ParseBigIntError| ValueError::MalformedInteger(e.to_string()))
    }
}

impl FromDashValue for DateTime<Utc> {
    fn from_dash_value(raw: &str) -> Result<Self, ValueError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ValueError::Malformed {
                expected: "an RFC 3339 timestamp",
                msg: e.to_string(),
            })
    }
}

macro_rules! integer_from_dash {
    ($($ty:ty),*) => {
        $(
            impl FromDashValue for $ty {
                fn from_dash_value(raw: &str) -> Result<Self, ValueError> {
                    if raw.is_empty() {
                        return Err(ValueError::EmptyInteger);
                    }
                    raw.parse()
                        .map_err(|e: std::num::ParseIntError| ValueError::MalformedInteger(e.to_string()))
                }
            }
        )*
    };
}

integer_from_dash!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_from_dash {
    ($($ty:ty),*) => {
        $(
            impl FromDashValue for $ty {
                fn from_dash_value(raw: &str) -> Result<Self, ValueError> {
                    raw.parse().map_err(|e: std::num::ParseFloatError| ValueError::Malformed {
                        expected: "a float",
                        msg: e.to_string(),
                    })
                }
            }
        )*
    };
}

float_from_dash!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_bool_tokens() {
        for raw in ["True", "true", "1"] {
            assert!(bool::from_dash_value(raw).unwrap(), "{raw}");
        }
        for raw in ["", "0", "TRUE", "yes", " true", "false"] {
            assert!(!bool::from_dash_value(raw).unwrap(), "{raw}");
        }
        assert_eq!(false.to_dash_value(), "0");
    }

    #[test]
    fn test_integer_failures_are_distinct() {
        assert_eq!(i64::from_dash_value(""), Err(ValueError::EmptyInteger));
        assert!(matches!(
            i64::from_dash_value("12abc"),
            Err(ValueError::MalformedInteger(_))
        ));
        assert!(matches!(
            i64::from_dash_value(" 12"),
            Err(ValueError::MalformedInteger(_))
        ));
        assert!(matches!(
            u8::from_dash_value("300"),
            Err(ValueError::MalformedInteger(_))
        ));
        assert_eq!(i64::from_dash_value("+12"), Ok(12));
    }

    #[test]
    fn test_floats() {
        assert_eq!(f64::from_dash_value("1.5"), Ok(1.5));
        assert_eq!(f64::from_dash_value("32"), Ok(32.0));
        assert_eq!(1.5f64.to_dash_value(), "1.5");
        assert!(matches!(
            f64::from_dash_value(""),
            Err(ValueError::Malformed { expected: "a float", .. })
        ));
    }

    #[test]
    fn test_bigint() {
        let big: BigInt = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(big.to_dash_value(), "123456789012345678901234567890");
        assert_eq!(BigInt::from_dash_value(&big.to_dash_value()), Ok(big));
        assert_eq!(BigInt::from_dash_value(""), Err(ValueError::EmptyInteger));
    }

    #[test]
    fn test_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let raw = dt.to_dash_value();
        assert_eq!(DateTime::<Utc>::from_dash_value(&raw), Ok(dt));
        assert_eq!(
            DateTime::<Utc>::from_dash_value("2024-01-15T12:30:00+02:00"),
            Ok(dt)
        );
        assert!(DateTime::<Utc>::from_dash_value("yesterday").is_err());
    }

    #[test]
    fn test_char() {
        assert_eq!(char::from_dash_value("x"), Ok('x'));
        assert!(char::from_dash_value("xy").is_err());
        assert!(char::from_dash_value("").is_err());
    }
}
