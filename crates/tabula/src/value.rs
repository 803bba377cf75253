//! Runtime value types for field access.
//!
//! The [`Value`] enum represents the runtime value of a field extracted from a
//! record. Predicates, comparators and the group stage all read rows through it,
//! so its canonical string form ([`Value::to_text`]) is what grouping labels and
//! string filters see.

use std::borrow::Cow;
use std::cmp::Ordering;

/// Runtime value of a field, borrowed from the source record.
///
/// # Example
///
/// ```
/// use tabula::{Value, Number};
///
/// struct Employee {
///     name: String,
///     salary: f64,
///     skills: Vec<String>,
/// }
///
/// fn accessor<'a>(e: &'a Employee, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&e.name),
///         "salary" => Value::Number(Number::F64(e.salary)),
///         "skills" => Value::List(e.skills.iter().map(|s| Value::String(s)).collect()),
///         _ => Value::Missing,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Several values stored in one field (collection columns).
    List(Vec<Value<'a>>),
    /// Field present but explicitly null.
    Null,
    /// Field not present on the record.
    Missing,
}

impl<'a> Value<'a> {
    /// Returns `true` for `Null` and `Missing`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null | Value::Missing)
    }

    /// Returns `true` if the value counts as empty for the `isEmpty` operator:
    /// absent, an empty string, or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null | Value::Missing => true,
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(*s),
            _ => None,
        }
    }

    /// Extracts the boolean value. Strings `"true"`/`"false"` are accepted
    /// case-insensitively.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::String(s) => parse_bool(s),
            _ => None,
        }
    }

    /// Coerces the value to a float: numbers directly, strings by parsing.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.to_f64()),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Canonical string form.
    ///
    /// `Null` becomes `"null"` and `Missing` becomes `"undefined"`; lists are
    /// joined with `,`.
    pub fn to_text(&self) -> Cow<'a, str> {
        match self {
            Value::String(s) => Cow::Borrowed(*s),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Timestamp(t) => Cow::Owned(t.as_millis().to_string()),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::List(items) => Cow::Owned(
                items
                    .iter()
                    .map(|v| v.to_text())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            Value::Null => Cow::Borrowed("null"),
            Value::Missing => Cow::Borrowed("undefined"),
        }
    }

    /// String form used by string filters and the default comparator, where
    /// absent values read as the empty string.
    pub fn to_text_or_empty(&self) -> Cow<'a, str> {
        if self.is_absent() {
            Cow::Borrowed("")
        } else {
            self.to_text()
        }
    }
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision;
/// comparisons between different variants go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{}", n),
            Number::U64(n) => write!(f, "{}", n),
            // f64's Display already prints 3.0 as "3"
            Number::F64(n) => write!(f, "{}", n),
        }
    }
}

macro_rules! number_from {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::$variant(n.into())
                }
            }
        )*
    };
}

number_from!(I64: i8, i16, i32, i64);
number_from!(U64: u8, u16, u32, u64);
number_from!(F64: f32, f64);

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<isize> for Number {
    fn from(n: isize) -> Self {
        Number::I64(n as i64)
    }
}

/// Timestamp value represented as milliseconds since Unix epoch (UTC).
///
/// ```
/// use tabula::Timestamp;
///
/// let ts = Timestamp::from_secs(1_706_500_000);
/// assert_eq!(ts.as_millis(), 1_706_500_000_000);
/// assert!(Timestamp(1000) < Timestamp(2000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch, saturating at
    /// the bounds of `i64` milliseconds.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}
