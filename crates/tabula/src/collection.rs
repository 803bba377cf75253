//! Collection value normalization.
//!
//! A collection field may be stored as a single scalar id, a list of ids, or
//! nothing at all. [`normalize`] turns all of these into a [`TagSet`]: an
//! insertion-ordered set of string identifiers.

use std::borrow::Cow;

use crate::value::Value;

/// Separator between identifiers in `containsAny`/`containsAll` operands.
pub const OPERAND_DELIMITER: char = ',';

/// Insertion-ordered set of tag identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet<'a> {
    tags: Vec<Cow<'a, str>>,
}

impl<'a> TagSet<'a> {
    pub fn new() -> Self {
        TagSet::default()
    }

    /// Adds a tag, ignoring it when already present.
    pub fn insert(&mut self, tag: Cow<'a, str>) {
        if !self.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// First tag in insertion order.
    pub fn first(&self) -> Option<&str> {
        self.tags.first().map(|t| t.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.as_ref())
    }

    /// Returns `true` if any tag of `other` is in this set.
    pub fn intersects(&self, other: &TagSet<'_>) -> bool {
        other.iter().any(|t| self.contains(t))
    }

    /// Returns `true` if every tag of `other` is in this set.
    pub fn is_superset(&self, other: &TagSet<'_>) -> bool {
        other.iter().all(|t| self.contains(t))
    }
}

impl<'a> FromIterator<Cow<'a, str>> for TagSet<'a> {
    fn from_iter<I: IntoIterator<Item = Cow<'a, str>>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

/// Normalizes a stored collection value into a tag set.
///
/// - `Null`/`Missing` → empty set
/// - a scalar → one-element set holding its string form
/// - a list → each element's string form, in order, duplicates dropped
///
/// ```
/// use tabula::{normalize, Value, Number};
///
/// let tags = normalize(&Value::List(vec![
///     Value::String("x"),
///     Value::Number(Number::I64(2)),
///     Value::String("x"),
/// ]));
/// assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["x", "2"]);
/// assert!(normalize(&Value::Null).is_empty());
/// ```
pub fn normalize<'a>(value: &Value<'a>) -> TagSet<'a> {
    match value {
        Value::Null | Value::Missing => TagSet::new(),
        Value::List(items) => items
            .iter()
            .filter(|v| !v.is_absent())
            .map(|v| v.to_text())
            .collect(),
        scalar => std::iter::once(scalar.to_text()).collect(),
    }
}

/// Splits a delimiter-separated operand into a tag set, trimming entries and
/// discarding empty ones.
pub fn parse_operand_list(operand: &str) -> TagSet<'_> {
    operand
        .split(OPERAND_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Cow::Borrowed)
        .collect()
}
