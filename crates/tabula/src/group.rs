//! Group stage: recursive grouping into a display sequence.
//!
//! Rows are partitioned by the text form of each grouping field in turn. Every
//! group node is emitted as a [`GroupHeader`] followed by its contents, so the
//! flattened [`DisplayRow`] sequence interleaves headers and rows in the order
//! a table draws them.
//!
//! Group values are ordered by plain byte-wise string order regardless of the
//! sort configuration; rows inside a group keep their upstream (sorted) order.
//! Null and missing values group under the literal labels `"null"` and
//! `"undefined"`.
//!
//! A group path joins escaped values with [`PATH_SEPARATOR`]: `\` becomes
//! `\\` and `/` becomes `\/`, so a value containing the separator never
//! reads as a nested path.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

use crate::value::Value;

/// Separator between ancestor values in a group path.
pub const PATH_SEPARATOR: &str = "/";

/// Escapes a group value for use as one segment of a group path.
///
/// ```
/// use tabula::path_segment;
///
/// assert_eq!(path_segment("Eng"), "Eng");
/// assert_eq!(path_segment("A/B"), "A\\/B");
/// ```
pub fn path_segment(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '/']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        if ch == '\\' || ch == '/' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

/// Synthetic marker for one node of the group tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupHeader {
    /// Nesting depth, 0 for top-level groups.
    pub level: usize,
    /// Ancestor values and this group's value, each escaped with
    /// [`path_segment`], joined by [`PATH_SEPARATOR`].
    pub path: String,
    /// The grouping field.
    pub field: String,
    /// The group's value.
    pub value: String,
    /// Number of rows beneath this node, at any depth.
    pub count: usize,
}

/// One element of the display sequence.
#[derive(Debug)]
pub enum DisplayRow<'a, T> {
    /// A group header.
    Group(GroupHeader),
    /// A data row.
    Row(&'a T),
}

impl<'a, T> DisplayRow<'a, T> {
    pub fn is_group(&self) -> bool {
        matches!(self, DisplayRow::Group(_))
    }

    pub fn as_group(&self) -> Option<&GroupHeader> {
        match self {
            DisplayRow::Group(header) => Some(header),
            DisplayRow::Row(_) => None,
        }
    }

    pub fn as_row(&self) -> Option<&'a T> {
        match self {
            DisplayRow::Row(row) => Some(*row),
            DisplayRow::Group(_) => None,
        }
    }
}

impl<T> Clone for DisplayRow<'_, T> {
    fn clone(&self) -> Self {
        match self {
            DisplayRow::Group(header) => DisplayRow::Group(header.clone()),
            DisplayRow::Row(row) => DisplayRow::Row(*row),
        }
    }
}

impl<T: PartialEq> PartialEq for DisplayRow<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DisplayRow::Group(a), DisplayRow::Group(b)) => a == b,
            (DisplayRow::Row(a), DisplayRow::Row(b)) => a == b,
            _ => false,
        }
    }
}

/// Builds the display sequence for `rows` grouped by `keys`.
///
/// Groups whose path is in `collapsed` still emit their header, but none of
/// their sub-groups or rows.
///
/// ```
/// use std::collections::HashSet;
/// use tabula::{group_rows, DisplayRow, Value};
///
/// fn dept<'a>(d: &'a &'static str, _field: &str) -> Value<'a> {
///     Value::String(d)
/// }
///
/// let depts = vec!["B", "A", "B"];
/// let display = group_rows(depts.iter().collect(), &["dept".to_string()], &HashSet::new(), dept);
///
/// let headers: Vec<_> = display
///     .iter()
///     .filter_map(|r| r.as_group())
///     .map(|g| (g.value.as_str(), g.count))
///     .collect();
/// assert_eq!(headers, vec![("A", 1), ("B", 2)]);
/// assert_eq!(display.len(), 5);
/// ```
pub fn group_rows<'a, T, F>(
    rows: Vec<&'a T>,
    keys: &[String],
    collapsed: &HashSet<String>,
    accessor: F,
) -> Vec<DisplayRow<'a, T>>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let mut out = Vec::with_capacity(rows.len());
    build(rows, keys, 0, None, collapsed, &accessor, &mut out);
    out
}

fn build<'a, T, F>(
    rows: Vec<&'a T>,
    keys: &[String],
    level: usize,
    parent: Option<&str>,
    collapsed: &HashSet<String>,
    accessor: &F,
    out: &mut Vec<DisplayRow<'a, T>>,
) where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let Some((field, rest)) = keys.split_first() else {
        out.extend(rows.into_iter().map(DisplayRow::Row));
        return;
    };

    // BTreeMap orders group values; each Vec keeps upstream row order.
    let mut groups: BTreeMap<String, Vec<&'a T>> = BTreeMap::new();
    for row in rows {
        let value = accessor(row, field).to_text().into_owned();
        groups.entry(value).or_default().push(row);
    }

    for (value, members) in groups {
        let segment = path_segment(&value);
        let path = match parent {
            Some(parent) => format!("{parent}{PATH_SEPARATOR}{segment}"),
            None => segment.into_owned(),
        };
        let is_collapsed = collapsed.contains(&path);
        out.push(DisplayRow::Group(GroupHeader {
            level,
            path: path.clone(),
            field: field.clone(),
            value,
            count: members.len(),
        }));
        if !is_collapsed {
            build(members, rest, level + 1, Some(path.as_str()), collapsed, accessor, out);
        }
    }
}

/// Paths of every group node for `rows` grouped by `keys`, ignoring collapse
/// state.
pub fn group_paths<'a, T, F>(rows: Vec<&'a T>, keys: &[String], accessor: F) -> Vec<String>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    group_rows(rows, keys, &HashSet::new(), accessor)
        .into_iter()
        .filter_map(|row| match row {
            DisplayRow::Group(header) => Some(header.path),
            DisplayRow::Row(_) => None,
        })
        .collect()
}
