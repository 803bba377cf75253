//! Sort keys and the sort stage.
//!
//! Provides [`Dir`] for sort direction, [`SortKey`] for field-based ordering,
//! and the toggle rules the coordinator applies when a header is clicked.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::column::ColumnCatalog;
use crate::compare::compare;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// The opposite direction.
    pub fn flip(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single sort entry: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortKey {
    /// Creates a new ascending key for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortKey::new(field, Dir::Asc)
    }

    /// Creates a new descending key for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortKey::new(field, Dir::Desc)
    }

    /// Creates a new key with the given direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortKey {
            field: field.into(),
            dir,
        }
    }
}

/// Applies a header toggle to an ordered key list.
///
/// - `multi = false`: the list becomes a single ascending key for `field`,
///   unless `field` already is the sole key, in which case it flips.
/// - `multi = true`: `field` is appended ascending when absent, or flipped in
///   place when present; other keys are untouched.
///
/// ```
/// use tabula::{toggle_sort, SortKey, Dir};
///
/// let mut keys = vec![SortKey::asc("name")];
/// toggle_sort(&mut keys, "name", false);
/// assert_eq!(keys, vec![SortKey::desc("name")]);
///
/// toggle_sort(&mut keys, "age", true);
/// assert_eq!(keys, vec![SortKey::desc("name"), SortKey::asc("age")]);
///
/// toggle_sort(&mut keys, "age", false);
/// assert_eq!(keys, vec![SortKey::asc("age")]);
/// ```
pub fn toggle_sort(keys: &mut Vec<SortKey>, field: &str, multi: bool) {
    if multi {
        match keys.iter_mut().find(|k| k.field == field) {
            Some(key) => key.dir = key.dir.flip(),
            None => keys.push(SortKey::asc(field)),
        }
        return;
    }

    if keys.len() == 1 && keys[0].field == field {
        keys[0].dir = keys[0].dir.flip();
    } else {
        *keys = vec![SortKey::asc(field)];
    }
}

/// Direction of `field` in the key list, if sorted.
pub fn sort_direction(keys: &[SortKey], field: &str) -> Option<Dir> {
    keys.iter().find(|k| k.field == field).map(|k| k.dir)
}

/// 1-based precedence of `field` in the key list, if sorted.
pub fn sort_index(keys: &[SortKey], field: &str) -> Option<usize> {
    keys.iter().position(|k| k.field == field).map(|i| i + 1)
}

/// Compares two items key by key; the first non-equal key decides.
pub fn compare_by_keys<T, F>(
    a: &T,
    b: &T,
    keys: &[SortKey],
    catalog: &ColumnCatalog,
    accessor: &F,
) -> Ordering
where
    for<'a> F: Fn(&'a T, &str) -> Value<'a>,
{
    for key in keys {
        let data_type = catalog.data_type(&key.field);
        let ordering = compare(data_type, &accessor(a, &key.field), &accessor(b, &key.field));
        if ordering != Ordering::Equal {
            return key.dir.apply(ordering);
        }
    }
    Ordering::Equal
}

/// Sort stage: stable multi-key sort. Rows equal under every key keep their
/// upstream order.
pub fn sort_rows<'a, T, F>(
    mut rows: Vec<&'a T>,
    keys: &[SortKey],
    catalog: &ColumnCatalog,
    accessor: F,
) -> Vec<&'a T>
where
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    if keys.is_empty() {
        return rows;
    }
    merge_sort_by(&mut rows, &mut |a: &&T, b: &&T| {
        compare_by_keys(*a, *b, keys, catalog, &accessor)
    });
    trace!(target: "tabula::sort", keys = keys.len(), rows = rows.len(), "sorted rows");
    rows
}

/// Stable merge sort.
///
/// Unreadable values compare equal to everything, so the comparator need not
/// be transitive; `slice::sort_by` may panic on such orders.
fn merge_sort_by<T: Copy>(items: &mut Vec<T>, cmp: &mut impl FnMut(&T, &T) -> Ordering) {
    if items.len() < 2 {
        return;
    }
    let mut right = items.split_off(items.len() / 2);
    merge_sort_by(items, cmp);
    merge_sort_by(&mut right, cmp);

    let left = std::mem::take(items);
    items.reserve(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        // ties take from the left
        if cmp(&right[j], &left[i]) == Ordering::Less {
            items.push(right[j]);
            j += 1;
        } else {
            items.push(left[i]);
            i += 1;
        }
    }
    items.extend_from_slice(&left[i..]);
    items.extend_from_slice(&right[j..]);
}
