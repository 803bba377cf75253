//! Filter entries and the filter stage.
//!
//! A [`Filter`] is one predicate bound to a field. A [`FilterSet`] holds at
//! most one filter per field; rows must satisfy every filter in the set.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::column::{ColumnCatalog, DataType};
use crate::error::Result;
use crate::op::Op;
use crate::predicate::{matches, try_matches};
use crate::value::Value;

/// A single filter entry.
///
/// # Example
///
/// ```
/// use tabula::{Filter, Op, DataType, Value};
///
/// let filter = Filter::new("name", Op::StartsWith, "ad");
/// assert!(filter.matches(DataType::String, &Value::String("Ada")));
///
/// let range = Filter::range("age", Op::Between, "30", "40");
/// assert_eq!(range.second_value.as_deref(), Some("40"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// The field accessor to test.
    pub field: String,
    /// The comparison operator.
    pub op: Op,
    /// Primary operand, as entered.
    #[serde(default)]
    pub value: String,
    /// Upper bound for range operators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_value: Option<String>,
}

impl Filter {
    /// Creates a single-operand filter.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<String>) -> Self {
        Filter {
            field: field.into(),
            op,
            value: value.into(),
            second_value: None,
        }
    }

    /// Creates a two-operand filter for `Between` or `DateRange`.
    pub fn range(
        field: impl Into<String>,
        op: Op,
        value: impl Into<String>,
        second_value: impl Into<String>,
    ) -> Self {
        Filter {
            field: field.into(),
            op,
            value: value.into(),
            second_value: Some(second_value.into()),
        }
    }

    /// Evaluates this filter against a field value (fail-open).
    pub fn matches(&self, data_type: DataType, field_value: &Value<'_>) -> bool {
        matches(
            data_type,
            self.op,
            field_value,
            &self.value,
            self.second_value.as_deref(),
        )
    }

    /// Checks the operator and operands for a column type without a row.
    ///
    /// The operands are validated against an empty value, which no operator
    /// family treats as a configuration error.
    pub fn validate(&self, data_type: DataType) -> Result<()> {
        try_matches(
            data_type,
            self.op,
            &Value::Null,
            &self.value,
            self.second_value.as_deref(),
        )
        .map(|_| ())
    }
}

/// Ordered set of filters, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Filter>", into = "Vec<Filter>")]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        FilterSet::default()
    }

    /// Inserts a filter, replacing (in place) any existing one for its field.
    pub fn set(&mut self, filter: Filter) {
        match self.filters.iter_mut().find(|f| f.field == filter.field) {
            Some(existing) => *existing = filter,
            None => self.filters.push(filter),
        }
    }

    /// Removes the filter for a field, returning it.
    pub fn remove(&mut self, field: &str) -> Option<Filter> {
        let pos = self.filters.iter().position(|f| f.field == field)?;
        Some(self.filters.remove(pos))
    }

    pub fn get(&self, field: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.field == field)
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns `true` if the item satisfies every filter.
    pub fn matches<T, F>(&self, item: &T, catalog: &ColumnCatalog, accessor: F) -> bool
    where
        for<'a> F: Fn(&'a T, &str) -> Value<'a>,
    {
        self.filters.iter().all(|filter| {
            filter.matches(
                catalog.data_type(&filter.field),
                &accessor(item, &filter.field),
            )
        })
    }
}

impl From<Vec<Filter>> for FilterSet {
    /// Later entries for a field replace earlier ones.
    fn from(filters: Vec<Filter>) -> Self {
        let mut set = FilterSet::new();
        for filter in filters {
            set.set(filter);
        }
        set
    }
}

impl From<FilterSet> for Vec<Filter> {
    fn from(set: FilterSet) -> Self {
        set.filters
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

/// Filter stage: keeps the rows satisfying every filter, in upstream order.
pub fn apply_filters<'a, T, F>(
    rows: impl IntoIterator<Item = &'a T>,
    filters: &FilterSet,
    catalog: &ColumnCatalog,
    accessor: F,
) -> Vec<&'a T>
where
    T: 'a,
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    let rows = rows.into_iter();
    if filters.is_empty() {
        return rows.collect();
    }

    let kept: Vec<&'a T> = rows
        .filter(|row| filters.matches(*row, catalog, &accessor))
        .collect();
    trace!(target: "tabula::filter", filters = filters.len(), kept = kept.len(), "applied filters");
    kept
}
