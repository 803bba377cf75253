//! View configuration.
//!
//! A [`ViewConfig`] is the caller-owned description of a table view: which
//! columns are visible, how rows are grouped, and the initial sort and filter
//! state. The pipeline takes its starting state from it and reacts when the
//! caller hands it a changed one.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::Filter;
use crate::page::DEFAULT_PAGE_SIZE;
use crate::sort::SortKey;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Declarative description of a table view.
///
/// # Example
///
/// ```
/// use tabula::{ViewConfig, SortKey};
///
/// let view = ViewConfig::from_json(r#"{
///     "groupBy": ["department"],
///     "sort": [{"field": "name"}],
///     "filters": [{"field": "salary", "op": "gte", "value": "50000"}],
///     "pageSize": 20
/// }"#).unwrap();
///
/// assert_eq!(view.group_by, vec!["department"]);
/// assert_eq!(view.sort, vec![SortKey::asc("name")]);
/// assert_eq!(view.page_size, 20);
/// assert!(view.visible_columns.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewConfig {
    /// Accessors of the visible columns, in display order. Empty means all.
    #[serde(default)]
    pub visible_columns: Vec<String>,
    /// Grouping fields, outermost first.
    #[serde(default)]
    pub group_by: Vec<String>,
    /// Initial sort keys.
    #[serde(default)]
    pub sort: Vec<SortKey>,
    /// Initial filters.
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            visible_columns: Vec::new(),
            group_by: Vec::new(),
            sort: Vec::new(),
            filters: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewConfig {
    pub fn new() -> Self {
        ViewConfig::default()
    }

    /// Parses a view configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the visible columns.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.visible_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the grouping fields.
    pub fn group_by<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append an initial sort key.
    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    /// Append an initial filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}
