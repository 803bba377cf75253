//! Pipeline coordinator.
//!
//! A [`Pipeline`] owns the rows, the column catalog and the view state
//! (filters, sort keys, grouping, collapsed groups, page). Every output is
//! recomputed from that state on request, running the stages in order:
//!
//! ```text
//! rows → filter → sort → group → paginate
//! ```
//!
//! Mutators document their resets as post-conditions:
//!
//! | Mutator | Page → 1 | Collapsed groups cleared |
//! |---------|----------|--------------------------|
//! | `set_filter`, `remove_filter`, `clear_filters` | yes | no |
//! | `set_sort`, `clear_sort` | yes | no |
//! | `set_group_by` (when changed) | yes | yes |
//! | `toggle_group`, `expand_all_groups`, `collapse_all_groups` | yes | n/a |
//! | `set_page_size` | yes | no |
//! | `set_rows`, `set_page` | no | no |

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::column::{ColumnCatalog, ColumnDef};
use crate::filter::{apply_filters, Filter, FilterSet};
use crate::group::{group_paths, group_rows, DisplayRow};
use crate::op::Op;
use crate::page::{page_bounds, total_pages, PageSummary};
use crate::record::Record;
use crate::sort::{self, sort_rows, toggle_sort, Dir, SortKey};
use crate::view::ViewConfig;

/// Filter → sort → group → paginate over an owned row set.
///
/// # Example
///
/// ```
/// use tabula::{ColumnCatalog, ColumnDef, DataType, Number, Op, Pipeline, Record, Value, ViewConfig};
///
/// struct Task {
///     title: &'static str,
///     points: i64,
/// }
///
/// impl Record for Task {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "title" => Value::String(self.title),
///             "points" => Value::Number(Number::I64(self.points)),
///             _ => Value::Missing,
///         }
///     }
/// }
///
/// let catalog = ColumnCatalog::new(vec![
///     ColumnDef::new("title", DataType::String),
///     ColumnDef::new("points", DataType::Number),
/// ]).unwrap();
///
/// let rows = vec![
///     Task { title: "Write docs", points: 3 },
///     Task { title: "Fix bug", points: 5 },
///     Task { title: "Triage", points: 1 },
/// ];
///
/// let mut pipeline = Pipeline::new(catalog, ViewConfig::new().page_size(2), rows);
/// pipeline.set_filter("points", Op::Gte, "3", None);
/// pipeline.set_sort("points", false);
/// pipeline.set_sort("points", false); // second click: descending
///
/// let titles: Vec<_> = pipeline.processed_rows().iter().map(|t| t.title).collect();
/// assert_eq!(titles, vec!["Fix bug", "Write docs"]);
/// assert_eq!(pipeline.summary().total_pages, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<T> {
    catalog: ColumnCatalog,
    view: ViewConfig,
    rows: Vec<T>,
    filters: FilterSet,
    sort: Vec<SortKey>,
    group_by: Vec<String>,
    collapsed: HashSet<String>,
    page: usize,
    page_size: usize,
}

impl<T: Record> Pipeline<T> {
    /// Creates a pipeline whose state starts from the view's initial values.
    pub fn new(catalog: ColumnCatalog, view: ViewConfig, rows: Vec<T>) -> Self {
        Pipeline {
            filters: FilterSet::from(view.filters.clone()),
            sort: dedup_keys(view.sort.clone()),
            group_by: view.group_by.clone(),
            collapsed: HashSet::new(),
            page: 1,
            page_size: view.page_size.max(1),
            catalog,
            view,
            rows,
        }
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    /// Replaces the row set. View state (filters, sort, groups, page) is kept.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        trace!(target: "tabula::pipeline", rows = rows.len(), "rows replaced");
        self.rows = rows;
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn catalog(&self) -> &ColumnCatalog {
        &self.catalog
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    /// Applies a caller-supplied view.
    ///
    /// Only what changed relative to the previous view is reset: a different
    /// initial sort list replaces the current sort, different initial filters
    /// replace the current filters, a different grouping list resets page and
    /// collapsed groups, a different page size resets the page.
    pub fn apply_view(&mut self, view: ViewConfig) {
        if view.sort != self.view.sort {
            debug!(target: "tabula::pipeline", keys = view.sort.len(), "initial sort changed");
            self.sort = dedup_keys(view.sort.clone());
            self.page = 1;
        }
        if view.filters != self.view.filters {
            debug!(target: "tabula::pipeline", filters = view.filters.len(), "initial filters changed");
            self.filters = FilterSet::from(view.filters.clone());
            self.page = 1;
        }
        if view.group_by != self.view.group_by {
            self.set_group_by(view.group_by.clone());
        }
        if view.page_size != self.view.page_size {
            self.set_page_size(view.page_size);
        }
        self.view = view;
    }

    /// Catalog columns listed in the view, in view order; all columns when the
    /// view lists none. Unknown accessors are skipped.
    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        if self.view.visible_columns.is_empty() {
            return self.catalog.iter().collect();
        }
        self.view
            .visible_columns
            .iter()
            .filter_map(|accessor| self.catalog.get(accessor))
            .collect()
    }

    // ========================================================================
    // Filters
    // ========================================================================

    /// Records, replaces or removes the filter for `field`.
    ///
    /// The entry is removed when `value` is blank and `op` is neither
    /// `IsEmpty` nor a range operator, or when `op` is a range operator and
    /// both values are blank. Operands are not validated: a malformed filter
    /// is kept and admits every row. Columns marked non-filterable are
    /// ignored. Resets the page to 1.
    pub fn set_filter(&mut self, field: &str, op: Op, value: &str, second: Option<&str>) {
        if self.catalog.get(field).is_some_and(|c| !c.filterable) {
            debug!(target: "tabula::pipeline", field, "column is not filterable");
            return;
        }
        self.page = 1;

        let value_blank = value.trim().is_empty();
        let second_blank = second.is_none_or(|s| s.trim().is_empty());
        let remove = match op {
            Op::IsEmpty => false,
            op if op.is_range() => value_blank && second_blank,
            _ => value_blank,
        };
        if remove {
            debug!(target: "tabula::pipeline", field, %op, "filter cleared");
            self.filters.remove(field);
            return;
        }

        let filter = Filter {
            field: field.to_string(),
            op,
            value: value.to_string(),
            second_value: second.map(str::to_string),
        };
        let data_type = self.catalog.data_type(field);
        if let Err(err) = filter.validate(data_type) {
            warn!(target: "tabula::pipeline", field, %op, %err, "filter does not apply and admits every row");
        }
        debug!(target: "tabula::pipeline", field, %op, value, "filter set");
        self.filters.set(filter);
    }

    /// Removes the filter for `field`, resetting the page to 1.
    pub fn remove_filter(&mut self, field: &str) -> Option<Filter> {
        self.page = 1;
        self.filters.remove(field)
    }

    /// Removes every filter, resetting the page to 1.
    pub fn clear_filters(&mut self) {
        debug!(target: "tabula::pipeline", "filters cleared");
        self.filters.clear();
        self.page = 1;
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    // ========================================================================
    // Sort
    // ========================================================================

    /// Header-click sort toggle; see [`toggle_sort`]. Columns marked
    /// non-sortable are ignored. Resets the page to 1.
    pub fn set_sort(&mut self, field: &str, multi: bool) {
        if self.catalog.get(field).is_some_and(|c| !c.sortable) {
            debug!(target: "tabula::pipeline", field, "column is not sortable");
            return;
        }
        toggle_sort(&mut self.sort, field, multi);
        self.page = 1;
        debug!(target: "tabula::pipeline", field, multi, keys = self.sort.len(), "sort changed");
    }

    /// Removes every sort key, resetting the page to 1.
    pub fn clear_sort(&mut self) {
        self.sort.clear();
        self.page = 1;
    }

    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort
    }

    /// Current direction of `field`, if it is sorted.
    pub fn sort_direction(&self, field: &str) -> Option<Dir> {
        sort::sort_direction(&self.sort, field)
    }

    /// 1-based precedence of `field` among the sort keys, if it is sorted.
    pub fn sort_index(&self, field: &str) -> Option<usize> {
        sort::sort_index(&self.sort, field)
    }

    // ========================================================================
    // Grouping
    // ========================================================================

    /// Replaces the grouping fields. When they differ from the current ones
    /// the page resets to 1 and every group is expanded.
    pub fn set_group_by(&mut self, fields: Vec<String>) {
        if fields == self.group_by {
            return;
        }
        debug!(target: "tabula::pipeline", ?fields, "grouping changed");
        self.group_by = fields;
        self.collapsed.clear();
        self.page = 1;
    }

    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    /// Collapses an expanded group or expands a collapsed one. Resets the page
    /// to 1.
    pub fn toggle_group(&mut self, path: &str) {
        if !self.collapsed.remove(path) {
            self.collapsed.insert(path.to_string());
        }
        self.page = 1;
        debug!(target: "tabula::pipeline", path, collapsed = self.collapsed.contains(path), "group toggled");
    }

    /// Expands every group. Resets the page to 1.
    pub fn expand_all_groups(&mut self) {
        self.collapsed.clear();
        self.page = 1;
    }

    /// Collapses every group of the current group tree. Resets the page to 1.
    pub fn collapse_all_groups(&mut self) {
        self.collapsed = group_paths(self.processed_rows(), &self.group_by, T::accessor)
            .into_iter()
            .collect();
        self.page = 1;
    }

    pub fn is_collapsed(&self, path: &str) -> bool {
        self.collapsed.contains(path)
    }

    pub fn collapsed_groups(&self) -> &HashSet<String> {
        &self.collapsed
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Moves to a 1-based page. Out-of-range pages are allowed and show an
    /// empty window.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changes the page size (at least 1) and resets the page to 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Advances one page, staying on the last page.
    pub fn next_page(&mut self) {
        let last = self.summary().total_pages.max(1);
        self.page = (self.page + 1).min(last);
    }

    /// Goes back one page, staying on the first page.
    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // ========================================================================
    // Outputs
    // ========================================================================

    /// Filtered and sorted rows, ungrouped and unpaginated (for export).
    pub fn processed_rows(&self) -> Vec<&T> {
        let filtered = apply_filters(&self.rows, &self.filters, &self.catalog, T::accessor);
        sort_rows(filtered, &self.sort, &self.catalog, T::accessor)
    }

    /// The full display sequence: processed rows grouped, before pagination.
    pub fn display_rows(&self) -> Vec<DisplayRow<'_, T>> {
        group_rows(
            self.processed_rows(),
            &self.group_by,
            &self.collapsed,
            T::accessor,
        )
    }

    /// The window of the display sequence on the current page.
    pub fn page_rows(&self) -> Vec<DisplayRow<'_, T>> {
        let seq = self.display_rows();
        let bounds = page_bounds(seq.len(), self.page, self.page_size);
        trace!(
            target: "tabula::pipeline",
            total = seq.len(),
            start = bounds.start,
            end = bounds.end,
            "page window"
        );
        seq.into_iter()
            .skip(bounds.start)
            .take(bounds.len())
            .collect()
    }

    /// Current page, page size, display sequence length and page count.
    pub fn summary(&self) -> PageSummary {
        let total_items = self.display_rows().len();
        PageSummary {
            page: self.page,
            page_size: self.page_size,
            total_items,
            total_pages: total_pages(total_items, self.page_size),
        }
    }
}

/// Keeps the first key for each field.
fn dedup_keys(keys: Vec<SortKey>) -> Vec<SortKey> {
    let mut seen = HashSet::new();
    keys.into_iter()
        .filter(|k| seen.insert(k.field.clone()))
        .collect()
}
