//! Tabula - Presentation engine for tabular data.
//!
//! Tabula turns a set of rows and a view description into what a table
//! shows. It supports:
//!
//! - Typed columns: strings, numbers, currency, dates, datetimes, booleans,
//!   and tag collections
//! - Per-column filters with type-specific operators that fail open on
//!   malformed input
//! - Stable multi-key sorting with header-click toggle rules
//! - Nested grouping with collapsible group headers
//! - Pagination over the grouped display sequence
//!
//! # Quick Start
//!
//! ```rust
//! use tabula::{ColumnCatalog, ColumnDef, DataType, Number, Op, Pipeline, Record, Value, ViewConfig};
//!
//! struct Task {
//!     name: String,
//!     team: String,
//!     priority: i64,
//! }
//!
//! impl Record for Task {
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::String(&self.name),
//!             "team" => Value::String(&self.team),
//!             "priority" => Value::Number(Number::I64(self.priority)),
//!             _ => Value::Missing,
//!         }
//!     }
//! }
//!
//! let catalog = ColumnCatalog::new(vec![
//!     ColumnDef::new("name", DataType::String),
//!     ColumnDef::new("team", DataType::String),
//!     ColumnDef::new("priority", DataType::Number),
//! ]).unwrap();
//!
//! let tasks = vec![
//!     Task { name: "Write docs".into(), team: "core".into(), priority: 3 },
//!     Task { name: "Fix bug".into(), team: "core".into(), priority: 5 },
//!     Task { name: "Old task".into(), team: "ops".into(), priority: 1 },
//! ];
//!
//! let view = ViewConfig::new().group_by(["team"]);
//! let mut pipeline = Pipeline::new(catalog, view, tasks);
//! pipeline.set_filter("priority", Op::Gte, "3", None);
//!
//! // one "core" header followed by its two rows
//! let page = pipeline.page_rows();
//! assert_eq!(page.len(), 3);
//! assert_eq!(page[0].as_group().map(|g| g.count), Some(2));
//! assert_eq!(pipeline.summary().total_items, 3);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! rows → filter → sort → group → paginate
//! ```
//!
//! - **Filter**: a row is kept iff every active filter admits it. A filter
//!   whose operand cannot be interpreted admits every row.
//! - **Sort**: keys are applied in precedence order; ties keep input order.
//! - **Group**: each grouping field partitions the rows; group values are
//!   ordered byte-wise and each group is emitted as a header followed by its
//!   contents, unless collapsed.
//! - **Paginate**: pages window the display sequence, headers included.
//!
//! Each stage is also available as a free function ([`apply_filters`],
//! [`sort_rows`], [`group_rows`], [`page_window`]) taking an accessor of the
//! form `Fn(&T, &str) -> Value`.
//!
//! # Data Types and Operators
//!
//! | Type | Operators |
//! |------|-----------|
//! | String | `contains`, `doesNotContain`, `equals`, `startsWith`, `endsWith` |
//! | Number, Currency | `eq`, `neq`, `gt`, `lt`, `gte`, `lte`, `between` |
//! | Date, Datetime | `is`, `isNot`, `isBefore`, `isAfter`, `dateRange` |
//! | Boolean | any operator except `between` and `dateRange` |
//! | Collection | `contains`, `doesNotContain`, `containsAny`, `containsAll` |
//!
//! `isEmpty` applies to every type. Boolean filters compare the field to a
//! `"true"`/`"false"` operand; `isNot`, `neq` and `doesNotContain` invert the
//! comparison.

mod collection;
mod column;
mod compare;
mod error;
mod filter;
mod group;
mod op;
mod page;
mod pipeline;
mod predicate;
mod record;
mod sort;
mod temporal;
mod value;
mod view;

// Re-export public API
pub use collection::{normalize, parse_operand_list, TagSet, OPERAND_DELIMITER};
pub use column::{CollectionOptions, ColumnCatalog, ColumnDef, DataType, Selection, TagOption};
pub use compare::{compare, compare_text};
pub use error::{Result, TabulaError};
pub use filter::{apply_filters, Filter, FilterSet};
pub use group::{group_paths, group_rows, path_segment, DisplayRow, GroupHeader, PATH_SEPARATOR};
pub use op::Op;
pub use page::{page_bounds, page_window, total_pages, PageSummary, DEFAULT_PAGE_SIZE};
pub use pipeline::Pipeline;
pub use predicate::{matches, try_matches};
pub use record::{Record, ToValue};
pub use sort::{compare_by_keys, sort_direction, sort_index, sort_rows, toggle_sort, Dir, SortKey};
pub use temporal::parse_instant;
pub use value::{Number, Timestamp, Value};
pub use view::ViewConfig;
