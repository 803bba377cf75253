//! Proc macros for Tabula.
//!
//! # Available Macros
//!
//! - [`Record`] - Generate `tabula::Record` accessors and column definitions
//!   from struct field annotations
//!
//! # Examples
//!
//! For working examples, see `tabula/tests/derive.rs`.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for table rows.
///
/// Every field annotated with a column type becomes a column. Fields without
/// a `#[column(...)]` type are left out, as are fields marked `skip`. Field
/// values are converted through `tabula::ToValue`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | Text column |
/// | `Number` | Numeric column |
/// | `Currency` | Numeric column displayed as money |
/// | `Date` | Date column, compared by calendar day |
/// | `Datetime` | Date-time column |
/// | `Boolean` (or `Bool`) | Boolean column |
/// | `Collection` | Tag list column (`Vec<String>`, `Vec<&str>`) |
/// | `ty = "..."` | Column type as a string literal |
/// | `skip` | Exclude this field |
/// | `rename = "..."` | Use a custom accessor name |
/// | `header = "..."` | Display header |
/// | `no_sort`, `sortable = false` | Mark the column as not sortable |
/// | `no_filter`, `filterable = false` | Mark the column as not filterable |
///
/// # Generated Code
///
/// The macro generates:
///
/// 1. Accessor constants (e.g., `Employee::NAME`, `Employee::HIRE_DATE`)
/// 2. `columns()`, returning the `ColumnDef` list in field order
/// 3. Implementation of `Record::field_value()`
///
/// # Example
///
/// ```ignore
/// use tabula::{ColumnCatalog, Pipeline, ViewConfig};
/// use tabula_macros::Record;
///
/// #[derive(Record)]
/// struct Employee {
///     #[column(String, header = "Name")]
///     name: String,
///
///     #[column(Currency)]
///     salary: f64,
///
///     #[column(Collection, no_sort)]
///     skills: Vec<String>,
///
///     #[column(skip)]
///     internal_id: u64,
/// }
///
/// let catalog = ColumnCatalog::new(Employee::columns())?;
/// let mut pipeline = Pipeline::new(catalog, ViewConfig::new(), employees);
/// pipeline.set_filter(Employee::SKILLS, tabula::Op::ContainsAny, "rust,go", None);
/// ```
///
/// # Compile-Time Errors
///
/// - Unknown column types
/// - Two fields mapping to the same accessor
/// - Tuple structs, unit structs and enums
#[proc_macro_derive(Record, attributes(column))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
