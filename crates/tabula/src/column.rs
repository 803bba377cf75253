//! Column descriptors and the column catalog.
//!
//! The catalog tells the engine which [`DataType`] a field carries, and the
//! data type alone decides which predicate and comparator apply to it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::collection::normalize;
use crate::error::{Result, TabulaError};
use crate::value::Value;

/// Semantic data type of a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Free text.
    #[default]
    String,
    /// Plain number.
    Number,
    /// Monetary amount; filtered and sorted like `Number`.
    Currency,
    /// Calendar day; time of day is ignored.
    Date,
    /// Full instant.
    Datetime,
    /// True/false flag.
    Boolean,
    /// Set of tag identifiers (single- or multi-select).
    Collection,
}

impl DataType {
    /// Returns `true` for `Number` and `Currency`.
    pub fn is_numeric(self) -> bool {
        matches!(self, DataType::Number | DataType::Currency)
    }

    /// Returns `true` for `Date` and `Datetime`.
    pub fn is_temporal(self) -> bool {
        matches!(self, DataType::Date | DataType::Datetime)
    }

    /// Returns the display name of this data type.
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::Currency => "currency",
            DataType::Date => "date",
            DataType::Datetime => "datetime",
            DataType::Boolean => "boolean",
            DataType::Collection => "collection",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a collection column holds one tag or many.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// At most one tag.
    Single,
    /// Any number of tags.
    #[default]
    Multi,
}

/// One selectable tag of a collection column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOption {
    /// Identifier stored in the record.
    pub id: String,
    /// Human-readable label.
    pub label: String,
}

impl TagOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        TagOption {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The tag vocabulary of a collection column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOptions {
    #[serde(default)]
    pub selection: Selection,
    #[serde(default)]
    pub options: Vec<TagOption>,
}

impl CollectionOptions {
    /// Multi-select options with the given tags.
    pub fn multi(options: Vec<TagOption>) -> Self {
        CollectionOptions {
            selection: Selection::Multi,
            options,
        }
    }

    /// Single-select options with the given tags.
    pub fn single(options: Vec<TagOption>) -> Self {
        CollectionOptions {
            selection: Selection::Single,
            options,
        }
    }

    /// Looks up the label of a tag id.
    pub fn label_of(&self, id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.label.as_str())
    }
}

fn default_true() -> bool {
    true
}

/// Descriptor of a single column.
///
/// # Example
///
/// ```
/// use tabula::{ColumnDef, DataType};
///
/// let col = ColumnDef::new("salary", DataType::Currency)
///     .header("Salary")
///     .sortable(false);
/// assert_eq!(col.data_type, DataType::Currency);
/// assert!(!col.sortable);
/// assert!(col.filterable);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    /// Field identifier passed to [`Record::field_value`](crate::Record::field_value).
    pub accessor: String,
    /// Optional header title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Semantic data type.
    #[serde(default)]
    pub data_type: DataType,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub filterable: bool,
    /// Tag vocabulary for collection columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<CollectionOptions>,
}

impl ColumnDef {
    /// Creates a sortable, filterable column.
    pub fn new(accessor: impl Into<String>, data_type: DataType) -> Self {
        ColumnDef {
            accessor: accessor.into(),
            header: None,
            data_type,
            sortable: true,
            filterable: true,
            options: None,
        }
    }

    /// Set the header title.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set whether the column can be sorted.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set whether the column can be filtered.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Set the tag vocabulary of a collection column.
    pub fn options(mut self, options: CollectionOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Header title, falling back to the accessor.
    pub fn title(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.accessor)
    }

    /// Checks a stored value against the column's tag vocabulary.
    ///
    /// Only collection columns with declared options are constrained; every
    /// other column accepts any value.
    pub fn validate_value(&self, value: &Value<'_>) -> Result<()> {
        let options = match (&self.data_type, &self.options) {
            (DataType::Collection, Some(options)) => options,
            _ => return Ok(()),
        };

        let tags = normalize(value);
        if options.selection == Selection::Single && tags.len() > 1 {
            return Err(TabulaError::TooManyTags {
                column: self.accessor.clone(),
                count: tags.len(),
            });
        }
        for tag in tags.iter() {
            if options.label_of(tag).is_none() {
                return Err(TabulaError::UnknownTag {
                    column: self.accessor.clone(),
                    tag: tag.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Ordered list of column descriptors, at most one per accessor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ColumnDef>", into = "Vec<ColumnDef>")]
pub struct ColumnCatalog {
    columns: Vec<ColumnDef>,
}

impl ColumnCatalog {
    /// Builds a catalog, rejecting duplicate accessors.
    pub fn new(columns: Vec<ColumnDef>) -> Result<Self> {
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.accessor.as_str()) {
                return Err(TabulaError::DuplicateColumn(col.accessor.clone()));
            }
        }
        Ok(ColumnCatalog { columns })
    }

    /// Looks up a column by accessor.
    pub fn get(&self, accessor: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.accessor == accessor)
    }

    /// Data type of a field; fields missing from the catalog behave as strings.
    pub fn data_type(&self, accessor: &str) -> DataType {
        self.get(accessor).map(|c| c.data_type).unwrap_or_default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDef> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl TryFrom<Vec<ColumnDef>> for ColumnCatalog {
    type Error = TabulaError;

    fn try_from(columns: Vec<ColumnDef>) -> Result<Self> {
        ColumnCatalog::new(columns)
    }
}

impl From<ColumnCatalog> for Vec<ColumnDef> {
    fn from(catalog: ColumnCatalog) -> Self {
        catalog.columns
    }
}

impl<'a> IntoIterator for &'a ColumnCatalog {
    type Item = &'a ColumnDef;
    type IntoIter = std::slice::Iter<'a, ColumnDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
