//! Error types for the tabula crate.
//!
//! The pipeline itself never fails: malformed filters are fail-open and
//! out-of-range pages yield empty windows. These errors surface only from
//! explicit validation, catalog construction and configuration parsing.

use thiserror::Error;

/// Errors that can occur when validating filters, catalogs or view configurations.
#[derive(Debug, Error)]
pub enum TabulaError {
    /// A filter operand could not be parsed for the field's data type.
    #[error("invalid operand '{operand}': expected {expected}")]
    InvalidOperand {
        operand: String,
        expected: &'static str,
    },

    /// Operator is not part of the operator family for the data type.
    #[error("operator '{op}' is not valid for {data_type} columns")]
    UnsupportedOperator {
        op: &'static str,
        data_type: &'static str,
    },

    /// Operator name did not match any known operator.
    #[error("unknown operator: '{0}'")]
    UnknownOperator(String),

    /// Two column descriptors share the same accessor.
    #[error("duplicate column accessor: '{0}'")]
    DuplicateColumn(String),

    /// A collection value references a tag that is not among the column's options.
    #[error("unknown tag '{tag}' for column '{column}'")]
    UnknownTag { column: String, tag: String },

    /// A single-select collection column holds more than one tag.
    #[error("column '{column}' allows a single tag, got {count}")]
    TooManyTags { column: String, count: usize },

    /// View configuration could not be deserialized.
    #[error("invalid view configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result type for tabula operations.
pub type Result<T> = std::result::Result<T, TabulaError>;
