//! Filter operators.
//!
//! The [`Op`] enum defines every supported operator, organized by the data
//! type family it belongs to. `IsEmpty` is the only operator valid for every
//! type; `Contains`/`DoesNotContain` are shared by strings and collections,
//! `Is` by dates and booleans.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::column::DataType;
use crate::error::TabulaError;

/// Filter operator.
///
/// Operator families by data type:
/// - **All**: `IsEmpty`
/// - **String**: `Contains`, `DoesNotContain`, `Equals`, `StartsWith`, `EndsWith`
/// - **Number/Currency**: `Eq`, `Neq`, `Gt`, `Lt`, `Gte`, `Lte`, `Between`
/// - **Date/Datetime**: `Is`, `IsNot`, `IsBefore`, `IsAfter`, `DateRange`
/// - **Boolean**: `Is`, `Equals`
/// - **Collection**: `Contains`, `DoesNotContain`, `ContainsAny`, `ContainsAll`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Op {
    /// Value is absent, an empty string or an empty collection.
    IsEmpty,

    // String (and collection membership)
    Contains,
    DoesNotContain,
    Equals,
    StartsWith,
    EndsWith,

    // Number
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
    /// Inclusive range; needs a second operand.
    Between,

    // Date
    Is,
    IsNot,
    IsBefore,
    IsAfter,
    /// Inclusive date range; needs a second operand.
    DateRange,

    // Collection
    /// Field shares at least one tag with the operand list.
    ContainsAny,
    /// Field holds every tag of the operand list.
    ContainsAll,
}

impl Op {
    /// Returns `true` if this operator belongs to the string family.
    pub fn is_string_op(self) -> bool {
        matches!(
            self,
            Op::Contains | Op::DoesNotContain | Op::Equals | Op::StartsWith | Op::EndsWith
        )
    }

    /// Returns `true` if this operator belongs to the number family.
    pub fn is_number_op(self) -> bool {
        matches!(
            self,
            Op::Eq | Op::Neq | Op::Gt | Op::Lt | Op::Gte | Op::Lte | Op::Between
        )
    }

    /// Returns `true` if this operator belongs to the date family.
    pub fn is_date_op(self) -> bool {
        matches!(
            self,
            Op::Is | Op::IsNot | Op::IsBefore | Op::IsAfter | Op::DateRange
        )
    }

    /// Returns `true` if this operator applies to boolean columns.
    ///
    /// Boolean filters are decided by the operand alone, so every operator
    /// taking a single operand qualifies.
    pub fn is_boolean_op(self) -> bool {
        !self.is_range()
    }

    /// Returns `true` for operators that invert an equality or membership
    /// test.
    pub fn is_negated(self) -> bool {
        matches!(self, Op::IsNot | Op::Neq | Op::DoesNotContain)
    }

    /// Returns `true` if this operator belongs to the collection family.
    pub fn is_collection_op(self) -> bool {
        matches!(
            self,
            Op::Contains | Op::DoesNotContain | Op::ContainsAny | Op::ContainsAll | Op::IsEmpty
        )
    }

    /// Returns `true` for operators taking a second operand.
    pub fn is_range(self) -> bool {
        matches!(self, Op::Between | Op::DateRange)
    }

    /// Returns `true` if the operator is valid for columns of `data_type`.
    pub fn is_valid_for(self, data_type: DataType) -> bool {
        if self == Op::IsEmpty {
            return true;
        }
        match data_type {
            DataType::String => self.is_string_op(),
            DataType::Number | DataType::Currency => self.is_number_op(),
            DataType::Date | DataType::Datetime => self.is_date_op(),
            DataType::Boolean => self.is_boolean_op(),
            DataType::Collection => self.is_collection_op(),
        }
    }

    /// Evaluates a comparison given the ordering of field value to operand.
    ///
    /// Used for number and date comparisons. Range and non-ordering operators
    /// return `false`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq | Op::Is => ordering == Ordering::Equal,
            Op::Neq | Op::IsNot => ordering != Ordering::Equal,
            Op::Gt | Op::IsAfter => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt | Op::IsBefore => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false,
        }
    }

    /// Returns the name of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::IsEmpty => "isEmpty",
            Op::Contains => "contains",
            Op::DoesNotContain => "doesNotContain",
            Op::Equals => "equals",
            Op::StartsWith => "startsWith",
            Op::EndsWith => "endsWith",
            Op::Eq => "eq",
            Op::Neq => "neq",
            Op::Gt => "gt",
            Op::Lt => "lt",
            Op::Gte => "gte",
            Op::Lte => "lte",
            Op::Between => "between",
            Op::Is => "is",
            Op::IsNot => "isNot",
            Op::IsBefore => "isBefore",
            Op::IsAfter => "isAfter",
            Op::DateRange => "dateRange",
            Op::ContainsAny => "containsAny",
            Op::ContainsAll => "containsAll",
        }
    }
}

const ALL_OPS: &[Op] = &[
    Op::IsEmpty,
    Op::Contains,
    Op::DoesNotContain,
    Op::Equals,
    Op::StartsWith,
    Op::EndsWith,
    Op::Eq,
    Op::Neq,
    Op::Gt,
    Op::Lt,
    Op::Gte,
    Op::Lte,
    Op::Between,
    Op::Is,
    Op::IsNot,
    Op::IsBefore,
    Op::IsAfter,
    Op::DateRange,
    Op::ContainsAny,
    Op::ContainsAll,
];

impl FromStr for Op {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_OPS
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| TabulaError::UnknownOperator(s.to_string()))
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
