//! Comparator library: typed value ordering.
//!
//! Comparisons are total: values that cannot be read for the column's type
//! compare as equal, so a stable sort leaves them in upstream order.

use std::cmp::Ordering;

use crate::collection::normalize;
use crate::column::DataType;
use crate::temporal::instant_for;
use crate::value::Value;

/// Compares two field values of a column with the given data type.
///
/// - number/currency: numeric order; a non-numeric side compares equal
/// - date/datetime: instant order (`date` ignores time of day); an
///   unparsable side compares equal
/// - collection: tag count first, then the first tag, case-insensitively
/// - string, boolean: case-insensitive order of the text form, absent
///   values reading as `""`
///
/// ```
/// use std::cmp::Ordering;
/// use tabula::{compare, DataType, Value, Number};
///
/// let a = Value::Number(Number::I64(2));
/// let b = Value::Number(Number::I64(10));
/// assert_eq!(compare(DataType::Number, &a, &b), Ordering::Less);
/// assert_eq!(compare(DataType::String, &Value::String("b"), &Value::String("A")), Ordering::Greater);
/// ```
pub fn compare(data_type: DataType, a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match data_type {
        DataType::Number | DataType::Currency => match (a.to_f64(), b.to_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        DataType::Date | DataType::Datetime => {
            match (instant_for(a, data_type), instant_for(b, data_type)) {
                (Some(a), Some(b)) => a.cmp(&b),
                _ => Ordering::Equal,
            }
        }
        DataType::Collection => {
            let (a, b) = (normalize(a), normalize(b));
            a.len().cmp(&b.len()).then_with(|| {
                compare_text(a.first().unwrap_or_default(), b.first().unwrap_or_default())
            })
        }
        DataType::String | DataType::Boolean => {
            compare_text(&a.to_text_or_empty(), &b.to_text_or_empty())
        }
    }
}

/// Case-insensitive lexicographic comparison.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
