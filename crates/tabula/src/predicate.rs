//! Predicate library: typed filter evaluation.
//!
//! Evaluation dispatches on the column's [`DataType`], never on the runtime
//! shape of the value. Two entry points share one implementation:
//!
//! - [`try_matches`] reports malformed operands and operator/type mismatches
//!   as errors.
//! - [`matches`] is fail-open: wherever `try_matches` would error it returns
//!   `true`, so a misconfigured filter never hides rows.
//!
//! Field values that cannot be read for the column type (an unparsable date,
//! say) are not configuration errors; date predicates admit such rows and
//! number predicates treat them as unequal to everything.

use crate::collection::{normalize, parse_operand_list};
use crate::column::DataType;
use crate::error::{Result, TabulaError};
use crate::op::Op;
use crate::temporal::{instant_for, operand_instant};
use crate::value::{parse_bool, Value};

/// Evaluates a filter against a field value, reporting configuration errors.
///
/// ```
/// use tabula::{try_matches, DataType, Op, Value, Number};
///
/// let price = Value::Number(Number::F64(9.5));
/// assert!(try_matches(DataType::Currency, Op::Lt, &price, "10", None).unwrap());
/// assert!(try_matches(DataType::Currency, Op::Lt, &price, "ten", None).is_err());
/// assert!(try_matches(DataType::Currency, Op::StartsWith, &price, "9", None).is_err());
/// ```
pub fn try_matches(
    data_type: DataType,
    op: Op,
    value: &Value<'_>,
    operand: &str,
    second: Option<&str>,
) -> Result<bool> {
    if op == Op::IsEmpty {
        return Ok(value.is_empty());
    }
    if !op.is_valid_for(data_type) {
        return Err(TabulaError::UnsupportedOperator {
            op: op.as_str(),
            data_type: data_type.as_str(),
        });
    }

    match data_type {
        DataType::String => Ok(match_string(op, value, operand)),
        DataType::Number | DataType::Currency => match_number(op, value, operand, second),
        DataType::Date | DataType::Datetime => match_date(data_type, op, value, operand, second),
        DataType::Boolean => match_bool(op, value, operand),
        DataType::Collection => match_collection(op, value, operand),
    }
}

/// Fail-open filter evaluation.
///
/// ```
/// use tabula::{matches, DataType, Op, Value, Number};
///
/// let qty = Value::Number(Number::I64(3));
/// assert!(!matches(DataType::Number, Op::Gt, &qty, "5", None));
/// // unparsable operand: the filter does not apply
/// assert!(matches(DataType::Number, Op::Gt, &qty, "abc", None));
/// ```
pub fn matches(
    data_type: DataType,
    op: Op,
    value: &Value<'_>,
    operand: &str,
    second: Option<&str>,
) -> bool {
    try_matches(data_type, op, value, operand, second).unwrap_or(true)
}

fn invalid(operand: &str, expected: &'static str) -> TabulaError {
    TabulaError::InvalidOperand {
        operand: operand.to_string(),
        expected,
    }
}

fn match_string(op: Op, value: &Value<'_>, operand: &str) -> bool {
    let field = value.to_text_or_empty().to_lowercase();
    let needle = operand.to_lowercase();
    match op {
        Op::Contains => field.contains(&needle),
        Op::DoesNotContain => !field.contains(&needle),
        Op::Equals => field == needle,
        Op::StartsWith => field.starts_with(&needle),
        Op::EndsWith => field.ends_with(&needle),
        _ => true,
    }
}

pub(crate) fn parse_number(operand: &str) -> Result<f64> {
    operand
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| !n.is_nan())
        .ok_or_else(|| invalid(operand, "a number"))
}

fn match_number(op: Op, value: &Value<'_>, operand: &str, second: Option<&str>) -> Result<bool> {
    let target = parse_number(operand)?;

    if op == Op::Between {
        let upper = parse_number(second.unwrap_or(""))?;
        return Ok(value
            .to_f64()
            .is_some_and(|field| field >= target && field <= upper));
    }

    // A non-numeric field equals nothing.
    let ordering = value.to_f64().and_then(|field| field.partial_cmp(&target));
    Ok(match ordering {
        Some(ordering) => op.eval_ordering(ordering),
        None => op == Op::Neq,
    })
}

fn match_date(
    data_type: DataType,
    op: Op,
    value: &Value<'_>,
    operand: &str,
    second: Option<&str>,
) -> Result<bool> {
    let target = operand_instant(operand, data_type).ok_or_else(|| invalid(operand, "a date"))?;
    let end = match op {
        Op::DateRange => {
            let second = second.unwrap_or("");
            Some(operand_instant(second, data_type).ok_or_else(|| invalid(second, "a date"))?)
        }
        _ => None,
    };

    let Some(field) = instant_for(value, data_type) else {
        return Ok(true);
    };

    Ok(match end {
        Some(end) => field >= target && field <= end,
        None => op.eval_ordering(field.cmp(&target)),
    })
}

fn match_bool(op: Op, value: &Value<'_>, operand: &str) -> Result<bool> {
    let wanted = parse_bool(operand).ok_or_else(|| invalid(operand, "true or false"))?;
    Ok((value.as_bool() == Some(wanted)) != op.is_negated())
}

fn match_collection(op: Op, value: &Value<'_>, operand: &str) -> Result<bool> {
    let tags = normalize(value);
    match op {
        Op::Contains | Op::DoesNotContain => {
            let tag = operand.trim();
            if tag.is_empty() {
                return Err(invalid(operand, "a tag"));
            }
            Ok(tags.contains(tag) == (op == Op::Contains))
        }
        Op::ContainsAny | Op::ContainsAll => {
            let wanted = parse_operand_list(operand);
            if wanted.is_empty() {
                return Err(invalid(operand, "a list of tags"));
            }
            Ok(if op == Op::ContainsAny {
                tags.intersects(&wanted)
            } else {
                tags.is_superset(&wanted)
            })
        }
        _ => Ok(true),
    }
}
