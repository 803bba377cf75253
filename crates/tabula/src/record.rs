//! Field access for row types.
//!
//! The [`Record`] trait is what the pipeline reads rows through. It is usually
//! derived with `#[derive(Record)]` from `tabula-macros`, which also generates
//! the column definitions; [`ToValue`] is the conversion the derive relies on.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::value::{Number, Timestamp, Value};

/// Trait for row types the pipeline can filter, sort and group.
///
/// # Derive Usage
///
/// ```ignore
/// use tabula::ColumnCatalog;
/// use tabula_macros::Record;
///
/// #[derive(Record)]
/// struct Employee {
///     #[column(String, header = "Name")]
///     name: String,
///     #[column(Currency)]
///     salary: f64,
///     #[column(Collection)]
///     skills: Vec<String>,
/// }
///
/// let catalog = ColumnCatalog::new(Employee::columns())?;
/// assert_eq!(catalog.len(), 3);
/// ```
///
/// # Manual Implementation
///
/// ```
/// use tabula::{Record, Value, Number};
///
/// struct Employee {
///     name: String,
///     age: u8,
/// }
///
/// impl Record for Employee {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "age" => Value::Number(Number::from(self.age)),
///             _ => Value::Missing,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a field, or [`Value::Missing`] for unknown fields.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Free-function form of [`field_value`](Record::field_value), usable
    /// wherever the stage functions expect an accessor.
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

/// Conversion of a stored field into a [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value<'_>;
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for Timestamp {
    fn to_value(&self) -> Value<'_> {
        Value::Timestamp(*self)
    }
}

macro_rules! number_to_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

number_to_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp::from_millis(self.and_utc().timestamp_millis()))
    }
}

impl ToValue for NaiveDate {
    fn to_value(&self) -> Value<'_> {
        let midnight = self.and_time(NaiveTime::MIN);
        Value::Timestamp(Timestamp::from_millis(midnight.and_utc().timestamp_millis()))
    }
}

impl<Tz: TimeZone> ToValue for DateTime<Tz> {
    fn to_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp::from_millis(self.timestamp_millis()))
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}
