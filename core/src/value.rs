use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use derive_more::{Deref, From, Into};
use rusqlite::types::{ToSql, ToSqlOutput, ValueRef};

/// A single bound parameter, already converted out of its Rust field type.
///
/// `Null` is what an absent optional field turns into; it reaches the
/// driver as SQL `NULL` rather than being dereferenced.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            Value::Null => ValueRef::Null,
            Value::Integer(i) => ValueRef::Integer(*i),
            Value::Real(f) => ValueRef::Real(*f),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Blob(b) => ValueRef::Blob(b),
        };
        Ok(ToSqlOutput::Borrowed(value))
    }
}

/// The positional values of one record, in column order.
#[derive(Debug, Clone, Default, PartialEq, From, Into, Deref)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn with_capacity(n: usize) -> Self {
        Row(Vec::with_capacity(n))
    }

    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }
}

/// Conversion from a mapped field into a bindable [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

macro_rules! impl_to_value_integer {
    { $( $ty:ty ),* } => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }
            }
        )*
    };
}

impl_to_value_integer! { i8, i16, i32, i64, u8, u16, u32 }

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Integer(i64::from(*self))
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Real(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Real(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for [u8] {
    fn to_value(&self) -> Value {
        Value::Blob(self.to_vec())
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            None => Value::Null,
            Some(inner) => inner.to_value(),
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

// timestamps go in as text, which is what sqlite's date functions read
impl<Tz: TimeZone> ToValue for DateTime<Tz>
    where Tz::Offset: std::fmt::Display
{
    fn to_value(&self) -> Value {
        Value::Text(self.to_rfc3339())
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::Text(self.format("%Y-%m-%d %H:%M:%S%.f").to_string())
    }
}

impl ToValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::Text(self.format("%Y-%m-%d").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn none_becomes_null() {
        let missing: Option<bool> = None;
        assert_eq!(missing.to_value(), Value::Null);
        assert_eq!(Some(true).to_value(), Value::Integer(1));
    }

    #[test]
    fn references_bind_the_pointed_to_value() {
        let flag = false;
        let ptr: Option<&bool> = Some(&flag);
        assert_eq!(ptr.to_value(), Value::Integer(0));
        assert_eq!(Box::new(7u16).to_value(), Value::Integer(7));
    }

    #[test]
    fn timestamps_are_rfc3339_text() {
        let at = Utc.with_ymd_and_hms(2023, 9, 14, 12, 30, 0).unwrap();
        assert_eq!(at.to_value(), Value::Text("2023-09-14T12:30:00+00:00".into()));
    }

    #[test]
    fn null_binds_as_sql_null() {
        let output = Value::Null.to_sql().unwrap();
        assert!(matches!(output, ToSqlOutput::Borrowed(ValueRef::Null)));
    }
}
