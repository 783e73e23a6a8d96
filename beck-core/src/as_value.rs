use crate::{Error, Result, Value};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Conversion between Rust types and [`Value`].
///
/// `as_value` never fails; `try_from_value` accepts lossless widening
/// between the integer variants and reports everything else as
/// [`Error::Decode`]. No validation happens at bind time beyond this
/// conversion, type mismatches against the actual column surface at
/// execution.
pub trait AsValue: Sized {
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>;
}

impl AsValue for Value {
    fn as_value(self) -> Value {
        self
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

fn integer_of(value: &Value) -> Option<i128> {
    Some(match value {
        Value::Int8(Some(v)) => *v as i128,
        Value::Int16(Some(v)) => *v as i128,
        Value::Int32(Some(v)) => *v as i128,
        Value::Int64(Some(v)) => *v as i128,
        Value::UInt8(Some(v)) => *v as i128,
        Value::UInt16(Some(v)) => *v as i128,
        Value::UInt32(Some(v)) => *v as i128,
        Value::UInt64(Some(v)) => *v as i128,
        _ => return None,
    })
}

macro_rules! impl_integer_as_value {
    ($type:ty, $variant:ident) => {
        impl AsValue for $type {
            fn as_value(self) -> Value {
                Value::$variant(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                let Some(wide) = integer_of(&value) else {
                    return Err(Error::Decode(format!(
                        "cannot decode {:?} as {}",
                        value,
                        stringify!($type)
                    )));
                };
                <$type>::try_from(wide).map_err(|_| {
                    Error::Decode(format!(
                        "integer {} is out of range for {}",
                        wide,
                        stringify!($type)
                    ))
                })
            }
        }
    };
}

impl_integer_as_value!(i8, Int8);
impl_integer_as_value!(i16, Int16);
impl_integer_as_value!(i32, Int32);
impl_integer_as_value!(i64, Int64);
impl_integer_as_value!(u8, UInt8);
impl_integer_as_value!(u16, UInt16);
impl_integer_as_value!(u32, UInt32);
impl_integer_as_value!(u64, UInt64);

macro_rules! impl_exact_as_value {
    ($type:ty, $variant:ident, $expected:literal) => {
        impl AsValue for $type {
            fn as_value(self) -> Value {
                Value::$variant(Some(self))
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(Some(v)) => Ok(v),
                    other => Err(Error::Decode(format!(
                        "cannot decode {:?} as {}",
                        other, $expected
                    ))),
                }
            }
        }
    };
}

impl_exact_as_value!(Decimal, Decimal, "a decimal");
impl_exact_as_value!(String, Varchar, "a string");
impl_exact_as_value!(Box<[u8]>, Blob, "a blob");
impl_exact_as_value!(Date, Date, "a date");
impl_exact_as_value!(Time, Time, "a time");
impl_exact_as_value!(PrimitiveDateTime, Timestamp, "a timestamp");
impl_exact_as_value!(
    OffsetDateTime,
    TimestampWithTimezone,
    "a timestamp with timezone"
);
impl_exact_as_value!(Uuid, Uuid, "a uuid");

impl AsValue for bool {
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(Some(v)) => Ok(v),
            other => match integer_of(&other) {
                Some(wide) => Ok(wide != 0),
                None => Err(Error::Decode(format!("cannot decode {:?} as bool", other))),
            },
        }
    }
}

impl AsValue for f32 {
    fn as_value(self) -> Value {
        Value::Float32(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float32(Some(v)) => Ok(v),
            other => Err(Error::Decode(format!("cannot decode {:?} as f32", other))),
        }
    }
}

impl AsValue for f64 {
    fn as_value(self) -> Value {
        Value::Float64(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float64(Some(v)) => Ok(v),
            Value::Float32(Some(v)) => Ok(v as f64),
            Value::Decimal(Some(v)) => v
                .to_f64()
                .ok_or_else(|| Error::Decode(format!("cannot represent the decimal {} as f64", v))),
            other => match integer_of(&other) {
                Some(wide) => Ok(wide as f64),
                None => Err(Error::Decode(format!("cannot decode {:?} as f64", other))),
            },
        }
    }
}

impl AsValue for &str {
    fn as_value(self) -> Value {
        Value::Varchar(Some(self.to_owned()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Err(Error::Decode(format!(
            "cannot decode {:?} into a borrowed string, use String",
            value
        )))
    }
}

impl AsValue for Vec<u8> {
    fn as_value(self) -> Value {
        Value::Blob(Some(self.into()))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Box::<[u8]>::try_from_value(value).map(Into::into)
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::try_from_value(value).map(Some)
    }
}

macro_rules! impl_from_for_value {
    ($type:ty) => {
        impl From<$type> for Value {
            fn from(value: $type) -> Self {
                value.as_value()
            }
        }
    };
}

impl_from_for_value!(bool);
impl_from_for_value!(i8);
impl_from_for_value!(i16);
impl_from_for_value!(i32);
impl_from_for_value!(i64);
impl_from_for_value!(u8);
impl_from_for_value!(u16);
impl_from_for_value!(u32);
impl_from_for_value!(u64);
impl_from_for_value!(f32);
impl_from_for_value!(f64);
impl_from_for_value!(Decimal);
impl_from_for_value!(String);
impl_from_for_value!(&str);
impl_from_for_value!(Uuid);
