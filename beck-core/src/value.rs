use rust_decimal::Decimal;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// A database value.
///
/// Typed nulls are represented as a `None` payload inside the variant, so a
/// null keeps carrying its declared type; `Value::Null` is the untyped null.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Uuid(Option<Uuid>),
}

/// The payload-free counterpart of [`Value`], used for column metadata and
/// typed null binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Decimal,
    Varchar,
    Blob,
    Date,
    Time,
    Timestamp,
    TimestampWithTimezone,
    Uuid,
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Boolean(v) => v.is_none(),
            Value::Int8(v) => v.is_none(),
            Value::Int16(v) => v.is_none(),
            Value::Int32(v) => v.is_none(),
            Value::Int64(v) => v.is_none(),
            Value::UInt8(v) => v.is_none(),
            Value::UInt16(v) => v.is_none(),
            Value::UInt32(v) => v.is_none(),
            Value::UInt64(v) => v.is_none(),
            Value::Float32(v) => v.is_none(),
            Value::Float64(v) => v.is_none(),
            Value::Decimal(v) => v.is_none(),
            Value::Varchar(v) => v.is_none(),
            Value::Blob(v) => v.is_none(),
            Value::Date(v) => v.is_none(),
            Value::Time(v) => v.is_none(),
            Value::Timestamp(v) => v.is_none(),
            Value::TimestampWithTimezone(v) => v.is_none(),
            Value::Uuid(v) => v.is_none(),
        }
    }

    /// The typed null of the given data type.
    pub fn null_of(data_type: DataType) -> Value {
        match data_type {
            DataType::Boolean => Value::Boolean(None),
            DataType::Int8 => Value::Int8(None),
            DataType::Int16 => Value::Int16(None),
            DataType::Int32 => Value::Int32(None),
            DataType::Int64 => Value::Int64(None),
            DataType::UInt8 => Value::UInt8(None),
            DataType::UInt16 => Value::UInt16(None),
            DataType::UInt32 => Value::UInt32(None),
            DataType::UInt64 => Value::UInt64(None),
            DataType::Float32 => Value::Float32(None),
            DataType::Float64 => Value::Float64(None),
            DataType::Decimal => Value::Decimal(None),
            DataType::Varchar => Value::Varchar(None),
            DataType::Blob => Value::Blob(None),
            DataType::Date => Value::Date(None),
            DataType::Time => Value::Time(None),
            DataType::Timestamp => Value::Timestamp(None),
            DataType::TimestampWithTimezone => Value::TimestampWithTimezone(None),
            DataType::Uuid => Value::Uuid(None),
        }
    }

    /// The data type of this value, `None` for the untyped null.
    pub fn data_type(&self) -> Option<DataType> {
        Some(match self {
            Value::Null => return None,
            Value::Boolean(..) => DataType::Boolean,
            Value::Int8(..) => DataType::Int8,
            Value::Int16(..) => DataType::Int16,
            Value::Int32(..) => DataType::Int32,
            Value::Int64(..) => DataType::Int64,
            Value::UInt8(..) => DataType::UInt8,
            Value::UInt16(..) => DataType::UInt16,
            Value::UInt32(..) => DataType::UInt32,
            Value::UInt64(..) => DataType::UInt64,
            Value::Float32(..) => DataType::Float32,
            Value::Float64(..) => DataType::Float64,
            Value::Decimal(..) => DataType::Decimal,
            Value::Varchar(..) => DataType::Varchar,
            Value::Blob(..) => DataType::Blob,
            Value::Date(..) => DataType::Date,
            Value::Time(..) => DataType::Time,
            Value::Timestamp(..) => DataType::Timestamp,
            Value::TimestampWithTimezone(..) => DataType::TimestampWithTimezone,
            Value::Uuid(..) => DataType::Uuid,
        })
    }
}
