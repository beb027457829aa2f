//! Typed values produced by decoding and accepted by [`Buffer::append_value`].
//!
//! [`Value`] has one variant per [`FieldType`]. Every value is an independent
//! owned allocation; nothing in it borrows from the buffer it was decoded from.
//!
//! ## Usage Patterns
//!
//! ```rust
//! use cln::{FieldType, Value};
//! use std::convert::TryFrom;
//!
//! let value = Value::from(42i32);
//! assert_eq!(value.field_type(), FieldType::Int32);
//!
//! // Extraction is exact: an i32 field does not convert to i64.
//! assert_eq!(i32::try_from(value.clone()).unwrap(), 42);
//! assert!(i64::try_from(value).is_err());
//! ```
//!
//! [`Buffer::append_value`]: crate::Buffer::append_value

use crate::layout::FieldType;
use crate::Error;
use serde::Serialize;
use std::fmt;

/// A single decoded field.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Value {
    /// The layout tag that decodes back into this variant.
    #[must_use]
    pub const fn field_type(&self) -> FieldType {
        match self {
            Value::String(_) => FieldType::String,
            Value::I8(_) => FieldType::Int8,
            Value::I16(_) => FieldType::Int16,
            Value::I32(_) => FieldType::Int32,
            Value::I64(_) => FieldType::Int64,
            Value::U8(_) => FieldType::Uint8,
            Value::U16(_) => FieldType::Uint16,
            Value::U32(_) => FieldType::Uint32,
            Value::U64(_) => FieldType::Uint64,
            Value::F32(_) => FieldType::Float,
            Value::F64(_) => FieldType::Double,
        }
    }

    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns the string slice if this is a `String` value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::Value;
    ///
    /// assert_eq!(Value::from("abc").as_str(), Some("abc"));
    /// assert_eq!(Value::from(1u8).as_str(), None);
    /// ```
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Widens any signed or unsigned integer that fits into `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::I8(v) => Some(v.into()),
            Value::I16(v) => Some(v.into()),
            Value::I32(v) => Some(v.into()),
            Value::I64(v) => Some(v),
            Value::U8(v) => Some(v.into()),
            Value::U16(v) => Some(v.into()),
            Value::U32(v) => Some(v.into()),
            Value::U64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::U8(v) => Some(v.into()),
            Value::U16(v) => Some(v.into()),
            Value::U32(v) => Some(v.into()),
            Value::U64(v) => Some(v),
            Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) => {
                self.as_i64().and_then(|v| u64::try_from(v).ok())
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::F32(v) => Some(v.into()),
            Value::F64(v) => Some(v),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub(crate) fn kind(&self) -> &'static str {
        self.field_type().as_str()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::I8(v) => write!(f, "{}", v),
            Value::I16(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U8(v) => write!(f, "{}", v),
            Value::U16(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> crate::Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(Error::type_mismatch(stringify!($ty), other.kind())),
                    }
                }
            }
        )*
    };
}

scalar_conversions! {
    String => String,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}
