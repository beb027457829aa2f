//! # cln
//!
//! Compact Literal Notation: a flat, human-readable text encoding for a
//! sequence of typed scalars.
//!
//! ## What is CLN?
//!
//! A CLN record is one line of text holding strings, integers and floats
//! separated by a single delimiter byte (`,` by default). There is no nesting,
//! no quoting and no type information in the text itself: the reader supplies
//! a [`Layout`] naming the type of every field.
//!
//! ```text
//! a\,b,42,3.5
//! ```
//!
//! A literal delimiter inside a string field is written as the escape pair
//! `\,`. Any other backslash passes through unchanged.
//!
//! ## Quick Start
//!
//! ```rust
//! use cln::{Buffer, FieldType, Value};
//!
//! let mut buffer = Buffer::new(16);
//! buffer.append_str("a,b").unwrap();
//! buffer.append_int(42).unwrap();
//! buffer.append_double(3.5, "%.1f").unwrap();
//! assert_eq!(buffer.as_str(), "a\\,b,42,3.5");
//!
//! buffer
//!     .set_layout(&[FieldType::String, FieldType::Int32, FieldType::Double])
//!     .unwrap();
//! assert_eq!(buffer.decode_as::<i32>(1).unwrap(), 42);
//! assert_eq!(buffer.decode_as::<f64>(2).unwrap(), 3.5);
//! ```
//!
//! ### Whole records
//!
//! ```rust
//! use cln::{from_str, layout_of, to_string, Value};
//!
//! let values = vec![Value::from("x"), Value::from(7i64), Value::from(3.5f64)];
//! let text = to_string(&values).unwrap();
//! assert_eq!(text, "x,7,3.5");
//!
//! let back = from_str(&text, layout_of(&values).as_slice()).unwrap();
//! assert_eq!(back, values);
//! ```
//!
//! ## Status and errors
//!
//! Operations return [`Result`]. Appending or decoding an empty string field
//! succeeds with [`Status::EmptyString`] so callers can tell "empty" from
//! "absent". Errors carry a descriptive message and a legacy integer code
//! ([`Error::code`]).
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Decoded values are owned and independent of the buffer
//! - A [`Buffer`] needs `&mut` to change, so concurrent mutation is rejected at
//!   compile time
//!
//! See [`notation`] for the wire format in detail.

pub mod buffer;
pub mod de;
pub mod error;
pub mod escape;
pub mod format;
pub mod layout;
pub mod notation;
pub mod options;
pub mod ser;
pub mod value;

pub use buffer::Buffer;
pub use de::Decoded;
pub use error::{Error, FormatErrorKind, Result, Status};
pub use layout::{FieldType, Layout};
pub use options::{ClnOptions, Delimiter};
pub use value::Value;

/// Encodes `values` as one CLN record.
///
/// Floats use the default formats of [`ClnOptions`] (`%f` for `f32`, `%.17g`
/// for `f64`).
///
/// # Errors
///
/// Returns an error if a float cannot be formatted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(values: &[Value]) -> Result<String> {
    to_string_with_options(values, ClnOptions::default())
}

/// Encodes `values` as one CLN record with custom options.
///
/// # Examples
///
/// ```rust
/// use cln::{to_string_with_options, ClnOptions, Delimiter, Value};
///
/// let options = ClnOptions::new().with_delimiter(Delimiter::Tab);
/// let text = to_string_with_options(&[Value::from("a"), Value::from(1u8)], options).unwrap();
/// assert_eq!(text, "a\t1");
/// ```
///
/// # Errors
///
/// Returns an error if a float cannot be formatted.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(values: &[Value], options: ClnOptions) -> Result<String> {
    let mut buffer = Buffer::with_options(options);
    for value in values {
        buffer.append_value(value)?;
    }
    buffer.trim();
    Ok(buffer.into_string())
}

/// Decodes a CLN record with the given field types.
///
/// # Examples
///
/// ```rust
/// use cln::{from_str, FieldType, Value};
///
/// let values = from_str(
///     "frivolous\\,\\,!!!!,82,73",
///     &[FieldType::String, FieldType::Int16, FieldType::String],
/// )
/// .unwrap();
/// assert_eq!(values[0], Value::from("frivolous\\,\\,!!!!"));
/// assert_eq!(values[1], Value::I16(82));
/// assert_eq!(values[2], Value::from("73"));
/// ```
///
/// # Errors
///
/// [`Error::EmptyLayout`] for an empty layout, otherwise the first decoding
/// error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(text: &str, layout: &[FieldType]) -> Result<Vec<Value>> {
    from_str_with_options(text, layout, ClnOptions::default())
}

/// Decodes a CLN record with the given field types and options.
///
/// # Errors
///
/// [`Error::EmptyLayout`] for an empty layout, otherwise the first decoding
/// error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(
    text: &str,
    layout: &[FieldType],
    options: ClnOptions,
) -> Result<Vec<Value>> {
    let mut buffer = Buffer::read_with_options(Some(text), options)?;
    buffer.set_layout(layout)?;
    buffer.decode_values()
}

/// The layout that decodes `values` back into the same variants.
#[must_use]
pub fn layout_of(values: &[Value]) -> Layout {
    values.iter().map(Value::field_type).collect()
}
