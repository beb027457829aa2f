//! CLN decoding.
//!
//! Decoding is driven by a [`Layout`] installed with
//! [`Buffer::set_layout`]. [`Buffer::decode_field`] scans the encoded text
//! for the requested field, honoring escape pairs, and parses it at the
//! declared type. [`Buffer::decode_all`] does the same for every field of the
//! layout in one call.
//!
//! ## String fields
//!
//! By default a `String` field decodes to its wire form, escape pairs
//! included: encoding `"a,b"` and decoding it back yields `"a\,b"`. Use
//! [`escape::unescape`] on the result, or enable
//! [`ClnOptions::unescape_strings`](crate::ClnOptions::unescape_strings), to get
//! the original text.
//!
//! ```rust
//! use cln::{Buffer, FieldType, Value};
//!
//! let mut buffer = Buffer::new(0);
//! buffer.append_str("a,b").unwrap();
//! buffer.append_int(42).unwrap();
//!
//! buffer.set_layout(&[FieldType::String, FieldType::Int32]).unwrap();
//! assert_eq!(buffer.decode_field(0).unwrap().value, Value::from("a\\,b"));
//! assert_eq!(buffer.decode_as::<i32>(1).unwrap(), 42);
//! ```

use crate::error::{Error, Result, Status};
use crate::escape;
use crate::layout::{FieldType, Layout};
use crate::value::Value;
use crate::Buffer;
use std::str::FromStr;

/// One decoded field together with the status of its decode.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoded {
    pub value: Value,
    /// `EmptyString` when the field had zero length.
    pub status: Status,
}

impl Decoded {
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl Buffer {
    /// Installs the field types used for decoding, replacing any previous
    /// layout.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyLayout`] when `tags` is empty; the old layout stays.
    pub fn set_layout(&mut self, tags: &[FieldType]) -> Result<()> {
        if tags.is_empty() {
            return Err(self.fail(Error::EmptyLayout));
        }

        log::debug!("installing layout with {} fields", tags.len());
        self.layout = Some(Layout::from(tags));
        self.record(Status::Success);
        Ok(())
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Decodes field `index` at the type the layout declares for it.
    ///
    /// A zero-length field decodes to an empty `Value::String` with
    /// [`Status::EmptyString`], whatever its declared type.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfBounds`] when `index` is past the layout or past the
    ///   fields actually present in the text
    /// - [`Error::Parse`] when a numeric field does not parse at its width
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::{Buffer, FieldType, Status, Value};
    ///
    /// let mut buffer = Buffer::from_text("66,,1.5");
    /// buffer
    ///     .set_layout(&[FieldType::Uint8, FieldType::String, FieldType::Double])
    ///     .unwrap();
    ///
    /// assert_eq!(buffer.decode_field(0).unwrap().value, Value::U8(66));
    /// assert_eq!(buffer.decode_field(1).unwrap().status, Status::EmptyString);
    /// assert!(buffer.decode_field(3).is_err());
    /// ```
    pub fn decode_field(&self, index: usize) -> Result<Decoded> {
        let result = self.decode_field_inner(index);
        if let Err(err) = &result {
            log::debug!("decoding field {} failed: {}", index, err);
        }
        result
    }

    fn decode_field_inner(&self, index: usize) -> Result<Decoded> {
        let layout_len = self.layout.as_ref().map_or(0, Layout::len);
        let field_type = self
            .layout
            .as_ref()
            .and_then(|layout| layout.get(index))
            .ok_or_else(|| Error::out_of_bounds(index, layout_len))?;

        if index >= self.count {
            return Err(Error::out_of_bounds(index, self.count));
        }

        let bytes = self.as_bytes();
        let delimiter = self.delimiter();
        let span = escape::field_span(bytes, index, delimiter)
            .ok_or_else(|| Error::out_of_bounds(index, escape::count_fields(bytes, delimiter)))?;
        let text = &self.as_str()[span];

        if text.is_empty() {
            return Ok(Decoded {
                value: Value::String(String::new()),
                status: Status::EmptyString,
            });
        }

        let value = self.parse_field(index, text, field_type)?;
        Ok(Decoded {
            value,
            status: Status::Success,
        })
    }

    fn parse_field(&self, index: usize, text: &str, field_type: FieldType) -> Result<Value> {
        let value = match field_type {
            FieldType::String if self.options.unescape_strings => {
                Value::String(escape::unescape(text, self.delimiter()).into_owned())
            }
            FieldType::String => Value::String(text.to_string()),
            FieldType::Int8 => Value::I8(parse_number(index, text, field_type)?),
            FieldType::Int16 => Value::I16(parse_number(index, text, field_type)?),
            FieldType::Int32 => Value::I32(parse_number(index, text, field_type)?),
            FieldType::Int64 => Value::I64(parse_number(index, text, field_type)?),
            FieldType::Uint8 => Value::U8(parse_number(index, text, field_type)?),
            FieldType::Uint16 => Value::U16(parse_number(index, text, field_type)?),
            FieldType::Uint32 => Value::U32(parse_number(index, text, field_type)?),
            FieldType::Uint64 => Value::U64(parse_number(index, text, field_type)?),
            FieldType::Float => Value::F32(parse_number(index, text, field_type)?),
            FieldType::Double => Value::F64(parse_number(index, text, field_type)?),
        };
        Ok(value)
    }

    /// Decodes field `index` and converts it to `T`.
    ///
    /// # Errors
    ///
    /// Everything [`decode_field`](Buffer::decode_field) returns, plus
    /// [`Error::TypeMismatch`] when the decoded value is not a `T` (an empty
    /// field decodes to an empty string).
    pub fn decode_as<T>(&self, index: usize) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        T::try_from(self.decode_field(index)?.value)
    }

    /// Decodes every field of the layout into `slots`.
    ///
    /// `slots[i]` receives field `i`. A `None` slot skips its field, which is
    /// then neither decoded nor recorded in [`tracked`](Buffer::tracked).
    /// Decoding stops at the first error; slots filled before it keep their
    /// values. Empty fields do not stop decoding; the returned status is
    /// `EmptyString` if any decoded field was empty.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyLayout`] when no layout is installed
    /// - [`Error::OutOfBounds`] when there are fewer slots than layout fields,
    ///   before anything is decoded
    /// - the first error of [`decode_field`](Buffer::decode_field)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::{Buffer, FieldType, Value};
    ///
    /// let mut buffer = Buffer::from_text("x,7,3.5");
    /// buffer
    ///     .set_layout(&[FieldType::String, FieldType::Int64, FieldType::Double])
    ///     .unwrap();
    ///
    /// let mut name = None;
    /// let mut ratio = None;
    /// buffer
    ///     .decode_all(&mut [Some(&mut name), None, Some(&mut ratio)])
    ///     .unwrap();
    ///
    /// assert_eq!(name, Some(Value::from("x")));
    /// assert_eq!(ratio, Some(Value::F64(3.5)));
    /// assert_eq!(buffer.tracked(), &[0, 2]);
    /// ```
    pub fn decode_all(&mut self, slots: &mut [Option<&mut Option<Value>>]) -> Result<Status> {
        let layout_len = match &self.layout {
            Some(layout) => layout.len(),
            None => return Err(self.fail(Error::EmptyLayout)),
        };
        if slots.len() < layout_len {
            return Err(self.fail(Error::out_of_bounds(layout_len - 1, slots.len())));
        }

        self.tracked.clear();
        let mut status = Status::Success;
        for (index, slot) in slots.iter_mut().take(layout_len).enumerate() {
            let Some(slot) = slot else {
                continue;
            };

            let decoded = match self.decode_field(index) {
                Ok(decoded) => decoded,
                Err(err) => return Err(self.fail(err)),
            };
            **slot = Some(decoded.value);
            self.tracked.push(index);
            status = status.merge(decoded.status);
        }

        Ok(self.record(status))
    }

    /// Decodes every field of the layout into a vector.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyLayout`] when no layout is installed, otherwise the first
    /// error of [`decode_field`](Buffer::decode_field).
    pub fn decode_values(&self) -> Result<Vec<Value>> {
        let layout = self.layout.as_ref().ok_or(Error::EmptyLayout)?;
        (0..layout.len())
            .map(|index| self.decode_field(index).map(Decoded::into_value))
            .collect()
    }
}

/// Parses a numeric field, tolerating surrounding ASCII whitespace as
/// width-padded float formats produce it.
fn parse_number<T: FromStr>(index: usize, text: &str, field_type: FieldType) -> Result<T> {
    text.trim_matches(|c: char| c.is_ascii_whitespace())
        .parse()
        .map_err(|_| Error::parse(index, field_type, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClnOptions;

    fn layout_buffer(text: &str, layout: &[FieldType]) -> Buffer {
        let mut buffer = Buffer::from_text(text);
        buffer.set_layout(layout).unwrap();
        buffer
    }

    #[test]
    fn test_set_layout_empty() {
        let mut buffer = Buffer::new(4);
        assert_eq!(buffer.set_layout(&[]), Err(Error::EmptyLayout));
        assert_eq!(buffer.last_code(), -3);
        assert!(buffer.layout().is_none());
    }

    #[test]
    fn test_set_layout_replaces() {
        let mut buffer = Buffer::from_text("1,2");
        buffer.set_layout(&[FieldType::String]).unwrap();
        buffer
            .set_layout(&[FieldType::Int8, FieldType::Uint8])
            .unwrap();
        assert_eq!(
            buffer.layout().unwrap().as_slice(),
            &[FieldType::Int8, FieldType::Uint8]
        );

        assert!(buffer.set_layout(&[]).is_err());
        assert_eq!(buffer.layout().unwrap().len(), 2);
    }

    #[test]
    fn test_decode_escaped_string_and_int() {
        let buffer = layout_buffer("a\\,b,42", &[FieldType::String, FieldType::Int32]);
        assert_eq!(buffer.decode_field(0).unwrap().value, Value::from("a\\,b"));
        assert_eq!(buffer.decode_field(1).unwrap().value, Value::I32(42));
    }

    #[test]
    fn test_decode_with_unescape() {
        let options = ClnOptions::new().unescape_strings(true);
        let mut buffer = Buffer::read_with_options(Some("a\\,b,42"), options).unwrap();
        buffer.set_layout(&[FieldType::String, FieldType::Int32]).unwrap();
        assert_eq!(buffer.decode_field(0).unwrap().value, Value::from("a,b"));
    }

    #[test]
    fn test_decode_without_layout() {
        let buffer = Buffer::from_text("1");
        assert_eq!(buffer.decode_field(0), Err(Error::out_of_bounds(0, 0)));
    }

    #[test]
    fn test_decode_past_layout() {
        let buffer = layout_buffer("1,2,3", &[FieldType::Int8]);
        assert_eq!(buffer.decode_field(1), Err(Error::out_of_bounds(1, 1)));
    }

    #[test]
    fn test_decode_past_fields() {
        let buffer = layout_buffer("1", &[FieldType::Int8, FieldType::Int8]);
        assert_eq!(buffer.decode_field(1), Err(Error::out_of_bounds(1, 1)));
    }

    #[test]
    fn test_empty_field_any_type() {
        let buffer = layout_buffer(",5", &[FieldType::Int32, FieldType::Int32]);
        let decoded = buffer.decode_field(0).unwrap();
        assert_eq!(decoded.status, Status::EmptyString);
        assert_eq!(decoded.value, Value::String(String::new()));
        assert!(buffer.decode_as::<i32>(0).is_err());
        assert_eq!(buffer.decode_as::<i32>(1).unwrap(), 5);
    }

    #[test]
    fn test_numeric_parse_errors() {
        let buffer = layout_buffer(
            "abc,300,-1,1.5x,99999999999999999999",
            &[
                FieldType::Int32,
                FieldType::Int8,
                FieldType::Uint16,
                FieldType::Double,
                FieldType::Uint64,
            ],
        );
        for index in 0..5 {
            let err = buffer.decode_field(index).unwrap_err();
            assert_eq!(err.code(), -6, "field {}", index);
        }
        assert_eq!(
            buffer.decode_field(1).unwrap_err(),
            Error::parse(1, FieldType::Int8, "300")
        );
    }

    #[test]
    fn test_numeric_widths_and_padding() {
        let buffer = layout_buffer(
            "-128,65535,  3.50,+7,1e-05",
            &[
                FieldType::Int8,
                FieldType::Uint16,
                FieldType::Double,
                FieldType::Int64,
                FieldType::Float,
            ],
        );
        assert_eq!(
            buffer.decode_values().unwrap(),
            vec![
                Value::I8(-128),
                Value::U16(65535),
                Value::F64(3.5),
                Value::I64(7),
                Value::F32(1e-5),
            ]
        );
    }

    #[test]
    fn test_decode_all_skips_and_tracks() {
        let mut buffer = layout_buffer(
            "x,7,3.5",
            &[FieldType::String, FieldType::Int64, FieldType::Double],
        );
        let mut first = None;
        let mut third = None;
        let status = buffer
            .decode_all(&mut [Some(&mut first), None, Some(&mut third)])
            .unwrap();

        assert_eq!(status, Status::Success);
        assert_eq!(first, Some(Value::from("x")));
        assert_eq!(third, Some(Value::F64(3.5)));
        assert_eq!(buffer.tracked(), &[0, 2]);
    }

    #[test]
    fn test_decode_all_keeps_prefix_on_error() {
        let mut buffer = layout_buffer(
            "1,oops,3",
            &[FieldType::Int8, FieldType::Int8, FieldType::Int8],
        );
        let (mut a, mut b, mut c) = (None, None, None);
        let err = buffer
            .decode_all(&mut [Some(&mut a), Some(&mut b), Some(&mut c)])
            .unwrap_err();

        assert_eq!(err, Error::parse(1, FieldType::Int8, "oops"));
        assert_eq!(buffer.last_code(), -6);
        assert_eq!(a, Some(Value::I8(1)));
        assert_eq!(b, None);
        assert_eq!(c, None);
        assert_eq!(buffer.tracked(), &[0]);
    }

    #[test]
    fn test_decode_all_reports_empty_string() {
        let mut buffer = layout_buffer(
            "66,,412897124984.89245605468750000",
            &[FieldType::Uint8, FieldType::String, FieldType::Double],
        );
        let (mut a, mut b, mut c) = (None, None, None);
        let status = buffer
            .decode_all(&mut [Some(&mut a), Some(&mut b), Some(&mut c)])
            .unwrap();

        assert_eq!(status, Status::EmptyString);
        assert_eq!(a, Some(Value::U8(66)));
        assert_eq!(b, Some(Value::from("")));
        assert_eq!(c, Some(Value::F64(412897124984.89247981249)));
        assert_eq!(buffer.tracked(), &[0, 1, 2]);
    }

    #[test]
    fn test_decode_all_requires_layout_and_slots() {
        let mut buffer = Buffer::from_text("1,2");
        let mut a = None;
        assert_eq!(
            buffer.decode_all(&mut [Some(&mut a)]),
            Err(Error::EmptyLayout)
        );

        buffer.set_layout(&[FieldType::Int8, FieldType::Int8]).unwrap();
        assert_eq!(
            buffer.decode_all(&mut [Some(&mut a)]),
            Err(Error::out_of_bounds(1, 1))
        );
        assert_eq!(a, None);
    }

    #[test]
    fn test_decode_all_layout_longer_than_fields() {
        let mut buffer = layout_buffer("1", &[FieldType::Int8, FieldType::Int8]);
        let (mut a, mut b) = (None, None);
        let err = buffer
            .decode_all(&mut [Some(&mut a), Some(&mut b)])
            .unwrap_err();
        assert_eq!(err, Error::out_of_bounds(1, 1));
        assert_eq!(a, Some(Value::I8(1)));
    }
}
