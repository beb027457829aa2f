//! CLN encoding.
//!
//! Fields are appended one at a time. Each `append_*` method writes the
//! delimiter (unless this is the first field) followed by the field text, and
//! grows the buffer as needed.
//!
//! ## Usage
//!
//! ```rust
//! use cln::{Buffer, Status};
//!
//! let mut buffer = Buffer::new(0);
//! buffer.append_str(",,wow,,").unwrap();
//! buffer.append_int(737373).unwrap();
//! assert_eq!(buffer.as_str(), "\\,\\,wow\\,\\,,737373");
//!
//! // Empty strings still count as a field.
//! assert_eq!(buffer.append_str("").unwrap(), Status::EmptyString);
//! assert_eq!(buffer.count(), 3);
//! ```
//!
//! Strings are the only fields that can contain the delimiter, so they are the
//! only fields that get escaped. Float fields are produced by a printf-style
//! format string (see [`crate::format`]) and rejected if the chosen format
//! puts the delimiter into the output.

use crate::error::{Error, FormatErrorKind, Result, Status};
use crate::escape;
use crate::format::{format_float, DOUBLE_MAX_LENGTH, FLOAT_MAX_LENGTH};
use crate::value::Value;
use crate::Buffer;
use std::io::Write;

/// Scratch bytes for `i64::MIN` in base 10.
const INT64_MAX_LENGTH: usize = 22;
/// Scratch bytes for `u64::MAX` in base 10.
const UINT64_MAX_LENGTH: usize = 21;

impl Buffer {
    /// Appends pre-formatted text that is known to hold no unescaped delimiter.
    fn append_raw(&mut self, text: &str) {
        let bytes = text.as_bytes();
        if self.count == 0 {
            self.ensure_capacity(bytes.len());
            self.write_at(0, bytes);
        } else {
            let offset = self.size;
            self.ensure_capacity(offset + bytes.len() + 1);
            self.storage[offset] = self.delimiter();
            self.write_at(offset + 1, bytes);
        }
        self.count += 1;
    }

    /// Appends a string field, escaping unescaped delimiters.
    ///
    /// An empty `text` still adds a (zero-length) field and reports
    /// [`Status::EmptyString`].
    ///
    /// # Errors
    ///
    /// [`Error::TrailingEscape`] when `text` ends with `\`; the buffer is
    /// left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::Buffer;
    ///
    /// let mut buffer = Buffer::new(8);
    /// buffer.append_str("a,b").unwrap();
    /// buffer.append_int(42).unwrap();
    /// assert_eq!(buffer.as_str(), "a\\,b,42");
    /// ```
    pub fn append_str(&mut self, text: &str) -> Result<Status> {
        if text.is_empty() {
            self.append_raw("");
            return Ok(self.record(Status::EmptyString));
        }

        if text.as_bytes().last() == Some(&escape::ESCAPE) {
            return Err(self.fail(Error::TrailingEscape(text.to_string())));
        }

        let escaped = escape::escape(text, self.delimiter());
        self.append_raw(&escaped);
        Ok(self.record(Status::Success))
    }

    /// Appends a signed integer in base 10.
    pub fn append_int(&mut self, value: i64) -> Result<Status> {
        let mut scratch = [0u8; INT64_MAX_LENGTH];
        self.append_formatted(&mut scratch, format_args!("{}", value))
    }

    /// Appends an unsigned integer in base 10.
    pub fn append_uint(&mut self, value: u64) -> Result<Status> {
        let mut scratch = [0u8; UINT64_MAX_LENGTH];
        self.append_formatted(&mut scratch, format_args!("{}", value))
    }

    pub fn append_i8(&mut self, value: i8) -> Result<Status> {
        self.append_int(value.into())
    }

    pub fn append_i16(&mut self, value: i16) -> Result<Status> {
        self.append_int(value.into())
    }

    pub fn append_i32(&mut self, value: i32) -> Result<Status> {
        self.append_int(value.into())
    }

    pub fn append_u8(&mut self, value: u8) -> Result<Status> {
        self.append_uint(value.into())
    }

    pub fn append_u16(&mut self, value: u16) -> Result<Status> {
        self.append_uint(value.into())
    }

    pub fn append_u32(&mut self, value: u32) -> Result<Status> {
        self.append_uint(value.into())
    }

    fn append_formatted(
        &mut self,
        scratch: &mut [u8],
        args: std::fmt::Arguments<'_>,
    ) -> Result<Status> {
        let capacity = scratch.len();
        let mut cursor = &mut scratch[..];
        if cursor.write_fmt(args).is_err() {
            let err = Error::format(
                FormatErrorKind::Truncated,
                "{}",
                &format!("integer does not fit in {} bytes", capacity),
            );
            return Err(self.fail(err));
        }
        let written = capacity - cursor.len();

        let text = std::str::from_utf8(&scratch[..written]).unwrap_or_default();
        self.append_raw(text);
        Ok(self.record(Status::Success))
    }

    /// Appends an `f32` formatted with a printf-style `format` such as `"%f"`.
    ///
    /// # Errors
    ///
    /// [`Error::Format`] when the format is invalid, the output does not fit
    /// in 50 bytes, or the output contains the delimiter. The buffer is left
    /// unchanged.
    pub fn append_float(&mut self, value: f32, format: &str) -> Result<Status> {
        self.append_real(value.into(), format, FLOAT_MAX_LENGTH)
    }

    /// Appends an `f64` formatted with a printf-style `format` such as `"%.17f"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::Buffer;
    ///
    /// let mut buffer = Buffer::new(0);
    /// buffer.append_double(3.5, "%.2f").unwrap();
    /// assert_eq!(buffer.as_str(), "3.50");
    ///
    /// assert!(buffer.append_double(1.0, "%d").is_err());
    /// assert_eq!(buffer.count(), 1);
    /// ```
    pub fn append_double(&mut self, value: f64, format: &str) -> Result<Status> {
        self.append_real(value, format, DOUBLE_MAX_LENGTH)
    }

    fn append_real(&mut self, value: f64, format: &str, limit: usize) -> Result<Status> {
        let text = match format_float(value, format, limit) {
            Ok(text) => text,
            Err(err) => return Err(self.fail(err)),
        };

        if text.as_bytes().contains(&self.delimiter()) {
            let err = Error::format(
                FormatErrorKind::Delimiter,
                format,
                &format!("formatted value {:?} contains the field delimiter", text),
            );
            return Err(self.fail(err));
        }

        self.append_raw(&text);
        Ok(self.record(Status::Success))
    }

    /// Appends any [`Value`], using the configured float formats for
    /// `F32`/`F64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::{Buffer, Value};
    ///
    /// let mut buffer = Buffer::new(0);
    /// for value in [Value::from("x"), Value::from(7i64), Value::from(3.5f64)] {
    ///     buffer.append_value(&value).unwrap();
    /// }
    /// assert_eq!(buffer.as_str(), "x,7,3.5");
    /// ```
    pub fn append_value(&mut self, value: &Value) -> Result<Status> {
        match value {
            Value::String(s) => self.append_str(s),
            Value::I8(v) => self.append_i8(*v),
            Value::I16(v) => self.append_i16(*v),
            Value::I32(v) => self.append_i32(*v),
            Value::I64(v) => self.append_int(*v),
            Value::U8(v) => self.append_u8(*v),
            Value::U16(v) => self.append_u16(*v),
            Value::U32(v) => self.append_u32(*v),
            Value::U64(v) => self.append_uint(*v),
            Value::F32(v) => {
                let format = self.options.float_format.clone();
                self.append_float(*v, &format)
            }
            Value::F64(v) => {
                let format = self.options.double_format.clone();
                self.append_double(*v, &format)
            }
        }
    }
}
