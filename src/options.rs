//! Configuration options for CLN buffers.
//!
//! - [`ClnOptions`]: main configuration struct
//! - [`Delimiter`]: the byte that separates fields (comma, tab, or pipe)
//!
//! ## Examples
//!
//! ```rust
//! use cln::{Buffer, ClnOptions, Delimiter};
//!
//! let options = ClnOptions::new()
//!     .with_delimiter(Delimiter::Pipe)
//!     .with_double_format("%.3f");
//!
//! let mut buffer = Buffer::with_options(options);
//! buffer.append_str("a|b").unwrap();
//! buffer.append_int(7).unwrap();
//! assert_eq!(buffer.as_str(), "a\\|b|7");
//! ```

use serde::{Deserialize, Serialize};

/// Delimiter separating consecutive fields.
///
/// # Examples
///
/// ```rust
/// use cln::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_byte(), b',');
/// assert_eq!(Delimiter::Tab.as_byte(), b'\t');
/// assert_eq!(Delimiter::Pipe.as_byte(), b'|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Pipe => b'|',
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.as_byte() as char
    }
}

/// Configuration for a [`Buffer`](crate::Buffer).
///
/// Float formats use printf syntax (`%f`, `%.3e`, `%g`, ...), see
/// [`format_float`](crate::format::format_float).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClnOptions {
    pub delimiter: Delimiter,
    pub initial_capacity: usize,
    pub float_format: String,
    pub double_format: String,
    /// Reverse delimiter escaping when decoding `String` fields.
    pub unescape_strings: bool,
}

impl Default for ClnOptions {
    fn default() -> Self {
        ClnOptions {
            delimiter: Delimiter::default(),
            initial_capacity: 16,
            float_format: "%.9g".to_string(),
            double_format: "%.17g".to_string(),
            unescape_strings: false,
        }
    }
}

impl ClnOptions {
    /// Creates default options (comma delimiter, escaped strings on decode).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::{ClnOptions, Delimiter};
    ///
    /// let options = ClnOptions::new();
    /// assert_eq!(options.delimiter, Delimiter::Comma);
    /// assert!(!options.unescape_strings);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the format used by [`Buffer::append_value`](crate::Buffer::append_value) for `f32`.
    #[must_use]
    pub fn with_float_format(mut self, format: &str) -> Self {
        self.float_format = format.to_string();
        self
    }

    /// Sets the format used by [`Buffer::append_value`](crate::Buffer::append_value) for `f64`.
    #[must_use]
    pub fn with_double_format(mut self, format: &str) -> Self {
        self.double_format = format.to_string();
        self
    }

    /// Makes `String` fields decode to their original text instead of the
    /// escaped wire form.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::ClnOptions;
    ///
    /// let options = ClnOptions::new().unescape_strings(true);
    /// assert!(options.unescape_strings);
    /// ```
    #[must_use]
    pub fn unescape_strings(mut self, unescape: bool) -> Self {
        self.unescape_strings = unescape;
        self
    }
}
