//! Error and status types for CLN encoding and decoding.
//!
//! Every fallible operation returns a [`Result`]. Successful operations that
//! need to report the ambiguous "empty field" case return a [`Status`] instead
//! of `()`, so the caller can tell an empty string apart from a regular field.
//!
//! ## Error Categories
//!
//! - **Caller contract violations**: [`Error::OutOfBounds`],
//!   [`Error::InvalidPointer`], [`Error::EmptyLayout`],
//!   [`Error::TrailingEscape`]
//! - **Formatting failures**: [`Error::Format`], raised by the float formatter
//! - **Decoding failures**: [`Error::Parse`] for malformed numeric fields and
//!   [`Error::TypeMismatch`] for typed accessors
//!
//! ## Examples
//!
//! ```rust
//! use cln::{Buffer, Error};
//!
//! let mut buffer = Buffer::new(8);
//! let err = buffer.set_layout(&[]).unwrap_err();
//! assert!(matches!(err, Error::EmptyLayout));
//! assert_eq!(err.code(), -3);
//! ```

use crate::layout::FieldType;
use std::fmt;
use thiserror::Error;

/// Outcome of an operation that succeeded.
///
/// `EmptyString` is informational: the field was written or read, but it has
/// zero length. It never aborts a multi-field operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Success,
    EmptyString,
}

impl Status {
    /// Legacy integer code (`0` for success, `1` for an empty string).
    pub const fn code(self) -> i32 {
        match self {
            Status::Success => 0,
            Status::EmptyString => 1,
        }
    }

    pub const fn is_empty_string(self) -> bool {
        matches!(self, Status::EmptyString)
    }

    /// Folds two statuses, keeping `EmptyString` if either side reported it.
    pub(crate) fn merge(self, other: Status) -> Status {
        if self.is_empty_string() || other.is_empty_string() {
            Status::EmptyString
        } else {
            Status::Success
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => f.write_str("success"),
            Status::EmptyString => f.write_str("empty string"),
        }
    }
}

/// Why the float formatter refused to produce a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// Output did not fit in the scratch area.
    Truncated,
    /// The format string is not a supported printf float specifier.
    InvalidSpecifier,
    /// The formatted text contains the field delimiter.
    Delimiter,
}

impl fmt::Display for FormatErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatErrorKind::Truncated => f.write_str("output truncated"),
            FormatErrorKind::InvalidSpecifier => f.write_str("invalid format specifier"),
            FormatErrorKind::Delimiter => f.write_str("output contains the delimiter"),
        }
    }
}

/// All errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Field index past the layout or past the encoded fields.
    #[error("Index {index} is out of bounds (available: {available})")]
    OutOfBounds { index: usize, available: usize },

    /// A required input was absent.
    #[error("Invalid pointer provided to {0}")]
    InvalidPointer(String),

    /// `set_layout` was called with no tags.
    #[error("Layout must contain at least one field type")]
    EmptyLayout,

    /// The float formatter failed.
    #[error("Format error ({kind}) for format {format:?}: {msg}")]
    Format {
        kind: FormatErrorKind,
        format: String,
        msg: String,
    },

    /// A numeric field did not parse at its declared type.
    #[error("Cannot parse field {index} as {expected}: {text:?}")]
    Parse {
        index: usize,
        expected: FieldType,
        text: String,
    },

    /// A decoded value was requested as an incompatible Rust type.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A string field ends with the escape byte, which would hide the next
    /// field boundary.
    #[error("String {0:?} ends with an escape byte")]
    TrailingEscape(String),
}

impl Error {
    /// Creates an out-of-bounds error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::Error;
    ///
    /// let err = Error::out_of_bounds(4, 2);
    /// assert!(err.to_string().contains("Index 4"));
    /// ```
    pub fn out_of_bounds(index: usize, available: usize) -> Self {
        Error::OutOfBounds { index, available }
    }

    pub fn invalid_pointer(operation: &str) -> Self {
        Error::InvalidPointer(operation.to_string())
    }

    /// Creates a formatting error with a human-readable cause.
    pub fn format(kind: FormatErrorKind, format: &str, msg: &str) -> Self {
        Error::Format {
            kind,
            format: format.to_string(),
            msg: msg.to_string(),
        }
    }

    pub fn parse(index: usize, expected: FieldType, text: &str) -> Self {
        Error::Parse {
            index,
            expected,
            text: text.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::Error;
    ///
    /// let err = Error::type_mismatch("i32", "string");
    /// assert!(err.to_string().contains("expected i32"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Legacy integer code for this error.
    ///
    /// `-4` was reserved for an "empty string" error that never existed as a
    /// failure, so the numbering skips it.
    pub const fn code(&self) -> i32 {
        match self {
            Error::OutOfBounds { .. } => -1,
            Error::InvalidPointer(_) => -2,
            Error::EmptyLayout => -3,
            Error::Format { .. } => -5,
            Error::Parse { .. } => -6,
            Error::TypeMismatch { .. } => -7,
            Error::TrailingEscape(_) => -8,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
