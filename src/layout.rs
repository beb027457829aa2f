//! Field type descriptors.
//!
//! A [`Layout`] is an ordered list of [`FieldType`] tags, one per field, that
//! drives typed decoding. Layouts are plain data and can be stored alongside
//! the encoded text (for example as JSON through serde).
//!
//! ```rust
//! use cln::{FieldType, Layout};
//!
//! let layout = Layout::new(vec![FieldType::String, FieldType::Int32]);
//! assert_eq!(layout.len(), 2);
//! assert_eq!(layout.get(1), Some(FieldType::Int32));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a single field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,

    Int8,
    Int16,
    Int32,
    Int64,

    Uint8,
    Uint16,
    Uint32,
    Uint64,

    Float,
    Double,
}

impl FieldType {
    /// Rust-facing name of the decoded type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int8 => "i8",
            FieldType::Int16 => "i16",
            FieldType::Int32 => "i32",
            FieldType::Int64 => "i64",
            FieldType::Uint8 => "u8",
            FieldType::Uint16 => "u16",
            FieldType::Uint32 => "u32",
            FieldType::Uint64 => "u64",
            FieldType::Float => "f32",
            FieldType::Double => "f64",
        }
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, FieldType::String)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered field types for one buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    fields: Vec<FieldType>,
}

impl Layout {
    #[must_use]
    pub fn new(fields: Vec<FieldType>) -> Self {
        Layout { fields }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<FieldType> {
        self.fields.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = FieldType> + '_ {
        self.fields.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[FieldType] {
        &self.fields
    }
}

impl From<&[FieldType]> for Layout {
    fn from(fields: &[FieldType]) -> Self {
        Layout::new(fields.to_vec())
    }
}

impl From<Vec<FieldType>> for Layout {
    fn from(fields: Vec<FieldType>) -> Self {
        Layout::new(fields)
    }
}

impl FromIterator<FieldType> for Layout {
    fn from_iter<I: IntoIterator<Item = FieldType>>(iter: I) -> Self {
        Layout::new(iter.into_iter().collect())
    }
}
