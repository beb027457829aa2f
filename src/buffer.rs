//! The owned, growable text buffer.
//!
//! A [`Buffer`] owns one contiguous byte region of `capacity + 1` bytes. The
//! first `len()` bytes hold the encoded fields and the byte right after them
//! is always `0`, so the region can be handed to code expecting a
//! null-terminated string through [`Buffer::as_bytes_with_nul`].
//!
//! Capacity grows by doubling so that a run of appends costs amortized
//! O(1) per byte. [`Buffer::trim`] gives the slack back.
//!
//! Encoding lives in [`ser`](crate::ser), decoding in [`de`](crate::de).

use crate::error::{Error, Result, Status};
use crate::escape;
use crate::layout::Layout;
use crate::options::ClnOptions;
use std::fmt;
use std::str::FromStr;

/// Encoded CLN text plus the layout used to decode it.
#[derive(Clone, Debug)]
pub struct Buffer {
    /// Always `capacity + 1` bytes long.
    pub(crate) storage: Vec<u8>,
    pub(crate) size: usize,
    pub(crate) count: usize,
    pub(crate) layout: Option<Layout>,
    /// Field indices handed out by the last bulk decode.
    pub(crate) tracked: Vec<usize>,
    pub(crate) last_code: i32,
    pub(crate) options: ClnOptions,
}

impl Buffer {
    /// Creates an empty buffer able to hold `initial_capacity` bytes
    /// (at least one) before it has to grow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::Buffer;
    ///
    /// let buffer = Buffer::new(0);
    /// assert_eq!(buffer.capacity(), 1);
    /// assert_eq!(buffer.len(), 0);
    /// assert_eq!(buffer.count(), 0);
    /// ```
    pub fn new(initial_capacity: usize) -> Self {
        Self::with_capacity_and_options(initial_capacity, ClnOptions::default())
    }

    /// Creates an empty buffer configured by `options`.
    pub fn with_options(options: ClnOptions) -> Self {
        Self::with_capacity_and_options(options.initial_capacity, options)
    }

    fn with_capacity_and_options(initial_capacity: usize, options: ClnOptions) -> Self {
        let capacity = initial_capacity.max(1);
        Buffer {
            storage: vec![0; capacity + 1],
            size: 0,
            count: 0,
            layout: None,
            tracked: Vec::new(),
            last_code: Status::Success.code(),
            options,
        }
    }

    /// Wraps existing encoded text for decoding (read mode).
    ///
    /// Fails with [`Error::InvalidPointer`] when `source` is `None`. The field
    /// count is recovered by scanning for unescaped delimiters; empty text
    /// holds one empty field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::{Buffer, Error};
    ///
    /// let buffer = Buffer::read(Some("frivolous\\,\\,!!!!,82,73")).unwrap();
    /// assert_eq!(buffer.count(), 3);
    ///
    /// assert!(matches!(Buffer::read(None), Err(Error::InvalidPointer(_))));
    /// ```
    pub fn read(source: Option<&str>) -> Result<Self> {
        Self::read_with_options(source, ClnOptions::default())
    }

    /// Read-mode constructor that splits fields on `options.delimiter`.
    pub fn read_with_options(source: Option<&str>, options: ClnOptions) -> Result<Self> {
        let source = source.ok_or_else(|| Error::invalid_pointer("Buffer::read"))?;

        let mut buffer = Self::with_capacity_and_options(source.len(), options);
        buffer.write_at(0, source.as_bytes());
        buffer.count = escape::count_fields(source.as_bytes(), buffer.delimiter());
        Ok(buffer)
    }

    /// Read-mode constructor for text that is known to be present.
    pub fn from_text(source: &str) -> Self {
        match Self::read_with_options(Some(source), ClnOptions::default()) {
            Ok(buffer) => buffer,
            Err(_) => unreachable!("read mode only fails on missing text"),
        }
    }

    /// Grows the capacity, doubling it until at least `needed` bytes fit.
    ///
    /// Does nothing when the buffer is already large enough.
    pub fn ensure_capacity(&mut self, needed: usize) {
        let old = self.capacity();
        if old >= needed {
            return;
        }

        let mut capacity = old.max(1);
        while capacity < needed {
            capacity = capacity.checked_mul(2).unwrap_or(needed);
        }

        log::trace!("growing buffer capacity from {} to {} bytes", old, capacity);
        self.storage.resize(capacity + 1, 0);
    }

    /// Shrinks the capacity to exactly the used length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::Buffer;
    ///
    /// let mut buffer = Buffer::new(64);
    /// buffer.append_int(737373).unwrap();
    /// buffer.trim();
    /// assert_eq!(buffer.capacity(), 6);
    /// buffer.trim();
    /// assert_eq!(buffer.capacity(), 6);
    /// ```
    pub fn trim(&mut self) {
        if self.capacity() == self.size {
            return;
        }

        log::trace!(
            "trimming buffer capacity from {} to {} bytes",
            self.capacity(),
            self.size
        );
        self.storage.truncate(self.size + 1);
        self.storage.shrink_to_fit();
    }

    /// Copies `bytes` to `offset` and moves the terminator after them.
    ///
    /// The caller must have reserved `offset + bytes.len()` bytes.
    pub(crate) fn write_at(&mut self, offset: usize, bytes: &[u8]) {
        let end = offset + bytes.len();
        self.storage[offset..end].copy_from_slice(bytes);
        self.storage[end] = 0;
        self.size = end;
    }

    /// Records the outcome of a mutating operation in the status slot.
    pub(crate) fn record(&mut self, status: Status) -> Status {
        self.last_code = status.code();
        status
    }

    pub(crate) fn fail(&mut self, err: Error) -> Error {
        self.last_code = err.code();
        err
    }

    pub(crate) fn delimiter(&self) -> u8 {
        self.options.delimiter.as_byte()
    }

    /// Bytes of encoded text, terminator excluded.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Allocated bytes, terminator excluded.
    pub fn capacity(&self) -> usize {
        self.storage.len() - 1
    }

    /// Number of fields appended (or found, in read mode).
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.size]
    }

    /// Encoded text followed by its `0` terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.storage[..=self.size]
    }

    pub fn as_str(&self) -> &str {
        // Only `&str` content and ASCII delimiters are ever written.
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn into_string(self) -> String {
        self.as_str().to_string()
    }

    /// Iterates over the raw (still escaped) text of every field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cln::Buffer;
    ///
    /// let buffer = Buffer::from_text("a\\,b,42");
    /// let fields: Vec<&str> = buffer.fields().collect();
    /// assert_eq!(fields, ["a\\,b", "42"]);
    /// ```
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        let text = self.as_str();
        let mut start = 0;
        escape::boundaries(text.as_bytes(), self.delimiter())
            .chain(std::iter::once(text.len()))
            .take(self.count)
            .map(move |end| {
                let field = &text[start..end];
                start = end + 1;
                field
            })
    }

    pub fn options(&self) -> &ClnOptions {
        &self.options
    }

    /// Field indices produced by the most recent [`decode_all`](Buffer::decode_all).
    pub fn tracked(&self) -> &[usize] {
        &self.tracked
    }

    /// Legacy code of the last mutating operation (`0` on success).
    pub fn last_code(&self) -> i32 {
        self.last_code
    }

    /// Releases the text, the layout and the decode tracking record.
    ///
    /// Equivalent to dropping the buffer.
    pub fn release(self) {
        log::trace!(
            "releasing buffer with {} fields and {} tracked values",
            self.count,
            self.tracked.len()
        );
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer::with_options(ClnOptions::default())
    }
}

impl FromStr for Buffer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Buffer::from_text(s))
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
