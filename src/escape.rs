//! Delimiter escaping and field boundary detection.
//!
//! A delimiter byte is a field boundary unless the byte right before it is the
//! escape byte `\`. A delimiter at offset 0 is always a boundary. String
//! content is escaped by turning every unescaped delimiter into the escape
//! pair `\<delimiter>`; delimiters that are already escaped stay as they are.

use std::borrow::Cow;
use std::ops::Range;

/// The byte that protects a following delimiter.
pub const ESCAPE: u8 = b'\\';

/// Returns true when `bytes[i]` is a delimiter that separates two fields.
#[inline]
pub fn is_boundary(bytes: &[u8], i: usize, delimiter: u8) -> bool {
    bytes[i] == delimiter && (i == 0 || bytes[i - 1] != ESCAPE)
}

/// Offsets of every unescaped delimiter in `bytes`.
pub fn boundaries(bytes: &[u8], delimiter: u8) -> impl Iterator<Item = usize> + '_ {
    (0..bytes.len()).filter(move |&i| is_boundary(bytes, i, delimiter))
}

/// Number of delimiters in `text` that [`escape`] would rewrite.
pub fn count_unescaped(text: &str, delimiter: u8) -> usize {
    boundaries(text.as_bytes(), delimiter).count()
}

/// Escapes every unescaped delimiter in `text`.
///
/// Returns the input untouched when there is nothing to escape.
///
/// # Examples
///
/// ```rust
/// use cln::escape::escape;
///
/// assert_eq!(escape(",,wow,,", b','), "\\,\\,wow\\,\\,");
/// assert_eq!(escape("a\\,b", b','), "a\\,b");
/// assert_eq!(escape("plain", b','), "plain");
/// ```
pub fn escape(text: &str, delimiter: u8) -> Cow<'_, str> {
    let pending = count_unescaped(text, delimiter);
    if pending == 0 {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut escaped = String::with_capacity(bytes.len() + pending);
    for (i, ch) in text.char_indices() {
        if is_boundary(bytes, i, delimiter) {
            escaped.push(ESCAPE as char);
        }
        escaped.push(ch);
    }

    Cow::Owned(escaped)
}

/// Reverses [`escape`]: every `\<delimiter>` pair becomes a bare delimiter.
///
/// Backslashes not followed by the delimiter pass through.
///
/// # Examples
///
/// ```rust
/// use cln::escape::unescape;
///
/// assert_eq!(unescape("a\\,b", b','), "a,b");
/// assert_eq!(unescape("c:\\dir", b','), "c:\\dir");
/// ```
pub fn unescape(text: &str, delimiter: u8) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if !bytes.windows(2).any(|w| w[0] == ESCAPE && w[1] == delimiter) {
        return Cow::Borrowed(text);
    }

    let delimiter = delimiter as char;
    let mut out = String::with_capacity(bytes.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE as char && chars.peek() == Some(&delimiter) {
            continue;
        }
        out.push(ch);
    }

    Cow::Owned(out)
}

/// Byte range of field `index` in `bytes`, escape pairs included.
///
/// Returns `None` when the text holds fewer than `index + 1` fields.
pub fn field_span(bytes: &[u8], index: usize, delimiter: u8) -> Option<Range<usize>> {
    let mut current = 0;
    let mut start = 0;
    for end in boundaries(bytes, delimiter) {
        if current == index {
            return Some(start..end);
        }
        current += 1;
        start = end + 1;
    }

    (current == index).then_some(start..bytes.len())
}

/// Number of fields in read-mode text.
///
/// Empty text is a single empty field, the same text an encoder writes for a
/// record holding one empty string.
pub fn count_fields(bytes: &[u8], delimiter: u8) -> usize {
    boundaries(bytes, delimiter).count() + 1
}
