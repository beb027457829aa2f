//! Compact Literal Notation format reference
//!
//! This module documents the CLN text format as implemented by this library.
//! It contains no code.
//!
//! # Records
//!
//! A record is a sequence of fields joined by a single delimiter byte. There
//! is no leading or trailing delimiter and no record terminator:
//!
//! ```text
//! x,7,3.5
//! ```
//!
//! The delimiter is `,` by default; [`Delimiter`](crate::Delimiter) also
//! offers tab and pipe. A record with `n` fields has exactly `n - 1` field
//! boundaries.
//!
//! # Field boundaries
//!
//! A delimiter byte is a boundary unless the byte before it is `\`. A
//! delimiter at the very start of the record is always a boundary, which is
//! how a leading empty field is written:
//!
//! ```text
//! ,42        two fields: "" and "42"
//! 66,,1.5    three fields: "66", "" and "1.5"
//! ```
//!
//! # Strings
//!
//! | Input      | Encoded      | Notes                                   |
//! |------------|--------------|-----------------------------------------|
//! | `abc`      | `abc`        | no delimiter, copied verbatim           |
//! | `a,b`      | `a\,b`       | delimiter escaped                       |
//! | `,,wow,,`  | `\,\,wow\,\,`| leading delimiter escaped too           |
//! | `a\,b`     | `a\,b`       | already escaped, not escaped again      |
//! | `c:\dir`   | `c:\dir`     | backslash without delimiter passes      |
//! | (empty)    | (empty)      | still a field, reported as `EmptyString`|
//!
//! Decoding a `string` field returns the encoded form (`a\,b`) unless
//! [`ClnOptions::unescape_strings`](crate::ClnOptions::unescape_strings) is
//! set. A string ending in `\` would make the following delimiter look
//! escaped, so the encoder rejects it with
//! [`Error::TrailingEscape`](crate::Error::TrailingEscape).
//!
//! # Numbers
//!
//! | Type              | Encoding                                 |
//! |-------------------|------------------------------------------|
//! | `i8`..`i64`       | base 10, optional leading `-`            |
//! | `u8`..`u64`       | base 10                                  |
//! | `f32`, `f64`      | printf-style format chosen by the caller |
//!
//! Numeric fields are parsed at their declared width. Surrounding ASCII
//! whitespace is ignored, so padded formats like `%8.2f` decode fine. Text
//! that does not parse, or overflows the width, is a
//! [`Error::Parse`](crate::Error::Parse).
//!
//! # Status codes
//!
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | `0`  | success                                   |
//! | `1`  | success, empty string field               |
//! | `-1` | index out of bounds                       |
//! | `-2` | missing input                             |
//! | `-3` | empty layout                              |
//! | `-5` | float formatting failed                   |
//! | `-6` | numeric field failed to parse             |
//! | `-7` | decoded value has a different type        |
//! | `-8` | string field ends with the escape byte    |
