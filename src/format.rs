//! printf-style formatting for floating-point fields.
//!
//! Float fields are written with a caller-supplied format string such as
//! `"%f"`, `"%.17f"`, `"%+.3e"` or `"%g"`. The supported grammar is
//!
//! ```text
//! literal* '%' flags* width? ('.' precision?)? length? conversion literal*
//! flags      = '-' | '+' | ' ' | '0' | '#'
//! length     = 'l' | 'L'
//! conversion = 'f' | 'F' | 'e' | 'E' | 'g' | 'G'
//! ```
//!
//! `%%` produces a literal percent sign. Exactly one conversion is required.
//! The result must fit in a fixed scratch area, mirroring a bounded
//! `snprintf`: [`FLOAT_MAX_LENGTH`] bytes for `f32` and [`DOUBLE_MAX_LENGTH`]
//! bytes for `f64`, terminator included.

use crate::error::{Error, FormatErrorKind, Result};

/// Scratch bytes for a formatted `f32`, terminator included.
pub const FLOAT_MAX_LENGTH: usize = 50;
/// Scratch bytes for a formatted `f64`, terminator included.
pub const DOUBLE_MAX_LENGTH: usize = 350;

const DEFAULT_PRECISION: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Conversion {
    Fixed,
    Exponent,
    General,
}

#[derive(Clone, Copy, Debug, Default)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alternate: bool,
}

#[derive(Clone, Copy, Debug)]
struct FloatSpec {
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    conversion: Conversion,
    uppercase: bool,
}

/// Formats `value` according to the printf-style `format`.
///
/// Fails with [`Error::Format`] when the format string is not a single float
/// conversion, or when the output needs more than `limit - 1` bytes.
///
/// # Examples
///
/// ```rust
/// use cln::format::{format_float, DOUBLE_MAX_LENGTH};
///
/// assert_eq!(format_float(3.5, "%f", DOUBLE_MAX_LENGTH).unwrap(), "3.500000");
/// assert_eq!(format_float(1234.5, "%.2e", DOUBLE_MAX_LENGTH).unwrap(), "1.23e+03");
/// assert_eq!(format_float(0.0001, "%g", DOUBLE_MAX_LENGTH).unwrap(), "0.0001");
/// ```
pub fn format_float(value: f64, format: &str, limit: usize) -> Result<String> {
    let mut out = String::new();
    let mut converted = false;
    let mut rest = format;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        if let Some(after) = rest.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }
        if converted {
            return Err(invalid(format, "more than one conversion in format string"));
        }

        let (spec, after) = parse_spec(rest, format)?;
        if spec.width >= limit || spec.precision.map_or(false, |p| p >= limit) {
            return Err(truncated(format, spec.width.max(spec.precision.unwrap_or(0)) + 1, limit));
        }
        write_float(&mut out, value, &spec);
        converted = true;
        rest = after;
    }
    out.push_str(rest);

    if !converted {
        return Err(invalid(format, "format string has no float conversion"));
    }
    if out.len() >= limit {
        return Err(truncated(format, out.len() + 1, limit));
    }

    Ok(out)
}

fn truncated(format: &str, needed: usize, limit: usize) -> Error {
    Error::format(
        FormatErrorKind::Truncated,
        format,
        &format!(
            "output needs at least {} bytes but only {} fit in the buffer",
            needed, limit
        ),
    )
}

fn invalid(format: &str, msg: &str) -> Error {
    Error::format(FormatErrorKind::InvalidSpecifier, format, msg)
}

/// Parses the part of a conversion following `%`.
fn parse_spec<'a>(spec: &'a str, format: &str) -> Result<(FloatSpec, &'a str)> {
    let bytes = spec.as_bytes();
    let mut i = 0;
    let mut flags = Flags::default();

    while let Some(&b) = bytes.get(i) {
        match b {
            b'-' => flags.left = true,
            b'+' => flags.plus = true,
            b' ' => flags.space = true,
            b'0' => flags.zero = true,
            b'#' => flags.alternate = true,
            _ => break,
        }
        i += 1;
    }

    let (width, next) = parse_number(bytes, i, format)?;
    i = next;

    let mut precision = None;
    if bytes.get(i) == Some(&b'.') {
        let (digits, next) = parse_number(bytes, i + 1, format)?;
        precision = Some(digits);
        i = next;
    }

    if matches!(bytes.get(i), Some(b'l') | Some(b'L')) {
        i += 1;
    }

    let (conversion, uppercase) = match bytes.get(i) {
        Some(b'f') => (Conversion::Fixed, false),
        Some(b'F') => (Conversion::Fixed, true),
        Some(b'e') => (Conversion::Exponent, false),
        Some(b'E') => (Conversion::Exponent, true),
        Some(b'g') => (Conversion::General, false),
        Some(b'G') => (Conversion::General, true),
        Some(b'*') => return Err(invalid(format, "'*' width and precision are not supported")),
        Some(_) => return Err(invalid(format, "conversion is not a float conversion")),
        None => return Err(invalid(format, "format string ends inside a conversion")),
    };

    let spec_out = FloatSpec {
        flags,
        width,
        precision,
        conversion,
        uppercase,
    };
    Ok((spec_out, &spec[i + 1..]))
}

fn parse_number(bytes: &[u8], start: usize, format: &str) -> Result<(usize, usize)> {
    let mut i = start;
    let mut n: usize = 0;
    while let Some(&b) = bytes.get(i) {
        if !b.is_ascii_digit() {
            break;
        }
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add(usize::from(b - b'0')))
            .ok_or_else(|| invalid(format, "width or precision is too large"))?;
        i += 1;
    }
    Ok((n, i))
}

fn write_float(out: &mut String, value: f64, spec: &FloatSpec) {
    let negative = value.is_sign_negative();
    let sign = if negative {
        "-"
    } else if spec.flags.plus {
        "+"
    } else if spec.flags.space {
        " "
    } else {
        ""
    };

    let magnitude = value.abs();
    let body = if magnitude.is_nan() {
        "nan".to_string()
    } else if magnitude.is_infinite() {
        "inf".to_string()
    } else {
        match spec.conversion {
            Conversion::Fixed => fixed(magnitude, spec.precision.unwrap_or(DEFAULT_PRECISION), spec),
            Conversion::Exponent => {
                exponent(magnitude, spec.precision.unwrap_or(DEFAULT_PRECISION), spec)
            }
            Conversion::General => general(magnitude, spec),
        }
    };
    let body = if spec.uppercase {
        body.to_ascii_uppercase()
    } else {
        body
    };

    let len = sign.len() + body.len();
    let pad = spec.width.saturating_sub(len);
    if spec.flags.left {
        out.push_str(sign);
        out.push_str(&body);
        out.extend(std::iter::repeat(' ').take(pad));
    } else if spec.flags.zero && magnitude.is_finite() {
        out.push_str(sign);
        out.extend(std::iter::repeat('0').take(pad));
        out.push_str(&body);
    } else {
        out.extend(std::iter::repeat(' ').take(pad));
        out.push_str(sign);
        out.push_str(&body);
    }
}

fn fixed(magnitude: f64, precision: usize, spec: &FloatSpec) -> String {
    let mut s = format!("{:.*}", precision, magnitude);
    if precision == 0 && spec.flags.alternate {
        s.push('.');
    }
    s
}

/// `d.ddde±XX`, with at least two exponent digits.
fn exponent(magnitude: f64, precision: usize, spec: &FloatSpec) -> String {
    let (mut mantissa, exp) = split_exponent(magnitude, precision);
    if precision == 0 && spec.flags.alternate {
        mantissa.push('.');
    }
    join_exponent(&mantissa, exp)
}

fn general(magnitude: f64, spec: &FloatSpec) -> String {
    let precision = match spec.precision {
        None => DEFAULT_PRECISION,
        Some(0) => 1,
        Some(p) => p,
    };

    let exp = if magnitude == 0.0 {
        0
    } else {
        split_exponent(magnitude, precision - 1).1
    };

    let use_fixed = exp >= -4 && (exp as i64) < precision as i64;
    if use_fixed {
        let decimals = (precision as i64 - 1 - exp as i64).max(0) as usize;
        let mut s = format!("{:.*}", decimals, magnitude);
        if spec.flags.alternate {
            if !s.contains('.') {
                s.push('.');
            }
        } else {
            strip_zeros(&mut s);
        }
        s
    } else {
        let (mut mantissa, exp) = split_exponent(magnitude, precision - 1);
        if spec.flags.alternate {
            if !mantissa.contains('.') {
                mantissa.push('.');
            }
        } else {
            strip_zeros(&mut mantissa);
        }
        join_exponent(&mantissa, exp)
    }
}

/// Rounds to `precision` decimals in scientific form and splits off the exponent.
fn split_exponent(magnitude: f64, precision: usize) -> (String, i32) {
    let s = format!("{:.*e}", precision, magnitude);
    match s.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

fn join_exponent(mantissa: &str, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs())
}

fn strip_zeros(s: &mut String) {
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
}
