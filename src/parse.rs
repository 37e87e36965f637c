// Copyright 2025 Pavel Roskin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decoding `key=value` nodes and the top-level lookup

use crate::{
    MAX_NAME,
    extract::{LineTooLong, Lines},
    locate::locate_section,
};

/// Characters that `\` may escape inside a string value
///
/// See <https://en.wikipedia.org/wiki/INI_file#Escape_characters>
const ESCAPE_CHARS: [u8; 6] = [b'"', b';', b'#', b':', b'=', b'\\'];

/// Length of the longest boolean token, `false`
const MAX_BOOL_TOKEN: usize = 5;

const BOOL_TOKENS: [(&[u8], bool); 8] = [
    (b"1", true),
    (b"yes", true),
    (b"on", true),
    (b"true", true),
    (b"0", false),
    (b"no", false),
    (b"off", false),
    (b"false", false),
];

/// Declared type of the value to decode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    /// NUL-terminated byte string written into the output buffer
    String,
    /// Signed 32-bit integer written as 4 native-endian bytes
    Integer,
    /// Single byte, 1 for true and 0 for false
    Boolean,
}

/// Errors reported when looking up a key
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// No `[section]` header matches the requested section
    #[error("Section not found")]
    SectionNotFound,
    /// No line in the searched region yields the requested key and type
    #[error("Key not found")]
    KeyNotFound,
    /// A candidate line does not fit the bounded line buffer
    #[error("Line too long")]
    LineTooLong(#[from] LineTooLong),
    /// The output buffer cannot hold a value of the declared type
    #[error("Output buffer too small")]
    OutputTooSmall,
    /// The decoded value does not fit the output buffer
    #[error("Value exceeds the output buffer")]
    ValueTooLong,
    /// A quoted string is still open at the end of the line
    #[error("Unterminated quote")]
    UnterminatedQuote,
    /// A `\` escape is still pending at the end of the value
    #[error("Dangling escape")]
    DanglingEscape,
    /// The value contains a byte that is not a decimal digit
    #[error("Invalid integer value")]
    InvalidInteger,
    /// The value does not fit a signed 32-bit integer
    #[error("Integer value out of range")]
    IntegerOverflow,
    /// The value is not a recognized boolean token
    #[error("Invalid boolean value")]
    InvalidBoolean,
}

/// Look up `key` in the configuration buffer and decode its value
///
/// With a section name, the search is scoped to the body of the first
/// matching `[section]` header, up to the next header. Without one, the
/// whole buffer is searched and headers are skipped over.
///
/// Lines are handed to the node decoder in order; the first line whose key
/// matches and whose value decodes as `value_type` wins. A line that fails
/// to decode is passed over and the scan continues, so the lookup reports
/// [`Error::KeyNotFound`] when the region is exhausted. The one hard stop is
/// a line exceeding the bounded line capacity.
///
/// On success the output buffer holds, per [`ValueType`]: a NUL-terminated
/// byte string, a 4-byte native-endian `i32`, or a single 0/1 byte. On
/// failure the buffer contents are unspecified.
pub fn get_key(
    section: Option<&[u8]>,
    key: &[u8],
    config: &[u8],
    out: &mut [u8],
    value_type: ValueType,
) -> Result<(), Error> {
    let start = match section {
        Some(name) => locate_section(name, config).ok_or(Error::SectionNotFound)?,
        None => 0,
    };

    for line in Lines::new(config, start, section.is_some(), out.len()) {
        if decode_node(line?, key, out, value_type).is_ok() {
            return Ok(());
        }
    }
    Err(Error::KeyNotFound)
}

/// Decode one `key=value` line
///
/// The left-hand side of the first `=` must equal `key` byte for byte;
/// there is no whitespace trimming. Anything else rejects the line so the
/// caller can try the next one.
fn decode_node(
    line: &[u8],
    key: &[u8],
    out: &mut [u8],
    value_type: ValueType,
) -> Result<(), Error> {
    let separator = line
        .iter()
        .position(|&b| b == b'=')
        .ok_or(Error::KeyNotFound)?;
    let (name, value) = (&line[..separator], &line[separator + 1..]);
    if name.len() > MAX_NAME || name != key {
        return Err(Error::KeyNotFound);
    }

    match value_type {
        ValueType::String => decode_string(value, out),
        ValueType::Integer => {
            if out.len() < size_of::<i32>() {
                return Err(Error::OutputTooSmall);
            }
            let number = decode_integer(trim_comment(value))?;
            out[..size_of::<i32>()].copy_from_slice(&number.to_ne_bytes());
            Ok(())
        }
        ValueType::Boolean => {
            if out.is_empty() {
                return Err(Error::OutputTooSmall);
            }
            out[0] = u8::from(decode_boolean(trim_comment(value))?);
            Ok(())
        }
    }
}

/// Cut the value at the first comment character
///
/// Used for integer and boolean values, where quoting and escapes do not
/// apply. String values handle comment characters in their decode loop.
fn trim_comment(value: &[u8]) -> &[u8] {
    let end = value
        .iter()
        .position(|&b| b == b'#' || b == b';')
        .unwrap_or(value.len());
    &value[..end]
}

fn push(out: &mut [u8], written: &mut usize, byte: u8) -> Result<(), Error> {
    // reserve one byte for the NUL terminator
    if *written + 1 >= out.len() {
        return Err(Error::ValueTooLong);
    }
    out[*written] = byte;
    *written += 1;
    Ok(())
}

/// Decode a string value into a NUL-terminated byte string
///
/// A leading `"` enters quote mode: the value runs to the closing `"` and
/// trailing bytes on the line are ignored. Outside quote mode an unescaped
/// `#` or `;` truncates the value as a trailing comment. `\` escapes one of
/// the characters in [`ESCAPE_CHARS`]; for any other byte the backslash is
/// emitted literally and the byte is processed again as if freshly read.
fn decode_string(value: &[u8], out: &mut [u8]) -> Result<(), Error> {
    let (quoted, value) = match value.split_first() {
        Some((b'"', rest)) => (true, rest),
        _ => (false, value),
    };

    let mut written = 0;
    let mut escape = false;
    let mut closed = false;

    let mut pos = 0;
    while pos < value.len() {
        let byte = value[pos];
        if escape {
            escape = false;
            if ESCAPE_CHARS.contains(&byte) {
                push(out, &mut written, byte)?;
                pos += 1;
            } else {
                // not a recognized escape: the backslash stands for itself
                // and this byte is re-processed from scratch
                push(out, &mut written, b'\\')?;
            }
            continue;
        }
        match byte {
            b'\\' => escape = true,
            b'"' if quoted => {
                closed = true;
                break;
            }
            b'#' | b';' if !quoted => break,
            _ => push(out, &mut written, byte)?,
        }
        pos += 1;
    }

    if escape {
        return Err(Error::DanglingEscape);
    }
    if quoted && !closed {
        return Err(Error::UnterminatedQuote);
    }
    if written >= out.len() {
        return Err(Error::ValueTooLong);
    }
    out[written] = 0;
    Ok(())
}

/// Decode a signed decimal integer
///
/// Digits accumulate as a negative running total so that `i32::MIN` stays
/// representable; the total is negated at the end unless a leading `-` was
/// seen. An empty digit string fails.
fn decode_integer(token: &[u8]) -> Result<i32, Error> {
    let (negative, digits) = match token.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, token),
    };
    if digits.is_empty() {
        return Err(Error::InvalidInteger);
    }

    let mut total: i32 = 0;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(Error::InvalidInteger);
        }
        total = total
            .checked_mul(10)
            .and_then(|t| t.checked_sub(i32::from(byte - b'0')))
            .ok_or(Error::IntegerOverflow)?;
    }

    if negative {
        Ok(total)
    } else {
        total.checked_neg().ok_or(Error::IntegerOverflow)
    }
}

/// Decode a human-readable boolean token
///
/// The token is matched case-sensitively and length-exactly against the
/// lowercase lexicon; `On` and `TRUE` are rejected.
fn decode_boolean(token: &[u8]) -> Result<bool, Error> {
    if token.len() > MAX_BOOL_TOKEN {
        return Err(Error::InvalidBoolean);
    }
    for (text, value) in BOOL_TOKENS {
        if token == text {
            return Ok(value);
        }
    }
    Err(Error::InvalidBoolean)
}
