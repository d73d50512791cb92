//! Parser and serializer for the tagged-line option format
//!
//! Each line is `<tag><name> <value>` where the tag is a single byte
//! (`i`, `d`, `t`), the name runs to the first space, and the value runs to
//! the end of the line. The buffer is walked as raw bytes; names and values
//! are recovered with lossy UTF-8 conversion.

use crate::error::StoreError;
use crate::store::{Entry, Value};
use crate::{TAG_DOUBLE, TAG_INT, TAG_TEXT};

/// Parse an entire file buffer into entries, in file order.
///
/// Duplicate (name, kind) pairs are returned as-is; the store's set path
/// collapses them. Any malformed line aborts the parse with the offset of
/// the line it occurred on, so no partial result is ever returned.
pub(crate) fn parse(buffer: &[u8]) -> Result<Vec<Entry>, StoreError> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while pos < buffer.len() {
        let line_start = pos;
        let line_end = buffer[pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(buffer.len(), |i| pos + i);
        let line = &buffer[line_start..line_end];
        pos = line_end + 1;

        // A bare line terminator carries no option
        if line.is_empty() {
            continue;
        }

        let tag = line[0];
        if tag != TAG_INT && tag != TAG_DOUBLE && tag != TAG_TEXT {
            return Err(StoreError::UnknownTag {
                tag: tag as char,
                offset: line_start,
            });
        }

        let rest = &line[1..];
        let space = rest
            .iter()
            .position(|&b| b == b' ')
            .ok_or(StoreError::UnterminatedName { offset: line_start })?;
        if space == 0 {
            return Err(StoreError::EmptyName { offset: line_start });
        }

        let name = String::from_utf8_lossy(&rest[..space]).into_owned();
        let raw = &rest[space + 1..];
        let value = match tag {
            TAG_INT => Value::Int(parse_int(raw)),
            TAG_DOUBLE => Value::Double(parse_double(raw)),
            _ => Value::Text(String::from_utf8_lossy(raw).into_owned()),
        };

        entries.push(Entry { name, value });
    }

    Ok(entries)
}

/// Serialize entries to file content, one line per entry in slice order
pub(crate) fn serialize(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let line = match &entry.value {
            Value::Int(v) => format!("{}{} {}\n", TAG_INT as char, entry.name, v),
            Value::Double(v) => format!("{}{} {:.6}\n", TAG_DOUBLE as char, entry.name, v),
            Value::Text(v) => format!("{}{} {}\n", TAG_TEXT as char, entry.name, v),
        };
        out.push_str(&line);
    }
    out
}

/// Lenient decimal integer conversion, `atoi`-style: leading ASCII
/// whitespace and an optional sign are skipped, digits are consumed until
/// the first non-digit, and a value with no digits is 0.
fn parse_int(raw: &[u8]) -> i64 {
    let mut s = raw;
    while let Some((&b, rest)) = s.split_first() {
        if !b.is_ascii_whitespace() {
            break;
        }
        s = rest;
    }

    let mut negative = false;
    if let Some((&b, rest)) = s.split_first()
        && (b == b'+' || b == b'-')
    {
        negative = b == b'-';
        s = rest;
    }

    let mut value: i64 = 0;
    for &b in s {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add((b - b'0') as i64);
    }

    if negative { -value } else { value }
}

/// Lenient floating-point conversion, `strtod`-style: converts the longest
/// valid numeric prefix after leading whitespace, 0.0 if there is none.
fn parse_double(raw: &[u8]) -> f64 {
    let text = String::from_utf8_lossy(raw);
    float_prefix(text.trim_start()).parse().unwrap_or(0.0)
}

/// Longest prefix of `s` that is a valid decimal float: optional sign,
/// digits with an optional fractional part, optional exponent.
fn float_prefix(s: &str) -> &str {
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    let mut digits = 0;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return "";
    }

    // Exponent only counts if at least one digit follows it
    let mantissa_end = i;
    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        i = if j > exp_start { j } else { mantissa_end };
    }

    &s[..i]
}
