//! Value type parsers for iCalendar (RFC 5545 §3.3).
//!
//! These accept the strict wire forms only. Lenient date input goes through
//! [`crate::rfc::ical::datetime`] instead.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{RfcError, RfcResult};

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns `InvalidDateFormat` if the string is not a valid 8-digit date.
pub fn parse_date(property: &str, s: &str) -> RfcResult<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RfcError::invalid_date(property, s));
    }

    let year = digits(&s[0..4]);
    let month = digits(&s[4..6]);
    let day = digits(&s[6..8]);

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .ok_or_else(|| RfcError::invalid_date(property, s))
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z"). A lowercase
/// `t` separator is accepted.
///
/// Returns the wall-clock fields and whether the UTC marker was present.
/// TZID is handled at the property level, not in the value itself.
///
/// ## Errors
/// Returns `InvalidDateFormat` if the string is not a valid date-time.
pub fn parse_datetime(property: &str, s: &str) -> RfcResult<(NaiveDateTime, bool)> {
    let (body, is_utc) = match s.strip_suffix(['Z', 'z']) {
        Some(stripped) => (stripped, true),
        None => (s, false),
    };

    if body.len() != 15 || !matches!(body.as_bytes()[8], b'T' | b't') {
        return Err(RfcError::invalid_date(property, s));
    }

    let date = parse_date(property, &body[..8]).map_err(|_e| RfcError::invalid_date(property, s))?;
    let time_str = &body[9..];
    if !time_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RfcError::invalid_date(property, s));
    }

    let time = NaiveTime::from_hms_opt(
        digits(&time_str[0..2]),
        digits(&time_str[2..4]),
        digits(&time_str[4..6]),
    )
    .ok_or_else(|| RfcError::invalid_date(property, s))?;

    Ok((date.and_time(time), is_utc))
}

/// Parses a UTC-OFFSET value (RFC 5545 §3.3.14).
///
/// Format: (+|-)HHMM[SS] (e.g., "+0530", "-0800")
///
/// ## Errors
/// Returns `TypeMismatch` if the string is not a valid UTC offset.
pub fn parse_utc_offset(property: &str, s: &str) -> RfcResult<FixedOffset> {
    let invalid = || RfcError::type_mismatch(property, "UTC offset (+|-)HHMM[SS]", s);

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(invalid()),
    };
    if !matches!(rest.len(), 4 | 6) || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours = digits(&rest[0..2]);
    let minutes = digits(&rest[2..4]);
    let seconds = if rest.len() == 6 { digits(&rest[4..6]) } else { 0 };
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    // -0000 is not a valid offset (RFC 5545 §3.3.14)
    let total = hours * 3600 + minutes * 60 + seconds;
    if sign < 0 && total == 0 {
        return Err(invalid());
    }

    i32::try_from(total)
        .ok()
        .and_then(|total| FixedOffset::east_opt(sign * total))
        .ok_or_else(invalid)
}

/// Parses an INTEGER value (RFC 5545 §3.3.8).
///
/// ## Errors
/// Returns `TypeMismatch` if the string is not a valid integer.
pub fn parse_integer(property: &str, s: &str) -> RfcResult<i64> {
    s.trim()
        .parse()
        .map_err(|_e| RfcError::type_mismatch(property, "integer", s))
}

/// Parses a FLOAT value (RFC 5545 §3.3.7).
///
/// ## Errors
/// Returns `TypeMismatch` if the string is not a valid floating-point number.
pub fn parse_float(property: &str, s: &str) -> RfcResult<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| RfcError::type_mismatch(property, "float", s))
}

/// Parses two `;`-separated floats, as in GEO (RFC 5545 §3.8.1.6).
///
/// ## Errors
/// Returns `TypeMismatch` if there are not exactly two valid floats.
pub fn parse_float_pair(property: &str, s: &str) -> RfcResult<(f64, f64)> {
    let Some((first, second)) = s.split_once(';') else {
        return Err(RfcError::type_mismatch(property, "float;float", s));
    };
    let invalid = |_e| RfcError::type_mismatch(property, "float;float", s);
    let first = parse_float(property, first).map_err(invalid)?;
    let second = parse_float(property, second).map_err(invalid)?;
    Ok((first, second))
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: `\\` `\,` `\;` `\n` `\N`. Any other backslash sequence
/// is kept literally.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    tracing::warn!(
                        sequence = %format!("\\{other}"),
                        "Unknown escape sequence kept literally"
                    );
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Reads a run of ASCII digits already validated by the caller.
fn digits(s: &str) -> u32 {
    s.bytes()
        .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}
