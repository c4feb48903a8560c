//! Canonicalization of temporal property values.

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::{
    Instant, LOCAL_TIME_MARKER, PropertyValue, Value, Zone, param_names,
};
use crate::rfc::ical::parse::{parse_date, parse_datetime};

use super::heuristic;
use super::timezone::{is_utc_name, parse_offset_token, resolve_offset, resolve_tzid, resolve_zone};

/// Normalizes a DATE or DATE-TIME property value.
///
/// The returned value holds an [`Instant`] and a parameter set where exactly
/// one of these holds: no TZID and no local-time marker (UTC or DATE), a
/// TZID naming the zone, or the local-time marker (floating).
///
/// An explicit TZID parameter wins over a zone token in the text; the value
/// is converted into it. With `force_utc`, DATE-TIME values always end up
/// in UTC.
///
/// ## Errors
/// - `InvalidDateFormat` if the text is not a recognizable date.
/// - `UnknownTimezone` if a TZID or zone token does not resolve.
/// - `TypeMismatch` if the value is neither text nor an instant.
#[tracing::instrument(level = "debug", skip(value))]
pub fn normalize(property: &str, value: PropertyValue, force_utc: bool) -> RfcResult<PropertyValue> {
    let mut pv = value;

    let tzid_zone = match pv.get_param(param_names::TZID).map(str::trim) {
        Some(tzid) if !tzid.is_empty() => Some(resolve_zone(property, tzid)?),
        _ => None,
    };

    let marked_local = pv.is_local_time() && tzid_zone.is_none();
    let source = match pv.value.expect_scalar(property)? {
        // A marker inherited from a floating start keeps the wall clock as-is
        Value::Instant(instant) if marked_local && !instant.is_date() => {
            Instant::floating(instant.local())
        }
        Value::Instant(instant) => *instant,
        Value::Text(text) => parse_text(property, text)?,
        other => {
            return Err(RfcError::type_mismatch(
                property,
                "date or date-time",
                other.type_name(),
            ));
        }
    };

    // Floating wall-clock fields are read in the TZID zone before anything else
    let zoned = tzid_zone.map_or(source, |zone| source.rebase(zone));

    let is_date = pv.is_date_kind() || zoned.is_date();
    let instant = if is_date {
        zoned.to_date()
    } else if force_utc {
        zoned.rebase(Zone::Utc)
    } else if let Some(Zone::Fixed(offset)) = zoned.zone() {
        zoned.rebase(resolve_offset(offset))
    } else {
        zoned
    };

    tracing::trace!(%instant, "Disposition chosen");
    pv.set_value(instant);
    conform_params(&mut pv, &instant);
    Ok(pv)
}

/// Rewrites the parameter set to match the instant's disposition.
fn conform_params(pv: &mut PropertyValue, instant: &Instant) {
    pv.remove_param(param_names::VALUE, &[param_names::DATE_TIME]);

    match instant.zone() {
        None => {
            pv.remove_param(param_names::TZID, &[]);
            pv.remove_param(LOCAL_TIME_MARKER, &[]);
            pv.add_param(param_names::VALUE, param_names::DATE, true);
        }
        Some(Zone::Floating) => {
            pv.remove_param(param_names::TZID, &[]);
            pv.add_param(LOCAL_TIME_MARKER, "TRUE", true);
        }
        Some(Zone::Named(tz)) => {
            pv.add_param(param_names::TZID, tz.name(), true);
            pv.remove_param(LOCAL_TIME_MARKER, &[]);
        }
        Some(Zone::Utc | Zone::Fixed(_)) => {
            pv.remove_param(param_names::TZID, &[]);
            pv.remove_param(LOCAL_TIME_MARKER, &[]);
        }
    }
}

/// Parses textual date input into an instant.
///
/// The compact wire form is tried first, then offset-bearing layouts, then
/// zone-less layouts with an optional trailing zone token. Text without any
/// zone information yields a floating value.
fn parse_text(property: &str, raw: &str) -> RfcResult<Instant> {
    let s = raw.trim();
    let (date_str, zone_token) = split_date_and_zone(s);

    let base = if is_compact(date_str) {
        parse_compact(property, date_str)?
    } else if let Some(dt) = heuristic::parse_with_offset(s) {
        tracing::debug!(input = %s, "Parsed offset date-time heuristically");
        return Ok(Instant::from(dt));
    } else if let Some(local) = heuristic::parse_datetime(date_str) {
        tracing::debug!(input = %s, "Parsed date-time heuristically");
        Instant::floating(local)
    } else if let Some(date) = heuristic::parse_date(date_str) {
        tracing::debug!(input = %s, "Parsed date heuristically");
        Instant::Date(date)
    } else {
        return Err(RfcError::invalid_date(property, raw));
    };

    match (base, zone_token) {
        (Instant::DateTime { local, zone: Zone::Floating }, Some(token)) => Ok(Instant::DateTime {
            local,
            zone: resolve_zone(property, token)?,
        }),
        _ => Ok(base),
    }
}

/// Parses `YYYYMMDD` or `YYYYMMDD"T"HHMMSS["Z"]`.
fn parse_compact(property: &str, s: &str) -> RfcResult<Instant> {
    if s.len() == 8 {
        return parse_date(property, s).map(Instant::Date);
    }
    let (local, is_utc) = parse_datetime(property, s)?;
    Ok(if is_utc {
        Instant::utc(local)
    } else {
        Instant::floating(local)
    })
}

fn is_compact(s: &str) -> bool {
    let bytes = s.as_bytes();
    let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
    match bytes.len() {
        8 => digits(0..8),
        15 | 16 => {
            digits(0..8)
                && matches!(bytes[8], b'T' | b't')
                && digits(9..15)
                && (bytes.len() == 15 || matches!(bytes[15], b'Z' | b'z'))
        }
        _ => false,
    }
}

/// Splits a trailing timezone token off a date string.
///
/// For the compact form everything after the date-time is the token, so
/// multi-word zone names survive. Otherwise the token is the last
/// whitespace-separated word, and only if it looks like a zone: a UTC name,
/// a numeric offset or a resolvable identifier. A `Z` glued to a time is
/// split off as well.
#[must_use]
pub fn split_date_and_zone(s: &str) -> (&str, Option<&str>) {
    let s = s.trim();

    for len in [15, 8] {
        if s.len() > len && s.is_char_boundary(len) && is_compact(&s[..len]) {
            let rest = s[len..].trim();
            if rest.is_empty() {
                return (&s[..len], None);
            }
            if len == 15 && rest.eq_ignore_ascii_case("Z") {
                return (s, None);
            }
            if s[len..].starts_with(char::is_whitespace) {
                return (&s[..len], Some(rest));
            }
        }
    }

    if let Some(stripped) = s.strip_suffix('Z')
        && stripped.ends_with(|c: char| c.is_ascii_digit())
    {
        return (stripped, Some("Z"));
    }

    if let Some((date, token)) = s.rsplit_once(char::is_whitespace)
        && !date.trim().is_empty()
        && (is_utc_name(token)
            || parse_offset_token(token).is_some()
            || (token.contains('/') && resolve_tzid("", token).is_ok()))
    {
        let date = date.trim_end();
        // "... GMT +0100" carries a redundant GMT before the offset
        let date = date
            .strip_suffix("GMT")
            .map_or(date, str::trim_end);
        return (date, Some(token));
    }

    (s, None)
}
