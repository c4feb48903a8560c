//! Timezone token resolution.
//!
//! ICU4X supplies the Windows to IANA mapping and alias canonicalization.
//! Resolution is a pure function of its input; nothing is cached.

use chrono::FixedOffset;
use chrono_tz::Tz;
use icu::time::TimeZone;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use std::str::FromStr;

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::Zone;

/// Names that always mean UTC, compared case-insensitively.
const UTC_NAMES: &[&str] = &[
    "Z",
    "UT",
    "UTC",
    "UCT",
    "GMT",
    "GMT0",
    "ZULU",
    "UNIVERSAL",
    "GREENWICH",
    "ETC/UTC",
    "ETC/UCT",
    "ETC/GMT",
    "ETC/GMT0",
    "ETC/ZULU",
    "ETC/UNIVERSAL",
    "ETC/GREENWICH",
];

/// Whole-hour offsets that have an `Etc/GMT∓N` zone.
const MIN_ETC_HOURS: i32 = -12;
const MAX_ETC_HOURS: i32 = 14;

/// Returns whether `name` denotes UTC.
#[must_use]
pub fn is_utc_name(name: &str) -> bool {
    let name = name.trim();
    UTC_NAMES.iter().any(|n| n.eq_ignore_ascii_case(name))
}

/// Resolves a timezone token to a disposition.
///
/// Accepts UTC names, numeric offsets (`+0100`, `-05:00`, `GMT+1`,
/// `UTC-3`) and timezone identifiers (IANA, Windows, vendor-prefixed).
///
/// ## Errors
/// Returns `UnknownTimezone` if the token matches none of these.
pub fn resolve_zone(property: &str, token: &str) -> RfcResult<Zone> {
    let token = token.trim();
    if is_utc_name(token) {
        return Ok(Zone::Utc);
    }
    if let Some(offset) = parse_offset_token(token) {
        return Ok(resolve_offset(offset));
    }
    resolve_tzid(property, token)
}

/// Resolves a timezone identifier to a named zone.
///
/// ## Errors
/// Returns `UnknownTimezone` if the identifier is not a known zone.
pub fn resolve_tzid(property: &str, tzid: &str) -> RfcResult<Zone> {
    let normalized = normalize_tzid(tzid);
    let tz = Tz::from_str(&normalized)
        .or_else(|_e| Tz::from_str(tzid))
        .map_err(|_e| RfcError::unknown_timezone(property, tzid))?;

    if is_utc_name(tz.name()) {
        return Ok(Zone::Utc);
    }
    Ok(Zone::Named(tz))
}

/// Maps a fixed offset to its canonical disposition.
///
/// Zero becomes UTC; whole hours within −12…+14 become the matching
/// `Etc/GMT∓N` zone. Every other offset stays fixed.
#[must_use]
pub fn resolve_offset(offset: FixedOffset) -> Zone {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return Zone::Utc;
    }
    if seconds % 3600 != 0 {
        return Zone::Fixed(offset);
    }

    let hours = seconds / 3600;
    if !(MIN_ETC_HOURS..=MAX_ETC_HOURS).contains(&hours) {
        return Zone::Fixed(offset);
    }

    // Etc/GMT signs are inverted: Etc/GMT-1 is one hour east of UTC
    let name = if hours > 0 {
        format!("Etc/GMT-{hours}")
    } else {
        format!("Etc/GMT+{}", -hours)
    };
    Tz::from_str(&name).map_or(Zone::Fixed(offset), Zone::Named)
}

/// Parses a numeric offset token.
///
/// Accepts an optional `GMT`/`UTC` prefix followed by a sign and `H`, `HH`,
/// `HHMM`, `HH:MM`, `HHMMSS` or `HH:MM:SS`.
#[must_use]
pub fn parse_offset_token(token: &str) -> Option<FixedOffset> {
    let upper = token.trim().to_ascii_uppercase();
    let body = upper
        .strip_prefix("GMT")
        .or_else(|| upper.strip_prefix("UTC"))
        .unwrap_or(&upper);

    let (sign, rest) = match body.as_bytes().first()? {
        b'+' => (1, &body[1..]),
        b'-' => (-1, &body[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|&c| c != ':').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if rest.contains(':') && !matches!(digits.len(), 4 | 6) {
        return None;
    }

    let number = |range: std::ops::Range<usize>| digits[range].parse::<i32>().ok();
    let (hours, minutes, seconds) = match digits.len() {
        1 | 2 => (number(0..digits.len())?, 0, 0),
        4 => (number(0..2)?, number(2..4)?, 0),
        6 => (number(0..2)?, number(2..4)?, number(4..6)?),
        _ => return None,
    };
    if hours > MAX_ETC_HOURS || minutes > 59 || seconds > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60 + seconds))
}

/// Path prefixes some clients put in front of an IANA name.
const VENDOR_PREFIXES: &[&str] = &["/mozilla.org/", "/softwarestudio.org/"];

/// Maps a client TZID onto its canonical IANA name.
///
/// Vendor path prefixes are dropped, Windows names are translated and IANA
/// aliases collapse to their canonical form (`Europe/Kiev` is `Europe/Kyiv`).
/// Anything ICU does not know comes back without its prefix.
#[must_use]
pub fn normalize_tzid(tzid: &str) -> String {
    let id = VENDOR_PREFIXES
        .iter()
        .find_map(|prefix| tzid.strip_prefix(prefix))
        .unwrap_or(tzid);
    canonical_iana(id).unwrap_or_else(|| id.to_string())
}

fn canonical_iana(id: &str) -> Option<String> {
    let iana = IanaParserExtended::new();
    let zone = WindowsParser::new()
        .parse(id, None)
        .unwrap_or_else(|| iana.parse(id).time_zone);
    if zone == TimeZone::UNKNOWN {
        return None;
    }
    iana.iter()
        .find(|entry| entry.time_zone == zone)
        .map(|entry| entry.canonical.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_standard_timezone() {
        assert_eq!(
            resolve_zone("DTSTART", "America/New_York").unwrap(),
            Zone::Named(Tz::America__New_York)
        );
    }

    #[test]
    fn resolve_unknown_timezone() {
        let err = resolve_zone("DTSTART", "Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(
            err,
            RfcError::UnknownTimezone { ref property, ref tzid }
                if property == "DTSTART" && tzid == "Mars/Olympus_Mons"
        ));
    }

    #[test]
    fn resolve_utc_family() {
        for token in ["Z", "utc", "GMT", "Etc/UTC", "+0000", "UTC+0"] {
            assert_eq!(resolve_zone("DTSTART", token).unwrap(), Zone::Utc, "{token}");
        }
    }

    #[test]
    fn resolve_whole_hour_offsets_to_etc_zones() {
        assert_eq!(
            resolve_zone("DTSTART", "+0100").unwrap(),
            Zone::Named(Tz::Etc__GMTMinus1)
        );
        assert_eq!(
            resolve_zone("DTSTART", "GMT+1").unwrap(),
            Zone::Named(Tz::Etc__GMTMinus1)
        );
        assert_eq!(
            resolve_zone("DTSTART", "-05:00").unwrap(),
            Zone::Named(Tz::Etc__GMTPlus5)
        );
        assert_eq!(
            resolve_zone("DTSTART", "UTC-3").unwrap(),
            Zone::Named(Tz::Etc__GMTPlus3)
        );
    }

    #[test]
    fn fractional_offsets_stay_fixed() {
        let zone = resolve_zone("DTSTART", "+0530").unwrap();
        assert_eq!(zone, Zone::Fixed(FixedOffset::east_opt(5 * 3600 + 1800).unwrap()));

        let zone = resolve_zone("DTSTART", "+013000").unwrap();
        assert_eq!(zone, Zone::Fixed(FixedOffset::east_opt(5400).unwrap()));
    }

    #[test]
    fn offset_token_rejects_garbage() {
        assert!(parse_offset_token("0100").is_none());
        assert!(parse_offset_token("+1:00").is_none());
        assert!(parse_offset_token("+2500").is_none());
        assert!(parse_offset_token("GMT").is_none());
        assert!(parse_offset_token("+01a0").is_none());
    }

    #[test]
    fn normalize_windows_timezone() {
        assert_eq!(normalize_tzid("Eastern Standard Time"), "America/New_York");
        assert_eq!(
            normalize_tzid("Pacific Standard Time"),
            "America/Los_Angeles"
        );
        assert_eq!(normalize_tzid("W. Europe Standard Time"), "Europe/Berlin");
    }

    #[test]
    fn normalize_mozilla_prefix() {
        assert_eq!(
            normalize_tzid("/mozilla.org/America/New_York"),
            "America/New_York"
        );
    }

    #[test]
    fn unknown_ids_lose_only_their_prefix() {
        assert_eq!(
            normalize_tzid("/softwarestudio.org/Olson_20011030_5/Mars/Base"),
            "Olson_20011030_5/Mars/Base"
        );
        assert_eq!(normalize_tzid("Mars/Olympus_Mons"), "Mars/Olympus_Mons");
    }

    #[test]
    fn normalize_iana_alias() {
        // Europe/Kiev was renamed to Europe/Kyiv
        assert_eq!(normalize_tzid("Europe/Kiev"), "Europe/Kyiv");
        // US/Eastern is an alias for America/New_York
        assert_eq!(normalize_tzid("US/Eastern"), "America/New_York");
    }

    #[test]
    fn resolve_windows_name() {
        assert_eq!(
            resolve_zone("DTSTART", "Central Standard Time").unwrap(),
            Zone::Named(Tz::America__Chicago)
        );
    }
}
