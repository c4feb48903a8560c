//! Wire formatting of normalized instants (RFC 5545 §3.3.4, §3.3.5).

use crate::rfc::ical::core::{Instant, PropertyValue, Zone};

use super::timezone::resolve_offset;

/// Formats an instant as `YYYYMMDD` or `YYYYMMDD"T"HHMMSS["Z"]`.
///
/// The `Z` suffix appears only for UTC values that are not floating.
/// Raw offsets never reach the wire: a fixed-offset value is first moved to
/// its equivalent named zone, or to UTC when there is none.
#[must_use]
pub fn format(instant: &Instant, is_date: bool, is_local: bool) -> String {
    if is_date {
        return instant.date().format("%Y%m%d").to_string();
    }

    let instant = match instant.zone() {
        Some(Zone::Fixed(offset)) => match resolve_offset(offset) {
            Zone::Fixed(_) => instant.rebase(Zone::Utc),
            zone => instant.rebase(zone),
        },
        _ => *instant,
    };

    let mut out = instant.local().format("%Y%m%dT%H%M%S").to_string();
    if instant.is_utc() && !is_local {
        out.push('Z');
    }
    out
}

/// Formats the instant held by a normalized property value.
///
/// Returns `None` when the value holds no instant.
#[must_use]
pub fn format_value(pv: &PropertyValue) -> Option<String> {
    let instant = pv.instant()?;
    Some(format(instant, instant.is_date(), pv.is_local_time()))
}
