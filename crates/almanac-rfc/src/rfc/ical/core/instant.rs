//! Canonical date and date-time values (RFC 5545 §3.3.4, §3.3.5).

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
    Utc,
};
use chrono_tz::Tz;
use std::fmt;

/// Whether a temporal property holds a DATE or a DATE-TIME.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Date,
    DateTime,
}

impl ValueKind {
    /// Returns the VALUE parameter spelling for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "DATE",
            Self::DateTime => "DATE-TIME",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timezone disposition of a DATE-TIME.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// UTC, rendered with a trailing `Z`.
    Utc,
    /// Named IANA zone, rendered through a TZID parameter.
    Named(Tz),
    /// Raw numeric offset that did not resolve to a named zone.
    Fixed(FixedOffset),
    /// Floating local time, tied to no zone at all.
    Floating,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("UTC"),
            Self::Named(tz) => f.write_str(tz.name()),
            Self::Fixed(offset) => {
                let total = offset.local_minus_utc();
                let sign = if total < 0 { '-' } else { '+' };
                let abs = total.unsigned_abs();
                write!(f, "{sign}{:02}{:02}", abs / 3600, (abs % 3600) / 60)?;
                if abs % 60 != 0 {
                    write!(f, "{:02}", abs % 60)?;
                }
                Ok(())
            }
            Self::Floating => f.write_str("floating"),
        }
    }
}

/// A normalized date or date-time.
///
/// DATE values never carry a zone; every DATE-TIME carries exactly one
/// [`Zone`]. The wall-clock fields are always expressed in that zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instant {
    Date(NaiveDate),
    DateTime { local: NaiveDateTime, zone: Zone },
}

impl Instant {
    /// Creates a floating DATE-TIME.
    #[must_use]
    pub const fn floating(local: NaiveDateTime) -> Self {
        Self::DateTime {
            local,
            zone: Zone::Floating,
        }
    }

    /// Creates a UTC DATE-TIME from UTC wall-clock fields.
    #[must_use]
    pub const fn utc(local: NaiveDateTime) -> Self {
        Self::DateTime {
            local,
            zone: Zone::Utc,
        }
    }

    /// Creates a DATE-TIME whose wall-clock fields are local to `tz`.
    #[must_use]
    pub const fn zoned(local: NaiveDateTime, tz: Tz) -> Self {
        Self::DateTime {
            local,
            zone: Zone::Named(tz),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Date(_) => ValueKind::Date,
            Self::DateTime { .. } => ValueKind::DateTime,
        }
    }

    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Returns the disposition, or `None` for a DATE.
    #[must_use]
    pub const fn zone(&self) -> Option<Zone> {
        match self {
            Self::Date(_) => None,
            Self::DateTime { zone, .. } => Some(*zone),
        }
    }

    #[must_use]
    pub const fn is_floating(&self) -> bool {
        matches!(
            self,
            Self::DateTime {
                zone: Zone::Floating,
                ..
            }
        )
    }

    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self, Self::DateTime { zone: Zone::Utc, .. })
    }

    /// Returns the wall-clock fields; a DATE reads as midnight.
    #[must_use]
    pub fn local(&self) -> NaiveDateTime {
        match self {
            Self::Date(date) => date.and_time(NaiveTime::MIN),
            Self::DateTime { local, .. } => *local,
        }
    }

    /// Returns the calendar date of the wall-clock fields.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Date(date) => *date,
            Self::DateTime { local, .. } => local.date(),
        }
    }

    /// Returns the absolute point in time this value denotes.
    ///
    /// DATE values and floating times have no zone of their own; both are
    /// read as UTC wall-clock so that values of the same kind still order
    /// correctly against each other.
    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Date(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
            Self::DateTime { local, zone } => match zone {
                Zone::Utc | Zone::Floating => Utc.from_utc_datetime(local),
                Zone::Named(tz) => localize(*tz, *local).with_timezone(&Utc),
                Zone::Fixed(offset) => Utc.from_utc_datetime(&(*local - Duration::seconds(
                    i64::from(offset.local_minus_utc()),
                ))),
            },
        }
    }

    /// Re-expresses this value in another zone.
    ///
    /// A floating value has no absolute time, so it simply takes `zone` as
    /// its disposition with unchanged wall-clock fields. Every other value is
    /// converted, keeping the absolute time. DATE values are returned as-is.
    #[must_use]
    pub fn rebase(self, zone: Zone) -> Self {
        let Self::DateTime { local, zone: from } = self else {
            return self;
        };
        if from == zone || from == Zone::Floating {
            return Self::DateTime { local, zone };
        }
        let utc = self.to_utc();
        let local = match zone {
            Zone::Utc | Zone::Floating => utc.naive_utc(),
            Zone::Named(tz) => utc.with_timezone(&tz).naive_local(),
            Zone::Fixed(offset) => utc.with_timezone(&offset).naive_local(),
        };
        Self::DateTime { local, zone }
    }

    /// Drops the time of day and any zone.
    #[must_use]
    pub fn to_date(self) -> Self {
        Self::Date(self.date())
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format("%Y%m%d")),
            Self::DateTime { local, zone } => {
                write!(f, "{}", local.format("%Y%m%dT%H%M%S"))?;
                match zone {
                    Zone::Utc => f.write_str("Z"),
                    Zone::Floating => Ok(()),
                    Zone::Named(_) | Zone::Fixed(_) => write!(f, " {zone}"),
                }
            }
        }
    }
}

/// Resolves wall-clock fields in `tz`.
///
/// Times inside a DST fold take the earlier occurrence; times inside a DST
/// gap move forward by an hour.
fn localize(tz: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        LocalResult::None => tz
            .from_local_datetime(&(local + Duration::hours(1)))
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&local)),
    }
}

impl From<NaiveDate> for Instant {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveDateTime> for Instant {
    fn from(local: NaiveDateTime) -> Self {
        Self::floating(local)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::utc(dt.naive_utc())
    }
}

impl From<DateTime<FixedOffset>> for Instant {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime {
            local: dt.naive_local(),
            zone: Zone::Fixed(*dt.offset()),
        }
    }
}

impl From<DateTime<Tz>> for Instant {
    fn from(dt: DateTime<Tz>) -> Self {
        let tz = dt.timezone();
        if tz == Tz::UTC || tz == Tz::Etc__UTC {
            return Self::utc(dt.naive_utc());
        }
        Self::zoned(dt.naive_local(), tz)
    }
}
