use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// RFC parsing and validation errors.
///
/// Every variant names the property (or line) it came from and carries the
/// raw text that failed, so callers can build an actionable message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RfcError {
    #[error("{property}: expected {expected}, got {raw:?}")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        raw: String,
    },

    #[error("{property}: {raw} is outside {min}..={max}")]
    RangeViolation {
        property: String,
        raw: String,
        min: String,
        max: String,
    },

    #[error("{property}: invalid date {raw:?}")]
    InvalidDateFormat { property: String, raw: String },

    #[error("{property}: unknown timezone {tzid:?}")]
    UnknownTimezone { property: String, tzid: String },

    #[error("{property}: value kind {found} does not match {expected}")]
    KindMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{property}: dates are not in ascending order ({first} > {second})")]
    OutOfSequence {
        property: String,
        first: String,
        second: String,
    },

    #[error("{property}: empty value not allowed")]
    EmptyValueNotAllowed { property: String },

    #[error("Malformed content line: {0}")]
    MalformedLine(#[from] ParseError),
}

impl RfcError {
    pub(crate) fn type_mismatch(
        property: &str,
        expected: &'static str,
        raw: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            property: property.to_string(),
            expected,
            raw: raw.into(),
        }
    }

    pub(crate) fn invalid_date(property: &str, raw: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            property: property.to_string(),
            raw: raw.into(),
        }
    }

    pub(crate) fn unknown_timezone(property: &str, tzid: impl Into<String>) -> Self {
        Self::UnknownTimezone {
            property: property.to_string(),
            tzid: tzid.into(),
        }
    }
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
