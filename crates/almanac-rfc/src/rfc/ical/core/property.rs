//! iCalendar content line type (RFC 5545 §3.1).

use super::{Parameter, Parameters};

/// A raw content line as parsed from iCalendar text.
///
/// This is the low-level representation before value type resolution.
/// Preserves the original raw value for round-trip fidelity.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentLine {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Parameters,
    /// Raw value string (after unfolding, before unescaping).
    pub raw_value: String,
}

impl ContentLine {
    /// Creates a new content line.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Parameters::new(),
            raw_value: value.into(),
        }
    }

    /// Creates a content line with parameters.
    #[must_use]
    pub fn with_params(
        name: impl Into<String>,
        params: impl Into<Parameters>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: params.into(),
            raw_value: value.into(),
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        self.params.get(name)
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.params.get_value(name)
    }
}

/// Property names handled by the accessor layer.
pub mod names {
    // Descriptive
    pub const ATTACH: &str = "ATTACH";
    pub const COLOR: &str = "COLOR";
    pub const CONFERENCE: &str = "CONFERENCE";
    pub const GEO: &str = "GEO";
    pub const IMAGE: &str = "IMAGE";
    pub const STRUCTURED_DATA: &str = "STRUCTURED-DATA";
    pub const SUMMARY: &str = "SUMMARY";

    // Date and time
    pub const DTEND: &str = "DTEND";
    pub const DTSTART: &str = "DTSTART";
    pub const DUE: &str = "DUE";
    pub const RECURRENCE_ID: &str = "RECURRENCE-ID";
    pub const TRANSP: &str = "TRANSP";

    // Timezone
    pub const TZOFFSETTO: &str = "TZOFFSETTO";

    // Change management
    pub const DTSTAMP: &str = "DTSTAMP";
    pub const LAST_MODIFIED: &str = "LAST-MODIFIED";
    pub const SEQUENCE: &str = "SEQUENCE";
}
