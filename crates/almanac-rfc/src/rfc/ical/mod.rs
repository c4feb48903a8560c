//! iCalendar RFC 5545 property layer.
//!
//! - `core`: value model (instants, parameters, property values)
//! - `parse`: content line lexing and primitive value parsers
//! - `build`: escaping, folding and content line rendering
//! - `datetime`: date normalization, timezone resolution and wire formatting
//! - `validation`: start/dependent ordering and kind agreement
//! - `props`: per-component property accessors
//!
//! ## Example
//!
//! ```rust
//! use almanac_core::config::OutputConfig;
//! use almanac_rfc::rfc::ical::{ComponentProperties, PropertyValue};
//!
//! let mut props = ComponentProperties::new(OutputConfig::default());
//! props
//!     .set_dtstart(PropertyValue::new("20220403T100000").param("TZID", "Europe/Stockholm"))
//!     .unwrap();
//! props.set_summary("Planning").unwrap();
//!
//! assert_eq!(
//!     props.to_ical(),
//!     "DTSTART;TZID=Europe/Stockholm:20220403T100000\r\nSUMMARY:Planning\r\n"
//! );
//! ```

pub mod build;
pub mod core;
pub mod datetime;
pub mod parse;
pub mod props;
pub mod validation;

#[cfg(test)]
mod tests;

// Re-export commonly used items at module level
pub use build::{fold, fold_line};
pub use self::core::{ContentLine, Instant, Parameter, PropertyValue, Value, Zone};
pub use datetime::{format, normalize};
pub use parse::{ParseError, ParseResult, unfold_lines};
pub use props::ComponentProperties;
