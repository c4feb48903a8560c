//! RFC 5545 content-line codec and property value model.
//!
//! See [`rfc::ical`] for the entry points.

pub mod error;
pub mod rfc;
