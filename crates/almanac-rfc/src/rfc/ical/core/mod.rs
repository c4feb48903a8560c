//! iCalendar core models (RFC 5545).
//!
//! This module defines the value model shared by the codec:
//! - Round-trip fidelity: parameters keep their order, unknown ones pass through
//! - Present-but-empty values are distinct from absent ones
//! - Type safety: temporal values carry exactly one zone disposition

mod instant;
mod parameter;
mod property;
mod value;

pub use instant::{Instant, ValueKind, Zone};
pub use parameter::{LOCAL_TIME_MARKER, Parameter, Parameters, names as param_names};
pub use property::{ContentLine, names};
pub use value::{PropertyValue, Value, assert_in_range};
