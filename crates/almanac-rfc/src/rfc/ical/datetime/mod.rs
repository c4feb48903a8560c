//! Date and date-time normalization.
//!
//! - Normalize: any accepted date input to one canonical [`Instant`](super::core::Instant)
//! - Format: canonical instants back to the wire form
//! - Timezone: TZID, offset and UTC-name resolution

mod format;
mod heuristic;
mod normalize;
mod timezone;

pub use format::{format, format_value};
pub use normalize::{normalize, split_date_and_zone};
pub use timezone::{
    is_utc_name, normalize_tzid, parse_offset_token, resolve_offset, resolve_tzid, resolve_zone,
};
