//! Ordering and kind agreement between a start and its dependents.

use crate::error::{RfcError, RfcResult};
use crate::rfc::ical::core::Instant;

/// Checks that `first` does not come after `second`.
///
/// Comparison is on elapsed time, so DST and differing zones are handled.
/// Equal instants pass.
///
/// ## Errors
/// Returns `OutOfSequence` when `first` is strictly later than `second`.
pub fn assert_in_sequence(first: &Instant, second: &Instant, label: &str) -> RfcResult<()> {
    if first.to_utc() > second.to_utc() {
        return Err(RfcError::OutOfSequence {
            property: label.to_string(),
            first: first.to_string(),
            second: second.to_string(),
        });
    }
    Ok(())
}

/// Checks that a dependent value has the same kind as its start.
///
/// ## Errors
/// Returns `KindMismatch` when one is a DATE and the other a DATE-TIME.
pub fn assert_same_kind(start: &Instant, dependent: &Instant, label: &str) -> RfcResult<()> {
    if start.kind() != dependent.kind() {
        return Err(RfcError::KindMismatch {
            property: label.to_string(),
            expected: start.kind().as_str(),
            found: dependent.kind().as_str(),
        });
    }
    Ok(())
}
