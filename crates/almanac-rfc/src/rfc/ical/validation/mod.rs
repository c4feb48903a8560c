//! Cross-property validation for temporal values.

mod sequence;

pub use sequence::{assert_in_sequence, assert_same_kind};
