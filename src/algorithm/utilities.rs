//! # Utilities
//!
//! Small numeric helpers shared by the algorithms.
use num_traits::Float;

/// Whether a value is within `tolerance` of an integer.
pub(crate) fn is_integral<F: Float>(value: F, tolerance: F) -> bool {
    (value - value.round()).abs() <= tolerance
}

/// Whether a value should be treated as zero.
pub(crate) fn is_zero<F: Float>(value: F, tolerance: F) -> bool {
    value.abs() <= tolerance
}

/// Round each value to the nearest integer.
///
/// Used when accepting an integer incumbent: the values are integral up to tolerance already,
/// rounding removes the residual float noise.
pub(crate) fn round_all<F: Float>(values: &mut [F]) {
    for value in values.iter_mut() {
        *value = value.round();
    }
}
