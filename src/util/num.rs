use crate::error::RuntimeError;

/// How far a number may be from the nearest integer and still be accepted
/// as an array index.
pub const INDEX_TOLERANCE: f64 = 1e-9;

/// Converts a number to an array index.
///
/// The value must be finite, within [`INDEX_TOLERANCE`] of an integer, and
/// not negative.
///
/// # Errors
/// - `RuntimeError::NonIntegerIndex` when the value has a fractional part
///   or is not finite.
/// - `RuntimeError::NegativeArrayIndex` when the value is below zero.
///
/// # Example
/// ```
/// use toylang::util::num::number_to_index;
///
/// assert_eq!(number_to_index(2.0).unwrap(), 2);
/// assert!(number_to_index(2.5).is_err());
/// assert!(number_to_index(-1.0).is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn number_to_index(value: f64) -> Result<usize, RuntimeError> {
    if !value.is_finite() || (value - value.round()).abs() > INDEX_TOLERANCE {
        return Err(RuntimeError::NonIntegerIndex { value });
    }
    let rounded = value.round();
    if rounded < 0.0 {
        return Err(RuntimeError::NegativeArrayIndex { value });
    }
    Ok(rounded as usize)
}

/// Converts a number to a repetition count, as used by the string and
/// array `*` operators: the value is floored, and anything below zero or
/// not a number repeats zero times.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn repeat_count(value: f64) -> usize {
    let floored = value.floor();
    if floored.is_nan() || floored < 0.0 {
        return 0;
    }
    if floored >= usize::MAX as f64 {
        usize::MAX
    } else {
        floored as usize
    }
}
