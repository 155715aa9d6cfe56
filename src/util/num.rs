use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Returns `true` if the value is finite and has no fractional part.
///
/// ## Example
/// ```
/// use algoscript::util::num::is_integer_valued;
///
/// assert!(is_integer_valued(3.0));
/// assert!(!is_integer_valued(3.5));
/// assert!(!is_integer_valued(f64::INFINITY));
/// ```
#[must_use]
pub fn is_integer_valued(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Truncates an `f64` towards zero and converts it to `i64`.
///
/// Used for index arithmetic, where the language truncates fractional
/// indices rather than rejecting them.
///
/// ## Errors
/// Returns `RuntimeError::InvalidArgument` for non-finite values or values
/// whose truncation falls outside the exactly-representable integer range.
///
/// ## Example
/// ```
/// use algoscript::util::num::truncate_to_i64;
///
/// assert_eq!(truncate_to_i64(2.9, 1).unwrap(), 2);
/// assert_eq!(truncate_to_i64(-2.9, 1).unwrap(), -2);
/// assert!(truncate_to_i64(f64::NAN, 1).is_err());
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn truncate_to_i64(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::InvalidArgument { details: format!("cannot use non-finite value {value} as an integer"),
                                                   line });
    }
    let truncated = value.trunc();
    if truncated.abs() > MAX_SAFE_INT {
        return Err(RuntimeError::InvalidArgument { details: format!("value {value} is too large to be used as an integer"),
                                                   line });
    }
    Ok(truncated as i64)
}

/// Converts an integer-valued `f64` to `i64` exactly.
///
/// Unlike [`truncate_to_i64`] this rejects fractional values instead of
/// truncating them. Used where the language requires a true integer, such as
/// a list repetition count.
///
/// ## Errors
/// Returns `RuntimeError::InvalidArgument` for non-finite, out-of-range or
/// fractional values.
///
/// ## Example
/// ```
/// use algoscript::util::num::exact_to_i64;
///
/// assert_eq!(exact_to_i64(1000.0, 1).unwrap(), 1000);
/// assert!(exact_to_i64(1.5, 1).is_err());
/// ```
pub fn exact_to_i64(value: f64, line: usize) -> EvalResult<i64> {
    if value.fract() != 0.0 {
        return Err(RuntimeError::InvalidArgument { details: format!("value {value} is fractional where an integer is required"),
                                                   line });
    }
    truncate_to_i64(value, line)
}
