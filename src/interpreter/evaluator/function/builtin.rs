use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::eval_pow, core::EvalResult},
        value::{complex::ComplexNumber, core::Value},
    },
    util::num::exact_to_i64,
};

/// Returns the absolute value of a number. For a complex argument this is
/// the magnitude, which is always real.
pub fn abs(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Real(r) => Ok(Value::Real(r.abs())),
        Value::Complex(c) => Ok(Value::Real(c.abs())),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// Returns the smallest integer greater than or equal to the argument.
pub fn ceil(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.ceil()))
}

/// Returns the largest integer less than or equal to the argument.
pub fn floor(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.floor()))
}

/// Truncates the argument towards zero.
pub fn trunc(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.trunc()))
}

/// Rounds to the nearest integer, or to `prec` decimals when given.
///
/// # Example
/// ```
/// use algoscript::interpreter::{evaluator::function::builtin::round, value::core::Value};
///
/// let rounded = round(&[Value::Real(3.14159), Value::Real(2.0)], 1).unwrap();
/// assert_eq!(rounded, Value::Real(3.14));
/// ```
pub fn round(args: &[Value], line: usize) -> EvalResult<Value> {
    let x = args[0].as_real(line)?;
    let prec = exact_to_i64(args[1].as_real(line)?, line)?;

    let prec = i32::try_from(prec).map_err(|_| {
                   RuntimeError::InvalidArgument { details: "rounding precision is out of range".to_string(),
                                                   line }
               })?;

    let factor = 10f64.powi(prec);
    Ok(Value::Real((x * factor).round() / factor))
}

/// Returns the sign of the argument: -1 if negative, 1 if positive,
/// 0 otherwise.
pub fn sign(args: &[Value], line: usize) -> EvalResult<Value> {
    let x = args[0].as_real(line)?;
    let sign = if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    };
    Ok(Value::Real(sign))
}

/// Returns the square root. A negative real argument yields the Complex
/// root rather than failing.
///
/// # Example
/// ```
/// use algoscript::interpreter::{
///     evaluator::function::builtin::sqrt,
///     value::{complex::ComplexNumber, core::Value},
/// };
///
/// assert_eq!(sqrt(&[Value::Real(49.0)], 1).unwrap(), Value::Real(7.0));
/// assert_eq!(sqrt(&[Value::Real(-4.0)], 1).unwrap(),
///            Value::Complex(ComplexNumber::new(0.0, 2.0)));
/// ```
pub fn sqrt(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Real(r) if *r >= 0.0 => Ok(Value::Real(r.sqrt())),
        Value::Real(r) => Ok(Value::Complex(ComplexNumber::new(0.0, (-r).sqrt()))),
        Value::Complex(c) => Ok(c.sqrt().checked_as_real()),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// Returns the `n`-th root of the argument, with the same complex
/// promotion rule as the power operator.
pub fn root(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = args[1].as_real(line)?;
    if n == 0.0 {
        return Err(RuntimeError::DivisionByZero { line });
    }
    eval_pow(&args[0], &Value::Real(1.0 / n), line)
}

/// Raises the first argument to the second; identical to the `^` operator.
pub fn pow(args: &[Value], line: usize) -> EvalResult<Value> {
    eval_pow(&args[0], &args[1], line)
}

/// Returns the greatest common divisor of two integers.
///
/// # Example
/// ```
/// use algoscript::interpreter::{evaluator::function::builtin::gcd, value::core::Value};
///
/// let g = gcd(&[Value::Real(12.0), Value::Real(18.0)], 1).unwrap();
/// assert_eq!(g, Value::Real(6.0));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn gcd(args: &[Value], line: usize) -> EvalResult<Value> {
    let a = exact_to_i64(args[0].as_real(line)?, line)?.unsigned_abs();
    let b = exact_to_i64(args[1].as_real(line)?, line)?.unsigned_abs();

    Ok(Value::Real(euclid(a, b) as f64))
}

/// Returns the least common multiple of two integers.
#[allow(clippy::cast_precision_loss)]
pub fn lcm(args: &[Value], line: usize) -> EvalResult<Value> {
    let a = exact_to_i64(args[0].as_real(line)?, line)?.unsigned_abs();
    let b = exact_to_i64(args[1].as_real(line)?, line)?.unsigned_abs();

    if a == 0 || b == 0 {
        return Ok(Value::Real(0.0));
    }

    Ok(Value::Real((a / euclid(a, b) * b) as f64))
}

fn euclid(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Returns the hypotenuse / Euclidean norm of the vector `(x, y)`.
pub fn hypot(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.hypot(args[1].as_real(line)?)))
}

/// Returns the exponential of the argument.
pub fn exp(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Real(r) => Ok(Value::Real(r.exp())),
        Value::Complex(c) => Ok(c.exp().checked_as_real()),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// Returns the natural logarithm. A negative real argument yields the
/// Complex principal branch; zero has no logarithm at all.
pub fn ln(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Real(r) if *r > 0.0 => Ok(Value::Real(r.ln())),
        Value::Real(r) if *r == 0.0 => {
            Err(RuntimeError::InvalidArgument { details: "logarithm of zero is undefined".to_string(),
                                                line })
        },
        Value::Real(r) => Ok(ComplexNumber::from(*r).ln().checked_as_real()),
        Value::Complex(c) => {
            if c.is_zero() {
                return Err(RuntimeError::InvalidArgument { details: "logarithm of zero is undefined".to_string(),
                                                           line });
            }
            Ok(c.ln().checked_as_real())
        },
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// Returns the logarithm in the given base (10 when omitted).
pub fn log(args: &[Value], line: usize) -> EvalResult<Value> {
    let value = ln(&args[..1], line)?;
    let base = ln(&args[1..], line)?;

    match &base {
        Value::Real(b) if *b == 0.0 => Err(RuntimeError::DivisionByZero { line }),
        _ => {
            let value = value.as_complex(line)?;
            let base = base.as_complex(line)?;
            if base.is_zero() {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok((value / base).checked_as_real())
        },
    }
}

/// Converts an angle from radians to degrees.
pub fn deg(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.to_degrees()))
}

/// Converts an angle from degrees to radians.
pub fn rad(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.to_radians()))
}
