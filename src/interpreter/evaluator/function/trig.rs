use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{complex::ComplexNumber, core::Value},
    },
};

/// Defines a unary builtin that applies the real function to real
/// arguments and the complex variant to complex ones.
macro_rules! real_complex_builtin {
    ($fname:ident, $real_fn:ident, $complex_fn:ident, $doc:literal) => {
        #[doc = $doc]
        pub fn $fname(args: &[Value], line: usize) -> EvalResult<Value> {
            match &args[0] {
                Value::Real(r) => Ok(Value::Real(r.$real_fn())),
                Value::Complex(c) => Ok(ComplexNumber::$complex_fn(*c).checked_as_real()),
                _ => Err(RuntimeError::ExpectedNumber { line }),
            }
        }
    };
}

real_complex_builtin!(sin, sin, sin, "Returns the sine of the argument.");
real_complex_builtin!(cos, cos, cos, "Returns the cosine of the argument.");
real_complex_builtin!(tan, tan, tan, "Returns the tangent of the argument.");
real_complex_builtin!(sinh, sinh, sinh, "Returns the hyperbolic sine of the argument.");
real_complex_builtin!(cosh, cosh, cosh, "Returns the hyperbolic cosine of the argument.");
real_complex_builtin!(tanh, tanh, tanh, "Returns the hyperbolic tangent of the argument.");

/// The complex branch of the inverse sine for a real argument with
/// `|x| > 1`: `±(pi/2) + i sgn(x) ln(|x| + sqrt(x^2 - 1))`, continuous with
/// approaching the branch cut from above.
fn asin_real_branch(x: f64) -> ComplexNumber {
    let magnitude = x.abs();
    let imaginary = (magnitude + (magnitude * magnitude - 1.0).sqrt()).ln();
    ComplexNumber::new(std::f64::consts::FRAC_PI_2.copysign(x), imaginary.copysign(x))
}

/// Returns the inverse sine. A real argument outside `[-1, 1]` yields the
/// Complex branch.
pub fn asin(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Real(r) if r.abs() <= 1.0 => Ok(Value::Real(r.asin())),
        Value::Real(r) => Ok(Value::Complex(asin_real_branch(*r))),
        Value::Complex(c) => Ok(c.asin().checked_as_real()),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// Returns the inverse cosine. A real argument outside `[-1, 1]` yields the
/// Complex branch `pi/2 - asin(x)`.
pub fn acos(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Real(r) if r.abs() <= 1.0 => Ok(Value::Real(r.acos())),
        Value::Real(r) => {
            let asin = asin_real_branch(*r);
            Ok((ComplexNumber::new(std::f64::consts::FRAC_PI_2, 0.0) - asin).checked_as_real())
        },
        Value::Complex(c) => Ok(c.acos().checked_as_real()),
        _ => Err(RuntimeError::ExpectedNumber { line }),
    }
}

/// Returns the inverse tangent.
pub fn atan(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.atan()))
}

/// Returns the secant of the argument.
pub fn sec(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.cos().recip()))
}

/// Returns the cosecant of the argument.
pub fn csc(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.sin().recip()))
}

/// Returns the cotangent of the argument.
pub fn cot(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.tan().recip()))
}

/// Returns the inverse hyperbolic sine.
pub fn asinh(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_real(line)?.asinh()))
}

/// Returns the inverse hyperbolic cosine. An argument below 1 yields the
/// Complex branch `ln(z + sqrt(z^2 - 1))`.
pub fn acosh(args: &[Value], line: usize) -> EvalResult<Value> {
    let x = args[0].as_real(line)?;
    if x >= 1.0 {
        return Ok(Value::Real(x.acosh()));
    }

    let z = ComplexNumber::from(x);
    let inner = (z * z - ComplexNumber::from(1.0)).sqrt() + z;
    Ok(inner.ln().checked_as_real())
}

/// Returns the inverse hyperbolic tangent. An argument outside `(-1, 1)`
/// yields the Complex branch `ln((1 + z) / (1 - z)) / 2`.
pub fn atanh(args: &[Value], line: usize) -> EvalResult<Value> {
    let x = args[0].as_real(line)?;
    if x.abs() < 1.0 {
        return Ok(Value::Real(x.atanh()));
    }
    if x.abs() == 1.0 {
        return Err(RuntimeError::DivisionByZero { line });
    }

    let z = ComplexNumber::from(x);
    let one = ComplexNumber::from(1.0);
    let half = ComplexNumber::from(0.5);
    Ok((half * ((one + z) / (one - z)).ln()).checked_as_real())
}

/// Returns the versed sine of the argument.
pub fn versin(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(1.0 - args[0].as_real(line)?.cos()))
}

/// Returns the versed cosine of the argument.
pub fn vercos(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(1.0 + args[0].as_real(line)?.cos()))
}

/// Returns the haversed sine of the argument.
pub fn haversin(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real((1.0 - args[0].as_real(line)?.cos()) / 2.0))
}

/// Returns the haversed cosine of the argument.
pub fn havercos(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real((1.0 + args[0].as_real(line)?.cos()) / 2.0))
}
