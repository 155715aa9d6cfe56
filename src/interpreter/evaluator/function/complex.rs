use crate::{
    interpreter::{
        evaluator::core::EvalResult,
        value::{complex::ComplexNumber, core::Value},
    },
};

/// Returns the real part of the argument.
pub fn re(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_complex(line)?.real))
}

/// Returns the imaginary part of the argument.
pub fn im(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_complex(line)?.imaginary))
}

/// Returns the complex conjugate of the argument.
pub fn conj(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(args[0].as_complex(line)?.conj().checked_as_real())
}

/// Returns the argument (phase angle) of the number, in radians.
pub fn arg(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(args[0].as_complex(line)?.arg()))
}

/// Converts the number to polar coordinates, as the list
/// `[magnitude, angle]`.
pub fn polar(args: &[Value], line: usize) -> EvalResult<Value> {
    let z = args[0].as_complex(line)?;
    Ok(Value::from(vec![Value::Real(z.abs()), Value::Real(z.arg())]))
}

/// Converts polar coordinates to a complex number.
pub fn rect(args: &[Value], line: usize) -> EvalResult<Value> {
    let r = args[0].as_real(line)?;
    let theta = args[1].as_real(line)?;
    Ok(ComplexNumber::new(r * theta.cos(), r * theta.sin()).checked_as_real())
}
