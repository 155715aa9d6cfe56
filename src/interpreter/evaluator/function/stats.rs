use std::collections::HashMap;

use ordered_float::OrderedFloat;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::core::collect_numbers},
        value::core::Value,
    },
    util::num::exact_to_i64,
};

/// Returns the arithmetic mean of the arguments.
///
/// # Example
/// ```
/// use algoscript::interpreter::{evaluator::function::stats::mean, value::core::Value};
///
/// let m = mean(&[Value::Real(2.0), Value::Real(4.0), Value::Real(6.0)], 1).unwrap();
/// assert_eq!(m, Value::Real(4.0));
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn mean(args: &[Value], line: usize) -> EvalResult<Value> {
    let values = collect_numbers(args, line)?;

    Ok(Value::Real(values.iter().sum::<f64>() / values.len() as f64))
}

/// Returns the median of the arguments.
pub fn median(args: &[Value], line: usize) -> EvalResult<Value> {
    let mut values = collect_numbers(args, line)?;
    values.sort_by_key(|v| OrderedFloat(*v));

    let mid = values.len() / 2;
    let median = if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    };
    Ok(Value::Real(median))
}

/// Returns the mode of the arguments. Ties resolve to the smallest value.
pub fn mode(args: &[Value], line: usize) -> EvalResult<Value> {
    let values = collect_numbers(args, line)?;

    let mut counts: HashMap<OrderedFloat<f64>, usize> = HashMap::new();
    for value in &values {
        *counts.entry(OrderedFloat(*value)).or_insert(0) += 1;
    }

    let mode = counts.iter()
                     .map(|(value, count)| (*count, *value))
                     .max_by_key(|(count, value)| (*count, std::cmp::Reverse(*value)))
                     .map(|(_, value)| value.into_inner())
                     .unwrap_or_default();
    Ok(Value::Real(mode))
}

/// Returns the sum of all the arguments.
pub fn sum(args: &[Value], line: usize) -> EvalResult<Value> {
    let values = collect_numbers(args, line)?;
    Ok(Value::Real(values.iter().sum()))
}

/// Returns the minimum of the arguments.
pub fn min(args: &[Value], line: usize) -> EvalResult<Value> {
    let values = collect_numbers(args, line)?;
    Ok(Value::Real(values.iter().copied().fold(f64::INFINITY, f64::min)))
}

/// Returns the maximum of the arguments.
pub fn max(args: &[Value], line: usize) -> EvalResult<Value> {
    let values = collect_numbers(args, line)?;
    Ok(Value::Real(values.iter().copied().fold(f64::NEG_INFINITY, f64::max)))
}

#[allow(clippy::cast_precision_loss)]
fn squared_deviations(values: &[f64]) -> (f64, f64) {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let total = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>();
    (total, values.len() as f64)
}

/// Returns the population variance of the arguments.
pub fn variance(args: &[Value], line: usize) -> EvalResult<Value> {
    let values = collect_numbers(args, line)?;
    let (total, n) = squared_deviations(&values);
    Ok(Value::Real(total / n))
}

/// Returns the sample variance of the arguments.
pub fn variance_sample(args: &[Value], line: usize) -> EvalResult<Value> {
    let values = collect_numbers(args, line)?;
    if values.len() < 2 {
        return Err(RuntimeError::InvalidArgument { details: "sample variance requires at least two values".to_string(),
                                                   line });
    }
    let (total, n) = squared_deviations(&values);
    Ok(Value::Real(total / (n - 1.0)))
}

/// Returns the population standard deviation of the arguments.
pub fn stdev(args: &[Value], line: usize) -> EvalResult<Value> {
    match variance(args, line)? {
        Value::Real(v) => Ok(Value::Real(v.sqrt())),
        other => Ok(other),
    }
}

/// Returns the sample standard deviation of the arguments.
pub fn stdev_sample(args: &[Value], line: usize) -> EvalResult<Value> {
    match variance_sample(args, line)? {
        Value::Real(v) => Ok(Value::Real(v.sqrt())),
        other => Ok(other),
    }
}

/// Returns the harmonic mean of the arguments.
#[allow(clippy::cast_precision_loss)]
pub fn harmonic_mean(args: &[Value], line: usize) -> EvalResult<Value> {
    let values = collect_numbers(args, line)?;

    let mut reciprocal_sum = 0.0;
    for value in &values {
        if *value == 0.0 {
            return Err(RuntimeError::InvalidArgument { details: "harmonic mean is undefined for zero values".to_string(),
                                                       line });
        }
        reciprocal_sum += value.recip();
    }

    Ok(Value::Real(values.len() as f64 / reciprocal_sum))
}

/// Returns the binomial coefficient for a subset of size `k` and a set of
/// size `n`.
pub fn binomial(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = exact_to_i64(args[0].as_real(line)?, line)?;
    let k = exact_to_i64(args[1].as_real(line)?, line)?;

    if n < 0 || k < 0 || k > n {
        return Ok(Value::Real(0.0));
    }

    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 1..=k {
        #[allow(clippy::cast_precision_loss)]
        {
            result = result * (n - k + i) as f64 / i as f64;
        }
    }
    Ok(Value::Real(result.round()))
}

/// Returns the factorial of a non-negative integer.
///
/// # Example
/// ```
/// use algoscript::interpreter::{evaluator::function::stats::factorial, value::core::Value};
///
/// assert_eq!(factorial(&[Value::Real(5.0)], 1).unwrap(), Value::Real(120.0));
/// ```
pub fn factorial(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = exact_to_i64(args[0].as_real(line)?, line)?;

    if n < 0 {
        return Err(RuntimeError::InvalidArgument { details: "factorial of a negative number is undefined".to_string(),
                                                   line });
    }
    if n > 170 {
        return Err(RuntimeError::InvalidArgument { details: format!("factorial of {n} does not fit in a Number"),
                                                   line });
    }

    let mut result = 1.0;
    for i in 2..=n {
        #[allow(clippy::cast_precision_loss)]
        {
            result *= i as f64;
        }
    }
    Ok(Value::Real(result))
}

/// Returns the `n`-th Fibonacci number.
pub fn fib(args: &[Value], line: usize) -> EvalResult<Value> {
    let n = exact_to_i64(args[0].as_real(line)?, line)?;

    if n < 0 {
        return Err(RuntimeError::InvalidArgument { details: "Fibonacci numbers are indexed from zero".to_string(),
                                                   line });
    }

    let (mut a, mut b) = (0.0_f64, 1.0_f64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    Ok(Value::Real(a))
}

/// Computes the gamma function via the Lanczos approximation (g = 7, 9
/// terms), with the reflection formula below 0.5. Non-positive integers
/// are poles.
pub fn gamma(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(gamma_impl(args[0].as_real(line)?, line)?))
}

pub(crate) fn gamma_impl(z: f64, line: usize) -> EvalResult<f64> {
    // Standard Lanczos coefficients from Numerical Recipes.
    const COEFFS: [f64; 9] = [0.999_999_999_999_809_9,
                              676.520_368_121_885_1,
                              -1_259.139_216_722_402_8,
                              771.323_428_777_653_1,
                              -176.615_029_162_140_6,
                              12.507_343_278_686_905,
                              -0.138_571_095_265_720_12,
                              9.984_369_578_019_572e-6,
                              1.505_632_735_149_311_6e-7];
    const G: f64 = 7.0;

    if z <= 0.0 && z.fract() == 0.0 {
        return Err(RuntimeError::InvalidArgument { details: format!("gamma has a pole at {z}"),
                                                   line });
    }

    if z < 0.5 {
        return Ok(std::f64::consts::PI
                  / ((std::f64::consts::PI * z).sin() * gamma_impl(1.0 - z, line)?));
    }

    let z_minus_1 = z - 1.0;
    let mut x = COEFFS[0];

    for (i, &c) in COEFFS.iter().enumerate().skip(1) {
        #[allow(clippy::cast_precision_loss)]
        {
            x += c / (z_minus_1 + i as f64);
        }
    }

    let t = z_minus_1 + G + 0.5;
    Ok((std::f64::consts::TAU).sqrt() * t.powf(z_minus_1 + 0.5) * (-t).exp() * x)
}

/// Returns the natural logarithm of the absolute value of the gamma
/// function.
pub fn lgamma(args: &[Value], line: usize) -> EvalResult<Value> {
    Ok(Value::Real(gamma_impl(args[0].as_real(line)?, line)?.abs().ln()))
}

/// Returns the beta function `B(a, b) = gamma(a) gamma(b) / gamma(a + b)`.
pub fn beta(args: &[Value], line: usize) -> EvalResult<Value> {
    let a = args[0].as_real(line)?;
    let b = args[1].as_real(line)?;

    Ok(Value::Real(gamma_impl(a, line)? * gamma_impl(b, line)? / gamma_impl(a + b, line)?))
}
