use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        runtime::core::Machine,
        value::{
            complex::ComplexNumber,
            core::{FunctionValue, Value},
        },
    },
    util::num::exact_to_i64,
};

/// Central-difference step for the numerical derivative.
const GRADIENT_STEP: f64 = 1e-6;
/// Default number of midpoint steps for the definite integral.
const INTEG_STEPS: i64 = 1000;

fn expect_function<'a>(args: &'a [Value], index: usize, line: usize) -> EvalResult<&'a FunctionValue> {
    match &args[index] {
        Value::Function(f) => Ok(f),
        other => Err(RuntimeError::ArgumentTypeMismatch { index: index + 1,
                                                          expected: "Function",
                                                          found: other.type_name(),
                                                          line }),
    }
}

fn expect_real(args: &[Value], index: usize, line: usize) -> EvalResult<f64> {
    match &args[index] {
        Value::Real(r) => Ok(*r),
        other => Err(RuntimeError::ArgumentTypeMismatch { index: index + 1,
                                                          expected: "Number",
                                                          found: other.type_name(),
                                                          line }),
    }
}

impl Machine<'_> {
    /// Applies a Function value to one real argument and returns the result
    /// as a complex number (reals promote), so the calculus builtins handle
    /// functions that stray into the complex plane.
    fn apply_at(&mut self, f: &FunctionValue, x: f64) -> EvalResult<ComplexNumber> {
        let line = self.line;
        let result = self.invoke(f, vec![Value::Real(x)])?
                         .ok_or(RuntimeError::MissingValue { line })?;
        result.as_complex(line)
    }

    /// `gradient(f, x)` / `derivative(f, x)`: the numerical derivative of
    /// `f` at `x`, by central difference with a fixed step.
    pub(crate) fn builtin_gradient(&mut self, args: &[Value]) -> EvalResult<Value> {
        let line = self.line;
        if args.len() != 2 {
            return Err(RuntimeError::ArgumentCountMismatch { expected: 2,
                                                             actual: args.len(),
                                                             line });
        }

        let f = expect_function(args, 0, line)?.clone();
        let x = expect_real(args, 1, line)?;

        let above = self.apply_at(&f, x + GRADIENT_STEP)?;
        let below = self.apply_at(&f, x - GRADIENT_STEP)?;

        let slope = (above - below) / ComplexNumber::from(2.0 * GRADIENT_STEP);
        Ok(slope.checked_as_real())
    }

    /// `integ(f, a, b, steps?)`: the definite integral of `f` from `a` to
    /// `b` by the midpoint rule with a fixed step count.
    pub(crate) fn builtin_integ(&mut self, args: &[Value]) -> EvalResult<Value> {
        let line = self.line;
        if args.len() < 3 || args.len() > 4 {
            return Err(RuntimeError::ArgumentCountMismatch { expected: 3,
                                                             actual: args.len(),
                                                             line });
        }

        let f = expect_function(args, 0, line)?.clone();
        let a = expect_real(args, 1, line)?;
        let b = expect_real(args, 2, line)?;
        let steps = match args.get(3) {
            Some(value) => exact_to_i64(expect_real(args, 3, line)?, line).and_then(|steps| {
                               if steps >= 1 {
                                   Ok(steps)
                               } else {
                                   Err(RuntimeError::InvalidArgument { details: format!("{value} is not a valid step count"),
                                                                       line })
                               }
                           })?,
            None => INTEG_STEPS,
        };

        #[allow(clippy::cast_precision_loss)]
        let dx = (b - a) / steps as f64;
        let mut total = ComplexNumber::from(0.0);

        for i in 0..steps {
            #[allow(clippy::cast_precision_loss)]
            let x = dx.mul_add(i as f64 + 0.5, a);
            total = total + self.apply_at(&f, x)? * ComplexNumber::from(dx);
        }

        Ok(total.checked_as_real())
    }
}
