use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        runtime::core::Machine,
        value::{complex::ComplexNumber, core::Value},
    },
    util::num::{exact_to_i64, is_integer_valued},
};

/// A pair of numeric operands brought to a common representation.
///
/// Two reals stay real; any complex operand promotes both sides to complex.
enum NumericPair {
    Real(f64, f64),
    Complex(ComplexNumber, ComplexNumber),
}

/// Returns the numeric pairing of two values, or `None` if either operand
/// is not a Number.
fn numeric_pair(left: &Value, right: &Value) -> Option<NumericPair> {
    match (left, right) {
        (Value::Real(a), Value::Real(b)) => Some(NumericPair::Real(*a, *b)),
        (Value::Complex(a), Value::Complex(b)) => Some(NumericPair::Complex(*a, *b)),
        (Value::Real(a), Value::Complex(b)) => Some(NumericPair::Complex((*a).into(), *b)),
        (Value::Complex(a), Value::Real(b)) => Some(NumericPair::Complex(*a, (*b).into())),
        _ => None,
    }
}

/// Builds the right error for an unsupported operand pairing: operands of
/// different types are a `TypeMismatch`, same-typed operands the operator
/// is simply not defined for are an `InvalidBinaryOperator`.
fn mismatch(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    if left.type_name() == right.type_name() {
        RuntimeError::InvalidBinaryOperator { op: op.to_string(),
                                              left: left.type_name(),
                                              right: right.type_name(),
                                              line }
    } else {
        RuntimeError::TypeMismatch { left: left.type_name(),
                                     right: right.type_name(),
                                     line }
    }
}

impl Machine<'_> {
    /// Applies a binary operator to two already-evaluated operands.
    pub(crate) fn eval_binary(&mut self,
                              op: BinaryOperator,
                              left: &Value,
                              right: &Value)
                              -> EvalResult<Value> {
        let line = self.line;

        match op {
            BinaryOperator::Add => eval_add(left, right, line),
            BinaryOperator::Sub => eval_sub(left, right, line),
            BinaryOperator::Mul => eval_mul(left, right, line),
            BinaryOperator::Div => eval_div(left, right, line),
            BinaryOperator::Pow => eval_pow(left, right, line),
            BinaryOperator::Less
            | BinaryOperator::Greater
            | BinaryOperator::LessEqual
            | BinaryOperator::GreaterEqual => eval_ordering(op, left, right, line),
            BinaryOperator::Equal => eval_equality(left, right, false, line),
            BinaryOperator::NotEqual => eval_equality(left, right, true, line),
            BinaryOperator::And | BinaryOperator::Or | BinaryOperator::Xor => {
                eval_logic(op, left, right, line)
            },
        }
    }
}

/// `+`: numeric addition, String concatenation or List concatenation.
fn eval_add(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    if let Some(pair) = numeric_pair(left, right) {
        return Ok(match pair {
            NumericPair::Real(a, b) => Value::Real(a + b),
            NumericPair::Complex(a, b) => (a + b).checked_as_real(),
        });
    }

    match (left, right) {
        (Value::Str(a), Value::Str(b)) => {
            let mut joined = a.clone();
            joined.push_str(b);
            Ok(Value::Str(joined))
        },
        (Value::List(a), Value::List(b)) => {
            let mut joined = a.as_ref().clone();
            joined.extend(b.iter().cloned());
            Ok(Value::from(joined))
        },
        _ => Err(mismatch(BinaryOperator::Add, left, right, line)),
    }
}

/// `-`: numeric subtraction.
fn eval_sub(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match numeric_pair(left, right) {
        Some(NumericPair::Real(a, b)) => Ok(Value::Real(a - b)),
        Some(NumericPair::Complex(a, b)) => Ok((a - b).checked_as_real()),
        None => Err(mismatch(BinaryOperator::Sub, left, right, line)),
    }
}

/// `*`: numeric multiplication, or List repetition by an integer-valued
/// Number (either operand order).
fn eval_mul(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    if let Some(pair) = numeric_pair(left, right) {
        return Ok(match pair {
            NumericPair::Real(a, b) => Value::Real(a * b),
            NumericPair::Complex(a, b) => (a * b).checked_as_real(),
        });
    }

    match (left, right) {
        (Value::List(items), count) | (count, Value::List(items)) if count.is_number() => {
            repeat_list(items, count, line)
        },
        _ => Err(mismatch(BinaryOperator::Mul, left, right, line)),
    }
}

/// Repeats a list `count` times; the count must be an integer-valued real.
fn repeat_list(items: &[Value], count: &Value, line: usize) -> EvalResult<Value> {
    let number = match count {
        Value::Real(r) if is_integer_valued(*r) => exact_to_i64(*r, line)?,
        other => {
            return Err(RuntimeError::NonIntegerRepeat { found: other.to_string(),
                                                        line });
        },
    };

    let times = usize::try_from(number.max(0)).unwrap_or(0);
    let mut repeated = Vec::with_capacity(items.len() * times);
    for _ in 0..times {
        repeated.extend(items.iter().cloned());
    }
    Ok(Value::from(repeated))
}

/// `/`: numeric division. A divisor that is exactly zero — real or complex
/// — fails with `DivisionByZero`.
fn eval_div(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match numeric_pair(left, right) {
        Some(NumericPair::Real(a, b)) => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok(Value::Real(a / b))
        },
        Some(NumericPair::Complex(a, b)) => {
            if b.is_zero() {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok((a / b).checked_as_real())
        },
        None => Err(mismatch(BinaryOperator::Div, left, right, line)),
    }
}

/// `^`: exponentiation. A negative real base with a non-integer exponent
/// promotes to the complex power, consistent with the square-root rule.
pub(crate) fn eval_pow(left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match numeric_pair(left, right) {
        Some(NumericPair::Real(a, b)) => {
            if a == 0.0 && b < 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            if a < 0.0 && b.fract() != 0.0 {
                return Ok(ComplexNumber::from(a).powc(b.into()).checked_as_real());
            }
            Ok(Value::Real(a.powf(b)))
        },
        Some(NumericPair::Complex(a, b)) => {
            if a.is_zero() && b.real < 0.0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            Ok(a.powc(b).checked_as_real())
        },
        None => Err(mismatch(BinaryOperator::Pow, left, right, line)),
    }
}

/// `< > <= >=`: defined for real Numbers and for Strings
/// (lexicographically). Complex numbers are not ordered.
fn eval_ordering(op: BinaryOperator,
                 left: &Value,
                 right: &Value,
                 line: usize)
                 -> EvalResult<Value> {
    let ordering = match (left, right) {
        (Value::Real(a), Value::Real(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => return Err(mismatch(op, left, right, line)),
    };

    let Some(ordering) = ordering else {
        // NaN comparisons are false, matching IEEE semantics.
        return Ok(Value::Bool(false));
    };

    let result = match op {
        BinaryOperator::Less => ordering == Ordering::Less,
        BinaryOperator::Greater => ordering == Ordering::Greater,
        BinaryOperator::LessEqual => ordering != Ordering::Greater,
        BinaryOperator::GreaterEqual => ordering != Ordering::Less,
        _ => unreachable!("caller only dispatches ordering operators"),
    };

    Ok(Value::Bool(result))
}

/// `= <>`: structural equality for every variant (Functions compare by
/// identity). Numbers compare after real→complex promotion, so `2 = 2 + 0i`
/// holds.
fn eval_equality(left: &Value, right: &Value, negated: bool, line: usize) -> EvalResult<Value> {
    let equal = if let Some(pair) = numeric_pair(left, right) {
        match pair {
            NumericPair::Real(a, b) => a == b,
            NumericPair::Complex(a, b) => a == b,
        }
    } else if left.type_name() == right.type_name() {
        left == right
    } else {
        return Err(mismatch(BinaryOperator::Equal, left, right, line));
    };

    Ok(Value::Bool(equal != negated))
}

/// `AND OR XOR`: Boolean logic. Both operands are always evaluated.
fn eval_logic(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => {
            let result = match op {
                BinaryOperator::And => *a && *b,
                BinaryOperator::Or => *a || *b,
                BinaryOperator::Xor => a != b,
                _ => unreachable!("caller only dispatches logical operators"),
            };
            Ok(Value::Bool(result))
        },
        _ => Err(mismatch(op, left, right, line)),
    }
}
