use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Tries to convert the argument to Number.
///
/// Booleans become 0 or 1; strings are parsed as numeric text; numbers pass
/// through unchanged.
pub fn num_cast(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Real(_) | Value::Complex(_) => Ok(args[0].clone()),
        Value::Bool(b) => Ok(Value::Real(if *b { 1.0 } else { 0.0 })),
        Value::Str(s) => s.trim().parse::<f64>().map(Value::Real).map_err(|_| {
                             RuntimeError::InvalidArgument { details: format!("cannot convert \"{s}\" to Number"),
                                                             line }
                         }),
        other => {
            Err(RuntimeError::InvalidArgument { details: format!("cannot convert {} to Number",
                                                                 other.type_name()),
                                                line })
        },
    }
}

/// Converts the argument to String, using the DISPLAY rendering.
#[allow(clippy::unnecessary_wraps)]
pub fn str_cast(args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::Str(args[0].to_string()))
}

/// Tries to convert the argument to Boolean.
///
/// Numbers are true when non-zero; strings must spell a boolean literal
/// (localized spellings included).
pub fn bool_cast(args: &[Value], line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::Bool(_) => Ok(args[0].clone()),
        Value::Real(r) => Ok(Value::Bool(*r != 0.0)),
        Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "vrai" => Ok(Value::Bool(true)),
            "false" | "faux" => Ok(Value::Bool(false)),
            _ => Err(RuntimeError::InvalidArgument { details: format!("cannot convert \"{s}\" to Boolean"),
                                                     line }),
        },
        other => {
            Err(RuntimeError::InvalidArgument { details: format!("cannot convert {} to Boolean",
                                                                 other.type_name()),
                                                line })
        },
    }
}

/// Tries to convert the argument to List.
///
/// Lists pass through; a string becomes the list of its characters; any
/// other value becomes a one-element list.
#[allow(clippy::unnecessary_wraps)]
pub fn list_cast(args: &[Value], _line: usize) -> EvalResult<Value> {
    match &args[0] {
        Value::List(_) => Ok(args[0].clone()),
        Value::Str(s) => {
            let chars = s.chars()
                         .map(|c| Value::Str(c.to_string()))
                         .collect::<Vec<_>>();
            Ok(Value::from(chars))
        },
        other => Ok(Value::from(vec![other.clone()])),
    }
}
