use crate::interpreter::value::core::Value;

/// Parses one line of host-supplied input into a `Value`.
///
/// The destination variable's prior value, when there is one, decides the
/// preferred type: a Boolean destination parses booleans, a Number
/// destination parses numbers, a String destination takes the text as-is.
/// When there is no prior value (or the text does not fit the prior type),
/// the type is inferred from the literal text: boolean, then number, then
/// string. Quoted text always becomes a String with the quotes stripped.
///
/// # Example
/// ```
/// use algoscript::interpreter::{runtime::input::parse_input_value, value::core::Value};
///
/// assert_eq!(parse_input_value("42", None), Value::Real(42.0));
/// assert_eq!(parse_input_value("true", None), Value::Bool(true));
/// assert_eq!(parse_input_value("hello", None), Value::Str("hello".to_string()));
///
/// // Prior type wins where the text allows it.
/// let prior = Value::Str("old".to_string());
/// assert_eq!(parse_input_value("42", Some(&prior)), Value::Str("42".to_string()));
/// ```
#[must_use]
pub fn parse_input_value(text: &str, prior: Option<&Value>) -> Value {
    let trimmed = text.trim();

    if let Some(stripped) = strip_quotes(trimmed) {
        return Value::Str(stripped.to_string());
    }

    match prior {
        Some(Value::Bool(_)) => {
            if let Some(b) = parse_bool(trimmed) {
                return Value::Bool(b);
            }
        },
        Some(Value::Real(_) | Value::Complex(_)) => {
            if let Ok(n) = trimmed.parse::<f64>() {
                return Value::Real(n);
            }
        },
        Some(Value::Str(_)) => return Value::Str(trimmed.to_string()),
        _ => {},
    }

    if let Some(b) = parse_bool(trimmed) {
        return Value::Bool(b);
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return Value::Real(n);
    }
    Value::Str(trimmed.to_string())
}

/// Recognizes boolean spellings, including the localized ones,
/// case-insensitively.
fn parse_bool(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "vrai" => Some(true),
        "false" | "faux" => Some(false),
        _ => None,
    }
}

/// Returns the inner text when the input is wrapped in matching quotes.
fn strip_quotes(text: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            return Some(&text[1..text.len() - 1]);
        }
    }
    None
}
