use std::{fmt, rc::Rc};

use crate::{
    ast::{FunctionDef, LiteralValue},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::complex::ComplexNumber},
};

/// Reference to a callable: either a user-defined function or a builtin.
///
/// Equality is by identity — user functions compare by `Rc` pointer, builtins
/// by name. Lists use deep structural equality instead; this asymmetry is a
/// deliberate, reviewable choice (see DESIGN.md).
#[derive(Debug, Clone)]
pub enum FunctionValue {
    /// A function registered by a function-definition statement.
    User(Rc<FunctionDef>),
    /// A natively implemented function, referenced by its catalog name.
    Builtin(&'static str),
}

impl FunctionValue {
    /// The callable's name, as shown to the user.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::User(def) => &def.name,
            Self::Builtin(name) => name,
        }
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::User(a), Self::User(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => a == b,
            _ => false,
        }
    }
}

/// Represents a runtime value in the interpreter.
///
/// This enum models all the types that can appear in expressions,
/// assignments, function returns and conditions. Numbers are real (`f64`) or
/// complex; arithmetic on two reals stays real, and any complex operand
/// promotes the result to complex. Lists may hold elements of mixed types.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A boolean value, produced by comparisons and logical operators.
    Bool(bool),
    /// A real number (double precision floating-point).
    Real(f64),
    /// A complex number (with real and imaginary parts).
    Complex(ComplexNumber),
    /// A string value.
    Str(String),
    /// An ordered sequence of values, possibly heterogeneous.
    List(Rc<Vec<Self>>),
    /// A callable value.
    Function(FunctionValue),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<ComplexNumber> for Value {
    fn from(c: ComplexNumber) -> Self {
        Self::Complex(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl Value {
    /// The user-facing name of the value's type, used in error messages.
    ///
    /// # Example
    /// ```
    /// use algoscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Real(1.0).type_name(), "Number");
    /// assert_eq!(Value::Bool(true).type_name(), "Boolean");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Boolean",
            Self::Real(_) | Self::Complex(_) => "Number",
            Self::Str(_) => "String",
            Self::List(_) => "List",
            Self::Function(_) => "Function",
        }
    }

    /// Returns `true` if the value is a real or complex number.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Real(_) | Self::Complex(_))
    }

    /// Converts the value to an `f64`, or returns an error if it is not a
    /// real number.
    ///
    /// # Parameters
    /// - `line`: Source line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use algoscript::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Real(10.0).as_real(1).unwrap(), 10.0);
    /// assert!(Value::Bool(true).as_real(1).is_err());
    /// ```
    pub const fn as_real(&self, line: usize) -> EvalResult<f64> {
        match self {
            Self::Real(r) => Ok(*r),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to a `ComplexNumber`, promoting reals.
    ///
    /// # Parameters
    /// - `line`: Source line number for error reporting.
    pub fn as_complex(&self, line: usize) -> EvalResult<ComplexNumber> {
        match self {
            Self::Complex(c) => Ok(*c),
            Self::Real(r) => Ok(ComplexNumber::from(*r)),
            _ => Err(RuntimeError::ExpectedNumber { line }),
        }
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for conditions in IF/WHILE statements and logical operators.
    ///
    /// # Parameters
    /// - `line`: Source line number for error reporting.
    pub const fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ExpectedBoolean { line }),
        }
    }

    /// Borrows the value as a string slice, or returns an error.
    ///
    /// # Parameters
    /// - `line`: Source line number for error reporting.
    pub fn as_str(&self, line: usize) -> EvalResult<&str> {
        match self {
            Self::Str(s) => Ok(s),
            _ => Err(RuntimeError::ExpectedString { line }),
        }
    }

    /// Borrows the value's elements, or fails with `ArrayAccessType` if the
    /// value is not a List.
    ///
    /// # Parameters
    /// - `line`: Source line number for error reporting.
    pub fn as_list(&self, line: usize) -> EvalResult<&[Self]> {
        match self {
            Self::List(items) => Ok(items),
            _ => Err(RuntimeError::ArrayAccessType { line }),
        }
    }

    /// Renders the value the way DISPLAY shows it: booleans as
    /// `TRUE`/`FALSE`, strings bare at the top level but quoted inside
    /// lists, complex numbers as `a + bi`.
    fn render(&self, f: &mut fmt::Formatter<'_>, nested: bool) -> fmt::Result {
        match self {
            Self::Bool(true) => write!(f, "TRUE"),
            Self::Bool(false) => write!(f, "FALSE"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::Str(s) => {
                if nested {
                    write!(f, "\"{s}\"")
                } else {
                    write!(f, "{s}")
                }
            },
            Self::List(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    item.render(f, true)?;
                }
                write!(f, "]")
            },
            Self::Function(callable) => write!(f, "FUNCTION {}", callable.name()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, false)
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Number(n) => (*n).into(),
            LiteralValue::Imaginary(n) => ComplexNumber::new(0.0, *n).checked_as_real(),
            LiteralValue::Bool(b) => (*b).into(),
            LiteralValue::Str(s) => s.clone().into(),
        }
    }
}
