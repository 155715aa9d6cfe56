#[derive(Debug)]
/// Represents all errors that can be raised while a program is executing.
///
/// Every variant carries the line number of the statement that was running
/// when the error was raised. None of these are retried internally; they
/// terminate the running program and are surfaced to the host.
pub enum RuntimeError {
    /// Tried to use a name that no scope, constant or function table defines.
    UnknownVariable {
        /// The name that failed to resolve.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A binary operator received operands of two different types.
    TypeMismatch {
        /// Type name of the left operand.
        left:  &'static str,
        /// Type name of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A binary operator received operands it is not defined for.
    InvalidBinaryOperator {
        /// The operator spelling.
        op:    String,
        /// Type name of the left operand.
        left:  &'static str,
        /// Type name of the right operand.
        right: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A unary operator received an operand it is not defined for.
    InvalidUnaryOperator {
        /// The operator spelling.
        op:      String,
        /// Type name of the operand.
        operand: &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Tried to repeat a List by something that is not an integer.
    NonIntegerRepeat {
        /// Rendering of the offending count value.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Attempted division by a divisor that is exactly zero.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access a list element outside the allowed bounds.
    IndexOutOfRange {
        /// The requested index, after truncation.
        index: i64,
        /// The length of the indexed list.
        len:   usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Indexed a value that is not a List.
    ArrayAccessType {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The left-hand side of an assignment was neither a variable nor an
    /// indexed list element.
    InvalidAssignmentTarget {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The number of arguments expected.
        expected: usize,
        /// The number of arguments supplied.
        actual:   usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A builtin argument violated its declared type constraint.
    ArgumentTypeMismatch {
        /// One-based index of the offending argument.
        index:    usize,
        /// Name of the expected type.
        expected: &'static str,
        /// Name of the type actually supplied.
        found:    &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An argument was outside a builtin's mathematical domain.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A boolean value was expected, but not found.
    ExpectedBoolean {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A real numeric value was expected, but not found.
    ExpectedNumber {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string value was expected, but not found.
    ExpectedString {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function used in value position produced no value.
    MissingValue {
        /// The source line where the error occurred.
        line: usize,
    },
    /// BREAK was executed outside any enclosing loop.
    BreakOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// CONTINUE was executed outside any enclosing loop.
    ContinueOutsideLoop {
        /// The source line where the error occurred.
        line: usize,
    },
    /// RETURN was executed outside any enclosing function.
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
    /// ELSE was executed without an immediately preceding IF block.
    ElseWithoutIf {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The external stop request was observed at a statement boundary.
    ///
    /// This is a deliberate early termination, not a failure;
    /// `run_program` converts it into `RunOutcome::Interrupted` so it never
    /// reaches the host as an error.
    Interrupted {
        /// The source line where execution stopped.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Cannot find variable or function '{name}'.")
            },
            Self::TypeMismatch { left, right, line } => write!(f,
                "Error on line {line}: Type mismatch: operands have different types ({left} and {right})."),

            Self::InvalidBinaryOperator { op, left, right, line } => write!(f,
                "Error on line {line}: Invalid binary operator '{op}' for {left} and {right}."),

            Self::InvalidUnaryOperator { op, operand, line } => write!(f,
                "Error on line {line}: Invalid unary operator '{op}' for {operand}."),

            Self::NonIntegerRepeat { found, line } => write!(f,
                "Error on line {line}: Trying to multiply List by non-integer ({found})."),

            Self::DivisionByZero { line } => {
                write!(f, "Error on line {line}: Trying to divide by zero.")
            },
            Self::IndexOutOfRange { index, len, line } => write!(f,
                "Error on line {line}: Index '{index}' is out of range for array of length {len}."),

            Self::ArrayAccessType { line } => {
                write!(f, "Error on line {line}: Array access target must be of array type.")
            },
            Self::InvalidAssignmentTarget { line } => write!(f,
                "Error on line {line}: Invalid assignment target (must be either variable or array item)."),

            Self::ArgumentCountMismatch { expected, actual, line } => write!(f,
                "Error on line {line}: Argument count mismatch (expected {expected}, got {actual})."),

            Self::ArgumentTypeMismatch { index, expected, found, line } => write!(f,
                "Error on line {line}: Type mismatch for argument #{index} (expected {expected}, got {found})."),

            Self::InvalidArgument { details, line } => {
                write!(f, "Error on line {line}: Invalid argument: {details}.")
            },
            Self::ExpectedBoolean { line } => write!(f, "Error on line {line}: Expected Boolean."),
            Self::ExpectedNumber { line } => write!(f, "Error on line {line}: Expected Number."),
            Self::ExpectedString { line } => write!(f, "Error on line {line}: Expected String."),
            Self::MissingValue { line } => {
                write!(f, "Error on line {line}: Function call produced no value.")
            },
            Self::BreakOutsideLoop { line } => {
                write!(f, "Error on line {line}: BREAK can only be used inside a loop.")
            },
            Self::ContinueOutsideLoop { line } => {
                write!(f, "Error on line {line}: CONTINUE can only be used inside a loop.")
            },
            Self::ReturnOutsideFunction { line } => {
                write!(f, "Error on line {line}: RETURN can only be used inside a function.")
            },
            Self::ElseWithoutIf { line } => {
                write!(f, "Error on line {line}: ELSE can only be used after an IF block.")
            },
            Self::Interrupted { line } => {
                write!(f, "Program interrupted on line {line}.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
