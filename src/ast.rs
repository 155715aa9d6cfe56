use std::fmt;

/// Represents a literal value in an expression.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// expression source text: numbers, imaginary numbers, booleans and strings.
/// It is produced by the parser and converted into a runtime `Value` by the
/// evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A real number literal such as `42` or `3.5`.
    Number(f64),
    /// An imaginary number literal such as `3i` (the coefficient of `i`).
    Imaginary(f64),
    /// A boolean literal: `TRUE` or `FALSE`.
    Bool(bool),
    /// A string literal, single- or double-quoted.
    Str(String),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// `Expr` is a closed set of variants: literals, identifiers, unary and
/// binary operations, calls, indexing and list literals. Every node owns its
/// children exclusively and is immutable after parsing. Each node carries the
/// source offset of the token that introduced it, for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal {
        /// The constant value.
        value:  LiteralValue,
        /// Byte offset in the expression source.
        offset: usize,
    },
    /// Reference to a variable, constant or function by name.
    Identifier {
        /// The referenced name.
        name:   String,
        /// Byte offset in the expression source.
        offset: usize,
    },
    /// A unary operation (negation or logical NOT).
    UnaryOp {
        /// The unary operator to apply.
        op:     UnaryOperator,
        /// The operand expression.
        expr:   Box<Self>,
        /// Byte offset in the expression source.
        offset: usize,
    },
    /// A binary operation (arithmetic, comparison or logic).
    BinaryOp {
        /// The operator.
        op:     BinaryOperator,
        /// Left operand.
        left:   Box<Self>,
        /// Right operand.
        right:  Box<Self>,
        /// Byte offset in the expression source.
        offset: usize,
    },
    /// A call expression (e.g. `sqrt(x)`). The callee is itself an
    /// expression, so functions stored in variables can be called too.
    Call {
        /// The expression producing the callable.
        callee:      Box<Self>,
        /// Argument expressions, in call order.
        arguments:   Vec<Self>,
        /// Whether the last argument carries the expand marker `*`,
        /// splicing its List value into individual positional arguments.
        expand_last: bool,
        /// Byte offset in the expression source.
        offset:      usize,
    },
    /// An indexing expression (e.g. `values[2]`).
    Index {
        /// The expression producing the list.
        target: Box<Self>,
        /// The index expression.
        index:  Box<Self>,
        /// Byte offset in the expression source.
        offset: usize,
    },
    /// A list literal (e.g. `[1, 2, 3]`).
    ListLiteral {
        /// Element expressions.
        elements: Vec<Self>,
        /// Byte offset in the expression source.
        offset:   usize,
    },
}

impl Expr {
    /// Gets the source offset from `self`.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Literal { offset, .. }
            | Self::Identifier { offset, .. }
            | Self::UnaryOp { offset, .. }
            | Self::BinaryOp { offset, .. }
            | Self::Call { offset, .. }
            | Self::Index { offset, .. }
            | Self::ListLiteral { offset, .. } => *offset,
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition / concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication / list repetition (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`=`)
    Equal,
    /// Not equal to (`<>`)
    NotEqual,
    /// Logical and (`AND`)
    And,
    /// Logical or (`OR`)
    Or,
    /// Logical exclusive or (`XOR`)
    Xor,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `NOT x`).
    Not,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
        };
        write!(f, "{operator}")
    }
}

impl BinaryOperator {
    /// Binding strength of the operator, higher binds tighter.
    /// Used by the printer to decide where parentheses are required.
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::Xor => 2,
            Self::And => 3,
            Self::Less
            | Self::Greater
            | Self::LessEqual
            | Self::GreaterEqual
            | Self::Equal
            | Self::NotEqual => 5,
            Self::Add | Self::Sub => 6,
            Self::Mul | Self::Div => 7,
            Self::Pow => 9,
        }
    }
}

/// Represents a user-defined function.
///
/// A function binds an ordered list of parameter names to a body block.
/// Once registered by a function-definition statement it is immutable;
/// redefining the same name replaces the whole definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, in binding order.
    pub params: Vec<String>,
    /// The statements executed when the function is called.
    pub body:   Vec<Statement>,
    /// Line number in the source program.
    pub line:   usize,
}

/// Represents one statement of a pseudocode program.
///
/// Statements are typed nodes supplied by the host (the surrounding editor
/// builds them from its block structure). A block is an ordered `Vec` of
/// statements; blocks form a strict tree. Every variant carries the source
/// line it came from so runtime errors can point at the offending statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Assigns a value to a variable or to an indexed list element.
    Define {
        /// Assignment target: an identifier or an index chain rooted at one.
        target: Expr,
        /// The value expression.
        value:  Expr,
        /// Line number in the source program.
        line:   usize,
    },
    /// Renders a value to the output collaborator.
    Display {
        /// The value expression.
        value:   Expr,
        /// Whether a line break follows the text.
        newline: bool,
        /// Line number in the source program.
        line:    usize,
    },
    /// Requests a line from the input collaborator and stores it.
    Input {
        /// Destination variable name.
        variable: String,
        /// Optional prompt expression, rendered before the request.
        prompt:   Option<Expr>,
        /// Line number in the source program.
        line:     usize,
    },
    /// Conditional block.
    If {
        /// The condition, evaluated on entry; must be Boolean.
        condition: Expr,
        /// Statements executed when the condition holds.
        block:     Vec<Statement>,
        /// Line number in the source program.
        line:      usize,
    },
    /// Alternative block, consumed by the immediately preceding `If` in the
    /// same sequence. Anywhere else it is an `ElseWithoutIf` error.
    Else {
        /// Statements executed when the preceding condition did not hold.
        block: Vec<Statement>,
        /// Line number in the source program.
        line:  usize,
    },
    /// Pre-checked loop.
    While {
        /// The condition, re-evaluated before every iteration.
        condition: Expr,
        /// Loop body.
        block:     Vec<Statement>,
        /// Line number in the source program.
        line:      usize,
    },
    /// Counted loop, inclusive of both bounds.
    For {
        /// The loop variable, bound in a fresh per-iteration scope.
        variable: String,
        /// Start bound.
        from:     Expr,
        /// End bound (inclusive).
        to:       Expr,
        /// Optional step; defaults to 1. Its sign decides the direction.
        step:     Option<Expr>,
        /// Loop body.
        block:    Vec<Statement>,
        /// Line number in the source program.
        line:     usize,
    },
    /// Registers a user-defined function. Redefinition overwrites.
    Function(FunctionDef),
    /// Calls a function by name, discarding its result.
    Call {
        /// Name of the function.
        name:      String,
        /// Argument expressions.
        arguments: Vec<Expr>,
        /// Line number in the source program.
        line:      usize,
    },
    /// Exits the enclosing function, optionally with a value.
    Return {
        /// Optional result expression.
        value: Option<Expr>,
        /// Line number in the source program.
        line:  usize,
    },
    /// Terminates the innermost enclosing loop.
    Break {
        /// Line number in the source program.
        line: usize,
    },
    /// Skips to the next iteration test of the innermost enclosing loop.
    Continue {
        /// Line number in the source program.
        line: usize,
    },
    /// Suspends execution for the evaluated number of seconds.
    Sleep {
        /// Duration expression, in seconds.
        duration: Expr,
        /// Line number in the source program.
        line:     usize,
    },
    /// Clears the plot canvas.
    ClearPlot {
        /// Line number in the source program.
        line: usize,
    },
    /// Draws a line segment on the plot canvas.
    DrawLine {
        /// Start abscissa.
        x1:    Expr,
        /// Start ordinate.
        y1:    Expr,
        /// End abscissa.
        x2:    Expr,
        /// End ordinate.
        y2:    Expr,
        /// Color name or RGB hex string.
        color: Expr,
        /// Line number in the source program.
        line:  usize,
    },
    /// Draws a single point on the plot canvas.
    DrawPoint {
        /// Abscissa.
        x:     Expr,
        /// Ordinate.
        y:     Expr,
        /// Color name or RGB hex string.
        color: Expr,
        /// Line number in the source program.
        line:  usize,
    },
    /// Plots a function curve over an interval.
    PlotFunction {
        /// The free variable of the plotted expression.
        variable: String,
        /// The expression evaluated at each sample point.
        body:     Expr,
        /// Interval start.
        from:     Expr,
        /// Interval end.
        to:       Expr,
        /// Sampling step.
        step:     Expr,
        /// Color name or RGB hex string.
        color:    Expr,
        /// Line number in the source program.
        line:     usize,
    },
    /// Changes the plot window bounds and graduations (0 = automatic).
    SetWindow {
        /// Left bound.
        x_min:  Expr,
        /// Right bound.
        x_max:  Expr,
        /// Bottom bound.
        y_min:  Expr,
        /// Top bound.
        y_max:  Expr,
        /// Horizontal graduation.
        x_grad: Expr,
        /// Vertical graduation.
        y_grad: Expr,
        /// Line number in the source program.
        line:   usize,
    },
    /// A comment; has no effect whatsoever on execution.
    Comment {
        /// The comment text.
        text: String,
        /// Line number in the source program.
        line: usize,
    },
}

impl Statement {
    /// Gets the source line number from `self`.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Define { line, .. }
            | Self::Display { line, .. }
            | Self::Input { line, .. }
            | Self::If { line, .. }
            | Self::Else { line, .. }
            | Self::While { line, .. }
            | Self::For { line, .. }
            | Self::Call { line, .. }
            | Self::Return { line, .. }
            | Self::Break { line }
            | Self::Continue { line }
            | Self::Sleep { line, .. }
            | Self::ClearPlot { line }
            | Self::DrawLine { line, .. }
            | Self::DrawPoint { line, .. }
            | Self::PlotFunction { line, .. }
            | Self::SetWindow { line, .. }
            | Self::Comment { line, .. } => *line,
            Self::Function(def) => def.line,
        }
    }
}

/// Binding strength of postfix forms (index, call).
const POSTFIX_PRECEDENCE: u8 = 10;

impl Expr {
    /// Binding strength used by the printer; higher binds tighter.
    const fn print_precedence(&self) -> u8 {
        match self {
            Self::BinaryOp { op, .. } => op.precedence(),
            Self::UnaryOp { op: UnaryOperator::Not, .. } => 4,
            Self::UnaryOp { op: UnaryOperator::Negate, .. } => 8,
            Self::Call { .. } | Self::Index { .. } => POSTFIX_PRECEDENCE,
            Self::Literal { .. } | Self::Identifier { .. } | Self::ListLiteral { .. } => 11,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.print_precedence() < min_precedence {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

/// Re-serializes the expression to canonical ("beautified") text.
///
/// The output uses uppercase word operators and boolean literals, a single
/// space around binary operators and the minimum parentheses required for
/// the text to re-parse into a structurally identical tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => match value {
                LiteralValue::Number(n) => write!(f, "{n}"),
                LiteralValue::Imaginary(n) => write!(f, "{n}i"),
                LiteralValue::Bool(true) => write!(f, "TRUE"),
                LiteralValue::Bool(false) => write!(f, "FALSE"),
                LiteralValue::Str(s) => write!(f, "\"{s}\""),
            },
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::UnaryOp { op, expr, .. } => {
                let min = self.print_precedence();
                match op {
                    UnaryOperator::Negate => write!(f, "-")?,
                    UnaryOperator::Not => write!(f, "NOT ")?,
                }
                expr.fmt_child(f, min)
            },
            Self::BinaryOp { op, left, right, .. } => {
                let precedence = op.precedence();
                // `^` is right-associative, everything else left-associative.
                let (left_min, right_min) = if matches!(op, BinaryOperator::Pow) {
                    (precedence + 1, precedence)
                } else {
                    (precedence, precedence + 1)
                };
                left.fmt_child(f, left_min)?;
                write!(f, " {op} ")?;
                right.fmt_child(f, right_min)
            },
            Self::Call { callee, arguments, expand_last, .. } => {
                callee.fmt_child(f, POSTFIX_PRECEDENCE)?;
                write!(f, "(")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    if *expand_last && index == arguments.len() - 1 {
                        write!(f, "*")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
            Self::Index { target, index, .. } => {
                target.fmt_child(f, POSTFIX_PRECEDENCE)?;
                write!(f, "[{index}]")
            },
            Self::ListLiteral { elements, .. } => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
        }
    }
}
