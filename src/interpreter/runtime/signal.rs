use crate::interpreter::value::core::Value;

/// The control-flow outcome of executing a block of statements.
///
/// Any non-`Normal` signal immediately stops the block that produced it and
/// propagates to the caller, until it reaches the construct that consumes
/// it: a loop consumes `Break` (ending the loop normally) and `Continue`
/// (skipping to the next iteration test); a function body consumes `Return`
/// (ending the call with the carried value). A signal that reaches the top
/// of the program, or a function-body boundary it cannot cross, is a
/// control-flow-misuse error reported at the line the signal carries.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// The block ran to completion.
    Normal,
    /// A BREAK statement was executed.
    Break {
        /// Line of the BREAK statement.
        line: usize,
    },
    /// A CONTINUE statement was executed.
    Continue {
        /// Line of the CONTINUE statement.
        line: usize,
    },
    /// A RETURN statement was executed.
    Return {
        /// The returned value, if any.
        value: Option<Value>,
        /// Line of the RETURN statement.
        line:  usize,
    },
}
