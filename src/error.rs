/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of
/// expression text. Parse errors include syntax mistakes, unexpected tokens
/// and misplaced expand markers, each reported with a source offset.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a program:
/// type mismatches, division by zero, out-of-range indexing, arity and
/// argument-type violations, and misuse of control-flow statements. Each
/// carries the line of the statement that raised it.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
