//! # algoscript
//!
//! algoscript is the runtime core of an educational pseudocode
//! environment. It parses and evaluates expressions (booleans, real and
//! complex numbers, strings, heterogeneous lists, functions) and executes
//! block-structured programs: variables with write-through scoping,
//! conditionals, loops, user-defined functions, console I/O and plotting
//! side effects emitted to host-supplied collaborators.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent expressions and programs as trees. Expression nodes carry
/// source offsets and statements carry source lines for error reporting;
/// the `Display` impl on `Expr` re-serializes a tree to canonical text.
pub mod ast;
/// Provides unified error types for parsing and execution.
///
/// This module defines all errors that can be raised during lexing, parsing
/// or running code, standardizing error reporting with source positions and
/// detailed messages.
pub mod error;
/// Orchestrates the entire process of program execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations, scoping, statement execution and the host collaborator
/// surfaces. It exposes the public API for parsing expressions, evaluating
/// them, and running whole programs.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

pub use crate::{
    ast::{Expr, FunctionDef, Statement},
    error::{ParseError, RuntimeError},
    interpreter::{
        env::Environment,
        io::{NullIo, NullPlot, PlotSurface, ProgramIo},
        parser::{parse_expression, parse_optional_expression},
        runtime::{evaluate_expression, run_program, RunOutcome},
        value::core::Value,
    },
};

/// Parses and evaluates a single expression against a fresh environment.
///
/// This is the convenience "calculator" entry point used by the CLI.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use algoscript::{evaluate_str, Value};
///
/// let value = evaluate_str("2 + 2").unwrap();
/// assert_eq!(value, Value::Real(4.0));
///
/// // 'x' is not defined anywhere.
/// assert!(evaluate_str("x + 1").is_err());
/// ```
pub fn evaluate_str(source: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let expr = parse_expression(source)?;
    let mut env = Environment::new();
    Ok(evaluate_expression(&expr, &mut env)?)
}
