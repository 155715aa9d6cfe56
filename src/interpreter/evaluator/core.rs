use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::function::core::builtin_name,
        runtime::core::Machine,
        value::core::{FunctionValue, Value},
    },
    util::num::truncate_to_i64,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl Machine<'_> {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is a single-threaded, synchronous recursive walk with exactly
    /// one rule per node kind; children are evaluated left-to-right. The
    /// walk never mutates the AST, and it mutates the environment only
    /// through statements run inside called function bodies.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Identifier { name, .. } => self.eval_identifier(name),
            Expr::UnaryOp { op, expr, .. } => {
                let operand = self.eval(expr)?;
                self.eval_unary(*op, &operand)
            },
            Expr::BinaryOp { op, left, right, .. } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.eval_binary(*op, &left, &right)
            },
            Expr::Call { callee,
                         arguments,
                         expand_last,
                         .. } => self.eval_call(callee, arguments, *expand_last),
            Expr::Index { target, index, .. } => self.eval_index(target, index),
            Expr::ListLiteral { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.eval(element)?);
                }
                Ok(Value::from(values))
            },
        }
    }

    /// Resolves an identifier: scope stack, constants, user functions, then
    /// builtins (yielding a Function value, so builtins can be passed as
    /// arguments). A name absent everywhere is `UnknownVariable`.
    fn eval_identifier(&mut self, name: &str) -> EvalResult<Value> {
        if let Some(value) = self.env.lookup(name) {
            return Ok(value);
        }
        if let Some(name) = builtin_name(name) {
            return Ok(Value::Function(FunctionValue::Builtin(name)));
        }
        Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                            line: self.line, })
    }

    /// Evaluates an indexing expression. The target must be a List; the
    /// index is truncated to an integer, with negative indices counting
    /// from the end.
    fn eval_index(&mut self, target: &Expr, index: &Expr) -> EvalResult<Value> {
        let target = self.eval(target)?;
        let index = self.eval(index)?;

        let items = target.as_list(self.line)?;
        let resolved = resolve_index(&index, items.len(), self.line)?;

        Ok(items[resolved].clone())
    }
}

/// Resolves an index value against a list length.
///
/// The value is truncated towards zero; a negative result counts from the
/// end of the list. Anything still outside `0..len` fails with
/// `IndexOutOfRange` carrying the index as written.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub(crate) fn resolve_index(index: &Value, len: usize, line: usize) -> EvalResult<usize> {
    let raw = truncate_to_i64(index.as_real(line)?, line)?;
    let len = len as i64;

    let resolved = if raw < 0 { raw + len } else { raw };

    if resolved < 0 || resolved >= len {
        return Err(RuntimeError::IndexOutOfRange { index: raw,
                                                   len: len as usize,
                                                   line });
    }

    Ok(resolved as usize)
}
