use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, runtime::core::Machine, value::core::Value},
};

impl Machine<'_> {
    /// Applies a unary operator to an already-evaluated operand.
    ///
    /// Negation is defined for Numbers, NOT for Booleans; anything else is
    /// `InvalidUnaryOperator`.
    pub(crate) fn eval_unary(&mut self, op: UnaryOperator, operand: &Value) -> EvalResult<Value> {
        let line = self.line;

        match (op, operand) {
            (UnaryOperator::Negate, Value::Real(r)) => Ok(Value::Real(-r)),
            (UnaryOperator::Negate, Value::Complex(c)) => Ok(Value::Complex(-*c)),
            (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),

            (UnaryOperator::Negate, other) => {
                Err(RuntimeError::InvalidUnaryOperator { op:      "-".to_string(),
                                                         operand: other.type_name(),
                                                         line })
            },
            (UnaryOperator::Not, other) => {
                Err(RuntimeError::InvalidUnaryOperator { op:      "NOT".to_string(),
                                                         operand: other.type_name(),
                                                         line })
            },
        }
    }
}
