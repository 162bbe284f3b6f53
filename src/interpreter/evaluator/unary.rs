use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates a prefix operator.
///
/// `not` negates a boolean, `-` negates a number. Any other combination
/// of operator and operand type is an error.
pub fn eval_prefix(op: &str, value: &Value) -> EvalResult<Value> {
    match (op, value) {
        ("not", Value::Boolean(operand)) => Ok(Value::Boolean(!operand)),
        ("-", Value::Number(operand)) => Ok(Value::Number(-operand)),
        ("not" | "-", _) => Err(RuntimeError::UnsupportedPrefixOp {
            op: op.to_string(),
            operand: value.type_name(),
        }),
        _ => Err(RuntimeError::UnsupportedOperator { op: op.to_string() }),
    }
}
