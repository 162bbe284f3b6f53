use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::core::unsupported, core::EvalResult},
        value::core::Value,
    },
};

/// Evaluates `and` or `or` over two booleans.
///
/// There is no short-circuiting anywhere in the pipeline: the evaluator
/// has fully evaluated both operands before this function runs, so a side
/// effect in the right operand always happens.
pub fn eval_logic(op: &str, left: &Value, right: &Value) -> EvalResult<Value> {
    let (Value::Boolean(a), Value::Boolean(b)) = (left, right) else {
        return Err(unsupported(op, left, right));
    };
    match op {
        "or" => Ok(Value::Boolean(*a || *b)),
        "and" => Ok(Value::Boolean(*a && *b)),
        _ => Err(RuntimeError::UnsupportedOperator { op: op.to_string() }),
    }
}
