use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::{array, comparison, logic, scalar, string},
            core::EvalResult,
        },
        value::core::Value,
    },
};

/// Evaluates a non-assigning binary operator over two values.
///
/// Dispatch is a match on the operator and the pair of operand type tags:
/// arithmetic routes to the number, string or array family by the left
/// operand; equality works for every type pair; ordering and the boolean
/// connectives check their operands inside their own modules. Unsupported
/// pairings surface as errors rather than coercions.
///
/// # Errors
/// - `RuntimeError::UnsupportedBinaryOp` when the type pair does not
///   support the operator.
/// - `RuntimeError::UnsupportedOperator` when the operator itself is
///   unknown to the value layer.
pub fn eval_binary(op: &str, left: &Value, right: &Value) -> EvalResult<Value> {
    match op {
        "+" | "-" | "*" | "/" | "div" | "mod" | "^" => match (left, right) {
            (Value::Number(a), Value::Number(b)) => scalar::eval_number_op(op, *a, *b),
            (Value::Str(text), _) => string::eval_string_op(op, text, right),
            (Value::Array(elements), _) => array::eval_array_op(op, elements, right),
            _ => Err(unsupported(op, left, right)),
        },
        "==" => Ok(Value::Boolean(left.equals(right))),
        "!=" => Ok(Value::Boolean(!left.equals(right))),
        "<" | ">" | "<=" | ">=" => comparison::eval_ordering(op, left, right),
        "or" | "and" => logic::eval_logic(op, left, right),
        _ => Err(RuntimeError::UnsupportedOperator { op: op.to_string() }),
    }
}

/// Builds the error for an operator applied to a type pair that does not
/// support it.
#[must_use]
pub fn unsupported(op: &str, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::UnsupportedBinaryOp {
        op: op.to_string(),
        left: left.type_name(),
        right: right.type_name(),
    }
}
