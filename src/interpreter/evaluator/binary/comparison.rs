use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::core::unsupported, core::EvalResult},
        value::core::Value,
    },
};

/// Evaluates an ordering operator.
///
/// Ordering is defined for two numbers (numeric) and two strings
/// (lexicographic); every other pairing is an error. Equality is not
/// handled here: it works across all types and lives with the value
/// model.
pub fn eval_ordering(op: &str, left: &Value, right: &Value) -> EvalResult<Value> {
    let result = match (left, right) {
        (Value::Number(a), Value::Number(b)) => apply(op, a.partial_cmp(b))?,
        (Value::Str(a), Value::Str(b)) => apply(op, Some(a.cmp(b)))?,
        _ => return Err(unsupported(op, left, right)),
    };
    Ok(Value::Boolean(result))
}

fn apply(op: &str, ordering: Option<std::cmp::Ordering>) -> EvalResult<bool> {
    use std::cmp::Ordering::{Equal, Greater, Less};
    // NaN compares false against everything, like its host counterpart
    let Some(ordering) = ordering else {
        return Ok(false);
    };
    match op {
        "<" => Ok(ordering == Less),
        ">" => Ok(ordering == Greater),
        "<=" => Ok(matches!(ordering, Less | Equal)),
        ">=" => Ok(matches!(ordering, Greater | Equal)),
        _ => Err(RuntimeError::UnsupportedOperator { op: op.to_string() }),
    }
}
