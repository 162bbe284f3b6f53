use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::core::unsupported, core::EvalResult},
        value::core::Value,
    },
    util::num::repeat_count,
};

/// Evaluates an arithmetic operator whose left operand is a string.
///
/// `text + x` appends the display form of any value; `text * n` repeats
/// the text a floored number of times. Nothing else is defined on
/// strings.
pub fn eval_string_op(op: &str, text: &str, right: &Value) -> EvalResult<Value> {
    match (op, right) {
        ("+", _) => Ok(Value::Str(format!("{text}{right}"))),
        ("*", Value::Number(times)) => Ok(Value::Str(text.repeat(repeat_count(*times)))),
        _ => Err(unsupported(op, &Value::Str(text.to_string()), right)),
    }
}
