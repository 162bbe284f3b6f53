use crate::{
    interpreter::{
        evaluator::{binary::core::unsupported, core::EvalResult},
        value::core::{SharedArray, Value},
    },
    util::num::repeat_count,
};

/// Evaluates an arithmetic operator whose left operand is an array. Each
/// supported form builds a new array; the operand array is left alone.
///
/// `a + x` appends `x` as a single element, even when `x` is itself an
/// array; joining two arrays element by element takes a loop. `a - x`
/// drops every element equal to `x`. `a * n` repeats the elements a
/// floored number of times.
pub fn eval_array_op(op: &str, elements: &SharedArray, right: &Value) -> EvalResult<Value> {
    match (op, right) {
        ("+", _) => {
            let mut output = elements.borrow().clone();
            output.push(right.clone());
            Ok(Value::array(output))
        },
        ("-", _) => {
            let output = elements
                .borrow()
                .iter()
                .filter(|element| !element.equals(right))
                .cloned()
                .collect();
            Ok(Value::array(output))
        },
        ("*", Value::Number(times)) => {
            let base = elements.borrow();
            let mut output = Vec::with_capacity(base.len() * repeat_count(*times));
            for _ in 0..repeat_count(*times) {
                output.extend(base.iter().cloned());
            }
            Ok(Value::array(output))
        },
        _ => Err(unsupported(op, &Value::Array(elements.clone()), right)),
    }
}
