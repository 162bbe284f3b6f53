use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary::{core::unsupported, scalar, string},
            core::EvalResult,
        },
        value::core::Value,
    },
    util::num::repeat_count,
};

/// Evaluates a compound assignment operator over two values.
///
/// Arrays mutate their shared storage in place and hand back the same
/// handle, which is how `a += x` stays visible through every reference to
/// `a`. Numbers and strings are immutable values, so their forms compute
/// a fresh result; the evaluator writes it back through the assigned
/// place. Arrays support `+=`, `-=` and `*=`, strings `+=` and `*=`, and
/// numbers every form.
pub fn eval_compound(op: &str, left: &Value, right: &Value) -> EvalResult<Value> {
    let Some(base) = op.strip_suffix('=') else {
        return Err(RuntimeError::UnsupportedOperator { op: op.to_string() });
    };
    match left {
        Value::Number(a) => match right {
            Value::Number(b) => scalar::eval_number_op(base, *a, *b),
            _ => Err(unsupported(op, left, right)),
        },
        Value::Str(text) => match base {
            "+" | "*" => string::eval_string_op(base, text, right),
            _ => Err(unsupported(op, left, right)),
        },
        Value::Array(elements) => match (base, right) {
            ("+", _) => {
                elements.borrow_mut().push(right.clone());
                Ok(left.clone())
            },
            ("-", _) => {
                elements.borrow_mut().retain(|element| !element.equals(right));
                Ok(left.clone())
            },
            ("*", Value::Number(times)) => {
                let mut storage = elements.borrow_mut();
                let base_elements = storage.clone();
                storage.clear();
                for _ in 0..repeat_count(*times) {
                    storage.extend(base_elements.iter().cloned());
                }
                drop(storage);
                Ok(left.clone())
            },
            _ => Err(unsupported(op, left, right)),
        },
        _ => Err(unsupported(op, left, right)),
    }
}
