use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Evaluates an arithmetic operator over two numbers.
///
/// `+ - * /` follow IEEE semantics, including infinities from division by
/// zero. `mod` is the floating remainder, `div` the truncated quotient,
/// and `^` exponentiation.
///
/// # Example
/// ```
/// use toylang::interpreter::{evaluator::binary::scalar::eval_number_op, value::core::Value};
///
/// let quotient = eval_number_op("div", 7.0, 2.0).unwrap();
/// assert_eq!(quotient.to_string(), "3");
/// ```
pub fn eval_number_op(op: &str, left: f64, right: f64) -> EvalResult<Value> {
    let result = match op {
        "+" => left + right,
        "-" => left - right,
        "*" => left * right,
        "/" => left / right,
        "div" => (left / right).trunc(),
        "mod" => left % right,
        "^" => left.powf(right),
        _ => return Err(RuntimeError::UnsupportedOperator { op: op.to_string() }),
    };
    Ok(Value::Number(result))
}
