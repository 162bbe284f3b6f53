use std::io::{BufRead, Write};
use std::rc::Rc;

use rand::Rng;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{binary, core::EvalResult},
        scope::SharedScope,
        value::core::{BuiltinFn, BuiltinValue, Value},
    },
};

/// Approximation of π exposed as the `PI` constant.
pub const PI: f64 = 3.14159265;
/// Approximation of Euler's number exposed as the `EXP` constant.
pub const EXP: f64 = 2.718;

/// The builtin function table: the prelude name of each builtin and its
/// native implementation.
static BUILTIN_TABLE: &[(&str, BuiltinFn)] = &[
    ("print", print),
    ("println", println),
    ("input", input),
    ("size", size),
    ("chars", chars),
    ("abs", abs),
    ("round", round),
    ("trunc", trunc),
    ("all", all),
    ("any", any),
    ("array", array),
    ("bool", to_bool),
    ("number", to_number),
    ("str", to_str),
    ("typeof", type_of),
    ("max", max),
    ("min", min),
    ("sum", sum),
    ("slice", slice),
    ("reversed", reversed),
    ("range", range),
    ("read", read),
    ("write", write),
    ("keys", keys),
    ("values", values),
    ("wait", wait),
    ("cls", cls),
    ("rand", rand_uniform),
    ("randint", rand_integer),
    ("assert", assert),
];

/// Installs the prelude into a root scope: the numeric constants, the
/// empty `exports` object read back by the import protocol, and every
/// builtin function.
pub fn install(scope: &SharedScope) {
    scope.define("PI", Value::Number(PI));
    scope.define("EXP", Value::Number(EXP));
    scope.define("exports", Value::empty_object());
    for &(name, func) in BUILTIN_TABLE {
        scope.define(name, Value::Builtin(Rc::new(BuiltinValue { name, func })));
    }
}

/// Checks that a builtin received exactly the expected number of
/// arguments.
///
/// # Errors
/// `RuntimeError::ParamsAndArgsDontMatch` on a mismatch.
pub const fn check_arity(args: &[Value], expected: usize) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(RuntimeError::ParamsAndArgsDontMatch { expected, actual: args.len() })
    }
}

/// `print(...)`: prints each argument without separators or newline.
fn print(args: &[Value]) -> EvalResult<Value> {
    let mut stdout = std::io::stdout();
    for value in args {
        write!(stdout, "{value}").ok();
    }
    stdout.flush().ok();
    Ok(Value::Nil)
}

/// `println(...)`: like `print`, with a trailing newline.
fn println(args: &[Value]) -> EvalResult<Value> {
    let mut stdout = std::io::stdout();
    for value in args {
        write!(stdout, "{value}").ok();
    }
    writeln!(stdout).ok();
    stdout.flush().ok();
    Ok(Value::Nil)
}

/// `input(...)`: prints the arguments as a prompt and reads one line
/// from standard input.
fn input(args: &[Value]) -> EvalResult<Value> {
    print(args)?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line).ok();
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Value::Str(line))
}

/// `size(a)`: the length of an array.
#[allow(clippy::cast_precision_loss)]
fn size(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let elements = args[0].as_array()?;
    Ok(Value::Number(elements.borrow().len() as f64))
}

/// `chars(s)`: the characters of a string as an array of one-character
/// strings.
fn chars(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let text = args[0].as_str()?;
    let elements = text.chars().map(|ch| Value::Str(ch.to_string())).collect();
    Ok(Value::array(elements))
}

/// `abs(n)`: absolute value.
fn abs(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    Ok(Value::Number(args[0].as_number()?.abs()))
}

/// `round(n)`: nearest integer, halves away from zero.
fn round(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    Ok(Value::Number(args[0].as_number()?.round()))
}

/// `trunc(n)`: the integer part.
fn trunc(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    Ok(Value::Number(args[0].as_number()?.trunc()))
}

/// `all(a)`: true when every element of a boolean array is true.
fn all(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    for element in args[0].as_array()?.borrow().iter() {
        if !element.as_boolean()? {
            return Ok(Value::Boolean(false));
        }
    }
    Ok(Value::Boolean(true))
}

/// `any(a)`: true when at least one element of a boolean array is true.
fn any(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    for element in args[0].as_array()?.borrow().iter() {
        if element.as_boolean()? {
            return Ok(Value::Boolean(true));
        }
    }
    Ok(Value::Boolean(false))
}

/// `array(...)`: builds an array from the arguments.
fn array(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::array(args.to_vec()))
}

/// `bool(v)`: boolean coercion: nil is false, a number is true exactly
/// when it equals 1, strings and arrays are true when non-empty, and
/// objects, functions and builtins are always true.
fn to_bool(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let result = match &args[0] {
        Value::Nil => false,
        Value::Boolean(value) => *value,
        Value::Number(value) => *value == 1.0,
        Value::Str(value) => !value.is_empty(),
        Value::Array(elements) => !elements.borrow().is_empty(),
        Value::Object(_) | Value::Function(_) | Value::Builtin(_) => true,
    };
    Ok(Value::Boolean(result))
}

/// `number(v)`: numeric coercion; nil when the value has no numeric
/// form.
fn to_number(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let result = match &args[0] {
        Value::Boolean(value) => Value::Number(f64::from(*value)),
        Value::Number(value) => Value::Number(*value),
        Value::Str(value) => match value.trim().parse::<f64>() {
            Ok(parsed) => Value::Number(parsed),
            Err(_) => Value::Nil,
        },
        _ => Value::Nil,
    };
    Ok(result)
}

/// `str(v)`: the display form of any value.
fn to_str(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    Ok(Value::Str(args[0].to_string()))
}

/// `typeof(v)`: the dynamic type name.
fn type_of(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    Ok(Value::Str(args[0].type_name().to_string()))
}

/// `max(a)`: the largest element by the `>` operator; nil on an empty
/// array.
fn max(args: &[Value]) -> EvalResult<Value> {
    extremum(args, ">")
}

/// `min(a)`: the smallest element by the `<` operator; nil on an empty
/// array.
fn min(args: &[Value]) -> EvalResult<Value> {
    extremum(args, "<")
}

fn extremum(args: &[Value], op: &str) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let elements = args[0].as_array()?.borrow();
    let Some(first) = elements.first() else {
        return Ok(Value::Nil);
    };
    let mut best = first.clone();
    for element in elements.iter().skip(1) {
        if binary::core::eval_binary(op, element, &best)?.as_boolean()? {
            best = element.clone();
        }
    }
    Ok(best)
}

/// `sum(a)`: folds the array with the `+` operator, starting from a copy
/// of the first element; nil on an empty array.
fn sum(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let elements = args[0].as_array()?.borrow();
    let Some(first) = elements.first() else {
        return Ok(Value::Nil);
    };
    let mut total = first.copy_for_assignment();
    for element in elements.iter().skip(1) {
        total = binary::core::eval_binary("+", &total, element)?;
    }
    Ok(total)
}

/// `slice(a, i, j)`: the half-open element range `[i, j)`, clamped to
/// the array size. A negative start yields nil.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn slice(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 3)?;
    let elements = args[0].as_array()?.borrow();
    let start = args[1].as_number()?;
    if start < 0.0 {
        return Ok(Value::Nil);
    }
    let end = args[2].as_number()?.max(0.0);
    let start = (start.trunc() as usize).min(elements.len());
    let end = (end.trunc() as usize).min(elements.len());
    let output = if start < end {
        elements[start..end].to_vec()
    } else {
        Vec::new()
    };
    Ok(Value::array(output))
}

/// `reversed(a)`: a new array with the elements in reverse order.
fn reversed(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let mut output = args[0].as_array()?.borrow().clone();
    output.reverse();
    Ok(Value::array(output))
}

/// `range(s, e, step)`: the numbers from `s` towards `e`, excluding `e`
/// itself; nil when the step does not point from `s` towards `e`.
fn range(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 3)?;
    let start = args[0].as_number()?;
    let end = args[1].as_number()?;
    let step = args[2].as_number()?;
    if (start < end && step <= 0.0) || (start > end && step >= 0.0) {
        return Ok(Value::Nil);
    }
    let mut output = Vec::new();
    let mut current = start;
    while if step > 0.0 { current < end } else { current > end } {
        output.push(Value::Number(current));
        current += step;
    }
    Ok(Value::array(output))
}

/// `read(path)`: the contents of a file as a string, or nil when the
/// file cannot be read.
fn read(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let path = args[0].as_str()?;
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Value::Str(contents)),
        Err(_) => Ok(Value::Nil),
    }
}

/// `write(path, content)`: writes the display form of a value to a
/// file, replacing its contents; reports success as a boolean.
fn write(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 2)?;
    let path = args[0].as_str()?;
    let content = args[1].to_string();
    Ok(Value::Boolean(std::fs::write(path, content).is_ok()))
}

/// `keys(o)`: the keys of an object as an array of strings.
fn keys(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let entries = args[0].as_object()?.borrow();
    let output = entries.keys().map(|key| Value::Str(key.clone())).collect();
    Ok(Value::array(output))
}

/// `values(o)`: the values of an object as an array.
fn values(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let entries = args[0].as_object()?.borrow();
    let output = entries.values().cloned().collect();
    Ok(Value::array(output))
}

/// `wait(ms)`: blocks the interpreter for the given number of
/// milliseconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn wait(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    let millis = args[0].as_number()?.max(0.0).round() as u64;
    std::thread::sleep(std::time::Duration::from_millis(millis));
    Ok(Value::Nil)
}

/// `cls()`: clears the terminal with an ANSI escape, best effort.
fn cls(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 0)?;
    let mut stdout = std::io::stdout();
    write!(stdout, "\x1b[2J\x1b[1;1H").ok();
    stdout.flush().ok();
    Ok(Value::Nil)
}

/// `rand(lo, hi)`: a uniform number in `[lo, hi)`.
fn rand_uniform(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 2)?;
    let first = args[0].as_number()?;
    let second = args[1].as_number()?;
    let (low, high) = if first <= second { (first, second) } else { (second, first) };
    if low == high {
        return Ok(Value::Number(low));
    }
    Ok(Value::Number(rand::thread_rng().gen_range(low..high)))
}

/// `randint(lo, hi)`: a uniform integer between the bounds, both
/// included; nil when no integer lies between them.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn rand_integer(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 2)?;
    let first = args[0].as_number()?;
    let second = args[1].as_number()?;
    let (low, high) = if first <= second { (first, second) } else { (second, first) };
    let low = low.ceil() as i64;
    let high = high.floor() as i64;
    if low > high {
        return Ok(Value::Nil);
    }
    Ok(Value::Number(rand::thread_rng().gen_range(low..=high) as f64))
}

/// `assert(cond)`: raises a fatal error when the condition is false,
/// returns it otherwise.
fn assert(args: &[Value]) -> EvalResult<Value> {
    check_arity(args, 1)?;
    if args[0].as_boolean()? {
        Ok(args[0].clone())
    } else {
        Err(RuntimeError::AssertionFailed)
    }
}
