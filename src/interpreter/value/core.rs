use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use crate::{
    ast::{Expression, Statement},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, scope::SharedScope},
};

/// A shared, mutable array of values. Cloning the handle shares the same
/// storage.
pub type SharedArray = Rc<RefCell<Vec<Value>>>;

/// A shared, mutable string-keyed map of values.
pub type SharedObject = Rc<RefCell<BTreeMap<String, Value>>>;

/// The native implementation signature of a builtin function.
pub type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// Represents a runtime value.
///
/// Nil, booleans, numbers and strings are value types: binding or
/// assigning them stores an independent copy. Arrays, objects, functions
/// and builtins are reference types: several names may refer to the same
/// heap object, and mutation through one name is visible through all of
/// them. [`Value::copy_for_assignment`] enforces the split.
#[derive(Debug, Clone)]
pub enum Value {
    /// The single nil value.
    Nil,
    /// `true` or `false`.
    Boolean(bool),
    /// A 64-bit floating-point number.
    Number(f64),
    /// An owned piece of text.
    Str(String),
    /// A shared mutable sequence.
    Array(SharedArray),
    /// A shared mutable string-keyed map.
    Object(SharedObject),
    /// A user-defined function or lambda together with its captured scope.
    Function(Rc<FunctionValue>),
    /// A native function from the prelude.
    Builtin(Rc<BuiltinValue>),
}

/// The payload of a function value.
///
/// Parameters and body are shared with the syntax tree the function was
/// parsed from, so the code outlives the program or module that defined
/// it for as long as the function value is reachable.
pub struct FunctionValue {
    /// The file the function was defined in, for call diagnostics.
    pub filename: String,
    /// The parameter expressions; validated at call time.
    pub parameters: Rc<Vec<Expression>>,
    /// The body block.
    pub body: Rc<Statement>,
    /// The scope the function was created in.
    pub scope: SharedScope,
}

// The captured scope may contain the function itself, so the derived
// recursive Debug would not terminate.
impl std::fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionValue")
            .field("filename", &self.filename)
            .field("parameters", &self.parameters.len())
            .finish_non_exhaustive()
    }
}

/// The payload of a builtin value.
#[derive(Debug)]
pub struct BuiltinValue {
    /// The prelude name of the builtin.
    pub name: &'static str,
    /// The native implementation.
    pub func: BuiltinFn,
}

impl Value {
    /// Creates an array value from a vector of elements.
    #[must_use]
    pub fn array(values: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(values)))
    }

    /// Creates an empty object value.
    #[must_use]
    pub fn empty_object() -> Self {
        Self::Object(Rc::new(RefCell::new(BTreeMap::new())))
    }

    /// The dynamic type name, as reported by `typeof` and used in error
    /// messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Function(_) => "function",
            Self::Builtin(_) => "builtin",
        }
    }

    /// Applies the copy rule used at every binding, rebinding and
    /// argument pass: scalars become independent copies, heap values stay
    /// shared.
    ///
    /// This is the reason two `let` bindings to the same number never
    /// alias while two bindings to the same array always do.
    #[must_use]
    pub fn copy_for_assignment(&self) -> Self {
        match self {
            Self::Nil => Self::Nil,
            Self::Boolean(value) => Self::Boolean(*value),
            Self::Number(value) => Self::Number(*value),
            Self::Str(value) => Self::Str(value.clone()),
            Self::Array(handle) => Self::Array(Rc::clone(handle)),
            Self::Object(handle) => Self::Object(Rc::clone(handle)),
            Self::Function(handle) => Self::Function(Rc::clone(handle)),
            Self::Builtin(handle) => Self::Builtin(Rc::clone(handle)),
        }
    }

    /// Value equality as exposed by the `==` operator.
    ///
    /// Scalars compare by value, arrays element-wise, and objects,
    /// functions and builtins by identity. Values of different dynamic
    /// types are never equal.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let left = a.borrow();
                let right = b.borrow();
                left.len() == right.len()
                    && left.iter().zip(right.iter()).all(|(x, y)| x.equals(y))
            },
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Reads the value as a boolean.
    ///
    /// # Errors
    /// `RuntimeError::WrongType` when the value is not a boolean.
    pub const fn as_boolean(&self) -> EvalResult<bool> {
        match self {
            Self::Boolean(value) => Ok(*value),
            other => Err(RuntimeError::WrongType {
                expected: "boolean",
                found: other.type_name(),
            }),
        }
    }

    /// Reads the value as a number.
    ///
    /// # Errors
    /// `RuntimeError::WrongType` when the value is not a number.
    pub const fn as_number(&self) -> EvalResult<f64> {
        match self {
            Self::Number(value) => Ok(*value),
            other => Err(RuntimeError::WrongType {
                expected: "number",
                found: other.type_name(),
            }),
        }
    }

    /// Reads the value as a string slice.
    ///
    /// # Errors
    /// `RuntimeError::WrongType` when the value is not a string.
    pub fn as_str(&self) -> EvalResult<&str> {
        match self {
            Self::Str(value) => Ok(value),
            other => Err(RuntimeError::WrongType {
                expected: "string",
                found: other.type_name(),
            }),
        }
    }

    /// Reads the value as an array handle.
    ///
    /// # Errors
    /// `RuntimeError::WrongType` when the value is not an array.
    pub fn as_array(&self) -> EvalResult<&SharedArray> {
        match self {
            Self::Array(handle) => Ok(handle),
            other => Err(RuntimeError::WrongType {
                expected: "array",
                found: other.type_name(),
            }),
        }
    }

    /// Reads the value as an object handle.
    ///
    /// # Errors
    /// `RuntimeError::WrongType` when the value is not an object.
    pub fn as_object(&self) -> EvalResult<&SharedObject> {
        match self {
            Self::Object(handle) => Ok(handle),
            other => Err(RuntimeError::WrongType {
                expected: "object",
                found: other.type_name(),
            }),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value}"),
            Self::Array(handle) => {
                write!(f, "[")?;
                for (index, element) in handle.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Self::Object(handle) => {
                write!(f, "{{")?;
                for (index, (key, value)) in handle.borrow().iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
            Self::Function(function) => {
                write!(f, "function (")?;
                for (index, parameter) in function.parameters.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", parameter.to_format_string())?;
                }
                write!(f, ") {}", function.body.to_format_string())
            },
            Self::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
        }
    }
}
