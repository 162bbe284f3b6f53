/// Represents all errors that can be raised during evaluation.
///
/// A runtime error is fatal for the executing program: the evaluator stops
/// and stores the rendered description. While an error travels up the
/// evaluation stack, every statement and expression dispatcher wraps it in
/// [`RuntimeError::Propagated`], so the final description reads as a chain
/// of source positions ending in the original failure.
#[derive(Debug)]
pub enum RuntimeError {
    /// An interpreter invariant was violated.
    Internal {
        /// What went wrong.
        reason: String,
    },
    /// A language feature that is not available.
    Unimplemented {
        /// The missing functionality.
        functionality: String,
    },
    /// A name was read or assigned before any declaration.
    UndefinedVariable {
        /// The unresolved name.
        name: String,
    },
    /// A name was declared twice in the same scope frame.
    CannotRedeclare {
        /// The redeclared name.
        name: String,
    },
    /// A value had the wrong dynamic type for the operation.
    WrongType {
        /// The required type name.
        expected: &'static str,
        /// The type name of the value that was found.
        found: &'static str,
    },
    /// A binary operator was applied to an unsupported pair of types.
    UnsupportedBinaryOp {
        /// The operator lexeme.
        op: String,
        /// Type name of the left operand.
        left: &'static str,
        /// Type name of the right operand.
        right: &'static str,
    },
    /// A prefix operator was applied to an unsupported type.
    UnsupportedPrefixOp {
        /// The operator lexeme.
        op: String,
        /// Type name of the operand.
        operand: &'static str,
    },
    /// An operator lexeme unknown to the value layer.
    UnsupportedOperator {
        /// The operator lexeme.
        op: String,
    },
    /// An array index with a fractional part.
    NonIntegerIndex {
        /// The offending index value.
        value: f64,
    },
    /// An array index below zero.
    NegativeArrayIndex {
        /// The offending index value.
        value: f64,
    },
    /// An array index at or past the end of the array.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The array size.
        size: usize,
    },
    /// Indexing applied to a value that is neither an array nor an object.
    WrongIndexAccessTarget {
        /// Type name of the indexed value.
        found: &'static str,
    },
    /// The left side of an assignment was not a variable or an index
    /// expression.
    ExpectedIdentifier,
    /// A function parameter that is neither a name nor a `name = default`
    /// pair.
    FunctionParameterWrongFormat {
        /// The rendered parameter expression.
        found: String,
    },
    /// The same parameter name appeared twice in one function.
    DuplicateParameter {
        /// The repeated name.
        name: String,
    },
    /// A call supplied more arguments than the function has parameters, or
    /// a builtin received the wrong number of arguments.
    ParamsAndArgsDontMatch {
        /// The number of parameters.
        expected: usize,
        /// The number of arguments supplied.
        actual: usize,
    },
    /// Required parameters that were still unbound after a call's
    /// arguments were consumed.
    UnsetParameters {
        /// The unbound parameter names, in declaration order.
        names: Vec<String>,
    },
    /// A break, continue or return reached a place that cannot handle it.
    MisplacedFlowOperator {
        /// The flow operator name.
        name: &'static str,
    },
    /// A for loop with step 0.
    ZeroStep,
    /// A for loop counting up with a negative step.
    NegativeStep,
    /// A for loop counting down with a positive step.
    PositiveStep,
    /// A module file could not be opened.
    FileImportFailed {
        /// The module path.
        path: String,
    },
    /// A module file failed to parse.
    ImportParseFailed {
        /// The module path.
        path: String,
        /// The rendered parse reports.
        errors: Vec<String>,
    },
    /// A module was parsed but its evaluation ended with a fatal error.
    ImportEvalFailed {
        /// The module path.
        path: String,
        /// The module's fatal error description.
        inner: String,
    },
    /// Execution reached a placeholder node produced by parser recovery.
    ErrorNode,
    /// The `assert` builtin received false.
    AssertionFailed,
    /// A deeper error wrapped with the label of the node it crossed.
    Propagated {
        /// The node label, e.g. `"while loop at (line 3, column 1)"`.
        label: String,
        /// The wrapped error.
        inner: Box<RuntimeError>,
    },
}

impl RuntimeError {
    /// Wraps an error with a propagation label.
    #[must_use]
    pub fn propagated(label: impl Into<String>, inner: Self) -> Self {
        Self::Propagated { label: label.into(), inner: Box::new(inner) }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal { reason } => write!(f, "Internal error: {reason}."),
            Self::Unimplemented { functionality } => {
                write!(f, "Unimplemented functionality: {functionality}.")
            },
            Self::UndefinedVariable { name } => {
                write!(f, "Variable '{name}' has not been defined yet.")
            },
            Self::CannotRedeclare { name } => {
                write!(f, "Cannot redeclare '{name}' in the same scope.")
            },
            Self::WrongType { expected, found } => {
                write!(f, "Expected a value of type {expected}, but found {found}.")
            },
            Self::UnsupportedBinaryOp { op, left, right } => {
                write!(f, "Operator '{op}' is not supported between {left} and {right}.")
            },
            Self::UnsupportedPrefixOp { op, operand } => {
                write!(f, "Prefix operator '{op}' is not supported for {operand}.")
            },
            Self::UnsupportedOperator { op } => {
                write!(f, "Operator '{op}' is not supported.")
            },
            Self::NonIntegerIndex { value } => {
                write!(f, "Array index {value} is not an integer.")
            },
            Self::NegativeArrayIndex { value } => {
                write!(f, "Array index {value} is negative.")
            },
            Self::IndexOutOfBounds { index, size } => {
                write!(f, "Index {index} is out of bounds for an array of size {size}.")
            },
            Self::WrongIndexAccessTarget { found } => {
                write!(f, "Values of type {found} cannot be indexed.")
            },
            Self::ExpectedIdentifier => {
                write!(f, "Left side of an assignment must be a variable or an index expression.")
            },
            Self::FunctionParameterWrongFormat { found } => {
                write!(f, "Function parameter '{found}' must be a name or a name with a default value.")
            },
            Self::DuplicateParameter { name } => {
                write!(f, "Duplicate parameter name '{name}'.")
            },
            Self::ParamsAndArgsDontMatch { expected, actual } => {
                write!(f, "Function takes {expected} parameters, but {actual} arguments were provided.")
            },
            Self::UnsetParameters { names } => {
                write!(f, "Parameters without values after the call: {}.", names.join(", "))
            },
            Self::MisplacedFlowOperator { name } => {
                write!(f, "Operator '{name}' is not allowed here.")
            },
            Self::ZeroStep => write!(f, "For-loop step cannot be zero."),
            Self::NegativeStep => {
                write!(f, "For-loop step cannot be negative when counting up.")
            },
            Self::PositiveStep => {
                write!(f, "For-loop step cannot be positive when counting down.")
            },
            Self::FileImportFailed { path } => {
                write!(f, "Cannot open module file \"{path}\". Maybe the file does not exist.")
            },
            Self::ImportParseFailed { path, errors } => {
                write!(f, "Errors while parsing module \"{path}\":")?;
                for error in errors {
                    write!(f, "\n{error}")?;
                }
                Ok(())
            },
            Self::ImportEvalFailed { path, inner } => {
                write!(f, "Error while evaluating module \"{path}\":\n{inner}")
            },
            Self::ErrorNode => write!(f, "Cannot execute an error node."),
            Self::AssertionFailed => write!(f, "Assertion failed."),
            Self::Propagated { label, inner } => write!(f, "At {label}:\n{inner}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
