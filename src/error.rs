/// Parsing errors.
///
/// Defines the error causes the parser can raise while reading tokens, and
/// the recovery report that wraps a cause together with the statement kind
/// and positions involved. Parse errors are collected, never fatal: the
/// parser always produces a program.
pub mod parse_error;

/// Runtime errors.
///
/// Contains every error that can be raised while a program executes, from
/// undefined variables to unsupported operator combinations, plus the
/// propagation wrapper that attaches source positions while an error
/// travels up the evaluation stack.
pub mod runtime_error;

pub use parse_error::{ParseError, ParseReport};
pub use runtime_error::RuntimeError;

/// The failure modes of running a source text end to end.
#[derive(Debug)]
pub enum ScriptError {
    /// The parser reported at least one error; the program was not run.
    Parse(Vec<ParseReport>),
    /// Execution stopped with a fatal runtime error, already rendered.
    Runtime(String),
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(reports) => {
                writeln!(f, "Encountered errors while parsing:")?;
                for report in reports {
                    writeln!(f, "{report}")?;
                }
                Ok(())
            },
            Self::Runtime(description) => {
                write!(f, "Encountered a fatal error during runtime:\n{description}")
            },
        }
    }
}

impl std::error::Error for ScriptError {}
