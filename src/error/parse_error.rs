use crate::{ast::Position, interpreter::lexer::TokenKind};

/// Represents the causes of a parse failure.
#[derive(Debug)]
pub enum ParseError {
    /// A specific lexeme was required but something else was found.
    WrongTokenValue {
        /// The lexeme the parser required.
        expected: String,
        /// The lexeme that was actually next.
        found: String,
    },
    /// A token of a specific kind was required but something else was
    /// found.
    WrongTokenType {
        /// The required token kind.
        expected: TokenKind,
        /// The kind that was actually next.
        found: TokenKind,
        /// The text of the offending token.
        value: String,
    },
    /// The next token cannot begin an expression.
    IllegalAtomic {
        /// The text of the offending token.
        value: String,
    },
    /// A number literal could not be converted to a value.
    InvalidNumber {
        /// The text of the offending literal.
        value: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongTokenValue { expected, found } => {
                write!(f, "expected '{expected}', but found '{found}'")
            },
            Self::WrongTokenType { expected, found, value } => {
                write!(f, "expected {expected} token, but found {found} '{value}'")
            },
            Self::IllegalAtomic { value } => {
                write!(f, "token '{value}' cannot start an expression")
            },
            Self::InvalidNumber { value } => {
                write!(f, "number literal '{value}' is out of range")
            },
        }
    }
}

impl std::error::Error for ParseError {}

/// One recovered parse failure: which construct was being parsed, where it
/// started, what went wrong and where.
///
/// The parser records a report, skips ahead to the next punctuation token
/// and resumes, so a single pass over broken input collects every report.
#[derive(Debug)]
pub struct ParseReport {
    /// The construct being parsed, e.g. `"variable declaration"`.
    pub context: &'static str,
    /// Where the construct started.
    pub start: Position,
    /// The underlying failure.
    pub cause: ParseError,
    /// Where the failure was detected.
    pub at: Position,
}

impl std::fmt::Display for ParseReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "While parsing {} (line {}, column {}): {} at (line {}, column {})",
            self.context, self.start.line, self.start.column,
            self.cause, self.at.line, self.at.column,
        )
    }
}

impl std::error::Error for ParseReport {}
