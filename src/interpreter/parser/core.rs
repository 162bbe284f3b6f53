use crate::{
    ast::{Expression, Position, Program, Statement},
    error::{ParseError, ParseReport},
    interpreter::lexer::{TokenKind, TokenStream},
};

/// Result type used by the fallible parsing functions.
pub type ParseResult<T> = Result<T, ParseError>;

/// A recursive-descent parser over a token stream.
///
/// The parser is total: [`Parser::read_program`] always returns a program.
/// Failures inside a statement are recorded as [`ParseReport`]s, the
/// stream is resynchronized at the next punctuation token, and an illegal
/// placeholder node takes the statement's place.
///
/// # Example
/// ```
/// use toylang::interpreter::parser::core::Parser;
///
/// let mut parser = Parser::new("let x = 1;");
/// let program = parser.read_program();
/// assert!(parser.errors().is_empty());
/// assert_eq!(program.statements.len(), 1);
/// ```
pub struct Parser {
    pub(crate) tokens: TokenStream,
    errors: Vec<ParseReport>,
}

impl Parser {
    /// Creates a parser over the given source text.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self { tokens: TokenStream::new(source), errors: Vec::new() }
    }

    /// Reads every statement up to the end of input.
    pub fn read_program(&mut self) -> Program {
        let position = self.tokens.peek().position;
        let mut statements = Vec::new();
        while !self.tokens.eof() {
            statements.push(self.read_statement());
        }
        Program { statements, position }
    }

    /// The reports collected so far.
    #[must_use]
    pub fn errors(&self) -> &[ParseReport] {
        &self.errors
    }

    /// Consumes the parser and returns the collected reports.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseReport> {
        self.errors
    }

    /// Runs a statement parser under recovery: on failure a report is
    /// recorded, tokens are skipped until one punctuation token has been
    /// consumed, and an illegal statement takes the failed statement's
    /// place.
    pub(crate) fn recover_statement(
        &mut self,
        context: &'static str,
        parse: impl FnOnce(&mut Self) -> ParseResult<Statement>,
    ) -> Statement {
        let start = self.tokens.peek().position;
        match parse(self) {
            Ok(statement) => statement,
            Err(cause) => {
                self.report_and_skip(context, start, cause);
                Statement::Illegal { position: start }
            },
        }
    }

    /// The expression counterpart of [`Parser::recover_statement`].
    pub(crate) fn recover_expression(
        &mut self,
        context: &'static str,
        parse: impl FnOnce(&mut Self) -> ParseResult<Expression>,
    ) -> Expression {
        let start = self.tokens.peek().position;
        match parse(self) {
            Ok(expression) => expression,
            Err(cause) => {
                self.report_and_skip(context, start, cause);
                Expression::Illegal { position: start }
            },
        }
    }

    fn report_and_skip(&mut self, context: &'static str, start: Position, cause: ParseError) {
        let at = self.tokens.peek().position;
        self.errors.push(ParseReport { context, start, cause, at });
        self.skip_to_punctuation();
    }

    /// Skips tokens until one punctuation token has been consumed. This is
    /// the resynchronization point after a failure: usually the `;` or `}`
    /// closing the broken statement.
    fn skip_to_punctuation(&mut self) {
        while !self.tokens.eof() {
            if self.tokens.next().kind == TokenKind::Punctuation {
                return;
            }
        }
    }

    pub(crate) fn peek_value_is(&self, value: &str) -> bool {
        self.tokens.peek().value == value
    }

    /// Consumes the next token when its text matches; reports whether it
    /// did.
    pub(crate) fn next_if_value(&mut self, value: &str) -> bool {
        if self.peek_value_is(value) {
            self.tokens.next();
            return true;
        }
        false
    }

    /// Consumes the next token, which must have the given text.
    pub(crate) fn expect_value(&mut self, expected: &str) -> ParseResult<()> {
        if self.peek_value_is(expected) {
            self.tokens.next();
            return Ok(());
        }
        Err(ParseError::WrongTokenValue {
            expected: expected.to_string(),
            found: self.tokens.peek().value.clone(),
        })
    }

    /// Consumes the next token, which must have the given kind, and
    /// returns its text.
    pub(crate) fn expect_kind(&mut self, expected: TokenKind) -> ParseResult<String> {
        let peeked = self.tokens.peek();
        if peeked.kind == expected {
            return Ok(self.tokens.next().value);
        }
        Err(ParseError::WrongTokenType {
            expected,
            found: peeked.kind,
            value: peeked.value.clone(),
        })
    }
}
