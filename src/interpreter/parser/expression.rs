use std::rc::Rc;

use crate::{
    ast::{Associativity, BINARY_LEVELS, Expression, PREFIX_OPERATORS},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser {
    /// Reads one full expression.
    ///
    /// Entry point of the precedence climb; runs under recovery, so a
    /// failed expression becomes an illegal placeholder node and parsing
    /// continues after the next punctuation token.
    pub fn read_expression(&mut self) -> Expression {
        self.recover_expression("expression", |parser| parser.parse_binary_level(0))
    }

    /// Parses the binary operators of one precedence-table row, using the
    /// next row as the sub-expression parser. Rows past the end of the
    /// table hand over to the prefix parser.
    fn parse_binary_level(&mut self, level: usize) -> ParseResult<Expression> {
        let Some(definition) = BINARY_LEVELS.get(level) else {
            return self.parse_prefix_operation();
        };
        let start = self.tokens.peek().position;
        let mut left = self.parse_binary_level(level + 1)?;
        loop {
            let peeked = self.tokens.peek();
            let matches_level = peeked.kind == TokenKind::Operator
                && definition.operators.contains(&peeked.value.as_str());
            if !matches_level {
                return Ok(left);
            }
            let op = self.tokens.next().value;
            let right = match definition.associativity {
                Associativity::Left => self.parse_binary_level(level + 1)?,
                // same level on the right side makes the operator group
                // to the right, as `^` requires
                Associativity::Right => self.parse_binary_level(level)?,
            };
            left = Expression::BinaryOperation {
                left: Box::new(left),
                op,
                right: Box::new(right),
                position: start,
            };
            if definition.associativity == Associativity::Right {
                return Ok(left);
            }
        }
    }

    /// Parses chained prefix operators (`not`, `-`), then hands over to
    /// the postfix forms.
    fn parse_prefix_operation(&mut self) -> ParseResult<Expression> {
        let peeked = self.tokens.peek();
        let position = peeked.position;
        if peeked.kind == TokenKind::Operator
            && PREFIX_OPERATORS.contains(&peeked.value.as_str())
        {
            let op = self.tokens.next().value;
            let nested = self.parse_prefix_operation()?;
            return Ok(Expression::PrefixOperation {
                op,
                expression: Box::new(nested),
                position,
            });
        }
        self.parse_postfix_operation()
    }

    /// Parses an atomic expression followed by any number of call and
    /// index suffixes.
    fn parse_postfix_operation(&mut self) -> ParseResult<Expression> {
        let start = self.tokens.peek().position;
        let mut expression = self.read_atomic_expression();
        loop {
            if self.peek_value_is("(") {
                let arguments = self.read_expression_list("(", ")")?;
                expression = Expression::Call {
                    target: Box::new(expression),
                    arguments,
                    position: start,
                };
            } else if self.next_if_value("[") {
                let index = self.read_expression();
                self.expect_value("]")?;
                expression = Expression::IndexAccess {
                    target: Box::new(expression),
                    index: Box::new(index),
                    position: start,
                };
            } else {
                return Ok(expression);
            }
        }
    }

    /// Reads an atomic expression: a literal, a variable, a lambda, an
    /// array or object literal, or a parenthesized expression. Runs under
    /// recovery like the statement readers.
    fn read_atomic_expression(&mut self) -> Expression {
        self.recover_expression("atomic expression", |parser| {
            let peeked = parser.tokens.peek().clone();
            let position = peeked.position;
            match (peeked.kind, peeked.value.as_str()) {
                (TokenKind::Keyword, "true") => {
                    parser.tokens.next();
                    Ok(Expression::BooleanLiteral { value: true, position })
                },
                (TokenKind::Keyword, "false") => {
                    parser.tokens.next();
                    Ok(Expression::BooleanLiteral { value: false, position })
                },
                (TokenKind::Keyword, "nil") => {
                    parser.tokens.next();
                    Ok(Expression::NilLiteral { position })
                },
                (TokenKind::Keyword, "lambda") => Ok(parser.read_lambda()),
                (TokenKind::Number, _) => {
                    let token = parser.tokens.next();
                    let value = token.value.parse::<f64>().map_err(|_| {
                        ParseError::InvalidNumber { value: token.value.clone() }
                    })?;
                    Ok(Expression::NumberLiteral { value, position })
                },
                (TokenKind::Str, _) => {
                    let token = parser.tokens.next();
                    Ok(Expression::StringLiteral { value: token.value, position })
                },
                (TokenKind::Identifier, _) => {
                    let token = parser.tokens.next();
                    Ok(Expression::Variable { name: token.value, position })
                },
                (TokenKind::Punctuation, "(") => {
                    parser.tokens.next();
                    let expression = parser.read_expression();
                    parser.expect_value(")")?;
                    Ok(expression)
                },
                (TokenKind::Punctuation, "[") => {
                    let values = parser.read_expression_list("[", "]")?;
                    Ok(Expression::ArrayLiteral { values, position })
                },
                (TokenKind::Punctuation, "{") => parser.read_object_literal(),
                _ => Err(ParseError::IllegalAtomic { value: peeked.value.clone() }),
            }
        })
    }

    fn read_lambda(&mut self) -> Expression {
        self.recover_expression("lambda expression", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("lambda")?;
            let params = parser.read_expression_list("(", ")")?;
            let body = parser.read_block();
            Ok(Expression::Lambda {
                params: Rc::new(params),
                body: Rc::new(body),
                position,
            })
        })
    }

    fn read_object_literal(&mut self) -> ParseResult<Expression> {
        let position = self.tokens.peek().position;
        self.expect_value("{")?;
        let mut entries = Vec::new();
        while !self.tokens.eof() && !self.peek_value_is("}") {
            let key = self.read_expression();
            self.expect_value(":")?;
            let value = self.read_expression();
            entries.push((key, value));
            if !self.next_if_value(",") {
                break;
            }
        }
        self.expect_value("}")?;
        Ok(Expression::ObjectLiteral { entries, position })
    }

    /// Reads a delimited, comma-separated expression list, e.g. call
    /// arguments `(a, b)` or an array literal `[a, b]`. The empty list is
    /// allowed.
    pub(crate) fn read_expression_list(
        &mut self,
        start: &str,
        end: &str,
    ) -> ParseResult<Vec<Expression>> {
        self.expect_value(start)?;
        let mut list = Vec::new();
        while !self.tokens.eof() && !self.peek_value_is(end) {
            list.push(self.read_expression());
            if !self.next_if_value(",") {
                break;
            }
        }
        self.expect_value(end)?;
        Ok(list)
    }
}
