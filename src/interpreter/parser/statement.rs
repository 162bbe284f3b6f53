use std::rc::Rc;

use crate::{
    ast::Statement,
    interpreter::{lexer::TokenKind, parser::core::Parser},
};

impl Parser {
    /// Reads one statement, selected by the leading token.
    ///
    /// Keywords pick the dedicated readers, `{` starts a block, and
    /// anything else is a bare expression terminated by `;`. Every reader
    /// runs under recovery, so this function always returns a statement.
    pub fn read_statement(&mut self) -> Statement {
        let kind = self.tokens.peek().kind;
        let value = self.tokens.peek().value.clone();
        match (kind, value.as_str()) {
            (TokenKind::Keyword, "import") => self.read_import(),
            (TokenKind::Keyword, "let") => self.read_variable_declaration(),
            (TokenKind::Keyword, "fun") => self.read_function_declaration(),
            (TokenKind::Keyword, "for") => self.read_for_loop(),
            (TokenKind::Keyword, "while") => self.read_while_loop(),
            (TokenKind::Keyword, "if") => self.read_if_else(),
            (TokenKind::Keyword, "continue") => self.read_continue(),
            (TokenKind::Keyword, "break") => self.read_break(),
            (TokenKind::Keyword, "return") => self.read_return(),
            (TokenKind::Keyword, "echo") => self.read_echo(),
            (TokenKind::Punctuation, "{") => self.read_block(),
            _ => self.read_bare_expression(),
        }
    }

    fn read_import(&mut self) -> Statement {
        self.recover_statement("import statement", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("import")?;
            let name = parser.expect_kind(TokenKind::Identifier)?;
            let alias = if parser.next_if_value("as") {
                Some(parser.expect_kind(TokenKind::Identifier)?)
            } else {
                None
            };
            parser.expect_value(";")?;
            Ok(Statement::ImportLibrary { name, alias, position })
        })
    }

    fn read_variable_declaration(&mut self) -> Statement {
        self.recover_statement("variable declaration", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("let")?;
            let name = parser.expect_kind(TokenKind::Identifier)?;
            let init = if parser.next_if_value("=") {
                Some(parser.read_expression())
            } else {
                None
            };
            parser.expect_value(";")?;
            Ok(Statement::VariableDeclaration { name, init, position })
        })
    }

    fn read_function_declaration(&mut self) -> Statement {
        self.recover_statement("function declaration", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("fun")?;
            let name = parser.expect_kind(TokenKind::Identifier)?;
            let params = parser.read_expression_list("(", ")")?;
            let body = parser.read_block();
            Ok(Statement::FunctionDeclaration {
                name,
                params: Rc::new(params),
                body: Rc::new(body),
                position,
            })
        })
    }

    fn read_for_loop(&mut self) -> Statement {
        self.recover_statement("for loop", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("for")?;
            parser.expect_value("(")?;
            let variable = parser.expect_kind(TokenKind::Identifier)?;
            parser.expect_value("from")?;
            let start = parser.read_expression();
            parser.expect_value("to")?;
            let end = parser.read_expression();
            let step = if parser.next_if_value("step") {
                Some(parser.read_expression())
            } else {
                None
            };
            parser.expect_value(")")?;
            let body = parser.read_statement();
            Ok(Statement::ForLoop {
                variable,
                start,
                end,
                step,
                body: Box::new(body),
                position,
            })
        })
    }

    fn read_while_loop(&mut self) -> Statement {
        self.recover_statement("while loop", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("while")?;
            parser.expect_value("(")?;
            let condition = parser.read_expression();
            parser.expect_value(")")?;
            let body = parser.read_statement();
            Ok(Statement::WhileLoop { condition, body: Box::new(body), position })
        })
    }

    fn read_if_else(&mut self) -> Statement {
        self.recover_statement("if-else statement", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("if")?;
            parser.expect_value("(")?;
            let condition = parser.read_expression();
            parser.expect_value(")")?;
            let main_clause = parser.read_statement();
            // a dangling else always binds to the nearest open if
            let else_clause = if parser.next_if_value("else") {
                Some(Box::new(parser.read_statement()))
            } else {
                None
            };
            Ok(Statement::IfElse {
                condition,
                main_clause: Box::new(main_clause),
                else_clause,
                position,
            })
        })
    }

    fn read_continue(&mut self) -> Statement {
        self.recover_statement("continue operator", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("continue")?;
            parser.expect_value(";")?;
            Ok(Statement::Continue { position })
        })
    }

    fn read_break(&mut self) -> Statement {
        self.recover_statement("break operator", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("break")?;
            parser.expect_value(";")?;
            Ok(Statement::Break { position })
        })
    }

    fn read_return(&mut self) -> Statement {
        self.recover_statement("return operator", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("return")?;
            let expression = if parser.peek_value_is(";") {
                None
            } else {
                Some(parser.read_expression())
            };
            parser.expect_value(";")?;
            Ok(Statement::Return { expression, position })
        })
    }

    fn read_echo(&mut self) -> Statement {
        self.recover_statement("echo statement", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("echo")?;
            let expression = parser.read_expression();
            parser.expect_value(";")?;
            Ok(Statement::Echo { expression, position })
        })
    }

    fn read_bare_expression(&mut self) -> Statement {
        self.recover_statement("bare expression", |parser| {
            let position = parser.tokens.peek().position;
            let expression = parser.read_expression();
            parser.expect_value(";")?;
            Ok(Statement::BareExpression { expression, position })
        })
    }

    /// Reads a `{ ... }` block. Used both as a statement and as the body
    /// of function declarations and lambdas.
    pub(crate) fn read_block(&mut self) -> Statement {
        self.recover_statement("block statement", |parser| {
            let position = parser.tokens.peek().position;
            parser.expect_value("{")?;
            let mut statements = Vec::new();
            while !parser.tokens.eof() && !parser.peek_value_is("}") {
                statements.push(parser.read_statement());
            }
            parser.expect_value("}")?;
            Ok(Statement::Block { statements, position })
        })
    }
}
