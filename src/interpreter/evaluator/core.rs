use std::rc::Rc;

use crate::{
    ast::{Expression, Program, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::{binary, unary},
        prelude,
        scope::{LexicalScope, SharedScope},
        value::core::Value,
    },
};

/// Result type used by every evaluation function.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The flow register: tells the evaluator whether execution proceeds
/// normally or whether a flow operator is travelling towards the construct
/// that consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Execute the next statement as usual.
    Sequential,
    /// A `break` is looking for the nearest loop.
    Break,
    /// A `continue` is looking for the nearest loop.
    Continue,
    /// A `return` is looking for the nearest function call.
    Return,
}

/// Executes programs against a scope chain.
///
/// One evaluator runs one program at a time, single-threaded. Runtime
/// failures are fatal: the first error stops execution and its rendered
/// description is stored as the fatal error.
///
/// # Example
/// ```
/// use toylang::interpreter::{evaluator::core::Evaluator, parser::core::Parser};
///
/// let mut parser = Parser::new("let x = 2 + 3; assert(x == 5);");
/// let program = parser.read_program();
/// assert!(parser.errors().is_empty());
///
/// let mut evaluator = Evaluator::new("example");
/// evaluator.execute_program(&program);
/// assert!(evaluator.fatal_error().is_none());
/// ```
pub struct Evaluator {
    pub(crate) scope: SharedScope,
    pub(crate) flow: Flow,
    pub(crate) return_value: Option<Value>,
    pub(crate) filename: String,
    fatal_error: Option<String>,
}

impl Evaluator {
    /// Creates an evaluator whose root scope carries the full prelude.
    ///
    /// The filename only feeds diagnostics: function values remember it so
    /// call failures can name the file they crossed.
    #[must_use]
    pub fn new(filename: &str) -> Self {
        let scope = LexicalScope::new_root();
        prelude::install(&scope);
        Self {
            scope,
            flow: Flow::Sequential,
            return_value: None,
            filename: filename.to_string(),
            fatal_error: None,
        }
    }

    /// Runs every top-level statement in order.
    ///
    /// Execution stops at the first runtime error; its description is then
    /// available through [`Evaluator::fatal_error`]. A flow operator that
    /// survives to the top level is itself an error.
    pub fn execute_program(&mut self, program: &Program) {
        for statement in &program.statements {
            if let Err(error) = self.run_top_level(statement) {
                self.fatal_error = Some(error.to_string());
                return;
            }
        }
    }

    /// The description of the error that stopped execution, if any.
    #[must_use]
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal_error.as_deref()
    }

    fn run_top_level(&mut self, statement: &Statement) -> EvalResult<()> {
        self.execute_statement(statement)?;
        match self.flow {
            Flow::Sequential => Ok(()),
            Flow::Break => Err(RuntimeError::MisplacedFlowOperator { name: "break" }),
            Flow::Continue => Err(RuntimeError::MisplacedFlowOperator { name: "continue" }),
            Flow::Return => Err(RuntimeError::MisplacedFlowOperator { name: "return" }),
        }
    }

    /// Executes one statement, wrapping any failure with the statement's
    /// positional label. The wrapping repeats at every nesting level, so a
    /// deep failure surfaces as a chain of locations.
    pub fn execute_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        self.dispatch_statement(statement).map_err(|inner| {
            RuntimeError::propagated(statement.node_label(), inner)
        })
    }

    fn dispatch_statement(&mut self, statement: &Statement) -> EvalResult<()> {
        match statement {
            Statement::ImportLibrary { name, alias, .. } => {
                self.execute_import(name, alias.as_deref())
            },
            Statement::VariableDeclaration { name, init, .. } => {
                self.execute_variable_declaration(name, init.as_ref())
            },
            Statement::FunctionDeclaration { name, params, body, .. } => {
                self.execute_function_declaration(name, params, body)
            },
            Statement::ForLoop { variable, start, end, step, body, .. } => {
                self.execute_for_loop(variable, start, end, step.as_ref(), body)
            },
            Statement::WhileLoop { condition, body, .. } => {
                self.execute_while_loop(condition, body)
            },
            Statement::IfElse { condition, main_clause, else_clause, .. } => {
                self.execute_if_else(condition, main_clause, else_clause.as_deref())
            },
            Statement::Continue { .. } => {
                self.flow = Flow::Continue;
                Ok(())
            },
            Statement::Break { .. } => {
                self.flow = Flow::Break;
                Ok(())
            },
            Statement::Return { expression, .. } => self.execute_return(expression.as_ref()),
            Statement::BareExpression { expression, .. } => {
                self.evaluate_expression(expression)?;
                Ok(())
            },
            Statement::Block { statements, .. } => self.execute_block(statements),
            Statement::Echo { expression, .. } => self.execute_echo(expression),
            Statement::Illegal { .. } => Err(RuntimeError::ErrorNode),
        }
    }

    /// Evaluates one expression, wrapping any failure with the
    /// expression's positional label.
    pub fn evaluate_expression(&mut self, expression: &Expression) -> EvalResult<Value> {
        self.dispatch_expression(expression).map_err(|inner| {
            RuntimeError::propagated(expression.node_label(), inner)
        })
    }

    fn dispatch_expression(&mut self, expression: &Expression) -> EvalResult<Value> {
        match expression {
            Expression::BinaryOperation { left, op, right, .. } => {
                self.evaluate_binary_operation(left, op, right)
            },
            Expression::PrefixOperation { op, expression, .. } => {
                let value = self.evaluate_expression(expression)?;
                unary::eval_prefix(op, &value)
            },
            Expression::Call { target, arguments, .. } => self.evaluate_call(target, arguments),
            Expression::IndexAccess { target, index, .. } => {
                let container = self.evaluate_expression(target)?;
                let index = self.evaluate_expression(index)?;
                crate::interpreter::evaluator::expression::read_element(&container, &index)
            },
            Expression::NumberLiteral { value, .. } => Ok(Value::Number(*value)),
            Expression::BooleanLiteral { value, .. } => Ok(Value::Boolean(*value)),
            Expression::StringLiteral { value, .. } => Ok(Value::Str(value.clone())),
            Expression::NilLiteral { .. } => Ok(Value::Nil),
            Expression::ArrayLiteral { values, .. } => self.evaluate_array_literal(values),
            Expression::ObjectLiteral { entries, .. } => self.evaluate_object_literal(entries),
            Expression::Variable { name, .. } => self.scope.get(name),
            Expression::Lambda { params, body, .. } => Ok(self.make_function(params, body)),
            Expression::Illegal { .. } => Err(RuntimeError::ErrorNode),
        }
    }

    fn evaluate_binary_operation(
        &mut self,
        left: &Expression,
        op: &str,
        right: &Expression,
    ) -> EvalResult<Value> {
        if op == "=" {
            return self.evaluate_assignment(left, right);
        }
        if crate::ast::COMPOUND_OPERATORS.contains(&op) {
            return self.evaluate_compound_assignment(op, left, right);
        }
        // both operands are always evaluated, even for `and` and `or`
        let left_value = self.evaluate_expression(left)?;
        let right_value = self.evaluate_expression(right)?;
        binary::core::eval_binary(op, &left_value, &right_value)
    }

    /// Runs a closure inside a fresh child frame and restores the previous
    /// frame afterwards, regardless of the outcome.
    pub(crate) fn in_child_scope<T>(
        &mut self,
        run: impl FnOnce(&mut Self) -> EvalResult<T>,
    ) -> EvalResult<T> {
        let child = LexicalScope::new_inner(&self.scope);
        self.scope = child;
        let result = run(self);
        let parent = self.scope.parent().map(Rc::clone);
        match parent {
            Some(parent) => self.scope = parent,
            None => {
                return Err(RuntimeError::Internal {
                    reason: "trying to leave the root scope".to_string(),
                });
            },
        }
        result
    }
}
