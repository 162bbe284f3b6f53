use std::io::Write;
use std::rc::Rc;

use crate::{
    ast::{Expression, Statement},
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Flow},
        value::core::{FunctionValue, Value},
    },
};

impl Evaluator {
    pub(crate) fn execute_variable_declaration(
        &mut self,
        name: &str,
        init: Option<&Expression>,
    ) -> EvalResult<()> {
        let value = match init {
            Some(init) => self.evaluate_expression(init)?.copy_for_assignment(),
            None => Value::Nil,
        };
        self.scope.init(name, value)
    }

    pub(crate) fn execute_function_declaration(
        &mut self,
        name: &str,
        params: &Rc<Vec<Expression>>,
        body: &Rc<Statement>,
    ) -> EvalResult<()> {
        let function = self.make_function(params, body);
        self.scope.init(name, function)
    }

    /// Builds a function value capturing the current scope. Used by both
    /// function declarations and lambda expressions.
    pub(crate) fn make_function(
        &self,
        params: &Rc<Vec<Expression>>,
        body: &Rc<Statement>,
    ) -> Value {
        Value::Function(Rc::new(FunctionValue {
            filename: self.filename.clone(),
            parameters: Rc::clone(params),
            body: Rc::clone(body),
            scope: Rc::clone(&self.scope),
        }))
    }

    pub(crate) fn execute_while_loop(
        &mut self,
        condition: &Expression,
        body: &Statement,
    ) -> EvalResult<()> {
        loop {
            let keep_going = self.evaluate_expression(condition)?.as_boolean()?;
            if !keep_going {
                return Ok(());
            }
            self.execute_statement(body)?;
            match self.flow {
                Flow::Sequential => {},
                Flow::Continue => self.flow = Flow::Sequential,
                Flow::Break => {
                    self.flow = Flow::Sequential;
                    return Ok(());
                },
                // leave the register set so the enclosing call sees it
                Flow::Return => return Ok(()),
            }
        }
    }

    pub(crate) fn execute_if_else(
        &mut self,
        condition: &Expression,
        main_clause: &Statement,
        else_clause: Option<&Statement>,
    ) -> EvalResult<()> {
        if self.evaluate_expression(condition)?.as_boolean()? {
            self.execute_statement(main_clause)
        } else if let Some(else_clause) = else_clause {
            self.execute_statement(else_clause)
        } else {
            Ok(())
        }
    }

    pub(crate) fn execute_return(&mut self, expression: Option<&Expression>) -> EvalResult<()> {
        self.return_value = match expression {
            Some(expression) => Some(self.evaluate_expression(expression)?),
            None => None,
        };
        self.flow = Flow::Return;
        Ok(())
    }

    pub(crate) fn execute_block(&mut self, statements: &[Statement]) -> EvalResult<()> {
        self.in_child_scope(|evaluator| {
            for statement in statements {
                evaluator.execute_statement(statement)?;
                if evaluator.flow != Flow::Sequential {
                    break;
                }
            }
            Ok(())
        })
    }

    pub(crate) fn execute_echo(&mut self, expression: &Expression) -> EvalResult<()> {
        let value = self.evaluate_expression(expression)?;
        println!("{value}");
        std::io::stdout().flush().ok();
        Ok(())
    }
}
