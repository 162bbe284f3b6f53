use std::rc::Rc;

use crate::{
    ast::Expression,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Flow},
        scope::LexicalScope,
        value::core::{FunctionValue, Value},
    },
};

impl Evaluator {
    /// Evaluates a call expression.
    ///
    /// Arguments are evaluated strictly left to right and run through the
    /// copy rule before the target itself is evaluated. Builtins receive
    /// the argument vector directly; user functions go through the full
    /// binding protocol. Calling any other value is an error.
    pub(crate) fn evaluate_call(
        &mut self,
        target: &Expression,
        arguments: &[Expression],
    ) -> EvalResult<Value> {
        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.evaluate_expression(argument)?.copy_for_assignment());
        }
        match self.evaluate_expression(target)? {
            Value::Builtin(builtin) => (builtin.func)(&args),
            Value::Function(function) => {
                self.call_function(&function, args).map_err(|inner| {
                    RuntimeError::propagated(
                        format!("calling a function from file {}", function.filename),
                        inner,
                    )
                })
            },
            other => Err(RuntimeError::WrongType {
                expected: "function",
                found: other.type_name(),
            }),
        }
    }

    /// Calls a user function: switches to the callee's captured scope,
    /// pushes a frame, binds parameters, runs the body and restores the
    /// caller's scope.
    fn call_function(&mut self, function: &FunctionValue, args: Vec<Value>) -> EvalResult<Value> {
        let caller_scope = Rc::clone(&self.scope);
        self.scope = LexicalScope::new_inner(&function.scope);
        let result = self.bind_and_run(function, args);
        self.scope = caller_scope;
        result
    }

    /// The binding protocol, run inside the fresh callee frame.
    ///
    /// Parameters are either plain names or `name = default` pairs. The
    /// defaults are evaluated in the callee frame and bound first; the
    /// argument vector then fills parameters positionally, overriding
    /// defaults where both exist. Surplus arguments and parameters that
    /// end the protocol without a value are errors.
    fn bind_and_run(&mut self, function: &FunctionValue, args: Vec<Value>) -> EvalResult<Value> {
        let mut parameter_names: Vec<String> = Vec::with_capacity(function.parameters.len());
        let mut without_default: Vec<String> = Vec::new();

        for parameter in function.parameters.iter() {
            match parameter {
                Expression::Variable { name, .. } => {
                    if parameter_names.contains(name) {
                        return Err(RuntimeError::DuplicateParameter { name: name.clone() });
                    }
                    parameter_names.push(name.clone());
                    without_default.push(name.clone());
                },
                Expression::BinaryOperation { left, op, right, .. } if op == "=" => {
                    let Expression::Variable { name, .. } = left.as_ref() else {
                        return Err(RuntimeError::FunctionParameterWrongFormat {
                            found: parameter.to_format_string(),
                        });
                    };
                    if parameter_names.contains(name) {
                        return Err(RuntimeError::DuplicateParameter { name: name.clone() });
                    }
                    parameter_names.push(name.clone());
                    let default = self.evaluate_expression(right)?.copy_for_assignment();
                    self.scope.init(name, default)?;
                },
                other => {
                    return Err(RuntimeError::FunctionParameterWrongFormat {
                        found: other.to_format_string(),
                    });
                },
            }
        }

        if args.len() > parameter_names.len() {
            return Err(RuntimeError::ParamsAndArgsDontMatch {
                expected: parameter_names.len(),
                actual: args.len(),
            });
        }

        for (name, value) in parameter_names.iter().zip(args) {
            if let Some(found) = without_default.iter().position(|unset| unset == name) {
                without_default.remove(found);
                self.scope.init(name, value)?;
            } else {
                self.scope.set(name, value)?;
            }
        }

        if !without_default.is_empty() {
            return Err(RuntimeError::UnsetParameters { names: without_default });
        }

        self.execute_statement(&function.body)?;
        match self.flow {
            Flow::Sequential | Flow::Return => {},
            Flow::Break => {
                return Err(RuntimeError::MisplacedFlowOperator { name: "break" });
            },
            Flow::Continue => {
                return Err(RuntimeError::MisplacedFlowOperator { name: "continue" });
            },
        }
        self.flow = Flow::Sequential;
        Ok(self.return_value.take().unwrap_or(Value::Nil))
    }
}
