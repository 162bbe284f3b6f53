use crate::{
    ast::{Expression, Statement},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator, Flow},
        value::core::Value,
    },
};

impl Evaluator {
    /// Executes a `for (var from start to end step s) body` loop.
    ///
    /// All three bounds must be numbers; the step defaults to 1. The range
    /// is half-open: a loop with a positive step stops as soon as the
    /// counter reaches `end`, so `for (i from 0 to 3)` runs its body for
    /// 0, 1 and 2. A step pointing away from the bound is rejected before
    /// the first iteration.
    ///
    /// The counter lives in a scope frame of its own, wrapped around the
    /// body, and the body may reassign it.
    pub(crate) fn execute_for_loop(
        &mut self,
        variable: &str,
        start: &Expression,
        end: &Expression,
        step: Option<&Expression>,
        body: &Statement,
    ) -> EvalResult<()> {
        let start = self.evaluate_expression(start)?.as_number()?;
        let end = self.evaluate_expression(end)?.as_number()?;
        let step = match step {
            Some(step) => self.evaluate_expression(step)?.as_number()?,
            None => 1.0,
        };

        if step == 0.0 {
            return Err(RuntimeError::ZeroStep);
        }
        if start < end && step < 0.0 {
            return Err(RuntimeError::NegativeStep);
        }
        if start > end && step > 0.0 {
            return Err(RuntimeError::PositiveStep);
        }

        self.in_child_scope(|evaluator| {
            evaluator.scope.init(variable, Value::Number(start))?;
            loop {
                let counter = evaluator.scope.get(variable)?.as_number()?;
                let finished = if step > 0.0 { counter >= end } else { counter <= end };
                if finished {
                    return Ok(());
                }

                evaluator.execute_statement(body)?;
                match evaluator.flow {
                    Flow::Sequential => {},
                    Flow::Continue => evaluator.flow = Flow::Sequential,
                    Flow::Break => {
                        evaluator.flow = Flow::Sequential;
                        return Ok(());
                    },
                    // leave the register set so the enclosing call sees it
                    Flow::Return => return Ok(()),
                }

                evaluator.scope.set(variable, Value::Number(counter + step))?;
            }
        })
    }
}
