use crate::{
    ast::Expression,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            binary,
            core::{EvalResult, Evaluator},
        },
        value::core::Value,
    },
    util::num::number_to_index,
};

impl Evaluator {
    /// Evaluates `place = expression`.
    ///
    /// The right side is evaluated first and run through the copy rule;
    /// the place is then either a variable, rebound in its declaring
    /// frame, or an index expression, written through. Anything else on
    /// the left is an error.
    pub(crate) fn evaluate_assignment(
        &mut self,
        place: &Expression,
        expression: &Expression,
    ) -> EvalResult<Value> {
        let value = self.evaluate_expression(expression)?.copy_for_assignment();
        match place {
            Expression::Variable { name, .. } => {
                self.scope.set(name, value.clone())?;
                Ok(value)
            },
            Expression::IndexAccess { target, index, .. } => {
                let container = self.evaluate_expression(target)?;
                let index = self.evaluate_expression(index)?;
                write_element(&container, &index, value.clone())?;
                Ok(value)
            },
            _ => Err(RuntimeError::ExpectedIdentifier),
        }
    }

    /// Evaluates a compound assignment such as `place += expression`.
    ///
    /// Both sides are evaluated, the mutating operator runs on the left
    /// value, and the result is written back through the place. Arrays
    /// mutate their shared storage in place, so the write-back re-stores
    /// the same handle; scalars produce a fresh value that replaces the
    /// old one. When the left side is not a place the result is simply
    /// returned: heap mutation stays visible, a scalar result is
    /// discarded with the expression value.
    pub(crate) fn evaluate_compound_assignment(
        &mut self,
        op: &str,
        place: &Expression,
        expression: &Expression,
    ) -> EvalResult<Value> {
        match place {
            Expression::Variable { name, .. } => {
                let current = self.scope.get(name)?;
                let operand = self.evaluate_expression(expression)?;
                let result = binary::compound::eval_compound(op, &current, &operand)?;
                self.scope.set(name, result.clone())?;
                Ok(result)
            },
            Expression::IndexAccess { target, index, .. } => {
                let container = self.evaluate_expression(target)?;
                let index = self.evaluate_expression(index)?;
                let current = read_element(&container, &index)?;
                let operand = self.evaluate_expression(expression)?;
                let result = binary::compound::eval_compound(op, &current, &operand)?;
                write_element(&container, &index, result.clone())?;
                Ok(result)
            },
            _ => {
                let current = self.evaluate_expression(place)?;
                let operand = self.evaluate_expression(expression)?;
                binary::compound::eval_compound(op, &current, &operand)
            },
        }
    }

    pub(crate) fn evaluate_array_literal(&mut self, values: &[Expression]) -> EvalResult<Value> {
        let mut elements = Vec::with_capacity(values.len());
        for value in values {
            elements.push(self.evaluate_expression(value)?);
        }
        Ok(Value::array(elements))
    }

    /// Evaluates an object literal. Keys are evaluated and converted to
    /// their string form at construction time; a repeated key overwrites
    /// the earlier entry.
    pub(crate) fn evaluate_object_literal(
        &mut self,
        entries: &[(Expression, Expression)],
    ) -> EvalResult<Value> {
        let object = Value::empty_object();
        if let Value::Object(handle) = &object {
            for (key, value) in entries {
                let key = self.evaluate_expression(key)?.to_string();
                let value = self.evaluate_expression(value)?;
                handle.borrow_mut().insert(key, value);
            }
        }
        Ok(object)
    }
}

/// Reads `container[index]`.
///
/// Arrays require an integral, non-negative index inside the bounds.
/// Objects convert the index to its string form and yield nil for an
/// absent key. Every other container type is an error.
pub fn read_element(container: &Value, index: &Value) -> EvalResult<Value> {
    match container {
        Value::Array(handle) => {
            let position = number_to_index(index.as_number()?)?;
            let elements = handle.borrow();
            elements.get(position).cloned().ok_or(RuntimeError::IndexOutOfBounds {
                index: position,
                size: elements.len(),
            })
        },
        Value::Object(handle) => {
            let key = index.to_string();
            Ok(handle.borrow().get(&key).cloned().unwrap_or(Value::Nil))
        },
        other => Err(RuntimeError::WrongIndexAccessTarget { found: other.type_name() }),
    }
}

/// Writes `container[index] = value`.
///
/// Arrays follow the same index rules as reads. An absent object key
/// creates a new entry.
pub fn write_element(container: &Value, index: &Value, value: Value) -> EvalResult<()> {
    match container {
        Value::Array(handle) => {
            let position = number_to_index(index.as_number()?)?;
            let mut elements = handle.borrow_mut();
            let size = elements.len();
            match elements.get_mut(position) {
                Some(slot) => {
                    *slot = value;
                    Ok(())
                },
                None => Err(RuntimeError::IndexOutOfBounds { index: position, size }),
            }
        },
        Value::Object(handle) => {
            handle.borrow_mut().insert(index.to_string(), value);
            Ok(())
        },
        other => Err(RuntimeError::WrongIndexAccessTarget { found: other.type_name() }),
    }
}
