use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult, interpreter::value::core::Value};

/// A shared handle to one scope frame.
///
/// Scopes are reference-shared: a closure keeps a handle to the frame it
/// was created in, and nested evaluation links new child frames to the
/// same chain. A frame stays alive for as long as any closure or child
/// frame can still reach it.
pub type SharedScope = Rc<LexicalScope>;

/// One frame of the lexical scope chain: a mapping from names to values
/// plus an optional parent frame.
pub struct LexicalScope {
    parent: Option<SharedScope>,
    storage: RefCell<HashMap<String, Value>>,
}

impl LexicalScope {
    /// Creates a frame with no parent. The evaluator installs the prelude
    /// into every root frame before user code runs.
    #[must_use]
    pub fn new_root() -> SharedScope {
        Rc::new(Self { parent: None, storage: RefCell::new(HashMap::new()) })
    }

    /// Creates an empty frame linked to a parent.
    #[must_use]
    pub fn new_inner(parent: &SharedScope) -> SharedScope {
        Rc::new(Self {
            parent: Some(Rc::clone(parent)),
            storage: RefCell::new(HashMap::new()),
        })
    }

    /// The parent frame, if this is not a root.
    #[must_use]
    pub const fn parent(&self) -> Option<&SharedScope> {
        self.parent.as_ref()
    }

    /// Declares a name in this frame.
    ///
    /// Declaration never looks at ancestor frames: shadowing an outer name
    /// is allowed, re-declaring a name of this frame is not.
    ///
    /// # Errors
    /// `RuntimeError::CannotRedeclare` when the name already exists in
    /// this frame.
    pub fn init(&self, name: &str, value: Value) -> EvalResult<()> {
        let mut storage = self.storage.borrow_mut();
        if storage.contains_key(name) {
            return Err(RuntimeError::CannotRedeclare { name: name.to_string() });
        }
        storage.insert(name.to_string(), value);
        Ok(())
    }

    /// Reads the nearest binding of a name, walking towards the root.
    ///
    /// # Errors
    /// `RuntimeError::UndefinedVariable` when no frame binds the name.
    pub fn get(&self, name: &str) -> EvalResult<Value> {
        if let Some(value) = self.storage.borrow().get(name) {
            return Ok(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.get(name),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string() }),
        }
    }

    /// Rebinds a name in the frame that declared it, walking towards the
    /// root. Assignment never creates a binding.
    ///
    /// # Errors
    /// `RuntimeError::UndefinedVariable` when no frame binds the name.
    pub fn set(&self, name: &str, value: Value) -> EvalResult<()> {
        let mut storage = self.storage.borrow_mut();
        if let Some(slot) = storage.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        drop(storage);
        match &self.parent {
            Some(parent) => parent.set(name, value),
            None => Err(RuntimeError::UndefinedVariable { name: name.to_string() }),
        }
    }

    /// Unconditionally binds a name in this frame. Reserved for prelude
    /// installation, which must overwrite nothing but also never fail.
    pub(crate) fn define(&self, name: &str, value: Value) {
        self.storage.borrow_mut().insert(name.to_string(), value);
    }
}
