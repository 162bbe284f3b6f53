use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::{EvalResult, Evaluator}, parser::core::Parser},
};

impl Evaluator {
    /// Executes `import name;` or `import name as alias;`.
    ///
    /// The file `<name>.toy` is read relative to the working directory,
    /// parsed, and evaluated by a fresh evaluator that carries the same
    /// prelude. Whatever the module left bound to `exports` in its root
    /// scope is then declared in the current scope under the alias, or
    /// the module name without one.
    ///
    /// Functions exported by the module keep working after the import:
    /// they share their parameter list and body with the module's syntax
    /// tree and hold on to the module's scope chain.
    pub(crate) fn execute_import(&mut self, name: &str, alias: Option<&str>) -> EvalResult<()> {
        let path = format!("{name}.toy");
        let source = std::fs::read_to_string(&path)
            .map_err(|_| RuntimeError::FileImportFailed { path: path.clone() })?;

        let mut parser = Parser::new(&source);
        let program = parser.read_program();
        if !parser.errors().is_empty() {
            return Err(RuntimeError::ImportParseFailed {
                path,
                errors: parser.errors().iter().map(ToString::to_string).collect(),
            });
        }

        let mut module_evaluator = Evaluator::new(&path);
        module_evaluator.execute_program(&program);
        if let Some(inner) = module_evaluator.fatal_error() {
            return Err(RuntimeError::ImportEvalFailed { path, inner: inner.to_string() });
        }

        let exports = module_evaluator.scope.get("exports")?;
        let bound_name = alias.unwrap_or(name);
        self.scope.init(bound_name, exports.copy_for_assignment())
    }
}
