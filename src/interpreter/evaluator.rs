/// Binary operator evaluation.
///
/// Dispatches every binary operator over the pair of operand types, with
/// one submodule per operand family.
pub mod binary;
/// Core evaluation state and dispatch.
///
/// Holds the evaluator with its scope handle, flow register and fatal
/// error slot, and wires statement and expression dispatch to the
/// per-construct modules with positional error propagation.
pub mod core;
/// Expression evaluation: literals, places, assignments and index access.
pub mod expression;
/// For-loop execution, including step validation and the flow-register
/// discipline.
pub mod for_loop;
/// Function calls: argument binding with defaults, the scope switch to the
/// captured environment, and builtin invocation.
pub mod function;
/// Module imports: loading, parsing and evaluating `.toy` files and
/// binding their exports.
pub mod import;
/// Statement execution for everything that is not a loop or an import.
pub mod statement;
/// Prefix operator evaluation.
pub mod unary;
