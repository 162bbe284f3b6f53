/// The evaluator walks the AST and executes it.
///
/// This is the core execution engine: statement and expression dispatch,
/// control-flow bookkeeping, operator evaluation, function calls and
/// module imports all live here.
pub mod evaluator;
/// The lexer turns source text into a token stream.
///
/// Built on a derived lexer; produces tokens carrying their kind, text and
/// 1-indexed source position, terminated by a synthetic end-of-file token.
/// Invalid input becomes illegal tokens rather than failures.
pub mod lexer;
/// The parser builds the abstract syntax tree from tokens.
///
/// Statements are read by recursive descent on the leading token;
/// expressions by a table-driven precedence climb. Every statement parser
/// recovers from errors by recording a report and skipping to the next
/// punctuation token, so parsing always yields a program.
pub mod parser;
/// The prelude installs the built-in functions and constants.
///
/// Every root scope receives the same set of bindings before user code
/// runs; modules imported at runtime get their own copy.
pub mod prelude;
/// The lexical scope chain.
///
/// Linked frames mapping names to values, shared by reference so closures
/// keep their definition environment alive.
pub mod scope;
/// The runtime value model.
///
/// A tagged sum over nil, booleans, numbers, strings, arrays, objects,
/// functions and built-ins, with the copy-on-assignment rule that keeps
/// scalars value-typed and heap values shared.
pub mod value;
