//! # toylang
//!
//! toylang is a small dynamically-typed scripting language implemented as
//! a tree-walking interpreter. Source text flows through a lexer and a
//! recovering parser into an abstract syntax tree, which the evaluator
//! walks directly. The language has numbers, booleans, strings, nil,
//! arrays, string-keyed objects, first-class functions with lexical
//! closures and default parameters, control flow, file-based module
//! imports and a small built-in library.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Program,
    error::{ParseReport, ScriptError},
    interpreter::{evaluator::core::Evaluator, parser::core::Parser},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expression` enums and the
/// types around them that represent source code as a tree. The AST is
/// built by the parser, executed by the evaluator and rendered back to
/// text by the formatter.
///
/// # Responsibilities
/// - Defines statement and expression nodes for all language constructs.
/// - Attaches source positions to every node for error reporting.
/// - Carries the operator precedence table shared by parser and
///   formatter.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing,
/// parsing or evaluating code. Parse errors are collected into reports
/// and never stop the parser; runtime errors are fatal and carry a chain
/// of source positions describing where they crossed the tree.
///
/// # Responsibilities
/// - Defines error enums for all failure modes.
/// - Renders human-readable diagnostics with positions.
/// - Integrates with the standard error traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, the value
/// model, scoping and the prelude to provide a complete runtime for the
/// language.
///
/// # Responsibilities
/// - Coordinates the core components: lexer, parser, evaluator.
/// - Provides the value and scope types the evaluator runs on.
/// - Installs the built-in library into every root scope.
pub mod interpreter;
/// General utilities shared across phases.
///
/// Numeric conversions with explicit range checks and the text quoting
/// helper used by the formatter.
pub mod util;

/// Parses a source text into a program plus the collected parse reports.
///
/// Parsing is total: the returned program always covers the whole input,
/// with illegal placeholder nodes standing in for anything that failed.
/// A program parsed with zero reports contains no placeholders and is
/// safe to execute.
///
/// # Example
/// ```
/// let (program, errors) = toylang::parse("let answer = 42;");
/// assert!(errors.is_empty());
/// assert_eq!(program.statements.len(), 1);
/// ```
#[must_use]
pub fn parse(source: &str) -> (Program, Vec<ParseReport>) {
    let mut parser = Parser::new(source);
    let program = parser.read_program();
    (program, parser.into_errors())
}

/// Renders a program in canonical formatting.
///
/// Reparsing the output yields a tree of the same shape, and formatting
/// is idempotent: formatting already formatted text reproduces it.
#[must_use]
pub fn format(program: &Program) -> String {
    program.to_format_string()
}

/// Executes a program and returns the fatal error description, if
/// execution ended in one.
///
/// The filename is only used in diagnostics. Side effects (standard
/// output, files) happen as the program runs; the caller decides what to
/// do with the returned error.
#[must_use]
pub fn evaluate(program: &Program, filename: &str) -> Option<String> {
    let mut evaluator = Evaluator::new(filename);
    evaluator.execute_program(program);
    evaluator.fatal_error().map(ToString::to_string)
}

/// Parses and executes a source text in one step.
///
/// # Errors
/// - [`ScriptError::Parse`] when the parser collected any reports; the
///   program is not executed.
/// - [`ScriptError::Runtime`] when execution stopped with a fatal error.
///
/// # Example
/// ```
/// assert!(toylang::run_script("let x = 2; assert(x * x == 4);", "doc").is_ok());
/// assert!(toylang::run_script("assert(false);", "doc").is_err());
/// ```
pub fn run_script(source: &str, filename: &str) -> Result<(), ScriptError> {
    let (program, errors) = parse(source);
    if !errors.is_empty() {
        return Err(ScriptError::Parse(errors));
    }
    match evaluate(&program, filename) {
        Some(fatal) => Err(ScriptError::Runtime(fatal)),
        None => Ok(()),
    }
}
