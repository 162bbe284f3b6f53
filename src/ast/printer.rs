use crate::{
    ast::{Associativity, BINARY_LEVELS, Expression, Program, Statement, binary_level_of},
    util::text::quoted_string,
};

/// Accumulates formatted source text with indentation tracking.
///
/// The printer is a plain string builder: nodes append their textual form
/// through it and blocks adjust the indentation level around their
/// children.
pub struct Printer {
    tab_size: usize,
    tab_level: usize,
    accumulated: String,
}

impl Printer {
    /// Creates a printer with the given indentation width.
    #[must_use]
    pub const fn new(tab_size: usize) -> Self {
        Self { tab_size, tab_level: 0, accumulated: String::new() }
    }

    /// Appends raw text.
    pub fn push(&mut self, text: &str) {
        self.accumulated.push_str(text);
    }

    /// Appends the indentation padding for the current level.
    pub fn pad(&mut self) {
        let width = self.tab_level * self.tab_size;
        self.accumulated.extend(std::iter::repeat_n(' ', width));
    }

    /// Increases the indentation level by one.
    pub const fn increase_tab_level(&mut self) {
        self.tab_level += 1;
    }

    /// Decreases the indentation level by one.
    pub const fn decrease_tab_level(&mut self) {
        self.tab_level = self.tab_level.saturating_sub(1);
    }

    /// Consumes the printer and returns the accumulated text.
    #[must_use]
    pub fn finish(self) -> String {
        self.accumulated
    }
}

impl Program {
    /// Renders the whole program in canonical form, one top-level statement
    /// per line.
    ///
    /// # Example
    /// ```
    /// let (program, errors) = toylang::parse("let x=1+2 ;");
    /// assert!(errors.is_empty());
    /// assert_eq!(toylang::format(&program), "let x = 1 + 2;\n");
    /// ```
    #[must_use]
    pub fn to_format_string(&self) -> String {
        let mut printer = Printer::new(4);
        for statement in &self.statements {
            printer.pad();
            statement.format_into(&mut printer);
            printer.push("\n");
        }
        printer.finish()
    }
}

impl Statement {
    /// Renders a single statement in canonical form.
    #[must_use]
    pub fn to_format_string(&self) -> String {
        let mut printer = Printer::new(4);
        self.format_into(&mut printer);
        printer.finish()
    }

    pub(crate) fn format_into(&self, printer: &mut Printer) {
        match self {
            Self::ImportLibrary { name, alias, .. } => {
                printer.push("import ");
                printer.push(name);
                if let Some(alias) = alias {
                    printer.push(" as ");
                    printer.push(alias);
                }
                printer.push(";");
            },
            Self::VariableDeclaration { name, init, .. } => {
                printer.push("let ");
                printer.push(name);
                if let Some(init) = init {
                    printer.push(" = ");
                    init.format_into(printer);
                }
                printer.push(";");
            },
            Self::FunctionDeclaration { name, params, body, .. } => {
                printer.push("fun ");
                printer.push(name);
                printer.push(" (");
                format_list(params, printer);
                printer.push(") ");
                body.format_into(printer);
            },
            Self::ForLoop { variable, start, end, step, body, .. } => {
                printer.push("for (");
                printer.push(variable);
                printer.push(" from ");
                start.format_into(printer);
                printer.push(" to ");
                end.format_into(printer);
                if let Some(step) = step {
                    printer.push(" step ");
                    step.format_into(printer);
                }
                printer.push(") ");
                body.format_into(printer);
            },
            Self::WhileLoop { condition, body, .. } => {
                printer.push("while (");
                condition.format_into(printer);
                printer.push(") ");
                body.format_into(printer);
            },
            Self::IfElse { condition, main_clause, else_clause, .. } => {
                printer.push("if (");
                condition.format_into(printer);
                printer.push(") ");
                main_clause.format_into(printer);
                if let Some(else_clause) = else_clause {
                    printer.push(" else ");
                    else_clause.format_into(printer);
                }
            },
            Self::Continue { .. } => printer.push("continue;"),
            Self::Break { .. } => printer.push("break;"),
            Self::Return { expression, .. } => {
                printer.push("return");
                if let Some(expression) = expression {
                    printer.push(" ");
                    expression.format_into(printer);
                }
                printer.push(";");
            },
            Self::BareExpression { expression, .. } => {
                expression.format_into(printer);
                printer.push(";");
            },
            Self::Block { statements, .. } => {
                printer.push("{\n");
                printer.increase_tab_level();
                for statement in statements {
                    printer.pad();
                    statement.format_into(printer);
                    printer.push("\n");
                }
                printer.decrease_tab_level();
                printer.pad();
                printer.push("}");
            },
            Self::Echo { expression, .. } => {
                printer.push("echo ");
                expression.format_into(printer);
                printer.push(";");
            },
            Self::Illegal { .. } => printer.push("ERROR"),
        }
    }
}

impl Expression {
    /// Renders a single expression in canonical form.
    #[must_use]
    pub fn to_format_string(&self) -> String {
        let mut printer = Printer::new(4);
        self.format_into(&mut printer);
        printer.finish()
    }

    pub(crate) fn format_into(&self, printer: &mut Printer) {
        match self {
            Self::BinaryOperation { left, op, right, .. } => {
                let level = binary_level_of(op);
                format_operand(left, level, false, printer);
                printer.push(" ");
                printer.push(op);
                printer.push(" ");
                format_operand(right, level, true, printer);
            },
            Self::PrefixOperation { op, expression, .. } => {
                printer.push(op);
                if op.chars().all(char::is_alphabetic) {
                    printer.push(" ");
                }
                if matches!(expression.as_ref(), Self::BinaryOperation { .. }) {
                    printer.push("(");
                    expression.format_into(printer);
                    printer.push(")");
                } else {
                    expression.format_into(printer);
                }
            },
            Self::Call { target, arguments, .. } => {
                format_postfix_target(target, printer);
                printer.push("(");
                format_list(arguments, printer);
                printer.push(")");
            },
            Self::IndexAccess { target, index, .. } => {
                format_postfix_target(target, printer);
                printer.push("[");
                index.format_into(printer);
                printer.push("]");
            },
            Self::NumberLiteral { value, .. } => printer.push(&format!("{value}")),
            Self::BooleanLiteral { value, .. } => {
                printer.push(if *value { "true" } else { "false" });
            },
            Self::StringLiteral { value, .. } => printer.push(&quoted_string(value, '"')),
            Self::NilLiteral { .. } => printer.push("nil"),
            Self::ArrayLiteral { values, .. } => {
                printer.push("[");
                format_list(values, printer);
                printer.push("]");
            },
            Self::ObjectLiteral { entries, .. } => {
                printer.push("{");
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        printer.push(", ");
                    }
                    key.format_into(printer);
                    printer.push(": ");
                    value.format_into(printer);
                }
                printer.push("}");
            },
            Self::Variable { name, .. } => printer.push(name),
            Self::Lambda { params, body, .. } => {
                printer.push("lambda (");
                format_list(params, printer);
                printer.push(") ");
                body.format_into(printer);
            },
            Self::Illegal { .. } => printer.push("ERROR"),
        }
    }
}

fn format_list(expressions: &[Expression], printer: &mut Printer) {
    for (index, expression) in expressions.iter().enumerate() {
        if index > 0 {
            printer.push(", ");
        }
        expression.format_into(printer);
    }
}

/// Prints an operand of a binary operation, adding parentheses whenever the
/// operand would otherwise re-parse with a different grouping.
fn format_operand(
    operand: &Expression,
    parent_level: Option<usize>,
    right_side: bool,
    printer: &mut Printer,
) {
    let needs_parens = match (operand, parent_level) {
        (Expression::BinaryOperation { op, .. }, Some(parent)) => {
            match binary_level_of(op) {
                Some(child) if child < parent => true,
                Some(child) if child == parent => {
                    match BINARY_LEVELS[parent].associativity {
                        Associativity::Left => right_side,
                        Associativity::Right => !right_side,
                    }
                },
                _ => false,
            }
        },
        _ => false,
    };
    if needs_parens {
        printer.push("(");
        operand.format_into(printer);
        printer.push(")");
    } else {
        operand.format_into(printer);
    }
}

/// Prints the target of a call or index access, parenthesizing operator
/// expressions so the postfix form re-parses against the same target.
fn format_postfix_target(target: &Expression, printer: &mut Printer) {
    if matches!(
        target,
        Expression::BinaryOperation { .. } | Expression::PrefixOperation { .. }
    ) {
        printer.push("(");
        target.format_into(printer);
        printer.push(")");
    } else {
        target.format_into(printer);
    }
}
