pub mod cli;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod postfix;
pub mod token;

pub use constants::ConstantTable;
pub use error::{
    CalcError, Diagnostics, EvaluationError, FunctionError, LexError, LexErrorKind, SyntaxError,
};
pub use evaluator::{
    evaluate_postfix, exact_from_float, Calculator, EvaluationResult, DIVISION_PRECISION,
};
pub use functions::FunctionTable;
pub use lexer::{count_lex_errors, format_lex_errors};
pub use bigdecimal::BigDecimal;
pub use token::{format_tokens, Token, TokenKind};

use std::sync::OnceLock;

static DEFAULT_CALCULATOR: OnceLock<Calculator> = OnceLock::new();

/// The process-wide calculator with the builtin tables.
pub fn default_calculator() -> &'static Calculator {
    DEFAULT_CALCULATOR.get_or_init(Calculator::new)
}

/// Evaluates an arithmetic expression with the builtin constants and functions.
///
/// # Arguments
///
/// * `expression` - The infix expression, e.g. `"2 + 3 * sqrt(16)"`.
///
/// # Returns
///
/// * `Ok(BigDecimal)` with the exact value.
/// * `Err(Diagnostics)` with every lex, syntax or evaluation error found.
pub fn evaluate(expression: &str) -> EvaluationResult {
    default_calculator().evaluate(expression)
}

/// Lexes an expression against the builtin tables.
pub fn lex(expression: &str) -> Vec<Token> {
    default_calculator().lex(expression)
}
