use crate::constants::ConstantTable;
use crate::error::{CalcError, Diagnostics, EvaluationError, FunctionError};
use crate::functions::FunctionTable;
use crate::lexer::{count_lex_errors, Lexer};
use crate::postfix::{normalize_unary_minus, substitute_constants, to_postfix};
use crate::token::{Token, TokenKind};
use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive, Zero};
use log::{debug, trace};
use rayon::prelude::*;
use std::num::NonZeroU64;
use std::str::FromStr;

/// Either the exact value of an expression or every error that prevented it.
pub type EvaluationResult = Result<BigDecimal, Diagnostics>;

/// Significant digits kept by division, with ties rounded to even.
pub const DIVISION_PRECISION: u64 = 28;

/// Walks a postfix sequence with an operand stack of exact decimals.
///
/// Stops at the first failing token. Leftover operands after the walk are
/// reported as well, so a failed walk can yield more than one error.
pub fn evaluate_postfix(
    tokens: &[Token],
    functions: &FunctionTable,
) -> Result<BigDecimal, Vec<EvaluationError>> {
    PostfixEvaluator::new(functions).run(tokens)
}

struct PostfixEvaluator<'a> {
    functions: &'a FunctionTable,
    stack: Vec<BigDecimal>,
}

impl<'a> PostfixEvaluator<'a> {
    fn new(functions: &'a FunctionTable) -> Self {
        Self {
            functions,
            stack: Vec::new(),
        }
    }

    fn run(mut self, tokens: &[Token]) -> Result<BigDecimal, Vec<EvaluationError>> {
        let mut errors = Vec::new();

        for token in tokens {
            if let Err(error) = self.apply(token) {
                debug!("Evaluation stopped at '{}': {}", token.lexeme(), error);
                errors.push(error);
                break;
            }
        }

        if self.stack.len() > 1 {
            debug!("Operands left on stack: {:?}", self.stack);
            errors.push(EvaluationError::TooFewOperators {
                count: self.stack.len(),
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        self.stack
            .pop()
            .ok_or_else(|| vec![EvaluationError::EmptyExpression])
    }

    fn apply(&mut self, token: &Token) -> Result<(), EvaluationError> {
        let position = token.position();

        match token.kind() {
            TokenKind::Number => {
                let value =
                    parse_decimal(token.lexeme()).ok_or_else(|| EvaluationError::InvalidNumber {
                        position,
                        lexeme: token.lexeme().to_string(),
                    })?;
                self.stack.push(value);
            }

            TokenKind::Function => {
                let operand = self.pop_value()?;
                let value = self.call_function(token, &operand)?;
                self.stack.push(value);
            }

            TokenKind::Add
            | TokenKind::Subtract
            | TokenKind::Multiply
            | TokenKind::Divide
            | TokenKind::Exponent => {
                let right = self.pop_value()?;
                let left = self.pop_value()?;
                let value = binary_op(token.kind(), &left, &right, position)?;
                trace!("{} {} {} = {}", left, token.lexeme(), right, value);
                self.stack.push(value);
            }

            TokenKind::Identifier
            | TokenKind::Constant
            | TokenKind::OpenBracket
            | TokenKind::CloseBracket
            | TokenKind::Bad
            | TokenKind::None => {
                return Err(EvaluationError::UnexpectedToken {
                    position,
                    lexeme: token.lexeme().to_string(),
                });
            }
        }

        Ok(())
    }

    fn call_function(
        &self,
        token: &Token,
        operand: &BigDecimal,
    ) -> Result<BigDecimal, EvaluationError> {
        let position = token.position();
        let function =
            self.functions
                .get(token.lexeme())
                .ok_or_else(|| EvaluationError::UnknownFunction {
                    position,
                    name: token.lexeme().to_string(),
                })?;

        let input = to_float(operand, position)?;
        let output = function(input).map_err(|error| match error {
            FunctionError::Domain => EvaluationError::FunctionDomain { position },
            FunctionError::Failure(message) => EvaluationError::FunctionFailure { position, message },
        })?;
        trace!("{}({}) = {}", token.lexeme(), input, output);

        exact_from_float(output).ok_or(EvaluationError::FunctionDomain { position })
    }

    fn pop_value(&mut self) -> Result<BigDecimal, EvaluationError> {
        self.stack.pop().ok_or(EvaluationError::TooManyOperators)
    }
}

fn binary_op(
    kind: TokenKind,
    left: &BigDecimal,
    right: &BigDecimal,
    position: usize,
) -> Result<BigDecimal, EvaluationError> {
    match kind {
        TokenKind::Add => Ok(left + right),
        TokenKind::Subtract => Ok(left - right),
        TokenKind::Multiply => Ok(left * right),
        TokenKind::Divide => {
            if right.is_zero() {
                return Err(EvaluationError::DivisionByZero { position });
            }
            Ok(divide(left, right))
        }
        TokenKind::Exponent => power(left, right, position),
        _ => Err(EvaluationError::UnexpectedToken {
            position,
            lexeme: kind.to_string(),
        }),
    }
}

/// Quotient rounded to [`DIVISION_PRECISION`] significant digits. Quotients
/// that already fit are returned as computed.
fn divide(left: &BigDecimal, right: &BigDecimal) -> BigDecimal {
    let quotient = left / right;
    match NonZeroU64::new(DIVISION_PRECISION) {
        Some(precision) if quotient.digits() > DIVISION_PRECISION => {
            quotient.with_precision_round(precision, RoundingMode::HalfEven)
        }
        _ => quotient,
    }
}

/// `base ^ exponent` through binary floating point, converted back to a decimal.
fn power(
    base: &BigDecimal,
    exponent: &BigDecimal,
    position: usize,
) -> Result<BigDecimal, EvaluationError> {
    let failure = |message: &str| EvaluationError::ExponentFailure {
        position,
        base: base.to_string(),
        exponent: exponent.to_string(),
        message: message.to_string(),
    };

    let b = to_float(base, position)?;
    let e = to_float(exponent, position)?;
    if b == 0.0 && e < 0.0 {
        return Err(failure("math domain error"));
    }

    let result = b.powf(e);
    if result.is_nan() {
        return Err(failure("math domain error"));
    }
    exact_from_float(result).ok_or_else(|| failure("math range error"))
}

fn to_float(value: &BigDecimal, position: usize) -> Result<f64, EvaluationError> {
    value
        .to_f64()
        .filter(|float| float.is_finite())
        .ok_or_else(|| EvaluationError::Arithmetic {
            position,
            message: format!("cannot convert {value} to floating point"),
        })
}

/// The exact decimal value of a finite float: every binary digit is kept, so
/// `0.1` becomes `0.1000000000000000055511151231257827021181583404541015625`.
///
/// Returns `None` for NaN and the infinities.
pub fn exact_from_float(value: f64) -> Option<BigDecimal> {
    if !value.is_finite() {
        return None;
    }

    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mut mantissa, mut exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    if mantissa == 0 {
        return Some(BigDecimal::zero());
    }

    let trailing = mantissa.trailing_zeros();
    mantissa >>= trailing;
    exponent += i64::from(trailing);

    let mut digits = BigInt::from(mantissa);
    let scale = if exponent >= 0 {
        digits <<= exponent as usize;
        0
    } else {
        // m * 2^-k == m * 5^k / 10^k
        digits *= BigInt::from(5u8).pow(exponent.unsigned_abs() as u32);
        -exponent
    };
    if negative {
        digits = -digits;
    }
    Some(BigDecimal::new(digits, scale))
}

/// Parses a number lexeme, accepting a bare leading or trailing point (`.5`, `5.`).
fn parse_decimal(lexeme: &str) -> Option<BigDecimal> {
    let trimmed = lexeme.strip_suffix('.').unwrap_or(lexeme);
    if trimmed.starts_with('.') {
        BigDecimal::from_str(&format!("0{trimmed}")).ok()
    } else {
        BigDecimal::from_str(trimmed).ok()
    }
}

/// Owns the constant and function tables and runs the full pipeline.
///
/// A `Calculator` is immutable once built and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    constants: ConstantTable,
    functions: FunctionTable,
}

impl Calculator {
    /// A calculator with the builtin constants and functions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(constants: ConstantTable, functions: FunctionTable) -> Self {
        Self {
            constants,
            functions,
        }
    }

    pub fn constants(&self) -> &ConstantTable {
        &self.constants
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    pub fn lex(&self, expression: &str) -> Vec<Token> {
        Lexer::new(&self.constants, &self.functions).lex(expression)
    }

    /// Lexes and evaluates `expression`.
    ///
    /// Lex errors are reported on their own; conversion and evaluation are
    /// only attempted for input that lexes cleanly.
    pub fn evaluate(&self, expression: &str) -> EvaluationResult {
        let tokens = self.lex(expression);
        if count_lex_errors(&tokens) > 0 {
            let errors = tokens
                .iter()
                .filter_map(Token::error)
                .cloned()
                .map(CalcError::from)
                .collect();
            return Err(into_diagnostics(errors));
        }
        self.evaluate_tokens(&tokens)
    }

    /// Evaluates an already lexed token sequence.
    pub fn evaluate_tokens(&self, tokens: &[Token]) -> EvaluationResult {
        let postfix = self.compile_tokens(tokens)?;
        evaluate_postfix(&postfix, &self.functions).map_err(|errors| {
            into_diagnostics(errors.into_iter().map(CalcError::from).collect())
        })
    }

    /// Runs constant substitution, unary-minus normalization and postfix
    /// conversion, returning the postfix sequence.
    pub fn compile_tokens(&self, tokens: &[Token]) -> Result<Vec<Token>, Diagnostics> {
        let substituted = substitute_constants(tokens, &self.constants);
        let normalized = normalize_unary_minus(substituted);
        to_postfix(normalized).map_err(|errors| {
            into_diagnostics(errors.into_iter().map(CalcError::from).collect())
        })
    }

    /// Evaluates independent expressions in parallel. Results keep input order.
    pub fn evaluate_batch<S>(&self, expressions: &[S]) -> Vec<EvaluationResult>
    where
        S: AsRef<str> + Sync,
    {
        debug!("Evaluating batch of {} expression(s)", expressions.len());
        expressions
            .par_iter()
            .map(|expression| self.evaluate(expression.as_ref()))
            .collect()
    }
}

fn into_diagnostics(errors: Vec<CalcError>) -> Diagnostics {
    Diagnostics::new(errors).unwrap_or_else(|| EvaluationError::EmptyExpression.into())
}

impl From<EvaluationError> for Diagnostics {
    fn from(error: EvaluationError) -> Self {
        CalcError::from(error).into()
    }
}
