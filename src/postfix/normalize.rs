use crate::constants::ConstantTable;
use crate::token::{format_tokens, Token, TokenKind};
use log::{debug, trace};

/// Replaces every constant with a number token holding its decimal value.
///
/// Constants unknown to `constants` are passed through untouched.
pub fn substitute_constants(tokens: &[Token], constants: &ConstantTable) -> Vec<Token> {
    tokens
        .iter()
        .map(|token| match token.kind() {
            TokenKind::Constant => match constants.lexeme(token.lexeme()) {
                Some(value) => {
                    trace!("Substituted constant {} = {}", token.lexeme(), value);
                    token.clone().into_number(value)
                }
                None => token.clone(),
            },
            _ => token.clone(),
        })
        .collect()
}

/// Rewrites each unary minus `-X` as `( 0 - X )`.
///
/// A minus is unary at the start of the sequence or after a token that cannot
/// end a value. Only a single bare operand (number, constant or identifier)
/// directly after the minus is wrapped; `-(...)` and `-f(...)` are left alone.
pub fn normalize_unary_minus(tokens: Vec<Token>) -> Vec<Token> {
    let mut normalized: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(token) = iter.next() {
        let is_unary = token.kind() == TokenKind::Subtract
            && !normalized
                .last()
                .is_some_and(|prev| prev.kind().ends_value());

        if is_unary {
            if let Some(operand) = iter.next_if(|next| next.kind().starts_operand()) {
                trace!("Wrapping unary minus before '{}'", operand.lexeme());
                normalized.push(Token::synthesized(TokenKind::OpenBracket, "("));
                normalized.push(Token::synthesized(TokenKind::Number, "0"));
                normalized.push(token);
                normalized.push(operand);
                normalized.push(Token::synthesized(TokenKind::CloseBracket, ")"));
                continue;
            }
        }
        normalized.push(token);
    }

    debug!("Normalized infix: {}", format_tokens(&normalized));
    normalized
}
