use crate::error::SyntaxError;
use crate::token::{format_tokens, Token, TokenKind};
use log::{debug, trace};

/// Converts infix tokens to postfix order with the shunting-yard algorithm.
///
/// All binary operators are left-associative, `^` included, so `2^3^2` reads
/// as `(2^3)^2`. A function behaves like a level-1 operator that never pops
/// another function, so chained calls such as `sin cos 0` apply innermost
/// first.
///
/// # Returns
///
/// * `Ok(Vec<Token>)` with the postfix sequence.
/// * `Err(Vec<SyntaxError>)` with every problem found during the pass; the
///   partial output is discarded.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, Vec<SyntaxError>> {
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = Vec::new();
    let mut errors = Vec::new();
    let mut open_brackets: isize = 0;

    for (index, token) in tokens.into_iter().enumerate() {
        trace!("[{}] postfix so far: {}", index, format_tokens(&output));

        match token.kind() {
            TokenKind::Number | TokenKind::Identifier | TokenKind::Constant => output.push(token),

            TokenKind::OpenBracket => {
                open_brackets += 1;
                operators.push(token);
            }

            TokenKind::CloseBracket => {
                open_brackets -= 1;
                loop {
                    match operators.pop() {
                        Some(top) if top.kind() == TokenKind::OpenBracket => break,
                        Some(top) => output.push(top),
                        None => {
                            errors.push(SyntaxError::UnmatchedCloseBracket);
                            break;
                        }
                    }
                }
            }

            TokenKind::Function => {
                let precedence = token.kind().precedence();
                while operators.last().is_some_and(|top| {
                    top.kind() != TokenKind::Function && top.kind().precedence() >= precedence
                }) {
                    pop_into(&mut operators, &mut output);
                }
                operators.push(token);
            }

            TokenKind::Add
            | TokenKind::Subtract
            | TokenKind::Multiply
            | TokenKind::Divide
            | TokenKind::Exponent => {
                let precedence = token.kind().precedence();
                while operators
                    .last()
                    .is_some_and(|top| top.kind().precedence() >= precedence)
                {
                    pop_into(&mut operators, &mut output);
                }
                operators.push(token);
            }

            TokenKind::Bad | TokenKind::None => {
                errors.push(SyntaxError::UnrecognizedToken {
                    position: token.position(),
                });
            }
        }
    }

    while !operators.is_empty() {
        pop_into(&mut operators, &mut output);
    }

    if open_brackets > 0 {
        errors.push(SyntaxError::UnclosedBrackets {
            count: open_brackets.unsigned_abs(),
        });
    }

    if !errors.is_empty() {
        debug!("Postfix conversion failed with {} error(s)", errors.len());
        return Err(errors);
    }

    debug!("Postfix expression: {}", format_tokens(&output));
    Ok(output)
}

fn pop_into(operators: &mut Vec<Token>, output: &mut Vec<Token>) {
    if let Some(top) = operators.pop() {
        output.push(top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ConstantTable;
    use crate::functions::FunctionTable;
    use crate::lexer::Lexer;
    use crate::postfix::normalize_unary_minus;

    fn postfix(expression: &str) -> Result<String, Vec<SyntaxError>> {
        let constants = ConstantTable::default();
        let functions = FunctionTable::default();
        let tokens = Lexer::new(&constants, &functions).lex(expression);
        to_postfix(normalize_unary_minus(tokens)).map(|tokens| format_tokens(&tokens))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(postfix("2+3*4").unwrap(), "2 3 4 * +");
        assert_eq!(postfix("2*3+4").unwrap(), "2 3 * 4 +");
        assert_eq!(postfix("2+3^2*4").unwrap(), "2 3 2 ^ 4 * +");
    }

    #[test]
    fn test_brackets_override_precedence() {
        assert_eq!(postfix("(2+3)*4").unwrap(), "2 3 + 4 *");
        assert_eq!(postfix("((1))").unwrap(), "1");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(postfix("8-4-2").unwrap(), "8 4 - 2 -");
        assert_eq!(postfix("8/4/2").unwrap(), "8 4 / 2 /");
        assert_eq!(postfix("2^3^2").unwrap(), "2 3 ^ 2 ^");
    }

    #[test]
    fn test_function_call() {
        assert_eq!(postfix("sqrt(16)").unwrap(), "16 sqrt");
        assert_eq!(postfix("sqrt(16)+1").unwrap(), "16 sqrt 1 +");
        assert_eq!(postfix("3*(sqrt(16))").unwrap(), "3 16 sqrt *");
    }

    #[test]
    fn test_chained_functions_apply_innermost_first() {
        assert_eq!(postfix("sin cos 0").unwrap(), "0 cos sin");
    }

    #[test]
    fn test_function_pops_pending_operator() {
        // The pending `*` leaves the stack before the function is pushed.
        assert_eq!(postfix("2*sqrt(16)").unwrap(), "2 * 16 sqrt");
    }

    #[test]
    fn test_unary_minus_conversion() {
        assert_eq!(postfix("-5+2").unwrap(), "0 5 - 2 +");
    }

    #[test]
    fn test_unclosed_brackets() {
        assert_eq!(
            postfix("((1+2)").unwrap_err(),
            vec![SyntaxError::UnclosedBrackets { count: 1 }]
        );
        assert_eq!(
            postfix("((1").unwrap_err(),
            vec![SyntaxError::UnclosedBrackets { count: 2 }]
        );
    }

    #[test]
    fn test_unmatched_close_bracket() {
        assert_eq!(
            postfix("1+2)").unwrap_err(),
            vec![SyntaxError::UnmatchedCloseBracket]
        );
    }

    #[test]
    fn test_bad_tokens_are_reported_with_position() {
        assert_eq!(
            postfix("1 + foo").unwrap_err(),
            vec![SyntaxError::UnrecognizedToken { position: 5 }]
        );
        assert_eq!(
            postfix("@ + #").unwrap_err(),
            vec![
                SyntaxError::UnrecognizedToken { position: 1 },
                SyntaxError::UnrecognizedToken { position: 5 },
            ]
        );
    }

    #[test]
    fn test_errors_accumulate_across_phases_of_the_pass() {
        let errors = postfix("(1 @ 2").unwrap_err();
        assert_eq!(
            errors,
            vec![
                SyntaxError::UnrecognizedToken { position: 4 },
                SyntaxError::UnclosedBrackets { count: 1 },
            ]
        );
    }
}
