//! Turns an expression string into a flat sequence of [`Token`]s.
//!
//! Lexing never fails as a whole: characters that cannot start a token and
//! identifiers missing from both tables become [`TokenKind::Bad`] tokens that
//! keep their place in the sequence, so every problem in the input can be
//! reported at once.

use crate::constants::ConstantTable;
use crate::error::{LexError, LexErrorKind};
use crate::functions::FunctionTable;
use crate::token::{Token, TokenKind};
use log::{debug, trace};

pub struct Lexer<'a> {
    constants: &'a ConstantTable,
    functions: &'a FunctionTable,
}

impl<'a> Lexer<'a> {
    pub fn new(constants: &'a ConstantTable, functions: &'a FunctionTable) -> Self {
        Self {
            constants,
            functions,
        }
    }

    pub fn lex(&self, expression: &str) -> Vec<Token> {
        debug!("Lexing expression: {}", expression);
        let chars: Vec<char> = expression.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c.is_whitespace() {
                i += 1;
                continue;
            }

            let (token, consumed) = if c.is_ascii_digit() || c == '.' {
                Self::read_number(&chars[i..], i)
            } else if c.is_alphabetic() || c == '_' {
                self.read_identifier(&chars[i..], i)
            } else {
                (Self::read_symbol(c, i), 1)
            };

            trace!("[{}] {} '{}'", i, token.kind(), token.lexeme());
            tokens.push(token);
            i += consumed;
        }

        debug!("Lexed {} token(s)", tokens.len());
        tokens
    }

    /// Reads the maximal run of digits and points starting at `chars[0]`.
    ///
    /// A run with several points is one bad token, so `1.2.3.4` reports a
    /// single error rather than one per extra point.
    fn read_number(chars: &[char], offset: usize) -> (Token, usize) {
        let len = chars
            .iter()
            .take_while(|c| c.is_ascii_digit() || **c == '.')
            .count();
        let run: String = chars[..len].iter().collect();

        if run.matches('.').count() > 1 {
            let error = LexError::new(LexErrorKind::MultipleDecimalPoints, offset);
            return (Token::bad(run, error), len);
        }
        (Token::new(TokenKind::Number, run, offset), len)
    }

    fn read_identifier(&self, chars: &[char], offset: usize) -> (Token, usize) {
        let len = chars
            .iter()
            .take_while(|c| c.is_alphanumeric() || **c == '_')
            .count();
        let name: String = chars[..len].iter().collect();

        let token = if self.constants.contains(&name) {
            Token::new(TokenKind::Constant, name, offset)
        } else if self.functions.contains(&name) {
            Token::new(TokenKind::Function, name, offset)
        } else {
            let error = LexError::new(LexErrorKind::UnknownIdentifier(name.clone()), offset);
            Token::bad(name, error)
        };
        (token, len)
    }

    fn read_symbol(c: char, offset: usize) -> Token {
        let kind = match c {
            '+' => TokenKind::Add,
            '-' => TokenKind::Subtract,
            '*' => TokenKind::Multiply,
            '/' => TokenKind::Divide,
            '^' => TokenKind::Exponent,
            '(' => TokenKind::OpenBracket,
            ')' => TokenKind::CloseBracket,
            _ => {
                let error = LexError::new(LexErrorKind::UnknownChar(c), offset);
                return Token::bad(c.to_string(), error);
            }
        };
        Token::new(kind, c.to_string(), offset)
    }
}

pub fn count_lex_errors(tokens: &[Token]) -> usize {
    tokens.iter().filter(|token| token.is_bad()).count()
}

/// Renders every bad token as `char N. message.` with a one-based position.
pub fn format_lex_errors(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter_map(|token| token.error())
        .map(|error| format!("char {}. {}.", error.offset + 1, error))
        .collect()
}
