use crate::error::LexError;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Bad,
    None,
    Identifier,
    Constant,
    Number,
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponent,
    OpenBracket,
    CloseBracket,
    Function,
}

impl TokenKind {
    /// Binding strength used by the postfix converter. Larger binds tighter.
    ///
    /// Functions share the additive level.
    pub fn precedence(&self) -> u8 {
        match self {
            TokenKind::Add | TokenKind::Subtract | TokenKind::Function => 1,
            TokenKind::Multiply | TokenKind::Divide => 2,
            TokenKind::Exponent => 3,
            TokenKind::OpenBracket
            | TokenKind::CloseBracket
            | TokenKind::None
            | TokenKind::Bad
            | TokenKind::Identifier
            | TokenKind::Constant
            | TokenKind::Number => 0,
        }
    }

    /// Whether a token of this kind can end a value, i.e. a following `-` is binary.
    pub fn ends_value(&self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::Constant | TokenKind::Identifier | TokenKind::CloseBracket
        )
    }

    /// Whether a token of this kind is a bare operand a unary `-` can bind to.
    pub fn starts_operand(&self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::Constant | TokenKind::Identifier
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Bad => "Bad",
            TokenKind::None => "None",
            TokenKind::Identifier => "Identifier",
            TokenKind::Constant => "Const",
            TokenKind::Number => "Number",
            TokenKind::Add => "Addition",
            TokenKind::Subtract => "Subtraction",
            TokenKind::Multiply => "Multiplication",
            TokenKind::Divide => "Division",
            TokenKind::Exponent => "Exponent",
            TokenKind::OpenBracket => "Open bracket",
            TokenKind::CloseBracket => "Close bracket",
            TokenKind::Function => "Function",
        };
        f.write_str(name)
    }
}

/// A classified slice of the input expression.
///
/// `offset` is the zero-based character index of the first character in the
/// source, or `None` for tokens synthesized by the pipeline. `error` is set
/// exactly when `kind` is [`TokenKind::Bad`]. Outside the crate tokens only
/// come from the lexer and the pipeline stages, which keep that pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    offset: Option<usize>,
    error: Option<LexError>,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        debug_assert!(kind != TokenKind::Bad, "bad tokens are built with Token::bad");
        Self {
            kind,
            lexeme: lexeme.into(),
            offset: Some(offset),
            error: None,
        }
    }

    pub(crate) fn bad(lexeme: impl Into<String>, error: LexError) -> Self {
        Self {
            kind: TokenKind::Bad,
            lexeme: lexeme.into(),
            offset: Some(error.offset),
            error: Some(error),
        }
    }

    /// A token that did not come from the source text.
    pub(crate) fn synthesized(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        debug_assert!(kind != TokenKind::Bad, "bad tokens are built with Token::bad");
        Self {
            kind,
            lexeme: lexeme.into(),
            offset: None,
            error: None,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    pub fn is_bad(&self) -> bool {
        self.kind == TokenKind::Bad
    }

    /// One-based source position for user-facing messages; `0` for synthesized tokens.
    pub fn position(&self) -> usize {
        self.offset.map_or(0, |offset| offset + 1)
    }

    /// Rebuilds this token as a number with the given lexeme, keeping its offset.
    pub(crate) fn into_number(self, lexeme: String) -> Self {
        Self {
            kind: TokenKind::Number,
            lexeme,
            offset: self.offset,
            error: None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}

/// Renders tokens space-separated, e.g. `2 3 4 * +` for a postfix sequence.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.lexeme())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexErrorKind;

    #[test]
    fn test_precedence_levels() {
        assert_eq!(TokenKind::Add.precedence(), 1);
        assert_eq!(TokenKind::Subtract.precedence(), 1);
        assert_eq!(TokenKind::Function.precedence(), 1);
        assert_eq!(TokenKind::Multiply.precedence(), 2);
        assert_eq!(TokenKind::Divide.precedence(), 2);
        assert_eq!(TokenKind::Exponent.precedence(), 3);
        assert_eq!(TokenKind::OpenBracket.precedence(), 0);
        assert_eq!(TokenKind::None.precedence(), 0);
    }

    #[test]
    fn test_bad_token_carries_error() {
        let error = LexError::new(LexErrorKind::UnknownChar('@'), 4);
        let token = Token::bad("@", error.clone());
        assert!(token.is_bad());
        assert_eq!(token.error(), Some(&error));
        assert_eq!(token.offset(), Some(4));
        assert_eq!(token.position(), 5);
    }

    #[test]
    fn test_synthesized_token_has_no_offset() {
        let token = Token::synthesized(TokenKind::Number, "0");
        assert_eq!(token.offset(), None);
        assert_eq!(token.position(), 0);
        assert!(token.error().is_none());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::Constant.to_string(), "Const");
        assert_eq!(TokenKind::OpenBracket.to_string(), "Open bracket");
        assert_eq!(TokenKind::Multiply.to_string(), "Multiplication");
    }

    #[test]
    fn test_format_tokens() {
        let tokens = vec![
            Token::new(TokenKind::Number, "2", 0),
            Token::new(TokenKind::Number, "3", 2),
            Token::new(TokenKind::Add, "+", 1),
        ];
        assert_eq!(format_tokens(&tokens), "2 3 +");
    }
}
