use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("Unknown char {}", render_char(.0))]
    UnknownChar(char),
    #[error("Unknown constant or function '{0}'")]
    UnknownIdentifier(String),
    #[error("Number cannot have more than one decimal point")]
    MultipleDecimalPoints,
}

fn render_char(c: &char) -> String {
    if is_printable(*c) {
        format!("'{c}'")
    } else {
        format!("{}", *c as u32)
    }
}

/// Whether `c` shows up as a glyph: controls, separators other than the
/// plain space, format characters and private-use code points do not.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    !(c.is_control() || c.is_whitespace() || is_format(c) || is_private_use(c))
}

fn is_format(c: char) -> bool {
    matches!(
        c,
        '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{6dd}'
            | '\u{70f}'
            | '\u{890}'..='\u{891}'
            | '\u{8e2}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{110bd}'
            | '\u{110cd}'
            | '\u{13430}'..='\u{1343f}'
            | '\u{1bca0}'..='\u{1bca3}'
            | '\u{1d173}'..='\u{1d17a}'
            | '\u{e0001}'
            | '\u{e0020}'..='\u{e007f}'
    )
}

fn is_private_use(c: char) -> bool {
    matches!(
        c,
        '\u{e000}'..='\u{f8ff}' | '\u{f0000}'..='\u{ffffd}' | '\u{100000}'..='\u{10fffd}'
    )
}

/// A lexical failure localized to one zero-based character offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// Failure reported by a unary function from the function table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error("math domain error")]
    Domain,
    #[error("{0}")]
    Failure(String),
}

/// Failures raised while converting infix tokens to postfix order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Unmatched brackets, no matching '(' found")]
    UnmatchedCloseBracket,
    #[error("Bracket mismatch. {count} bracket(s) have no matching ')'")]
    UnclosedBrackets { count: usize },
    #[error("[{position}] Token list contains unknown or bad token type")]
    UnrecognizedToken { position: usize },
}

/// Failures raised while walking the postfix sequence.
///
/// `position` fields are one-based source positions (0 for synthesized tokens).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("Too many operators for the number of operands")]
    TooManyOperators,
    #[error("Too few operators for the number of operands, {count} specifically")]
    TooFewOperators { count: usize },
    #[error("[{position}] Division by zero")]
    DivisionByZero { position: usize },
    #[error("[{position}] Function failure, math domain error")]
    FunctionDomain { position: usize },
    #[error("[{position}] Function failure, {message}")]
    FunctionFailure { position: usize, message: String },
    #[error("[{position}] expression: '{base}^({exponent})' failed, {message}")]
    ExponentFailure {
        position: usize,
        base: String,
        exponent: String,
        message: String,
    },
    #[error("[{position}] Arithmetic failure, {message}")]
    Arithmetic { position: usize, message: String },
    #[error("[{position}] Invalid number '{lexeme}'")]
    InvalidNumber { position: usize, lexeme: String },
    #[error("[{position}] Unknown function '{name}'")]
    UnknownFunction { position: usize, name: String },
    #[error("[{position}] Unexpected token '{lexeme}' in postfix sequence")]
    UnexpectedToken { position: usize, lexeme: String },
    #[error("Expression has no value")]
    EmptyExpression,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}

/// The non-empty, ordered list of errors produced by a failed evaluation.
///
/// Displays one error per line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_lines(.errors))]
pub struct Diagnostics {
    errors: Vec<CalcError>,
}

impl Diagnostics {
    /// Returns `None` when `errors` is empty, so a `Diagnostics` always holds something.
    pub fn new(errors: Vec<CalcError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn errors(&self) -> &[CalcError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_lex_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|error| matches!(error, CalcError::Lex(_)))
    }
}

fn join_lines(errors: &[CalcError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

impl From<CalcError> for Diagnostics {
    fn from(error: CalcError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = CalcError;
    type IntoIter = std::vec::IntoIter<CalcError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_char_rendering() {
        let printable = LexError::new(LexErrorKind::UnknownChar('@'), 0);
        assert_eq!(printable.to_string(), "Unknown char '@'");

        let control = LexError::new(LexErrorKind::UnknownChar('\u{7}'), 0);
        assert_eq!(control.to_string(), "Unknown char 7");

        let zero_width = LexError::new(LexErrorKind::UnknownChar('\u{200b}'), 0);
        assert_eq!(zero_width.to_string(), "Unknown char 8203");

        let byte_order_mark = LexError::new(LexErrorKind::UnknownChar('\u{feff}'), 0);
        assert_eq!(byte_order_mark.to_string(), "Unknown char 65279");

        let line_separator = LexError::new(LexErrorKind::UnknownChar('\u{2028}'), 0);
        assert_eq!(line_separator.to_string(), "Unknown char 8232");

        let private = LexError::new(LexErrorKind::UnknownChar('\u{e000}'), 0);
        assert_eq!(private.to_string(), "Unknown char 57344");

        let currency = LexError::new(LexErrorKind::UnknownChar('€'), 0);
        assert_eq!(currency.to_string(), "Unknown char '€'");
    }

    #[test]
    fn test_unknown_identifier_names_lexeme() {
        let error = LexError::new(LexErrorKind::UnknownIdentifier("foo".to_string()), 2);
        assert_eq!(error.to_string(), "Unknown constant or function 'foo'");
    }

    #[test]
    fn test_diagnostics_never_empty() {
        assert!(Diagnostics::new(Vec::new()).is_none());

        let diagnostics = Diagnostics::new(vec![
            EvaluationError::DivisionByZero { position: 3 }.into(),
            EvaluationError::TooFewOperators { count: 2 }.into(),
        ])
        .unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(
            diagnostics.messages(),
            vec![
                "[3] Division by zero".to_string(),
                "Too few operators for the number of operands, 2 specifically".to_string(),
            ]
        );
        assert!(!diagnostics.has_lex_errors());
        assert_eq!(
            diagnostics.to_string(),
            "[3] Division by zero\nToo few operators for the number of operands, 2 specifically"
        );
        let as_error: &dyn std::error::Error = &diagnostics;
        assert!(as_error.source().is_none());
    }

    #[test]
    fn test_exponent_failure_message() {
        let error = EvaluationError::ExponentFailure {
            position: 3,
            base: "-8".to_string(),
            exponent: "0.5".to_string(),
            message: "math domain error".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "[3] expression: '-8^(0.5)' failed, math domain error"
        );
    }
}
