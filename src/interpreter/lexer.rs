use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in an expression.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Word operators and boolean literals are matched case-insensitively and
/// also accept their localized spellings (`ET`, `OU`, `NON`, `VRAI`,
/// `FAUX`).
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    /// Imaginary number literal tokens, such as `3i` or `2.5i`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?i", parse_imaginary, priority = 4)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?i", parse_imaginary, priority = 4)]
    #[regex(r"[0-9]+([eE][+-]?[0-9]+)?i", parse_imaginary, priority = 4)]
    Imaginary(f64),
    /// Real number literal tokens, such as `42`, `3.5`, `.5` or `2e-10`.
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", parse_number, priority = 3)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number, priority = 3)]
    #[regex(r"[0-9]+([eE][+-]?[0-9]+)?", parse_number, priority = 3)]
    Number(f64),
    /// String literal tokens, single- or double-quoted.
    #[regex(r#""[^"]*""#, parse_string)]
    #[regex(r"'[^']*'", parse_string)]
    Str(String),
    /// Boolean literal tokens (`TRUE`/`VRAI`, `FALSE`/`FAUX`),
    /// matched case-insensitively.
    #[regex(r"true|vrai", |_| true, priority = 4, ignore(ascii_case))]
    #[regex(r"false|faux", |_| false, priority = 4, ignore(ascii_case))]
    Bool(bool),
    /// `AND` / `ET`
    #[regex(r"and|et", priority = 4, ignore(ascii_case))]
    And,
    /// `OR` / `OU`
    #[regex(r"or|ou", priority = 4, ignore(ascii_case))]
    Or,
    /// `XOR`
    #[token("xor", priority = 4, ignore(ascii_case))]
    Xor,
    /// `NOT` / `NON`
    #[regex(r"not|non", priority = 4, ignore(ascii_case))]
    Not,
    /// Identifier tokens; variable or function names such as `x` or `gcd`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 2)]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<>`
    #[token("<>")]
    NotEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
}

/// Parses a real number literal from the current token slice.
fn parse_number(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an imaginary number literal from the current token slice.
/// The trailing `i` is stripped; a bare coefficient of `1` is implied by the
/// constant `i` instead, so every imaginary literal here carries digits.
fn parse_imaginary(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    let slice = lex.slice();
    slice[..slice.len() - 1].parse().ok()
}

/// Strips the surrounding quotes from a string literal token.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Imaginary(n) => write!(f, "{n}i"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Bool(true) => write!(f, "TRUE"),
            Self::Bool(false) => write!(f, "FALSE"),
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
            Self::Xor => write!(f, "XOR"),
            Self::Not => write!(f, "NOT"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::LessEqual => write!(f, "<="),
            Self::GreaterEqual => write!(f, ">="),
            Self::NotEqual => write!(f, "<>"),
            Self::Equal => write!(f, "="),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Comma => write!(f, ","),
        }
    }
}

/// Tokenizes a single expression string into `(token, offset)` pairs.
///
/// This is a pure function of its input and never blocks. Whitespace is
/// skipped; every produced token carries the byte offset where it starts.
///
/// # Errors
/// Returns `ParseError::UnexpectedCharacter` for any input outside the
/// recognized character set. The caller decides whether to abort or report.
///
/// # Example
/// ```
/// use algoscript::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("1 + x").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Number(1.0), 0),
///                 (Token::Plus, 2),
///                 (Token::Identifier("x".to_string()), 4)]);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut lexer = Token::lexer(text);
    let mut tokens = Vec::new();

    while let Some(item) = lexer.next() {
        let offset = lexer.span().start;
        match item {
            Ok(token) => tokens.push((token, offset)),
            Err(()) => {
                return Err(ParseError::UnexpectedCharacter { found: lexer.slice().to_string(),
                                                             offset });
            },
        }
    }

    Ok(tokens)
}
