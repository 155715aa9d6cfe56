#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
///
/// Parse errors are structural: they always abort the parse attempt that
/// raised them, carry the byte offset of the offending input, and are never
/// recovered internally. Whether to re-prompt or abort is the caller's call.
pub enum ParseError {
    /// Found a character outside the language's character set.
    UnexpectedCharacter {
        /// The offending input text.
        found:  String,
        /// Byte offset in the source text.
        offset: usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// The token encountered.
        token:  String,
        /// Byte offset in the source text.
        offset: usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// Byte offset in the source text.
        offset: usize,
    },
    /// A specific token was expected but something else was found.
    ExpectedToken {
        /// Description of the expected token.
        expected: &'static str,
        /// The token actually found.
        found:    String,
        /// Byte offset in the source text.
        offset:   usize,
    },
    /// Found extra tokens after a complete expression.
    TrailingTokens {
        /// The first extra token.
        token:  String,
        /// Byte offset in the source text.
        offset: usize,
    },
    /// The expand marker `*` was used on an argument that is not last.
    MisplacedExpand {
        /// Byte offset in the source text.
        offset: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { found, offset } => {
                write!(f, "Syntax error at offset {offset}: unexpected character '{found}'.")
            },

            Self::UnexpectedToken { token, offset } => {
                write!(f, "Syntax error at offset {offset}: unexpected token '{token}'.")
            },

            Self::UnexpectedEndOfInput { offset } => {
                write!(f, "Syntax error at offset {offset}: unexpected end of expression.")
            },

            Self::ExpectedToken { expected, found, offset } => write!(f,
                "Syntax error at offset {offset}: expected {expected}, found '{found}'."),

            Self::TrailingTokens { token, offset } => write!(f,
                "Syntax error at offset {offset}: unexpected token '{token}' after end of expression."),

            Self::MisplacedExpand { offset } => write!(f,
                "Syntax error at offset {offset}: an expand argument must be the last argument."),
        }
    }
}

impl std::error::Error for ParseError {}
