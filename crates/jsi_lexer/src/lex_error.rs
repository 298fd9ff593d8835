//! Lexer error accumulator.
//!
//! Errors are pushed into a `Vec` rather than aborting the scan, matching
//! the teacher's `cook_escape` convention of accumulating per-escape
//! diagnostics so a caller sees every bad escape in a string at once
//! instead of only the first.

use jsi_ir::Span;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LexErrorKind {
    InvalidStringEscape { escape_char: char },
    UnterminatedString,
    UnterminatedRegex,
    UnterminatedBlockComment,
    InvalidNumber,
    InvalidUnicodeEscape,
    UnexpectedByte { byte: u8 },
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[must_use]
    pub fn invalid_string_escape(span: Span, escape_char: char) -> Self {
        LexError {
            kind: LexErrorKind::InvalidStringEscape { escape_char },
            span,
        }
    }

    #[must_use]
    pub fn unterminated_string(span: Span) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedString,
            span,
        }
    }

    #[must_use]
    pub fn unterminated_regex(span: Span) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedRegex,
            span,
        }
    }

    #[must_use]
    pub fn unterminated_block_comment(span: Span) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedBlockComment,
            span,
        }
    }

    #[must_use]
    pub fn invalid_number(span: Span) -> Self {
        LexError {
            kind: LexErrorKind::InvalidNumber,
            span,
        }
    }

    #[must_use]
    pub fn invalid_unicode_escape(span: Span) -> Self {
        LexError {
            kind: LexErrorKind::InvalidUnicodeEscape,
            span,
        }
    }

    #[must_use]
    pub fn unexpected_byte(span: Span, byte: u8) -> Self {
        LexError {
            kind: LexErrorKind::UnexpectedByte { byte },
            span,
        }
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            LexErrorKind::InvalidStringEscape { escape_char } => {
                write!(f, "invalid escape '\\{escape_char}' at {:?}", self.span)
            }
            LexErrorKind::UnterminatedString => write!(f, "unterminated string at {:?}", self.span),
            LexErrorKind::UnterminatedRegex => write!(f, "unterminated regex at {:?}", self.span),
            LexErrorKind::UnterminatedBlockComment => {
                write!(f, "unterminated block comment at {:?}", self.span)
            }
            LexErrorKind::InvalidNumber => write!(f, "invalid numeric literal at {:?}", self.span),
            LexErrorKind::InvalidUnicodeEscape => {
                write!(f, "invalid unicode escape at {:?}", self.span)
            }
            LexErrorKind::UnexpectedByte { byte } => {
                write!(f, "unexpected byte 0x{byte:02x} at {:?}", self.span)
            }
        }
    }
}

impl std::error::Error for LexError {}
