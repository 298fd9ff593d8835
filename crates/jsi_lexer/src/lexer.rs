//! Byte-at-a-time scanner producing a flat token stream.
//!
//! The regex-vs-division ambiguity (spec 4.1) is resolved with a single
//! running flag, `operand_expected`: true right after an operator, `(`,
//! `,`, keyword, or at the start of the source; false right after an
//! identifier, number, string, `)`, `]`, or postfix `++`/`--`. A `/` seen
//! while `operand_expected` is true opens a regex literal; otherwise it is
//! the division operator (or `/=`). This is the same kind of "what governs
//! the next token" inspection the teacher's `what_is_next` performs for
//! diagnostics, repurposed here as a parse-time disambiguator rather than
//! an error-message classifier.

use crate::cook_escape::unescape_string;
use crate::lex_error::LexError;
use crate::token::{Keyword, Token, TokenKind};
use jsi_ir::Span;

pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: u32,
    operand_expected: bool,
    pub errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Lexer {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            operand_expected: true,
            errors: Vec::new(),
        }
    }

    /// Tokenize the whole source, collecting lex errors into `self.errors`.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        (tokens, self.errors)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos as usize).copied()
    }

    fn peek_at(&self, offset: u32) -> Option<u8> {
        self.bytes.get((self.pos + offset) as usize).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_trivia(&mut self) -> bool {
        let mut saw_newline = false;
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r') => {
                    self.pos += 1;
                }
                Some(b'\n') => {
                    saw_newline = true;
                    self.pos += 1;
                }
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match self.peek() {
                            None => {
                                self.errors
                                    .push(LexError::unterminated_block_comment(Span::new(
                                        start, self.pos,
                                    )));
                                break;
                            }
                            Some(b'*') if self.peek_at(1) == Some(b'/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(b'\n') => {
                                saw_newline = true;
                                self.pos += 1;
                            }
                            _ => self.pos += 1,
                        }
                    }
                }
                _ => break,
            }
        }
        saw_newline
    }

    fn next_token(&mut self) -> Token {
        let preceded_by_newline = self.skip_trivia();
        let start = self.pos;
        let Some(byte) = self.peek() else {
            return Token {
                kind: TokenKind::Eof,
                span: Span::new(start, start),
                preceded_by_newline,
            };
        };

        let kind = match byte {
            b'0'..=b'9' => self.scan_number(),
            b'.' if matches!(self.peek_at(1), Some(b'0'..=b'9')) => self.scan_number(),
            b'"' | b'\'' => self.scan_string(byte),
            b'/' if self.operand_expected => self.scan_regex(),
            _ if is_ident_start(byte) || byte >= 0x80 => self.scan_identifier_or_keyword(),
            _ => self.scan_punct(),
        };

        self.operand_expected = kind.expects_operand_next();
        Token {
            kind,
            span: Span::new(start, self.pos),
            preceded_by_newline,
        }
    }

    fn scan_identifier_or_keyword(&mut self) -> TokenKind {
        let start = self.pos as usize;
        while let Some(b) = self.peek() {
            if is_ident_continue(b) || b >= 0x80 {
                // advance a full UTF-8 char if non-ASCII
                if b >= 0x80 {
                    let rest = &self.src[self.pos as usize..];
                    if let Some(ch) = rest.chars().next() {
                        self.pos += ch.len_utf8() as u32;
                        continue;
                    }
                }
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = &self.src[start..self.pos as usize];
        match Keyword::from_str(text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Identifier(text.into()),
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        let start = self.pos as usize;
        if self.peek() == Some(b'0') {
            match self.peek_at(1) {
                Some(b'x' | b'X') => {
                    self.pos += 2;
                    while matches!(self.peek(), Some(b) if b.is_ascii_hexdigit()) {
                        self.pos += 1;
                    }
                    let text = &self.src[start + 2..self.pos as usize];
                    return match u64::from_str_radix(text, 16) {
                        Ok(v) => TokenKind::Number(v as f64),
                        Err(_) => {
                            self.errors
                                .push(LexError::invalid_number(Span::new(start as u32, self.pos)));
                            TokenKind::Number(f64::NAN)
                        }
                    };
                }
                Some(b'o' | b'O') => {
                    self.pos += 2;
                    while matches!(self.peek(), Some(b'0'..=b'7')) {
                        self.pos += 1;
                    }
                    let text = &self.src[start + 2..self.pos as usize];
                    return match u64::from_str_radix(text, 8) {
                        Ok(v) => TokenKind::Number(v as f64),
                        Err(_) => {
                            self.errors
                                .push(LexError::invalid_number(Span::new(start as u32, self.pos)));
                            TokenKind::Number(f64::NAN)
                        }
                    };
                }
                Some(b'b' | b'B') => {
                    self.pos += 2;
                    while matches!(self.peek(), Some(b'0' | b'1')) {
                        self.pos += 1;
                    }
                    let text = &self.src[start + 2..self.pos as usize];
                    return match u64::from_str_radix(text, 2) {
                        Ok(v) => TokenKind::Number(v as f64),
                        Err(_) => {
                            self.errors
                                .push(LexError::invalid_number(Span::new(start as u32, self.pos)));
                            TokenKind::Number(f64::NAN)
                        }
                    };
                }
                _ => {}
            }
        }

        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let save = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if matches!(self.peek(), Some(b'0'..=b'9')) {
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            } else {
                self.pos = save;
            }
        }

        let text = &self.src[start..self.pos as usize];
        match text.parse::<f64>() {
            Ok(v) => TokenKind::Number(v),
            Err(_) => {
                self.errors
                    .push(LexError::invalid_number(Span::new(start as u32, self.pos)));
                TokenKind::Number(f64::NAN)
            }
        }
    }

    fn scan_string(&mut self, quote: u8) -> TokenKind {
        let open = self.pos;
        self.pos += 1;
        let content_start = self.pos as usize;
        loop {
            match self.peek() {
                None => {
                    self.errors
                        .push(LexError::unterminated_string(Span::new(open, self.pos)));
                    break;
                }
                Some(b) if b == quote => break,
                Some(b'\\') => {
                    self.pos += 1;
                    if self.peek().is_some() {
                        // skip whatever follows the backslash without
                        // interpreting it yet (cook_escape does that pass)
                        let rest = &self.src[self.pos as usize..];
                        if let Some(ch) = rest.chars().next() {
                            self.pos += ch.len_utf8() as u32;
                        }
                    }
                }
                Some(_) => {
                    let rest = &self.src[self.pos as usize..];
                    let ch = rest.chars().next().unwrap_or('\0');
                    self.pos += ch.len_utf8() as u32;
                }
            }
        }
        let content_end = self.pos as usize;
        let content = &self.src[content_start..content_end.min(self.src.len())];
        if self.peek() == Some(quote) {
            self.pos += 1;
        }
        let cooked = unescape_string(content, content_start as u32, &mut self.errors)
            .unwrap_or_else(|| content.to_owned());
        TokenKind::String(cooked.into())
    }

    fn scan_regex(&mut self) -> TokenKind {
        let open = self.pos;
        self.pos += 1;
        let pattern_start = self.pos as usize;
        let mut in_class = false;
        loop {
            match self.peek() {
                None => {
                    self.errors
                        .push(LexError::unterminated_regex(Span::new(open, self.pos)));
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    if self.peek().is_some() {
                        self.pos += 1;
                    }
                }
                Some(b'[') => {
                    in_class = true;
                    self.pos += 1;
                }
                Some(b']') => {
                    in_class = false;
                    self.pos += 1;
                }
                Some(b'/') if !in_class => {
                    break;
                }
                Some(b'\n') => {
                    self.errors
                        .push(LexError::unterminated_regex(Span::new(open, self.pos)));
                    break;
                }
                Some(_) => self.pos += 1,
            }
        }
        let pattern_end = self.pos as usize;
        let pattern = &self.src[pattern_start..pattern_end.min(self.src.len())];
        if self.peek() == Some(b'/') {
            self.pos += 1;
        }
        let flags_start = self.pos as usize;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        let flags = &self.src[flags_start..self.pos as usize];
        TokenKind::Regex {
            pattern: pattern.into(),
            flags: flags.into(),
        }
    }

    fn scan_punct(&mut self) -> TokenKind {
        macro_rules! two {
            ($a:expr, $b:expr, $then:expr, $else_:expr) => {{
                self.pos += 1;
                if self.peek() == Some($b) {
                    self.pos += 1;
                    $then
                } else {
                    $else_
                }
            }};
        }

        let b = self.bump().expect("scan_punct called at EOF");
        match b {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b';' => TokenKind::Semi,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'~' => TokenKind::Tilde,
            b'.' => TokenKind::Dot,
            b'?' => {
                if self.peek() == Some(b'.') {
                    self.pos += 1;
                    TokenKind::OptionalDot
                } else if self.peek() == Some(b'?') {
                    self.pos += 1;
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        TokenKind::QuestionQuestionAssign
                    } else {
                        TokenKind::QuestionQuestion
                    }
                } else {
                    TokenKind::Question
                }
            }
            b'+' => {
                if self.peek() == Some(b'+') {
                    self.pos += 1;
                    TokenKind::PlusPlus
                } else if self.peek() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::PlusAssign
                } else {
                    TokenKind::Plus
                }
            }
            b'-' => {
                if self.peek() == Some(b'-') {
                    self.pos += 1;
                    TokenKind::MinusMinus
                } else if self.peek() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::MinusAssign
                } else {
                    TokenKind::Minus
                }
            }
            b'*' => {
                if self.peek() == Some(b'*') {
                    self.pos += 1;
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        TokenKind::StarStarAssign
                    } else {
                        TokenKind::StarStar
                    }
                } else if self.peek() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::StarAssign
                } else {
                    TokenKind::Star
                }
            }
            b'/' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::SlashAssign
                } else {
                    TokenKind::Slash
                }
            }
            b'%' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::PercentAssign
                } else {
                    TokenKind::Percent
                }
            }
            b'=' => {
                if self.peek() == Some(b'=') && self.peek_at(1) == Some(b'=') {
                    self.pos += 2;
                    TokenKind::EqEqEq
                } else if self.peek() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Eq
                } else if self.peek() == Some(b'>') {
                    self.pos += 1;
                    TokenKind::Arrow
                } else {
                    TokenKind::Assign
                }
            }
            b'!' => {
                if self.peek() == Some(b'=') && self.peek_at(1) == Some(b'=') {
                    self.pos += 2;
                    TokenKind::NotEqEq
                } else if self.peek() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            b'<' => {
                if self.peek() == Some(b'<') {
                    self.pos += 1;
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        TokenKind::ShlAssign
                    } else {
                        TokenKind::Shl
                    }
                } else if self.peek() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            b'>' => {
                if self.peek() == Some(b'>') && self.peek_at(1) == Some(b'>') {
                    self.pos += 2;
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        TokenKind::UShrAssign
                    } else {
                        TokenKind::UShr
                    }
                } else if self.peek() == Some(b'>') {
                    self.pos += 1;
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        TokenKind::ShrAssign
                    } else {
                        TokenKind::Shr
                    }
                } else if self.peek() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            b'&' => {
                two!(b'&', b'&', {
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        TokenKind::AndAndAssign
                    } else {
                        TokenKind::AndAnd
                    }
                }, {
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        TokenKind::AmpAssign
                    } else {
                        TokenKind::Amp
                    }
                })
            }
            b'|' => {
                two!(b'|', b'|', {
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        TokenKind::OrOrAssign
                    } else {
                        TokenKind::OrOr
                    }
                }, {
                    if self.peek() == Some(b'=') {
                        self.pos += 1;
                        TokenKind::PipeAssign
                    } else {
                        TokenKind::Pipe
                    }
                })
            }
            b'^' => {
                if self.peek() == Some(b'=') {
                    self.pos += 1;
                    TokenKind::CaretAssign
                } else {
                    TokenKind::Caret
                }
            }
            other => {
                self.errors.push(LexError::unexpected_byte(
                    Span::new(self.pos - 1, self.pos),
                    other,
                ));
                TokenKind::Eof
            }
        }
    }
}

impl TokenKind {
    /// Whether, after this token, a `/` should open a regex literal
    /// rather than mean division (spec 4.1's disambiguation rule).
    fn expects_operand_next(&self) -> bool {
        !matches!(
            self,
            TokenKind::Identifier(_)
                | TokenKind::Number(_)
                | TokenKind::String(_)
                | TokenKind::Regex { .. }
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
                | TokenKind::Keyword(Keyword::True)
                | TokenKind::Keyword(Keyword::False)
                | TokenKind::Keyword(Keyword::Null)
                | TokenKind::Keyword(Keyword::Undefined)
                | TokenKind::Keyword(Keyword::This)
        )
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, errors) = Lexer::new(src).tokenize();
        assert!(errors.is_empty(), "unexpected lex errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn division_after_identifier() {
        let k = kinds("a/b");
        assert_eq!(
            k,
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Slash,
                TokenKind::Identifier("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn regex_after_assign() {
        let k = kinds("var r=/a(b+)/g;");
        assert!(matches!(
            k[3],
            TokenKind::Regex { .. }
        ));
    }

    #[test]
    fn regex_after_return() {
        let k = kinds("return/x/;");
        assert!(matches!(k[1], TokenKind::Regex { .. }));
    }

    #[test]
    fn triple_equals_vs_double() {
        let k = kinds("a===b!==c");
        assert_eq!(
            k,
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::EqEqEq,
                TokenKind::Identifier("b".into()),
                TokenKind::NotEqEq,
                TokenKind::Identifier("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn hex_number() {
        let k = kinds("0x1F");
        assert_eq!(k[0], TokenKind::Number(31.0));
    }

    #[test]
    fn unsigned_shift() {
        let k = kinds("a>>>b");
        assert_eq!(k[1], TokenKind::UShr);
    }

    #[test]
    fn string_with_escapes() {
        let k = kinds(r#""a\nb""#);
        assert_eq!(k[0], TokenKind::String("a\nb".into()));
    }

    #[test]
    fn block_comment_is_skipped() {
        let k = kinds("a/* comment */+b");
        assert_eq!(
            k,
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Plus,
                TokenKind::Identifier("b".into()),
                TokenKind::Eof,
            ]
        );
    }
}
