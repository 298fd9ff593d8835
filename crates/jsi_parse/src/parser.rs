//! Token cursor and parser entry points.

use jsi_ir::{Name, Span, StringInterner};
use jsi_lexer::{Lexer, Token, TokenKind};

use crate::error::{ParseError, ParseResult};

pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    pub(crate) interner: &'a mut StringInterner,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(src: &str, interner: &'a mut StringInterner) -> (Self, Vec<jsi_lexer::LexError>) {
        let (tokens, lex_errors) = Lexer::new(src).tokenize();
        (
            Parser {
                tokens,
                pos: 0,
                interner,
            },
            lex_errors,
        )
    }

    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    pub(crate) fn current_span(&self) -> Span {
        self.current().span
    }

    pub(crate) fn peek_kind(&self, ahead: usize) -> &TokenKind {
        let idx = (self.pos + ahead).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    pub(crate) fn bump(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.current_kind() == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.current_kind() == kind {
            Ok(self.bump())
        } else {
            Err(ParseError::new(
                format!("expected {kind:?}, found {:?}", self.current_kind()),
                self.current_span(),
            ))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> ParseResult<(Name, Span)> {
        let span = self.current_span();
        match self.current_kind().clone() {
            TokenKind::Identifier(text) => {
                self.bump();
                Ok((self.interner.intern(&text), span))
            }
            other => Err(ParseError::new(
                format!("expected identifier, found {other:?}"),
                span,
            )),
        }
    }

    pub fn intern(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }
}
