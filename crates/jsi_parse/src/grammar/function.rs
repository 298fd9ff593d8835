//! Function declarations and expressions, including the method-shorthand
//! form used inside object literals (`name(params) { body }`).

use jsi_ir::{Function, Name};
use jsi_lexer::{Keyword, TokenKind};

use crate::error::ParseResult;
use crate::parser::Parser;

impl Parser<'_> {
    /// Parses `function name(params) { body }` or `function(params) { body }`.
    /// `require_name` is true for statement-position declarations; function
    /// expressions may be anonymous.
    pub(crate) fn parse_function(&mut self, require_name: bool) -> ParseResult<Function> {
        let start = self.current_span();
        self.expect(&TokenKind::Keyword(Keyword::Function))?;

        let name = if matches!(self.current_kind(), TokenKind::Identifier(_)) {
            Some(self.expect_identifier()?.0)
        } else {
            None
        };
        if require_name && name.is_none() {
            return Err(crate::error::ParseError::new(
                "function declaration requires a name",
                start,
            ));
        }

        let mut func = self.parse_function_tail(name)?;
        func.span = start.merge(func.span);
        Ok(func)
    }

    /// Parses the `(params) { body }` portion after a name (or method key)
    /// has already been consumed.
    pub(crate) fn parse_function_tail(&mut self, name: Option<Name>) -> ParseResult<Function> {
        let start = self.current_span();
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !matches!(self.current_kind(), TokenKind::RParen) {
            loop {
                let (param, _) = self.expect_identifier()?;
                params.push(param);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;

        let body = self.parse_block_stmts()?;
        let end = body.last().map_or(start, |s| s.span);
        Ok(Function {
            name,
            params,
            body,
            span: start.merge(end),
        })
    }
}
