//! Statement grammar.

use jsi_ir::{Stmt, StmtKind, SwitchCase};
use jsi_lexer::{Keyword, TokenKind};

use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;

impl Parser<'_> {
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        match self.current_kind().clone() {
            TokenKind::Semi => {
                self.bump();
                Ok(Stmt {
                    kind: StmtKind::Empty,
                    span: start,
                })
            }
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Keyword(Keyword::Var) => self.parse_var_decl(),
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::While) => self.parse_while(),
            TokenKind::Keyword(Keyword::Do) => self.parse_do_while(),
            TokenKind::Keyword(Keyword::For) => self.parse_for(),
            TokenKind::Keyword(Keyword::Return) => self.parse_return(),
            TokenKind::Keyword(Keyword::Break) => self.parse_break(),
            TokenKind::Keyword(Keyword::Continue) => self.parse_continue(),
            TokenKind::Keyword(Keyword::Throw) => self.parse_throw(),
            TokenKind::Keyword(Keyword::Try) => self.parse_try(),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch(),
            TokenKind::Keyword(Keyword::Function) => {
                let func = self.parse_function(true)?;
                let span = start.merge(func.span);
                Ok(Stmt {
                    kind: StmtKind::FunctionDecl(Box::new(func)),
                    span,
                })
            }
            TokenKind::Identifier(_) if matches!(self.peek_kind(1), TokenKind::Colon) => {
                self.parse_labeled()
            }
            _ => self.parse_expr_stmt(),
        }
    }

    pub(crate) fn parse_block_stmts(&mut self) -> ParseResult<Vec<Stmt>> {
        self.expect(&TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !matches!(self.current_kind(), TokenKind::RBrace) && !self.at_eof() {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(stmts)
    }

    fn parse_block(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        let stmts = self.parse_block_stmts()?;
        let end = stmts.last().map_or(start, |s| s.span);
        Ok(Stmt {
            kind: StmtKind::Block(stmts),
            span: start.merge(end),
        })
    }

    fn parse_var_decl(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump(); // `var`
        let mut decls = Vec::new();
        loop {
            let (name, _) = self.expect_identifier()?;
            let init = if self.eat(&TokenKind::Assign) {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            decls.push((name, init));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let end = self.expect_semi(start)?;
        Ok(Stmt {
            kind: StmtKind::VarDecl(decls),
            span: start.merge(end),
        })
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump();
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let consequent = Box::new(self.parse_stmt()?);
        let alternate = if self.eat(&TokenKind::Keyword(Keyword::Else)) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        let end = alternate.as_ref().map_or(consequent.span, |s| s.span);
        Ok(Stmt {
            kind: StmtKind::If {
                test,
                consequent,
                alternate,
            },
            span: start.merge(end),
        })
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump();
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let body = Box::new(self.parse_stmt()?);
        let span = start.merge(body.span);
        Ok(Stmt {
            kind: StmtKind::While { test, body },
            span,
        })
    }

    fn parse_do_while(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump();
        let body = Box::new(self.parse_stmt()?);
        self.expect(&TokenKind::Keyword(Keyword::While))?;
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let end = self.expect_semi(start)?;
        Ok(Stmt {
            kind: StmtKind::DoWhile { body, test },
            span: start.merge(end),
        })
    }

    /// `for (init; test; update)` or `for (var? x in obj)`, disambiguated
    /// by scanning past the init clause for an `in` keyword.
    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump();
        self.expect(&TokenKind::LParen)?;

        let declares = self.eat(&TokenKind::Keyword(Keyword::Var));

        if matches!(self.current_kind(), TokenKind::Identifier(_))
            && matches!(self.peek_kind(1), TokenKind::Keyword(Keyword::In))
        {
            let (binding, _) = self.expect_identifier()?;
            self.bump(); // `in`
            let object = self.parse_expr()?;
            self.expect(&TokenKind::RParen)?;
            let body = Box::new(self.parse_stmt()?);
            let span = start.merge(body.span);
            return Ok(Stmt {
                kind: StmtKind::ForIn {
                    declares,
                    binding,
                    object,
                    body,
                },
                span,
            });
        }

        let init = if matches!(self.current_kind(), TokenKind::Semi) {
            None
        } else if declares {
            let mut decls = Vec::new();
            loop {
                let (name, _) = self.expect_identifier()?;
                let value = if self.eat(&TokenKind::Assign) {
                    Some(self.parse_assignment()?)
                } else {
                    None
                };
                decls.push((name, value));
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            Some(Box::new(StmtKind::VarDecl(decls)))
        } else {
            let expr = self.parse_expr()?;
            Some(Box::new(StmtKind::Expr(expr)))
        };
        self.expect(&TokenKind::Semi)?;

        let test = if matches!(self.current_kind(), TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semi)?;

        let update = if matches!(self.current_kind(), TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::RParen)?;

        let body = Box::new(self.parse_stmt()?);
        let span = start.merge(body.span);
        Ok(Stmt {
            kind: StmtKind::For {
                init,
                test,
                update,
                body,
            },
            span,
        })
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump();
        let value = if matches!(self.current_kind(), TokenKind::Semi | TokenKind::RBrace) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let end = self.expect_semi(start)?;
        Ok(Stmt {
            kind: StmtKind::Return(value),
            span: start.merge(end),
        })
    }

    fn parse_break(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump();
        let label = if matches!(self.current_kind(), TokenKind::Identifier(_)) {
            Some(self.expect_identifier()?.0)
        } else {
            None
        };
        let end = self.expect_semi(start)?;
        Ok(Stmt {
            kind: StmtKind::Break(label),
            span: start.merge(end),
        })
    }

    fn parse_continue(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump();
        let label = if matches!(self.current_kind(), TokenKind::Identifier(_)) {
            Some(self.expect_identifier()?.0)
        } else {
            None
        };
        let end = self.expect_semi(start)?;
        Ok(Stmt {
            kind: StmtKind::Continue(label),
            span: start.merge(end),
        })
    }

    fn parse_throw(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump();
        let value = self.parse_expr()?;
        let end = self.expect_semi(start)?;
        Ok(Stmt {
            kind: StmtKind::Throw(value),
            span: start.merge(end),
        })
    }

    fn parse_try(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump();
        let block = self.parse_block_stmts()?;

        let catch = if self.eat(&TokenKind::Keyword(Keyword::Catch)) {
            let param = if self.eat(&TokenKind::LParen) {
                let (name, _) = self.expect_identifier()?;
                self.expect(&TokenKind::RParen)?;
                Some(name)
            } else {
                None
            };
            let body = self.parse_block_stmts()?;
            Some((param, body))
        } else {
            None
        };

        let finally = if self.eat(&TokenKind::Keyword(Keyword::Finally)) {
            Some(self.parse_block_stmts()?)
        } else {
            None
        };

        if catch.is_none() && finally.is_none() {
            return Err(ParseError::new(
                "try block must have a catch or finally clause",
                start,
            ));
        }

        Ok(Stmt {
            kind: StmtKind::Try {
                block,
                catch,
                finally,
            },
            span: start,
        })
    }

    /// `switch (discriminant) { case k: ...; default: ...; }` (spec 4.4):
    /// each arm's body runs until the next `case`/`default`/closing brace,
    /// with fall-through left to the evaluator (`break` is just an ordinary
    /// statement here, same as inside a loop body).
    fn parse_switch(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        self.bump(); // `switch`
        self.expect(&TokenKind::LParen)?;
        let discriminant = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        self.expect(&TokenKind::LBrace)?;

        let mut cases = Vec::new();
        let mut seen_default = false;
        while !matches!(self.current_kind(), TokenKind::RBrace) && !self.at_eof() {
            let test = if self.eat(&TokenKind::Keyword(Keyword::Case)) {
                let test = self.parse_expr()?;
                Some(test)
            } else if self.eat(&TokenKind::Keyword(Keyword::Default)) {
                if seen_default {
                    return Err(ParseError::new(
                        "switch statement may have at most one default case",
                        self.current_span(),
                    ));
                }
                seen_default = true;
                None
            } else {
                return Err(ParseError::new(
                    format!("expected 'case' or 'default', found {:?}", self.current_kind()),
                    self.current_span(),
                ));
            };
            self.expect(&TokenKind::Colon)?;

            let mut body = Vec::new();
            while !matches!(
                self.current_kind(),
                TokenKind::RBrace | TokenKind::Keyword(Keyword::Case) | TokenKind::Keyword(Keyword::Default)
            ) && !self.at_eof()
            {
                body.push(self.parse_stmt()?);
            }
            cases.push(SwitchCase { test, body });
        }
        let end = self.expect(&TokenKind::RBrace)?.span;

        Ok(Stmt {
            kind: StmtKind::Switch { discriminant, cases },
            span: start.merge(end),
        })
    }

    fn parse_labeled(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        let (label, _) = self.expect_identifier()?;
        self.expect(&TokenKind::Colon)?;
        let body = Box::new(self.parse_stmt()?);
        let span = start.merge(body.span);
        Ok(Stmt {
            kind: StmtKind::Labeled { label, body },
            span,
        })
    }

    fn parse_expr_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.current_span();
        let expr = self.parse_expr()?;
        let end = self.expect_semi(start)?;
        Ok(Stmt {
            kind: StmtKind::Expr(expr),
            span: start.merge(end),
        })
    }

    /// Statements are explicitly terminated; no automatic semicolon
    /// insertion. A trailing `}` or end of input also closes a statement
    /// so the last statement in a block need not carry one.
    fn expect_semi(&mut self, start: jsi_ir::Span) -> ParseResult<jsi_ir::Span> {
        if self.eat(&TokenKind::Semi) {
            return Ok(self.current_span());
        }
        if matches!(self.current_kind(), TokenKind::RBrace) || self.at_eof() {
            return Ok(start);
        }
        Err(ParseError::new(
            format!("expected ';', found {:?}", self.current_kind()),
            self.current_span(),
        ))
    }
}
