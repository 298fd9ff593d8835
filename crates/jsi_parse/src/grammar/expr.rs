//! Expression grammar: assignment (loosest) down through primary
//! (tightest), precedence-climbing one level per method the way the
//! teacher's grammar/expr module is organized.

use jsi_ir::{Expr, ExprKind, Fixity, MemberKey, ObjectProp, PropertyKey, UnaryOp};
use jsi_lexer::{Keyword, TokenKind};

use crate::error::ParseResult;
use crate::parser::Parser;

impl Parser<'_> {
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_sequence()
    }

    /// Comma operator: `a, b, c`. Not used inside call-argument lists or
    /// array/object literals, where commas are separators handled by
    /// those productions directly.
    fn parse_sequence(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();
        let first = self.parse_assignment()?;
        if !matches!(self.current_kind(), TokenKind::Comma) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_assignment()?);
        }
        let end = items.last().map_or(start, |e| e.span);
        Ok(Expr {
            kind: ExprKind::Sequence(items),
            span: start.merge(end),
        })
    }

    pub(crate) fn parse_assignment(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();
        let target = self.parse_conditional()?;

        if let Some(op) = self.match_assign_op() {
            self.bump();
            let value = self.parse_assignment()?;
            let span = start.merge(value.span);
            return Ok(Expr {
                kind: ExprKind::Assign {
                    op,
                    target: Box::new(target),
                    value: Box::new(value),
                },
                span,
            });
        }
        Ok(target)
    }

    fn parse_conditional(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();
        let test = self.parse_nullish()?;
        if !self.eat(&TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.parse_assignment()?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assignment()?;
        let span = start.merge(alternate.span);
        Ok(Expr {
            kind: ExprKind::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
            span,
        })
    }

    fn parse_nullish(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_logical_or, Self::match_nullish_op)
    }

    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_logical_and, Self::match_logical_or_op)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_bit_or, Self::match_logical_and_op)
    }

    fn parse_bit_or(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_bit_xor, Self::match_bit_or_op)
    }

    fn parse_bit_xor(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_bit_and, Self::match_bit_xor_op)
    }

    fn parse_bit_and(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_equality, Self::match_bit_and_op)
    }

    fn parse_equality(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_relational, Self::match_equality_op)
    }

    fn parse_relational(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_shift, Self::match_relational_op)
    }

    fn parse_shift(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_additive, Self::match_shift_op)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_multiplicative, Self::match_additive_op)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        self.parse_binary_level(Self::parse_exponent, Self::match_multiplicative_op)
    }

    /// `**` is right-associative, unlike every level above it.
    fn parse_exponent(&mut self) -> ParseResult<Expr> {
        let base = self.parse_unary()?;
        if self.match_pow_op().is_none() {
            return Ok(base);
        }
        self.bump();
        let exponent = self.parse_exponent()?;
        let span = base.span.merge(exponent.span);
        Ok(Expr {
            kind: ExprKind::Binary {
                op: jsi_ir::BinaryOp::Pow,
                left: Box::new(base),
                right: Box::new(exponent),
            },
            span,
        })
    }

    /// Left-associative binary level: parse one `next` then fold in
    /// zero or more `(op, next)` pairs.
    fn parse_binary_level(
        &mut self,
        next: fn(&mut Self) -> ParseResult<Expr>,
        match_op: fn(&Self) -> Option<jsi_ir::BinaryOp>,
    ) -> ParseResult<Expr> {
        let mut left = next(self)?;
        while let Some(op) = match_op(self) {
            self.bump();
            let right = next(self)?;
            let span = left.span.merge(right.span);
            left = Expr {
                kind: ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let start = self.current_span();
        let op = match self.current_kind() {
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Minus => Some(UnaryOp::Minus),
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Keyword(Keyword::Typeof) => Some(UnaryOp::Typeof),
            TokenKind::Keyword(Keyword::Void) => Some(UnaryOp::Void),
            _ => None,
        };
        if let Some(op) = op {
            self.bump();
            let expr = self.parse_unary()?;
            let span = start.merge(expr.span);
            return Ok(Expr {
                kind: ExprKind::Unary {
                    op,
                    expr: Box::new(expr),
                },
                span,
            });
        }
        if matches!(self.current_kind(), TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let op = if matches!(self.current_kind(), TokenKind::PlusPlus) {
                UnaryOp::Inc
            } else {
                UnaryOp::Dec
            };
            self.bump();
            let target = self.parse_unary()?;
            let span = start.merge(target.span);
            return Ok(Expr {
                kind: ExprKind::Update {
                    op,
                    fixity: Fixity::Prefix,
                    target: Box::new(target),
                },
                span,
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_call_or_member()?;
        if matches!(self.current_kind(), TokenKind::PlusPlus | TokenKind::MinusMinus) {
            let op = if matches!(self.current_kind(), TokenKind::PlusPlus) {
                UnaryOp::Inc
            } else {
                UnaryOp::Dec
            };
            let end = self.current_span();
            self.bump();
            let span = expr.span.merge(end);
            expr = Expr {
                kind: ExprKind::Update {
                    op,
                    fixity: Fixity::Postfix,
                    target: Box::new(expr),
                },
                span,
            };
        }
        Ok(expr)
    }

    fn parse_call_or_member(&mut self) -> ParseResult<Expr> {
        let is_new = self.eat(&TokenKind::Keyword(Keyword::New));
        let start = self.current_span();
        let mut expr = self.parse_primary()?;

        if is_new {
            let args = if matches!(self.current_kind(), TokenKind::LParen) {
                self.parse_args()?
            } else {
                Vec::new()
            };
            let span = start.merge(expr.span);
            expr = Expr {
                kind: ExprKind::New {
                    callee: Box::new(expr),
                    args,
                },
                span,
            };
        }

        loop {
            match self.current_kind() {
                TokenKind::Dot => {
                    self.bump();
                    let (name, name_span) = self.expect_identifier()?;
                    let span = expr.span.merge(name_span);
                    expr = Expr {
                        kind: ExprKind::Member {
                            object: Box::new(expr),
                            property: MemberKey::Static(name),
                            optional: false,
                        },
                        span,
                    };
                }
                TokenKind::OptionalDot => {
                    self.bump();
                    if matches!(self.current_kind(), TokenKind::LParen) {
                        let args = self.parse_args()?;
                        let span = expr.span;
                        expr = Expr {
                            kind: ExprKind::Call {
                                callee: Box::new(expr),
                                args,
                                optional: true,
                            },
                            span,
                        };
                        continue;
                    }
                    let (name, name_span) = self.expect_identifier()?;
                    let span = expr.span.merge(name_span);
                    expr = Expr {
                        kind: ExprKind::Member {
                            object: Box::new(expr),
                            property: MemberKey::Static(name),
                            optional: true,
                        },
                        span,
                    };
                }
                TokenKind::LBracket => {
                    self.bump();
                    let index = self.parse_expr()?;
                    let end = self.expect(&TokenKind::RBracket)?.span;
                    let span = expr.span.merge(end);
                    expr = Expr {
                        kind: ExprKind::Member {
                            object: Box::new(expr),
                            property: MemberKey::Computed(Box::new(index)),
                            optional: false,
                        },
                        span,
                    };
                }
                TokenKind::LParen => {
                    let args = self.parse_args()?;
                    let span = expr.span;
                    expr = Expr {
                        kind: ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                            optional: false,
                        },
                        span,
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_args(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !matches!(self.current_kind(), TokenKind::RParen) {
            loop {
                args.push(self.parse_assignment()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let span = self.current_span();
        match self.current_kind().clone() {
            TokenKind::Number(n) => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Number(n),
                    span,
                })
            }
            TokenKind::String(s) => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Str(s),
                    span,
                })
            }
            TokenKind::Regex { pattern, flags } => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Regex { pattern, flags },
                    span,
                })
            }
            TokenKind::Keyword(Keyword::True) => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Bool(true),
                    span,
                })
            }
            TokenKind::Keyword(Keyword::False) => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Bool(false),
                    span,
                })
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Null,
                    span,
                })
            }
            TokenKind::Keyword(Keyword::Undefined) => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::Undefined,
                    span,
                })
            }
            TokenKind::Keyword(Keyword::This) => {
                self.bump();
                Ok(Expr {
                    kind: ExprKind::This,
                    span,
                })
            }
            TokenKind::Keyword(Keyword::Function) => {
                let func = self.parse_function(false)?;
                let span = span.merge(func.span);
                Ok(Expr {
                    kind: ExprKind::Function(Box::new(func)),
                    span,
                })
            }
            TokenKind::Identifier(text) => {
                self.bump();
                let name = self.interner.intern(&text);
                Ok(Expr {
                    kind: ExprKind::Identifier(name),
                    span,
                })
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            other => Err(crate::error::ParseError::new(
                format!("unexpected token {other:?} in expression position"),
                span,
            )),
        }
    }

    fn parse_array_literal(&mut self) -> ParseResult<Expr> {
        let start = self.expect(&TokenKind::LBracket)?.span;
        let mut elements = Vec::new();
        while !matches!(self.current_kind(), TokenKind::RBracket) {
            if matches!(self.current_kind(), TokenKind::Comma) {
                // elision: `[1, , 3]` leaves a hole
                elements.push(None);
                self.bump();
                continue;
            }
            elements.push(Some(self.parse_assignment()?));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let end = self.expect(&TokenKind::RBracket)?.span;
        Ok(Expr {
            kind: ExprKind::Array(elements),
            span: start.merge(end),
        })
    }

    fn parse_object_literal(&mut self) -> ParseResult<Expr> {
        let start = self.expect(&TokenKind::LBrace)?.span;
        let mut props = Vec::new();
        while !matches!(self.current_kind(), TokenKind::RBrace) {
            props.push(self.parse_object_prop()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        let end = self.expect(&TokenKind::RBrace)?.span;
        Ok(Expr {
            kind: ExprKind::Object(props),
            span: start.merge(end),
        })
    }

    fn parse_property_key(&mut self) -> ParseResult<PropertyKey> {
        match self.current_kind().clone() {
            TokenKind::Identifier(text) => {
                self.bump();
                Ok(PropertyKey::Ident(self.interner.intern(&text)))
            }
            TokenKind::Keyword(kw) => {
                // keywords are valid (unquoted) object keys
                let text = keyword_text(kw);
                self.bump();
                Ok(PropertyKey::Ident(self.interner.intern(text)))
            }
            TokenKind::String(s) => {
                self.bump();
                Ok(PropertyKey::Str(s))
            }
            TokenKind::Number(n) => {
                self.bump();
                Ok(PropertyKey::Number(n))
            }
            TokenKind::LBracket => {
                self.bump();
                let expr = self.parse_assignment()?;
                self.expect(&TokenKind::RBracket)?;
                Ok(PropertyKey::Computed(Box::new(expr)))
            }
            other => Err(crate::error::ParseError::new(
                format!("expected property key, found {other:?}"),
                self.current_span(),
            )),
        }
    }

    fn parse_object_prop(&mut self) -> ParseResult<ObjectProp> {
        // method shorthand: `name(params) { body }`
        if matches!(self.peek_kind(1), TokenKind::LParen)
            && matches!(
                self.current_kind(),
                TokenKind::Identifier(_) | TokenKind::String(_) | TokenKind::Number(_)
            )
        {
            let key = self.parse_property_key()?;
            let func = self.parse_function_tail(None)?;
            return Ok(ObjectProp::Method { key, func });
        }

        let key = self.parse_property_key()?;
        self.expect(&TokenKind::Colon)?;
        let value = self.parse_assignment()?;
        Ok(ObjectProp::KeyValue { key, value })
    }
}

fn keyword_text(kw: Keyword) -> &'static str {
    match kw {
        Keyword::Var => "var",
        Keyword::Function => "function",
        Keyword::Return => "return",
        Keyword::If => "if",
        Keyword::Else => "else",
        Keyword::While => "while",
        Keyword::Do => "do",
        Keyword::For => "for",
        Keyword::In => "in",
        Keyword::Break => "break",
        Keyword::Continue => "continue",
        Keyword::Throw => "throw",
        Keyword::Try => "try",
        Keyword::Catch => "catch",
        Keyword::Finally => "finally",
        Keyword::New => "new",
        Keyword::Typeof => "typeof",
        Keyword::Void => "void",
        Keyword::Delete => "delete",
        Keyword::Instanceof => "instanceof",
        Keyword::True => "true",
        Keyword::False => "false",
        Keyword::Null => "null",
        Keyword::Undefined => "undefined",
        Keyword::This => "this",
    }
}
