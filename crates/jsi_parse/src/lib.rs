//! Recursive-descent parser turning interpreter source text into the
//! typed AST defined by `jsi_ir`.
//!
//! Top-level items are discovered the way the interpreter's program
//! loader expects: named `function` declarations and `name = { ... }`
//! assignments (including object-literal-of-methods form) are kept as
//! distinct [`jsi_ir::Item`] variants so a host can look a function up
//! by name without re-walking the whole program; everything else at
//! the top level is an ordinary statement.

mod error;
mod grammar;
mod parser;

pub use error::{ParseError, ParseResult};
pub use parser::Parser;

use jsi_ir::{ExprKind, Item, Program, StmtKind};
use jsi_lexer::{LexError, TokenKind};

/// Parses a full program, returning both the AST and any lexer errors
/// encountered along the way (the lexer never stops at its first error;
/// it records and recovers, matching the parser's own error style).
pub fn parse_program(src: &str, interner: &mut jsi_ir::StringInterner) -> (ParseResult<Program>, Vec<LexError>) {
    let (mut parser, lex_errors) = Parser::new(src, interner);
    (parser.parse_top_level(), lex_errors)
}

impl Parser<'_> {
    fn parse_top_level(&mut self) -> ParseResult<Program> {
        let mut items = Vec::new();
        while !self.at_eof() {
            items.push(self.parse_item()?);
        }
        Ok(Program { items })
    }

    fn parse_item(&mut self) -> ParseResult<Item> {
        if matches!(self.current_kind(), TokenKind::Keyword(jsi_lexer::Keyword::Function))
            && matches!(self.peek_kind(1), TokenKind::Identifier(_))
        {
            let func = self.parse_function(true)?;
            return Ok(Item::Function(func));
        }

        let stmt = self.parse_stmt()?;
        if let StmtKind::Expr(expr) = &stmt.kind {
            if let ExprKind::Assign {
                op: None,
                target,
                value,
            } = &expr.kind
            {
                if let ExprKind::Identifier(name) = &target.kind {
                    return Ok(Item::TopLevelAssign {
                        name: *name,
                        value: (**value).clone(),
                        span: stmt.span,
                    });
                }
            }
        }
        Ok(Item::Statement(stmt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsi_ir::StringInterner;

    fn parse(src: &str) -> Program {
        let mut interner = StringInterner::new();
        let (program, lex_errors) = parse_program(src, &mut interner);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        program.unwrap_or_else(|e| panic!("parse error: {e}"))
    }

    #[test]
    fn parses_function_declaration() {
        let program = parse("function square(x) { return x * x; }");
        assert_eq!(program.items.len(), 1);
        assert!(matches!(program.items[0], Item::Function(_)));
    }

    #[test]
    fn parses_top_level_object_of_methods() {
        let program = parse("var ops = {}; ops = {double: function(x) { return x * 2; }};");
        assert_eq!(program.items.len(), 2);
        assert!(matches!(program.items[1], Item::TopLevelAssign { .. }));
    }

    #[test]
    fn precedence_binds_multiplication_tighter_than_addition() {
        let program = parse("function f() { return 1 + 2 * 3; }");
        let Item::Function(func) = &program.items[0] else {
            panic!("expected function");
        };
        let StmtKind::Return(Some(expr)) = &func.body[0].kind else {
            panic!("expected return statement");
        };
        let ExprKind::Binary { op, left, right } = &expr.kind else {
            panic!("expected binary expr");
        };
        assert!(matches!(op, jsi_ir::BinaryOp::Add));
        assert!(matches!(left.kind, ExprKind::Number(n) if n == 1.0));
        assert!(matches!(right.kind, ExprKind::Binary { op: jsi_ir::BinaryOp::Mul, .. }));
    }

    #[test]
    fn ternary_and_assignment_are_right_associative() {
        let program = parse("function f(a) { a = a ? 1 : 2; }");
        assert_eq!(program.items.len(), 1);
    }

    #[test]
    fn for_in_loop_parses() {
        let program = parse("function f(o) { for (var k in o) { k; } }");
        let Item::Function(func) = &program.items[0] else {
            panic!("expected function");
        };
        assert!(matches!(func.body[0].kind, StmtKind::ForIn { .. }));
    }

    #[test]
    fn try_catch_finally_parses() {
        let program = parse("function f() { try { throw 1; } catch (e) { e; } finally { 1; } }");
        let Item::Function(func) = &program.items[0] else {
            panic!("expected function");
        };
        assert!(matches!(func.body[0].kind, StmtKind::Try { .. }));
    }

    #[test]
    fn regex_literal_not_confused_with_division() {
        let program = parse("function f() { var r = /a(b+)/g; return r; }");
        let Item::Function(func) = &program.items[0] else {
            panic!("expected function");
        };
        let StmtKind::VarDecl(decls) = &func.body[0].kind else {
            panic!("expected var decl");
        };
        let (_, Some(init)) = &decls[0] else {
            panic!("expected initializer");
        };
        assert!(matches!(init.kind, ExprKind::Regex { .. }));
    }
}
