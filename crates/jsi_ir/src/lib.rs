//! IR types shared by the lexer, parser, and evaluator: source spans,
//! interned identifiers, operator tags, and the AST produced by parsing.

mod ast;
mod name;
mod ops;
mod span;

pub use ast::{
    Expr, ExprKind, Function, Item, MemberKey, ObjectProp, Program, PropertyKey, Stmt, StmtKind,
    SwitchCase,
};
pub use name::{Name, StringInterner};
pub use ops::{AssignOp, BinaryOp, Fixity, UnaryOp};
pub use span::Span;
