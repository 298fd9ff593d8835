//! Typed AST produced by `jsi_parse` and walked by `jsi_eval`.
//!
//! The teacher flattens expressions into an `ExprArena` indexed by `ExprId`
//! so that the type checker and the parallel pattern evaluator can share
//! subtrees cheaply. This interpreter has no incremental recompilation and
//! no parallel evaluation (the resource model is strictly single-threaded),
//! so there is no benefit to arena-indexing here: nodes are owned directly
//! through `Box`, which keeps the tree-walker's code a direct match for the
//! recursive structure of the language it evaluates.

use crate::name::Name;
use crate::ops::{AssignOp, BinaryOp, Fixity, UnaryOp};
use crate::span::Span;

#[derive(Clone, Debug)]
pub struct Program {
    pub items: Vec<Item>,
}

/// A top-level declaration: either a named function or a `name = { ... }`
/// object literal of methods (spec: function/program loading discovers
/// both shapes by name).
#[derive(Clone, Debug)]
pub enum Item {
    Function(Function),
    /// `var name = <expr>;` or `name = <expr>;` at the top level, kept
    /// distinct from a function so object-literal-of-methods assignments
    /// (`var obj = {a: function(){...}}`) can be discovered by name.
    TopLevelAssign { name: Name, value: Expr, span: Span },
    Statement(Stmt),
}

#[derive(Clone, Debug)]
pub struct Function {
    /// `None` for anonymous function expressions; callers that need a
    /// name synthesize one (spec 4.6: nested anonymous functions get a
    /// deterministic synthetic name for lookup purposes).
    pub name: Option<Name>,
    pub params: Vec<Name>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    Undefined,
    Null,
    This,
    Bool(bool),
    Number(f64),
    Str(Box<str>),
    /// `/pattern/flags`
    Regex { pattern: Box<str>, flags: Box<str> },
    Identifier(Name),
    Array(Vec<Option<Expr>>),
    Object(Vec<ObjectProp>),
    Function(Box<Function>),

    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Update {
        op: UnaryOp, // Inc | Dec
        fixity: Fixity,
        target: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Assign {
        op: Option<AssignOp>,
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        optional: bool,
    },
    New {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Member {
        object: Box<Expr>,
        property: MemberKey,
        optional: bool,
    },
    /// Comma-operator sequence: evaluates each in order, yields the last.
    Sequence(Vec<Expr>),
}

#[derive(Clone, Debug)]
pub enum MemberKey {
    /// `obj.name`
    Static(Name),
    /// `obj[expr]`
    Computed(Box<Expr>),
}

#[derive(Clone, Debug)]
pub enum ObjectProp {
    KeyValue { key: PropertyKey, value: Expr },
    Method { key: PropertyKey, func: Function },
}

#[derive(Clone, Debug)]
pub enum PropertyKey {
    Ident(Name),
    Str(Box<str>),
    Number(f64),
    Computed(Box<Expr>),
}

#[derive(Clone, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub enum StmtKind {
    Expr(Expr),
    VarDecl(Vec<(Name, Option<Expr>)>),
    Block(Vec<Stmt>),
    If {
        test: Expr,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    While {
        test: Expr,
        body: Box<Stmt>,
    },
    DoWhile {
        body: Box<Stmt>,
        test: Expr,
    },
    For {
        init: Option<Box<StmtKind>>,
        test: Option<Expr>,
        update: Option<Expr>,
        body: Box<Stmt>,
    },
    ForIn {
        /// `true` for `for (var x in obj)`, binding a fresh variable each
        /// iteration; `false` for `for (x in obj)` assigning to an
        /// existing binding.
        declares: bool,
        binding: Name,
        object: Expr,
        body: Box<Stmt>,
    },
    Return(Option<Expr>),
    Break(Option<Name>),
    Continue(Option<Name>),
    Throw(Expr),
    Try {
        block: Vec<Stmt>,
        catch: Option<(Option<Name>, Vec<Stmt>)>,
        finally: Option<Vec<Stmt>>,
    },
    /// A standalone `function name(...) { ... }` declaration nested inside
    /// a block (as opposed to a top-level `Item::Function`).
    FunctionDecl(Box<Function>),
    Labeled {
        label: Name,
        body: Box<Stmt>,
    },
    /// `switch (discriminant) { case k: ...; default: ...; }` (spec 4.4):
    /// cases fall through to the next one unless a `break` exits, and at
    /// most one `default` case is matched when no `case` does.
    Switch {
        discriminant: Expr,
        cases: Vec<SwitchCase>,
    },
    Empty,
}

/// One `case <test>:` arm of a `Switch`, or the `default:` arm when `test`
/// is `None`.
#[derive(Clone, Debug)]
pub struct SwitchCase {
    pub test: Option<Expr>,
    pub body: Vec<Stmt>,
}
