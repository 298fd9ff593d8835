//! Tree-walking evaluator: scope chain, operators, lvalues, built-in
//! methods, and the statement executor that ties them together into a
//! runnable [`Interpreter`].

mod environment;
mod expr;
mod function_val;
mod interpreter;
mod lvalue;
mod methods;
mod operators;
mod unary_operators;

pub use environment::Environment;
pub use interpreter::{Interpreter, InterpreterBuilder, InterpreterConfig, TraceHook};

pub use jsi_value::{EvalError, EvalResult, ErrorKind, Value};
