//! Public facade (spec 6): `build`, `Interpreter::call`,
//! `Interpreter::extract_function`, and the structured host-facing
//! exception `call` turns an uncatchable `EvalError` into.
//!
//! Scoped down from `oric`'s role as the teacher workspace's top-level
//! driver crate to a lib-only facade — this interpreter is meant to be
//! embedded by a host fetching and running player scripts, not run as a
//! standalone binary.

use std::collections::HashMap;

pub use jsi_eval::{Environment, Interpreter, InterpreterBuilder, InterpreterConfig, TraceHook};
pub use jsi_value::{ErrorKind, EvalError, Value};

/// A host-facing uncaught failure (spec 7: "kind, message, and offending
/// snippet"). Distinct from `EvalError` itself so a host need not depend
/// on `jsi_value`'s internal `ControlFlow`/catchability plumbing.
#[derive(Clone, Debug)]
pub struct Exception {
    pub kind: ErrorKind,
    pub message: String,
    pub snippet: String,
}

impl std::fmt::Display for Exception {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {} (near `{}`)", self.kind, self.message, self.snippet)
    }
}

impl std::error::Error for Exception {}

/// Parses `program_text` and registers its top-level items (spec 6:
/// `build(program_text) -> Interpreter`).
pub fn build(program_text: &str) -> Result<Interpreter, Exception> {
    Interpreter::build(program_text).map_err(|e| to_exception(&e, None))
}

/// Invokes `function_name` with `args`, defining every `globals` entry as
/// a global binding first (spec 6: `Interpreter.call(function_name, args,
/// globals) -> Value`).
pub fn call(
    interp: &mut Interpreter,
    function_name: &str,
    args: &[Value],
    globals: HashMap<String, Value>,
) -> Result<Value, Exception> {
    let globals: Vec<(String, Value)> = globals.into_iter().collect();
    interp
        .call(function_name, args, &globals)
        .map_err(|e| to_exception(&e, Some(interp)))
}

/// Looks up a reusable closure for `name` (spec 6:
/// `Interpreter.extract_function(name) -> Callable`), so a host can cache
/// it across repeated invocations without re-parsing the program.
#[must_use]
pub fn extract_function(interp: &mut Interpreter, name: &str) -> Option<std::rc::Rc<jsi_value::FunctionValue>> {
    interp.extract_function(name)
}

fn to_exception(e: &EvalError, interp: Option<&Interpreter>) -> Exception {
    let snippet = match (e.span, interp) {
        (Some(span), Some(interp)) => interp.snippet_at(span),
        _ => String::new(),
    };
    Exception {
        kind: e.kind,
        message: e.message.clone(),
        snippet,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn build_and_call_a_simple_function() {
        let mut interp = build("function add(a, b) { return a + b; }").unwrap();
        let result = call(
            &mut interp,
            "add",
            &[Value::Number(2.0), Value::Number(3.0)],
            HashMap::new(),
        )
        .unwrap();
        assert!(matches!(result, Value::Number(n) if n == 5.0));
    }

    #[test]
    fn calling_an_unresolved_function_is_a_reference_error() {
        let mut interp = build("function f() { return 1; }").unwrap();
        let err = call(&mut interp, "missing", &[], HashMap::new()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ReferenceError));
    }

    #[test]
    fn globals_are_visible_as_bindings_inside_the_called_function() {
        let mut interp = build("function f() { return x; }").unwrap();
        let mut globals = HashMap::new();
        globals.insert("x".to_owned(), Value::Number(42.0));
        let result = call(&mut interp, "f", &[], globals).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 42.0));
    }

    #[test]
    fn extract_function_returns_a_reusable_closure() {
        let mut interp = build("function double(x) { return x * 2; }").unwrap();
        let f = extract_function(&mut interp, "double").unwrap();
        assert_eq!(f.params.len(), 1);
    }

    #[test]
    fn uncaught_throw_surfaces_as_a_user_thrown_exception() {
        let mut interp = build("function f() { throw 'boom'; }").unwrap();
        let err = call(&mut interp, "f", &[], HashMap::new()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UserThrown));
    }
}
