//! Closure construction and parameter binding (spec 4.6).
//!
//! Named `function_val` after the teacher's module of the same name; the
//! teacher's version holds free-standing type-conversion builtins, ours
//! holds the construction side of this interpreter's own function value —
//! the name is kept for the module's role (the one place that builds
//! `Value::Function`s), not because the contents are a literal port.

use std::rc::Rc;

use jsi_ir::{Function, Name, StringInterner};
use jsi_value::{FunctionValue, Scope, Value};

/// Builds a closure value from a parsed function node, capturing
/// `closure_scope` (spec 4.6: "captures the enclosing scope").
#[must_use]
pub fn make_closure(func: &Function, closure_scope: Scope, interner: &StringInterner) -> Value {
    let name = func.name.map(|n| interner.lookup(n).to_owned().into_boxed_str());
    Value::function(FunctionValue {
        name,
        params: func.params.clone(),
        body: Rc::new(func.body.clone()),
        closure: closure_scope,
    })
}

/// Binds call arguments to parameter names in a fresh call scope: missing
/// arguments bind to `Undefined`, extras are silently ignored (spec 4.6:
/// no `arguments` object).
pub fn bind_params(scope: &Scope, params: &[Name], args: &[Value]) {
    for (i, &param) in params.iter().enumerate() {
        let value = args.get(i).cloned().unwrap_or(Value::Undefined);
        scope.define(param, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsi_ir::Span;

    #[test]
    fn missing_args_bind_to_undefined() {
        let scope = Scope::new();
        let param = Name::from_raw(0);
        bind_params(&scope, &[param], &[]);
        assert!(matches!(scope.get(param), Some(Value::Undefined)));
    }

    #[test]
    fn extra_args_are_ignored() {
        let scope = Scope::new();
        bind_params(&scope, &[], &[Value::Number(1.0), Value::Number(2.0)]);
    }

    #[test]
    fn closure_captures_given_scope() {
        let mut interner = StringInterner::new();
        let name = interner.intern("f");
        let func = Function {
            name: Some(name),
            params: vec![],
            body: vec![],
            span: Span::DUMMY,
        };
        let scope = Scope::new();
        let value = make_closure(&func, scope, &interner);
        assert!(matches!(value, Value::Function(f) if f.name.as_deref() == Some("f")));
    }
}
