//! Scope-stack wrapper around [`jsi_value::Scope`].
//!
//! `jsi_value::Scope` already is the write-through chain-of-frames type
//! (it has to live there so `Value::Function` can hold one); this is the
//! thin stack-discipline layer on top of it, grounded on
//! `ori_eval::environment::Environment`'s push/pop/define/lookup/assign
//! API, minus `Mutability` (this language has no `const`/`let` distinction)
//! and minus `capture()` (a function value captures its defining `Scope`
//! directly by `Rc` clone rather than snapshotting bindings into a map).

use jsi_ir::Name;
use jsi_value::{Scope, Value};

pub struct Environment {
    current: Scope,
    global: Scope,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        let global = Scope::new();
        Environment {
            current: global.clone(),
            global,
        }
    }

    /// The scope a function literal evaluated right now would close over.
    #[must_use]
    pub fn current_scope(&self) -> Scope {
        self.current.clone()
    }

    /// Enter a new block/call scope, child of the current one.
    pub fn push_scope(&mut self) {
        self.current = Scope::with_parent(self.current.clone());
    }

    /// Enter a new scope whose parent is an explicit captured scope (used
    /// for function calls, where the body runs in a child of the closure's
    /// captured scope rather than the caller's scope).
    pub fn push_scope_over(&mut self, parent: &Scope) {
        self.current = Scope::with_parent(parent.clone());
    }

    /// Leave the current scope, returning to its parent.
    ///
    /// No-op at the outermost (global) scope.
    pub fn pop_scope(&mut self) {
        if let Some(parent) = self.current.parent() {
            self.current = parent;
        }
    }

    pub fn define(&mut self, name: Name, value: Value) {
        self.current.define(name, value);
    }

    pub fn define_global(&mut self, name: Name, value: Value) {
        self.global.define(name, value);
    }

    #[must_use]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.current.get(name)
    }

    /// Assigns to whichever scope already defines `name`; defines it fresh
    /// in the innermost scope otherwise (spec: "assignment to an existing
    /// name rewrites it in the scope that defined it; otherwise it creates
    /// a binding in the innermost scope").
    pub fn assign(&mut self, name: Name, value: Value) {
        if !self.current.assign(name, value.clone()) {
            self.current.define(name, value);
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_creates_binding_when_undefined_anywhere() {
        let mut env = Environment::new();
        let name = Name::from_raw(1);
        env.assign(name, Value::Number(1.0));
        assert!(matches!(env.lookup(name), Some(Value::Number(n)) if n == 1.0));
    }

    #[test]
    fn push_pop_scope_restores_parent_bindings() {
        let mut env = Environment::new();
        let x = Name::from_raw(2);
        env.define(x, Value::Number(1.0));
        env.push_scope();
        env.define(x, Value::Number(2.0));
        assert!(matches!(env.lookup(x), Some(Value::Number(n)) if n == 2.0));
        env.pop_scope();
        assert!(matches!(env.lookup(x), Some(Value::Number(n)) if n == 1.0));
    }

    #[test]
    fn assign_in_child_scope_writes_through_to_parent() {
        let mut env = Environment::new();
        let x = Name::from_raw(3);
        env.define_global(x, Value::Number(1.0));
        env.push_scope();
        env.assign(x, Value::Number(5.0));
        env.pop_scope();
        assert!(matches!(env.lookup(x), Some(Value::Number(n)) if n == 5.0));
    }
}
