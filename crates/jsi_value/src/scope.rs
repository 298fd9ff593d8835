//! Scope chain.
//!
//! Lives in this crate (rather than in `jsi_eval`, which owns the rest of
//! the environment/call-stack machinery) because a closure captures a
//! live scope by reference, not a snapshot: a function value must hold
//! onto the exact `Scope` it closed over so that writes from inside the
//! closure are visible to the defining scope and vice versa (spec: the
//! scope chain is write-through to the defining scope, not copy-on-write).
//! `jsi_eval::Environment` is built on top of this as a stack of `Scope`s
//! plus the push/pop/lookup/assign bookkeeping; this type only holds the
//! chain itself, mirroring the split between the teacher's
//! `LocalScope<Scope>` wrapper (here) and its `Environment` (in `jsi_eval`).

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use jsi_ir::Name;

use crate::value::Value;

struct ScopeData {
    bindings: FxHashMap<Name, Value>,
    parent: Option<Scope>,
}

/// Reference-counted, interior-mutable scope frame. Cloning a `Scope`
/// clones the handle, not the bindings — exactly the sharing a closure
/// needs.
#[derive(Clone)]
pub struct Scope(Rc<RefCell<ScopeData>>);

impl Scope {
    #[must_use]
    pub fn new() -> Self {
        Scope(Rc::new(RefCell::new(ScopeData {
            bindings: FxHashMap::default(),
            parent: None,
        })))
    }

    #[must_use]
    pub fn with_parent(parent: Scope) -> Self {
        Scope(Rc::new(RefCell::new(ScopeData {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        })))
    }

    #[must_use]
    pub fn parent(&self) -> Option<Scope> {
        self.0.borrow().parent.clone()
    }

    /// Bind `name` in *this* frame, shadowing any outer binding. Used for
    /// `var` declarations and parameter binding.
    pub fn define(&self, name: Name, value: Value) {
        self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Read-miss returns `Undefined` rather than erroring (spec: reading
    /// an unbound name never raises `ReferenceError` through this path —
    /// only a bare identifier reference at the expression level does, and
    /// that check happens one layer up in the evaluator, which can tell
    /// the difference between "global object probe" and "bound lookup").
    #[must_use]
    pub fn get(&self, name: Name) -> Option<Value> {
        let data = self.0.borrow();
        if let Some(v) = data.bindings.get(&name) {
            return Some(v.clone());
        }
        data.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Write through to whichever frame in the chain already defines
    /// `name`; returns `false` if no frame defines it (caller decides
    /// whether that's an implicit global creation or a `ReferenceError`).
    pub fn assign(&self, name: Name, value: Value) -> bool {
        {
            let mut data = self.0.borrow_mut();
            if data.bindings.contains_key(&name) {
                data.bindings.insert(name, value);
                return true;
            }
        }
        let parent = self.0.borrow().parent.clone();
        match parent {
            Some(p) => p.assign(name, value),
            None => false,
        }
    }

    #[must_use]
    pub fn is_defined_here(&self, name: Name) -> bool {
        self.0.borrow().bindings.contains_key(&name)
    }

    #[must_use]
    pub fn bindings(&self) -> Ref<'_, FxHashMap<Name, Value>> {
        Ref::map(self.0.borrow(), |d| &d.bindings)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(n: u32) -> Name {
        Name::from_raw(n)
    }

    #[test]
    fn define_then_get() {
        let scope = Scope::new();
        scope.define(name(1), Value::Number(42.0));
        assert!(matches!(scope.get(name(1)), Some(Value::Number(n)) if n == 42.0));
    }

    #[test]
    fn get_walks_parent_chain() {
        let parent = Scope::new();
        parent.define(name(1), Value::Number(1.0));
        let child = Scope::with_parent(parent);
        assert!(matches!(child.get(name(1)), Some(Value::Number(n)) if n == 1.0));
    }

    #[test]
    fn get_miss_returns_none() {
        let scope = Scope::new();
        assert!(scope.get(name(99)).is_none());
    }

    #[test]
    fn assign_writes_through_to_defining_scope() {
        let parent = Scope::new();
        parent.define(name(1), Value::Number(1.0));
        let child = Scope::with_parent(parent.clone());

        assert!(child.assign(name(1), Value::Number(2.0)));
        assert!(matches!(parent.get(name(1)), Some(Value::Number(n)) if n == 2.0));
        // the write did not shadow-create a binding in the child frame
        assert!(!child.is_defined_here(name(1)));
    }

    #[test]
    fn assign_to_undeclared_name_fails() {
        let scope = Scope::new();
        assert!(!scope.assign(name(1), Value::Number(1.0)));
    }
}
