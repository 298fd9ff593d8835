//! The runtime value union (data model).

use std::rc::Rc;

use indexmap::IndexMap;
use jsi_ir::Name;

use crate::heap::Heap;
use crate::regexp::JsRegExp;
use crate::scope::Scope;

/// A user-defined function's closure: parameter names, body, and the
/// scope it was defined in.
pub struct FunctionValue {
    pub name: Option<Box<str>>,
    pub params: Vec<Name>,
    pub body: Rc<Vec<jsi_ir::Stmt>>,
    pub closure: Scope,
}

/// Runtime value (data model).
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Array(Heap<Vec<Value>>),
    Object(Heap<IndexMap<String, Value>>),
    Regex(Rc<JsRegExp>),
    /// Epoch milliseconds, or `NaN` for an invalid date. Not heap-shared
    /// the way arrays/objects are: every `Date` method this interpreter
    /// implements is a getter, so there is no in-place mutation to share.
    Date(f64),
    Function(Rc<FunctionValue>),
}

impl Value {
    #[must_use]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    #[must_use]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[must_use]
    pub fn object(entries: IndexMap<String, Value>) -> Self {
        Value::Object(Heap::new(entries))
    }

    #[must_use]
    pub fn regex(re: JsRegExp) -> Self {
        Value::Regex(Rc::new(re))
    }

    #[must_use]
    pub fn function(f: FunctionValue) -> Self {
        Value::Function(Rc::new(f))
    }

    /// `typeof` operator (spec 4.5 / ECMAScript `typeof`).
    #[must_use]
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object", // the famous typeof null quirk, preserved
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) | Value::Object(_) | Value::Regex(_) | Value::Date(_) => "object",
            Value::Function(_) => "function",
        }
    }

    #[must_use]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    #[must_use]
    pub fn is_object_like(&self) -> bool {
        matches!(
            self,
            Value::Array(_)
                | Value::Object(_)
                | Value::Regex(_)
                | Value::Date(_)
                | Value::Function(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typeof_null_is_object() {
        assert_eq!(Value::Null.type_of(), "object");
    }

    #[test]
    fn typeof_undefined() {
        assert_eq!(Value::Undefined.type_of(), "undefined");
    }

    #[test]
    fn typeof_array_is_object() {
        assert_eq!(Value::array(vec![]).type_of(), "object");
    }

    #[test]
    fn typeof_function() {
        let f = FunctionValue {
            name: None,
            params: vec![],
            body: Rc::new(vec![]),
            closure: Scope::new(),
        };
        assert_eq!(Value::function(f).type_of(), "function");
    }
}
