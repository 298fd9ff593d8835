//! Assignment-target (lvalue) get/set and property access (spec 4.3: member
//! access, indexing, and the assignment alternation all resolve through the
//! same receiver/key pair).

use indexmap::IndexMap;
use jsi_ir::{Expr, ExprKind, MemberKey};
use jsi_value::{
    cannot_read_property_of, number_to_string, to_string, type_error, EvalError, EvalResult, Value,
};

use crate::interpreter::Interpreter;

impl Interpreter {
    pub(crate) fn member_key_as_string(&mut self, key: &MemberKey) -> Result<String, jsi_value::EvalError> {
        match key {
            MemberKey::Static(name) => Ok(self.interner.lookup(*name).to_owned()),
            MemberKey::Computed(expr) => {
                let v = self.eval_expr(expr)?;
                Ok(to_string(&v))
            }
        }
    }

    pub(crate) fn resolve_property_key(
        &mut self,
        key: &jsi_ir::PropertyKey,
    ) -> Result<String, jsi_value::EvalError> {
        use jsi_ir::PropertyKey;
        match key {
            PropertyKey::Ident(name) => Ok(self.interner.lookup(*name).to_owned()),
            PropertyKey::Str(s) => Ok(s.to_string()),
            PropertyKey::Number(n) => Ok(number_to_string(*n)),
            PropertyKey::Computed(expr) => {
                let v = self.eval_expr(expr)?;
                Ok(to_string(&v))
            }
        }
    }

    /// Reads a property off an already-evaluated, non-nullish receiver
    /// (spec 4.3: "out-of-range or missing keys return `Undefined`, not an
    /// error").
    pub(crate) fn get_property(&self, receiver: &Value, key: &str) -> EvalResult {
        match receiver {
            Value::Str(s) => {
                if key == "length" {
                    Ok(Value::Number(s.chars().count() as f64))
                } else if let Ok(i) = key.parse::<usize>() {
                    Ok(s.chars()
                        .nth(i)
                        .map_or(Value::Undefined, |c| Value::string(c.to_string())))
                } else {
                    Ok(Value::Undefined)
                }
            }
            Value::Array(heap) => {
                let items = heap.borrow();
                if key == "length" {
                    Ok(Value::Number(items.len() as f64))
                } else if let Ok(i) = key.parse::<usize>() {
                    Ok(items.get(i).cloned().unwrap_or(Value::Undefined))
                } else {
                    Ok(Value::Undefined)
                }
            }
            Value::Object(heap) => Ok(heap.borrow().get(key).cloned().unwrap_or(Value::Undefined)),
            Value::Regex(re) => match key {
                "source" => Ok(Value::string(&*re.source)),
                "flags" => Ok(Value::string(re.flags.to_js_string())),
                "global" => Ok(Value::Bool(re.flags.contains(jsi_value::RegExpFlags::GLOBAL))),
                "lastIndex" => Ok(Value::Number(re.last_index.get() as f64)),
                _ => Ok(Value::Undefined),
            },
            Value::Function(f) => match key {
                "name" => Ok(Value::string(f.name.as_deref().unwrap_or(""))),
                "length" => Ok(Value::Number(f.params.len() as f64)),
                _ => Ok(Value::Undefined),
            },
            Value::Undefined | Value::Null => {
                Err(cannot_read_property_of(key, &to_string(receiver)))
            }
            Value::Number(_) | Value::Bool(_) | Value::Date(_) => Ok(Value::Undefined),
        }
    }

    /// Writes a property on an already-evaluated, non-nullish receiver.
    /// Arrays extend their length on sparse assignment (spec 3: "writing
    /// index `i >= length` extends length to `i+1`, filling gaps with
    /// `Undefined`"), capped by the configured array-size bound (spec 5).
    pub(crate) fn set_property(&self, receiver: &Value, key: &str, value: Value) -> Result<(), EvalError> {
        match receiver {
            Value::Array(heap) => {
                if key == "length" {
                    return Err(type_error("cannot assign to array length"));
                }
                let Ok(index) = key.parse::<usize>() else {
                    return Err(type_error(format!("invalid array index '{key}'")));
                };
                let mut items = heap.borrow_mut();
                if index >= items.len() {
                    let new_len = index + 1;
                    if new_len > self.config.max_array_len {
                        return Err(jsi_value::resource_exhausted(
                            "array exceeded the maximum configured length",
                        ));
                    }
                    items.resize(new_len, Value::Undefined);
                }
                items[index] = value;
                Ok(())
            }
            Value::Object(heap) => {
                heap.borrow_mut().insert(key.to_owned(), value);
                Ok(())
            }
            _ => Err(type_error(format!(
                "cannot set property '{key}' on {}",
                receiver.type_of()
            ))),
        }
    }

    pub(crate) fn eval_lvalue_get(&mut self, target: &Expr) -> EvalResult {
        match &target.kind {
            ExprKind::Identifier(name) => Ok(self.env.lookup(*name).unwrap_or(Value::Undefined)),
            ExprKind::Member {
                object,
                property,
                optional,
            } => {
                let receiver = self.eval_expr(object)?;
                if receiver.is_nullish() {
                    if *optional {
                        return Ok(Value::Undefined);
                    }
                    let key = self.member_key_as_string(property)?;
                    return Err(cannot_read_property_of(&key, &to_string(&receiver)));
                }
                let key = self.member_key_as_string(property)?;
                self.get_property(&receiver, &key)
            }
            _ => Err(type_error("invalid assignment target")),
        }
    }

    pub(crate) fn eval_lvalue_set(&mut self, target: &Expr, value: Value) -> Result<(), EvalError> {
        match &target.kind {
            ExprKind::Identifier(name) => {
                self.env.assign(*name, value);
                Ok(())
            }
            ExprKind::Member { object, property, .. } => {
                let receiver = self.eval_expr(object)?;
                let key = self.member_key_as_string(property)?;
                if receiver.is_nullish() {
                    return Err(cannot_read_property_of(&key, &to_string(&receiver)));
                }
                self.set_property(&receiver, &key, value)
            }
            _ => Err(type_error("invalid assignment target")),
        }
    }

    /// Builds an `Object` value from an object-literal's properties,
    /// evaluating method shorthand as a closure over the current scope.
    pub(crate) fn eval_object_literal(
        &mut self,
        props: &[jsi_ir::ObjectProp],
    ) -> EvalResult {
        use jsi_ir::ObjectProp;
        let mut entries = IndexMap::new();
        for prop in props {
            match prop {
                ObjectProp::KeyValue { key, value } => {
                    let key = self.resolve_property_key(key)?;
                    let value = self.eval_expr(value)?;
                    entries.insert(key, value);
                }
                ObjectProp::Method { key, func } => {
                    let key = self.resolve_property_key(key)?;
                    let closure =
                        crate::function_val::make_closure(func, self.env.current_scope(), &self.interner);
                    entries.insert(key, closure);
                }
            }
        }
        Ok(Value::object(entries))
    }
}
