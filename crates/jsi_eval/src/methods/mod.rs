//! Built-in method dispatch (spec 4.5). Direct pattern matching on the
//! receiver's [`Value`] variant and the method name string, rather than a
//! trait-object prototype chain — the method surface is a small fixed set,
//! not an open-ended object model.

mod array;
pub(crate) mod date;
mod json;
mod math;
pub(crate) mod regexp;
mod string;

use jsi_value::{not_a_function, to_string, EvalResult, Value};

use crate::interpreter::Interpreter;

/// Routes `receiver.method(args)` by the receiver's runtime type.
pub(crate) fn dispatch_instance(
    interp: &mut Interpreter,
    receiver: &Value,
    method: &str,
    args: &[Value],
) -> EvalResult {
    match receiver {
        Value::Str(s) => string::dispatch(interp, s, method, args),
        Value::Array(heap) => array::dispatch(interp, heap, method, args),
        Value::Date(ms) => date::dispatch(*ms, method, args),
        Value::Regex(re) => regexp::dispatch(re, method, args),
        Value::Function(f) => {
            if method == "call" || method == "apply" {
                let this = args.first().cloned().unwrap_or(Value::Undefined);
                let rest: Vec<Value> = if method == "apply" {
                    match args.get(1) {
                        Some(Value::Array(heap)) => heap.borrow().clone(),
                        _ => Vec::new(),
                    }
                } else {
                    args.get(1..).unwrap_or_default().to_vec()
                };
                interp.invoke(f, &rest, this)
            } else {
                Err(not_a_function(&format!("{}.{method}", to_string(receiver))))
            }
        }
        other => Err(not_a_function(&format!("{}.{method}", to_string(other)))),
    }
}

/// Routes `Namespace.method(args)` for the builtin static classes (spec 4.5).
pub(crate) fn dispatch_static(
    interp: &mut Interpreter,
    namespace: &str,
    method: &str,
    args: &[Value],
) -> EvalResult {
    match namespace {
        "Math" => math::dispatch(method, args),
        "String" => string::dispatch_static(method, args),
        "Array" => array::dispatch_static(method, args),
        "JSON" => json::dispatch(interp, method, args),
        "Date" => date::dispatch_static(method, args),
        other => Err(not_a_function(&format!("{other}.{method}"))),
    }
}
