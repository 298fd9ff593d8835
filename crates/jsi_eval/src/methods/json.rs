//! `JSON.parse`/`JSON.stringify`, restricted to the literal subset (spec
//! 4.5): no reviver/replacer, and only the values a JSON-shaped literal can
//! produce (objects, arrays, strings, numbers, booleans, null). `parse`
//! reuses the literal-expression evaluator by parsing the input text as an
//! expression, rather than writing a second JSON grammar.

use indexmap::IndexMap;
use jsi_ir::ExprKind;
use jsi_value::{not_a_function, number_to_string, syntax_error, to_string, EvalResult, Value};

use crate::interpreter::Interpreter;

pub(crate) fn dispatch(_interp: &mut Interpreter, method: &str, args: &[Value]) -> EvalResult {
    match method {
        "parse" => parse(args),
        "stringify" => stringify(args),
        other => Err(not_a_function(&format!("JSON.{other}"))),
    }
}

/// Parses `text` as a single literal expression and evaluates just the
/// literal-producing subset of the grammar, rather than writing a second
/// JSON parser: none of the accepted shapes (`is_json_literal`) can contain
/// an `Identifier`, so this never needs the parser's string interner.
fn parse(args: &[Value]) -> EvalResult {
    let text = args.first().map(to_string).unwrap_or_default();
    // Parenthesize: a bare `{...}` at statement position parses as a block,
    // not an object literal. Wrapping forces expression-position parsing.
    let wrapped = format!("({text})");
    let mut interner = jsi_ir::StringInterner::new();
    let (result, lex_errors) = jsi_parse::parse_program(&wrapped, &mut interner);
    if !lex_errors.is_empty() {
        return Err(syntax_error("invalid JSON text", jsi_ir::Span::DUMMY));
    }
    let program = result.map_err(|e| syntax_error(e.message, e.span))?;
    let [jsi_ir::Item::Statement(jsi_ir::Stmt {
        kind: jsi_ir::StmtKind::Expr(expr),
        ..
    })] = program.items.as_slice()
    else {
        return Err(syntax_error("JSON text must be a single literal value", jsi_ir::Span::DUMMY));
    };
    if !is_json_literal(&expr.kind) {
        return Err(syntax_error("JSON text contains a non-literal expression", jsi_ir::Span::DUMMY));
    }
    Ok(literal_to_value(&expr.kind))
}

fn literal_to_value(kind: &ExprKind) -> Value {
    match kind {
        ExprKind::Null => Value::Null,
        ExprKind::Bool(b) => Value::Bool(*b),
        ExprKind::Number(n) => Value::Number(*n),
        ExprKind::Str(s) => Value::string(&**s),
        ExprKind::Unary { expr, .. } => match &expr.kind {
            ExprKind::Number(n) => Value::Number(-n),
            _ => Value::Undefined,
        },
        ExprKind::Array(elements) => Value::array(
            elements
                .iter()
                .map(|e| e.as_ref().map_or(Value::Undefined, |e| literal_to_value(&e.kind)))
                .collect(),
        ),
        ExprKind::Object(props) => {
            let mut entries = IndexMap::new();
            for prop in props {
                if let jsi_ir::ObjectProp::KeyValue { key, value } = prop {
                    let key = match key {
                        jsi_ir::PropertyKey::Str(s) => s.to_string(),
                        jsi_ir::PropertyKey::Number(n) => number_to_string(*n),
                        _ => continue,
                    };
                    entries.insert(key, literal_to_value(&value.kind));
                }
            }
            Value::object(entries)
        }
        _ => Value::Undefined,
    }
}

fn is_json_literal(kind: &ExprKind) -> bool {
    match kind {
        ExprKind::Null | ExprKind::Bool(_) | ExprKind::Number(_) | ExprKind::Str(_) => true,
        ExprKind::Unary {
            op: jsi_ir::UnaryOp::Minus,
            expr,
        } => matches!(expr.kind, ExprKind::Number(_)),
        ExprKind::Array(elements) => elements
            .iter()
            .all(|e| e.as_ref().is_some_and(|e| is_json_literal(&e.kind))),
        ExprKind::Object(props) => props.iter().all(|p| match p {
            jsi_ir::ObjectProp::KeyValue { value, .. } => is_json_literal(&value.kind),
            jsi_ir::ObjectProp::Method { .. } => false,
        }),
        _ => false,
    }
}

fn stringify(args: &[Value]) -> EvalResult {
    match args.first() {
        Some(value) => match stringify_value(value) {
            Some(s) => Ok(Value::string(s)),
            None => Ok(Value::Undefined),
        },
        None => Ok(Value::Undefined),
    }
}

fn stringify_value(value: &Value) -> Option<String> {
    match value {
        Value::Undefined | Value::Function(_) => None,
        Value::Null => Some("null".to_owned()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(if n.is_finite() { number_to_string(*n) } else { "null".to_owned() }),
        Value::Str(s) => Some(json_quote(s)),
        Value::Array(heap) => {
            let items = heap.borrow();
            let parts: Vec<String> = items
                .iter()
                .map(|v| stringify_value(v).unwrap_or_else(|| "null".to_owned()))
                .collect();
            Some(format!("[{}]", parts.join(",")))
        }
        Value::Object(heap) => {
            let entries = heap.borrow();
            let parts: Vec<String> = entries
                .iter()
                .filter_map(|(k, v)| stringify_value(v).map(|sv| format!("{}:{sv}", json_quote(k))))
                .collect();
            Some(format!("{{{}}}", parts.join(",")))
        }
        Value::Regex(_) | Value::Date(_) => Some(json_quote(&to_string(value))),
    }
}

fn json_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn stringify_object_orders_keys_as_inserted() {
        let mut entries = indexmap::IndexMap::new();
        entries.insert("a".to_owned(), Value::Number(1.0));
        entries.insert("b".to_owned(), Value::string("x"));
        let s = stringify_value(&Value::object(entries)).unwrap();
        assert_eq!(s, r#"{"a":1,"b":"x"}"#);
    }

    #[test]
    fn stringify_skips_undefined_object_values() {
        let mut entries = indexmap::IndexMap::new();
        entries.insert("a".to_owned(), Value::Undefined);
        entries.insert("b".to_owned(), Value::Number(2.0));
        let s = stringify_value(&Value::object(entries)).unwrap();
        assert_eq!(s, r#"{"b":2}"#);
    }

    #[test]
    fn is_json_literal_rejects_function_expression() {
        assert!(!is_json_literal(&ExprKind::Object(vec![jsi_ir::ObjectProp::Method {
            key: jsi_ir::PropertyKey::Str("f".into()),
            func: jsi_ir::Function {
                name: None,
                params: vec![],
                body: vec![],
                span: jsi_ir::Span::DUMMY,
            },
        }])));
    }
}
