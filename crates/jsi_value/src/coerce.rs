//! ECMAScript-faithful coercions and comparisons (spec 4.2, GLOSSARY).

use crate::number_format::number_to_string;
use crate::value::Value;

/// `ToBoolean`. The falsy set is exactly: `undefined`, `null`, `false`,
/// `0`, `-0`, `NaN`, `""` — everything else, including empty arrays and
/// objects, is truthy (a frequent JS surprise that real signature scripts
/// occasionally rely on).
#[must_use]
pub fn to_boolean(v: &Value) -> bool {
    match v {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::Str(s) => !s.is_empty(),
        Value::Array(_)
        | Value::Object(_)
        | Value::Regex(_)
        | Value::Date(_)
        | Value::Function(_) => true,
    }
}

/// `ToPrimitive` with no type hint (the "default" hint: try `valueOf`,
/// fall back to `toString`-equivalent). There is no user-overridable
/// `valueOf`/`toString` in this language's object model (host dispatch is
/// pattern-matched, not prototype-based), so this reduces to: primitives
/// pass through; arrays/objects convert to their default string form;
/// dates convert to their numeric epoch value (the one type for which
/// `ToPrimitive` prefers the number hint, matching real `Date` objects'
/// `Symbol.toPrimitive` default).
#[must_use]
pub fn to_primitive(v: &Value) -> Value {
    match v {
        Value::Array(_) | Value::Object(_) | Value::Regex(_) | Value::Function(_) => {
            Value::string(to_string(v))
        }
        Value::Date(ms) => Value::Number(*ms),
        _ => v.clone(),
    }
}

/// `ToNumber`.
#[must_use]
pub fn to_number(v: &Value) -> f64 {
    match v {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => *n,
        Value::Str(s) => string_to_number(s),
        Value::Date(ms) => *ms,
        Value::Array(heap) => {
            let items = heap.borrow();
            match items.len() {
                0 => 0.0,
                1 => to_number(&items[0]),
                _ => f64::NAN,
            }
        }
        Value::Object(_) | Value::Regex(_) | Value::Function(_) => f64::NAN,
    }
}

/// String-to-number conversion per `ToNumber` applied to a string:
/// leading/trailing whitespace is ignored, empty (or all-whitespace)
/// string is `0`, `0x`/`0o`/`0b` integer literals are recognized,
/// anything else that doesn't parse as a JS numeric literal is `NaN`.
#[must_use]
pub fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return i64::from_str_radix(hex, 16).map_or(f64::NAN, |v| v as f64);
    }
    if let Some(oct) = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
    {
        return i64::from_str_radix(oct, 8).map_or(f64::NAN, |v| v as f64);
    }
    if let Some(bin) = trimmed
        .strip_prefix("0b")
        .or_else(|| trimmed.strip_prefix("0B"))
    {
        return i64::from_str_radix(bin, 2).map_or(f64::NAN, |v| v as f64);
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => trimmed.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// `ToString`.
#[must_use]
pub fn to_string(v: &Value) -> String {
    match v {
        Value::Undefined => "undefined".to_owned(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::Str(s) => s.to_string(),
        Value::Array(heap) => heap
            .borrow()
            .iter()
            .map(|v| if v.is_nullish() { String::new() } else { to_string(v) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
        Value::Regex(re) => format!("/{}/{}", re.source, re.flags.to_js_string()),
        Value::Date(ms) => crate::date::date_to_string(*ms),
        Value::Function(f) => {
            let name = f.name.as_deref().unwrap_or("");
            format!("function {name}() {{ [native code] }}")
        }
    }
}

/// `ToInt32` per the exact ECMAScript algorithm: truncate toward zero,
/// reduce modulo 2^32, reinterpret as signed 32-bit. Implemented
/// textbook-correct rather than replicating the original's approximate
/// bit-operator fast path (see design notes on this choice).
#[must_use]
pub fn to_int32(v: &Value) -> i32 {
    let n = to_number(v);
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let truncated = n.trunc();
    let modulo = truncated.rem_euclid(4294967296.0); // 2^32
    let as_u32 = modulo as u64 as u32;
    as_u32 as i32
}

/// `ToUint32`.
#[must_use]
pub fn to_uint32(v: &Value) -> u32 {
    let n = to_number(v);
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    let truncated = n.trunc();
    let modulo = truncated.rem_euclid(4294967296.0);
    modulo as u64 as u32
}

/// Abstract equality (`==`/`!=`): same-type operands compare as strict
/// equality; `null`/`undefined` are mutually (and only self-) equal under
/// `==`; number/string mix coerces the string; boolean coerces to number
/// first; object vs. primitive applies `ToPrimitive` to the object side.
#[must_use]
pub fn abstract_equals(a: &Value, b: &Value) -> bool {
    use Value::{Array, Bool, Date, Function, Null, Number, Object, Regex, Str, Undefined};

    match (a, b) {
        (Undefined | Null, Undefined | Null) => true,
        (Number(_), Number(_))
        | (Str(_), Str(_))
        | (Bool(_), Bool(_))
        | (Array(_), Array(_))
        | (Object(_), Object(_))
        | (Regex(_), Regex(_))
        | (Date(_), Date(_))
        | (Function(_), Function(_)) => strict_equals(a, b),

        (Number(_), Str(_)) | (Str(_), Number(_)) => to_number(a) == to_number(b),
        (Bool(_), _) => abstract_equals(&Value::Number(to_number(a)), b),
        (_, Bool(_)) => abstract_equals(a, &Value::Number(to_number(b))),

        (Array(_) | Object(_) | Regex(_) | Date(_) | Function(_), Number(_) | Str(_)) => {
            abstract_equals(&to_primitive(a), b)
        }
        (Number(_) | Str(_), Array(_) | Object(_) | Regex(_) | Date(_) | Function(_)) => {
            abstract_equals(a, &to_primitive(b))
        }

        _ => false,
    }
}

/// Strict equality (`===`): no coercion. Primitives compare by value
/// (`NaN !== NaN`, per IEEE float comparison); arrays/objects/regexes
/// compare by reference identity; functions compare by reference
/// identity.
#[must_use]
pub fn strict_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => x.ptr_eq(y),
        (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
        (Value::Regex(x), Value::Regex(y)) => std::rc::Rc::ptr_eq(x, y),
        (Value::Date(x), Value::Date(y)) => x == y,
        (Value::Function(x), Value::Function(y)) => std::rc::Rc::ptr_eq(x, y),
        _ => false,
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RelResult {
    Less,
    GreaterOrEqual,
    /// Either side was `NaN`; every relational comparison against `NaN`
    /// is `false`, which the caller (rather than this function) decides
    /// how to render per operator.
    Undefined,
}

/// Abstract relational comparison (`<`): string-to-string lexicographic
/// comparison (by UTF-16 code unit) if both operands are strings,
/// otherwise numeric comparison after `ToNumber`.
#[must_use]
pub fn less_than(a: &Value, b: &Value) -> RelResult {
    if let (Value::Str(x), Value::Str(y)) = (a, b) {
        return if x.as_ref() < y.as_ref() {
            RelResult::Less
        } else {
            RelResult::GreaterOrEqual
        };
    }
    let (x, y) = (to_number(a), to_number(b));
    if x.is_nan() || y.is_nan() {
        return RelResult::Undefined;
    }
    if x < y {
        RelResult::Less
    } else {
        RelResult::GreaterOrEqual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values() {
        assert!(!to_boolean(&Value::Number(0.0)));
        assert!(!to_boolean(&Value::Number(f64::NAN)));
        assert!(!to_boolean(&Value::string("")));
        assert!(!to_boolean(&Value::Null));
        assert!(!to_boolean(&Value::Undefined));
        assert!(!to_boolean(&Value::Bool(false)));
    }

    #[test]
    fn truthy_empty_containers() {
        assert!(to_boolean(&Value::array(vec![])));
    }

    #[test]
    fn null_loosely_equals_undefined_only_each_other() {
        assert!(abstract_equals(&Value::Null, &Value::Undefined));
        assert!(!abstract_equals(&Value::Null, &Value::Number(0.0)));
    }

    #[test]
    fn number_string_loose_equality() {
        assert!(abstract_equals(&Value::Number(1.0), &Value::string("1")));
    }

    #[test]
    fn nan_never_strictly_equals_itself() {
        assert!(!strict_equals(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
    }

    #[test]
    fn arrays_compare_by_identity_under_strict_eq() {
        let a = Value::array(vec![]);
        let b = Value::array(vec![]);
        assert!(!strict_equals(&a, &b));
        assert!(strict_equals(&a, &a.clone()));
    }

    #[test]
    fn to_int32_wraps() {
        assert_eq!(to_int32(&Value::Number(4294967296.0)), 0);
        assert_eq!(to_int32(&Value::Number(-1.0)), -1);
    }

    #[test]
    fn to_uint32_of_negative_one() {
        assert_eq!(to_uint32(&Value::Number(-1.0)), u32::MAX);
    }

    #[test]
    fn string_to_number_handles_hex() {
        assert_eq!(string_to_number("0x1F"), 31.0);
    }

    #[test]
    fn whitespace_only_string_is_zero() {
        assert_eq!(string_to_number("   "), 0.0);
    }

    #[test]
    fn relational_with_nan_is_undefined() {
        assert_eq!(
            less_than(&Value::Number(f64::NAN), &Value::Number(1.0)),
            RelResult::Undefined
        );
    }

    #[test]
    fn relational_lexicographic_for_strings() {
        assert_eq!(
            less_than(&Value::string("a"), &Value::string("b")),
            RelResult::Less
        );
    }
}
