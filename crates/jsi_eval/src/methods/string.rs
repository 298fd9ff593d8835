//! `String.prototype` methods (spec 4.5) plus the supplemented
//! `trim`/`toLowerCase`/`toUpperCase`/`repeat`/`padStart`/`padEnd`/
//! `substring`/`concat`/`includes`/`startsWith`/`endsWith` (SPEC_FULL 4.5).

use jsi_value::{not_a_function, to_number, to_string, type_error, EvalResult, Value};

use crate::interpreter::Interpreter;
use crate::methods::regexp;

pub(crate) fn dispatch_static(method: &str, args: &[Value]) -> EvalResult {
    match method {
        "fromCharCode" => {
            let s: String = args
                .iter()
                .map(to_number)
                .map(|n| char::from_u32(n as u32).unwrap_or('\u{fffd}'))
                .collect();
            Ok(Value::string(s))
        }
        other => Err(not_a_function(&format!("String.{other}"))),
    }
}

pub(crate) fn dispatch(_interp: &mut Interpreter, s: &str, method: &str, args: &[Value]) -> EvalResult {
    match method {
        "split" => split(s, args),
        "slice" => Ok(Value::string(slice(s, args))),
        "charCodeAt" => char_code_at(s, args),
        "replace" => replace(s, args, false),
        "replaceAll" => replace(s, args, true),
        "indexOf" => index_of(s, args),
        "trim" => Ok(Value::string(s.trim())),
        "toLowerCase" => Ok(Value::string(s.to_lowercase())),
        "toUpperCase" => Ok(Value::string(s.to_uppercase())),
        "repeat" => repeat(s, args),
        "padStart" => Ok(Value::string(pad(s, args, true))),
        "padEnd" => Ok(Value::string(pad(s, args, false))),
        "substring" => Ok(Value::string(substring(s, args))),
        "concat" => {
            let mut out = s.to_owned();
            for a in args {
                out.push_str(&to_string(a));
            }
            Ok(Value::string(out))
        }
        "includes" => Ok(Value::Bool(s.contains(&needle(args)))),
        "startsWith" => Ok(Value::Bool(s.starts_with(&needle(args)))),
        "endsWith" => Ok(Value::Bool(s.ends_with(&needle(args)))),
        other => Err(not_a_function(&format!("String.prototype.{other}"))),
    }
}

fn needle(args: &[Value]) -> String {
    args.first().map(to_string).unwrap_or_default()
}

fn char_count_index(s: &str, index: f64) -> usize {
    let len = s.chars().count();
    if index < 0.0 {
        ((len as f64 + index).max(0.0)) as usize
    } else {
        (index as usize).min(len)
    }
}

fn slice(s: &str, args: &[Value]) -> String {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let start = args.first().map(to_number).map_or(0, |n| char_count_index(s, n));
    let end = args.get(1).map(to_number).map_or(len, |n| char_count_index(s, n));
    if start < end {
        chars[start..end].iter().collect()
    } else {
        String::new()
    }
}

fn substring(s: &str, args: &[Value]) -> String {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let clamp = |n: f64| if n.is_nan() || n < 0.0 { 0 } else { (n as usize).min(len) };
    let a = args.first().map(to_number).map_or(0, clamp);
    let b = args.get(1).map(to_number).map_or(len, clamp);
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    chars[start..end].iter().collect()
}

fn char_code_at(s: &str, args: &[Value]) -> EvalResult {
    let index = args.first().map(to_number).unwrap_or(0.0);
    if index < 0.0 {
        return Ok(Value::Number(f64::NAN));
    }
    match s.chars().nth(index as usize) {
        Some(c) => Ok(Value::Number(c as u32 as f64)),
        None => Ok(Value::Number(f64::NAN)),
    }
}

fn index_of(s: &str, args: &[Value]) -> EvalResult {
    let needle = needle(args);
    let byte_pos = s.find(&needle);
    Ok(Value::Number(match byte_pos {
        Some(byte_pos) => s[..byte_pos].chars().count() as f64,
        None => -1.0,
    }))
}

fn repeat(s: &str, args: &[Value]) -> EvalResult {
    let count = args.first().map(to_number).unwrap_or(0.0);
    if count < 0.0 || !count.is_finite() {
        return Err(type_error("invalid count value for String.prototype.repeat"));
    }
    Ok(Value::string(s.repeat(count as usize)))
}

fn pad(s: &str, args: &[Value], at_start: bool) -> String {
    let target_len = args.first().map(to_number).unwrap_or(0.0).max(0.0) as usize;
    let pad_str = args.get(1).map(to_string).unwrap_or_else(|| " ".to_owned());
    let current_len = s.chars().count();
    if current_len >= target_len || pad_str.is_empty() {
        return s.to_owned();
    }
    let needed = target_len - current_len;
    let filler: String = pad_str.chars().cycle().take(needed).collect();
    if at_start {
        format!("{filler}{s}")
    } else {
        format!("{s}{filler}")
    }
}

/// `"...".split(sep[, limit])`: `sep` may be a string or a regex (spec 4.5
/// table). Regex splitting is zero-width-safe; a string separator obeys the
/// documented limit semantics (`0` -> `[]`, `>=1` -> at most `limit` pieces).
fn split(s: &str, args: &[Value]) -> EvalResult {
    let raw_limit = args.get(1).map(to_number);
    if matches!(raw_limit, Some(n) if n < 0.0) {
        return Err(jsi_value::range_error("split limit must not be negative"));
    }
    let limit = raw_limit.map(|n| n as usize);
    if limit == Some(0) {
        return Ok(Value::array(Vec::new()));
    }
    let mut pieces = match args.first() {
        Some(Value::Regex(re)) => regexp::split(s, re),
        Some(other) => {
            let sep = to_string(other);
            if sep.is_empty() {
                s.chars().map(|c| c.to_string()).collect()
            } else {
                s.split(&sep).map(str::to_owned).collect()
            }
        }
        None => vec![s.to_owned()],
    };
    if let Some(limit) = limit {
        pieces.truncate(limit);
    }
    Ok(Value::array(pieces.into_iter().map(Value::string).collect()))
}

fn replace(s: &str, args: &[Value], force_all: bool) -> EvalResult {
    let replacement = args.get(1).map(to_string).unwrap_or_default();
    match args.first() {
        Some(Value::Regex(re)) => {
            if force_all {
                let mut forced = re.flags;
                forced.insert(jsi_value::RegExpFlags::GLOBAL);
                let forced_re = jsi_value::JsRegExp::new(&re.source, forced)
                    .map_err(|e| jsi_value::invalid_regex(&re.source, &e.to_string()))?;
                Ok(Value::string(regexp::replace(s, &forced_re, &replacement)))
            } else {
                Ok(Value::string(regexp::replace(s, re, &replacement)))
            }
        }
        Some(other) => {
            let pattern = to_string(other);
            if force_all {
                Ok(Value::string(s.replace(&pattern, &replacement)))
            } else {
                Ok(Value::string(s.replacen(&pattern, &replacement, 1)))
            }
        }
        None => Ok(Value::string(s)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn slice_handles_negative_start() {
        assert_eq!(slice("hello", &[Value::Number(-3.0)]), "llo");
    }

    #[test]
    fn pad_start_fills_to_target_length() {
        assert_eq!(pad("5", &[Value::Number(3.0), Value::string("0")], true), "005");
    }

    #[test]
    fn split_with_limit_zero_is_empty() {
        let result = split("a,b,c", &[Value::string(","), Value::Number(0.0)]).unwrap();
        let Value::Array(heap) = result else { unreachable!() };
        assert!(heap.borrow().is_empty());
    }

    #[test]
    fn replace_only_first_occurrence_without_global_flag() {
        let result = replace("aaa", &[Value::string("a"), Value::string("b")], false).unwrap();
        assert!(matches!(result, Value::Str(s) if &*s == "baa"));
    }
}
