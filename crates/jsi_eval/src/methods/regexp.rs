//! `RegExp` construction and the replace/split helpers `String.prototype`
//! delegates to when given a regex separator/pattern (spec 4.5 RegExp row).

use jsi_ir::Expr;
use jsi_value::{invalid_regex, not_a_function, to_string, EvalResult, JsRegExp, RegExpFlags, Value};

use crate::interpreter::Interpreter;

pub(crate) fn construct(interp: &mut Interpreter, args: &[Expr]) -> EvalResult {
    let arg_values = interp.eval_args(args)?;
    let (pattern, flags_str) = match arg_values.first() {
        Some(Value::Regex(re)) => (
            re.source.to_string(),
            arg_values
                .get(1)
                .map(to_string)
                .unwrap_or_else(|| re.flags.to_js_string()),
        ),
        Some(v) => (to_string(v), arg_values.get(1).map(to_string).unwrap_or_default()),
        None => (String::new(), String::new()),
    };
    let flags =
        RegExpFlags::parse(&flags_str).ok_or_else(|| invalid_regex(&pattern, "unrecognized flag"))?;
    let re = JsRegExp::new(&pattern, flags).map_err(|e| invalid_regex(&pattern, &e.to_string()))?;
    Ok(Value::regex(re))
}

/// Substitutes `$&`/`` $` ``/`$'`/`$$`/`$1`-`$9` references in a replacement
/// template against one match.
fn substitute(text: &str, m: &regress::Match, replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut chars = replacement.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match replacement[i + 1..].chars().next() {
            Some('$') => {
                out.push('$');
                chars.next();
            }
            Some('&') => {
                out.push_str(&text[m.range()]);
                chars.next();
            }
            Some('`') => {
                out.push_str(&text[..m.range().start]);
                chars.next();
            }
            Some('\'') => {
                out.push_str(&text[m.range().end..]);
                chars.next();
            }
            Some(d) if d.is_ascii_digit() => {
                let group = d.to_digit(10).unwrap_or(0) as usize;
                if let Some(range) = m.group(group) {
                    out.push_str(&text[range]);
                }
                chars.next();
            }
            _ => out.push('$'),
        }
    }
    out
}

/// `"...".replace(regex, repl)`: replaces the first match, or every match
/// when the regex carries the `g` flag (spec 4.5: "honours `global` flag to
/// choose count 0 (all) vs 1").
pub(crate) fn replace(text: &str, re: &JsRegExp, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;
    let global = re.flags.contains(RegExpFlags::GLOBAL);
    for m in re.find_iter(text) {
        out.push_str(&text[last_end..m.range().start]);
        out.push_str(&substitute(text, &m, replacement));
        last_end = m.range().end;
        if !global {
            break;
        }
    }
    out.push_str(&text[last_end..]);
    out
}

/// No `RegExp.prototype` instance method is named in the host-object
/// table (spec 4.5) beyond the `source`/`flags`/`global`/`lastIndex`
/// fields, which are plain property reads handled in
/// `lvalue.rs::get_property` rather than here.
pub(crate) fn dispatch(_re: &JsRegExp, method: &str, _args: &[Value]) -> EvalResult {
    Err(not_a_function(&format!("RegExp.prototype.{method}")))
}

/// Zero-width-safe split on a regex separator (spec 4.5): a zero-length
/// match at position 0 is skipped rather than producing an empty leading
/// piece, and scanning stops once past the end of the string.
pub(crate) fn split(text: &str, re: &JsRegExp) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut last_end = 0;
    for m in re.find_iter(text) {
        if m.range().is_empty() && m.range().start == 0 {
            continue;
        }
        if m.range().start > text.len() {
            break;
        }
        pieces.push(text[last_end..m.range().start].to_owned());
        last_end = m.range().end;
    }
    pieces.push(text[last_end..].to_owned());
    pieces
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;
    use jsi_value::RegExpFlags;

    #[test]
    fn replace_substitutes_capture_group() {
        let re = JsRegExp::new("a(b+)", RegExpFlags::empty()).unwrap();
        assert_eq!(replace("xabbbc", &re, "Z$1"), "xZbbbc");
    }

    #[test]
    fn replace_all_with_global_flag() {
        let re = JsRegExp::new("a", RegExpFlags::GLOBAL).unwrap();
        assert_eq!(replace("banana", &re, "o"), "bonono");
    }

    #[test]
    fn split_skips_zero_width_match_at_start() {
        let re = JsRegExp::new("", RegExpFlags::empty()).unwrap();
        let pieces = split("ab", &re);
        assert_eq!(pieces[0], "ab");
    }
}
