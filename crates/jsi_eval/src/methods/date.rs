//! `Date` construction, statics, and instance methods (spec 4.5).

use jsi_ir::Expr;
use jsi_value::{
    date_to_string, from_components, get_date, get_day, get_full_year, get_hours,
    get_milliseconds, get_minutes, get_month, get_seconds, get_timezone_offset, now_unavailable,
    not_a_function, to_number, to_string, EvalResult, Value,
};

use crate::interpreter::Interpreter;

pub(crate) fn construct(interp: &mut Interpreter, args: &[Expr]) -> EvalResult {
    let arg_values = interp.eval_args(args)?;
    let ms = match arg_values.as_slice() {
        [] => now_unavailable(),
        [Value::Str(s)] => parse_iso(s),
        [single] => to_number(single),
        components => {
            let n = |i: usize| components.get(i).map(to_number).unwrap_or(0.0) as i32;
            from_components(n(0), n(1), n(2).max(1), n(3), n(4), n(5), n(6))
        }
    };
    Ok(Value::Date(ms))
}

pub(crate) fn dispatch_static(method: &str, args: &[Value]) -> EvalResult {
    match method {
        "now" => Ok(Value::Number(now_unavailable())),
        "parse" => {
            let text = args.first().map(to_string).unwrap_or_default();
            Ok(Value::Number(parse_iso(&text)))
        }
        "UTC" => {
            let n = |i: usize| args.get(i).map(to_number).unwrap_or(0.0) as i32;
            let day = if args.len() > 2 { n(2) } else { 1 };
            Ok(Value::Number(from_components(n(0), n(1), day, n(3), n(4), n(5), n(6))))
        }
        other => Err(not_a_function(&format!("Date.{other}"))),
    }
}

pub(crate) fn dispatch(ms: f64, method: &str, _args: &[Value]) -> EvalResult {
    match method {
        "valueOf" | "getTime" => Ok(Value::Number(ms)),
        "toString" | "toISOString" | "toJSON" => Ok(Value::string(date_to_string(ms))),
        "getFullYear" => Ok(Value::Number(get_full_year(ms))),
        "getMonth" => Ok(Value::Number(get_month(ms))),
        "getDate" => Ok(Value::Number(get_date(ms))),
        "getDay" => Ok(Value::Number(get_day(ms))),
        "getHours" => Ok(Value::Number(get_hours(ms))),
        "getMinutes" => Ok(Value::Number(get_minutes(ms))),
        "getSeconds" => Ok(Value::Number(get_seconds(ms))),
        "getMilliseconds" => Ok(Value::Number(get_milliseconds(ms))),
        "getTimezoneOffset" => Ok(Value::Number(get_timezone_offset(ms))),
        other => Err(not_a_function(&format!("Date.prototype.{other}"))),
    }
}

/// A minimal `YYYY-MM-DDTHH:MM:SS.mmmZ` parser (the format `date_to_string`
/// produces); anything else is `NaN`, matching how this interpreter has no
/// ambient locale/timezone database to parse looser formats against.
fn parse_iso(s: &str) -> f64 {
    let s = s.trim().trim_end_matches('Z');
    let (date_part, time_part) = s.split_once('T').unwrap_or((s, ""));
    let mut date_fields = date_part.split('-');
    let Some(year) = date_fields.next().and_then(|v| v.parse::<i32>().ok()) else {
        return f64::NAN;
    };
    let Some(month) = date_fields.next().and_then(|v| v.parse::<i32>().ok()) else {
        return f64::NAN;
    };
    let Some(day) = date_fields.next().and_then(|v| v.parse::<i32>().ok()) else {
        return f64::NAN;
    };

    let (hour, minute, second, millisecond) = if time_part.is_empty() {
        (0, 0, 0, 0)
    } else {
        let (hms, ms) = time_part.split_once('.').unwrap_or((time_part, "0"));
        let mut hms_fields = hms.split(':');
        let hour = hms_fields.next().and_then(|v| v.parse::<i32>().ok()).unwrap_or(0);
        let minute = hms_fields.next().and_then(|v| v.parse::<i32>().ok()).unwrap_or(0);
        let second = hms_fields.next().and_then(|v| v.parse::<i32>().ok()).unwrap_or(0);
        let millisecond = ms.parse::<i32>().unwrap_or(0);
        (hour, minute, second, millisecond)
    };

    from_components(year, month - 1, day, hour, minute, second, millisecond)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn parse_iso_round_trips_date_to_string_output() {
        let ms = from_components(2020, 0, 1, 0, 0, 0, 0);
        let s = date_to_string(ms);
        assert_eq!(parse_iso(&s), ms);
    }

    #[test]
    fn parse_iso_rejects_garbage() {
        assert!(parse_iso("not a date").is_nan());
    }

    #[test]
    fn dispatch_get_full_year() {
        let ms = from_components(1999, 11, 31, 0, 0, 0, 0);
        let result = dispatch(ms, "getFullYear", &[]).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 1999.0));
    }
}
