//! `Math` static methods (spec 4.5: `pow` named explicitly, the rest
//! supplemented per SPEC_FULL's invitation to add the trivially-low-cost
//! ones real signature functions actually use).

use jsi_value::{not_a_function, to_number, EvalResult, Value};

pub(crate) fn dispatch(method: &str, args: &[Value]) -> EvalResult {
    let arg = |i: usize| args.get(i).map(to_number).unwrap_or(f64::NAN);
    let n = Value::Number;
    match method {
        "pow" => Ok(n(arg(0).powf(arg(1)))),
        "floor" => Ok(n(arg(0).floor())),
        "abs" => Ok(n(arg(0).abs())),
        "round" => Ok(n(round_half_away_from_negative_infinity(arg(0)))),
        "sqrt" => Ok(n(arg(0).sqrt())),
        "trunc" => Ok(n(arg(0).trunc())),
        "sign" => Ok(n(arg(0).signum_zero_aware())),
        "max" => Ok(n(args.iter().map(to_number).fold(f64::NEG_INFINITY, js_max))),
        "min" => Ok(n(args.iter().map(to_number).fold(f64::INFINITY, js_min))),
        other => Err(not_a_function(&format!("Math.{other}"))),
    }
}

/// `Math.round` rounds half up even for negative numbers (`-0.5` rounds to
/// `-0`, not `-1`), unlike `f64::round`'s round-half-away-from-zero.
fn round_half_away_from_negative_infinity(n: f64) -> f64 {
    if n.is_nan() || n.is_infinite() {
        return n;
    }
    (n + 0.5).floor()
}

fn js_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.max(b)
    }
}

fn js_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        a.min(b)
    }
}

trait SignZeroAware {
    fn signum_zero_aware(self) -> f64;
}

impl SignZeroAware for f64 {
    fn signum_zero_aware(self) -> f64 {
        if self.is_nan() || self == 0.0 {
            self
        } else {
            self.signum()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn pow_matches_exponent_operator() {
        let result = dispatch("pow", &[Value::Number(2.0), Value::Number(10.0)]).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 1024.0));
    }

    #[test]
    fn round_rounds_negative_half_toward_zero_floor() {
        let result = dispatch("round", &[Value::Number(-0.5)]).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 0.0));
    }

    #[test]
    fn max_of_nan_is_nan() {
        let result = dispatch("max", &[Value::Number(1.0), Value::Number(f64::NAN)]).unwrap();
        assert!(matches!(result, Value::Number(n) if n.is_nan()));
    }

    #[test]
    fn unknown_method_errors() {
        assert!(dispatch("frobnicate", &[]).is_err());
    }
}
