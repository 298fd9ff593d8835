//! Binary operator dispatch (spec 4.2), grounded on `ori_eval::operators`'s
//! enum-dispatch-over-trait-objects idiom. Short-circuit operators
//! (`||`, `&&`, `??`) are not handled here — they must not evaluate their
//! right operand eagerly, so the expression evaluator special-cases them
//! before ever reaching this function. Everything else (arithmetic,
//! bitwise, shift, comparison, equality) is a pure function of two
//! already-evaluated values.

use jsi_ir::BinaryOp;
use jsi_value::{
    abstract_equals, less_than, strict_equals, to_int32, to_number, to_primitive, to_string,
    to_uint32, type_error, EvalResult, RelResult, Value,
};

#[must_use]
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub => Ok(Value::Number(to_number(left) - to_number(right))),
        BinaryOp::Mul => Ok(Value::Number(to_number(left) * to_number(right))),
        BinaryOp::Div => Ok(Value::Number(to_number(left) / to_number(right))),
        BinaryOp::Mod => Ok(Value::Number(to_number(left) % to_number(right))),
        BinaryOp::Pow => Ok(Value::Number(eval_pow(to_number(left), to_number(right)))),

        BinaryOp::BitOr => Ok(Value::Number(f64::from(to_int32(left) | to_int32(right)))),
        BinaryOp::BitXor => Ok(Value::Number(f64::from(to_int32(left) ^ to_int32(right)))),
        BinaryOp::BitAnd => Ok(Value::Number(f64::from(to_int32(left) & to_int32(right)))),
        BinaryOp::ShiftLeft => {
            let shift = to_uint32(right) & 0x1f;
            Ok(Value::Number(f64::from(to_int32(left) << shift)))
        }
        BinaryOp::ShiftRight => {
            let shift = to_uint32(right) & 0x1f;
            Ok(Value::Number(f64::from(to_int32(left) >> shift)))
        }
        BinaryOp::UnsignedShiftRight => {
            let shift = to_uint32(right) & 0x1f;
            Ok(Value::Number(f64::from(to_uint32(left) >> shift)))
        }

        BinaryOp::Eq => Ok(Value::Bool(abstract_equals(left, right))),
        BinaryOp::NotEq => Ok(Value::Bool(!abstract_equals(left, right))),
        BinaryOp::StrictEq => Ok(Value::Bool(strict_equals(left, right))),
        BinaryOp::StrictNotEq => Ok(Value::Bool(!strict_equals(left, right))),

        BinaryOp::Lt => Ok(Value::Bool(matches!(less_than(left, right), RelResult::Less))),
        BinaryOp::GtEq => Ok(Value::Bool(!matches!(less_than(left, right), RelResult::Less))),
        BinaryOp::Gt => Ok(Value::Bool(matches!(less_than(right, left), RelResult::Less))),
        BinaryOp::LtEq => Ok(Value::Bool(!matches!(less_than(right, left), RelResult::Less))),

        BinaryOp::Instanceof => eval_instanceof(left, right),

        // Short-circuit operators never reach here; the expression
        // evaluator intercepts `op.short_circuits()` before calling in.
        BinaryOp::LogicalOr | BinaryOp::LogicalAnd | BinaryOp::NullishCoalesce => {
            unreachable!("short-circuit operator reached evaluate_binary")
        }
    }
}

/// `+` is string-concatenation if either (post-`ToPrimitive`) operand is a
/// string, otherwise numeric addition.
fn eval_add(left: &Value, right: &Value) -> EvalResult {
    let (lp, rp) = (to_primitive(left), to_primitive(right));
    if matches!(lp, Value::Str(_)) || matches!(rp, Value::Str(_)) {
        Ok(Value::string(format!("{}{}", to_string(&lp), to_string(&rp))))
    } else {
        Ok(Value::Number(to_number(&lp) + to_number(&rp)))
    }
}

/// `x ** 0 === 1` for every `x` (spec 4.2, 8.5), which `f64::powf` already
/// gives for every finite/NaN base, so no special-casing is needed beyond
/// delegating to `powf` directly.
fn eval_pow(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

fn eval_instanceof(left: &Value, right: &Value) -> EvalResult {
    match right {
        Value::Function(_) => Ok(Value::Bool(matches!(left, Value::Function(_)))),
        _ => Err(type_error("right-hand side of 'instanceof' is not callable")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn add_concatenates_when_either_side_is_string() {
        let result = evaluate_binary(BinaryOp::Add, &Value::string("a"), &Value::Number(1.0)).unwrap();
        assert!(matches!(result, Value::Str(s) if &*s == "a1"));
    }

    #[test]
    fn add_is_numeric_for_two_numbers() {
        let result = evaluate_binary(BinaryOp::Add, &Value::Number(1.0), &Value::Number(2.0)).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 3.0));
    }

    #[test]
    fn nan_propagates_through_arithmetic() {
        let result = evaluate_binary(BinaryOp::Add, &Value::Number(f64::NAN), &Value::Number(1.0)).unwrap();
        assert!(matches!(result, Value::Number(n) if n.is_nan()));
    }

    #[test]
    fn pow_with_zero_exponent_is_always_one() {
        for base in [0.0, f64::NAN, f64::INFINITY, -5.0] {
            let result = evaluate_binary(BinaryOp::Pow, &Value::Number(base), &Value::Number(0.0)).unwrap();
            assert!(matches!(result, Value::Number(n) if n == 1.0));
        }
    }

    #[test]
    fn bitwise_or_truncates_via_to_int32() {
        let result = evaluate_binary(BinaryOp::BitOr, &Value::Number(0.0), &Value::Number(0.0)).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 0.0));
    }

    #[test]
    fn shift_left_wraps_at_32_bits() {
        let result = evaluate_binary(BinaryOp::ShiftLeft, &Value::Number(1.0), &Value::Number(32.0)).unwrap();
        assert!(matches!(result, Value::Number(n) if n == 1.0));
    }
}
