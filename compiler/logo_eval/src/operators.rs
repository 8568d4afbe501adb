//! Infix operator implementations and numeric input coercion.
//!
//! `+ - * /` and `< >` work on numbers; a word that reads as a number
//! (`"12`) is accepted wherever a number is. `=` compares any two values
//! with [`Value`]'s equality.

use logo_ir::{BinaryOp, Value};

use crate::errors::{division_by_zero, wrong_input, EvalResult};

/// Read a value as a number: numbers as-is, numeric words parsed.
pub(crate) fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Text(text) => text.trim().parse().ok().filter(|n: &f64| n.is_finite()),
        _ => None,
    }
}

/// A numeric input to `procedure`, or a type error naming it.
pub(crate) fn number_input(procedure: &str, value: &Value) -> EvalResult<f64> {
    to_number(value).ok_or_else(|| wrong_input(procedure, value))
}

/// An integral numeric input to `procedure`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "fract() == 0 and range checked before the cast"
)]
pub(crate) fn integer_input(procedure: &str, value: &Value) -> EvalResult<i64> {
    let n = number_input(procedure, value)?;
    if n.fract() != 0.0 || n.abs() > 9_007_199_254_740_992.0 {
        return Err(wrong_input(procedure, value));
    }
    Ok(n as i64)
}

/// Evaluate `lhs op rhs`.
///
/// `=` compares any two values; every other operator wants numbers.
pub(crate) fn evaluate_binary(op: BinaryOp, lhs: &Value, rhs: &Value) -> EvalResult<Value> {
    let name = op.symbol();
    let number = |value: &Value| number_input(name, value);
    Ok(match op {
        BinaryOp::Equal => Value::Boolean(lhs == rhs),
        BinaryOp::Add => Value::Number(number(lhs)? + number(rhs)?),
        BinaryOp::Sub => Value::Number(number(lhs)? - number(rhs)?),
        BinaryOp::Mul => Value::Number(number(lhs)? * number(rhs)?),
        BinaryOp::Div => Value::Number(checked_div(name, number(lhs)?, number(rhs)?)?),
        BinaryOp::Less => Value::Boolean(number(lhs)? < number(rhs)?),
        BinaryOp::Greater => Value::Boolean(number(lhs)? > number(rhs)?),
    })
}

/// Unary minus.
pub(crate) fn negate(value: &Value) -> EvalResult<Value> {
    Ok(Value::Number(-number_input("-", value)?))
}

pub(crate) fn checked_div(procedure: &str, a: f64, b: f64) -> EvalResult<f64> {
    if b == 0.0 {
        Err(division_by_zero(procedure))
    } else {
        Ok(a / b)
    }
}

/// Logo's `remainder`: result takes the sign of the dividend.
pub(crate) fn checked_rem(procedure: &str, a: f64, b: f64) -> EvalResult<f64> {
    if b == 0.0 {
        Err(division_by_zero(procedure))
    } else {
        Ok(a % b)
    }
}

/// Read a value as a boolean: `true`, `false`, or those words in any case
/// (`make "done "true`).
pub(crate) fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Boolean(b) => Some(*b),
        Value::Text(text) if text.eq_ignore_ascii_case("true") => Some(true),
        Value::Text(text) if text.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

/// A boolean input to `procedure`.
pub(crate) fn bool_input(procedure: &str, value: &Value) -> EvalResult<bool> {
    to_bool(value).ok_or_else(|| wrong_input(procedure, value))
}
