//! Prefix arithmetic and logic.
//!
//! `sum`, `product`, `and` and `or` fold over every input of a
//! parenthesized call: `(sum 1 2 3 4)` is 10.

use logo_ir::Value;

use super::{define, inputs};
use crate::environment::Scope;
use crate::errors::EvalResult;
use crate::machine::Machine;
use crate::operators::{bool_input, checked_div, checked_rem, number_input};
use crate::procedure::NativeProcedure;

pub(super) fn register(scope: &Scope) {
    define(scope, NativeProcedure::primitive("sum", 2, sum).variadic(), &[]);
    define(scope, NativeProcedure::primitive("difference", 2, difference), &[]);
    define(scope, NativeProcedure::primitive("product", 2, product).variadic(), &[]);
    define(scope, NativeProcedure::primitive("quotient", 2, quotient), &[]);
    define(scope, NativeProcedure::primitive("remainder", 2, remainder), &[]);
    define(scope, NativeProcedure::primitive("minus", 1, minus), &[]);
    define(scope, NativeProcedure::primitive("not", 1, not), &[]);
    define(scope, NativeProcedure::primitive("and", 2, and).variadic(), &[]);
    define(scope, NativeProcedure::primitive("or", 2, or).variadic(), &[]);
}

fn sum(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let mut total = 0.0;
    for arg in &args {
        total += number_input("sum", arg)?;
    }
    Ok(Some(Value::Number(total)))
}

fn product(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let mut total = 1.0;
    for arg in &args {
        total *= number_input("product", arg)?;
    }
    Ok(Some(Value::Number(total)))
}

fn difference(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [a, b] = inputs("difference", args)?;
    let a = number_input("difference", &a)?;
    let b = number_input("difference", &b)?;
    Ok(Some(Value::Number(a - b)))
}

fn quotient(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [a, b] = inputs("quotient", args)?;
    let a = number_input("quotient", &a)?;
    let b = number_input("quotient", &b)?;
    Ok(Some(Value::Number(checked_div("quotient", a, b)?)))
}

fn remainder(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [a, b] = inputs("remainder", args)?;
    let a = number_input("remainder", &a)?;
    let b = number_input("remainder", &b)?;
    Ok(Some(Value::Number(checked_rem("remainder", a, b)?)))
}

fn minus(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [a] = inputs("minus", args)?;
    Ok(Some(Value::Number(-number_input("minus", &a)?)))
}

fn not(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [a] = inputs("not", args)?;
    Ok(Some(Value::Boolean(!bool_input("not", &a)?)))
}

/// Every input is checked, even after the result is known.
fn and(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let mut result = true;
    for arg in &args {
        result &= bool_input("and", arg)?;
    }
    Ok(Some(Value::Boolean(result)))
}

fn or(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let mut result = false;
    for arg in &args {
        result |= bool_input("or", arg)?;
    }
    Ok(Some(Value::Boolean(result)))
}
