//! Higher-order primitives over templates.
//!
//! ```text
//! apply "sum [1 2]                   ; 3
//! (invoke [[a b] :a * :b] 3 4)       ; 12
//! foreach [1 2 3] [[n] print :n]
//! map [[n] :n * :n] [1 2 3]          ; [1 4 9]
//! ```

use logo_ir::{ListBuilder, Value};

use super::{define, inputs, list_input};
use crate::environment::Scope;
use crate::errors::{didnt_output, dont_say_what_to_do, not_enough_inputs, EvalResult};
use crate::machine::Machine;
use crate::procedure::{LocalBoxFuture, NativeProcedure};

pub(super) fn register(scope: &Scope) {
    define(scope, NativeProcedure::control("apply", 2, apply), &[]);
    define(scope, NativeProcedure::control("invoke", 2, invoke).variadic(), &[]);
    define(scope, NativeProcedure::control("foreach", 2, foreach), &[]);
    define(scope, NativeProcedure::control("map", 2, map), &[]);
}

/// `apply template [inputs]`.
fn apply(machine: &mut Machine, args: Vec<Value>) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
    Box::pin(async move {
        let [template, values] = inputs("apply", args)?;
        let values = list_input("apply", &values)?;
        machine
            .apply_template("apply", &template, values.iter().cloned().collect())
            .await
    })
}

/// `invoke template input`, or `(invoke template input...)`.
fn invoke(machine: &mut Machine, args: Vec<Value>) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
    Box::pin(async move {
        let mut args = args.into_iter();
        let template = args.next().ok_or_else(|| not_enough_inputs("invoke"))?;
        machine
            .apply_template("invoke", &template, args.collect())
            .await
    })
}

/// `foreach [list] template` runs the template once per member.
fn foreach(
    machine: &mut Machine,
    args: Vec<Value>,
) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
    Box::pin(async move {
        let [list, template] = inputs("foreach", args)?;
        let list = list_input("foreach", &list)?;
        for item in &list {
            machine.iteration().await?;
            if let Some(value) = machine
                .apply_template("foreach", &template, vec![item.clone()])
                .await?
            {
                return Err(dont_say_what_to_do(&value));
            }
            if machine.is_stopped() {
                break;
            }
        }
        Ok(None)
    })
}

/// `map template [list]` collects the template's output for each member.
fn map(machine: &mut Machine, args: Vec<Value>) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
    Box::pin(async move {
        let [template, list] = inputs("map", args)?;
        let list = list_input("map", &list)?;
        let mut results = ListBuilder::with_capacity(list.len());
        for item in &list {
            machine.iteration().await?;
            match machine
                .apply_template("map", &template, vec![item.clone()])
                .await?
            {
                Some(value) => results.push(value),
                None if machine.is_stopped() => return Ok(None),
                None => return Err(didnt_output(&template.to_string(), "map")),
            }
        }
        Ok(Some(Value::List(results.finish())))
    })
}
