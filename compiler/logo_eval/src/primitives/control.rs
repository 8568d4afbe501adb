//! Control structures.
//!
//! Blocks run in the caller's scope and context, so `output` and `stop`
//! inside a block end the enclosing procedure. Loops check for that after
//! every iteration.

use std::time::Duration;

use logo_ir::{List, Value};

use super::{define, inputs, list_input};
use crate::environment::Scope;
use crate::errors::{cancelled, dont_say_what_to_do, wrong_input, EvalResult};
use crate::machine::Machine;
use crate::operators::{bool_input, integer_input, number_input};
use crate::procedure::{LocalBoxFuture, NativeProcedure};

/// `wait` counts in sixtieths of a second.
const TICKS_PER_SECOND: f64 = 60.0;

pub(super) fn register(scope: &Scope) {
    define(scope, NativeProcedure::control("if", 2, if_), &[]);
    define(scope, NativeProcedure::control("ifelse", 3, ifelse), &[]);
    define(scope, NativeProcedure::control("repeat", 2, repeat), &[]);
    define(scope, NativeProcedure::control("forever", 1, forever), &[]);
    define(scope, NativeProcedure::control("run", 1, run), &[]);
    define(scope, NativeProcedure::control("wait", 1, wait), &[]);
    define(scope, NativeProcedure::primitive("output", 1, output), &["op"]);
    define(scope, NativeProcedure::primitive("stop", 0, stop), &[]);
    define(scope, NativeProcedure::primitive("repcount", 0, repcount), &[]);
}

/// `if cond [block]`. Outputs whatever the block outputs, which lets
/// `if` act as an operation when its block is an expression.
fn if_(machine: &mut Machine, args: Vec<Value>) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
    Box::pin(async move {
        let [cond, block] = inputs("if", args)?;
        let block = list_input("if", &block)?;
        if bool_input("if", &cond)? {
            machine.evaluate(block).await
        } else {
            Ok(None)
        }
    })
}

fn ifelse(
    machine: &mut Machine,
    args: Vec<Value>,
) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
    Box::pin(async move {
        let [cond, then_block, else_block] = inputs("ifelse", args)?;
        let chosen = if bool_input("ifelse", &cond)? {
            then_block
        } else {
            else_block
        };
        let block = list_input("ifelse", &chosen)?;
        machine.evaluate(block).await
    })
}

fn repeat(machine: &mut Machine, args: Vec<Value>) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
    Box::pin(async move {
        let [count, block] = inputs("repeat", args)?;
        let count = integer_input("repeat", &count)?;
        let block = list_input("repeat", &block)?;

        machine.push_repcount();
        let result = repeat_block(machine, count, &block).await;
        machine.pop_repcount();
        result
    })
}

async fn repeat_block(machine: &mut Machine, count: i64, block: &List) -> EvalResult<Option<Value>> {
    for iteration in 1..=count {
        machine.iteration().await?;
        machine.set_repcount(iteration);
        run_iteration(machine, block).await?;
        if machine.is_stopped() {
            break;
        }
    }
    Ok(None)
}

fn forever(machine: &mut Machine, args: Vec<Value>) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
    Box::pin(async move {
        let [block] = inputs("forever", args)?;
        let block = list_input("forever", &block)?;
        loop {
            machine.iteration().await?;
            run_iteration(machine, &block).await?;
            if machine.is_stopped() {
                return Ok(None);
            }
        }
    })
}

/// One pass of a loop body. A loop has nowhere to put a value.
async fn run_iteration(machine: &mut Machine, block: &List) -> EvalResult<()> {
    match machine.evaluate(block.clone()).await? {
        Some(value) => Err(dont_say_what_to_do(&value)),
        None => Ok(()),
    }
}

/// `run [list]` evaluates the list in place; a word runs as a one-word
/// instruction.
fn run(machine: &mut Machine, args: Vec<Value>) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
    Box::pin(async move {
        let [instructions] = inputs("run", args)?;
        let list = match instructions {
            Value::List(list) => list,
            word if word.is_word() => List::from(vec![word]),
            other => return Err(wrong_input("run", &other)),
        };
        machine.evaluate(list).await
    })
}

/// `wait ticks` sleeps for `ticks` sixtieths of a second. A break ends the
/// sleep early.
fn wait(machine: &mut Machine, args: Vec<Value>) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
    Box::pin(async move {
        let [ticks] = inputs("wait", args)?;
        let n = number_input("wait", &ticks)?;
        if !n.is_finite() {
            return Err(wrong_input("wait", &ticks));
        }
        let duration = Duration::from_secs_f64(n.max(0.0) / TICKS_PER_SECOND);

        let control = machine.control();
        tokio::select! {
            () = tokio::time::sleep(duration) => Ok(None),
            () = control.cancelled() => Err(cancelled()),
        }
    })
}

fn output(machine: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [value] = inputs("output", args)?;
    machine.context_mut("output")?.output(value);
    Ok(None)
}

fn stop(machine: &mut Machine, _: Vec<Value>) -> EvalResult<Option<Value>> {
    machine.context_mut("stop")?.stop();
    Ok(None)
}

/// The innermost `repeat`'s iteration number, from 1; -1 outside `repeat`.
#[allow(clippy::cast_precision_loss, reason = "iteration counts stay far below 2^53")]
fn repcount(machine: &mut Machine, _: Vec<Value>) -> EvalResult<Option<Value>> {
    Ok(Some(Value::Number(machine.repcount() as f64)))
}
