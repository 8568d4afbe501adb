//! Printing through the interpreter's print handler.
//!
//! All three accept any number of inputs in the parenthesized form and
//! separate them with spaces. `print` and `type` drop a list's outer
//! brackets; `show` keeps them.

use logo_ir::Value;

use super::define;
use crate::environment::Scope;
use crate::errors::EvalResult;
use crate::machine::Machine;
use crate::procedure::NativeProcedure;

pub(super) fn register(scope: &Scope) {
    define(scope, NativeProcedure::primitive("print", 1, print).variadic(), &["pr"]);
    define(scope, NativeProcedure::primitive("show", 1, show).variadic(), &[]);
    define(scope, NativeProcedure::primitive("type", 1, type_).variadic(), &[]);
}

fn print(machine: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    machine.print().println(&join(&args, Value::to_print_string));
    Ok(None)
}

fn show(machine: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    machine.print().println(&join(&args, Value::to_string));
    Ok(None)
}

/// Like `print` without the trailing newline.
fn type_(machine: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    machine.print().print(&join(&args, Value::to_print_string));
    Ok(None)
}

fn join(args: &[Value], render: fn(&Value) -> String) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&render(arg));
    }
    out
}
