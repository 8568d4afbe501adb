//! Procedure definition and variable primitives.
//!
//! Variables are dynamically scoped. A name resolves through the current
//! scope chain, which runs from the innermost activation out through
//! every caller to the global scope:
//!
//! - `make` assigns the nearest visible binding, or creates a global one
//! - `local` declares the name in the current activation only
//! - `global` ties the name in the current activation to the global cell

use std::rc::Rc;

use logo_ir::{Callable, Procedure, Value};

use super::{define, inputs, list_input, name_input, names_input};
use crate::environment::Scope;
use crate::errors::{not_enough_inputs, unbound_variable, EvalResult};
use crate::machine::Machine;
use crate::procedure::{DefinedProcedure, NativeProcedure};

pub(super) fn register(scope: &Scope) {
    define(scope, NativeProcedure::primitive("to", 2, to).variadic(), &[]);
    define(scope, NativeProcedure::primitive("make", 2, make), &[]);
    define(scope, NativeProcedure::primitive("local", 1, local), &[]);
    define(scope, NativeProcedure::primitive("global", 1, global), &[]);
    define(scope, NativeProcedure::primitive("thing", 1, thing), &[]);
}

/// `(to "name "param... [body])`, the form `to ... end` is parsed into.
/// Binds the procedure in the current scope, replacing any previous one.
fn to(machine: &mut Machine, mut args: Vec<Value>) -> EvalResult<Option<Value>> {
    let body = args.pop().ok_or_else(|| not_enough_inputs("to"))?;
    let body = list_input("to", &body)?;
    let mut words = args.into_iter();
    let name = words.next().ok_or_else(|| not_enough_inputs("to"))?;
    let name = name_input("to", &name)?;
    let params = words
        .map(|word| name_input("to", &word).map(Rc::from))
        .collect::<EvalResult<Vec<Rc<str>>>>()?;

    let procedure = DefinedProcedure::new(&name, params, body);
    tracing::debug!(name = procedure.name(), arity = procedure.arity(), "define");
    machine
        .current_scope()
        .bind(&name, Value::Procedure(Procedure::new(procedure)));
    Ok(None)
}

fn make(machine: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [name, value] = inputs("make", args)?;
    let name = name_input("make", &name)?;
    if !machine.current_scope().set(&name, value.clone()) {
        machine.global().bind(&name, value);
    }
    Ok(None)
}

/// `local "name` or `local [a b]`. Declared names have no value until
/// assigned; a name the current frame already holds is left alone.
fn local(machine: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [names] = inputs("local", args)?;
    let scope = machine.current_scope();
    for name in names_input("local", &names)? {
        if scope.local_binding(&name).is_none() {
            scope.declare(&name, None);
        }
    }
    Ok(None)
}

fn global(machine: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [names] = inputs("global", args)?;
    let global = machine.global();
    let scope = machine.current_scope();
    for name in names_input("global", &names)? {
        let binding = global
            .local_binding(&name)
            .unwrap_or_else(|| global.declare(&name, None));
        if !scope.ptr_eq(global) {
            scope.alias(&name, binding);
        }
    }
    Ok(None)
}

fn thing(machine: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [name] = inputs("thing", args)?;
    let name = name_input("thing", &name)?;
    machine
        .current_scope()
        .lookup(&name)
        .map(Some)
        .ok_or_else(|| unbound_variable(&name))
}
