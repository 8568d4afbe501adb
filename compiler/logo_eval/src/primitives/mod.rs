//! Built-in procedures.
//!
//! Every primitive is a [`NativeProcedure`] bound in the global scope like
//! any other procedure, so a program may redefine them with `to`.
//!
//! - `control`: `if`, `ifelse`, `repeat`, `forever`, `output`, `stop`,
//!   `run`, `wait`, `repcount`
//! - `variables`: `to`, `make`, `local`, `global`, `thing`
//! - `templates`: `apply`, `invoke`, `foreach`, `map`
//! - `output`: `print`, `show`, `type`
//! - `data`: word and list selectors, constructors and predicates
//! - `arithmetic`: prefix arithmetic and logic

mod arithmetic;
mod control;
mod data;
mod output;
mod templates;
mod variables;

use logo_ir::{Callable, List, Value};

use crate::environment::Scope;
use crate::errors::{not_enough_inputs, wrong_input, EvalResult};
use crate::procedure::{native_value, NativeProcedure};

/// Bind every primitive into `scope`.
pub(crate) fn register(scope: &Scope) {
    control::register(scope);
    variables::register(scope);
    templates::register(scope);
    output::register(scope);
    data::register(scope);
    arithmetic::register(scope);
}

/// Bind `procedure` under its own name, then under each alias.
fn define(scope: &Scope, procedure: NativeProcedure, aliases: &[&str]) {
    let name = procedure.name().to_owned();
    let value = native_value(procedure);
    for alias in aliases {
        scope.bind(alias, value.clone());
    }
    scope.bind(&name, value);
}

/// Destructure exactly `N` inputs. Non-variadic primitives always receive
/// their arity; the check only guards calls made from Rust.
fn inputs<const N: usize>(procedure: &str, args: Vec<Value>) -> EvalResult<[Value; N]> {
    <[Value; N]>::try_from(args).map_err(|_| not_enough_inputs(procedure))
}

/// A list input to `procedure`.
fn list_input(procedure: &str, value: &Value) -> EvalResult<List> {
    value
        .as_list()
        .cloned()
        .ok_or_else(|| wrong_input(procedure, value))
}

/// A word input to `procedure`, rendered as text.
fn word_input(procedure: &str, value: &Value) -> EvalResult<String> {
    if value.is_word() {
        Ok(value.to_string())
    } else {
        Err(wrong_input(procedure, value))
    }
}

/// A variable or procedure name. A leading `"` or `:` is dropped, so
/// `make ":x 1` and `make "x 1` agree.
fn name_input(procedure: &str, value: &Value) -> EvalResult<String> {
    match value {
        Value::Text(text) => {
            let text: &str = text;
            let name = text
                .strip_prefix(logo_ir::QUOTE)
                .or_else(|| text.strip_prefix(logo_ir::VARIABLE_PREFIX))
                .unwrap_or(text);
            if name.is_empty() {
                Err(wrong_input(procedure, value))
            } else {
                Ok(name.to_owned())
            }
        }
        _ => Err(wrong_input(procedure, value)),
    }
}

/// Names given as one word or a list of words (`local [a b]`).
fn names_input(procedure: &str, value: &Value) -> EvalResult<Vec<String>> {
    match value {
        Value::List(list) => list.iter().map(|item| name_input(procedure, item)).collect(),
        other => Ok(vec![name_input(procedure, other)?]),
    }
}
