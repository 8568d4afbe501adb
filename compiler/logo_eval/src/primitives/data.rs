//! Word and list primitives.
//!
//! Selectors work on both kinds of data: on a list they pick members, on a
//! word they pick characters. Lists are immutable, so `fput`, `butfirst`
//! and friends build new lists that share structure with their inputs.

use logo_ir::{List, ListBuilder, Value};

use super::{define, inputs, word_input};
use crate::environment::Scope;
use crate::errors::{wrong_input, EvalResult};
use crate::machine::Machine;
use crate::operators::{integer_input, to_number};
use crate::procedure::NativeProcedure;

pub(super) fn register(scope: &Scope) {
    define(scope, NativeProcedure::primitive("first", 1, first), &[]);
    define(scope, NativeProcedure::primitive("butfirst", 1, butfirst), &["bf"]);
    define(scope, NativeProcedure::primitive("last", 1, last), &[]);
    define(scope, NativeProcedure::primitive("butlast", 1, butlast), &["bl"]);
    define(scope, NativeProcedure::primitive("fput", 2, fput), &[]);
    define(scope, NativeProcedure::primitive("lput", 2, lput), &[]);
    define(scope, NativeProcedure::primitive("list", 2, list).variadic(), &[]);
    define(scope, NativeProcedure::primitive("sentence", 2, sentence).variadic(), &["se"]);
    define(scope, NativeProcedure::primitive("word", 2, word).variadic(), &[]);
    define(scope, NativeProcedure::primitive("count", 1, count), &[]);
    define(scope, NativeProcedure::primitive("item", 2, item), &[]);
    define(scope, NativeProcedure::primitive("emptyp", 1, emptyp), &["empty?"]);
    define(scope, NativeProcedure::primitive("equalp", 2, equalp), &["equal?"]);
    define(scope, NativeProcedure::primitive("listp", 1, listp), &["list?"]);
    define(scope, NativeProcedure::primitive("wordp", 1, wordp), &["word?"]);
    define(scope, NativeProcedure::primitive("numberp", 1, numberp), &["number?"]);
}

/// Either kind of data, ready for selection.
enum Data {
    List(List),
    Word(Vec<char>),
}

fn data_input(procedure: &str, value: &Value) -> EvalResult<Data> {
    match value {
        Value::List(list) => Ok(Data::List(list.clone())),
        word if word.is_word() => Ok(Data::Word(word.to_string().chars().collect())),
        other => Err(wrong_input(procedure, other)),
    }
}

fn chars_value(chars: &[char]) -> Value {
    Value::from(chars.iter().collect::<String>())
}

fn first(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [value] = inputs("first", args)?;
    let picked = match data_input("first", &value)? {
        Data::List(list) => list.head().cloned(),
        Data::Word(chars) => chars.first().map(|c| chars_value(&[*c])),
    };
    picked.map(Some).ok_or_else(|| wrong_input("first", &value))
}

fn butfirst(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [value] = inputs("butfirst", args)?;
    match data_input("butfirst", &value)? {
        Data::List(list) if !list.is_empty() => Ok(Some(Value::List(list.tail()))),
        Data::Word(chars) if !chars.is_empty() => Ok(Some(chars_value(&chars[1..]))),
        _ => Err(wrong_input("butfirst", &value)),
    }
}

fn last(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [value] = inputs("last", args)?;
    let picked = match data_input("last", &value)? {
        Data::List(list) => list.last().cloned(),
        Data::Word(chars) => chars.last().map(|c| chars_value(&[*c])),
    };
    picked.map(Some).ok_or_else(|| wrong_input("last", &value))
}

fn butlast(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [value] = inputs("butlast", args)?;
    match data_input("butlast", &value)? {
        Data::List(list) if !list.is_empty() => Ok(Some(Value::List(list.without_last()))),
        Data::Word(chars) if !chars.is_empty() => {
            Ok(Some(chars_value(&chars[..chars.len() - 1])))
        }
        _ => Err(wrong_input("butlast", &value)),
    }
}

/// `fput thing [list]` shares the whole input list as its tail.
fn fput(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [thing, list] = inputs("fput", args)?;
    match list {
        Value::List(list) => Ok(Some(Value::List(List::cons(thing, list)))),
        other => Err(wrong_input("fput", &other)),
    }
}

fn lput(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [thing, list] = inputs("lput", args)?;
    match list {
        Value::List(list) => Ok(Some(Value::List(list.with_last(thing)))),
        other => Err(wrong_input("lput", &other)),
    }
}

fn list(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    Ok(Some(Value::List(List::from(args))))
}

/// Lists are spliced in one level deep; words become members.
fn sentence(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let mut builder = ListBuilder::new();
    for arg in args {
        match arg {
            Value::List(list) => builder.extend_from_list(&list),
            other => builder.push(other),
        }
    }
    Ok(Some(Value::List(builder.finish())))
}

fn word(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let mut joined = String::new();
    for arg in &args {
        joined.push_str(&word_input("word", arg)?);
    }
    Ok(Some(Value::from(joined)))
}

#[allow(clippy::cast_precision_loss, reason = "lengths stay far below 2^53")]
fn count(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [value] = inputs("count", args)?;
    let n = match data_input("count", &value)? {
        Data::List(list) => list.len(),
        Data::Word(chars) => chars.len(),
    };
    Ok(Some(Value::Number(n as f64)))
}

/// `item index thing`, counting from 1.
fn item(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [index, value] = inputs("item", args)?;
    let n = integer_input("item", &index)?;
    let Some(position) = usize::try_from(n).ok().and_then(|n| n.checked_sub(1)) else {
        return Err(wrong_input("item", &index));
    };
    let picked = match data_input("item", &value)? {
        Data::List(list) => list.get(position).cloned(),
        Data::Word(chars) => chars.get(position).map(|c| chars_value(&[*c])),
    };
    picked.map(Some).ok_or_else(|| wrong_input("item", &index))
}

fn emptyp(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [value] = inputs("emptyp", args)?;
    let empty = match &value {
        Value::List(list) => list.is_empty(),
        Value::Text(text) => text.is_empty(),
        _ => false,
    };
    Ok(Some(Value::Boolean(empty)))
}

fn equalp(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [a, b] = inputs("equalp", args)?;
    Ok(Some(Value::Boolean(a == b)))
}

fn listp(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [value] = inputs("listp", args)?;
    Ok(Some(Value::Boolean(matches!(value, Value::List(_)))))
}

fn wordp(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [value] = inputs("wordp", args)?;
    Ok(Some(Value::Boolean(value.is_word())))
}

/// Numbers and words that read as numbers.
fn numberp(_: &mut Machine, args: Vec<Value>) -> EvalResult<Option<Value>> {
    let [value] = inputs("numberp", args)?;
    Ok(Some(Value::Boolean(to_number(&value).is_some())))
}
