//! Logo IR - the homogeneous value model for the Logo engine.
//!
//! Logo programs and Logo data share one representation: a [`List`] of
//! [`Value`]s. The parser produces a `List` whose elements are the
//! program's instructions as words, numbers, booleans and nested lists;
//! the evaluator walks that same structure.
//!
//! # Contents
//!
//! - [`Value`]: the closed sum of Logo values
//! - [`List`] / [`ListBuilder`]: immutable, structurally shared singly-linked lists
//! - [`Procedure`] / [`Callable`]: identity-compared callable handles
//! - [`Token`] / [`BinaryOp`]: how the evaluator reads a word inside a program list

mod list;
mod procedure;
mod token;
mod value;

pub use list::{Iter, List, ListBuilder, ListCursor};
pub use procedure::{Callable, Procedure};
pub use token::{BinaryOp, Token, QUOTE, VARIABLE_PREFIX};
pub use value::Value;
