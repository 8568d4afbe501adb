//! Parser tests.
//!
//! - `parser`: literals, words, nesting, negative numbers and definitions
//! - `errors`: every structural error with its location

mod parser;
