//! Evaluation errors and their constructors.
//!
//! Every runtime failure is an [`EvalError`] tagged with an [`ErrorKind`].
//! Errors are built through the factory functions below so the wording of
//! each message lives in one place.

use logo_ir::Value;
use logo_parse::ParseError;
use thiserror::Error;

/// Category of an evaluation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed program shape: syntax, arity, leftover values, misplaced
    /// `output`/`stop`, arguments that produce nothing.
    Structural,
    /// Variable or procedure name with no reachable binding.
    Unbound,
    /// A primitive received an input of the wrong kind.
    Type,
    /// An interpreter-level precondition was violated (double pause,
    /// re-entrant execute, ...).
    Usage,
    /// A configured limit was exceeded.
    Resource,
    /// The run was broken by the host. Surfaces as a cancelled outcome.
    Cancelled,
}

/// A runtime failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    /// Create an error with an explicit kind. Host functions use this to
    /// report their own failures.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.kind == ErrorKind::Cancelled
    }
}

impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        EvalError::new(ErrorKind::Structural, err.to_string())
    }
}

// Structural errors

#[cold]
pub fn not_enough_inputs(name: &str) -> EvalError {
    EvalError::new(ErrorKind::Structural, format!("not enough inputs to {name}"))
}

#[cold]
pub fn dont_say_what_to_do(value: &Value) -> EvalError {
    EvalError::new(
        ErrorKind::Structural,
        format!("You don't say what to do with {value}"),
    )
}

#[cold]
pub fn didnt_output(producer: &str, consumer: &str) -> EvalError {
    EvalError::new(
        ErrorKind::Structural,
        format!("{producer} didn't output to {consumer}"),
    )
}

#[cold]
pub fn unexpected(token: &str) -> EvalError {
    EvalError::new(ErrorKind::Structural, format!("unexpected '{token}'"))
}

#[cold]
pub fn missing_close_paren() -> EvalError {
    EvalError::new(ErrorKind::Structural, "missing ')'")
}

#[cold]
pub fn too_much_inside_parens() -> EvalError {
    EvalError::new(ErrorKind::Structural, "too much inside ()")
}

#[cold]
pub fn outside_procedure(name: &str) -> EvalError {
    EvalError::new(
        ErrorKind::Structural,
        format!("{name} can only be used inside a procedure"),
    )
}

// Unbound names

#[cold]
pub fn unbound_procedure(name: &str) -> EvalError {
    EvalError::new(ErrorKind::Unbound, format!("I don't know how to {name}"))
}

#[cold]
pub fn unbound_variable(name: &str) -> EvalError {
    EvalError::new(ErrorKind::Unbound, format!("{name} has no value"))
}

// Type errors

#[cold]
pub fn not_a_procedure(name: &str) -> EvalError {
    EvalError::new(ErrorKind::Type, format!("{name} is not a procedure"))
}

#[cold]
pub fn wrong_input(procedure: &str, value: &Value) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format!("{procedure} doesn't like {value} as input"),
    )
}

#[cold]
pub fn expected(what: &str, value: &Value) -> EvalError {
    EvalError::new(ErrorKind::Type, format!("expected {what}, got {value}"))
}

#[cold]
pub fn division_by_zero(procedure: &str) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format!("{procedure} doesn't like 0 as input"),
    )
}

#[cold]
pub fn bad_template(procedure: &str, value: &Value) -> EvalError {
    EvalError::new(
        ErrorKind::Type,
        format!("{procedure} can't use {value} as a template"),
    )
}

// Usage errors

#[cold]
pub fn already_running() -> EvalError {
    EvalError::new(ErrorKind::Usage, "a program is already running")
}

#[cold]
pub fn not_running() -> EvalError {
    EvalError::new(ErrorKind::Usage, "no program is running")
}

#[cold]
pub fn already_paused() -> EvalError {
    EvalError::new(ErrorKind::Usage, "the program is already paused")
}

#[cold]
pub fn not_paused() -> EvalError {
    EvalError::new(ErrorKind::Usage, "the program is not paused")
}

#[cold]
pub fn already_breaking() -> EvalError {
    EvalError::new(ErrorKind::Usage, "the program is already stopping")
}

// Resources and cancellation

#[cold]
pub fn depth_exceeded(limit: usize) -> EvalError {
    EvalError::new(
        ErrorKind::Resource,
        format!("too many nested procedure calls (limit {limit})"),
    )
}

#[cold]
pub fn cancelled() -> EvalError {
    EvalError::new(ErrorKind::Cancelled, "stopped")
}

