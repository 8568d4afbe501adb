//! Logo Eval - evaluator and suspendable interpreter for Logo.
//!
//! This crate runs the list-structured programs `logo_parse` produces.
//!
//! # Architecture
//!
//! - `Interpreter`: global scope, host bindings, the public run API
//! - `machine`: the tree-walking evaluator for one run (arity-driven input
//!   gathering, infix precedence, dynamic scoping)
//! - `Scope` / `Binding`: chained namespaces of shared value cells
//! - `Context`: the `output`/`stop` record of one procedure activation
//! - `control`: the pause / continue / break state machine and its
//!   checkpoints
//! - `primitives`: built-in procedures
//! - `HostFunction`: Rust closures bound as Logo procedures
//!
//! # Execution model
//!
//! A run is a future. It makes progress whenever it is polled and suspends
//! only at checkpoints (when paused) or inside asynchronous host functions
//! and `wait`. Nothing in a run is `Send`; drive it on a current-thread
//! executor.

mod context;
mod control;
mod environment;
pub mod errors;
mod host;
mod interpreter;
mod machine;
mod operators;
mod primitives;
mod print_handler;
mod procedure;

pub use context::Context;
pub use control::{ControlHandle, RunState};
pub use environment::{Binding, Scope};
pub use errors::{ErrorKind, EvalError, EvalResult};
pub use host::{FromValue, HostFunction, IntoHostFn, IntoOutput};
pub use interpreter::{Interpreter, InterpreterBuilder, Outcome};
pub use print_handler::{
    buffer_handler, callback_handler, silent_handler, stdout_handler, BufferPrintHandler,
    CallbackPrintHandler, PrintHandlerImpl, SharedPrintHandler, StdoutPrintHandler,
};
pub use procedure::LocalBoxFuture;

pub use logo_ir::{List, ListBuilder, Value};
pub use logo_parse::{parse, ParseError};
