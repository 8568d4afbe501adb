//! The host-facing interpreter.
//!
//! An [`Interpreter`] owns the global scope, which persists across runs,
//! and the run-state machine that pause/continue/break steer. Each call
//! to [`Interpreter::execute`] parses the source, then evaluates it on a
//! fresh [`Machine`] holding that run's scope and context stacks.
//!
//! ```text
//! let interp = Interpreter::builder().print_handler(buffer_handler()).build();
//! interp.bind("forward", HostFunction::new(move |d: f64| turtle.forward(d)));
//! let control = interp.control();
//! // elsewhere: control.pause(), control.resume(), control.cancel()
//! match interp.execute("repeat 4 [forward 100 right 90]").await { .. }
//! ```
//!
//! One run at a time: `execute` while another run is in flight fails with
//! a usage error and leaves the running program alone.

mod builder;

use std::rc::Rc;

use logo_ir::{List, Value};
use logo_parse::ParseError;
use tracing::debug;

use crate::control::{Control, ControlHandle, RunState};
use crate::environment::Scope;
use crate::errors::{dont_say_what_to_do, EvalError, EvalResult};
use crate::host::HostFunction;
use crate::machine::Machine;
use crate::print_handler::SharedPrintHandler;
use crate::procedure::{native_value, NativeProcedure};

pub use builder::InterpreterBuilder;

/// How a run ended.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The program ran to the end without leaving a value behind.
    Completed,
    /// `break` stopped the run.
    Cancelled,
    Failed(EvalError),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// The error of a failed run.
    pub fn error(&self) -> Option<&EvalError> {
        match self {
            Outcome::Failed(err) => Some(err),
            Outcome::Completed | Outcome::Cancelled => None,
        }
    }
}

/// A Logo interpreter.
pub struct Interpreter {
    global: Scope,
    control: Rc<Control>,
    print: SharedPrintHandler,
    max_depth: usize,
}

impl Interpreter {
    /// An interpreter with the built-in primitives, printing to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Parse without running.
    pub fn parse(&self, source: &str) -> Result<List, ParseError> {
        logo_parse::parse(source)
    }

    /// Parse and run `source`.
    ///
    /// A top-level instruction that outputs a value nobody uses fails the
    /// run. The run state is back to idle when this resolves, however the
    /// run ended.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn execute(&self, source: &str) -> Outcome {
        let outcome = match self.run(source).await {
            Ok(None) => Outcome::Completed,
            Ok(Some(value)) => Outcome::Failed(dont_say_what_to_do(&value)),
            Err(err) if err.is_cancelled() => Outcome::Cancelled,
            Err(err) => Outcome::Failed(err),
        };
        debug!(?outcome, "run finished");
        outcome
    }

    /// Parse and run `source`, yielding the value of its final
    /// instruction: `evaluate("3 * 4")` is `Some(12)`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub async fn evaluate(&self, source: &str) -> EvalResult<Option<Value>> {
        self.run(source).await
    }

    async fn run(&self, source: &str) -> EvalResult<Option<Value>> {
        let _guard = self.control.begin()?;
        let program = logo_parse::parse(source)?;
        debug!(instructions = program.len(), "run started");

        let mut machine = Machine::new(
            self.global.clone(),
            Rc::clone(&self.control),
            self.print.clone(),
            self.max_depth,
        );
        machine.evaluate(program).await
    }

    /// Suspend the running program at its next checkpoint.
    pub fn pause(&self) -> EvalResult<()> {
        self.control.pause()
    }

    /// Logo's `continue`: resume a paused program.
    pub fn resume(&self) -> EvalResult<()> {
        self.control.resume()
    }

    /// Logo's `break`: stop the running program. The pending `execute`
    /// resolves as [`Outcome::Cancelled`].
    pub fn cancel(&self) -> EvalResult<()> {
        self.control.cancel()
    }

    pub fn state(&self) -> RunState {
        self.control.state()
    }

    /// A handle for steering runs from host code, including from inside
    /// host functions the running program calls.
    pub fn control(&self) -> ControlHandle {
        ControlHandle::new(Rc::clone(&self.control))
    }

    /// Bind a host function as a global procedure. Its arity is fixed by
    /// the closure's parameter count.
    pub fn bind(&self, name: &str, function: HostFunction) {
        debug!(name, arity = function.arity(), "bind host function");
        self.global
            .bind(name, native_value(NativeProcedure::host(name, function)));
    }

    /// Bind several host functions at once.
    pub fn bind_values<'n, I>(&self, bindings: I)
    where
        I: IntoIterator<Item = (&'n str, HostFunction)>,
    {
        for (name, function) in bindings {
            self.bind(name, function);
        }
    }

    /// Set a global variable, as `make` would at top level.
    pub fn set_variable(&self, name: &str, value: impl Into<Value>) {
        self.global.bind(name, value.into());
    }

    /// The value of a global variable or procedure.
    pub fn variable(&self, name: &str) -> Option<Value> {
        self.global.lookup(name)
    }

    pub fn global(&self) -> &Scope {
        &self.global
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
