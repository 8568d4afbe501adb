//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::rc::Rc;

use super::Interpreter;
use crate::control::Control;
use crate::environment::Scope;
use crate::primitives;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Nested procedure activations allowed before a run fails.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Builder for creating Interpreter instances.
///
/// ```text
/// let interp = Interpreter::builder()
///     .print_handler(buffer_handler())
///     .max_depth(500)
///     .build();
/// ```
#[derive(Debug)]
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_depth: usize,
    primitives: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            print_handler: None,
            max_depth: DEFAULT_MAX_DEPTH,
            primitives: true,
        }
    }

    /// Set where `print`, `show` and `type` write. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the maximum depth of nested procedure activations.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Whether to bind the built-in primitives. Without them only host
    /// functions and procedures defined with `to` exist, and `to` itself
    /// is gone, so this is mostly for hosts that bind their own.
    #[must_use]
    pub fn primitives(mut self, enabled: bool) -> Self {
        self.primitives = enabled;
        self
    }

    pub fn build(self) -> Interpreter {
        let global = Scope::new();
        if self.primitives {
            primitives::register(&global);
        }
        Interpreter {
            global,
            control: Rc::new(Control::new()),
            print: self.print_handler.unwrap_or_else(stdout_handler),
            max_depth: self.max_depth,
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
