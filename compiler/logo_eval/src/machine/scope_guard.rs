//! RAII guards for the machine's scope and context stacks.
//!
//! A procedure activation pushes a scope and a [`Context`]; a template
//! application pushes only a scope and keeps reporting `output` to the
//! enclosing activation. Either way the guard pops what it pushed when it
//! is dropped, which covers early returns through `?` and runs abandoned
//! mid-`await` by a break.
//!
//! ```text
//! let mut scoped = machine.activation(machine.current_scope().child());
//! scoped.current_scope().bind("size", value);
//! scoped.evaluate(body).await?;
//! // scope and context popped here
//! ```

use std::ops::{Deref, DerefMut};

use super::Machine;
use crate::context::Context;
use crate::environment::Scope;

/// Access the machine through this guard; it implements `Deref` and
/// `DerefMut`.
pub(crate) struct ScopedMachine<'m> {
    machine: &'m mut Machine,
    activation: bool,
}

impl Drop for ScopedMachine<'_> {
    fn drop(&mut self) {
        self.machine.scopes.pop();
        if self.activation {
            self.machine.contexts.pop();
        }
    }
}

impl Deref for ScopedMachine<'_> {
    type Target = Machine;

    fn deref(&self) -> &Self::Target {
        self.machine
    }
}

impl DerefMut for ScopedMachine<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.machine
    }
}

impl Machine {
    /// Enter a procedure activation: `scope` becomes current and a fresh
    /// context receives its `output` and `stop`.
    pub(crate) fn activation(&mut self, scope: Scope) -> ScopedMachine<'_> {
        self.scopes.push(scope);
        self.contexts.push(Context::new());
        ScopedMachine {
            machine: self,
            activation: true,
        }
    }

    /// Make `scope` current while sharing the enclosing context.
    pub(crate) fn scoped(&mut self, scope: Scope) -> ScopedMachine<'_> {
        self.scopes.push(scope);
        ScopedMachine {
            machine: self,
            activation: false,
        }
    }

    /// Number of live procedure activations.
    pub(crate) fn depth(&self) -> usize {
        self.contexts.len()
    }
}
