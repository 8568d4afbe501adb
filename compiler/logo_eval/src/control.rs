//! Cooperative pause / resume / break.
//!
//! A run is a future. Every checkpoint the evaluator passes (each procedure
//! call, each literal or variable read, each loop iteration) awaits
//! [`Control::checkpoint`], which completes at once unless the host has
//! paused or broken the run:
//!
//! ```text
//!   Idle ──execute──▶ Running ◀──resume── Paused
//!                       │  └────pause────▶  │
//!                       └──cancel──▶ Cancelling ◀──cancel──┘
//! ```
//!
//! A paused checkpoint parks on a [`Notify`] until `resume` or `cancel`
//! wakes it. A cancelled checkpoint fails with a `Cancelled` error that
//! unwinds the run. Whatever way the run ends, [`RunGuard`] puts the state
//! back to `Idle`.

use std::cell::Cell;
use std::rc::Rc;

use tokio::sync::Notify;
use tracing::debug;

use crate::errors::{
    already_breaking, already_paused, already_running, cancelled, not_paused, not_running,
    EvalResult,
};

/// Where the interpreter is in its run lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Paused,
    /// `cancel` was requested; the run is unwinding.
    Cancelling,
}

/// Shared run-state machine.
#[derive(Debug)]
pub(crate) struct Control {
    state: Cell<RunState>,
    wake: Notify,
}

impl Control {
    pub(crate) fn new() -> Self {
        Control {
            state: Cell::new(RunState::Idle),
            wake: Notify::new(),
        }
    }

    #[inline]
    pub(crate) fn state(&self) -> RunState {
        self.state.get()
    }

    /// Enter `Running`. Fails if a run is already in flight.
    pub(crate) fn begin(self: &Rc<Self>) -> EvalResult<RunGuard> {
        if self.state() != RunState::Idle {
            return Err(already_running());
        }
        self.transition(RunState::Running);
        Ok(RunGuard {
            control: Rc::clone(self),
        })
    }

    pub(crate) fn pause(&self) -> EvalResult<()> {
        match self.state() {
            RunState::Running => {
                self.transition(RunState::Paused);
                Ok(())
            }
            RunState::Paused => Err(already_paused()),
            RunState::Cancelling => Err(already_breaking()),
            RunState::Idle => Err(not_running()),
        }
    }

    pub(crate) fn resume(&self) -> EvalResult<()> {
        match self.state() {
            RunState::Paused => {
                self.transition(RunState::Running);
                self.wake.notify_waiters();
                Ok(())
            }
            RunState::Running => Err(not_paused()),
            RunState::Cancelling => Err(already_breaking()),
            RunState::Idle => Err(not_running()),
        }
    }

    pub(crate) fn cancel(&self) -> EvalResult<()> {
        match self.state() {
            RunState::Running | RunState::Paused => {
                self.transition(RunState::Cancelling);
                self.wake.notify_waiters();
                Ok(())
            }
            RunState::Cancelling => Err(already_breaking()),
            RunState::Idle => Err(not_running()),
        }
    }

    /// Suspension point. Waits while paused, fails once cancelled.
    pub(crate) async fn checkpoint(&self) -> EvalResult<()> {
        loop {
            // Register before reading the state so a wakeup between the
            // read and the await is not lost.
            let notified = self.wake.notified();
            match self.state() {
                RunState::Cancelling => return Err(cancelled()),
                RunState::Paused => notified.await,
                RunState::Running | RunState::Idle => return Ok(()),
            }
        }
    }

    /// Completes once the run is cancelled. Raced against host waits.
    pub(crate) async fn cancelled(&self) {
        loop {
            let notified = self.wake.notified();
            if self.state() == RunState::Cancelling {
                return;
            }
            notified.await;
        }
    }

    fn transition(&self, to: RunState) {
        let from = self.state.replace(to);
        debug!(?from, ?to, "run state");
    }
}

/// Resets the run state to `Idle` however the run ends.
pub(crate) struct RunGuard {
    control: Rc<Control>,
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.control.transition(RunState::Idle);
        self.control.wake.notify_waiters();
    }
}

/// Host-side handle for steering a running program.
///
/// Cheap to clone; every clone steers the same interpreter. `resume` and
/// `cancel` are Logo's `continue` and `break`.
#[derive(Clone, Debug)]
pub struct ControlHandle {
    control: Rc<Control>,
}

impl ControlHandle {
    pub(crate) fn new(control: Rc<Control>) -> Self {
        ControlHandle { control }
    }

    /// Suspend the run at its next checkpoint.
    pub fn pause(&self) -> EvalResult<()> {
        self.control.pause()
    }

    /// Continue a paused run from the checkpoint it stopped at.
    pub fn resume(&self) -> EvalResult<()> {
        self.control.resume()
    }

    /// Break the run. The pending `execute` resolves as cancelled.
    pub fn cancel(&self) -> EvalResult<()> {
        self.control.cancel()
    }

    pub fn state(&self) -> RunState {
        self.control.state()
    }

    /// `true` from the start of `execute` until it resolves, paused or not.
    pub fn is_running(&self) -> bool {
        self.state() != RunState::Idle
    }

    pub fn is_paused(&self) -> bool {
        self.state() == RunState::Paused
    }
}
