//! Stack safety utilities for deep recursion.
//!
//! Logo programs recurse freely (`factorial`, tree drawings, list walkers),
//! and both the parser and the evaluator follow that recursion on the native
//! stack. This crate grows the stack on demand so deeply nested programs do
//! not overflow it.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).
//!
//! # Usage
//!
//! Synchronous recursion wraps the recursive call:
//!
//! ```text
//! fn parse_list(&mut self) -> Result<List, ParseError> {
//!     ensure_sufficient_stack(|| self.parse_list_inner())
//! }
//! ```
//!
//! The evaluator is `async`, so its recursion happens inside nested
//! `poll` calls rather than nested function calls. [`StackSafe`] wraps a
//! future and runs each `poll` under [`ensure_sufficient_stack`].
//!
//! # Configuration
//!
//! - **Red zone**: 100KB - If less than this remains, we grow the stack
//! - **Growth size**: 1MB - Each growth allocates this much additional space

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, this will
/// allocate additional stack space before calling `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Future adapter that polls its inner future with stack growth enabled.
///
/// The inner future must be `Unpin` (a boxed future is the usual choice),
/// which keeps the adapter free of pin projection.
#[must_use = "futures do nothing unless polled"]
pub struct StackSafe<F> {
    inner: F,
}

impl<F> StackSafe<F>
where
    F: Future + Unpin,
{
    /// Wrap `inner` so every poll runs under [`ensure_sufficient_stack`].
    pub fn new(inner: F) -> Self {
        StackSafe { inner }
    }
}

impl<F> Future for StackSafe<F>
where
    F: Future + Unpin,
{
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let inner = &mut self.inner;
        ensure_sufficient_stack(|| Pin::new(inner).poll(cx))
    }
}
