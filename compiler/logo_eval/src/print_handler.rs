//! Where `print`, `show` and `type` send their text.
//!
//! The primitives hand over finished text: `print` and `show` as whole
//! lines, `type` as a fragment with no newline. The interpreter's
//! [`SharedPrintHandler`] forwards it to one sink:
//!
//! - stdout, flushed after every fragment so `type` output shows up
//!   before the line is finished
//! - a buffer that hosts and tests read back (or drain) themselves
//! - a host callback, handed every chunk as soon as it is printed
//! - nowhere
//!
//! The sinks are an enum rather than a trait object; hosts needing
//! anything else use the callback.

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

/// Writes to the process's stdout.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    fn emit(&self, text: &str, newline: bool) {
        let mut out = io::stdout().lock();
        let written = if newline {
            writeln!(out, "{text}")
        } else {
            out.write_all(text.as_bytes()).and_then(|()| out.flush())
        };
        if let Err(err) = written {
            warn!(%err, "stdout write failed");
        }
    }
}

/// Collects everything printed into one string.
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: Mutex::new(String::new()),
        }
    }

    fn emit(&self, text: &str, newline: bool) {
        let mut buffer = self.buffer.lock();
        buffer.push_str(text);
        if newline {
            buffer.push('\n');
        }
    }

    /// Everything printed so far.
    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Everything printed since the last drain, emptying the buffer.
    pub fn take_output(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Host-supplied sink. Receives each chunk of text exactly as printed,
/// including the trailing newline of a `print` line.
pub struct CallbackPrintHandler {
    callback: Box<dyn Fn(&str) + Send + Sync>,
}

impl CallbackPrintHandler {
    pub fn new(callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        CallbackPrintHandler {
            callback: Box::new(callback),
        }
    }

    fn emit(&self, text: &str, newline: bool) {
        if newline {
            (self.callback)(&format!("{text}\n"));
        } else {
            (self.callback)(text);
        }
    }
}

/// The sink behind a [`SharedPrintHandler`].
pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Callback(CallbackPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    /// A whole line: `print` and `show`.
    pub fn println(&self, msg: &str) {
        self.emit(msg, true);
    }

    /// A fragment with no newline: `type`.
    pub fn print(&self, msg: &str) {
        self.emit(msg, false);
    }

    fn emit(&self, text: &str, newline: bool) {
        match self {
            Self::Stdout(h) => h.emit(text, newline),
            Self::Buffer(h) => h.emit(text, newline),
            Self::Callback(h) => h.emit(text, newline),
            Self::Silent => {}
        }
    }

    /// Buffered output; empty for sinks that keep nothing.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Callback(_) | Self::Silent => String::new(),
        }
    }

    /// Drain buffered output; empty for sinks that keep nothing.
    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.take_output(),
            Self::Stdout(_) | Self::Callback(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

impl fmt::Debug for PrintHandlerImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stdout(_) => "Stdout",
            Self::Buffer(_) => "Buffer",
            Self::Callback(_) => "Callback",
            Self::Silent => "Silent",
        })
    }
}

/// The print sink an interpreter and its host share.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// A sink that forwards every chunk of text to `callback`.
pub fn callback_handler(callback: impl Fn(&str) + Send + Sync + 'static) -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Callback(CallbackPrintHandler::new(
        callback,
    )))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}

#[cfg(test)]
mod tests;
