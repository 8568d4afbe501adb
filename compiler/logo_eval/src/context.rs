//! Per-activation signal record.

use logo_ir::Value;

/// One record per procedure activation.
///
/// `output` and `stop` are the only ways a procedure body ends early. Nested
/// blocks (`if`, `repeat`, templates) run against the same record as the
/// activation that contains them, so a `stop` inside a block ends the whole
/// procedure.
#[derive(Debug, Default)]
pub struct Context {
    output: Option<Value>,
    stop: bool,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the return value and end the activation.
    pub fn output(&mut self, value: Value) {
        self.output = Some(value);
        self.stop = true;
    }

    /// End the activation without a value.
    pub fn stop(&mut self) {
        self.stop = true;
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stop
    }

    /// Take the activation's return value.
    pub fn take_output(&mut self) -> Option<Value> {
        self.output.take()
    }
}
