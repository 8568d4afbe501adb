//! Concrete procedure kinds.
//!
//! Both kinds are stored as [`logo_ir::Procedure`] values and recovered by
//! the evaluator with `downcast_ref`:
//!
//! - [`NativeProcedure`]: a primitive or host function with a fixed arity
//! - [`DefinedProcedure`]: a procedure written in Logo with `to`
//!
//! Defined procedures capture no scope. A call's scope is parented to the
//! caller's current scope, so a procedure sees the locals of every
//! activation that led to it (dynamic scoping).

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use logo_ir::{Callable, List, Procedure, Value};

use crate::errors::EvalResult;
use crate::host::HostFunction;
use crate::machine::Machine;

/// Boxed, non-`Send` future; the evaluator runs on a single thread.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A primitive that completes without awaiting.
pub(crate) type PrimitiveFn = fn(&mut Machine, Vec<Value>) -> EvalResult<Option<Value>>;

/// A primitive that evaluates Logo code or waits.
pub(crate) type ControlFn =
    for<'m> fn(&'m mut Machine, Vec<Value>) -> LocalBoxFuture<'m, EvalResult<Option<Value>>>;

#[derive(Clone)]
pub(crate) enum NativeFn {
    Primitive(PrimitiveFn),
    Control(ControlFn),
    Host(Rc<HostFunction>),
}

/// A procedure implemented in Rust.
#[derive(Clone)]
pub(crate) struct NativeProcedure {
    name: Rc<str>,
    arity: usize,
    /// Accepts every input of a parenthesized call, not just `arity`.
    variadic: bool,
    func: NativeFn,
}

impl NativeProcedure {
    pub(crate) fn primitive(name: &str, arity: usize, func: PrimitiveFn) -> Self {
        NativeProcedure {
            name: Rc::from(name),
            arity,
            variadic: false,
            func: NativeFn::Primitive(func),
        }
    }

    pub(crate) fn control(name: &str, arity: usize, func: ControlFn) -> Self {
        NativeProcedure {
            name: Rc::from(name),
            arity,
            variadic: false,
            func: NativeFn::Control(func),
        }
    }

    pub(crate) fn host(name: &str, func: HostFunction) -> Self {
        NativeProcedure {
            name: Rc::from(name),
            arity: func.arity(),
            variadic: false,
            func: NativeFn::Host(Rc::new(func)),
        }
    }

    /// Pass every input of a parenthesized call through, e.g. `(sum 1 2 3)`.
    #[must_use]
    pub(crate) fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Call with already-evaluated inputs. Extra inputs from a parenthesized
    /// call are dropped unless the procedure is variadic.
    pub(crate) async fn invoke(
        &self,
        machine: &mut Machine,
        mut args: Vec<Value>,
    ) -> EvalResult<Option<Value>> {
        if !self.variadic {
            args.truncate(self.arity);
        }
        match &self.func {
            NativeFn::Primitive(func) => func(machine, args),
            NativeFn::Control(func) => func(machine, args).await,
            NativeFn::Host(host) => host.call(args, machine.control()).await,
        }
    }
}

impl fmt::Debug for NativeProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeProcedure")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("variadic", &self.variadic)
            .finish_non_exhaustive()
    }
}

impl Callable for NativeProcedure {
    fn name(&self) -> &str {
        &self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A procedure defined in Logo.
#[derive(Debug)]
pub(crate) struct DefinedProcedure {
    name: Rc<str>,
    params: Vec<Rc<str>>,
    body: List,
}

impl DefinedProcedure {
    pub(crate) fn new(name: &str, params: Vec<Rc<str>>, body: List) -> Self {
        DefinedProcedure {
            name: Rc::from(name),
            params,
            body,
        }
    }

    pub(crate) fn params(&self) -> &[Rc<str>] {
        &self.params
    }

    pub(crate) fn body(&self) -> &List {
        &self.body
    }
}

impl Callable for DefinedProcedure {
    fn name(&self) -> &str {
        &self.name
    }

    fn arity(&self) -> usize {
        self.params.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Wrap a native procedure as a Logo value.
pub(crate) fn native_value(procedure: NativeProcedure) -> Value {
    Value::Procedure(Procedure::new(procedure))
}
