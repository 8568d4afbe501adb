//! Host functions: Rust code callable from Logo.
//!
//! A host function's arity is the number of parameters of the Rust closure
//! it wraps, so `|distance: f64| ...` is a one-input procedure. Arity is
//! what the evaluator uses to gather inputs for an unparenthesized call, so
//! it must be fixed: there are no optional or rest parameters. A
//! parenthesized call with extra inputs passes only the first `arity`.
//!
//! ```text
//! interp.bind("forward", HostFunction::new(move |d: f64| turtle.forward(d)));
//! interp.bind("pendown?", HostFunction::new(move || turtle.is_down()));
//! ```
//!
//! Parameters convert from [`Value`] through [`FromValue`]; results convert
//! back through [`IntoOutput`]. [`HostFunction::asynchronous`] wraps a
//! future-returning closure instead, for hosts that need to wait (timers,
//! animation frames). Such waits are abandoned when the run is broken.

use std::fmt;
use std::future::Future;

use logo_ir::{List, Value};

use crate::control::Control;
use crate::errors::{cancelled, expected, not_enough_inputs, EvalError, EvalResult};
use crate::operators::{to_bool, to_number};
use crate::procedure::LocalBoxFuture;

type SyncHostFn = dyn Fn(Vec<Value>) -> EvalResult<Option<Value>>;
type AsyncHostFn = dyn Fn(Vec<Value>) -> LocalBoxFuture<'static, EvalResult<Option<Value>>>;

enum HostCall {
    Sync(Box<SyncHostFn>),
    Async(Box<AsyncHostFn>),
}

/// A Rust closure bound as a Logo procedure.
pub struct HostFunction {
    arity: usize,
    call: HostCall,
}

impl HostFunction {
    /// Wrap a synchronous closure; arity is its parameter count.
    pub fn new<Args, F>(func: F) -> Self
    where
        F: IntoHostFn<Args>,
    {
        HostFunction {
            arity: F::ARITY,
            call: HostCall::Sync(func.into_host_fn()),
        }
    }

    /// Wrap a closure returning a future. It receives exactly `arity`
    /// inputs. If the run is broken while the future is pending, the future
    /// is dropped and the run resolves as cancelled.
    pub fn asynchronous<F, Fut>(arity: usize, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + 'static,
        Fut: Future<Output = EvalResult<Option<Value>>> + 'static,
    {
        let call: Box<AsyncHostFn> = Box::new(
            move |args: Vec<Value>| -> LocalBoxFuture<'static, EvalResult<Option<Value>>> {
                Box::pin(func(args))
            },
        );
        HostFunction {
            arity,
            call: HostCall::Async(call),
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) async fn call(
        &self,
        args: Vec<Value>,
        control: &Control,
    ) -> EvalResult<Option<Value>> {
        match &self.call {
            HostCall::Sync(func) => func(args),
            HostCall::Async(func) => {
                let pending = func(args);
                tokio::select! {
                    result = pending => result,
                    () = control.cancelled() => Err(cancelled()),
                }
            }
        }
    }
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.call {
            HostCall::Sync(_) => "sync",
            HostCall::Async(_) => "async",
        };
        f.debug_struct("HostFunction")
            .field("arity", &self.arity)
            .field("kind", &kind)
            .finish()
    }
}

/// Conversion from a Logo input to a host parameter.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> EvalResult<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> EvalResult<Self> {
        Ok(value)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> EvalResult<Self> {
        to_number(&value).ok_or_else(|| expected("a number", &value))
    }
}

impl FromValue for i64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "fract() == 0 and range checked before the cast"
    )]
    fn from_value(value: Value) -> EvalResult<Self> {
        match to_number(&value) {
            Some(n) if n.fract() == 0.0 && n.abs() <= 9_007_199_254_740_992.0 => Ok(n as i64),
            _ => Err(expected("an integer", &value)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> EvalResult<Self> {
        to_bool(&value).ok_or_else(|| expected("true or false", &value))
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> EvalResult<Self> {
        if value.is_word() {
            Ok(value.to_string())
        } else {
            Err(expected("a word", &value))
        }
    }
}

impl FromValue for List {
    fn from_value(value: Value) -> EvalResult<Self> {
        match value {
            Value::List(list) => Ok(list),
            other => Err(expected("a list", &other)),
        }
    }
}

/// Conversion from a host result to a Logo output.
///
/// `()` and `None` output nothing, which makes the host function a command.
pub trait IntoOutput {
    fn into_output(self) -> EvalResult<Option<Value>>;
}

impl IntoOutput for () {
    fn into_output(self) -> EvalResult<Option<Value>> {
        Ok(None)
    }
}

impl IntoOutput for Value {
    fn into_output(self) -> EvalResult<Option<Value>> {
        Ok(Some(self))
    }
}

impl IntoOutput for Option<Value> {
    fn into_output(self) -> EvalResult<Option<Value>> {
        Ok(self)
    }
}

impl IntoOutput for f64 {
    fn into_output(self) -> EvalResult<Option<Value>> {
        Ok(Some(Value::Number(self)))
    }
}

impl IntoOutput for i64 {
    #[allow(clippy::cast_precision_loss, reason = "Logo numbers are f64")]
    fn into_output(self) -> EvalResult<Option<Value>> {
        Ok(Some(Value::Number(self as f64)))
    }
}

impl IntoOutput for bool {
    fn into_output(self) -> EvalResult<Option<Value>> {
        Ok(Some(Value::Boolean(self)))
    }
}

impl IntoOutput for String {
    fn into_output(self) -> EvalResult<Option<Value>> {
        Ok(Some(Value::from(self)))
    }
}

impl IntoOutput for List {
    fn into_output(self) -> EvalResult<Option<Value>> {
        Ok(Some(Value::List(self)))
    }
}

impl<T: IntoOutput> IntoOutput for Result<T, EvalError> {
    fn into_output(self) -> EvalResult<Option<Value>> {
        self?.into_output()
    }
}

/// Closures usable as synchronous host functions.
///
/// Implemented for `Fn` closures of up to six [`FromValue`] parameters
/// returning an [`IntoOutput`]. `Args` is the parameter tuple; it only
/// exists to keep the per-arity impls apart.
pub trait IntoHostFn<Args> {
    const ARITY: usize;

    #[doc(hidden)]
    fn into_host_fn(self) -> Box<SyncHostFn>;
}

macro_rules! impl_into_host_fn {
    ($arity:expr $(, $v:ident : $A:ident)*) => {
        impl<F, R, $($A,)*> IntoHostFn<($($A,)*)> for F
        where
            F: Fn($($A),*) -> R + 'static,
            $($A: FromValue,)*
            R: IntoOutput,
        {
            const ARITY: usize = $arity;

            #[allow(unused_mut, unused_variables)]
            fn into_host_fn(self) -> Box<SyncHostFn> {
                Box::new(move |args: Vec<Value>| {
                    let mut args = args.into_iter();
                    $(
                        let $v = $A::from_value(
                            args.next().ok_or_else(|| not_enough_inputs("host function"))?,
                        )?;
                    )*
                    self($($v),*).into_output()
                })
            }
        }
    };
}

impl_into_host_fn!(0);
impl_into_host_fn!(1, a0: A0);
impl_into_host_fn!(2, a0: A0, a1: A1);
impl_into_host_fn!(3, a0: A0, a1: A1, a2: A2);
impl_into_host_fn!(4, a0: A0, a1: A1, a2: A2, a3: A3);
impl_into_host_fn!(5, a0: A0, a1: A1, a2: A2, a3: A3, a4: A4);
impl_into_host_fn!(6, a0: A0, a1: A1, a2: A2, a3: A3, a4: A4, a5: A5);

#[cfg(test)]
mod tests;
