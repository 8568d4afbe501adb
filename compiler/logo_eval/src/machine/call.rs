//! Procedure dispatch and template application.

use logo_ir::{List, Procedure, Value, QUOTE, VARIABLE_PREFIX};
use tracing::trace;

use super::Machine;
use crate::environment::Scope;
use crate::errors::{
    bad_template, depth_exceeded, dont_say_what_to_do, not_a_procedure, not_enough_inputs,
    EvalResult,
};
use crate::procedure::{DefinedProcedure, LocalBoxFuture, NativeProcedure};

impl Machine {
    /// Call `procedure` with evaluated inputs.
    pub(crate) fn call_procedure(
        &mut self,
        procedure: Procedure,
        args: Vec<Value>,
    ) -> LocalBoxFuture<'_, EvalResult<Option<Value>>> {
        Box::pin(async move {
            self.checkpoint().await?;
            trace!(name = procedure.name(), args = args.len(), "call");

            if let Some(native) = procedure.downcast_ref::<NativeProcedure>() {
                return native.invoke(self, args).await;
            }
            match procedure.downcast_ref::<DefinedProcedure>() {
                Some(defined) => self.invoke_defined(defined, args).await,
                None => Err(not_a_procedure(procedure.name())),
            }
        })
    }

    /// Run a Logo-defined procedure in a fresh activation.
    ///
    /// The activation's scope is a child of the caller's current scope, so
    /// the callee sees the caller's locals.
    async fn invoke_defined(
        &mut self,
        procedure: &DefinedProcedure,
        args: Vec<Value>,
    ) -> EvalResult<Option<Value>> {
        if self.depth() >= self.max_depth {
            return Err(depth_exceeded(self.max_depth));
        }

        let scope = self.current_scope().child();
        for (param, arg) in procedure.params().iter().zip(args) {
            scope.declare(param, Some(arg));
        }

        let mut scoped = self.activation(scope);
        if let Some(value) = scoped.evaluate(procedure.body().clone()).await? {
            return Err(dont_say_what_to_do(&value));
        }
        Ok(scoped.take_output())
    }

    /// Take the `output` of the innermost activation.
    pub(crate) fn take_output(&mut self) -> Option<Value> {
        self.contexts.last_mut().and_then(|context| context.take_output())
    }

    /// Apply a template to `args` on behalf of `caller`.
    ///
    /// A template is a procedure name, a procedure value, or a list
    /// `[[params...] body...]`. A list template runs its body in a child of
    /// the current scope with the parameters bound positionally; it shares
    /// the enclosing activation's context, so `output` inside it returns
    /// from the procedure that applied it.
    pub(crate) fn apply_template<'a>(
        &'a mut self,
        caller: &'a str,
        template: &'a Value,
        args: Vec<Value>,
    ) -> LocalBoxFuture<'a, EvalResult<Option<Value>>> {
        Box::pin(async move {
            let procedure = match template {
                Value::Procedure(procedure) => procedure.clone(),
                Value::Text(name) => {
                    let name: &str = name;
                    self.resolve_procedure(name.strip_prefix(QUOTE).unwrap_or(name))?
                }
                Value::List(list) => return self.apply_list_template(caller, list, args).await,
                other => return Err(bad_template(caller, other)),
            };
            if args.len() < procedure.arity() {
                return Err(not_enough_inputs(procedure.name()));
            }
            self.call_procedure(procedure, args).await
        })
    }

    async fn apply_list_template(
        &mut self,
        caller: &str,
        template: &List,
        args: Vec<Value>,
    ) -> EvalResult<Option<Value>> {
        let Some(Value::List(params)) = template.head() else {
            return Err(bad_template(caller, &Value::List(template.clone())));
        };
        if args.len() < params.len() {
            return Err(not_enough_inputs(caller));
        }

        let scope = self.current_scope().child();
        bind_params(&scope, caller, params, args)?;
        let mut scoped = self.scoped(scope);
        scoped.evaluate(template.tail()).await
    }
}

/// Bind template parameter words positionally. `:x` and `"x` are accepted
/// as spellings of `x`.
fn bind_params(scope: &Scope, caller: &str, params: &List, args: Vec<Value>) -> EvalResult<()> {
    for (param, arg) in params.iter().zip(args) {
        let Some(name) = param.as_text() else {
            return Err(bad_template(caller, param));
        };
        let name = name
            .strip_prefix(VARIABLE_PREFIX)
            .or_else(|| name.strip_prefix(QUOTE))
            .unwrap_or(name);
        scope.declare(name, Some(arg));
    }
    Ok(())
}
