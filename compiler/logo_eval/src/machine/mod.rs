//! The tree-walking evaluator.
//!
//! A [`Machine`] lives for one run. It walks program lists with a
//! [`ListCursor`] and keeps the dynamic state of that run: the stack of
//! scopes (innermost last), the stack of activation [`Context`]s and the
//! `repeat` counters.
//!
//! # Reading an instruction
//!
//! Procedure calls have no delimiters, so how much of the list one
//! instruction covers depends on arities known only at run time:
//!
//! - a word names a procedure; exactly `arity` inputs follow it, each a
//!   full expression (`forward 10 + 5` gives `forward` the input 15)
//! - `( name inputs... )` gathers inputs up to the `)`, at least `arity`
//! - `( expression )` groups
//! - infix operators combine operands by precedence: comparisons, then
//!   `+ -`, then `* /`
//!
//! Because every input is a full expression, a call nested inside an infix
//! expression swallows the operators after it: `:x * y :a + :b` is
//! `:x * (y (:a + :b))`.
//!
//! # Checkpoints
//!
//! Every literal, every variable read and every procedure call awaits the
//! run's checkpoint before it proceeds. That is where a paused run parks
//! and a broken run starts unwinding.
//!
//! Loops (`repeat`, `forever`, `foreach` and `map`) also go through
//! [`Machine::iteration`] once per pass. It first yields to the tokio
//! executor and then checkpoints, so a loop body adds one executor yield
//! and one checkpoint on top of those its instructions already await. The
//! yield is what lets timers and signal handlers on the same thread run
//! while a program loops without awaiting anything else.

mod call;
mod scope_guard;

use std::rc::Rc;

use logo_ir::{BinaryOp, List, ListCursor, Procedure, Token, Value};
use logo_stack::StackSafe;
use smallvec::SmallVec;

use crate::context::Context;
use crate::control::Control;
use crate::environment::Scope;
use crate::errors::{
    didnt_output, dont_say_what_to_do, missing_close_paren, not_a_procedure, not_enough_inputs,
    outside_procedure, too_much_inside_parens, unbound_procedure, unbound_variable, unexpected,
    EvalResult,
};
use crate::operators::{evaluate_binary, negate};
use crate::print_handler::SharedPrintHandler;
use crate::procedure::LocalBoxFuture;

/// Evaluation state for a single run.
pub(crate) struct Machine {
    global: Scope,
    scopes: Vec<Scope>,
    contexts: Vec<Context>,
    repcounts: SmallVec<[i64; 4]>,
    control: Rc<Control>,
    print: SharedPrintHandler,
    max_depth: usize,
}

impl Machine {
    pub(crate) fn new(
        global: Scope,
        control: Rc<Control>,
        print: SharedPrintHandler,
        max_depth: usize,
    ) -> Self {
        Machine {
            global,
            scopes: Vec::new(),
            contexts: Vec::new(),
            repcounts: SmallVec::new(),
            control,
            print,
            max_depth,
        }
    }

    #[inline]
    pub(crate) fn global(&self) -> &Scope {
        &self.global
    }

    /// The innermost live scope.
    #[inline]
    pub(crate) fn current_scope(&self) -> &Scope {
        self.scopes.last().unwrap_or(&self.global)
    }

    #[inline]
    pub(crate) fn control(&self) -> &Control {
        &self.control
    }

    #[inline]
    pub(crate) fn print(&self) -> &SharedPrintHandler {
        &self.print
    }

    /// The enclosing activation's context. `name` is the primitive asking,
    /// for the error when there is no activation.
    pub(crate) fn context_mut(&mut self, name: &str) -> EvalResult<&mut Context> {
        self.contexts.last_mut().ok_or_else(|| outside_procedure(name))
    }

    /// Has `output` or `stop` ended the current activation?
    #[inline]
    pub(crate) fn is_stopped(&self) -> bool {
        self.contexts.last().is_some_and(Context::is_stopped)
    }

    /// The innermost `repeat` iteration number, or -1 outside any `repeat`.
    pub(crate) fn repcount(&self) -> i64 {
        self.repcounts.last().copied().unwrap_or(-1)
    }

    pub(crate) fn push_repcount(&mut self) {
        self.repcounts.push(0);
    }

    pub(crate) fn set_repcount(&mut self, count: i64) {
        if let Some(top) = self.repcounts.last_mut() {
            *top = count;
        }
    }

    pub(crate) fn pop_repcount(&mut self) {
        self.repcounts.pop();
    }

    #[inline]
    pub(crate) async fn checkpoint(&self) -> EvalResult<()> {
        self.control.checkpoint().await
    }

    /// Loop iteration boundary: give the executor a turn, then checkpoint.
    /// Lets host tasks (timers, signal handlers) steer a program that is
    /// looping without waiting on anything.
    pub(crate) async fn iteration(&self) -> EvalResult<()> {
        tokio::task::yield_now().await;
        self.checkpoint().await
    }

    /// Run every instruction in `list`.
    ///
    /// Yields the value of the final instruction if it produced one. A value
    /// followed by further instructions has nowhere to go and is an error.
    /// Stops early once the current activation is stopped.
    pub(crate) async fn evaluate(&mut self, list: List) -> EvalResult<Option<Value>> {
        let mut cursor = ListCursor::new(list);
        while !cursor.is_at_end() {
            let value = self.eval_expression(&mut cursor).await?;
            if self.is_stopped() {
                return Ok(None);
            }
            if let Some(value) = value {
                if !cursor.is_at_end() {
                    return Err(dont_say_what_to_do(&value));
                }
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Evaluate one full expression: an operand followed by any chain of
    /// infix operators, reduced by precedence (operator-precedence
    /// parsing over the live cursor).
    async fn eval_expression(&mut self, cursor: &mut ListCursor) -> EvalResult<Option<Value>> {
        let first = self.eval_operand(cursor).await?;
        let Some(op) = peek_operator(cursor) else {
            return Ok(first);
        };
        let first = first.ok_or_else(|| not_enough_inputs(op.symbol()))?;

        let mut operands: SmallVec<[Value; 4]> = SmallVec::new();
        let mut operators: SmallVec<[BinaryOp; 4]> = SmallVec::new();
        operands.push(first);

        while let Some(op) = peek_operator(cursor) {
            cursor.next();
            while operators
                .last()
                .is_some_and(|top| top.precedence() >= op.precedence())
            {
                reduce(&mut operands, &mut operators)?;
            }
            operators.push(op);

            if at_input_end(cursor) {
                return Err(not_enough_inputs(op.symbol()));
            }
            // One operand only; the operator stack owns the rest of the chain.
            let producer = cursor.peek().cloned();
            let Some(rhs) = self.eval_operand(cursor).await? else {
                let producer = producer.map_or_else(String::new, |value| value.to_string());
                return Err(didnt_output(&producer, op.symbol()));
            };
            operands.push(rhs);
        }
        while !operators.is_empty() {
            reduce(&mut operands, &mut operators)?;
        }
        Ok(operands.pop())
    }

    /// Evaluate one operand: a literal, variable, group, unary minus or a
    /// complete procedure call.
    fn eval_operand<'a>(
        &'a mut self,
        cursor: &'a mut ListCursor,
    ) -> LocalBoxFuture<'a, EvalResult<Option<Value>>> {
        Box::pin(StackSafe::new(Box::pin(async move {
            let Some(item) = cursor.next() else {
                return Err(unexpected("end of line"));
            };
            match Token::classify(&item) {
                Token::Literal(value) => {
                    self.checkpoint().await?;
                    Ok(Some(value.clone()))
                }
                Token::Quoted(word) => {
                    self.checkpoint().await?;
                    Ok(Some(Value::text(word)))
                }
                Token::Variable(name) => {
                    self.checkpoint().await?;
                    self.lookup_variable(name).map(Some)
                }
                Token::OpenParen => self.eval_paren(cursor).await,
                Token::CloseParen => Err(unexpected(")")),
                Token::Operator(BinaryOp::Sub) => {
                    if at_input_end(cursor) {
                        return Err(not_enough_inputs("-"));
                    }
                    let operand = self.eval_operand(cursor).await?;
                    let operand = operand.ok_or_else(|| not_enough_inputs("-"))?;
                    negate(&operand).map(Some)
                }
                Token::Operator(op) => Err(unexpected(op.symbol())),
                Token::Word(name) => {
                    let procedure = self.resolve_procedure(name)?;
                    let args = self.gather_inputs(&procedure, cursor).await?;
                    self.call_procedure(procedure, args).await
                }
            }
        })))
    }

    /// After `(`: an explicit call up to the matching `)`, or a group.
    async fn eval_paren(&mut self, cursor: &mut ListCursor) -> EvalResult<Option<Value>> {
        let head = match cursor.peek().map(Token::classify) {
            Some(Token::Word(name)) => Some(self.resolve_procedure(name)?),
            _ => None,
        };

        if let Some(procedure) = head {
            cursor.next();
            let mut args = Vec::with_capacity(procedure.arity());
            loop {
                match cursor.peek().map(Token::classify) {
                    None => return Err(missing_close_paren()),
                    Some(Token::CloseParen) => {
                        cursor.next();
                        break;
                    }
                    Some(_) => args.push(self.eval_input(cursor, procedure.name()).await?),
                }
            }
            if args.len() < procedure.arity() {
                return Err(not_enough_inputs(procedure.name()));
            }
            return self.call_procedure(procedure, args).await;
        }

        if at_input_end(cursor) {
            return Err(match cursor.peek() {
                Some(_) => unexpected(")"),
                None => missing_close_paren(),
            });
        }
        let value = self.eval_expression(cursor).await?;
        match cursor.peek().map(Token::classify) {
            Some(Token::CloseParen) => {
                cursor.next();
                Ok(value)
            }
            Some(_) => Err(too_much_inside_parens()),
            None => Err(missing_close_paren()),
        }
    }

    /// Gather exactly `arity` inputs for an unparenthesized call.
    async fn gather_inputs(
        &mut self,
        procedure: &Procedure,
        cursor: &mut ListCursor,
    ) -> EvalResult<Vec<Value>> {
        let arity = procedure.arity();
        let mut args = Vec::with_capacity(arity);
        for _ in 0..arity {
            if at_input_end(cursor) {
                return Err(not_enough_inputs(procedure.name()));
            }
            args.push(self.eval_input(cursor, procedure.name()).await?);
        }
        Ok(args)
    }

    /// Evaluate an expression that must produce a value for `consumer`.
    async fn eval_input(&mut self, cursor: &mut ListCursor, consumer: &str) -> EvalResult<Value> {
        let producer = cursor.peek().cloned();
        match self.eval_expression(cursor).await? {
            Some(value) => Ok(value),
            None => {
                let producer = producer.map_or_else(String::new, |value| value.to_string());
                Err(didnt_output(&producer, consumer))
            }
        }
    }

    fn lookup_variable(&self, name: &str) -> EvalResult<Value> {
        self.current_scope()
            .lookup(name)
            .ok_or_else(|| unbound_variable(name))
    }

    /// The procedure bound to `name` in the current scope chain.
    pub(crate) fn resolve_procedure(&self, name: &str) -> EvalResult<Procedure> {
        let binding = self
            .current_scope()
            .resolve(name)
            .ok_or_else(|| unbound_procedure(name))?;
        match binding.get() {
            Some(Value::Procedure(procedure)) => Ok(procedure),
            Some(_) => Err(not_a_procedure(name)),
            None => Err(unbound_procedure(name)),
        }
    }
}

fn peek_operator(cursor: &ListCursor) -> Option<BinaryOp> {
    match cursor.peek().map(Token::classify) {
        Some(Token::Operator(op)) => Some(op),
        _ => None,
    }
}

/// No more inputs can be read here: end of list or a closing paren.
fn at_input_end(cursor: &ListCursor) -> bool {
    matches!(
        cursor.peek().map(Token::classify),
        None | Some(Token::CloseParen)
    )
}

/// Apply the topmost operator to the two topmost operands.
fn reduce(
    operands: &mut SmallVec<[Value; 4]>,
    operators: &mut SmallVec<[BinaryOp; 4]>,
) -> EvalResult<()> {
    let Some(op) = operators.pop() else {
        return Ok(());
    };
    let (Some(rhs), Some(lhs)) = (operands.pop(), operands.pop()) else {
        return Err(not_enough_inputs(op.symbol()));
    };
    operands.push(evaluate_binary(op, &lhs, &rhs)?);
    Ok(())
}
