use super::*;
use crate::errors::ErrorKind;
use std::rc::Rc;

fn call_sync(function: &HostFunction, args: Vec<Value>) -> EvalResult<Option<Value>> {
    match &function.call {
        HostCall::Sync(func) => func(args),
        HostCall::Async(_) => panic!("expected a synchronous host function"),
    }
}

#[test]
fn arity_follows_closure_parameters() {
    assert_eq!(HostFunction::new(|| ()).arity(), 0);
    assert_eq!(HostFunction::new(|_: f64| ()).arity(), 1);
    assert_eq!(HostFunction::new(|_: f64, _: String, _: bool| ()).arity(), 3);
    assert_eq!(HostFunction::asynchronous(2, |_| async { Ok(None) }).arity(), 2);
}

#[test]
fn numbers_convert_in_and_out() {
    let double = HostFunction::new(|x: f64| x * 2.0);
    assert_eq!(
        call_sync(&double, vec![Value::Number(4.0)]),
        Ok(Some(Value::Number(8.0)))
    );
    assert_eq!(
        call_sync(&double, vec![Value::text("4")]),
        Ok(Some(Value::Number(8.0)))
    );
}

#[test]
fn wrong_input_type_is_type_error() {
    let double = HostFunction::new(|x: f64| x * 2.0);
    let err = call_sync(&double, vec![Value::text("abc")]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);
    assert_eq!(err.message, "expected a number, got abc");
}

#[test]
fn integers_must_be_integral() {
    let f = HostFunction::new(|n: i64| n + 1);
    assert_eq!(call_sync(&f, vec![Value::Number(2.0)]), Ok(Some(Value::Number(3.0))));
    assert!(call_sync(&f, vec![Value::Number(2.5)]).is_err());
}

#[test]
fn unit_result_is_a_command() {
    let f = HostFunction::new(|_: Value| ());
    assert_eq!(call_sync(&f, vec![Value::Boolean(true)]), Ok(None));
}

#[test]
fn words_and_lists() {
    let join = HostFunction::new(|a: String, b: String| format!("{a}{b}"));
    assert_eq!(
        call_sync(&join, vec![Value::text("ab"), Value::Number(3.0)]),
        Ok(Some(Value::text("ab3")))
    );

    let count = HostFunction::new(|list: List| list.len() as f64);
    let list = List::from(vec![Value::Number(1.0), Value::Number(2.0)]);
    assert_eq!(
        call_sync(&count, vec![Value::List(list)]),
        Ok(Some(Value::Number(2.0)))
    );
    assert!(call_sync(&count, vec![Value::text("x")]).is_err());
}

#[test]
fn result_errors_propagate() {
    let fail = HostFunction::new(|| -> EvalResult<f64> {
        Err(EvalError::new(ErrorKind::Type, "no turtle"))
    });
    assert_eq!(
        call_sync(&fail, vec![]).unwrap_err().message,
        "no turtle".to_string()
    );
}

#[test]
fn missing_input_is_reported() {
    let f = HostFunction::new(|_: f64, _: f64| ());
    assert_eq!(
        call_sync(&f, vec![Value::Number(1.0)]).unwrap_err().kind,
        ErrorKind::Structural
    );
}

#[tokio::test]
async fn async_host_function_completes() {
    let control = Rc::new(Control::new());
    let f = HostFunction::asynchronous(1, |args| async move {
        tokio::task::yield_now().await;
        Ok(args.into_iter().next())
    });
    let result = f.call(vec![Value::Number(7.0)], &control).await;
    assert_eq!(result, Ok(Some(Value::Number(7.0))));
}

#[tokio::test]
async fn async_host_function_is_abandoned_on_cancel() {
    let control = Rc::new(Control::new());
    let _guard = control.begin().unwrap();
    let forever = HostFunction::asynchronous(0, |_| std::future::pending());

    let (result, ()) = tokio::join!(forever.call(vec![], &control), async {
        tokio::task::yield_now().await;
        control.cancel().unwrap();
    });
    assert_eq!(result.unwrap_err().kind, ErrorKind::Cancelled);
}
