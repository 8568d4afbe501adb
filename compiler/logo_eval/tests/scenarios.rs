//! End-to-end programs run through the public interpreter API.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use logo_eval::{
    buffer_handler, callback_handler, ErrorKind, HostFunction, Interpreter, Outcome, Value,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

fn interpreter() -> Interpreter {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .build()
}

async fn output_of(source: &str) -> String {
    let interp = interpreter();
    let outcome = interp.execute(source).await;
    assert_eq!(outcome, Outcome::Completed, "{source}");
    interp.print_handler().get_output()
}

#[tokio::test]
async fn host_command_arity() {
    let interp = interpreter();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    interp.bind(
        "cmd",
        HostFunction::new(move |n: f64| log.borrow_mut().push(n)),
    );

    let err = interp.execute("cmd").await;
    assert_eq!(err.error().map(|e| e.kind), Some(ErrorKind::Structural));

    assert!(interp.execute("cmd 1").await.is_completed());
    assert!(interp.execute("(cmd 1 2)").await.is_completed());

    let outcome = interp.execute("cmd 1 2").await;
    let err = outcome.error().unwrap();
    assert_eq!(err.kind, ErrorKind::Structural);
    assert_eq!(err.message, "You don't say what to do with 2");

    // The failing run still executed its first instruction.
    assert_eq!(*seen.borrow(), vec![1.0, 1.0, 1.0]);
}

#[tokio::test]
async fn infix_scenarios() {
    let interp = interpreter();
    for (source, expected) in [
        ("1 + 2", 3.0),
        ("3 * 4 + 2", 14.0),
        ("(2 + 3) * 4", 20.0),
        ("48 * (2 + 3)", 240.0),
    ] {
        assert_eq!(
            interp.evaluate(source).await,
            Ok(Some(Value::Number(expected))),
            "{source}"
        );
    }
}

#[tokio::test]
async fn inputs_absorb_infix_greedily() {
    let interp = interpreter();
    interp.set_variable("x", 2.0);
    interp.set_variable("a", 8.0);
    interp.set_variable("b", 9.0);
    assert!(interp.execute("to y :n output :n end").await.is_completed());
    assert_eq!(
        interp.evaluate(":x * y :a + :b").await,
        Ok(Some(Value::Number(34.0)))
    );
}

#[tokio::test]
async fn factorial() {
    let source = "
        to factorial :n
          if :n>0 [output :n * factorial :n-1]
          output 1
        end
        print factorial 5";
    assert_eq!(output_of(source).await, "120\n");
}

#[tokio::test]
async fn output_inside_if_leaves_the_procedure() {
    let source = "to f if true [output 1] output 2 end print f";
    assert_eq!(output_of(source).await, "1\n");
}

#[tokio::test]
async fn callees_see_their_callers_locals() {
    let source = "
        to a :x b end
        to b print :x end
        a 5";
    assert_eq!(output_of(source).await, "5\n");
}

#[tokio::test]
async fn fibonacci_with_locals() {
    let source = "
        to fib :n
          local \"a local \"b local \"t
          make \"a 0 make \"b 1
          repeat :n [make \"t :a + :b make \"a :b make \"b :t]
          output :a
        end
        print fib 10
        print map \"fib [1 2 3 4 5]";
    assert_eq!(output_of(source).await, "55\n1 1 2 3 5\n");
}

#[tokio::test]
async fn comments_and_line_breaks() {
    let source = "
        ; squares of the first few numbers
        foreach [1 2 3] [[n]   ; each one
          print :n * :n
        ]";
    assert_eq!(output_of(source).await, "1\n4\n9\n");
}

#[tokio::test]
async fn print_sink_receives_every_line() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    let interp = Interpreter::builder()
        .print_handler(callback_handler(move |text| sink.lock().push(text.to_string())))
        .build();

    assert!(interp
        .execute("print \"hello type 1 print [a [b]]")
        .await
        .is_completed());
    assert_eq!(
        *lines.lock(),
        vec!["hello\n".to_string(), "1".to_string(), "a [b]\n".to_string()]
    );
}

#[tokio::test]
async fn host_errors_fail_the_run() {
    let interp = interpreter();
    interp.bind(
        "checked",
        HostFunction::new(|n: f64| {
            if n < 0.0 {
                Err(logo_eval::EvalError::new(ErrorKind::Type, "negative"))
            } else {
                Ok(n.sqrt())
            }
        }),
    );
    assert_eq!(interp.evaluate("checked 16").await, Ok(Some(Value::Number(4.0))));
    let err = interp.evaluate("checked -1").await.unwrap_err();
    assert_eq!(err.message, "negative");
}
