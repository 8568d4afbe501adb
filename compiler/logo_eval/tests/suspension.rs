//! Pause, continue and break while a program is running.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use logo_eval::{
    buffer_handler, ErrorKind, HostFunction, Interpreter, Outcome, RunState,
};
use pretty_assertions::assert_eq;

fn interpreter() -> Interpreter {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .build()
}

/// Yield to the run until `done` holds.
async fn until(mut done: impl FnMut() -> bool) {
    while !done() {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn pause_inside_a_loop_and_continue() {
    let interp = interpreter();
    let control = interp.control();
    let pauser = control.clone();
    interp.bind(
        "tick",
        HostFunction::new(move |n: f64| {
            if n == 2.0 {
                pauser.pause()
            } else {
                Ok(())
            }
        }),
    );

    let driver = async {
        until(|| control.is_paused()).await;
        // Nothing moves while paused.
        let printed = interp.print_handler().get_output();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(interp.print_handler().get_output(), printed);
        assert_eq!(printed, "1\n2\n");
        control.resume().unwrap();
    };

    let (outcome, ()) = tokio::join!(
        interp.execute("repeat 4 [print repcount tick repcount]"),
        driver
    );
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(interp.print_handler().get_output(), "1\n2\n3\n4\n");
    assert_eq!(interp.state(), RunState::Idle);
}

#[tokio::test]
async fn break_while_paused() {
    let interp = interpreter();
    let control = interp.control();

    let driver = async {
        until(|| control.state() == RunState::Running).await;
        control.pause().unwrap();
        until(|| control.is_paused()).await;
        assert_eq!(control.pause().unwrap_err().kind, ErrorKind::Usage);
        control.cancel().unwrap();
    };

    let (outcome, ()) = tokio::join!(interp.execute("forever [make \"n 1]"), driver);
    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(interp.state(), RunState::Idle);

    // The interpreter is usable again.
    assert!(interp.execute("print 1").await.is_completed());
}

#[tokio::test]
async fn break_a_running_loop() {
    let interp = interpreter();
    let control = interp.control();
    let ran = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&ran);
    interp.bind(
        "step",
        HostFunction::new(move || counter.set(counter.get() + 1)),
    );

    let driver = async {
        until(|| ran.get() >= 5).await;
        control.cancel().unwrap();
    };

    let (outcome, ()) = tokio::join!(interp.execute("forever [step]"), driver);
    assert!(outcome.is_cancelled());
    let steps = ran.get();
    assert!(steps >= 5);

    // No more steps after the break.
    tokio::task::yield_now().await;
    assert_eq!(ran.get(), steps);
}

#[tokio::test]
async fn break_cuts_a_wait_short() {
    let interp = interpreter();
    let control = interp.control();
    let started = Instant::now();

    let driver = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        control.cancel().unwrap();
    };

    // Ten seconds of ticks.
    let (outcome, ()) = tokio::join!(interp.execute("wait 600 print 1"), driver);
    assert_eq!(outcome, Outcome::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(interp.print_handler().get_output(), "");
}

#[tokio::test]
async fn break_abandons_a_pending_host_future() {
    let interp = interpreter();
    let control = interp.control();
    interp.bind(
        "forever.pending",
        HostFunction::asynchronous(0, |_| std::future::pending()),
    );

    let driver = async {
        until(|| control.is_running()).await;
        tokio::task::yield_now().await;
        control.cancel().unwrap();
    };

    let (outcome, ()) = tokio::join!(interp.execute("forever.pending print 1"), driver);
    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(interp.print_handler().get_output(), "");
}

#[tokio::test]
async fn async_host_functions_resume_the_run() {
    let interp = interpreter();
    interp.bind(
        "later",
        HostFunction::asynchronous(1, |args| async move {
            tokio::time::sleep(Duration::from_millis(1)).await;
            Ok(args.into_iter().next())
        }),
    );
    assert_eq!(
        interp.evaluate("later 3 + 4").await,
        Ok(Some(logo_eval::Value::Number(7.0)))
    );
}

#[tokio::test]
async fn one_run_at_a_time() {
    let interp = interpreter();
    let control = interp.control();

    let second = async {
        until(|| control.is_running()).await;
        let outcome = interp.execute("print 2").await;
        control.cancel().unwrap();
        outcome
    };

    let (first, second) = tokio::join!(interp.execute("forever [make \"n 1]"), second);
    assert_eq!(first, Outcome::Cancelled);
    assert_eq!(second.error().map(|e| e.kind), Some(ErrorKind::Usage));
    assert_eq!(interp.print_handler().get_output(), "");
}

#[tokio::test]
async fn stop_is_not_a_break() {
    // `stop` leaves a procedure; the run goes on.
    let interp = interpreter();
    let outcome = interp.execute("to f stop print 1 end f print 2").await;
    assert_eq!(outcome, Outcome::Completed);
    assert_eq!(interp.print_handler().get_output(), "2\n");
}
