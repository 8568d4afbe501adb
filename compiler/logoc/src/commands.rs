//! Command handlers for the Logo CLI.
//!
//! Programs run on a current-thread runtime; the interpreter is not
//! `Send`. Ctrl-C is turned into a break of the running program.

use logo_eval::{Interpreter, Outcome};
use tracing::debug;

/// Exit status for a program stopped with Ctrl-C.
const EXIT_INTERRUPTED: i32 = 130;

pub fn run_file(path: &str, max_depth: Option<usize>) {
    let source = read_file(path);
    let mut builder = Interpreter::builder();
    if let Some(depth) = max_depth {
        builder = builder.max_depth(depth);
    }
    let interp = builder.build();

    let outcome = block_on(execute_interruptibly(&interp, &source));
    report(path, &outcome);
}

pub fn parse_file(path: &str) {
    let source = read_file(path);
    match logo_eval::parse(&source) {
        Ok(program) => {
            for instruction in &program {
                println!("{instruction}");
            }
        }
        Err(err) => {
            eprintln!("error: parse error in '{path}': {err}");
            std::process::exit(1);
        }
    }
}

pub fn eval_source(source: &str) {
    let interp = Interpreter::new();
    match block_on(interp.evaluate(source)) {
        Ok(Some(value)) => println!("{value}"),
        Ok(None) => {}
        Err(err) if err.is_cancelled() => std::process::exit(EXIT_INTERRUPTED),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Run `source`, breaking it on Ctrl-C.
async fn execute_interruptibly(interp: &Interpreter, source: &str) -> Outcome {
    let control = interp.control();
    let run = interp.execute(source);
    tokio::pin!(run);

    loop {
        tokio::select! {
            outcome = &mut run => return outcome,
            signal = tokio::signal::ctrl_c() => {
                if let Err(err) = signal {
                    debug!(%err, "no Ctrl-C handler; running to completion");
                    return run.await;
                }
                if let Err(err) = control.cancel() {
                    debug!(%err, "Ctrl-C ignored");
                }
            }
        }
    }
}

fn report(path: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Completed => {}
        Outcome::Cancelled => {
            eprintln!("stopped");
            std::process::exit(EXIT_INTERRUPTED);
        }
        Outcome::Failed(err) => {
            eprintln!("error: runtime error in '{path}': {err}");
            std::process::exit(1);
        }
    }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime.block_on(future),
        Err(err) => {
            eprintln!("error: cannot start runtime: {err}");
            std::process::exit(1);
        }
    }
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}
