//! Logo CLI
//!
//! Runs Logo programs against the `logo_eval` interpreter.

mod commands;

use commands::{eval_source, parse_file, run_file};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: logo run <file.logo> [--max-depth=<n>]");
                std::process::exit(1);
            }

            let mut max_depth = None;
            let mut file_path = None;
            for arg in args.iter().skip(2) {
                if let Some(depth) = arg.strip_prefix("--max-depth=") {
                    let Ok(depth) = depth.parse::<usize>() else {
                        eprintln!("error: invalid --max-depth value '{depth}'");
                        std::process::exit(1);
                    };
                    max_depth = Some(depth);
                } else if !arg.starts_with('-') && file_path.is_none() {
                    file_path = Some(arg.as_str());
                }
            }

            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: logo run <file.logo> [--max-depth=<n>]");
                std::process::exit(1);
            };
            run_file(path, max_depth);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: logo parse <file.logo>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: logo eval <source>");
                eprintln!("Example: logo eval \"print 3 * 4\"");
                std::process::exit(1);
            }
            eval_source(&args[2..].join(" "));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Logo {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("logo"))
            {
                run_file(command, None);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Logo interpreter");
    println!();
    println!("Usage: logo <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.logo>      Run a Logo program");
    println!("  parse <file.logo>    Parse and print the instruction list");
    println!("  eval <source>        Run source text; print the final value, if any");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Run options:");
    println!("  --max-depth=<n>      Nested procedure call limit (default 10000)");
    println!();
    println!("Ctrl-C breaks the running program.");
    println!("Set RUST_LOG (e.g. RUST_LOG=logo_eval=debug) for tracing output.");
}

/// Install a tree-shaped tracing subscriber, only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};
    use tracing_tree::HierarchicalLayer;

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(
                HierarchicalLayer::new(2)
                    .with_writer(std::io::stderr)
                    .with_targets(true),
            )
            .init();
    }
}
