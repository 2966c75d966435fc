//! ummlink CLI
//!
//! Runs the Unity Mod Manager installer hooks, mod-type classifier and
//! external install probe against a JSON state file.

// CLI binary needs to output to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;
mod tracing;

use crate::cli::{EXIT_OK, exit_code_for, parse, render_error};
use crate::commands::Session;
use crate::tracing::{TracingConfig, init_tracing};

fn main() {
    // Tracing may be unusable during a panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    std::process::exit(run());
}

fn run() -> i32 {
    let cli = parse();

    let tracing_config = TracingConfig {
        format: cli.format,
        level: cli.level.into(),
    };
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("{e:?}");
    }

    let result = Session::open(cli.config.as_deref()).and_then(|session| session.execute(&cli.command));
    match result {
        Ok(output) => {
            println!("{output}");
            EXIT_OK
        }
        Err(err) => {
            render_error(&err);
            exit_code_for(&err)
        }
    }
}
