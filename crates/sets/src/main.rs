//! # Sets CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/setsapp/`: the UI-agnostic query engine and commands
//! - `crates/sets/`: this CLI, a client of `setsapp`'s API facade
//!
//! Everything from `setsapp::api` inward takes and returns plain Rust values.
//! The CLI owns the user-facing concerns: argument parsing, loading and saving
//! the vault snapshot, logging setup, rendering and exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
