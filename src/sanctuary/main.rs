//! # Sanctuary CLI
//!
//! The binary is thin: the CLI lives in `cli/`, and this file only runs
//! `cli::run()` and turns an error into an exit code.
//!
//! ```text
//! cli/setup.rs     clap argument definitions
//! cli/commands.rs  context wiring, logging, dispatch to `SanctuaryApi`
//! cli/print.rs     terminal output for `CmdResult`s
//! ```
//!
//! Logging goes to stderr through `tracing-subscriber`. The filter comes from
//! `SANCTUARY_LOG`; without it only warnings are shown, or debug output with
//! `--verbose`.

mod cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
