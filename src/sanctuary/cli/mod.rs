//! # CLI Behavior
//!
//! This is **one possible UI client** for sanctuary, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output
//! formatting. For the overall architecture, see the crate-level documentation of
//! the library.
//!
//! ## Naked Execution (`sanctuary`)
//!
//! Running `sanctuary` with no arguments defaults to `sanctuary list`.
//!
//! ## Tag references
//!
//! Wherever a command takes a tag (`--tag`, `tags update`, `tags delete`) either
//! the tag id or its name works. Names are matched case-insensitively; a name used
//! in more than one category has to be given by id.
//!
//! ## Data directory
//!
//! `--data-dir`, else `$SANCTUARY_DATA_DIR`, else the platform data directory.
//! It holds `config.json`, `resources.json` and `tags.json`.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `print`: Output formatting (lists, colors, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod print;
pub mod setup;

pub use commands::run;
