//! # CLI Behavior
//!
//! This is **one possible UI client** for branchbook, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation in [`crate`].
//!
//! ## Reading
//!
//! `branchbook read page <id> --dir next` asks the navigation resolver where to go.
//! When a path runs out, the branches it offers are printed with their ids; pass
//! one to `read path <id>` to follow it.
//!
//! ## Output
//!
//! Every command prints human-oriented text by default. `--json` switches to the
//! serialized library types, one JSON document per invocation.
//!
//! ## Module Structure
//!
//! - `commands`: Logging setup, context initialization, dispatch
//! - `handlers`: Per-command handlers that call the API and print results
//! - `render`: Output formatting
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styling constants

mod commands;
mod handlers;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
