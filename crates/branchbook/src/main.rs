//! # Branchbook CLI Architecture
//!
//! Branchbook ships with a command-line client, but the binary is intentionally thin:
//! the CLI lives in `src/cli/`, while this file only invokes `cli::run()` and
//! handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/branchbookapp/`: core library with UI-agnostic business logic
//! - `crates/branchbook/`: this CLI tool, depends on the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/branchbook/src/cli/)                     │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Logging + context wiring (commands.rs)                   │
//! │  - One handler per command (handlers.rs)                    │
//! │  - Terminal and JSON rendering (render.rs)                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/branchbookapp/src/api.rs)                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/branchbookapp/src/commands/*)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI layer is responsible for **all** user-facing concerns: argument
//! parsing, context initialization, dispatch, error handling, and rendering.
//!
//! ## Testing Approach
//!
//! - **Render functions**: unit tests feed canned library types and check the text.
//! - **End to end**: `tests/cli_e2e.rs` drives the real binary against a temp
//!   data directory with `assert_cmd`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
