//! # CLI Layer
//!
//! This module is **one possible UI client** for branchbook; it is not the application itself.
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Logging**: `RUST_LOG` filter on stderr, `warn` by default, `debug` with `-v`
//! 3. **Context Setup**: Resolve the data directory, load configuration, open the store
//! 4. **Dispatch**: Route commands to handlers
//! 5. **Error Handling**: Errors bubble up to `main`, which prints them and exits 1

use super::handlers::{self, Output};
use super::setup::{BookCommands, Cli, Commands, PageCommands, PathCommands, ReadCommands};
use branchbookapp::init::initialize;
use clap::Parser;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = initialize(cli.data.clone())?;
    debug!(library = %ctx.api.location().display(), config = ?ctx.config, "context ready");
    let out = Output::new(cli.json);
    let api = &mut ctx.api;

    match cli.command {
        Commands::Book(cmd) => match cmd {
            BookCommands::New {
                title,
                owner,
                public,
            } => handlers::book_new(api, &out, &title.join(" "), owner, public),
            BookCommands::List { owner } => handlers::book_list(api, &out, owner),
            BookCommands::Show { id } => handlers::book_show(api, &out, &id),
            BookCommands::Edit {
                id,
                title,
                public,
                private,
            } => handlers::book_edit(api, &out, &id, title, public, private),
            BookCommands::Delete { id } => handlers::book_delete(api, &out, &id),
        },
        Commands::Home => handlers::home(api, &out),
        Commands::Read(cmd) => match cmd {
            ReadCommands::Book { id } => handlers::read_book(api, &out, &id),
            ReadCommands::Path { id } => handlers::read_path(api, &out, &id),
            ReadCommands::Page { id, dir } => handlers::read_page(api, &out, &id, &dir),
        },
        Commands::Path(cmd) => match cmd {
            PathCommands::Add { parent, label } => {
                handlers::tree(api, &out, "add", &parent, Some(label.join(" ").as_str()))
            }
            PathCommands::Rename { id, label } => {
                handlers::tree(api, &out, "rename", &id, Some(label.join(" ").as_str()))
            }
            PathCommands::End { id } => handlers::tree(api, &out, "end", &id, None),
            PathCommands::Delete { id } => handlers::tree(api, &out, "delete", &id, None),
        },
        Commands::Page(cmd) => match cmd {
            PageCommands::Save {
                page,
                path,
                title,
                content,
                date,
                ordinal,
            } => {
                let draft = handlers::draft(path.as_deref(), title, content, date, ordinal)?;
                handlers::page_save(api, &out, &page, &draft)
            }
            PageCommands::Show { id } => handlers::page_show(api, &out, &id),
            PageCommands::List { path } => handlers::page_list(api, &out, &path),
        },
        Commands::Outline { book } => handlers::outline(api, &out, &book),
        Commands::Doctor => handlers::doctor(api, &out),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
