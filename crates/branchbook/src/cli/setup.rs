use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// "v0.3.0" for releases, "v0.3.0 (dev abc1234 2024-01-15)" for builds off
/// an untagged commit.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const BUILD: &str = env!("BRANCHBOOK_BUILD");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if BUILD.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev {})", VERSION, BUILD)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "branchbook",
    bin_name = "branchbook",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Write and read books whose story branches", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to $BRANCHBOOK_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage books
    #[command(subcommand, display_order = 1)]
    Book(BookCommands),

    /// Show the highlighted public books
    #[command(display_order = 2)]
    Home,

    /// Read a book, a path or a page
    #[command(subcommand, display_order = 3)]
    Read(ReadCommands),

    /// Edit the path tree of a book
    #[command(subcommand, display_order = 4)]
    Path(PathCommands),

    /// Write and list pages
    #[command(subcommand, display_order = 5)]
    Page(PageCommands),

    /// Show the path and page tree of a book
    #[command(display_order = 6)]
    Outline {
        /// Book id
        book: String,
    },

    /// Verify and fix data consistency
    #[command(display_order = 7)]
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// Create a book with an empty root path
    New {
        /// Title words (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        title: Vec<String>,

        /// Owner name (defaults to $USER)
        #[arg(long)]
        owner: Option<String>,

        /// Make the book public
        #[arg(long)]
        public: bool,
    },

    /// List your books, newest first
    #[command(alias = "ls")]
    List {
        /// List this owner's books instead (defaults to $USER)
        #[arg(long)]
        owner: Option<String>,
    },

    /// Show one book
    Show { id: String },

    /// Change a book's title or visibility
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, conflicts_with = "private")]
        public: bool,

        #[arg(long)]
        private: bool,
    },

    /// Delete a book with all of its paths and pages
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ReadCommands {
    /// Open a book at its first page
    Book { id: String },

    /// Open a path at its first page
    Path { id: String },

    /// Move from a page
    Page {
        id: String,

        /// previous, current or next (p, c, n)
        #[arg(long, short, default_value = "current")]
        dir: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PathCommands {
    /// Add a branch under a path
    Add {
        /// Parent path id
        parent: String,

        /// Label words (blank uses the configured default)
        #[arg(trailing_var_arg = true)]
        label: Vec<String>,
    },

    /// Rename a path
    Rename {
        id: String,

        #[arg(required = true, trailing_var_arg = true)]
        label: Vec<String>,
    },

    /// Mark a path as ended; it accepts no more branches
    End { id: String },

    /// Delete a path, its branches and all their pages
    #[command(alias = "rm")]
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum PageCommands {
    /// Create (`new`) or update a page
    Save {
        /// Page id, or `new`
        page: String,

        /// Path the new page belongs to
        #[arg(long)]
        path: Option<String>,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        content: String,

        /// Publish date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Explicit position within the path
        #[arg(long)]
        ordinal: Option<u32>,
    },

    /// Show one page
    Show { id: String },

    /// List the pages of a path in reading order
    #[command(alias = "ls")]
    List { path: String },
}
