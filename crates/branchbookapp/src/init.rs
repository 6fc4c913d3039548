//! # Locating the Library
//!
//! Branchbook keeps one library per data directory. The directory is resolved
//! during [`initialize`]:
//!
//! 1. If `data_override` is provided (the CLI's `--data`), use it directly.
//! 2. Otherwise, if `BRANCHBOOK_DATA` is set, use that. This is primarily used
//!    by tests to isolate state.
//! 3. Otherwise, use the OS-appropriate data directory (via the `directories`
//!    crate), e.g. `~/.local/share/branchbook` on Linux.
//!
//! Configuration is then loaded from the user config directory and the data
//! directory, merged, with the data directory winning. `BRANCHBOOK__*`
//! environment variables override both (see [`crate::config`]).

use crate::api::BookApi;
use crate::config::{BookConfig, CONFIG_FILE};
use crate::error::{BookError, Result};
use crate::store::fs::FileStore;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const DATA_ENV: &str = "BRANCHBOOK_DATA";

/// Settings come from `BRANCHBOOK__<KEY>` variables, e.g.
/// `BRANCHBOOK__HIGHLIGHT_COUNT=5`.
pub const CONFIG_ENV_PREFIX: &str = "BRANCHBOOK";

pub struct BookContext {
    pub api: BookApi<FileStore>,
    pub config: BookConfig,
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "branchbook", "branchbook")
        .ok_or_else(|| BookError::Config("Could not determine a home directory".into()))
}

/// Picks the data directory: explicit override, then `BRANCHBOOK_DATA`, then
/// the OS data directory.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_override {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Loads layered configuration for a data directory.
pub fn load_config(data_dir: &std::path::Path) -> Result<BookConfig> {
    let mut search_paths = Vec::new();
    if let Ok(dirs) = project_dirs() {
        search_paths.push(SearchPath::Path(dirs.config_dir().to_path_buf()));
    }
    search_paths.push(SearchPath::Path(data_dir.to_path_buf()));

    Clapfig::builder()
        .app_name("branchbook")
        .file_name(CONFIG_FILE)
        .search_paths(search_paths)
        .search_mode(SearchMode::Merge)
        .env_prefix(CONFIG_ENV_PREFIX)
        .load()
        .map_err(|e| BookError::Config(e.to_string()))
}

/// Resolves the data directory, loads configuration and opens the file store.
pub fn initialize(data_override: Option<PathBuf>) -> Result<BookContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(&data_dir)?;
    debug!(
        data_dir = %data_dir.display(),
        highlight_count = config.highlight_count,
        "initialized"
    );

    let store = FileStore::new(data_dir);
    let api = BookApi::new(store, config.clone());
    Ok(BookContext { api, config })
}
