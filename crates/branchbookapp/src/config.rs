//! # Configuration
//!
//! Branchbook configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files and environment variables on top of the
//! [`confique`] defaults declared here.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `BRANCHBOOK__HIGHLIGHT_COUNT`,
//!    `BRANCHBOOK__DEFAULT_PATH_LABEL`.
//! 2. **Library Config**: `<data_dir>/branchbook.toml`.
//! 3. **User Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `highlight_count` | `3` | Public books shown on the home page |
//! | `default_path_label` | `New Path` | Label for paths added without one |

use confique::Config;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "branchbook.toml";

/// Configuration for branchbook, stored in `branchbook.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookConfig {
    /// How many public books the home page highlights.
    #[config(default = 3)]
    pub highlight_count: usize,

    /// Label given to a new path when the author leaves it blank.
    #[config(default = "New Path")]
    pub default_path_label: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            highlight_count: 3,
            default_path_label: "New Path".to_string(),
        }
    }
}

impl BookConfig {
    /// The fallback label, never blank.
    pub fn default_path_label(&self) -> &str {
        match self.default_path_label.trim() {
            "" => "New Path",
            label => label,
        }
    }
}
