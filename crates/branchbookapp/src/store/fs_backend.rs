use super::backend::StorageBackend;
use crate::error::{BookError, Result};
use crate::tree::Library;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

pub const LIBRARY_FILE: &str = "library.json";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn library_file(&self) -> PathBuf {
        self.root.join(LIBRARY_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(BookError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_library(&self) -> Result<Library> {
        let data_file = self.library_file();
        if !data_file.exists() {
            return Ok(Library::default());
        }
        let content = fs::read_to_string(&data_file).map_err(BookError::Io)?;
        if content.trim().is_empty() {
            return Ok(Library::default());
        }
        let library: Library = serde_json::from_str(&content).map_err(BookError::Serialization)?;
        Ok(library)
    }

    fn save_library(&self, library: &Library) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(library).map_err(BookError::Serialization)?;

        // Atomic write: a crash leaves either the old or the new document.
        let tmp_file = self.root.join(format!(".library-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(BookError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, self.library_file()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(BookError::Io(e));
        }
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.library_file()
    }
}
