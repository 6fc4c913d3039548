use super::backend::StorageBackend;
use super::{DataStore, DoctorReport};
use crate::error::Result;
use crate::tree::Library;
use std::path::PathBuf;
use tracing::{debug, warn};

pub struct LibraryStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> LibraryStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: StorageBackend> DataStore for LibraryStore<B> {
    fn load(&self) -> Result<Library> {
        self.backend.load_library()
    }

    fn commit(&mut self, library: &Library) -> Result<()> {
        debug!(
            books = library.books.len(),
            paths = library.paths.len(),
            pages = library.pages.len(),
            "committing library"
        );
        self.backend.save_library(library)
    }

    fn location(&self) -> PathBuf {
        self.backend.location()
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        let mut library = self.backend.load_library()?;
        let report = library.repair();
        if report.is_clean() {
            debug!("doctor found nothing to repair");
            return Ok(report);
        }

        warn!(
            restored_roots = report.restored_roots,
            repaired_child_links = report.repaired_child_links,
            removed_paths = report.removed_paths,
            removed_pages = report.removed_pages,
            fixed_pages = report.fixed_pages,
            "doctor repaired library"
        );
        library.validate()?;
        self.backend.save_library(&library)?;
        Ok(report)
    }
}
