//! # Storage Layer
//!
//! This module defines the storage abstraction for branchbook. The [`DataStore`]
//! trait lets the command layer work against any backend.
//!
//! ## One Document, Committed Whole
//!
//! A library (every book, path and page) is persisted as a single document.
//! Reads take a snapshot with [`DataStore::load`]. Writes go through
//! [`DataStore::transact`]:
//!
//! 1. Load a fresh snapshot.
//! 2. Apply the mutation to the in-memory [`Library`] arena.
//! 3. Validate every tree invariant.
//! 4. Commit the document with one backend write.
//!
//! If any step fails the snapshot is dropped and the stored library is exactly
//! what it was before. That is what makes a cascading path delete all-or-nothing
//! without any locking: the backend write itself is the transaction boundary.
//! Two concurrent writers race and the last commit wins.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production store, `library.json` in the data directory.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! Both are [`library_store::LibraryStore`] over a different
//! [`backend::StorageBackend`]: the backend handles the "how" (bytes on disk or
//! in a `RefCell`), the store handles the "what" (transactions, repair).
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── library.json        # Books, paths and pages
//! └── branchbook.toml     # Optional configuration
//! ```

use crate::error::Result;
use crate::tree::{Library, RepairReport};
use std::path::PathBuf;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod library_store;
pub mod mem_backend;
pub mod memory;

/// Report from the `doctor` operation.
pub type DoctorReport = RepairReport;

/// Abstract interface for library storage.
pub trait DataStore {
    /// Snapshot of the committed library.
    fn load(&self) -> Result<Library>;

    /// Replace the committed library. Implementations must write atomically.
    fn commit(&mut self, library: &Library) -> Result<()>;

    /// Where the library lives (a real path for file stores).
    fn location(&self) -> PathBuf;

    /// Find and fix orphans and broken links.
    fn doctor(&mut self) -> Result<DoctorReport>;

    /// Applies `mutate` to a fresh snapshot and commits it only if the
    /// mutation succeeds and the result passes [`Library::validate`].
    fn transact<T, F>(&mut self, mutate: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Library) -> Result<T>,
    {
        let mut library = self.load()?;
        let value = mutate(&mut library)?;
        library.validate()?;
        self.commit(&library)?;
        Ok(value)
    }
}
