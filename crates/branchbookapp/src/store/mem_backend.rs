use super::backend::StorageBackend;
use crate::error::{BookError, Result};
use crate::tree::Library;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since branchbook is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    library: RefCell<Library>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl StorageBackend for MemBackend {
    fn load_library(&self) -> Result<Library> {
        Ok(self.library.borrow().clone())
    }

    fn save_library(&self, library: &Library) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(BookError::Store("Simulated write error".to_string()));
        }
        *self.library.borrow_mut() = library.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://library.json")
    }
}
