use super::fs_backend::FsBackend;
use super::library_store::LibraryStore;
use std::path::PathBuf;

pub type FileStore = LibraryStore<FsBackend>;

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        LibraryStore::with_backend(FsBackend::new(root))
    }
}
