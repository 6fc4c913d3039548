use crate::error::Result;
use crate::tree::Library;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while LibraryStore handles the "what" (transactions, repair).
pub trait StorageBackend {
    /// Load the library document. A backend with nothing stored yet returns an
    /// empty library.
    fn load_library(&self) -> Result<Library>;

    /// Save the library document.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_library(&self, library: &Library) -> Result<()>;

    /// The location of the document.
    /// For FsBackend, this is the real path. For MemBackend, a virtual path.
    fn location(&self) -> PathBuf;
}
