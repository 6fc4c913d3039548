use super::library_store::LibraryStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = LibraryStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        LibraryStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{Book, BookId, Page, PageDraft, PageId, PathId, Visibility};
    use crate::store::DataStore;

    /// Builds libraries for tests without going through the command layer.
    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Adds a book and returns its id and root path id.
        pub fn book(&mut self, title: &str, visibility: Visibility) -> (BookId, PathId) {
            self.store
                .transact(|lib| {
                    let (book, root) = Book::with_root("tester", title, visibility);
                    let ids = (book.id, root.id);
                    lib.insert_book(book, root);
                    Ok(ids)
                })
                .unwrap()
        }

        pub fn branch(&mut self, parent: PathId, label: &str) -> PathId {
            self.store
                .transact(|lib| lib.add_child_path(&parent, label.to_string()))
                .unwrap()
        }

        /// Appends one page per title, in order.
        pub fn pages(&mut self, path: PathId, titles: &[&str]) -> Vec<PageId> {
            self.store
                .transact(|lib| {
                    let mut ids = Vec::new();
                    for title in titles {
                        let ordinal = lib.next_ordinal(&path)?;
                        let draft = PageDraft::new(*title, format!("Content of {}", title));
                        let page = Page::new(lib.path(&path)?, ordinal, &draft);
                        ids.push(page.id);
                        lib.pages.insert(page.id, page);
                    }
                    Ok(ids)
                })
                .unwrap()
        }

        pub fn end(&mut self, path: PathId) {
            self.store
                .transact(|lib| {
                    lib.path_mut(&path)?.ended = true;
                    Ok(())
                })
                .unwrap()
        }
    }
}
