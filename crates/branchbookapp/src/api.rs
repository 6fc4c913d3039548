//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the single
//! entry point for all branchbook operations, regardless of the UI being used.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: identifiers arrive as opaque strings and are parsed
//!   here; direction and tree operation tokens become closed enums
//! - **Applies configuration** (highlight count, default path label)
//! - **Returns structured types** (`Result<Navigation>`, `Result<Page>`, ...)
//!
//! ## What the API Does NOT Do
//!
//! The API explicitly avoids:
//! - **Business logic**: That belongs in `commands/*.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//! - **Authentication**: Callers decide who may mutate a book. They can report
//!   a refusal through [`BookError::Unauthorized`](crate::error::BookError::Unauthorized).
//!
//! ## Identifiers
//!
//! An identifier that does not parse cannot name any record, so it is reported
//! exactly like an unknown one: `NotFound`. Unknown direction or operation
//! tokens are `Parse` errors.
//!
//! ## Generic Over DataStore
//!
//! `BookApi<S: DataStore>` is generic over the storage backend:
//! - Production: `BookApi<FileStore>`
//! - Testing: `BookApi<InMemoryStore>`
//!
//! ## Testing Strategy
//!
//! API tests should verify:
//! - Correct command is called for each method
//! - Arguments are passed/transformed correctly
//!
//! API tests should **not** verify command logic (tested in command modules).

use crate::commands::{self, books::BookUpdate, Direction, Navigation, OutlineNode, Reference};
use crate::commands::{TreeOp, TreeOutcome};
use crate::config::BookConfig;
use crate::error::{RecordKind, Result};
use crate::model::{parse_id, Book, Page, PageDraft, PageRef, Path, Visibility};
use crate::store::{DataStore, DoctorReport};
use crate::tree::{PathNode, Removed};
use std::path::PathBuf;

/// The main API facade for branchbook operations.
pub struct BookApi<S: DataStore> {
    store: S,
    config: BookConfig,
}

/// Parses a reader reference given as a kind and an id.
pub fn reference(kind: RecordKind, id: &str) -> Result<Reference> {
    let id = parse_id(kind, id)?;
    Ok(match kind {
        RecordKind::Book => Reference::Book(id),
        RecordKind::Path => Reference::Path(id),
        RecordKind::Page => Reference::Page(id),
    })
}

impl<S: DataStore> BookApi<S> {
    pub fn new(store: S, config: BookConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn location(&self) -> PathBuf {
        self.store.location()
    }

    // --- Reading ---

    pub fn navigate(&self, reference: Reference, direction: Direction) -> Result<Navigation> {
        commands::navigate::resolve(&self.store, reference, direction)
    }

    /// Navigation with every input still in its wire form: `direction` is
    /// one of `previous`, `current`, `next` or `p`, `c`, `n`.
    pub fn navigate_raw(&self, kind: RecordKind, id: &str, direction: &str) -> Result<Navigation> {
        let direction: Direction = direction.parse()?;
        self.navigate(reference(kind, id)?, direction)
    }

    // --- Tree mutator ---

    pub fn mutate_tree(
        &mut self,
        op: &str,
        path_id: &str,
        label: Option<&str>,
    ) -> Result<TreeOutcome> {
        let op: TreeOp = op.parse()?;
        let path_id = parse_id(RecordKind::Path, path_id)?;
        commands::paths::mutate(
            &mut self.store,
            op,
            &path_id,
            label,
            self.config.default_path_label(),
        )
    }

    pub fn add_path(&mut self, parent_id: &str, label: &str) -> Result<Path> {
        let parent_id = parse_id(RecordKind::Path, parent_id)?;
        commands::paths::add(
            &mut self.store,
            &parent_id,
            label,
            self.config.default_path_label(),
        )
    }

    pub fn rename_path(&mut self, path_id: &str, label: &str) -> Result<Path> {
        let path_id = parse_id(RecordKind::Path, path_id)?;
        commands::paths::rename(&mut self.store, &path_id, label)
    }

    pub fn end_path(&mut self, path_id: &str) -> Result<Path> {
        let path_id = parse_id(RecordKind::Path, path_id)?;
        commands::paths::end(&mut self.store, &path_id)
    }

    pub fn delete_path(&mut self, path_id: &str) -> Result<Removed> {
        let path_id = parse_id(RecordKind::Path, path_id)?;
        commands::paths::delete(&mut self.store, &path_id)
    }

    pub fn path(&self, path_id: &str) -> Result<Path> {
        let path_id = parse_id(RecordKind::Path, path_id)?;
        commands::paths::get(&self.store, &path_id)
    }

    /// Branches of a path, in the order readers are offered them.
    pub fn children(&self, path_id: &str) -> Result<Vec<Path>> {
        let path_id = parse_id(RecordKind::Path, path_id)?;
        commands::paths::children(&self.store, &path_id)
    }

    pub fn paths_by_book(&self, book_id: &str) -> Result<PathNode> {
        let book_id = parse_id(RecordKind::Book, book_id)?;
        commands::paths::tree(&self.store, &book_id)
    }

    // --- Pages ---

    /// `page_ref` is either `new` or the id of the page to edit.
    pub fn save_page(&mut self, page_ref: &str, draft: &PageDraft) -> Result<Page> {
        let page_ref: PageRef = page_ref.parse()?;
        commands::pages::save(&mut self.store, page_ref, draft)
    }

    pub fn page(&self, page_id: &str) -> Result<Page> {
        let page_id = parse_id(RecordKind::Page, page_id)?;
        commands::pages::get(&self.store, &page_id)
    }

    pub fn pages_by_path(&self, path_id: &str) -> Result<Vec<Page>> {
        let path_id = parse_id(RecordKind::Path, path_id)?;
        commands::pages::by_path(&self.store, &path_id)
    }

    pub fn pages_by_book(&self, book_id: &str) -> Result<Vec<Page>> {
        let book_id = parse_id(RecordKind::Book, book_id)?;
        commands::pages::by_book(&self.store, &book_id)
    }

    // --- Aggregates ---

    pub fn outline(&self, book_id: &str) -> Result<OutlineNode> {
        let book_id = parse_id(RecordKind::Book, book_id)?;
        commands::outline::run(&self.store, &book_id)
    }

    pub fn public_books(&self, limit: usize) -> Result<Vec<Book>> {
        commands::books::public(&self.store, limit)
    }

    /// Public books for the home page, `highlight_count` of them.
    pub fn highlights(&self) -> Result<Vec<Book>> {
        self.public_books(self.config.highlight_count)
    }

    // --- Catalog ---

    pub fn create_book(
        &mut self,
        owner: &str,
        title: &str,
        visibility: Visibility,
    ) -> Result<Book> {
        commands::books::create(&mut self.store, owner, title, visibility)
    }

    pub fn update_book(&mut self, book_id: &str, update: BookUpdate) -> Result<Book> {
        let book_id = parse_id(RecordKind::Book, book_id)?;
        commands::books::update(&mut self.store, &book_id, update)
    }

    pub fn delete_book(&mut self, book_id: &str) -> Result<Removed> {
        let book_id = parse_id(RecordKind::Book, book_id)?;
        commands::books::delete(&mut self.store, &book_id)
    }

    pub fn book(&self, book_id: &str) -> Result<Book> {
        let book_id = parse_id(RecordKind::Book, book_id)?;
        commands::books::get(&self.store, &book_id)
    }

    pub fn books_by_owner(&self, owner: &str) -> Result<Vec<Book>> {
        commands::books::by_owner(&self.store, owner)
    }

    pub fn book_for_page(&self, page_id: &str) -> Result<Book> {
        let page_id = parse_id(RecordKind::Page, page_id)?;
        let book_id = commands::pages::book_id_for_page(&self.store, &page_id)?;
        commands::books::get(&self.store, &book_id)
    }

    pub fn book_for_path(&self, path_id: &str) -> Result<Book> {
        let path_id = parse_id(RecordKind::Path, path_id)?;
        let book_id = commands::paths::book_id_for_path(&self.store, &path_id)?;
        commands::books::get(&self.store, &book_id)
    }

    // --- Maintenance ---

    pub fn doctor(&mut self) -> Result<DoctorReport> {
        commands::doctor::run(&mut self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookError;
    use crate::store::memory::InMemoryStore;

    fn api() -> BookApi<InMemoryStore> {
        BookApi::new(InMemoryStore::new(), BookConfig::default())
    }

    #[test]
    fn test_string_ids_dispatch() {
        let mut api = api();
        let book = api.create_book("ada", "Cave", Visibility::Public).unwrap();
        let root = book.root_path_id.to_string();

        let path = api.add_path(&root, "").unwrap();
        assert_eq!(path.label, "New Path");

        let page = api
            .save_page("new", &PageDraft::new("Entrance", "Dark").in_path(path.id))
            .unwrap();
        assert_eq!(api.page(&page.id.to_string()).unwrap(), page);
        assert_eq!(api.book_for_page(&page.id.to_string()).unwrap().id, book.id);
        assert_eq!(api.book_for_path(&path.id.to_string()).unwrap().id, book.id);
        assert_eq!(api.pages_by_book(&book.id.to_string()).unwrap().len(), 1);
        assert_eq!(api.outline(&book.id.to_string()).unwrap().children.len(), 1);
        assert_eq!(api.children(&root).unwrap(), vec![path]);
    }

    #[test]
    fn test_malformed_ids_are_not_found() {
        let mut api = api();
        assert!(api.page("not-an-id").unwrap_err().is_not_found());
        assert!(api.delete_path("").unwrap_err().is_not_found());
        assert!(api
            .navigate_raw(RecordKind::Book, "zzz", "c")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_unknown_tokens_are_parse_errors() {
        let mut api = api();
        let book = api.create_book("ada", "Cave", Visibility::Public).unwrap();
        let root = book.root_path_id.to_string();

        let err = api.mutate_tree("graft", &root, None).unwrap_err();
        assert!(matches!(err, BookError::Parse(_)));
        let err = api
            .navigate_raw(RecordKind::Book, &book.id.to_string(), "sideways")
            .unwrap_err();
        assert!(matches!(err, BookError::Parse(_)));
    }

    #[test]
    fn test_mutate_tree_uses_configured_label() {
        let config = BookConfig {
            default_path_label: "Yet another way".into(),
            ..Default::default()
        };
        let mut api = BookApi::new(InMemoryStore::new(), config);
        let book = api.create_book("ada", "Cave", Visibility::Public).unwrap();

        let outcome = api
            .mutate_tree("add", &book.root_path_id.to_string(), None)
            .unwrap();
        assert_eq!(outcome.path().unwrap().label, "Yet another way");
    }

    #[test]
    fn test_highlights_use_configured_count() {
        let mut api = api();
        for title in ["One", "Two", "Three", "Four"] {
            api.create_book("ada", title, Visibility::Public).unwrap();
        }
        api.create_book("ada", "Hidden", Visibility::Private).unwrap();

        assert_eq!(api.highlights().unwrap().len(), 3);
        assert_eq!(api.public_books(10).unwrap().len(), 4);
    }
}
