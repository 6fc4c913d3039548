//! # The Library Arena
//!
//! [`Library`] owns every book, path and page as flat maps keyed by id. The tree
//! structure is expressed purely through ids:
//!
//! - each [`Path`] names its `parent_id` and keeps an ordered `children` list,
//! - each [`Page`] names its `path_id` and `book_id`.
//!
//! No record ever borrows another, so the arena can be cloned as a snapshot,
//! mutated freely, checked with [`Library::validate`], and then either committed
//! or dropped. The store layer relies on exactly that to make every mutation
//! all-or-nothing.
//!
//! ## Traversal Order
//!
//! "Path discovery order" is a pre-order walk starting at the book's root path
//! and visiting children in list order. [`Library::path_order`] computes it;
//! whole-book page listings and the outline both follow it.
//!
//! ## Invariants
//!
//! [`Library::validate`] checks, for the whole arena:
//!
//! 1. Every book's root path exists, belongs to it and has no parent.
//! 2. Every non-root path has an existing parent in the same book, and appears
//!    exactly once in that parent's child list.
//! 3. Every child link points back: `child.parent_id == Some(parent.id)`.
//! 4. Parent chains are finite (no cycles).
//! 5. Every page's path exists and the denormalized `book_id` agrees with it.
//! 6. Ordinals are unique within a path.
//!
//! [`Library::repair`] is the lenient counterpart used by the doctor: it drops
//! or re-links whatever breaks these rules instead of failing.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::error::{BookError, RecordKind, Result};
use crate::model::{Book, BookId, Page, PageId, Path, PathId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub books: HashMap<BookId, Book>,
    #[serde(default)]
    pub paths: HashMap<PathId, Path>,
    #[serde(default)]
    pub pages: HashMap<PageId, Page>,
}

/// A path with its descendants, in child order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathNode {
    pub path: Path,
    pub children: Vec<PathNode>,
}

impl PathNode {
    /// Number of paths in this subtree, this one included.
    pub fn path_count(&self) -> usize {
        1 + self.children.iter().map(PathNode::path_count).sum::<usize>()
    }
}

/// What a cascading removal took with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Removed {
    pub paths: usize,
    pub pages: usize,
}

/// Counts of fixes applied by [`Library::repair`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    pub restored_roots: usize,
    pub repaired_child_links: usize,
    pub removed_paths: usize,
    pub removed_pages: usize,
    pub fixed_pages: usize,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        *self == RepairReport::default()
    }
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Lookup ---

    pub fn book(&self, id: &BookId) -> Result<&Book> {
        self.books
            .get(id)
            .ok_or_else(|| BookError::not_found(RecordKind::Book, id))
    }

    pub fn book_mut(&mut self, id: &BookId) -> Result<&mut Book> {
        self.books
            .get_mut(id)
            .ok_or_else(|| BookError::not_found(RecordKind::Book, id))
    }

    pub fn path(&self, id: &PathId) -> Result<&Path> {
        self.paths
            .get(id)
            .ok_or_else(|| BookError::not_found(RecordKind::Path, id))
    }

    pub fn path_mut(&mut self, id: &PathId) -> Result<&mut Path> {
        self.paths
            .get_mut(id)
            .ok_or_else(|| BookError::not_found(RecordKind::Path, id))
    }

    pub fn page(&self, id: &PageId) -> Result<&Page> {
        self.pages
            .get(id)
            .ok_or_else(|| BookError::not_found(RecordKind::Page, id))
    }

    pub fn page_mut(&mut self, id: &PageId) -> Result<&mut Page> {
        self.pages
            .get_mut(id)
            .ok_or_else(|| BookError::not_found(RecordKind::Page, id))
    }

    // --- Ordered queries ---

    /// Pages of one path, by ordinal.
    pub fn pages_in_path(&self, path_id: &PathId) -> Result<Vec<&Page>> {
        self.path(path_id)?;
        let mut pages: Vec<&Page> = self
            .pages
            .values()
            .filter(|p| p.path_id == *path_id)
            .collect();
        pages.sort_by(|a, b| a.ordinal.cmp(&b.ordinal).then(a.created_at.cmp(&b.created_at)));
        Ok(pages)
    }

    /// Path ids of a book in discovery order (pre-order from the root).
    pub fn path_order(&self, book_id: &BookId) -> Result<Vec<PathId>> {
        let book = self.book(book_id)?;
        self.subtree(&book.root_path_id)
    }

    /// Pages of a whole book: path discovery order, then ordinal.
    pub fn pages_in_book(&self, book_id: &BookId) -> Result<Vec<&Page>> {
        let mut pages = Vec::new();
        for path_id in self.path_order(book_id)? {
            pages.extend(self.pages_in_path(&path_id)?);
        }
        Ok(pages)
    }

    /// The path and all its descendants, pre-order.
    pub fn subtree(&self, path_id: &PathId) -> Result<Vec<PathId>> {
        self.path(path_id)?;
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![*path_id];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                return Err(BookError::InvalidState(format!(
                    "path {} is reachable twice from {}",
                    id, path_id
                )));
            }
            let path = self.path(&id)?;
            order.push(id);
            stack.extend(path.children.iter().rev().copied());
        }
        Ok(order)
    }

    /// Nested view of a path subtree.
    pub fn path_tree(&self, path_id: &PathId) -> Result<PathNode> {
        // Guards against cycles before recursing.
        self.subtree(path_id)?;
        self.build_node(path_id)
    }

    fn build_node(&self, path_id: &PathId) -> Result<PathNode> {
        let path = self.path(path_id)?.clone();
        let children = path
            .children
            .iter()
            .map(|child| self.build_node(child))
            .collect::<Result<Vec<_>>>()?;
        Ok(PathNode { path, children })
    }

    /// Parent chain of a path, nearest first. Fails on a cycle.
    pub fn ancestors(&self, path_id: &PathId) -> Result<Vec<PathId>> {
        let mut chain = Vec::new();
        let mut current = self.path(path_id)?.parent_id;
        while let Some(id) = current {
            if chain.len() > self.paths.len() {
                return Err(BookError::InvalidState(format!(
                    "parent chain of path {} does not terminate",
                    path_id
                )));
            }
            chain.push(id);
            current = self.path(&id)?.parent_id;
        }
        Ok(chain)
    }

    /// The ordinal a page appended to this path would get.
    pub fn next_ordinal(&self, path_id: &PathId) -> Result<u32> {
        let last = self
            .pages
            .values()
            .filter(|p| p.path_id == *path_id)
            .map(|p| p.ordinal)
            .max();
        match last {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                BookError::InvalidState(format!("path has no ordinal after {}", max))
            }),
        }
    }

    /// Lowest ordinal no page of this path uses.
    fn lowest_free_ordinal(&self, path_id: &PathId) -> Option<u32> {
        let used: HashSet<u32> = self
            .pages
            .values()
            .filter(|p| p.path_id == *path_id)
            .map(|p| p.ordinal)
            .collect();
        (1..=u32::MAX).find(|ordinal| !used.contains(ordinal))
    }

    pub fn ordinal_taken(&self, path_id: &PathId, ordinal: u32, except: Option<PageId>) -> bool {
        self.pages.values().any(|p| {
            p.path_id == *path_id && p.ordinal == ordinal && Some(p.id) != except
        })
    }

    // --- Mutation ---

    pub fn insert_book(&mut self, book: Book, root: Path) {
        self.paths.insert(root.id, root);
        self.books.insert(book.id, book);
    }

    /// Appends a new child path. Ended parents accept no more children.
    pub fn add_child_path(&mut self, parent_id: &PathId, label: String) -> Result<PathId> {
        let parent = self.path(parent_id)?;
        if parent.ended {
            return Err(BookError::InvalidState(format!(
                "path '{}' is ended and accepts no new branches",
                parent.label
            )));
        }
        let child = Path::new(parent.book_id, Some(*parent_id), label);
        let child_id = child.id;
        self.path_mut(parent_id)?.children.push(child_id);
        self.paths.insert(child_id, child);
        Ok(child_id)
    }

    /// Removes a non-root path, its descendants and all their pages, and
    /// unlinks it from its parent.
    pub fn remove_subtree(&mut self, path_id: &PathId) -> Result<Removed> {
        let path = self.path(path_id)?;
        if path.is_root() {
            return Err(BookError::InvalidState(format!(
                "path '{}' is the root of its book and cannot be deleted",
                path.label
            )));
        }
        let parent_id = path.parent_id;

        let doomed = self.subtree(path_id)?;
        let removed = self.drop_paths(&doomed);
        if let Some(parent_id) = parent_id {
            self.path_mut(&parent_id)?
                .children
                .retain(|child| child != path_id);
        }
        Ok(removed)
    }

    /// Removes a book with every path and page it owns.
    pub fn remove_book(&mut self, book_id: &BookId) -> Result<Removed> {
        self.book(book_id)?;
        let doomed: Vec<PathId> = self
            .paths
            .values()
            .filter(|p| p.book_id == *book_id)
            .map(|p| p.id)
            .collect();
        let mut removed = self.drop_paths(&doomed);
        let before = self.pages.len();
        self.pages.retain(|_, page| page.book_id != *book_id);
        removed.pages += before - self.pages.len();
        self.books.remove(book_id);
        Ok(removed)
    }

    fn drop_paths(&mut self, ids: &[PathId]) -> Removed {
        let doomed: HashSet<&PathId> = ids.iter().collect();
        let before = self.pages.len();
        self.pages.retain(|_, page| !doomed.contains(&page.path_id));
        let pages = before - self.pages.len();
        let mut paths = 0;
        for id in ids {
            if self.paths.remove(id).is_some() {
                paths += 1;
            }
        }
        Removed { paths, pages }
    }

    // --- Consistency ---

    /// Checks every structural invariant of the arena.
    pub fn validate(&self) -> Result<()> {
        for book in self.books.values() {
            let root = self.paths.get(&book.root_path_id).ok_or_else(|| {
                broken(format!("book '{}' has no root path", book.title))
            })?;
            if root.book_id != book.id || !root.is_root() {
                return Err(broken(format!(
                    "root path of book '{}' is not a root of that book",
                    book.title
                )));
            }
        }

        for path in self.paths.values() {
            let book = self.books.get(&path.book_id).ok_or_else(|| {
                broken(format!("path {} belongs to a missing book", path.id))
            })?;
            match path.parent_id {
                None if book.root_path_id != path.id => {
                    return Err(broken(format!("path {} has no parent", path.id)));
                }
                None => {}
                Some(parent_id) => {
                    let parent = self.paths.get(&parent_id).ok_or_else(|| {
                        broken(format!("path {} has a missing parent", path.id))
                    })?;
                    if parent.book_id != path.book_id {
                        return Err(broken(format!(
                            "path {} and its parent belong to different books",
                            path.id
                        )));
                    }
                    let links = parent.children.iter().filter(|c| **c == path.id).count();
                    if links != 1 {
                        return Err(broken(format!(
                            "path {} is listed {} times by its parent",
                            path.id, links
                        )));
                    }
                }
            }
            for child_id in &path.children {
                let child = self.paths.get(child_id).ok_or_else(|| {
                    broken(format!("path {} lists a missing child", path.id))
                })?;
                if child.parent_id != Some(path.id) {
                    return Err(broken(format!(
                        "path {} lists child {} which names another parent",
                        path.id, child_id
                    )));
                }
            }
            self.ancestors(&path.id)?;
        }

        let mut ordinals: HashSet<(PathId, u32)> = HashSet::new();
        for page in self.pages.values() {
            let path = self.paths.get(&page.path_id).ok_or_else(|| {
                broken(format!("page {} belongs to a missing path", page.id))
            })?;
            if path.book_id != page.book_id {
                return Err(broken(format!(
                    "page {} names a different book than its path",
                    page.id
                )));
            }
            if !ordinals.insert((page.path_id, page.ordinal)) {
                return Err(broken(format!(
                    "ordinal {} is used twice in path '{}'",
                    page.ordinal, path.label
                )));
            }
        }
        Ok(())
    }

    /// Drops or re-links everything [`Library::validate`] would reject.
    pub fn repair(&mut self) -> RepairReport {
        let mut report = RepairReport::default();

        // 1. Every book gets a root path.
        let rootless: Vec<BookId> = self
            .books
            .values()
            .filter(|b| {
                self.paths
                    .get(&b.root_path_id)
                    .map_or(true, |root| root.book_id != b.id || !root.is_root())
            })
            .map(|b| b.id)
            .collect();
        for book_id in rootless {
            if let Some(book) = self.books.get_mut(&book_id) {
                let root = Path::new(book.id, None, book.title.clone());
                book.root_path_id = root.id;
                self.paths.insert(root.id, root);
                report.restored_roots += 1;
            }
        }

        // 2. Child lists only hold existing paths that point back, once.
        report.repaired_child_links += self.prune_child_links();

        // 3. Paths missing from their parent's list are re-linked.
        let unlinked: Vec<(PathId, PathId)> = self
            .paths
            .values()
            .filter_map(|p| {
                let parent_id = p.parent_id?;
                let parent = self.paths.get(&parent_id)?;
                (!parent.children.contains(&p.id)).then_some((parent_id, p.id))
            })
            .collect();
        for (parent_id, child_id) in unlinked {
            if let Some(parent) = self.paths.get_mut(&parent_id) {
                parent.children.push(child_id);
                report.repaired_child_links += 1;
            }
        }

        // 4. Anything not reachable from its book's root goes.
        let mut reachable: HashSet<PathId> = HashSet::new();
        for book in self.books.values() {
            let mut stack = vec![book.root_path_id];
            while let Some(id) = stack.pop() {
                let Some(path) = self.paths.get(&id) else {
                    continue;
                };
                if path.book_id != book.id || !reachable.insert(id) {
                    continue;
                }
                stack.extend(path.children.iter().copied());
            }
        }
        let unreachable: Vec<PathId> = self
            .paths
            .keys()
            .filter(|id| !reachable.contains(id))
            .copied()
            .collect();
        let removed = self.drop_paths(&unreachable);
        report.removed_paths += removed.paths;
        report.removed_pages += removed.pages;
        report.repaired_child_links += self.prune_child_links();

        // 5. Pages agree with their path and keep distinct ordinals.
        let mut page_ids: Vec<PageId> = self.pages.keys().copied().collect();
        page_ids.sort_by_key(|id| {
            let page = &self.pages[id];
            (page.path_id, page.ordinal, page.created_at)
        });
        let mut used: HashSet<(PathId, u32)> = HashSet::new();
        for id in page_ids {
            let Some(page) = self.pages.get(&id) else {
                continue;
            };
            let (path_id, ordinal, book_id) = (page.path_id, page.ordinal, page.book_id);
            let Some(path_book) = self.paths.get(&path_id).map(|p| p.book_id) else {
                self.pages.remove(&id);
                report.removed_pages += 1;
                continue;
            };
            let free_ordinal = if used.contains(&(path_id, ordinal)) {
                self.next_ordinal(&path_id)
                    .ok()
                    .or_else(|| self.lowest_free_ordinal(&path_id))
            } else {
                None
            };
            if let Some(page) = self.pages.get_mut(&id) {
                let mut fixed = false;
                if book_id != path_book {
                    page.book_id = path_book;
                    fixed = true;
                }
                if let Some(ordinal) = free_ordinal {
                    page.ordinal = ordinal;
                    fixed = true;
                }
                used.insert((path_id, page.ordinal));
                if fixed {
                    report.fixed_pages += 1;
                }
            }
        }

        report
    }

    fn prune_child_links(&mut self) -> usize {
        let parents: HashMap<PathId, Option<PathId>> = self
            .paths
            .values()
            .map(|p| (p.id, p.parent_id))
            .collect();
        let mut pruned = 0;
        for path in self.paths.values_mut() {
            let mut seen = HashSet::new();
            let before = path.children.len();
            let own_id = path.id;
            path.children.retain(|child| {
                parents.get(child).copied().flatten() == Some(own_id) && seen.insert(*child)
            });
            pruned += before - path.children.len();
        }
        pruned
    }
}

fn broken(message: String) -> BookError {
    BookError::InvalidState(format!("tree invariant violated: {}", message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageDraft, Visibility};
    use proptest::prelude::*;

    fn library_with_book() -> (Library, BookId, PathId) {
        let mut lib = Library::new();
        let (book, root) = Book::with_root("ada", "Cave", Visibility::Public);
        let (book_id, root_id) = (book.id, root.id);
        lib.insert_book(book, root);
        (lib, book_id, root_id)
    }

    fn add_page(lib: &mut Library, path_id: PathId, title: &str) -> PageId {
        let ordinal = lib.next_ordinal(&path_id).unwrap();
        let page = Page::new(lib.path(&path_id).unwrap(), ordinal, &PageDraft::new(title, ""));
        let id = page.id;
        lib.pages.insert(id, page);
        id
    }

    #[test]
    fn test_add_child_path_appends_in_order() {
        let (mut lib, _, root) = library_with_book();
        let a = lib.add_child_path(&root, "A".into()).unwrap();
        let b = lib.add_child_path(&root, "B".into()).unwrap();
        assert_eq!(lib.path(&root).unwrap().children, vec![a, b]);
        let child = lib.path(&a).unwrap();
        assert_eq!(child.parent_id, Some(root));
        assert!(!child.ended);
        assert!(lib.pages_in_path(&a).unwrap().is_empty());
        lib.validate().unwrap();
    }

    #[test]
    fn test_add_child_path_rejects_ended_parent() {
        let (mut lib, _, root) = library_with_book();
        lib.path_mut(&root).unwrap().ended = true;
        let err = lib.add_child_path(&root, "A".into()).unwrap_err();
        assert!(err.is_invalid_state());
        assert!(lib.path(&root).unwrap().children.is_empty());
        assert_eq!(lib.paths.len(), 1);
    }

    #[test]
    fn test_pages_in_path_ordered_by_ordinal_with_gaps() {
        let (mut lib, _, root) = library_with_book();
        let first = add_page(&mut lib, root, "one");
        let second = add_page(&mut lib, root, "two");
        lib.page_mut(&first).unwrap().ordinal = 10;
        lib.page_mut(&second).unwrap().ordinal = 3;
        let titles: Vec<&str> = lib
            .pages_in_path(&root)
            .unwrap()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["two", "one"]);
        assert_eq!(lib.next_ordinal(&root).unwrap(), 11);
    }

    #[test]
    fn test_pages_in_book_follow_discovery_order() {
        let (mut lib, book, root) = library_with_book();
        let a = lib.add_child_path(&root, "A".into()).unwrap();
        let b = lib.add_child_path(&root, "B".into()).unwrap();
        let a1 = lib.add_child_path(&a, "A1".into()).unwrap();
        add_page(&mut lib, b, "b");
        add_page(&mut lib, a1, "a1");
        add_page(&mut lib, root, "r1");
        add_page(&mut lib, root, "r2");
        add_page(&mut lib, a, "a");

        assert_eq!(lib.path_order(&book).unwrap(), vec![root, a, a1, b]);
        let titles: Vec<&str> = lib
            .pages_in_book(&book)
            .unwrap()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["r1", "r2", "a", "a1", "b"]);
    }

    #[test]
    fn test_remove_subtree_cascades() {
        let (mut lib, _, root) = library_with_book();
        let a = lib.add_child_path(&root, "A".into()).unwrap();
        let a1 = lib.add_child_path(&a, "A1".into()).unwrap();
        let b = lib.add_child_path(&root, "B".into()).unwrap();
        add_page(&mut lib, root, "r");
        add_page(&mut lib, a, "a");
        add_page(&mut lib, a1, "a1");
        add_page(&mut lib, a1, "a1b");

        let removed = lib.remove_subtree(&a).unwrap();
        assert_eq!(removed, Removed { paths: 2, pages: 3 });
        assert_eq!(lib.path(&root).unwrap().children, vec![b]);
        assert!(lib.path(&a1).is_err());
        assert_eq!(lib.pages.len(), 1);
        lib.validate().unwrap();
    }

    #[test]
    fn test_remove_subtree_rejects_root() {
        let (mut lib, _, root) = library_with_book();
        add_page(&mut lib, root, "r");
        let before = lib.clone();
        let err = lib.remove_subtree(&root).unwrap_err();
        assert!(err.is_invalid_state());
        assert_eq!(lib, before);
    }

    #[test]
    fn test_remove_book_leaves_other_books() {
        let (mut lib, book, root) = library_with_book();
        let (other, other_root) = Book::with_root("bob", "Sea", Visibility::Private);
        let other_root_id = other_root.id;
        lib.insert_book(other, other_root);
        lib.add_child_path(&root, "A".into()).unwrap();
        add_page(&mut lib, root, "r");
        add_page(&mut lib, other_root_id, "s");

        let removed = lib.remove_book(&book).unwrap();
        assert_eq!(removed, Removed { paths: 2, pages: 1 });
        assert_eq!(lib.books.len(), 1);
        assert_eq!(lib.paths.len(), 1);
        assert_eq!(lib.pages.len(), 1);
        lib.validate().unwrap();
    }

    #[test]
    fn test_validate_detects_cycle() {
        let (mut lib, _, root) = library_with_book();
        let a = lib.add_child_path(&root, "A".into()).unwrap();
        let b = lib.add_child_path(&a, "B".into()).unwrap();
        // Splice A under B, forming A -> B -> A.
        lib.path_mut(&root).unwrap().children.clear();
        lib.path_mut(&a).unwrap().parent_id = Some(b);
        lib.path_mut(&b).unwrap().children.push(a);
        assert!(lib.validate().unwrap_err().is_invalid_state());
        assert!(lib.ancestors(&a).is_err());
    }

    #[test]
    fn test_validate_detects_duplicate_ordinal() {
        let (mut lib, _, root) = library_with_book();
        let p1 = add_page(&mut lib, root, "one");
        add_page(&mut lib, root, "two");
        lib.page_mut(&p1).unwrap().ordinal = 2;
        assert!(lib.validate().unwrap_err().is_invalid_state());
    }

    #[derive(Debug, Clone)]
    enum Mutation {
        Branch(usize),
        Page(usize),
        SetEnded(usize, bool),
        Remove(usize),
    }

    fn mutation_strategy() -> impl Strategy<Value = Mutation> {
        let target = 0usize..64;
        prop_oneof![
            2 => target.clone().prop_map(Mutation::Branch),
            1 => target.clone().prop_map(Mutation::Page),
            1 => (target.clone(), any::<bool>())
                .prop_map(|(t, ended)| Mutation::SetEnded(t, ended)),
            1 => target.prop_map(Mutation::Remove),
        ]
    }

    fn assert_tree_invariants(lib: &Library, book: &BookId, root: &PathId) {
        lib.validate().unwrap();
        for id in lib.path_order(book).unwrap() {
            let chain = lib.ancestors(&id).unwrap();
            assert!(!chain.contains(&id));
            if id != *root {
                assert_eq!(chain.last(), Some(root));
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn mutation_sequences_keep_tree_acyclic(
            mutations in prop::collection::vec(mutation_strategy(), 0..80)
        ) {
            let (mut lib, book, root) = library_with_book();
            for (step, mutation) in mutations.into_iter().enumerate() {
                let ids = lib.path_order(&book).unwrap();
                let pick = |i: usize| ids[i % ids.len()];
                match mutation {
                    Mutation::Branch(i) => {
                        let _ = lib.add_child_path(&pick(i), format!("p{}", step));
                    }
                    Mutation::Page(i) => {
                        add_page(&mut lib, pick(i), "page");
                    }
                    Mutation::SetEnded(i, ended) => {
                        lib.path_mut(&pick(i)).unwrap().ended = ended;
                    }
                    Mutation::Remove(i) => {
                        let target = pick(i);
                        let result = lib.remove_subtree(&target);
                        prop_assert_eq!(result.is_err(), target == root);
                    }
                }
                assert_tree_invariants(&lib, &book, &root);
            }
        }
    }

    #[test]
    fn test_path_tree_nests_children() {
        let (mut lib, _, root) = library_with_book();
        let a = lib.add_child_path(&root, "A".into()).unwrap();
        lib.add_child_path(&a, "A1".into()).unwrap();
        lib.add_child_path(&root, "B".into()).unwrap();
        let tree = lib.path_tree(&root).unwrap();
        assert_eq!(tree.path_count(), 4);
        assert_eq!(tree.children[0].path.label, "A");
        assert_eq!(tree.children[0].children[0].path.label, "A1");
        assert_eq!(tree.children[1].path.label, "B");
    }

    #[test]
    fn test_repair_drops_orphans_and_dangling_links() {
        let (mut lib, _, root) = library_with_book();
        let a = lib.add_child_path(&root, "A".into()).unwrap();
        add_page(&mut lib, a, "a");

        // Orphan page: its path never existed.
        let mut stray = lib.page(&lib.pages_in_path(&a).unwrap()[0].id).unwrap().clone();
        stray.id = uuid::Uuid::new_v4();
        stray.path_id = uuid::Uuid::new_v4();
        lib.pages.insert(stray.id, stray);

        // Dangling child link.
        lib.path_mut(&root).unwrap().children.push(uuid::Uuid::new_v4());

        // Orphan path: its parent is gone.
        let mut lost = lib.path(&a).unwrap().clone();
        lost.id = uuid::Uuid::new_v4();
        lost.parent_id = Some(uuid::Uuid::new_v4());
        lost.children.clear();
        lib.paths.insert(lost.id, lost);

        assert!(lib.validate().is_err());
        let report = lib.repair();
        assert_eq!(report.removed_pages, 1);
        assert_eq!(report.removed_paths, 1);
        assert_eq!(report.repaired_child_links, 1);
        lib.validate().unwrap();
        assert!(lib.repair().is_clean());
    }

    #[test]
    fn test_repair_relinks_and_renumbers() {
        let (mut lib, _, root) = library_with_book();
        let a = lib.add_child_path(&root, "A".into()).unwrap();
        lib.path_mut(&root).unwrap().children.clear();
        let p1 = add_page(&mut lib, a, "one");
        let p2 = add_page(&mut lib, a, "two");
        lib.page_mut(&p2).unwrap().ordinal = lib.page(&p1).unwrap().ordinal;

        let report = lib.repair();
        assert_eq!(report.repaired_child_links, 1);
        assert_eq!(report.fixed_pages, 1);
        assert_eq!(lib.path(&root).unwrap().children, vec![a]);
        lib.validate().unwrap();
    }

    #[test]
    fn test_repair_renumbers_duplicate_at_max_ordinal() {
        let (mut lib, _, root) = library_with_book();
        let p1 = add_page(&mut lib, root, "one");
        let p2 = add_page(&mut lib, root, "two");
        lib.page_mut(&p1).unwrap().ordinal = u32::MAX;
        lib.page_mut(&p2).unwrap().ordinal = u32::MAX;
        assert!(lib.next_ordinal(&root).unwrap_err().is_invalid_state());

        let report = lib.repair();
        assert_eq!(report.fixed_pages, 1);
        lib.validate().unwrap();
        let mut ordinals: Vec<u32> = lib.pages.values().map(|p| p.ordinal).collect();
        ordinals.sort();
        assert_eq!(ordinals, vec![1, u32::MAX]);
    }
}
