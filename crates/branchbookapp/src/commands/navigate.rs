//! # Reading Navigation
//!
//! Resolves "where does the reader go now" from a reference and a direction.
//!
//! A path is read as its ordered page sequence. Book and path references open
//! the first page of the sequence; page references move relative to the page:
//!
//! ```text
//! sequence: [p1, p2, p3]      children: [B, C]
//!
//! p1 --previous--> NoOp
//! p2 --previous--> p1
//! p2 --current---> p2
//! p2 --next------> p3
//! p3 --next------> Options [B, C], prev = p3
//! ```
//!
//! The index arithmetic lives in [`step`], a pure function over a length and
//! an index, so edge behaviour can be tested without building a library.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{BookError, RecordKind, Result};
use crate::model::{BookId, Page, PageId, PathId};
use crate::store::DataStore;
use crate::tree::Library;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    #[default]
    Current,
    Next,
}

impl FromStr for Direction {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previous" | "p" => Ok(Direction::Previous),
            "current" | "c" => Ok(Direction::Current),
            "next" | "n" => Ok(Direction::Next),
            other => Err(BookError::Parse(format!(
                "unknown direction '{}', expected previous, current or next (p, c, n)",
                other
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Previous => "previous",
            Direction::Current => "current",
            Direction::Next => "next",
        };
        write!(f, "{}", name)
    }
}

/// What the reader is pointing at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Book(BookId),
    Path(PathId),
    Page(PageId),
}

/// Outcome of moving within a sequence of `len` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Land on the item at this index.
    Target(usize),
    /// Moved forward past the last item.
    Exhausted,
    /// Moved back from the first item.
    Stay,
}

/// Applies `direction` to position `index` of a sequence of `len` items.
///
/// `index` must be in bounds.
pub fn step(len: usize, index: usize, direction: Direction) -> Step {
    debug_assert!(index < len);
    match direction {
        Direction::Previous if index == 0 => Step::Stay,
        Direction::Previous => Step::Target(index - 1),
        Direction::Current => Step::Target(index),
        Direction::Next if index + 1 < len => Step::Target(index + 1),
        Direction::Next => Step::Exhausted,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePreview {
    pub id: PageId,
    pub title: String,
    pub preview: String,
}

/// A branch offered at the end of a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathOption {
    pub id: PathId,
    pub label: String,
    pub ended: bool,
    /// `None` when the branch has no pages yet.
    pub first_page: Option<PagePreview>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Navigation {
    Page {
        page: Page,
        book_title: String,
    },
    /// The path ran out. An empty list is a dead end.
    Options {
        options: Vec<PathOption>,
        prev_page_id: PageId,
    },
    /// `previous` from the first page.
    NoOp,
    /// The referenced path has no pages.
    Empty,
}

pub fn resolve<S: DataStore>(
    store: &S,
    reference: Reference,
    direction: Direction,
) -> Result<Navigation> {
    let lib = store.load()?;

    let (path_id, current) = match reference {
        Reference::Book(id) => (lib.book(&id)?.root_path_id, None),
        Reference::Path(id) => (id, None),
        Reference::Page(id) => (lib.page(&id)?.path_id, Some(id)),
    };
    let sequence = lib.pages_in_path(&path_id)?;

    let navigation = match current {
        None => match sequence.first() {
            Some(first) => page_result(&lib, first)?,
            None => Navigation::Empty,
        },
        Some(page_id) => {
            let index = sequence
                .iter()
                .position(|p| p.id == page_id)
                .ok_or_else(|| BookError::not_found(RecordKind::Page, page_id))?;
            match step(sequence.len(), index, direction) {
                Step::Target(target) => page_result(&lib, sequence[target])?,
                Step::Stay => Navigation::NoOp,
                Step::Exhausted => Navigation::Options {
                    options: branch_options(&lib, &path_id)?,
                    prev_page_id: page_id,
                },
            }
        }
    };

    debug!(
        ?reference,
        %direction,
        path = %path_id,
        result = kind_name(&navigation),
        "resolved navigation"
    );
    Ok(navigation)
}

fn page_result(lib: &Library, page: &Page) -> Result<Navigation> {
    let book_title = lib.book(&page.book_id)?.title.clone();
    Ok(Navigation::Page {
        page: page.clone(),
        book_title,
    })
}

fn branch_options(lib: &Library, path_id: &PathId) -> Result<Vec<PathOption>> {
    let path = lib.path(path_id)?;
    path.children
        .iter()
        .map(|child_id| {
            let child = lib.path(child_id)?;
            let first_page = lib
                .pages_in_path(child_id)?
                .first()
                .map(|page| PagePreview {
                    id: page.id,
                    title: page.title.clone(),
                    preview: page.preview(),
                });
            Ok(PathOption {
                id: child.id,
                label: child.label.clone(),
                ended: child.ended,
                first_page,
            })
        })
        .collect()
}

fn kind_name(navigation: &Navigation) -> &'static str {
    match navigation {
        Navigation::Page { .. } => "page",
        Navigation::Options { .. } => "options",
        Navigation::NoOp => "noop",
        Navigation::Empty => "empty",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Visibility;
    use crate::store::memory::fixtures::StoreFixture;

    fn page_id(nav: &Navigation) -> PageId {
        match nav {
            Navigation::Page { page, .. } => page.id,
            other => panic!("expected a page, got {:?}", other),
        }
    }

    #[test]
    fn step_covers_every_edge() {
        assert_eq!(step(3, 0, Direction::Previous), Step::Stay);
        assert_eq!(step(3, 2, Direction::Previous), Step::Target(1));
        assert_eq!(step(3, 1, Direction::Current), Step::Target(1));
        assert_eq!(step(3, 1, Direction::Next), Step::Target(2));
        assert_eq!(step(3, 2, Direction::Next), Step::Exhausted);
        assert_eq!(step(1, 0, Direction::Next), Step::Exhausted);
        assert_eq!(step(1, 0, Direction::Previous), Step::Stay);
    }

    #[test]
    fn direction_parses_words_and_route_codes() {
        assert_eq!("n".parse::<Direction>().unwrap(), Direction::Next);
        assert_eq!("Previous".parse::<Direction>().unwrap(), Direction::Previous);
        assert_eq!("c".parse::<Direction>().unwrap(), Direction::Current);
        assert_eq!(Direction::default(), Direction::Current);
        assert!(matches!("x".parse::<Direction>(), Err(BookError::Parse(_))));
        assert!(matches!("".parse::<Direction>(), Err(BookError::Parse(_))));
    }

    #[test]
    fn two_page_path_with_one_branch() {
        let mut fx = StoreFixture::new();
        let (_, a) = fx.book("Cave", Visibility::Public);
        let ids = fx.pages(a, &["p1", "p2"]);
        let b = fx.branch(a, "B");
        fx.pages(b, &["b1"]);

        let nav = resolve(&fx.store, Reference::Page(ids[1]), Direction::Next).unwrap();
        match nav {
            Navigation::Options {
                options,
                prev_page_id,
            } => {
                assert_eq!(prev_page_id, ids[1]);
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].id, b);
                assert_eq!(options[0].label, "B");
                let first = options[0].first_page.as_ref().unwrap();
                assert_eq!(first.title, "b1");
                assert_eq!(first.preview, "Content of b1");
            }
            other => panic!("expected options, got {:?}", other),
        }

        let nav = resolve(&fx.store, Reference::Page(ids[0]), Direction::Next).unwrap();
        assert_eq!(page_id(&nav), ids[1]);

        let nav = resolve(&fx.store, Reference::Page(ids[0]), Direction::Previous).unwrap();
        assert_eq!(nav, Navigation::NoOp);
    }

    #[test]
    fn options_keep_child_order() {
        let mut fx = StoreFixture::new();
        let (_, root) = fx.book("Cave", Visibility::Public);
        let ids = fx.pages(root, &["p1"]);
        let left = fx.branch(root, "Left");
        let right = fx.branch(root, "Right");
        fx.end(right);

        let nav = resolve(&fx.store, Reference::Page(ids[0]), Direction::Next).unwrap();
        let Navigation::Options { options, .. } = nav else {
            panic!("expected options");
        };
        let order: Vec<PathId> = options.iter().map(|o| o.id).collect();
        assert_eq!(order, vec![left, right]);
        assert!(options[0].first_page.is_none());
        assert!(options[1].ended);
    }

    #[test]
    fn last_page_without_children_is_dead_end() {
        let mut fx = StoreFixture::new();
        let (_, root) = fx.book("Cave", Visibility::Public);
        let ids = fx.pages(root, &["p1"]);

        let nav = resolve(&fx.store, Reference::Page(ids[0]), Direction::Next).unwrap();
        assert_eq!(
            nav,
            Navigation::Options {
                options: vec![],
                prev_page_id: ids[0],
            }
        );
    }

    #[test]
    fn book_and_path_open_first_page() {
        let mut fx = StoreFixture::new();
        let (book, root) = fx.book("Cave", Visibility::Public);
        let ids = fx.pages(root, &["p1", "p2"]);
        let b = fx.branch(root, "B");
        let b_ids = fx.pages(b, &["b1"]);

        let nav = resolve(&fx.store, Reference::Book(book), Direction::Next).unwrap();
        assert_eq!(page_id(&nav), ids[0]);
        if let Navigation::Page { book_title, .. } = &nav {
            assert_eq!(book_title, "Cave");
        }

        // Direction is ignored for book and path references.
        let nav = resolve(&fx.store, Reference::Path(b), Direction::Previous).unwrap();
        assert_eq!(page_id(&nav), b_ids[0]);
    }

    #[test]
    fn empty_path_resolves_to_empty() {
        let mut fx = StoreFixture::new();
        let (book, root) = fx.book("Cave", Visibility::Public);
        let b = fx.branch(root, "B");

        assert_eq!(
            resolve(&fx.store, Reference::Path(b), Direction::Current).unwrap(),
            Navigation::Empty
        );
        assert_eq!(
            resolve(&fx.store, Reference::Book(book), Direction::Current).unwrap(),
            Navigation::Empty
        );
    }

    #[test]
    fn unknown_references_are_not_found() {
        let mut fx = StoreFixture::new();
        fx.book("Cave", Visibility::Public);
        let missing = uuid::Uuid::new_v4();

        for reference in [
            Reference::Book(missing),
            Reference::Path(missing),
            Reference::Page(missing),
        ] {
            let err = resolve(&fx.store, reference, Direction::Current).unwrap_err();
            assert!(err.is_not_found(), "{:?}", reference);
        }
    }

    #[test]
    fn middle_page_moves_both_ways() {
        let mut fx = StoreFixture::new();
        let (_, root) = fx.book("Cave", Visibility::Public);
        let ids = fx.pages(root, &["p1", "p2", "p3"]);

        let back = resolve(&fx.store, Reference::Page(ids[1]), Direction::Previous).unwrap();
        assert_eq!(page_id(&back), ids[0]);
        let here = resolve(&fx.store, Reference::Page(ids[1]), Direction::Current).unwrap();
        assert_eq!(page_id(&here), ids[1]);
        let ahead = resolve(&fx.store, Reference::Page(ids[1]), Direction::Next).unwrap();
        assert_eq!(page_id(&ahead), ids[2]);
    }
}
