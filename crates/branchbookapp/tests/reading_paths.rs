//! Reader and author scenarios through the public API.

use branchbookapp::api::{reference, BookApi};
use branchbookapp::commands::{Direction, Navigation};
use branchbookapp::config::BookConfig;
use branchbookapp::error::RecordKind;
use branchbookapp::model::{PageDraft, Visibility};
use branchbookapp::store::memory::InMemoryStore;
use branchbookapp::store::DataStore;

struct Story {
    api: BookApi<InMemoryStore>,
    book: String,
    a: String,
    b: String,
    p1: String,
    p2: String,
}

/// Path A (the root) holds p1, p2 and branches into B, which holds two pages.
fn story() -> Story {
    let mut api = BookApi::new(InMemoryStore::new(), BookConfig::default());
    let book = api.create_book("ada", "The Cave", Visibility::Public).unwrap();
    let a = book.root_path_id.to_string();

    let page = |api: &mut BookApi<InMemoryStore>, path: &str, title: &str| {
        let path_id = path.parse().unwrap();
        api.save_page("new", &PageDraft::new(title, format!("{} text", title)).in_path(path_id))
            .unwrap()
            .id
            .to_string()
    };
    let p1 = page(&mut api, &a, "p1");
    let p2 = page(&mut api, &a, "p2");
    let b = api.add_path(&a, "B").unwrap().id.to_string();
    page(&mut api, &b, "b1");
    page(&mut api, &b, "b2");

    Story {
        api,
        book: book.id.to_string(),
        a,
        b,
        p1,
        p2,
    }
}

fn at(api: &BookApi<InMemoryStore>, page: &str, direction: Direction) -> Navigation {
    api.navigate(reference(RecordKind::Page, page).unwrap(), direction)
        .unwrap()
}

#[test]
fn next_from_last_page_offers_children_in_order() {
    let mut s = story();
    let c = s.api.add_path(&s.a, "C").unwrap().id.to_string();

    match at(&s.api, &s.p2, Direction::Next) {
        Navigation::Options {
            options,
            prev_page_id,
        } => {
            assert_eq!(prev_page_id.to_string(), s.p2);
            let ids: Vec<String> = options.iter().map(|o| o.id.to_string()).collect();
            assert_eq!(ids, vec![s.b.clone(), c]);
        }
        other => panic!("expected options, got {:?}", other),
    }
}

#[test]
fn reading_forward_and_back() {
    let s = story();

    match at(&s.api, &s.p1, Direction::Next) {
        Navigation::Page { page, book_title } => {
            assert_eq!(page.id.to_string(), s.p2);
            assert_eq!(book_title, "The Cave");
        }
        other => panic!("expected p2, got {:?}", other),
    }
    assert_eq!(at(&s.api, &s.p1, Direction::Previous), Navigation::NoOp);
}

#[test]
fn following_a_branch_starts_at_its_first_page() {
    let s = story();
    let nav = s
        .api
        .navigate(reference(RecordKind::Path, &s.b).unwrap(), Direction::Current)
        .unwrap();
    let Navigation::Page { page, .. } = nav else {
        panic!("expected a page");
    };
    assert_eq!(page.title, "b1");

    let nav = at(&s.api, &page.id.to_string(), Direction::Next);
    let Navigation::Page { page, .. } = nav else {
        panic!("expected a page");
    };
    assert_eq!(page.title, "b2");

    // b2 is the end of a childless path: a dead end.
    match at(&s.api, &page.id.to_string(), Direction::Next) {
        Navigation::Options { options, .. } => assert!(options.is_empty()),
        other => panic!("expected a dead end, got {:?}", other),
    }
}

#[test]
fn deleting_leaf_branch_keeps_parent_pages() {
    let mut s = story();
    let removed = s.api.delete_path(&s.b).unwrap();
    assert_eq!(removed.paths, 1);
    assert_eq!(removed.pages, 2);

    let a_pages: Vec<String> = s
        .api
        .pages_by_path(&s.a)
        .unwrap()
        .iter()
        .map(|p| p.id.to_string())
        .collect();
    assert_eq!(a_pages, vec![s.p1.clone(), s.p2.clone()]);
    assert!(s.api.path(&s.a).unwrap().children.is_empty());
    assert_eq!(s.api.pages_by_book(&s.book).unwrap().len(), 2);

    // With the branch gone the last page is a dead end.
    match at(&s.api, &s.p2, Direction::Next) {
        Navigation::Options { options, .. } => assert!(options.is_empty()),
        other => panic!("expected a dead end, got {:?}", other),
    }
}

#[test]
fn root_cannot_be_deleted() {
    let mut s = story();
    let before = s.api.store().load().unwrap();

    let err = s.api.delete_path(&s.a).unwrap_err();
    assert!(err.is_invalid_state());
    assert_eq!(s.api.store().load().unwrap(), before);
}

#[test]
fn ended_path_accepts_no_branches() {
    let mut s = story();
    s.api.end_path(&s.a).unwrap();

    let err = s.api.add_path(&s.a, "D").unwrap_err();
    assert!(err.is_invalid_state());
    let children = s.api.path(&s.a).unwrap().children;
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].to_string(), s.b);

    // Pages can still be written into an ended path.
    let a = s.a.parse().unwrap();
    s.api
        .save_page("new", &PageDraft::new("Epilogue", "").in_path(a))
        .unwrap();
}

#[test]
fn outline_and_lookups_agree() {
    let s = story();
    let outline = s.api.outline(&s.book).unwrap();
    assert_eq!(outline.id.to_string(), s.a);
    assert_eq!(outline.pages.len(), 2);
    assert_eq!(outline.children[0].id.to_string(), s.b);
    assert_eq!(outline.children[0].pages.len(), 2);

    assert_eq!(s.api.book_for_path(&s.b).unwrap().id.to_string(), s.book);
    assert_eq!(s.api.book_for_page(&s.p1).unwrap().id.to_string(), s.book);
    assert_eq!(s.api.paths_by_book(&s.book).unwrap().path_count(), 2);
}

#[test]
fn deleting_a_book_removes_everything() {
    let mut s = story();
    let removed = s.api.delete_book(&s.book).unwrap();
    assert_eq!(removed.paths, 2);
    assert_eq!(removed.pages, 4);

    let lib = s.api.store().load().unwrap();
    assert!(lib.books.is_empty());
    assert!(lib.paths.is_empty());
    assert!(lib.pages.is_empty());
    assert!(s.api.page(&s.p1).unwrap_err().is_not_found());
}
