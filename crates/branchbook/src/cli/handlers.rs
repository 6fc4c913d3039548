//! Command handlers: call the API, print the result.
//!
//! Handlers are generic over the store so tests can run them against the
//! in-memory store. They own no logic beyond turning flags into API arguments.

use super::render;
use branchbookapp::api::{reference, BookApi};
use branchbookapp::commands::books::BookUpdate;
use branchbookapp::error::RecordKind;
use branchbookapp::model::{parse_id, PageDraft, Visibility};
use branchbookapp::store::DataStore;
use chrono::NaiveDate;
use serde::Serialize;

/// Where results go: JSON documents or styled text.
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Renders `value` as JSON or through `text`, without printing.
    pub fn format<T: Serialize + ?Sized>(
        &self,
        value: &T,
        text: impl FnOnce(&T) -> String,
    ) -> anyhow::Result<String> {
        if self.json {
            Ok(format!("{}\n", render::json(value)?))
        } else {
            Ok(text(value))
        }
    }

    pub fn emit<T: Serialize + ?Sized>(
        &self,
        value: &T,
        text: impl FnOnce(&T) -> String,
    ) -> anyhow::Result<()> {
        print!("{}", self.format(value, text)?);
        Ok(())
    }
}

fn current_user() -> String {
    std::env::var("USER")
        .ok()
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| "anonymous".to_string())
}

pub fn book_new<S: DataStore>(
    api: &mut BookApi<S>,
    out: &Output,
    title: &str,
    owner: Option<String>,
    public: bool,
) -> anyhow::Result<()> {
    let owner = owner.unwrap_or_else(current_user);
    let visibility = if public {
        Visibility::Public
    } else {
        Visibility::Private
    };
    let book = api.create_book(&owner, title, visibility)?;
    out.emit(&book, render::book_detail)
}

pub fn book_list<S: DataStore>(
    api: &BookApi<S>,
    out: &Output,
    owner: Option<String>,
) -> anyhow::Result<()> {
    let owner = owner.unwrap_or_else(current_user);
    let books = api.books_by_owner(&owner)?;
    out.emit(books.as_slice(), render::book_list)
}

pub fn book_show<S: DataStore>(api: &BookApi<S>, out: &Output, id: &str) -> anyhow::Result<()> {
    let book = api.book(id)?;
    out.emit(&book, render::book_detail)
}

pub fn book_edit<S: DataStore>(
    api: &mut BookApi<S>,
    out: &Output,
    id: &str,
    title: Option<String>,
    public: bool,
    private: bool,
) -> anyhow::Result<()> {
    let visibility = match (public, private) {
        (true, _) => Some(Visibility::Public),
        (_, true) => Some(Visibility::Private),
        _ => None,
    };
    let book = api.update_book(id, BookUpdate { title, visibility })?;
    out.emit(&book, render::book_detail)
}

pub fn book_delete<S: DataStore>(
    api: &mut BookApi<S>,
    out: &Output,
    id: &str,
) -> anyhow::Result<()> {
    let removed = api.delete_book(id)?;
    out.emit(&removed, |r| render::removed("book", r))
}

pub fn home<S: DataStore>(api: &BookApi<S>, out: &Output) -> anyhow::Result<()> {
    let books = api.highlights()?;
    out.emit(books.as_slice(), render::book_list)
}

pub fn read_book<S: DataStore>(api: &BookApi<S>, out: &Output, id: &str) -> anyhow::Result<()> {
    let nav = api.navigate(reference(RecordKind::Book, id)?, Default::default())?;
    out.emit(&nav, render::navigation)
}

pub fn read_path<S: DataStore>(api: &BookApi<S>, out: &Output, id: &str) -> anyhow::Result<()> {
    let nav = api.navigate(reference(RecordKind::Path, id)?, Default::default())?;
    out.emit(&nav, render::navigation)
}

pub fn read_page<S: DataStore>(
    api: &BookApi<S>,
    out: &Output,
    id: &str,
    direction: &str,
) -> anyhow::Result<()> {
    let nav = api.navigate_raw(RecordKind::Page, id, direction)?;
    out.emit(&nav, render::navigation)
}

/// Any tree operation, by name: `add`, `rename`, `end` or `delete`.
pub fn tree<S: DataStore>(
    api: &mut BookApi<S>,
    out: &Output,
    op: &str,
    path_id: &str,
    label: Option<&str>,
) -> anyhow::Result<()> {
    let outcome = api.mutate_tree(op, path_id, label)?;
    out.emit(&outcome, render::tree_outcome)
}

pub fn draft(
    path: Option<&str>,
    title: String,
    content: String,
    date: Option<NaiveDate>,
    ordinal: Option<u32>,
) -> anyhow::Result<PageDraft> {
    let path_id = path
        .map(|p| parse_id(RecordKind::Path, p))
        .transpose()?;
    Ok(PageDraft {
        path_id,
        title,
        content,
        publish_date: date,
        ordinal,
    })
}

pub fn page_save<S: DataStore>(
    api: &mut BookApi<S>,
    out: &Output,
    page_ref: &str,
    draft: &PageDraft,
) -> anyhow::Result<()> {
    let page = api.save_page(page_ref, draft)?;
    out.emit(&page, render::saved_page)
}

pub fn page_show<S: DataStore>(api: &BookApi<S>, out: &Output, id: &str) -> anyhow::Result<()> {
    let page = api.page(id)?;
    out.emit(&page, render::page_detail)
}

pub fn page_list<S: DataStore>(api: &BookApi<S>, out: &Output, path: &str) -> anyhow::Result<()> {
    let pages = api.pages_by_path(path)?;
    out.emit(pages.as_slice(), render::page_list)
}

pub fn outline<S: DataStore>(api: &BookApi<S>, out: &Output, book: &str) -> anyhow::Result<()> {
    let outline = api.outline(book)?;
    out.emit(&outline, render::outline)
}

pub fn doctor<S: DataStore>(api: &mut BookApi<S>, out: &Output) -> anyhow::Result<()> {
    let report = api.doctor()?;
    out.emit(&report, render::doctor)
}
