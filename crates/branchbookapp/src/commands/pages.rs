use crate::error::{BookError, Result};
use crate::model::{BookId, Page, PageDraft, PageId, PageRef, PathId};
use crate::store::DataStore;
use tracing::{debug, info};

/// Pages of a path in reading order.
pub fn by_path<S: DataStore>(store: &S, path_id: &PathId) -> Result<Vec<Page>> {
    let lib = store.load()?;
    let pages: Vec<Page> = lib.pages_in_path(path_id)?.into_iter().cloned().collect();
    debug!(path = %path_id, count = pages.len(), "listed pages of path");
    Ok(pages)
}

/// Every page of a book: path discovery order, then ordinal.
pub fn by_book<S: DataStore>(store: &S, book_id: &BookId) -> Result<Vec<Page>> {
    let lib = store.load()?;
    Ok(lib.pages_in_book(book_id)?.into_iter().cloned().collect())
}

pub fn get<S: DataStore>(store: &S, page_id: &PageId) -> Result<Page> {
    let lib = store.load()?;
    Ok(lib.page(page_id)?.clone())
}

pub fn book_id_for_page<S: DataStore>(store: &S, page_id: &PageId) -> Result<BookId> {
    let lib = store.load()?;
    Ok(lib.page(page_id)?.book_id)
}

/// Creates a page (`PageRef::New`) or edits one in place.
///
/// - New pages need `draft.path_id`; they go after the path's last page unless
///   `draft.ordinal` says otherwise.
/// - Edits keep the page's path. An explicit ordinal moves the page within it.
/// - An ordinal already held by another page of the path is rejected.
pub fn save<S: DataStore>(store: &mut S, page_ref: PageRef, draft: &PageDraft) -> Result<Page> {
    if draft.title.trim().is_empty() {
        return Err(BookError::InvalidState("Page title cannot be empty".into()));
    }

    let page = store.transact(|lib| match page_ref {
        PageRef::New => {
            let path_id = draft.path_id.ok_or_else(|| {
                BookError::InvalidState("A new page needs the path it belongs to".into())
            })?;
            let path = lib.path(&path_id)?;
            let ordinal = match draft.ordinal {
                Some(ordinal) => {
                    ensure_free(lib.ordinal_taken(&path_id, ordinal, None), ordinal)?;
                    ordinal
                }
                None => lib.next_ordinal(&path_id)?,
            };
            let page = Page::new(path, ordinal, draft);
            lib.pages.insert(page.id, page.clone());
            Ok(page)
        }
        PageRef::Existing(page_id) => {
            let path_id = lib.page(&page_id)?.path_id;
            if let Some(moved_to) = draft.path_id {
                if moved_to != path_id {
                    return Err(BookError::InvalidState(
                        "Saving a page cannot move it to another path".into(),
                    ));
                }
            }
            if let Some(ordinal) = draft.ordinal {
                ensure_free(lib.ordinal_taken(&path_id, ordinal, Some(page_id)), ordinal)?;
            }
            let page = lib.page_mut(&page_id)?;
            page.apply(draft);
            if let Some(ordinal) = draft.ordinal {
                page.ordinal = ordinal;
            }
            Ok(page.clone())
        }
    })?;

    info!(
        page = %page.id,
        path = %page.path_id,
        ordinal = page.ordinal,
        created = matches!(page_ref, PageRef::New),
        "page saved"
    );
    Ok(page)
}

fn ensure_free(taken: bool, ordinal: u32) -> Result<()> {
    if taken {
        return Err(BookError::InvalidState(format!(
            "Ordinal {} is already used in this path",
            ordinal
        )));
    }
    Ok(())
}
