use crate::error::{BookError, Result};
use crate::model::{Book, BookId, Visibility};
use crate::store::DataStore;
use crate::tree::Removed;
use chrono::Utc;
use tracing::{debug, info};

/// Metadata edits for an existing book. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub visibility: Option<Visibility>,
}

/// Creates a book together with its root path, labelled after the book.
pub fn create<S: DataStore>(
    store: &mut S,
    owner: &str,
    title: &str,
    visibility: Visibility,
) -> Result<Book> {
    if title.trim().is_empty() {
        return Err(BookError::InvalidState("Book title cannot be empty".into()));
    }
    if owner.trim().is_empty() {
        return Err(BookError::InvalidState("Book owner cannot be empty".into()));
    }

    let book = store.transact(|lib| {
        let (book, root) = Book::with_root(owner, title, visibility);
        lib.insert_book(book.clone(), root);
        Ok(book)
    })?;
    info!(book = %book.id, title = %book.title, "book created");
    Ok(book)
}

pub fn get<S: DataStore>(store: &S, book_id: &BookId) -> Result<Book> {
    let lib = store.load()?;
    Ok(lib.book(book_id)?.clone())
}

pub fn update<S: DataStore>(store: &mut S, book_id: &BookId, update: BookUpdate) -> Result<Book> {
    if let Some(title) = &update.title {
        if title.trim().is_empty() {
            return Err(BookError::InvalidState("Book title cannot be empty".into()));
        }
    }

    let book = store.transact(|lib| {
        let book = lib.book_mut(book_id)?;
        if let Some(title) = update.title {
            book.title = title.trim().to_string();
        }
        if let Some(visibility) = update.visibility {
            book.visibility = visibility;
        }
        book.updated_at = Utc::now();
        Ok(book.clone())
    })?;
    info!(book = %book.id, "book updated");
    Ok(book)
}

/// Deletes a book with all of its paths and pages.
pub fn delete<S: DataStore>(store: &mut S, book_id: &BookId) -> Result<Removed> {
    let removed = store.transact(|lib| lib.remove_book(book_id))?;
    info!(
        book = %book_id,
        paths = removed.paths,
        pages = removed.pages,
        "book deleted"
    );
    Ok(removed)
}

/// Books of one owner, newest first.
pub fn by_owner<S: DataStore>(store: &S, owner: &str) -> Result<Vec<Book>> {
    let lib = store.load()?;
    let owner = owner.trim();
    let mut books: Vec<Book> = lib
        .books
        .values()
        .filter(|b| b.owner == owner)
        .cloned()
        .collect();
    sort_newest_first(&mut books);
    Ok(books)
}

/// Public books, newest first, at most `limit` of them.
pub fn public<S: DataStore>(store: &S, limit: usize) -> Result<Vec<Book>> {
    let lib = store.load()?;
    let mut books: Vec<Book> = lib.books.values().filter(|b| b.is_public()).cloned().collect();
    sort_newest_first(&mut books);
    books.truncate(limit);
    debug!(count = books.len(), limit, "listed public books");
    Ok(books)
}

fn sort_newest_first(books: &mut [Book]) {
    books.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.title.cmp(&b.title))
    });
}
