//! # Domain Model: Books, Paths and Pages
//!
//! This module defines the records that make up a branching book: [`Book`],
//! [`Path`] and [`Page`], plus the small value types used to edit them.
//!
//! ## The Shape of a Book
//!
//! ```text
//! Book ──▶ root Path: [page 1, page 2, page 3]
//!                 ├── Path "Open the door": [page 4, page 5]
//!                 │        └── Path "Run": [page 6]
//!                 └── Path "Walk away": [page 7]
//! ```
//!
//! A reader moves through a path's pages in ordinal order. When the pages run
//! out, the path's children are offered as options, and choosing one starts
//! reading that child path from its first page.
//!
//! ## Records Reference Each Other by Id
//!
//! Records never hold references to one another. A path stores its parent id and
//! an ordered list of child ids; a page stores its path id and (denormalized) its
//! book id. The arena that owns all of them lives in [`crate::tree`].
//!
//! ## Ordinals
//!
//! A page's position is an explicit `ordinal`, unique within its path. Ordinals
//! may have gaps (`1, 2, 5`): only relative order matters and nothing is ever
//! renumbered.
//!
//! ## Text Normalization
//!
//! - Titles and labels are trimmed. Blank titles are rejected by the commands
//!   that save them.
//! - Previews shown next to branch options are cut at [`PREVIEW_CHARS`]
//!   characters (the last one replaced with an ellipsis `…`).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{BookError, RecordKind, Result};

pub type BookId = Uuid;
pub type PathId = Uuid;
pub type PageId = Uuid;

/// Maximum length of a page preview, ellipsis included.
pub const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl FromStr for Visibility {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(BookError::Parse(format!(
                "unknown visibility '{}', expected public or private",
                other
            ))),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub owner: String,
    #[serde(default)]
    pub visibility: Visibility,
    pub root_path_id: PathId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Builds a book together with the root path it points at.
    pub fn with_root(owner: &str, title: &str, visibility: Visibility) -> (Book, Path) {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let title = title.trim().to_string();
        let root = Path::new(id, None, title.clone());
        let book = Book {
            id,
            title,
            owner: owner.trim().to_string(),
            visibility,
            root_path_id: root.id,
            created_at: now,
            updated_at: now,
        };
        (book, root)
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub id: PathId,
    pub book_id: BookId,
    /// `None` only for the book's root path.
    pub parent_id: Option<PathId>,
    /// Alternative continuations, in the order they are offered to readers.
    #[serde(default)]
    pub children: Vec<PathId>,
    pub label: String,
    #[serde(default)]
    pub ended: bool,
    pub created_at: DateTime<Utc>,
}

impl Path {
    pub fn new(book_id: BookId, parent_id: Option<PathId>, label: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            book_id,
            parent_id,
            children: Vec::new(),
            label,
            ended: false,
            created_at: Utc::now(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub path_id: PathId,
    pub book_id: BookId,
    pub ordinal: u32,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub publish_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(path: &Path, ordinal: u32, draft: &PageDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            path_id: path.id,
            book_id: path.book_id,
            ordinal,
            title: draft.title.trim().to_string(),
            content: draft.content.clone(),
            publish_date: draft.publish_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites the editable fields. Position and ownership are untouched.
    pub fn apply(&mut self, draft: &PageDraft) {
        self.title = draft.title.trim().to_string();
        self.content = draft.content.clone();
        self.publish_date = draft.publish_date;
        self.updated_at = Utc::now();
    }

    /// Short text shown when this page stands in for a whole path.
    pub fn preview(&self) -> String {
        let source = if self.content.trim().is_empty() {
            self.title.as_str()
        } else {
            self.content.trim()
        };
        let flat = source.split_whitespace().collect::<Vec<_>>().join(" ");
        truncate_preview(&flat)
    }
}

/// Editable fields of a page, as submitted by the compose form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDraft {
    /// Required when creating; ignored when updating an existing page.
    pub path_id: Option<PathId>,
    pub title: String,
    pub content: String,
    pub publish_date: Option<NaiveDate>,
    /// Explicit position. New pages go after the current last page when absent.
    pub ordinal: Option<u32>,
}

impl PageDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn in_path(mut self, path_id: PathId) -> Self {
        self.path_id = Some(path_id);
        self
    }

    pub fn published_on(mut self, date: NaiveDate) -> Self {
        self.publish_date = Some(date);
        self
    }

    pub fn at_ordinal(mut self, ordinal: u32) -> Self {
        self.ordinal = Some(ordinal);
        self
    }
}

/// Which page `save_page` should write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRef {
    New,
    Existing(PageId),
}

impl FromStr for PageRef {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim() == "new" {
            return Ok(PageRef::New);
        }
        parse_id(RecordKind::Page, s).map(PageRef::Existing)
    }
}

/// Parses an opaque identifier. Anything that is not an id cannot resolve to
/// a record, so it is reported as not found.
pub fn parse_id(kind: RecordKind, raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| BookError::not_found(kind, raw.trim()))
}

fn truncate_preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let truncated: String = text.chars().take(PREVIEW_CHARS - 1).collect();
        format!("{}…", truncated)
    } else {
        text.to_string()
    }
}
