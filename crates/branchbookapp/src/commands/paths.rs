use crate::error::{BookError, Result};
use crate::model::{BookId, Path, PathId};
use crate::store::DataStore;
use crate::tree::{PathNode, Removed};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Structural edits the authoring tree accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOp {
    Add,
    Rename,
    End,
    Delete,
}

impl FromStr for TreeOp {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(TreeOp::Add),
            "rename" => Ok(TreeOp::Rename),
            "end" => Ok(TreeOp::End),
            "delete" => Ok(TreeOp::Delete),
            other => Err(BookError::Parse(format!(
                "unknown tree operation '{}', expected add, rename, end or delete",
                other
            ))),
        }
    }
}

impl fmt::Display for TreeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TreeOp::Add => "add",
            TreeOp::Rename => "rename",
            TreeOp::End => "end",
            TreeOp::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum TreeOutcome {
    Added { path: Path },
    Renamed { path: Path },
    Ended { path: Path },
    Deleted { removed: Removed },
}

impl TreeOutcome {
    /// The path the operation produced or touched, if it still exists.
    pub fn path(&self) -> Option<&Path> {
        match self {
            TreeOutcome::Added { path }
            | TreeOutcome::Renamed { path }
            | TreeOutcome::Ended { path } => Some(path),
            TreeOutcome::Deleted { .. } => None,
        }
    }
}

/// Dispatches one tree operation. `label` is the new label for `add` and
/// `rename`; `fallback_label` names added paths when no label is given.
pub fn mutate<S: DataStore>(
    store: &mut S,
    op: TreeOp,
    path_id: &PathId,
    label: Option<&str>,
    fallback_label: &str,
) -> Result<TreeOutcome> {
    match op {
        TreeOp::Add => {
            add(store, path_id, label.unwrap_or_default(), fallback_label)
                .map(|path| TreeOutcome::Added { path })
        }
        TreeOp::Rename => {
            let label = label.ok_or_else(|| {
                BookError::InvalidState("Renaming a path requires a label".into())
            })?;
            rename(store, path_id, label).map(|path| TreeOutcome::Renamed { path })
        }
        TreeOp::End => end(store, path_id).map(|path| TreeOutcome::Ended { path }),
        TreeOp::Delete => delete(store, path_id).map(|removed| TreeOutcome::Deleted { removed }),
    }
}

/// Adds a child path at the end of the parent's branch list.
pub fn add<S: DataStore>(
    store: &mut S,
    parent_id: &PathId,
    label: &str,
    fallback_label: &str,
) -> Result<Path> {
    let label = match label.trim() {
        "" => fallback_label.trim(),
        trimmed => trimmed,
    };

    let path = store
        .transact(|lib| {
            let id = lib.add_child_path(parent_id, label.to_string())?;
            Ok(lib.path(&id)?.clone())
        })
        .inspect_err(|e| {
            if e.is_invalid_state() {
                warn!(parent = %parent_id, error = %e, "add path rejected");
            }
        })?;
    info!(path = %path.id, parent = %parent_id, label = %path.label, "path added");
    Ok(path)
}

pub fn rename<S: DataStore>(store: &mut S, path_id: &PathId, label: &str) -> Result<Path> {
    let label = label.trim();
    if label.is_empty() {
        return Err(BookError::InvalidState("Path label cannot be empty".into()));
    }

    let path = store.transact(|lib| {
        let path = lib.path_mut(path_id)?;
        path.label = label.to_string();
        Ok(path.clone())
    })?;
    info!(path = %path_id, label, "path renamed");
    Ok(path)
}

/// Seals a path against new branches. Ending an ended path is a no-op.
pub fn end<S: DataStore>(store: &mut S, path_id: &PathId) -> Result<Path> {
    let path = store.transact(|lib| {
        let path = lib.path_mut(path_id)?;
        path.ended = true;
        Ok(path.clone())
    })?;
    info!(path = %path_id, "path ended");
    Ok(path)
}

/// Deletes a path with its descendants and all their pages.
pub fn delete<S: DataStore>(store: &mut S, path_id: &PathId) -> Result<Removed> {
    let removed = store
        .transact(|lib| lib.remove_subtree(path_id))
        .inspect_err(|e| {
            if e.is_invalid_state() {
                warn!(path = %path_id, error = %e, "delete path rejected");
            }
        })?;
    info!(
        path = %path_id,
        paths = removed.paths,
        pages = removed.pages,
        "path deleted"
    );
    Ok(removed)
}

pub fn get<S: DataStore>(store: &S, path_id: &PathId) -> Result<Path> {
    let lib = store.load()?;
    Ok(lib.path(path_id)?.clone())
}

/// The child paths of a path, in branch order.
pub fn children<S: DataStore>(store: &S, path_id: &PathId) -> Result<Vec<Path>> {
    let lib = store.load()?;
    lib.path(path_id)?
        .children
        .iter()
        .map(|id| lib.path(id).cloned())
        .collect()
}

/// The whole path tree of a book, rooted at its root path.
pub fn tree<S: DataStore>(store: &S, book_id: &BookId) -> Result<PathNode> {
    let lib = store.load()?;
    let root = lib.book(book_id)?.root_path_id;
    lib.path_tree(&root)
}

pub fn book_id_for_path<S: DataStore>(store: &S, path_id: &PathId) -> Result<BookId> {
    let lib = store.load()?;
    Ok(lib.path(path_id)?.book_id)
}
