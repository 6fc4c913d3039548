use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::model::{BookId, PageId, PathId};
use crate::store::DataStore;
use crate::tree::{Library, PathNode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    pub id: PageId,
    pub title: String,
    pub ordinal: u32,
}

/// One path of the authoring outline with its pages and sub-paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineNode {
    pub id: PathId,
    pub label: String,
    pub ended: bool,
    pub pages: Vec<PageSummary>,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn page_count(&self) -> usize {
        self.pages.len() + self.children.iter().map(OutlineNode::page_count).sum::<usize>()
    }
}

/// Nested path and page tree of a book, rooted at its root path.
pub fn run<S: DataStore>(store: &S, book_id: &BookId) -> Result<OutlineNode> {
    let lib = store.load()?;
    let root = lib.book(book_id)?.root_path_id;
    let tree = lib.path_tree(&root)?;
    let outline = build(&lib, &tree)?;
    debug!(
        book = %book_id,
        paths = tree.path_count(),
        pages = outline.page_count(),
        "built outline"
    );
    Ok(outline)
}

fn build(lib: &Library, node: &PathNode) -> Result<OutlineNode> {
    let pages = lib
        .pages_in_path(&node.path.id)?
        .into_iter()
        .map(|p| PageSummary {
            id: p.id,
            title: p.title.clone(),
            ordinal: p.ordinal,
        })
        .collect();
    let children = node
        .children
        .iter()
        .map(|child| build(lib, child))
        .collect::<Result<Vec<_>>>()?;

    Ok(OutlineNode {
        id: node.path.id,
        label: node.path.label.clone(),
        ended: node.path.ended,
        pages,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Visibility;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn outline_mirrors_tree_and_page_order() {
        let mut fx = StoreFixture::new();
        let (book, root) = fx.book("Cave", Visibility::Private);
        fx.pages(root, &["intro", "hall"]);
        let left = fx.branch(root, "Left");
        let right = fx.branch(root, "Right");
        let deeper = fx.branch(left, "Deeper");
        fx.pages(deeper, &["bottom"]);
        fx.end(right);

        let outline = run(&fx.store, &book).unwrap();

        assert_eq!(outline.id, root);
        assert_eq!(outline.label, "Cave");
        let titles: Vec<&str> = outline.pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["intro", "hall"]);
        assert_eq!(outline.pages[1].ordinal, 2);

        let kids: Vec<PathId> = outline.children.iter().map(|c| c.id).collect();
        assert_eq!(kids, vec![left, right]);
        assert!(outline.children[1].ended);
        assert_eq!(outline.children[0].children[0].id, deeper);
        assert_eq!(outline.children[0].children[0].pages[0].title, "bottom");
        assert_eq!(outline.page_count(), 3);
    }

    #[test]
    fn outline_of_missing_book_is_not_found() {
        let fx = StoreFixture::new();
        let err = run(&fx.store, &uuid::Uuid::new_v4()).unwrap_err();
        assert!(err.is_not_found());
    }
}
