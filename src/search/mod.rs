//! Case-insensitive substring search over a tree snapshot.

use tracing::{debug, trace};

use crate::tree::{Node, TreePath};

/// A matching node and the full path leading to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub node: &'a Node,
    pub path: TreePath,
}

/// Every node under `root` whose name contains `query`, ignoring case.
///
/// Results come in pre-order: a parent before its descendants, children in
/// insertion order. An empty query matches every node.
pub fn search<'a>(root: Option<&'a Node>, query: &str) -> Vec<SearchHit<'a>> {
    let Some(root) = root else {
        return Vec::new();
    };

    let needle = query.to_lowercase();
    let mut hits = Vec::new();
    collect(root, &needle, TreePath::new(), &mut hits);
    debug!("Search for '{}' matched {} nodes", query, hits.len());
    hits
}

pub fn search_tree<'a>(root: &'a Node, query: &str) -> Vec<SearchHit<'a>> {
    search(Some(root), query)
}

fn collect<'a>(node: &'a Node, needle: &str, parent: TreePath, hits: &mut Vec<SearchHit<'a>>) {
    let path = parent.child(node.name.as_str());

    if node.name.to_lowercase().contains(needle) {
        trace!("Matched {}", path);
        hits.push(SearchHit {
            node,
            path: path.clone(),
        });
    }

    for child in &node.children {
        collect(child, needle, path.clone(), hits);
    }
}
