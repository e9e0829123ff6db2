use std::fmt;

use snafu::prelude::*;
use tracing::debug;

use crate::tree::{Node, TreePath};

/// An applied mutation, handed to every [`TreeListener`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeChange {
    Added { parent: TreePath, name: String },
    Renamed { path: TreePath, new_name: String },
    Deleted { path: TreePath },
}

/// Observer notified after each successful mutation
pub trait TreeListener {
    fn on_change(&mut self, change: &TreeChange, tree: &Node);
}

impl<F> TreeListener for F
where
    F: FnMut(&TreeChange, &Node),
{
    fn on_change(&mut self, change: &TreeChange, tree: &Node) {
        self(change, tree)
    }
}

/// Owns the tree document and applies edits addressed by path.
///
/// Sibling names are not unique. Every lookup takes the first child whose
/// name matches, in insertion order. Paths are fully resolved before
/// anything is changed, so a failed call leaves the tree as it was.
pub struct TreeStore {
    root: Node,
    revision: u64,
    listeners: Vec<Box<dyn TreeListener>>,
}

impl TreeStore {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            revision: 0,
            listeners: Vec::new(),
        }
    }

    /// A store holding [`Node::seed`]
    pub fn seeded() -> Self {
        Self::new(Node::seed())
    }

    pub fn tree(&self) -> &Node {
        &self.root
    }

    /// Number of mutations applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, listener: impl TreeListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Walk `path` from the root and return the node it names
    pub fn resolve(&self, path: &[impl AsRef<str>]) -> Result<&Node, TreeError> {
        let (first, rest) = path.split_first().context(EmptyPathSnafu)?;
        self.check_root(first.as_ref())?;

        let mut current = &self.root;
        for (depth, segment) in rest.iter().enumerate() {
            let segment = segment.as_ref();
            current = current
                .child(segment)
                .with_context(|| NodeNotFoundSnafu {
                    segment,
                    parent: TreePath::from_segments(&path[..=depth]),
                })?;
        }
        Ok(current)
    }

    fn resolve_mut(&mut self, path: &[impl AsRef<str>]) -> Result<&mut Node, TreeError> {
        let (first, rest) = path.split_first().context(EmptyPathSnafu)?;
        self.check_root(first.as_ref())?;

        let mut current = &mut self.root;
        for (depth, segment) in rest.iter().enumerate() {
            let segment = segment.as_ref();
            current = current
                .children
                .iter_mut()
                .find(|child| child.name == segment)
                .with_context(|| NodeNotFoundSnafu {
                    segment,
                    parent: TreePath::from_segments(&path[..=depth]),
                })?;
        }
        Ok(current)
    }

    fn check_root(&self, first: &str) -> Result<(), TreeError> {
        ensure!(
            self.root.name == first,
            PathMismatchSnafu {
                root: self.root.name.as_str(),
                found: first,
            }
        );
        Ok(())
    }

    /// Append `node` as the last child of the node at `path`
    pub fn add_child(&mut self, path: &[impl AsRef<str>], node: Node) -> Result<(), TreeError> {
        if path.is_empty() {
            debug!("Ignoring add with an empty path");
            return Ok(());
        }

        let parent = self.resolve_mut(path)?;
        let name = node.name.clone();
        parent.children.push(node);
        debug!("Added '{}' under {}", name, TreePath::from_segments(path));

        self.commit(TreeChange::Added {
            parent: TreePath::from_segments(path),
            name,
        });
        Ok(())
    }

    /// Replace the name of the node at `path`, keeping its children
    pub fn rename(
        &mut self,
        path: &[impl AsRef<str>],
        new_name: impl Into<String>,
    ) -> Result<(), TreeError> {
        if path.is_empty() {
            debug!("Ignoring rename with an empty path");
            return Ok(());
        }

        let new_name = new_name.into();
        let node = self.resolve_mut(path)?;
        debug!("Renaming '{}' to '{}'", node.name, new_name);
        node.name = new_name.clone();

        self.commit(TreeChange::Renamed {
            path: TreePath::from_segments(path),
            new_name,
        });
        Ok(())
    }

    /// Remove the first child of the parent whose name matches the last segment.
    ///
    /// A root-only path is checked against the root name and then ignored.
    pub fn delete(&mut self, path: &[impl AsRef<str>]) -> Result<(), TreeError> {
        let Some((last, parent_path)) = path.split_last() else {
            debug!("Ignoring delete with an empty path");
            return Ok(());
        };
        if parent_path.is_empty() {
            self.check_root(last.as_ref())?;
            debug!("Ignoring delete of the root node");
            return Ok(());
        }

        let last = last.as_ref();
        let parent = self.resolve_mut(parent_path)?;
        let index = parent
            .children
            .iter()
            .position(|child| child.name == last)
            .with_context(|| NodeNotFoundSnafu {
                segment: last,
                parent: TreePath::from_segments(parent_path),
            })?;
        let removed = parent.children.remove(index);
        debug!(
            "Deleted '{}' ({} nodes) from {}",
            removed.name,
            removed.node_count(),
            TreePath::from_segments(parent_path)
        );

        self.commit(TreeChange::Deleted {
            path: TreePath::from_segments(path),
        });
        Ok(())
    }

    fn commit(&mut self, change: TreeChange) {
        self.revision += 1;
        for listener in &mut self.listeners {
            listener.on_change(&change, &self.root);
        }
    }
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl fmt::Debug for TreeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeStore")
            .field("root", &self.root)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum TreeError {
    #[snafu(display("Path is empty"))]
    EmptyPath,
    #[snafu(display("Path starts at '{}' but the root node is '{}'", found, root))]
    PathMismatch { root: String, found: String },
    #[snafu(display("Node with name '{}' not found under {}", segment, parent))]
    NodeNotFound { segment: String, parent: TreePath },
}
