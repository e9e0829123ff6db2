//! In-memory folder tree and the store that edits it.
//!
//! The tree is a plain owned structure: each [`Node`] owns its children and
//! the [`TreeStore`] owns the root. Nodes are addressed by [`TreePath`], the
//! list of names from the root down.

mod name;
mod node;
mod path;
mod store;

pub use name::{InvalidNameError, is_valid_name, validate_name};
pub use node::{Node, NodeKind};
pub use path::TreePath;
pub use store::{TreeChange, TreeError, TreeListener, TreeStore};
