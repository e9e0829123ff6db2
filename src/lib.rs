//! An in-memory folder tree with path-addressed edits and substring search.
//!
//! - [`tree`]: the [`Node`](tree::Node) model and the
//!   [`TreeStore`](tree::TreeStore) that adds, renames and deletes nodes by path
//! - [`search`]: case-insensitive substring search returning full paths
//! - [`config`]: YAML seed trees and session scripts
//! - [`application`]/[`cli`]: the command-line front end
//!
//! ```
//! use folder_tree::search::search_tree;
//! use folder_tree::tree::{Node, TreeStore};
//!
//! let mut store = TreeStore::seeded();
//! store
//!     .add_child(&["folder-tree", "src"], Node::new("utils.js"))
//!     .unwrap();
//!
//! let hits = search_tree(store.tree(), "utils");
//! assert_eq!(hits[0].path.to_string(), "folder-tree / src / utils.js");
//! ```

pub mod application;
pub mod cli;
pub mod config;
mod ext;
pub mod search;
pub mod tree;
