use colored::Colorize;

use crate::search::SearchHit;
use crate::tree::{Node, NodeKind};

const INDENT: &str = "  ";

/// Turns trees and search results into terminal text
#[derive(Debug, Clone, Copy)]
pub struct Report {
    color: bool,
}

impl Report {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    /// One line per node, indented by depth
    pub fn tree(&self, root: &Node) -> String {
        let mut out = String::new();
        self.write_node(&mut out, root, 0);
        out
    }

    fn write_node(&self, out: &mut String, node: &Node, depth: usize) {
        out.push_str(&INDENT.repeat(depth));
        out.push_str(&self.label(node));
        out.push('\n');
        for child in &node.children {
            self.write_node(out, child, depth + 1);
        }
    }

    pub fn search(&self, hits: &[SearchHit<'_>]) -> String {
        if hits.is_empty() {
            return "No results found\n".to_string();
        }

        let mut out = String::new();
        for hit in hits {
            let path = hit.path.to_string();
            let path = if self.color {
                path.dimmed().to_string()
            } else {
                path
            };
            out.push_str(&self.label(hit.node));
            out.push('\n');
            out.push_str(&INDENT.repeat(2));
            out.push_str(&path);
            out.push('\n');
        }
        out
    }

    /// Icon and name, folders in bold blue when color is on
    fn label(&self, node: &Node) -> String {
        let kind = node.kind();
        let name = if !self.color {
            node.name.clone()
        } else if kind.is_folder() {
            node.name.blue().bold().to_string()
        } else {
            node.name.normal().to_string()
        };
        format!("{} {}", Self::icon(kind), name)
    }

    fn icon(kind: NodeKind) -> &'static str {
        match kind {
            NodeKind::Folder => "📁",
            NodeKind::File => "📄",
        }
    }
}
