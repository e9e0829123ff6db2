use derive_more::Display;

/// How a node is presented. Derived from the name only, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NodeKind {
    #[display("folder")]
    Folder,
    #[display("file")]
    File,
}

impl NodeKind {
    /// Names containing a `.` are treated as files, everything else as folders
    pub fn from_name(name: &str) -> Self {
        if name.contains('.') {
            NodeKind::File
        } else {
            NodeKind::Folder
        }
    }

    pub const fn is_folder(self) -> bool {
        matches!(self, NodeKind::Folder)
    }

    pub const fn is_file(self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// A single entry of the tree: a name and its ordered children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    pub name: String,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node without children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(name: impl Into<String>, children: impl IntoIterator<Item = Node>) -> Self {
        Self {
            name: name.into(),
            children: children.into_iter().collect(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::from_name(&self.name)
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// First child with exactly this name
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|child| child.name.as_str()).collect()
    }

    /// The example project layout every session starts from
    pub fn seed() -> Self {
        Node::with_children(
            "folder-tree",
            [
                Node::with_children("public", [Node::new("index.html")]),
                Node::with_children(
                    "src",
                    [
                        Node::with_children("components", [Node::new("Folder.js")]),
                        Node::new("App.js"),
                        Node::new("index.js"),
                        Node::new("styles.css"),
                    ],
                ),
                Node::new("package.json"),
            ],
        )
    }
}
