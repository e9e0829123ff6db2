use std::path::{Path, PathBuf};

use compio::fs;
use saphyr::{LoadableYamlNode, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::ext::{MappingExt, YamlExt};
use crate::tree::{Node, TreePath};

/// Initial tree loaded from YAML instead of the built-in seed.
///
/// ```yaml
/// name: folder-tree
/// children:
///   - name: public
///     children:
///       - index.html
///   - package.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFile {
    root: Node,
}

impl SeedFile {
    pub async fn read(path: &Path) -> Result<Self, SeedFileError> {
        debug!("Reading seed file: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.to_path_buf(),
        })?;
        debug!("Read seed file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(InvalidUtf8Snafu)?;
        contents.as_str().try_into()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// Plain or quoted text. Numbers and booleans lose their spelling during
    /// parsing, so they are refused instead of converted.
    fn name_of(yaml: &Yaml, parent: &TreePath) -> Result<Option<String>, SeedFileError> {
        if let Some(value) = yaml.unquoted_scalar() {
            return UnquotedNameSnafu {
                parent: parent.clone(),
                value,
            }
            .fail();
        }
        Ok(yaml.to_name())
    }

    fn parse_node(yaml: &Yaml, parent: &TreePath) -> Result<Node, SeedFileError> {
        if let Some(name) = Self::name_of(yaml, parent)? {
            return Ok(Node::new(name));
        }

        let mapping = yaml.as_mapping().context(NodeNotMapSnafu {
            parent: parent.clone(),
        })?;
        let name = mapping
            .get_key("name")
            .map(|name| Self::name_of(name, parent))
            .transpose()?
            .flatten()
            .context(MissingNameSnafu {
                parent: parent.clone(),
            })?;
        let path = parent.child(name.as_str());

        let children = match mapping.get_key("children") {
            None => Vec::new(),
            Some(children) if children.is_null_value() => Vec::new(),
            Some(children) => children
                .as_sequence()
                .context(ChildrenNotSequenceSnafu { path: path.clone() })?
                .iter()
                .map(|child| Self::parse_node(child, &path))
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(Node::with_children(name, children))
    }
}

impl TryFrom<&str> for SeedFile {
    type Error = SeedFileError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedSeedSnafu)?;
        let root = Self::parse_node(document, &TreePath::new())?;
        debug!("Parsed seed tree with {} nodes", root.node_count());
        Ok(SeedFile { root })
    }
}

#[derive(Debug, Snafu)]
pub enum SeedFileError {
    #[snafu(display("Failed to read the seed file: {}", file_path.display()))]
    ReadError {
        file_path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Seed file is not valid UTF-8"))]
    InvalidUtf8Error { source: std::string::FromUtf8Error },
    #[snafu(display("Failed to parse the seed file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Seed file contains no document"))]
    MalformedSeed,
    #[snafu(display("Entry under '{}' should be a name or a map", parent))]
    NodeNotMap { parent: TreePath },
    #[snafu(display(
        "Entry '{}' under '{}' is not text; quote it to use it as a name",
        value,
        parent
    ))]
    UnquotedName { parent: TreePath, value: String },
    #[snafu(display("Entry under '{}' has no name", parent))]
    MissingName { parent: TreePath },
    #[snafu(display("Children of '{}' should be a list", path))]
    ChildrenNotSequence { path: TreePath },
}
