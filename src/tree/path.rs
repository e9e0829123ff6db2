use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use derive_more::{Deref, From, IntoIterator};

/// Names from the root down to a node, root name first
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deref, From, IntoIterator)]
pub struct TreePath(Vec<String>);

impl TreePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: &[impl AsRef<str>]) -> Self {
        segments.iter().map(|s| s.as_ref()).collect()
    }

    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    /// A copy of this path extended by one segment
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(name);
        path
    }

    /// Everything but the last segment, or `None` for an empty path
    pub fn parent(&self) -> Option<TreePath> {
        self.0
            .split_last()
            .map(|(_, parent)| TreePath(parent.to_vec()))
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for TreePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TreePath(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<&str>> for TreePath {
    fn from(segments: Vec<&str>) -> Self {
        segments.into_iter().collect()
    }
}

impl<const N: usize> From<[&str; N]> for TreePath {
    fn from(segments: [&str; N]) -> Self {
        segments.into_iter().collect()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" / "))
    }
}

/// Parses `a/b/c`, ignoring blank segments so `/a//b/` is `a / b`
impl FromStr for TreePath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("folder-tree/src/App.js", &["folder-tree", "src", "App.js"])]
    #[case("/folder-tree//src/", &["folder-tree", "src"])]
    #[case(" folder-tree / public ", &["folder-tree", "public"])]
    #[case("", &[])]
    fn parses_slash_separated(#[case] input: &str, #[case] expected: &[&str]) {
        let path: TreePath = input.parse().unwrap();
        assert_eq!(path.as_slice(), expected);
    }

    #[test]
    fn displays_with_separator() {
        let path = TreePath::from(["folder-tree", "src", "components", "Folder.js"]);
        assert_eq!(path.to_string(), "folder-tree / src / components / Folder.js");
    }

    #[test]
    fn child_and_parent() {
        let path = TreePath::from(["folder-tree", "src"]);
        let child = path.child("index.js");
        assert_eq!(child.len(), 3);
        assert_eq!(child.last(), Some("index.js"));
        assert_eq!(child.parent(), Some(path));
        assert_eq!(TreePath::new().parent(), None);
    }
}
