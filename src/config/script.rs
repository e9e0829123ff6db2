use std::path::{Path, PathBuf};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Yaml};
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::ext::{MappingExt, YamlExt};
use crate::tree::TreePath;

/// One edit or query applied to the tree by a session script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Add { path: TreePath, name: String },
    Rename { path: TreePath, name: String },
    Delete { path: TreePath },
    Search { query: String },
    Show { path: Option<TreePath> },
}

/// Ordered list of [`Step`]s read from the `steps` key of a YAML file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub async fn read(path: &Path) -> Result<Self, ScriptError> {
        debug!("Reading script file: {}", path.display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.to_path_buf(),
        })?;
        let contents = String::from_utf8(bytes).context(InvalidUtf8Snafu)?;
        contents.as_str().try_into()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn parse_step(index: usize, entry: &Yaml) -> Result<Option<Step>, ScriptError> {
        if let Some(kind) = entry.as_str() {
            return match kind {
                "show" => Ok(Some(Step::Show { path: None })),
                other => {
                    warn!("Unknown step '{}' at index {}. Skipping.", other, index);
                    Ok(None)
                }
            };
        }

        let mapping = entry.as_mapping().context(InvalidStepSnafu {
            index,
            reason: "expected a step name or a single-key map",
        })?;
        ensure!(
            mapping.len() == 1,
            InvalidStepSnafu {
                index,
                reason: format!("expected exactly one key, found {}", mapping.len()),
            }
        );
        let Some((key, value)) = mapping.iter().next() else {
            return InvalidStepSnafu {
                index,
                reason: "empty step",
            }
            .fail();
        };
        let kind = key.as_str().context(InvalidStepSnafu {
            index,
            reason: "step name should be a string",
        })?;

        let step = match kind {
            "add" => {
                let fields = Self::fields(index, value)?;
                Step::Add {
                    path: Self::required_path(index, fields)?,
                    name: Self::name_field(index, fields)?,
                }
            }
            "rename" => {
                let fields = Self::fields(index, value)?;
                Step::Rename {
                    path: Self::required_path(index, fields)?,
                    name: Self::name_field(index, fields)?,
                }
            }
            "delete" => {
                let fields = Self::fields(index, value)?;
                Step::Delete {
                    path: Self::required_path(index, fields)?,
                }
            }
            "search" => Step::Search {
                query: if value.is_null_value() {
                    String::new()
                } else {
                    Self::text(index, value, "search query")?.context(InvalidStepSnafu {
                        index,
                        reason: "search query should be a string",
                    })?
                },
            },
            "show" => Step::Show {
                path: if value.is_null_value() {
                    None
                } else {
                    Some(Self::path_value(index, value)?)
                },
            },
            other => {
                warn!("Unknown step '{}' at index {}. Skipping.", other, index);
                return Ok(None);
            }
        };

        Ok(Some(step))
    }

    fn fields<'y, 'input>(
        index: usize,
        value: &'y Yaml<'input>,
    ) -> Result<&'y LinkedHashMap<Yaml<'input>, Yaml<'input>>, ScriptError> {
        value.as_mapping().context(InvalidStepSnafu {
            index,
            reason: "step arguments should be a map",
        })
    }

    fn required_path(
        index: usize,
        fields: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<TreePath, ScriptError> {
        let value = fields.get_key("path").context(InvalidStepSnafu {
            index,
            reason: "missing 'path'",
        })?;
        Self::path_value(index, value)
    }

    /// Either `[a, b, c]` or `a/b/c`
    fn path_value(index: usize, value: &Yaml) -> Result<TreePath, ScriptError> {
        if let Some(segments) = value.as_sequence() {
            return segments
                .iter()
                .map(|segment| {
                    Self::text(index, segment, "path segment")?.context(InvalidStepSnafu {
                        index,
                        reason: "path segments should be strings",
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(TreePath::from);
        }

        let raw = Self::text(index, value, "path")?.context(InvalidStepSnafu {
            index,
            reason: "path should be a list or a '/'-separated string",
        })?;
        let Ok(path) = raw.parse::<TreePath>();
        Ok(path)
    }

    /// Missing or null names become empty strings and are rejected later by validation
    fn name_field(
        index: usize,
        fields: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<String, ScriptError> {
        let name = match fields.get_key("name") {
            Some(name) => Self::text(index, name, "name")?,
            None => None,
        };
        Ok(name.unwrap_or_default())
    }

    /// String scalars as-is. Numbers and booleans are refused since YAML has
    /// already rewritten them (`007` reads as `7`).
    fn text(index: usize, value: &Yaml, what: &str) -> Result<Option<String>, ScriptError> {
        if let Some(unquoted) = value.unquoted_scalar() {
            return InvalidStepSnafu {
                index,
                reason: format!("{what} '{unquoted}' is not text; quote it"),
            }
            .fail();
        }
        Ok(value.to_name())
    }
}

impl TryFrom<&str> for Script {
    type Error = ScriptError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedScriptSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let steps = match top_level.get_key("steps") {
            None => Vec::new(),
            Some(steps) if steps.is_null_value() => Vec::new(),
            Some(steps) => {
                let mut parsed = Vec::new();
                for (index, entry) in steps
                    .as_sequence()
                    .context(StepsNotSequenceSnafu)?
                    .iter()
                    .enumerate()
                {
                    if let Some(step) = Self::parse_step(index, entry)? {
                        parsed.push(step);
                    }
                }
                parsed
            }
        };

        debug!("Parsed script with {} steps", steps.len());
        Ok(Script { steps })
    }
}

#[derive(Debug, Snafu)]
pub enum ScriptError {
    #[snafu(display("Failed to read the script file: {}", file_path.display()))]
    ReadError {
        file_path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Script file is not valid UTF-8"))]
    InvalidUtf8Error { source: std::string::FromUtf8Error },
    #[snafu(display("Failed to parse the script file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted script file"))]
    MalformedScript,
    #[snafu(display("Top level of the script should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Steps section should be a list"))]
    StepsNotSequence,
    #[snafu(display("Step {} is invalid: {}", index, reason))]
    InvalidStep { index: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCRIPT_YAML: &str = r#"
steps:
  - add: { path: [folder-tree, src], name: utils.js }
  - rename:
      path: folder-tree/src/App.js
      name: App.tsx
  - delete: { path: [folder-tree, package.json] }
  - search: js
  - show
  - show: folder-tree/src
"#;

    #[test]
    fn parses_every_step_kind() {
        let script: Script = SCRIPT_YAML.try_into().unwrap();
        assert_eq!(
            script.steps(),
            &[
                Step::Add {
                    path: TreePath::from(["folder-tree", "src"]),
                    name: "utils.js".into(),
                },
                Step::Rename {
                    path: TreePath::from(["folder-tree", "src", "App.js"]),
                    name: "App.tsx".into(),
                },
                Step::Delete {
                    path: TreePath::from(["folder-tree", "package.json"]),
                },
                Step::Search { query: "js".into() },
                Step::Show { path: None },
                Step::Show {
                    path: Some(TreePath::from(["folder-tree", "src"])),
                },
            ]
        );
    }

    #[test]
    fn missing_steps_is_empty() {
        let script: Script = "other: value".try_into().unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn unknown_steps_are_skipped() {
        let script: Script = "steps:\n  - explode\n  - copy: { path: a }\n  - show"
            .try_into()
            .unwrap();
        assert_eq!(script.steps(), &[Step::Show { path: None }]);
    }

    #[test]
    fn blank_name_is_kept_for_validation() {
        let script: Script = "steps:\n  - add: { path: [folder-tree], name: '   ' }\n  - add: { path: [folder-tree] }"
            .try_into()
            .unwrap();
        assert_eq!(
            script.steps(),
            &[
                Step::Add {
                    path: TreePath::from(["folder-tree"]),
                    name: "   ".into(),
                },
                Step::Add {
                    path: TreePath::from(["folder-tree"]),
                    name: String::new(),
                },
            ]
        );
    }

    #[test]
    fn empty_search_query() {
        let script: Script = "steps:\n  - search:".try_into().unwrap();
        assert_eq!(script.steps(), &[Step::Search { query: String::new() }]);
    }

    #[test]
    fn step_without_path_is_invalid() {
        let result: Result<Script, _> = "steps:\n  - delete: { name: x }".try_into();
        match result {
            Err(ScriptError::InvalidStep { index, reason }) => {
                assert_eq!(index, 0);
                assert!(reason.contains("path"));
            }
            other => panic!("Expected InvalidStep, got {other:?}"),
        }
    }

    #[test]
    fn multi_key_step_is_invalid() {
        let result: Result<Script, _> =
            "steps:\n  - show\n  - { add: { path: a, name: b }, delete: { path: a } }".try_into();
        assert!(matches!(
            result,
            Err(ScriptError::InvalidStep { index: 1, .. })
        ));
    }

    #[test]
    fn unquoted_number_segment_is_invalid() {
        let result: Result<Script, _> =
            "steps:\n  - delete: { path: [folder-tree, 007] }".try_into();
        match result {
            Err(ScriptError::InvalidStep { index, reason }) => {
                assert_eq!(index, 0);
                assert!(reason.contains("quote"));
            }
            other => panic!("Expected InvalidStep, got {other:?}"),
        }
    }

    #[test]
    fn unquoted_boolean_name_is_invalid() {
        let result: Result<Script, _> =
            "steps:\n  - show\n  - rename: { path: [folder-tree, src], name: true }".try_into();
        assert!(matches!(
            result,
            Err(ScriptError::InvalidStep { index: 1, ref reason }) if reason.contains("'true'")
        ));
    }

    #[test]
    fn quoted_numbers_are_names() {
        let script: Script =
            "steps:\n  - add: { path: [folder-tree, '2024'], name: '1.0' }\n  - search: '007'"
                .try_into()
                .unwrap();
        assert_eq!(
            script.steps(),
            &[
                Step::Add {
                    path: TreePath::from(["folder-tree", "2024"]),
                    name: "1.0".into(),
                },
                Step::Search {
                    query: "007".into()
                },
            ]
        );
    }

    #[test]
    fn top_level_list_is_rejected() {
        let result: Result<Script, _> = "- show".try_into();
        assert!(matches!(result, Err(ScriptError::TopLevelNotMap)));
    }

    #[test]
    fn steps_must_be_a_list() {
        let result: Result<Script, _> = "steps: show".try_into();
        assert!(matches!(result, Err(ScriptError::StepsNotSequence)));
    }

    #[test]
    fn empty_file_is_malformed() {
        let result: Result<Script, _> = "".try_into();
        assert!(matches!(result, Err(ScriptError::MalformedScript)));
    }

    #[compio::test]
    async fn reads_script_from_disk() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "{}", SCRIPT_YAML).expect("Failed to write script");

        let script = Script::read(file.path()).await.unwrap();
        assert_eq!(script.len(), 6);
    }

    #[compio::test]
    async fn missing_script_is_read_error() {
        let result = Script::read(Path::new("nonexistent.yaml")).await;
        assert!(matches!(result, Err(ScriptError::ReadError { .. })));
    }
}
