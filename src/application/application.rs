use std::io::{self, Write};

use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::{Command, Report, RuntimeConfig, Session};
use crate::config::{Script, ScriptError, SeedFile, SeedFileError};
use crate::tree::{InvalidNameError, Node, TreeError, TreePath, TreeStore};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let root = match &app_config.seed {
            Some(path) => SeedFile::read(path)
                .await
                .context(SeedLoadSnafu)?
                .into_root(),
            None => Node::seed(),
        };
        info!("Loaded tree '{}' with {} nodes", root.name, root.node_count());

        let mut session = Session::new(TreeStore::new(root), Report::new(app_config.color));
        let mut stdout = io::stdout();

        match &app_config.command {
            Command::Show { path } => {
                let text = session.show(path.as_ref())?;
                stdout.write_all(text.as_bytes()).context(OutputSnafu)?;
            }
            Command::Search { query } => {
                let text = session.search(query);
                stdout.write_all(text.as_bytes()).context(OutputSnafu)?;
            }
            Command::Run { script, keep_going } => {
                let script = Script::read(script).await.context(ScriptLoadSnafu)?;
                info!("Running {} steps", script.len());
                session.run_script(&script, *keep_going, &mut stdout)?;
            }
        }

        stdout.flush().context(OutputSnafu)?;
        Ok(())
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the seed tree"))]
    SeedLoadError { source: SeedFileError },
    #[snafu(display("Critical failure encountered while loading the script"))]
    ScriptLoadError { source: ScriptError },
    #[snafu(display("Rejected name"))]
    InvalidName { source: InvalidNameError },
    #[snafu(display("Tree operation failed"))]
    TreeEdit { source: TreeError },
    #[snafu(display("The root folder '{}' cannot be renamed, deleted or given children", path))]
    ProtectedRoot { path: TreePath },
    #[snafu(display("'{}' is a file and cannot hold children", path))]
    NotAFolder { path: TreePath },
    #[snafu(display("Failed to write output"))]
    OutputError { source: io::Error },
    #[snafu(display("{} of {} steps failed", failed, total))]
    StepsFailed { failed: usize, total: usize },
}

impl ApplicationError {
    /// Failures confined to a single script step, which `--keep-going` skips past
    pub fn is_step_failure(&self) -> bool {
        matches!(
            self,
            ApplicationError::InvalidName { .. }
                | ApplicationError::TreeEdit { .. }
                | ApplicationError::ProtectedRoot { .. }
                | ApplicationError::NotAFolder { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn config(command: Command) -> RuntimeConfig {
        RuntimeConfig {
            seed: None,
            command,
            color: false,
        }
    }

    #[compio::test]
    async fn shows_builtin_seed() {
        let result = Application::run(config(Command::Show { path: None })).await;
        assert!(result.is_ok());
    }

    #[compio::test]
    async fn missing_seed_file_fails() {
        let mut app_config = config(Command::Search { query: "js".into() });
        app_config.seed = Some(PathBuf::from("nonexistent-seed.yaml"));

        let result = Application::run(app_config).await;
        assert!(matches!(result, Err(ApplicationError::SeedLoadError { .. })));
    }

    #[compio::test]
    async fn runs_script_against_custom_seed() {
        let mut seed = NamedTempFile::new().expect("Failed to create temp file");
        write!(seed, "name: app\nchildren: [{{ name: src, children: [main.rs] }}]")
            .expect("Failed to write seed");
        let mut script = NamedTempFile::new().expect("Failed to create temp file");
        write!(
            script,
            "steps:\n  - add: {{ path: [app, src], name: lib.rs }}\n  - search: RS"
        )
        .expect("Failed to write script");

        let mut app_config = config(Command::Run {
            script: script.path().to_path_buf(),
            keep_going: false,
        });
        app_config.seed = Some(seed.path().to_path_buf());

        assert!(Application::run(app_config).await.is_ok());
    }

    #[compio::test]
    async fn script_error_surfaces() {
        let mut script = NamedTempFile::new().expect("Failed to create temp file");
        write!(script, "steps:\n  - rename: {{ path: [elsewhere], name: x }}")
            .expect("Failed to write script");

        let result = Application::run(config(Command::Run {
            script: script.path().to_path_buf(),
            keep_going: false,
        }))
        .await;
        assert!(matches!(
            result,
            Err(ApplicationError::TreeEdit {
                source: TreeError::PathMismatch { .. }
            })
        ));
    }

    #[compio::test]
    async fn adding_under_root_is_refused() {
        let mut script = NamedTempFile::new().expect("Failed to create temp file");
        write!(script, "steps:\n  - add: {{ path: [folder-tree], name: notes }}")
            .expect("Failed to write script");

        let result = Application::run(config(Command::Run {
            script: script.path().to_path_buf(),
            keep_going: false,
        }))
        .await;
        assert!(matches!(result, Err(ApplicationError::ProtectedRoot { .. })));
    }

    #[test]
    fn step_failures_are_classified() {
        assert!(ApplicationError::InvalidName {
            source: InvalidNameError::Blank
        }
        .is_step_failure());
        assert!(ApplicationError::NotAFolder {
            path: TreePath::from(["folder-tree", "package.json"])
        }
        .is_step_failure());
        assert!(!ApplicationError::StepsFailed {
            failed: 1,
            total: 1
        }
        .is_step_failure());
    }
}
