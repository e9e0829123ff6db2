use std::io::Write;

use snafu::prelude::*;
use tracing::{debug, error, info};

use crate::application::{
    ApplicationError, InvalidNameSnafu, NotAFolderSnafu, OutputSnafu, ProtectedRootSnafu, Report,
    StepsFailedSnafu, TreeEditSnafu,
};
use crate::config::{Script, Step};
use crate::search::search_tree;
use crate::tree::{Node, TreeChange, TreePath, TreeStore, validate_name};

/// A tree store driven by user input: names are validated before they
/// reach the store and results are rendered through a [`Report`].
#[derive(Debug)]
pub struct Session {
    store: TreeStore,
    report: Report,
}

impl Session {
    pub fn new(mut store: TreeStore, report: Report) -> Self {
        store.subscribe(log_change);
        Self { store, report }
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    pub fn show(&self, path: Option<&TreePath>) -> Result<String, ApplicationError> {
        let node = match path {
            Some(path) => self.store.resolve(path.as_slice()).context(TreeEditSnafu)?,
            None => self.store.tree(),
        };
        Ok(self.report.tree(node))
    }

    /// An empty query means "no search" and renders nothing
    pub fn search(&self, query: &str) -> String {
        if query.is_empty() {
            debug!("Empty query, skipping search");
            return String::new();
        }
        self.report.search(&search_tree(self.store.tree(), query))
    }

    /// Apply one step, returning the text it produced, if any.
    ///
    /// The root is fixed: it cannot be renamed, deleted or given children.
    /// Children can only be added under folders.
    pub fn apply(&mut self, step: &Step) -> Result<Option<String>, ApplicationError> {
        match step {
            Step::Add { path, name } => {
                let name = validate_name(name).context(InvalidNameSnafu)?;
                self.check_editable(path, true)?;
                self.store
                    .add_child(path.as_slice(), Node::new(name))
                    .context(TreeEditSnafu)?;
                Ok(None)
            }
            Step::Rename { path, name } => {
                let name = validate_name(name).context(InvalidNameSnafu)?;
                self.check_editable(path, false)?;
                self.store.rename(path.as_slice(), name).context(TreeEditSnafu)?;
                Ok(None)
            }
            Step::Delete { path } => {
                self.check_editable(path, false)?;
                self.store.delete(path.as_slice()).context(TreeEditSnafu)?;
                Ok(None)
            }
            Step::Search { query } => Ok(Some(self.search(query))),
            Step::Show { path } => self.show(path.as_ref()).map(Some),
        }
    }

    /// Empty paths pass through; the store treats them as no-ops
    fn check_editable(&self, path: &TreePath, adding: bool) -> Result<(), ApplicationError> {
        if path.is_empty() {
            return Ok(());
        }
        let node = self.store.resolve(path.as_slice()).context(TreeEditSnafu)?;
        ensure!(path.len() > 1, ProtectedRootSnafu { path: path.clone() });
        ensure!(
            !(adding && node.kind().is_file()),
            NotAFolderSnafu { path: path.clone() }
        );
        Ok(())
    }

    /// Apply every step in order, writing rendered output to `out`.
    ///
    /// With `keep_going`, rejected names and unresolved paths are logged and
    /// the run fails only after the last step.
    pub fn run_script(
        &mut self,
        script: &Script,
        keep_going: bool,
        out: &mut impl Write,
    ) -> Result<(), ApplicationError> {
        let mut failed = 0usize;

        for (index, step) in script.steps().iter().enumerate() {
            debug!("Applying step {}: {:?}", index, step);
            match self.apply(step) {
                Ok(Some(text)) => out.write_all(text.as_bytes()).context(OutputSnafu)?,
                Ok(None) => {}
                Err(err) if keep_going && err.is_step_failure() => {
                    error!("Step {} failed: {}", index, err);
                    failed += 1;
                }
                Err(err) => return Err(err),
            }
        }

        ensure!(
            failed == 0,
            StepsFailedSnafu {
                failed,
                total: script.len(),
            }
        );
        info!(
            "Applied {} steps, tree is at revision {}",
            script.len(),
            self.store.revision()
        );
        Ok(())
    }
}

fn log_change(change: &TreeChange, tree: &Node) {
    match change {
        TreeChange::Added { parent, name } => info!("Added '{}' under {}", name, parent),
        TreeChange::Renamed { path, new_name } => info!("Renamed {} to '{}'", path, new_name),
        TreeChange::Deleted { path } => info!("Deleted {}", path),
    }
    debug!("Tree now holds {} nodes", tree.node_count());
}
