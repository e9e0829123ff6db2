use std::path::PathBuf;

use supports_color::Stream;

use crate::cli::{Cli, CliCommand};
use crate::tree::TreePath;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show { path: Option<TreePath> },
    Search { query: String },
    Run { script: PathBuf, keep_going: bool },
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub seed: Option<PathBuf>,
    pub command: Command,
    pub color: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        let command = match cli.command {
            CliCommand::Show { path } => Command::Show { path },
            CliCommand::Search { query } => Command::Search { query },
            CliCommand::Run { script, keep_going } => Command::Run { script, keep_going },
        };

        Self {
            seed: cli.seed,
            command,
            color: !cli.no_color && supports_color::on(Stream::Stdout).is_some(),
        }
    }
}
