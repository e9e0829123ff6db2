use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::data::LogLevel;
use crate::tree::TreePath;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Show, search and edit an in-memory folder tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,

    #[clap(long, short, default_value = "warn", value_enum, global = true)]
    pub log_level: LogLevel,

    /// YAML file describing the initial tree. Defaults to the built-in example project
    #[clap(long, short, global = true)]
    pub seed: Option<PathBuf>,

    /// Never color the output
    #[clap(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Print the tree, or the subtree at PATH (names separated by '/')
    Show { path: Option<TreePath> },
    /// Print every node whose name contains QUERY, ignoring case
    Search { query: String },
    /// Apply the steps of a YAML session script
    Run {
        script: PathBuf,
        /// Report failing steps and continue with the next one
        #[clap(long, short)]
        keep_going: bool,
    },
}
