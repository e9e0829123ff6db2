mod cli;

pub use cli::{Cli, CliCommand};
