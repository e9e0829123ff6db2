//! YAML inputs: an optional seed tree and session scripts of edits.

mod script;
mod seed_file;

pub use script::{Script, ScriptError, Step};
pub use seed_file::{SeedFile, SeedFileError};
