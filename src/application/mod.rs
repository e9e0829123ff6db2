mod application;
pub mod data;
mod report;
mod runtime_config;
mod session;

pub use application::*;
pub use report::Report;
pub use runtime_config::{Command, RuntimeConfig};
pub use session::Session;
