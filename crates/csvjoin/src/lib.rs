pub mod command;
pub mod config;
pub mod orchestrator;
pub mod prompt;

pub use config::JoinConfig;
pub use orchestrator::{JoinOutcome, join_files};
