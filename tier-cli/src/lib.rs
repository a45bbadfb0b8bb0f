pub mod config;
pub mod logging;
pub mod render;
pub mod repl;

pub use config::{AppConfig, ConfigError};
pub use repl::{Command, CommandError, Flow, Repl};
