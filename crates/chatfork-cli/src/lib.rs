mod args;
mod commands;
pub mod config;
mod document;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands, DocumentArgs, ExportArgs, SelectionArgs};
pub use commands::run;
pub use config::Config;
