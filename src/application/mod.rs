//! Application layer - CLI commands and the HTTP API

pub mod commands;
pub mod server;

pub use commands::{Cli, Commands, CommandExecutor};
pub use server::AppState;
