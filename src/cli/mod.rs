//! Command-line interface module
//!
//! Provides argument parsing and command execution.

pub mod args;
pub mod commands;

pub use args::{GlobalArgs, Invocation, build_cli, parse_args, try_parse_from};
pub use commands::execute_command;
