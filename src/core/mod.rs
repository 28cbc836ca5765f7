//! Core functionality for the task runner
//!
//! Contains the task registry and the actions it dispatches to.

pub mod registry;
pub mod tasks;

pub use registry::{Task, TaskRegistry, snake_to_kebab_case};
