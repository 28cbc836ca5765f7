//! Utility modules for common functionality
//!
//! Provides reusable utilities for process execution and environment handling.

pub mod env;
pub mod process;

pub use env::EnvUtils;
pub use process::{ProcessRunner, RunOutcome};
