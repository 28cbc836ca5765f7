//! Environment variable handling
//!
//! Names the variables that override tool locations and targets, and
//! reads them with empty values treated as unset.

use std::env;
use tracing::debug;

/// Overrides the program used by `build-wasm`
pub const BAZEL_VAR: &str = "TASKS_BAZEL";
/// Overrides the program used by `serve`
pub const IBAZEL_VAR: &str = "TASKS_IBAZEL";
/// Overrides the target built by `build-wasm`
pub const WASM_TARGET_VAR: &str = "TASKS_WASM_TARGET";
/// Overrides the target run by `serve`
pub const SERVER_TARGET_VAR: &str = "TASKS_SERVER_TARGET";

/// Environment variable utilities
#[derive(Debug)]
pub struct EnvUtils;

impl EnvUtils {
    /// Read a variable from the process environment, ignoring empty values
    pub fn get_var(key: &str) -> Option<String> {
        let value = non_empty(env::var(key).ok());
        if let Some(value) = &value {
            debug!("Using {}={}", key, value);
        }
        value
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_filters_blank_values() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(Some("bazel".to_string())), Some("bazel".to_string()));
    }
}
