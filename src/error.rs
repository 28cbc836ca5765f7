//! Error types for the task runner
//!
//! Provides structured error handling with context and proper error chains.

use thiserror::Error;

/// Main error type for the task runner
#[derive(Error, Debug)]
pub enum TaskError {
    /// Process execution errors
    #[error("Process error: {command} failed ({message})")]
    Process {
        command: String,
        exit_code: Option<i32>,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Task registration errors
    #[error("Registry error: {message}")]
    Registry { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl TaskError {
    /// Create a new process error
    pub fn process(
        command: impl Into<String>,
        exit_code: Option<i32>,
        message: impl Into<String>,
    ) -> Self {
        Self::Process {
            command: command.into(),
            exit_code,
            message: message.into(),
            source: None,
        }
    }

    /// Create a process error that wraps an underlying I/O failure
    pub fn process_io(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Process {
            command: command.into(),
            exit_code: None,
            message: format!("Failed to execute command: {source}"),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new registry error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Exit code of the failed child process, if any
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Process { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TaskError>;
