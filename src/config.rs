//! Configuration management for the task runner
//!
//! Centralizes configuration options and provides validation.

use crate::{
    cli::GlobalArgs,
    error::TaskError,
    utils::env::{BAZEL_VAR, EnvUtils, IBAZEL_VAR, SERVER_TARGET_VAR, WASM_TARGET_VAR},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Directory the external tools run in
    pub work_dir: PathBuf,
    /// Invocation used by `build-wasm`
    pub build: ToolConfig,
    /// Invocation used by `serve`
    pub serve: ToolConfig,
}

/// One external tool invocation: `<program> <subcommand> <target>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Program to execute
    pub program: String,
    /// Tool subcommand (`build`, `run`)
    pub subcommand: String,
    /// Build target label
    pub target: String,
}

impl ToolConfig {
    fn new(program: &str, subcommand: &str, target: &str) -> Self {
        Self {
            program: program.to_string(),
            subcommand: subcommand.to_string(),
            target: target.to_string(),
        }
    }

    fn command(&self) -> (String, Vec<String>) {
        (
            self.program.clone(),
            vec![self.subcommand.clone(), self.target.clone()],
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            work_dir: PathBuf::from("."),
            build: ToolConfig::new("bazel", "build", "//src/engine:engine_lib_wasm_bindgen"),
            serve: ToolConfig::new("ibazel", "run", "//src/web:server"),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments and the environment
    pub fn from_args(args: &GlobalArgs) -> Result<Self, TaskError> {
        Self::from_args_with_env(args, EnvUtils::get_var)
    }

    /// Create configuration using `lookup` to read overrides
    pub fn from_args_with_env<F>(args: &GlobalArgs, lookup: F) -> Result<Self, TaskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            debug: args.debug,
            ..Self::default()
        };

        if let Some(work_dir) = &args.work_dir {
            config.work_dir = work_dir.clone();
        }

        if let Some(program) = lookup(BAZEL_VAR) {
            config.build.program = program;
        }
        if let Some(target) = lookup(WASM_TARGET_VAR) {
            config.build.target = target;
        }
        if let Some(program) = lookup(IBAZEL_VAR) {
            config.serve.program = program;
        }
        if let Some(target) = lookup(SERVER_TARGET_VAR) {
            config.serve.target = target;
        }

        config.validate()?;
        if config.debug {
            debug!("Resolved configuration: {}", config.to_json()?);
        }
        Ok(config)
    }

    /// Render the resolved configuration as compact JSON
    pub fn to_json(&self) -> Result<String, TaskError> {
        serde_json::to_string(self).map_err(|e| TaskError::Config {
            message: "Failed to serialize configuration".to_string(),
            source: Some(Box::new(e)),
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), TaskError> {
        if !self.work_dir.is_dir() {
            return Err(TaskError::validation(format!(
                "Working directory not found: {}",
                self.work_dir.display()
            )));
        }

        for (name, tool) in [("build", &self.build), ("serve", &self.serve)] {
            if tool.program.trim().is_empty() {
                return Err(TaskError::config(format!("No program configured for {name}")));
            }
            if tool.target.trim().is_empty() {
                return Err(TaskError::config(format!("No target configured for {name}")));
            }
        }

        Ok(())
    }

    /// Get build command with arguments
    pub fn get_build_cmd(&self) -> (String, Vec<String>) {
        self.build.command()
    }

    /// Get watch-and-serve command with arguments
    pub fn get_serve_cmd(&self) -> (String, Vec<String>) {
        self.serve.command()
    }
}
