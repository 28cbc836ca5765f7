//! Command dispatch for the CLI

use crate::{config::Config, core::TaskRegistry, error::TaskError};
use anyhow::Context;
use tracing::{info, instrument};

/// Run the task registered under `name`
#[instrument(skip(registry, config))]
pub fn execute_command(registry: &TaskRegistry, config: &Config, name: &str) -> anyhow::Result<()> {
    let task = registry
        .get(name)
        .ok_or_else(|| TaskError::validation(format!("Unknown task: {name}")))?;

    info!("Running task {}", task.name);
    task.run(config)
        .with_context(|| format!("Task '{}' failed", task.name))
}
