//! # wasm-tasks
//!
//! Developer task runner for the wasm-spreadsheet workspace. Each task
//! delegates to exactly one external build tool invocation.
//!
//! ## Tasks
//!
//! - `build-wasm`: build the WASM library with bazel
//! - `serve`: watch sources and run the development HTTP server with ibazel;
//!   Ctrl-C stops it cleanly
//!
//! ## Example
//!
//! ```no_run
//! use wasm_tasks::{cli, config::Config, core::TaskRegistry};
//!
//! let registry = TaskRegistry::builtin()?;
//! let invocation = cli::try_parse_from(&registry, ["tasks", "build-wasm"])?;
//! let config = Config::from_args(&invocation.args)?;
//! cli::execute_command(&registry, &config, &invocation.task)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
