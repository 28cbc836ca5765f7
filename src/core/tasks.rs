//! Task actions
//!
//! Each action performs exactly one external tool invocation.

use crate::{
    config::Config,
    error::Result,
    utils::process::{ProcessRunner, RunOutcome},
};
use tracing::{info, instrument};

fn runner_for(config: &Config) -> ProcessRunner {
    ProcessRunner::new(config.debug).with_work_dir(&config.work_dir)
}

/// Build the WASM library
#[instrument(skip(config))]
pub fn build_wasm(config: &Config) -> Result<()> {
    let (program, args) = config.get_build_cmd();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    runner_for(config).run_command(&program, &args)?;

    info!("WASM library built");
    Ok(())
}

/// Watch source code and run the development HTTP server
#[instrument(skip(config))]
pub fn serve(config: &Config) -> Result<()> {
    let (program, args) = config.get_serve_cmd();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match runner_for(config).run_command_interruptible(&program, &args)? {
        RunOutcome::Completed => info!("Development server exited"),
        RunOutcome::Interrupted => info!("Development server stopped"),
    }
    Ok(())
}
