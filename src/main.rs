#![allow(clippy::cargo_common_metadata)]
use anyhow::Result;
use wasm_tasks::{cli, config::Config, core::TaskRegistry, setup_logging};

fn main() -> Result<()> {
    // Build the task table before parsing so subcommands are known
    let registry = TaskRegistry::builtin()?;
    let invocation = cli::parse_args(&registry);

    setup_logging(invocation.args.debug)?;

    let config = Config::from_args(&invocation.args)?;

    cli::execute_command(&registry, &config, &invocation.task)
}
