//! Command-line argument parsing
//!
//! Global options are declared with the derive API; subcommands come from
//! the task registry at runtime.

use crate::core::TaskRegistry;
use clap::{ArgMatches, Args, Command, FromArgMatches, error::ErrorKind};
use std::ffi::OsString;
use std::path::PathBuf;

/// Options accepted before or after any subcommand
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Run the build tools from this directory
    #[arg(short = 'C', long = "work-dir", value_name = "DIR", global = true)]
    pub work_dir: Option<PathBuf>,
}

/// A parsed command line: global options plus the selected task
#[derive(Debug, Clone)]
pub struct Invocation {
    pub args: GlobalArgs,
    pub task: String,
}

impl Invocation {
    /// Extract the invocation from parsed matches
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let args = GlobalArgs::from_arg_matches(matches)?;
        let task = matches
            .subcommand_name()
            .ok_or_else(|| clap::Error::new(ErrorKind::MissingSubcommand))?
            .to_string();
        Ok(Self { args, task })
    }
}

/// Build the command-line interface for the given registry
pub fn build_cli(registry: &TaskRegistry) -> Command {
    let cmd = Command::new("tasks")
        .about("Task runner for wasm-spreadsheet")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true);

    registry.iter().fold(GlobalArgs::augment_args(cmd), |cmd, task| {
        cmd.subcommand(Command::new(task.name.clone()).about(task.about))
    })
}

/// Parse command line arguments, exiting with usage on error
pub fn parse_args(registry: &TaskRegistry) -> Invocation {
    let matches = build_cli(registry).get_matches();
    Invocation::from_matches(&matches).unwrap_or_else(|e| e.exit())
}

/// Parse the given arguments without exiting
pub fn try_parse_from<I, T>(registry: &TaskRegistry, itr: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_cli(registry).try_get_matches_from(itr)?;
    Invocation::from_matches(&matches)
}
