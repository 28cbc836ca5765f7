//! Process execution utilities
//!
//! Provides safe process execution with proper error handling and logging.

use crate::error::{Result, TaskError};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info, instrument, warn};

/// Signal number of SIGINT on every supported Unix
#[cfg(unix)]
const SIGINT: i32 = 2;

/// Utility for running external processes
#[derive(Debug)]
pub struct ProcessRunner {
    debug: bool,
    work_dir: Option<PathBuf>,
}

/// How an interruptible invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The child exited successfully on its own
    Completed,
    /// The user interrupted the wait
    Interrupted,
}

impl ProcessRunner {
    /// Create a new process runner
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self {
            debug,
            work_dir: None,
        }
    }

    /// Run children in the given directory instead of the current one
    #[must_use]
    pub fn with_work_dir<P: Into<PathBuf>>(mut self, work_dir: P) -> Self {
        self.work_dir = Some(work_dir.into());
        self
    }

    fn announce(&self, cmd_str: &str) {
        if self.debug {
            debug!("Running command: {}", cmd_str);
            if let Some(dir) = &self.work_dir {
                debug!("Working directory: {}", dir.display());
            }
        } else {
            info!("+ {}", cmd_str);
        }
    }

    fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// Run a command with arguments, inheriting the standard streams
    #[instrument(skip(self))]
    pub fn run_command(&self, command: &str, args: &[&str]) -> Result<()> {
        let cmd_str = format_command(command, args);
        self.announce(&cmd_str);

        let mut cmd = Command::new(command);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = self.work_dir() {
            cmd.current_dir(dir);
        }

        let status = cmd
            .status()
            .map_err(|e| TaskError::process_io(cmd_str.clone(), e))?;

        check_status(&cmd_str, status)?;
        debug!("Command completed successfully");
        Ok(())
    }

    /// Run a command, treating a user interrupt as a normal way to stop it
    ///
    /// The wait races the child against Ctrl-C on a single-threaded runtime.
    /// The child shares our process group, so it receives the same SIGINT;
    /// after the first interrupt we wait for it to wind down, and a second
    /// interrupt kills it.
    #[instrument(skip(self))]
    pub fn run_command_interruptible(&self, command: &str, args: &[&str]) -> Result<RunOutcome> {
        let cmd_str = format_command(command, args);
        self.announce(&cmd_str);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TaskError::process_io(cmd_str.clone(), e))?;

        runtime.block_on(self.wait_interruptible(command, args, &cmd_str))
    }

    async fn wait_interruptible(
        &self,
        command: &str,
        args: &[&str],
        cmd_str: &str,
    ) -> Result<RunOutcome> {
        let mut cmd = tokio::process::Command::new(command);
        cmd.args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        if let Some(dir) = self.work_dir() {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .map_err(|e| TaskError::process_io(cmd_str, e))?;

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| TaskError::process_io(cmd_str, e))?;
                classify_status(cmd_str, status)
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, waiting for {} to exit", command);
                tokio::select! {
                    status = child.wait() => {
                        debug!("Child exited after interrupt: {:?}", status);
                    }
                    _ = tokio::signal::ctrl_c() => {
                        warn!("Interrupted again, killing {}", command);
                        if let Err(e) = child.kill().await {
                            warn!("Failed to kill {}: {}", command, e);
                        }
                    }
                }
                Ok(RunOutcome::Interrupted)
            }
        }
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(false)
    }
}

fn format_command(command: &str, args: &[&str]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}

fn check_status(cmd_str: &str, status: ExitStatus) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    let exit_code = status.code();
    let message = match exit_code {
        Some(code) => format!("exited with status {code}"),
        None => "terminated by a signal".to_string(),
    };
    Err(TaskError::process(cmd_str, exit_code, message))
}

fn classify_status(cmd_str: &str, status: ExitStatus) -> Result<RunOutcome> {
    if killed_by_interrupt(status) {
        debug!("{} was terminated by SIGINT", cmd_str);
        return Ok(RunOutcome::Interrupted);
    }
    check_status(cmd_str, status).map(|()| RunOutcome::Completed)
}

#[cfg(unix)]
fn killed_by_interrupt(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: ExitStatus) -> bool {
    false
}
