//! Task registry
//!
//! Maps kebab-case subcommand names to the actions they run. The table is
//! built once at startup and handed to the dispatcher explicitly.

use crate::{
    config::Config,
    core::tasks,
    error::{Result, TaskError},
};
use tracing::debug;

/// Signature shared by every task action
pub type Action = fn(&Config) -> Result<()>;

/// A named, runnable task
#[derive(Debug, Clone)]
pub struct Task {
    /// Subcommand name, e.g. `build-wasm`
    pub name: String,
    /// One-line help shown by `--help`
    pub about: &'static str,
    /// Action invoked when the task is selected
    pub action: Action,
}

impl Task {
    /// Run the task's action
    pub fn run(&self, config: &Config) -> Result<()> {
        (self.action)(config)
    }
}

/// Ordered table of registered tasks
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

/// Convert an action identifier into its subcommand name
pub fn snake_to_kebab_case(ident: &str) -> String {
    ident.replace('_', "-")
}

impl TaskRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tasks this runner ships with
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register("build_wasm", "Build the WASM library", tasks::build_wasm)?;
        registry.register(
            "serve",
            "Watch source code and run the development HTTP server",
            tasks::serve,
        )?;
        Ok(registry)
    }

    /// Register `action` under the kebab-case form of `ident`
    pub fn register(&mut self, ident: &str, about: &'static str, action: Action) -> Result<()> {
        let name = snake_to_kebab_case(ident);
        if self.get(&name).is_some() {
            return Err(TaskError::registry(format!(
                "Task '{name}' is already registered"
            )));
        }

        debug!("Registered task {}", name);
        self.tasks.push(Task {
            name,
            about,
            action,
        });
        Ok(())
    }

    /// Look up a task by subcommand name
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.name == name)
    }

    /// Iterate over tasks in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Subcommand names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(|task| task.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
