#![forbid(unsafe_code)]

//! Command registry: the ordered, immutable list of commands a palette can
//! run.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// What a command does to the text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Replace the text with this value.
    Replace(String),
    /// Leave the text unchanged (side-effect-only command).
    Keep,
}

type ExecuteFn = dyn Fn(&str) -> CommandOutput + Send + Sync;

/// A single command that can be invoked from the palette.
///
/// `execute` receives the text as it stands after the palette query has been
/// removed from it.
#[derive(Clone)]
pub struct Command {
    id: String,
    display: String,
    execute: Arc<ExecuteFn>,
}

impl Command {
    /// Create a command.
    pub fn new<F>(id: impl Into<String>, display: impl Into<String>, execute: F) -> Self
    where
        F: Fn(&str) -> CommandOutput + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            display: display.into(),
            execute: Arc::new(execute),
        }
    }

    /// Create a command that maps the current text to new text.
    pub fn replacing<F>(id: impl Into<String>, display: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::new(id, display, move |text| CommandOutput::Replace(f(text)))
    }

    /// Create a command that only performs a side effect.
    pub fn effect<F>(id: impl Into<String>, display: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self::new(id, display, move |text| {
            f(text);
            CommandOutput::Keep
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Label shown in the list and matched against the query.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Run the command against `text`.
    pub fn execute(&self, text: &str) -> CommandOutput {
        (self.execute)(text)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("display", &self.display)
            .field("execute", &"<fn>")
            .finish()
    }
}

/// Errors from building a [`CommandRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two commands share an id.
    DuplicateId(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "duplicate command id: {id:?}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Ordered list of commands with unique ids.
///
/// Cheap to clone; several palettes may share one registry.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: Arc<[Command]>,
}

impl CommandRegistry {
    /// Build a registry, rejecting duplicate ids.
    pub fn new(commands: Vec<Command>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(commands.len());
        for command in &commands {
            if !seen.insert(command.id.as_str()) {
                return Err(RegistryError::DuplicateId(command.id.clone()));
            }
        }
        Ok(Self {
            commands: commands.into(),
        })
    }

    /// All commands in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Command at `index`.
    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    /// The first command, whose id is the default selection.
    pub fn first(&self) -> Option<&Command> {
        self.commands.first()
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
