#![forbid(unsafe_code)]

//! cmdslash public facade crate.
//!
//! Re-exports the event types, the palette controller, and its
//! configuration, and unifies their errors under one [`Error`].

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use cmdslash_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};
pub use cmdslash_core::keybinding::{ChordParseError, KeyChord};

// --- Widget re-exports -----------------------------------------------------

pub use cmdslash_widgets::command_palette::{
    Command, CommandOutput, CommandPalette, CommandRegistry, ConfigError, ExecutionMode,
    KeyOutcome, Mode, PaletteAction, PaletteConfig, PaletteEntry, PaletteView, RegistryError,
};
pub use cmdslash_widgets::input::TextInput;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for cmdslash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid command set.
    Registry(RegistryError),
    /// Invalid configuration value.
    Config(ConfigError),
    /// Invalid key chord.
    Chord(ChordParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Chord(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Chord(err) => Some(err),
        }
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ChordParseError> for Error {
    fn from(err: ChordParseError) -> Self {
        Self::Chord(err)
    }
}

/// Standard result type for cmdslash APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Build a palette from `commands`, reading configuration from the process
/// environment and rejecting invalid values.
pub fn palette_from_env(commands: Vec<Command>) -> Result<CommandPalette> {
    palette_from_env_with(commands, |key| std::env::var(key).ok())
}

/// Like [`palette_from_env`] with a custom lookup.
pub fn palette_from_env_with<F>(commands: Vec<Command>, get_env: F) -> Result<CommandPalette>
where
    F: Fn(&str) -> Option<String>,
{
    let registry = CommandRegistry::new(commands)?;
    let config = PaletteConfig::try_from_env_with(get_env)?;
    Ok(CommandPalette::new(registry).with_config(config))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Command, CommandOutput, CommandPalette, CommandRegistry, Error, Event, ExecutionMode,
        KeyChord, KeyCode, KeyEvent, Mode, Modifiers, PaletteAction, PaletteConfig, PaletteView,
        Result,
    };

    pub use crate::{core, widgets};
}

pub use cmdslash_core as core;
pub use cmdslash_widgets as widgets;
