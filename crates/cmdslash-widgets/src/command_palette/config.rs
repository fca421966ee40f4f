#![forbid(unsafe_code)]

//! Palette configuration.
//!
//! Built in code with the `with_*` builders, or read from the environment:
//!
//! | Variable             | Values                      | Default   |
//! |----------------------|-----------------------------|-----------|
//! | `CMDSLASH_TRIGGER`   | key chord, e.g. `ctrl+k`    | `super+/` |
//! | `CMDSLASH_EXECUTION` | `immediate` \| `deferred`   | immediate |

use std::fmt;

use cmdslash_core::keybinding::{ChordParseError, KeyChord};

/// Environment variable overriding the trigger chord.
const ENV_TRIGGER: &str = "CMDSLASH_TRIGGER";
/// Environment variable overriding the execution mode.
const ENV_EXECUTION: &str = "CMDSLASH_EXECUTION";

/// When a queued command runs relative to the query truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Run at the end of the handler that queued it, after the truncation
    /// has been applied.
    #[default]
    Immediate,
    /// Leave the command queued; the host calls
    /// [`CommandPalette::run_pending`](super::CommandPalette::run_pending)
    /// once it has presented the truncated text.
    Deferred,
}

impl ExecutionMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "immediate" | "sync" => Some(Self::Immediate),
            "deferred" | "defer" => Some(Self::Deferred),
            _ => None,
        }
    }

    /// Lowercase name, as accepted by `CMDSLASH_EXECUTION`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Deferred => "deferred",
        }
    }
}

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `CMDSLASH_TRIGGER` did not parse as a key chord.
    Trigger {
        /// The rejected variable value.
        value: String,
        /// Why it did not parse.
        source: ChordParseError,
    },
    /// `CMDSLASH_EXECUTION` was not a known mode.
    ExecutionMode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trigger { value, source } => {
                write!(f, "invalid {ENV_TRIGGER} {value:?}: {source}")
            }
            Self::ExecutionMode(value) => write!(
                f,
                "invalid {ENV_EXECUTION} {value:?}: expected \"immediate\" or \"deferred\""
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Trigger { source, .. } => Some(source),
            Self::ExecutionMode(_) => None,
        }
    }
}

/// Palette behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaletteConfig {
    /// Chord that toggles palette mode.
    pub trigger: KeyChord,
    /// When queued commands run.
    pub execution: ExecutionMode,
}

impl PaletteConfig {
    /// Set the trigger chord (builder).
    #[must_use]
    pub fn with_trigger(mut self, trigger: KeyChord) -> Self {
        self.trigger = trigger;
        self
    }

    /// Set the execution mode (builder).
    #[must_use]
    pub fn with_execution_mode(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    /// Read overrides from the process environment, falling back to
    /// defaults for invalid values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom lookup (for tests).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = get_env(ENV_TRIGGER) {
            match value.parse::<KeyChord>() {
                Ok(trigger) => config.trigger = trigger,
                Err(err) => {
                    cmdslash_core::warn!(error = %err, value = %value, "ignoring {}", ENV_TRIGGER);
                }
            }
        }
        if let Some(value) = get_env(ENV_EXECUTION) {
            match ExecutionMode::parse(&value) {
                Some(mode) => config.execution = mode,
                None => {
                    cmdslash_core::warn!(value = %value, "ignoring {}", ENV_EXECUTION);
                }
            }
        }
        config
    }

    /// Read overrides with a custom lookup, rejecting invalid values.
    pub fn try_from_env_with<F>(get_env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = get_env(ENV_TRIGGER) {
            config.trigger = value
                .parse::<KeyChord>()
                .map_err(|source| ConfigError::Trigger { value, source })?;
        }
        if let Some(value) = get_env(ENV_EXECUTION) {
            config.execution =
                ExecutionMode::parse(&value).ok_or(ConfigError::ExecutionMode(value))?;
        }
        Ok(config)
    }
}
