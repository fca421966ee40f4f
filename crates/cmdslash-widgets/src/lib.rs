#![forbid(unsafe_code)]

//! Widgets for cmdslash: a line editor and the command palette controller
//! that drives it.

pub mod command_palette;
pub mod input;
pub mod toggle;

pub use command_palette::{
    Command, CommandOutput, CommandPalette, CommandRegistry, ConfigError, ExecutionMode,
    KeyOutcome, Mode, PaletteAction, PaletteConfig, PaletteEntry, PaletteView, RegistryError,
};
pub use input::TextInput;
pub use toggle::Toggle;
