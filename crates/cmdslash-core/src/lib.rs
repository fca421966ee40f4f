#![forbid(unsafe_code)]

//! Core: canonical input events, key chords, and the logging facade.

pub mod event;
pub mod keybinding;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
