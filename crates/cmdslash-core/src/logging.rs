#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature enabled the macros below are the real
//! `tracing` macros. Without it they expand to nothing, so widget code can
//! log unconditionally and pay zero cost in builds that do not want it.
//!
//! ```ignore
//! let span = cmdslash_core::debug_span!("palette_key", code = ?key.code);
//! let _guard = span.entered();
//! cmdslash_core::debug!(query_start, "palette opened");
//! ```

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op `debug!` when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op `trace!` when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op `warn!` when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// No-op `debug_span!` when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Stand-in for `tracing::Span` when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span by reference.
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }

    /// Enter the span, consuming it.
    pub fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
