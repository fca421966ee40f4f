#![forbid(unsafe_code)]

//! Boolean flag with explicit `set` and `toggle` mutators.

/// A two-state flag.
///
/// [`set`](Self::set) reports whether the value changed, so callers can run
/// transition logic once per edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggle(bool);

impl Toggle {
    /// Create a flag with the given initial value.
    #[must_use]
    pub const fn new(on: bool) -> Self {
        Self(on)
    }

    /// Current value.
    #[must_use]
    pub const fn get(self) -> bool {
        self.0
    }

    /// Set the value. Returns `true` if it changed.
    pub fn set(&mut self, on: bool) -> bool {
        let changed = self.0 != on;
        self.0 = on;
        changed
    }

    /// Flip the value and return the new one.
    pub fn toggle(&mut self) -> bool {
        self.0 = !self.0;
        self.0
    }
}
