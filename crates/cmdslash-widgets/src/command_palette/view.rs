#![forbid(unsafe_code)]

//! Render-ready snapshot of palette state.
//!
//! The presentation layer draws from a [`PaletteView`] and never reads
//! controller internals. Roles follow the listbox/option pattern.

/// One visible list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Command id; report this back on hover/click.
    pub id: String,
    /// Label to draw.
    pub display: String,
    /// Whether this entry is highlighted.
    pub selected: bool,
}

impl PaletteEntry {
    /// Accessibility role of a list entry.
    pub const ROLE: &'static str = "option";
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaletteView {
    /// Current text field value.
    pub text: String,
    /// Whether the command list should be shown.
    pub palette_open: bool,
    /// Filtered commands in display order. Empty when the palette is closed.
    pub entries: Vec<PaletteEntry>,
    /// True when the palette is open and nothing matches the query.
    pub no_matches: bool,
    /// Id of the highlighted entry, if one is visible.
    pub active_descendant: Option<String>,
}

impl PaletteView {
    /// Accessibility role of the list container.
    pub const LIST_ROLE: &'static str = "listbox";
    /// Placeholder text for an empty result list.
    pub const NO_MATCHES_LABEL: &'static str = "No matches found";

    /// The highlighted entry, if any.
    pub fn selected_entry(&self) -> Option<&PaletteEntry> {
        self.entries.iter().find(|e| e.selected)
    }
}
