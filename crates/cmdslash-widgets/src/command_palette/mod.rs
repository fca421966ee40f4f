#![forbid(unsafe_code)]

//! Inline command palette for a single-line text input.
//!
//! The palette lives inside the text field rather than in an overlay:
//! pressing the trigger chord (default `Super+/`) marks the current end of
//! the text as the query start, and everything typed after it filters the
//! command list by prefix. Enter (or a click on an entry) removes the query
//! from the text and runs the highlighted command against what remains.
//!
//! # Usage
//!
//! ```
//! use cmdslash_core::event::{KeyCode, KeyEvent, Modifiers};
//! use cmdslash_widgets::command_palette::{Command, CommandPalette, CommandRegistry};
//!
//! let registry = CommandRegistry::new(vec![
//!     Command::replacing("A", "Insert 🐕", |text| format!("{text} 🐕")),
//!     Command::replacing("C", "Delete Text", |_| String::new()),
//! ])
//! .unwrap();
//! let mut palette = CommandPalette::new(registry);
//!
//! palette.on_key_down(&KeyEvent::new(KeyCode::Char('/')).with_modifiers(Modifiers::SUPER));
//! palette.on_text_changed("In");
//! assert_eq!(palette.filtered_ids(), vec!["A"]);
//!
//! palette.on_key_down(&KeyEvent::new(KeyCode::Enter));
//! assert_eq!(palette.text(), " 🐕");
//! assert!(!palette.is_open());
//! ```
//!
//! # Submodules
//!
//! - [`config`]: trigger chord and execution mode
//! - [`filter`]: prefix filtering
//! - [`registry`]: commands and the registry that owns them
//! - [`view`]: render-ready snapshot for the presentation layer

pub mod config;
pub mod filter;
pub mod registry;
pub mod view;

pub use config::{ConfigError, ExecutionMode, PaletteConfig};
pub use filter::filter_commands;
pub use registry::{Command, CommandOutput, CommandRegistry, RegistryError};
pub use view::{PaletteEntry, PaletteView};

use cmdslash_core::event::{Event, KeyCode, KeyEvent};

use crate::input::TextInput;
use crate::toggle::Toggle;
use filter::floor_char_boundary;

// ---------------------------------------------------------------------------
// Mode, actions, outcomes
// ---------------------------------------------------------------------------

/// Input mode of the text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Plain typing.
    #[default]
    Normal,
    /// Typing filters the command list.
    Palette,
}

/// Notable transitions reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    /// Palette mode was entered.
    Opened,
    /// Palette mode was left without running a command.
    Dismissed,
    /// The query was removed and a command is waiting for
    /// [`CommandPalette::run_pending`] (deferred mode only).
    Queued(String),
    /// A command ran and palette mode was left.
    Executed(String),
}

/// Result of dispatching a key to the palette.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// The palette or its editor consumed the key.
    pub handled: bool,
    /// The host should suppress the input's native behaviour for this key
    /// (caret movement on Up/Down, form submission on Enter).
    pub prevent_default: bool,
    /// Transition caused by the key, if any.
    pub action: Option<PaletteAction>,
}

impl KeyOutcome {
    fn consumed() -> Self {
        Self {
            handled: true,
            prevent_default: true,
            action: None,
        }
    }

    fn edited() -> Self {
        Self {
            handled: true,
            prevent_default: false,
            action: None,
        }
    }

    fn with_action(mut self, action: Option<PaletteAction>) -> Self {
        self.action = action;
        self
    }
}

// ---------------------------------------------------------------------------
// Command Palette controller
// ---------------------------------------------------------------------------

/// Text input controller with an inline command palette.
///
/// # Invariants
///
/// 1. `query_start <= text.len()` and lies on a char boundary.
/// 2. In palette mode with a non-empty filtered list, `selected_id` names an
///    entry of that list.
/// 3. Outside palette mode, `query_start == 0`, `selected_id` is the first
///    registered command and nothing is pending.
/// 4. A queued command only runs after the query truncation is applied.
#[derive(Debug, Clone)]
pub struct CommandPalette {
    /// Commands available to the palette.
    registry: CommandRegistry,
    /// Trigger and execution settings.
    config: PaletteConfig,
    /// Text field value and caret.
    input: TextInput,
    /// Palette mode flag.
    palette: Toggle,
    /// Byte offset where the query begins.
    query_start: usize,
    /// Highlighted command id.
    selected_id: Option<String>,
    /// Command queued by Enter/click, waiting for the execution step.
    pending: Option<String>,
    /// Registry indices matching the current query.
    filtered: Vec<usize>,
}

impl CommandPalette {
    /// Create a controller with default configuration and empty text.
    pub fn new(registry: CommandRegistry) -> Self {
        let selected_id = registry.first().map(|c| c.id().to_string());
        let filtered = filter_commands(&registry, "");
        Self {
            registry,
            config: PaletteConfig::default(),
            input: TextInput::new(),
            palette: Toggle::new(false),
            query_start: 0,
            selected_id,
            pending: None,
            filtered,
        }
    }

    /// Set the configuration (builder).
    #[must_use]
    pub fn with_config(mut self, config: PaletteConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial text (builder).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text.into(), true);
        self
    }

    // --- State access ---

    /// Current text field value.
    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Caret position (grapheme index).
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        if self.palette.get() {
            Mode::Palette
        } else {
            Mode::Normal
        }
    }

    /// Whether palette mode is active.
    pub fn is_open(&self) -> bool {
        self.palette.get()
    }

    /// Byte offset where the query begins.
    pub fn query_start(&self) -> usize {
        self.query_start
    }

    /// The filter query: the text after `query_start`.
    pub fn query(&self) -> &str {
        let text = self.input.value();
        &text[floor_char_boundary(text, self.query_start)..]
    }

    /// Highlighted command id.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Highlighted command, if it is in the filtered list.
    pub fn selected_command(&self) -> Option<&Command> {
        self.selected_position()
            .and_then(|pos| self.registry.get(self.filtered[pos]))
    }

    /// Whether a command is queued for the execution step.
    pub fn pending_execution(&self) -> bool {
        self.pending.is_some()
    }

    /// Commands matching the current query, in registration order.
    pub fn filtered_commands(&self) -> impl Iterator<Item = &Command> + '_ {
        self.filtered.iter().filter_map(|&i| self.registry.get(i))
    }

    /// Ids of [`filtered_commands`](Self::filtered_commands).
    pub fn filtered_ids(&self) -> Vec<&str> {
        self.filtered_commands().map(Command::id).collect()
    }

    /// The registry this palette runs commands from.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Active configuration.
    pub fn config(&self) -> &PaletteConfig {
        &self.config
    }

    /// Snapshot for the presentation layer.
    pub fn view(&self) -> PaletteView {
        let palette_open = self.is_open();
        let entries: Vec<PaletteEntry> = if palette_open {
            self.filtered_commands()
                .map(|c| PaletteEntry {
                    id: c.id().to_string(),
                    display: c.display().to_string(),
                    selected: self.selected_id.as_deref() == Some(c.id()),
                })
                .collect()
        } else {
            Vec::new()
        };
        let active_descendant = entries.iter().find(|e| e.selected).map(|e| e.id.clone());
        PaletteView {
            text: self.text().to_string(),
            palette_open,
            no_matches: palette_open && entries.is_empty(),
            entries,
            active_descendant,
        }
    }

    // --- Mode mutators ---

    /// Enter or leave palette mode. Returns `true` if the mode changed.
    pub fn set_open(&mut self, open: bool) -> bool {
        if !self.palette.set(open) {
            return false;
        }
        if open {
            self.enter_palette();
        } else {
            self.leave_palette();
        }
        true
    }

    /// Flip palette mode. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        let open = !self.is_open();
        self.set_open(open);
        open
    }

    fn enter_palette(&mut self) {
        self.query_start = self.text().len();
        self.refilter();
        self.snap_selection();
        cmdslash_core::debug!(query_start = self.query_start, "palette opened");
    }

    fn leave_palette(&mut self) {
        if self.pending.take().is_some() {
            cmdslash_core::debug!("queued command cancelled");
        }
        self.query_start = 0;
        self.selected_id = self.registry.first().map(|c| c.id().to_string());
        self.refilter();
        cmdslash_core::debug!("palette closed");
    }

    // --- Event handlers ---

    /// The text field value changed to `new_text`.
    ///
    /// In palette mode, deleting back past the query start pulls the query
    /// start back with it.
    pub fn on_text_changed(&mut self, new_text: &str) {
        self.set_text(new_text.to_string(), false);
    }

    /// A key went down in the text field.
    ///
    /// Only palette keys are handled here; use
    /// [`handle_event`](Self::handle_event) to also route editing keys to
    /// the built-in editor.
    pub fn on_key_down(&mut self, key: &KeyEvent) -> KeyOutcome {
        if !key.is_actionable() {
            return KeyOutcome::default();
        }

        let span = cmdslash_core::debug_span!(
            "palette_key",
            code = ?key.code,
            open = self.is_open()
        );
        let _guard = span.entered();

        if self.config.trigger.matches(key) {
            let action = if self.toggle() {
                PaletteAction::Opened
            } else {
                PaletteAction::Dismissed
            };
            return KeyOutcome::consumed().with_action(Some(action));
        }

        match key.code {
            KeyCode::Up if self.is_open() => {
                self.move_selection(-1);
                KeyOutcome::consumed()
            }
            KeyCode::Down if self.is_open() => {
                self.move_selection(1);
                KeyOutcome::consumed()
            }
            KeyCode::Enter if self.is_open() => {
                let action = self.queue_selected();
                KeyOutcome::consumed().with_action(action)
            }
            KeyCode::Escape if self.set_open(false) => {
                KeyOutcome::consumed().with_action(Some(PaletteAction::Dismissed))
            }
            _ => KeyOutcome::default(),
        }
    }

    /// The pointer moved over the entry for command `id`.
    ///
    /// Returns `true` if the selection now points at `id`.
    pub fn on_hover(&mut self, id: &str) -> bool {
        if !self.is_open() || self.position_of(id).is_none() {
            return false;
        }
        self.selected_id = Some(id.to_string());
        true
    }

    /// The entry for command `id` was clicked. Same as hovering it and
    /// pressing Enter.
    pub fn on_click(&mut self, id: &str) -> Option<PaletteAction> {
        if !self.on_hover(id) {
            return None;
        }
        self.queue_selected()
    }

    /// Route a raw input event: palette keys first, then editing keys, then
    /// paste.
    pub fn handle_event(&mut self, event: &Event) -> KeyOutcome {
        match event {
            Event::Key(key) => {
                let outcome = self.on_key_down(key);
                if outcome.handled {
                    return outcome;
                }
                let mut editor = self.input.clone();
                if !editor.handle_key(key) {
                    return outcome;
                }
                let changed = editor.value() != self.input.value();
                self.input = editor;
                if changed {
                    let text = self.input.value().to_string();
                    self.on_text_changed(&text);
                }
                KeyOutcome::edited()
            }
            Event::Paste(paste) => {
                self.input.insert_str(&paste.text);
                let text = self.input.value().to_string();
                self.on_text_changed(&text);
                KeyOutcome::edited()
            }
        }
    }

    // --- Execution ---

    /// Run the queued command, if any.
    ///
    /// Called automatically in [`ExecutionMode::Immediate`]; in
    /// [`ExecutionMode::Deferred`] the host calls it after presenting the
    /// truncated text. The command runs against the current text, its
    /// output is applied, and palette mode ends. A queued id that is no
    /// longer in the filtered list is dropped without running.
    pub fn run_pending(&mut self) -> Option<PaletteAction> {
        if !self.is_open() {
            self.pending = None;
            return None;
        }
        let id = self.pending.take()?;

        let Some(command) = self.position_of(&id).map(|pos| {
            let index = self.filtered[pos];
            self.registry.commands()[index].clone()
        }) else {
            cmdslash_core::debug!(command = %id, "queued command no longer listed");
            return None;
        };

        match command.execute(self.text()) {
            CommandOutput::Replace(text) => self.set_text(text, true),
            CommandOutput::Keep => {}
        }
        self.set_open(false);
        cmdslash_core::debug!(command = %id, text_len = self.text().len(), "command executed");
        Some(PaletteAction::Executed(id))
    }

    /// Enter/click: drop the query from the text and queue the highlighted
    /// command.
    fn queue_selected(&mut self) -> Option<PaletteAction> {
        if self.pending.is_some() {
            return None;
        }
        let Some(command) = self.selected_command() else {
            cmdslash_core::debug!(query = self.query(), "nothing selected to run");
            return None;
        };
        let id = command.id().to_string();

        let text = self.input.value();
        let truncated = text[..floor_char_boundary(text, self.query_start)].to_string();
        self.pending = Some(id.clone());
        self.set_text(truncated, true);

        match self.config.execution {
            ExecutionMode::Immediate => self.run_pending(),
            ExecutionMode::Deferred => {
                cmdslash_core::debug!(command = %id, "command queued");
                Some(PaletteAction::Queued(id))
            }
        }
    }

    // --- Internal helpers ---

    /// Replace the text, keep `query_start` valid, and re-filter.
    fn set_text(&mut self, text: String, cursor_to_end: bool) {
        self.input.set_value(text);
        if cursor_to_end {
            self.input.move_to_end();
        }
        let text = self.input.value();
        self.query_start = floor_char_boundary(text, self.query_start.min(text.len()));
        self.refilter();
        if self.is_open() {
            self.snap_selection();
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_commands(&self.registry, self.query());
    }

    /// Select the first filtered entry, if there is one.
    fn snap_selection(&mut self) {
        if let Some(first) = self.filtered.first().and_then(|&i| self.registry.get(i)) {
            self.selected_id = Some(first.id().to_string());
        }
    }

    fn move_selection(&mut self, offset: isize) {
        let Some(pos) = self.selected_position() else {
            return;
        };
        let last = self.filtered.len() - 1;
        let next = pos.saturating_add_signed(offset).min(last);
        if let Some(command) = self.registry.get(self.filtered[next]) {
            cmdslash_core::trace!(from = pos, to = next, "selection moved");
            self.selected_id = Some(command.id().to_string());
        }
    }

    fn selected_position(&self) -> Option<usize> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.position_of(id))
    }

    /// Position of `id` within the filtered list.
    fn position_of(&self, id: &str) -> Option<usize> {
        self.filtered
            .iter()
            .position(|&i| self.registry.get(i).is_some_and(|c| c.id() == id))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use cmdslash_core::event::{KeyEventKind, Modifiers, PasteEvent};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    fn trigger() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('/')).with_modifiers(Modifiers::SUPER)
    }

    fn registry() -> CommandRegistry {
        CommandRegistry::new(vec![
            Command::replacing("A", "Insert 🐕", |t| format!("{t} 🐕")),
            Command::effect("B", "Say Hi", |_| {}),
            Command::replacing("C", "Delete Text", |_| String::new()),
        ])
        .unwrap()
    }

    fn type_chars(palette: &mut CommandPalette, text: &str) {
        for c in text.chars() {
            palette.handle_event(&Event::Key(press(KeyCode::Char(c))));
        }
    }

    #[test]
    fn new_palette_is_normal_with_first_selected() {
        let palette = CommandPalette::new(registry());
        assert_eq!(palette.mode(), Mode::Normal);
        assert_eq!(palette.text(), "");
        assert_eq!(palette.selected_id(), Some("A"));
        assert_eq!(palette.query_start(), 0);
        assert!(!palette.pending_execution());
    }

    #[test]
    fn trigger_toggles_and_marks_query_start() {
        let mut palette = CommandPalette::new(registry()).with_text("hello");
        let out = palette.on_key_down(&trigger());
        assert_eq!(out.action, Some(PaletteAction::Opened));
        assert!(out.handled);
        assert_eq!(palette.mode(), Mode::Palette);
        assert_eq!(palette.query_start(), 5);
        assert_eq!(palette.query(), "");

        let out = palette.on_key_down(&trigger());
        assert_eq!(out.action, Some(PaletteAction::Dismissed));
        assert_eq!(palette.mode(), Mode::Normal);
        assert_eq!(palette.query_start(), 0);
    }

    #[test]
    fn trigger_release_is_ignored() {
        let mut palette = CommandPalette::new(registry());
        let out = palette.on_key_down(&trigger().with_kind(KeyEventKind::Release));
        assert!(!out.handled);
        assert!(!palette.is_open());
    }

    #[test]
    fn typing_filters_by_prefix() {
        let mut palette = CommandPalette::new(registry());
        palette.on_key_down(&trigger());
        type_chars(&mut palette, "In");
        assert_eq!(palette.query(), "In");
        assert_eq!(palette.filtered_ids(), vec!["A"]);
        assert_eq!(palette.selected_id(), Some("A"));
    }

    #[test]
    fn filtering_snaps_selection_to_first_match() {
        let mut palette = CommandPalette::new(registry());
        palette.on_key_down(&trigger());
        palette.on_key_down(&press(KeyCode::Down));
        assert_eq!(palette.selected_id(), Some("B"));
        type_chars(&mut palette, "D");
        assert_eq!(palette.selected_id(), Some("C"));
    }

    #[test]
    fn arrows_clamp_at_both_ends() {
        let mut palette = CommandPalette::new(registry());
        palette.on_key_down(&trigger());

        let out = palette.on_key_down(&press(KeyCode::Up));
        assert!(out.prevent_default);
        assert_eq!(palette.selected_id(), Some("A"));

        for _ in 0..5 {
            palette.on_key_down(&press(KeyCode::Down));
        }
        assert_eq!(palette.selected_id(), Some("C"));

        palette.on_key_down(&press(KeyCode::Up));
        assert_eq!(palette.selected_id(), Some("B"));
    }

    #[test]
    fn arrows_ignored_outside_palette() {
        let mut palette = CommandPalette::new(registry());
        let out = palette.on_key_down(&press(KeyCode::Down));
        assert!(!out.handled);
        assert!(!out.prevent_default);
        assert_eq!(palette.selected_id(), Some("A"));
    }

    #[test]
    fn enter_truncates_then_executes() {
        let mut palette = CommandPalette::new(registry());
        palette.on_key_down(&trigger());
        type_chars(&mut palette, "In");
        let out = palette.on_key_down(&press(KeyCode::Enter));
        assert_eq!(out.action, Some(PaletteAction::Executed("A".into())));
        assert_eq!(palette.text(), " 🐕");
        assert_eq!(palette.mode(), Mode::Normal);
        assert_eq!(palette.query_start(), 0);
        assert_eq!(palette.selected_id(), Some("A"));
        assert!(!palette.pending_execution());
    }

    #[test]
    fn command_sees_truncated_text() {
        let seen = Arc::new(std::sync::Mutex::new(String::new()));
        let sink = Arc::clone(&seen);
        let registry = CommandRegistry::new(vec![Command::effect("S", "Shout", move |t| {
            *sink.lock().unwrap() = t.to_string();
        })])
        .unwrap();

        let mut palette = CommandPalette::new(registry).with_text("keep ");
        palette.on_key_down(&trigger());
        type_chars(&mut palette, "Sh");
        palette.on_key_down(&press(KeyCode::Enter));
        assert_eq!(*seen.lock().unwrap(), "keep ");
        assert_eq!(palette.text(), "keep ");
    }

    #[test]
    fn enter_with_no_matches_does_nothing() {
        let mut palette = CommandPalette::new(registry());
        palette.on_key_down(&trigger());
        type_chars(&mut palette, "xyz");
        assert!(palette.filtered_ids().is_empty());

        let out = palette.on_key_down(&press(KeyCode::Enter));
        assert!(out.handled);
        assert_eq!(out.action, None);
        assert_eq!(palette.text(), "xyz");
        assert!(palette.is_open());
        assert!(palette.view().no_matches);
    }

    #[test]
    fn enter_outside_palette_is_not_handled() {
        let mut palette = CommandPalette::new(registry()).with_text("abc");
        let out = palette.on_key_down(&press(KeyCode::Enter));
        assert!(!out.handled);
        assert_eq!(palette.text(), "abc");
    }

    #[test]
    fn escape_always_closes() {
        let mut palette = CommandPalette::new(registry());
        palette.on_key_down(&trigger());
        type_chars(&mut palette, "Sa");
        let out = palette.on_key_down(&press(KeyCode::Escape));
        assert_eq!(out.action, Some(PaletteAction::Dismissed));
        assert!(!palette.is_open());
        assert_eq!(palette.text(), "Sa");
        assert_eq!(palette.query_start(), 0);
        assert_eq!(palette.selected_id(), Some("A"));

        let out = palette.on_key_down(&press(KeyCode::Escape));
        assert!(!out.handled);
    }

    #[test]
    fn backspace_past_query_start_clamps() {
        let mut palette = CommandPalette::new(registry()).with_text("cmd");
        palette.on_key_down(&trigger());
        assert_eq!(palette.query_start(), 3);
        palette.handle_event(&Event::Key(press(KeyCode::Backspace)));
        palette.handle_event(&Event::Key(press(KeyCode::Backspace)));
        assert_eq!(palette.text(), "c");
        assert_eq!(palette.query_start(), 1);
        assert!(palette.is_open());
    }

    #[test]
    fn query_start_stays_on_char_boundary() {
        let mut palette = CommandPalette::new(registry()).with_text("ab");
        palette.on_key_down(&trigger());
        palette.on_text_changed("🐕Sa");
        assert_eq!(palette.query_start(), 0);
        palette.on_text_changed("é");
        assert!(palette.text().is_char_boundary(palette.query_start()));
        assert_eq!(palette.query(), "é");
    }

    #[test]
    fn hover_and_click() {
        let mut palette = CommandPalette::new(registry()).with_text("x");
        assert!(!palette.on_hover("B"));

        palette.on_key_down(&trigger());
        assert!(palette.on_hover("C"));
        assert_eq!(palette.selected_id(), Some("C"));
        assert!(!palette.on_hover("nope"));
        assert_eq!(palette.selected_id(), Some("C"));

        let action = palette.on_click("C");
        assert_eq!(action, Some(PaletteAction::Executed("C".into())));
        assert_eq!(palette.text(), "");
    }

    #[test]
    fn click_on_filtered_out_entry_is_ignored() {
        let mut palette = CommandPalette::new(registry());
        palette.on_key_down(&trigger());
        type_chars(&mut palette, "In");
        assert_eq!(palette.on_click("B"), None);
        assert!(palette.is_open());
        assert_eq!(palette.text(), "In");
    }

    #[test]
    fn side_effect_command_keeps_text() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let registry = CommandRegistry::new(vec![Command::effect("B", "Say Hi", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })])
        .unwrap();

        let mut palette = CommandPalette::new(registry).with_text("hello ");
        palette.on_key_down(&trigger());
        type_chars(&mut palette, "Say");
        palette.on_key_down(&press(KeyCode::Enter));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(palette.text(), "hello ");
        assert!(!palette.is_open());
    }

    #[test]
    fn deferred_execution_waits_for_host() {
        let config = PaletteConfig::default().with_execution_mode(ExecutionMode::Deferred);
        let mut palette = CommandPalette::new(registry()).with_config(config);
        palette.on_key_down(&trigger());
        type_chars(&mut palette, "In");

        let out = palette.on_key_down(&press(KeyCode::Enter));
        assert_eq!(out.action, Some(PaletteAction::Queued("A".into())));
        assert_eq!(palette.text(), "");
        assert!(palette.pending_execution());
        assert!(palette.is_open());

        // A second Enter while queued does not re-queue.
        assert_eq!(palette.on_key_down(&press(KeyCode::Enter)).action, None);

        assert_eq!(palette.run_pending(), Some(PaletteAction::Executed("A".into())));
        assert_eq!(palette.text(), " 🐕");
        assert!(!palette.is_open());
        assert_eq!(palette.run_pending(), None);
    }

    #[test]
    fn escape_cancels_deferred_execution() {
        let config = PaletteConfig::default().with_execution_mode(ExecutionMode::Deferred);
        let mut palette = CommandPalette::new(registry()).with_config(config);
        palette.on_key_down(&trigger());
        type_chars(&mut palette, "De");
        palette.on_key_down(&press(KeyCode::Enter));
        palette.on_key_down(&press(KeyCode::Escape));
        assert!(!palette.pending_execution());
        assert_eq!(palette.run_pending(), None);
        assert_eq!(palette.text(), "");
    }

    #[test]
    fn deferred_command_filtered_out_is_dropped() {
        let config = PaletteConfig::default().with_execution_mode(ExecutionMode::Deferred);
        let mut palette = CommandPalette::new(registry()).with_config(config);
        palette.on_key_down(&trigger());
        type_chars(&mut palette, "Del");
        palette.on_key_down(&press(KeyCode::Enter));
        type_chars(&mut palette, "Say");
        assert_eq!(palette.run_pending(), None);
        assert!(!palette.pending_execution());
        assert!(palette.is_open());
        assert_eq!(palette.text(), "Say");
    }

    #[test]
    fn empty_registry_never_executes() {
        let mut palette = CommandPalette::new(CommandRegistry::default());
        assert_eq!(palette.selected_id(), None);
        palette.on_key_down(&trigger());
        assert!(palette.is_open());
        type_chars(&mut palette, "abc");
        palette.on_key_down(&press(KeyCode::Down));
        let out = palette.on_key_down(&press(KeyCode::Enter));
        assert_eq!(out.action, None);
        assert_eq!(palette.text(), "abc");
        assert!(palette.view().no_matches);
    }

    #[test]
    fn custom_trigger() {
        let config = PaletteConfig::default()
            .with_trigger("ctrl+k".parse().expect("valid chord"));
        let mut palette = CommandPalette::new(registry()).with_config(config);
        palette.on_key_down(&trigger());
        assert!(!palette.is_open());
        palette.on_key_down(&press(KeyCode::Char('k')).with_modifiers(Modifiers::CTRL));
        assert!(palette.is_open());
    }

    #[test]
    fn trigger_chord_is_not_typed_into_text() {
        let mut palette = CommandPalette::new(registry());
        palette.handle_event(&Event::Key(trigger()));
        assert_eq!(palette.text(), "");
        assert!(palette.is_open());
    }

    #[test]
    fn paste_feeds_query() {
        let mut palette = CommandPalette::new(registry());
        palette.on_key_down(&trigger());
        palette.handle_event(&Event::Paste(PasteEvent::new("Say")));
        assert_eq!(palette.query(), "Say");
        assert_eq!(palette.filtered_ids(), vec!["B"]);
    }

    #[test]
    fn typing_a_joiner_between_emoji_keeps_editing() {
        let mut palette = CommandPalette::new(registry()).with_text("👨👩");
        palette.handle_event(&Event::Key(press(KeyCode::Left)));
        let out = palette.handle_event(&Event::Key(press(KeyCode::Char('\u{200D}'))));
        assert!(out.handled);
        assert_eq!(palette.text(), "👨\u{200D}👩");
        assert_eq!(palette.cursor(), 1);

        palette.handle_event(&Event::Key(press(KeyCode::End)));
        type_chars(&mut palette, "!");
        assert_eq!(palette.text(), "👨\u{200D}👩!");
    }

    #[test]
    fn pasting_a_joiner_between_emoji_keeps_editing() {
        let mut palette = CommandPalette::new(registry()).with_text("👨👩");
        palette.on_key_down(&trigger());
        palette.handle_event(&Event::Key(press(KeyCode::Left)));
        palette.handle_event(&Event::Paste(PasteEvent::new("\u{200D}")));
        assert_eq!(palette.text(), "👨\u{200D}👩");
        assert_eq!(palette.cursor(), 1);
        assert!(palette.text().is_char_boundary(palette.query_start()));
        assert!(palette.is_open());
    }

    #[test]
    fn view_reflects_state() {
        let mut palette = CommandPalette::new(registry());
        let closed = palette.view();
        assert!(!closed.palette_open);
        assert!(closed.entries.is_empty());
        assert!(!closed.no_matches);

        palette.on_key_down(&trigger());
        palette.on_key_down(&press(KeyCode::Down));
        let open = palette.view();
        assert_eq!(open.entries.len(), 3);
        assert_eq!(open.active_descendant.as_deref(), Some("B"));
        assert_eq!(open.selected_entry().map(|e| e.display.as_str()), Some("Say Hi"));
        assert_eq!(open.entries.iter().filter(|e| e.selected).count(), 1);
    }

    #[test]
    fn set_open_reports_changes() {
        let mut palette = CommandPalette::new(registry());
        assert!(palette.set_open(true));
        assert!(!palette.set_open(true));
        assert!(palette.set_open(false));
        assert!(!palette.set_open(false));
        assert!(palette.toggle());
        assert!(!palette.toggle());
    }
}
