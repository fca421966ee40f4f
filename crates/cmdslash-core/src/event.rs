#![forbid(unsafe_code)]

//! Input events understood by the palette.
//!
//! Hosts translate whatever their UI toolkit produces into these types and
//! forward them to the palette. Terminal hosts can use
//! [`Event::from_crossterm`] directly.
//!
//! Only keyboard and paste input is modelled. Pointer activity reaches the
//! palette as hover/click calls keyed by command id, so mouse, focus and
//! resize events have no representation here.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// An input event for the text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key went down, repeated, or came up.
    Key(KeyEvent),
    /// Text arrived in one piece from the clipboard.
    Paste(PasteEvent),
}

impl Event {
    /// Translate a crossterm event.
    ///
    /// Returns `None` for events the palette has no use for (mouse, focus,
    /// resize, and keys outside [`KeyCode`]).
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) => key_from_crossterm(key).map(Self::Key),
            cte::Event::Paste(text) => Some(Self::Paste(PasteEvent::new(text))),
            cte::Event::FocusGained
            | cte::Event::FocusLost
            | cte::Event::Mouse(_)
            | cte::Event::Resize(..) => None,
        }
    }
}

/// One keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A press of `code` with nothing held.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Replace the held modifiers (builder).
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the event kind (builder).
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Press or auto-repeat. Releases never drive state changes.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Alt/Option is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Super (Cmd, Win, Meta) is held.
    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }
}

/// Keys the line editor and palette react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// F1 through F24.
    F(u8),
}

/// Press, repeat or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Also used when the source cannot tell the kinds apart.
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Held modifier keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        /// Cmd on macOS, Win elsewhere.
        const SUPER = 1 << 3;
    }
}

/// Pasted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    pub text: String,
}

impl PasteEvent {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

// ---------------------------------------------------------------------------
// crossterm translation
// ---------------------------------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
fn key_from_crossterm(event: cte::KeyEvent) -> Option<KeyEvent> {
    let kind = match event.kind {
        cte::KeyEventKind::Press => KeyEventKind::Press,
        cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
        cte::KeyEventKind::Release => KeyEventKind::Release,
    };
    Some(KeyEvent {
        code: code_from_crossterm(event.code)?,
        modifiers: modifiers_from_crossterm(event.modifiers),
        kind,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn code_from_crossterm(code: cte::KeyCode) -> Option<KeyCode> {
    use cte::KeyCode as Ct;

    let mapped = match code {
        Ct::Char(c) => KeyCode::Char(c),
        Ct::F(n) => KeyCode::F(n),
        Ct::Enter => KeyCode::Enter,
        Ct::Esc => KeyCode::Escape,
        Ct::Backspace => KeyCode::Backspace,
        Ct::Delete => KeyCode::Delete,
        Ct::Insert => KeyCode::Insert,
        Ct::Tab => KeyCode::Tab,
        Ct::BackTab => KeyCode::BackTab,
        Ct::Home => KeyCode::Home,
        Ct::End => KeyCode::End,
        Ct::PageUp => KeyCode::PageUp,
        Ct::PageDown => KeyCode::PageDown,
        Ct::Up => KeyCode::Up,
        Ct::Down => KeyCode::Down,
        Ct::Left => KeyCode::Left,
        Ct::Right => KeyCode::Right,
        _ => return None,
    };
    Some(mapped)
}

/// crossterm modifier bits and the flag each one sets. macOS reports Cmd as
/// SUPER, some terminals as META or HYPER.
#[cfg(not(target_arch = "wasm32"))]
const CROSSTERM_MODIFIERS: [(cte::KeyModifiers, Modifiers); 6] = [
    (cte::KeyModifiers::SHIFT, Modifiers::SHIFT),
    (cte::KeyModifiers::ALT, Modifiers::ALT),
    (cte::KeyModifiers::CONTROL, Modifiers::CTRL),
    (cte::KeyModifiers::SUPER, Modifiers::SUPER),
    (cte::KeyModifiers::META, Modifiers::SUPER),
    (cte::KeyModifiers::HYPER, Modifiers::SUPER),
];

#[cfg(not(target_arch = "wasm32"))]
fn modifiers_from_crossterm(held: cte::KeyModifiers) -> Modifiers {
    CROSSTERM_MODIFIERS
        .iter()
        .filter(|(bit, _)| held.contains(*bit))
        .fold(Modifiers::NONE, |acc, (_, flag)| acc | *flag)
}
