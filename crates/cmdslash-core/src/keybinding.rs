#![forbid(unsafe_code)]

//! Key chords: a key code plus an exact set of modifiers.
//!
//! Chords describe caller-configurable shortcuts such as the palette trigger
//! (`Super+/` by default). They parse from and format to the familiar
//! `Ctrl+Shift+P` notation.
//!
//! # Matching rules
//!
//! 1. Only press and repeat events match; releases never do.
//! 2. Modifiers must match exactly, except that SHIFT is ignored for
//!    character keys when the chord does not mention it. Terminals disagree
//!    on whether shifted punctuation (`?`, `:`) carries the SHIFT bit.
//! 3. ASCII letters compare case-insensitively.
//!
//! # Example
//!
//! ```
//! use cmdslash_core::event::{KeyCode, KeyEvent, Modifiers};
//! use cmdslash_core::keybinding::KeyChord;
//!
//! let chord: KeyChord = "super+/".parse().unwrap();
//! let event = KeyEvent::new(KeyCode::Char('/')).with_modifiers(Modifiers::SUPER);
//! assert!(chord.matches(&event));
//! assert_eq!(chord.to_string(), "Super+/");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::event::{KeyCode, KeyEvent, Modifiers};

/// A key code together with the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// The key that completes the chord.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: Modifiers,
}

impl KeyChord {
    /// Create a chord.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A chord with no modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Whether `event` triggers this chord.
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if !event.is_actionable() {
            return false;
        }

        match (self.code, event.code) {
            (KeyCode::Char(want), KeyCode::Char(got)) => {
                if !want.eq_ignore_ascii_case(&got) {
                    return false;
                }
                let mut held = event.modifiers;
                if !self.modifiers.contains(Modifiers::SHIFT) {
                    held.remove(Modifiers::SHIFT);
                }
                held == self.modifiers
            }
            (want, got) => want == got && event.modifiers == self.modifiers,
        }
    }
}

impl Default for KeyChord {
    /// `Super+/` (Cmd+/ on macOS).
    fn default() -> Self {
        Self::new(KeyCode::Char('/'), Modifiers::SUPER)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in MODIFIER_NAMES {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "F{n}"),
            code => f.write_str(named_key_label(code)),
        }
    }
}

const MODIFIER_NAMES: [(Modifiers, &str); 4] = [
    (Modifiers::CTRL, "Ctrl"),
    (Modifiers::ALT, "Alt"),
    (Modifiers::SHIFT, "Shift"),
    (Modifiers::SUPER, "Super"),
];

fn named_key_label(code: KeyCode) -> &'static str {
    match code {
        KeyCode::Enter => "Enter",
        KeyCode::Escape => "Esc",
        KeyCode::Backspace => "Backspace",
        KeyCode::Tab => "Tab",
        KeyCode::BackTab => "BackTab",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Up => "Up",
        KeyCode::Down => "Down",
        KeyCode::Left => "Left",
        KeyCode::Right => "Right",
        KeyCode::Char(_) | KeyCode::F(_) => "",
    }
}

/// Errors from parsing a [`KeyChord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChordParseError {
    /// The input was empty or only whitespace.
    Empty,
    /// A `+`-separated prefix was not a known modifier.
    UnknownModifier(String),
    /// The final segment was not a known key.
    UnknownKey(String),
}

impl fmt::Display for ChordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty key chord"),
            Self::UnknownModifier(m) => write!(f, "unknown modifier: {m:?}"),
            Self::UnknownKey(k) => write!(f, "unknown key: {k:?}"),
        }
    }
}

impl std::error::Error for ChordParseError {}

impl FromStr for KeyChord {
    type Err = ChordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ChordParseError::Empty);
        }

        // "ctrl++" binds the plus key itself.
        let (prefix, key) = match s.strip_suffix("++") {
            Some(rest) => (Some(rest), "+"),
            None if s == "+" => (None, s),
            None => match s.rsplit_once('+') {
                Some((rest, key)) => (Some(rest), key),
                None => (None, s),
            },
        };

        let mut modifiers = Modifiers::NONE;
        for part in prefix.into_iter().flat_map(|p| p.split('+')) {
            modifiers |= parse_modifier(part.trim())?;
        }

        let code = parse_key(key.trim())?;
        Ok(Self::new(code, modifiers))
    }
}

fn parse_modifier(name: &str) -> Result<Modifiers, ChordParseError> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Ok(Modifiers::CTRL),
        "alt" | "option" | "opt" => Ok(Modifiers::ALT),
        "shift" => Ok(Modifiers::SHIFT),
        "super" | "cmd" | "command" | "meta" | "win" => Ok(Modifiers::SUPER),
        _ => Err(ChordParseError::UnknownModifier(name.to_string())),
    }
}

fn parse_key(name: &str) -> Result<KeyCode, ChordParseError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    let lower = name.to_ascii_lowercase();
    let code = match lower.as_str() {
        "space" => KeyCode::Char(' '),
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Escape,
        "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        _ => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
            Some(n @ 1..=24) => KeyCode::F(n),
            _ => return Err(ChordParseError::UnknownKey(name.to_string())),
        },
    };
    Ok(code)
}
