//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Usage
//!
//! In the main event loop, build a [`Keymap`] once from the config, then call
//! [`Keymap::to_app_event`] (or [`Keymap::to_app_event_insert`] while a text
//! input is focused) on every [`crossterm::event::Event`].
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                         |
//! |-------------------------|-------------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                        |
//! | `Tab` *                 | `FocusNext`                   |
//! | `/` *                   | `QueryFocus`                  |
//! | `i` *                   | `Action(SaveInternal)`        |
//! | `e` *                   | `Action(SaveExternal)`        |
//! | `c` *                   | `Action(CopyExternal)`        |
//! | `↑` / `k`               | `Nav(Up)`                     |
//! | `↓` / `j`               | `Nav(Down)`                   |
//! | `←` / `h`               | `Nav(Left)`                   |
//! | `→` / `l`               | `Nav(Right)`                  |
//! | printable char          | `Char(c)`                     |
//! | `Backspace`             | `Backspace`                   |
//! | `Enter`                 | `Enter`                       |
//! | terminal resize         | `Resize(w, h)`                |
//!
//! Keys marked `*` come from the `[keybindings]` config section.
//!
//! ## Insert mode
//!
//! While the query bar or the command bar is focused, every printable
//! character is forwarded as `Char`, arrow keys still produce `Nav`, and only
//! `Ctrl+c`, `Escape`, `Enter`, `Tab` and `Backspace` keep their bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use lexi_core::config::KeybindingsConfig;
use lexi_core::ExportAction;

/// Cardinal direction for list and button navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane (Tab-cycle).
    FocusNext,
    /// Transfer focus to the query bar.
    QueryFocus,
    /// Trigger one of the export buttons directly.
    Action(ExportAction),
    /// Move within the result list, the button row, or the text cursor.
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Confirm: select a result, press a button, run a command.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the active modal (query bar focus, help popup, command bar).
    Escape,
}

/// Resolved, configurable keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    pub toggle_focus: KeyCode,
    pub query_focus: KeyCode,
    pub save_internal: KeyCode,
    pub save_external: KeyCode,
    pub copy_external: KeyCode,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default())
    }
}

impl Keymap {
    /// Build from the `[keybindings]` section. Unparseable entries fall back
    /// to the built-in default for that slot.
    pub fn from_config(cfg: &KeybindingsConfig) -> Self {
        let pick = |raw: &str, fallback: KeyCode| {
            parse_key(raw).unwrap_or_else(|| {
                tracing::warn!(key = raw, "unrecognised keybinding, using default");
                fallback
            })
        };
        Self {
            toggle_focus: pick(&cfg.toggle_focus, KeyCode::Tab),
            query_focus: pick(&cfg.query_focus, KeyCode::Char('/')),
            save_internal: pick(&cfg.save_internal, KeyCode::Char('i')),
            save_external: pick(&cfg.save_external, KeyCode::Char('e')),
            copy_external: pick(&cfg.copy_external, KeyCode::Char('c')),
        }
    }

    /// Map a raw crossterm [`Event`] to an [`AppEvent`] (navigation mode).
    ///
    /// Returns `None` for events that carry no meaning for the application
    /// (mouse events, unbound keys).
    pub fn to_app_event(&self, event: Event) -> Option<AppEvent> {
        match event {
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            Event::Key(key) => self.map_key(key),
            _ => None,
        }
    }

    /// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
    pub fn to_app_event_insert(&self, event: Event) -> Option<AppEvent> {
        match event {
            Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            Event::Key(key) => self.map_key_insert(key),
            _ => None,
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<AppEvent> {
        use KeyCode::*;
        use KeyModifiers as Mod;

        // Ctrl+c quits from anywhere.
        if key.code == Char('c') && key.modifiers == Mod::CONTROL {
            return Some(AppEvent::Quit);
        }

        let plain = key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT;
        if plain {
            if key.code == self.toggle_focus {
                return Some(AppEvent::FocusNext);
            }
            if key.code == self.query_focus {
                return Some(AppEvent::QueryFocus);
            }
            if key.code == self.save_internal {
                return Some(AppEvent::Action(ExportAction::SaveInternal));
            }
            if key.code == self.save_external {
                return Some(AppEvent::Action(ExportAction::SaveExternal));
            }
            if key.code == self.copy_external {
                return Some(AppEvent::Action(ExportAction::CopyExternal));
            }
        }

        match key.code {
            Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),

            Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
            Down | Char('j') if key.modifiers == Mod::NONE => {
                Some(AppEvent::Nav(Direction::Down))
            }
            Left | Char('h') if key.modifiers == Mod::NONE => {
                Some(AppEvent::Nav(Direction::Left))
            }
            Right | Char('l') if key.modifiers == Mod::NONE => {
                Some(AppEvent::Nav(Direction::Right))
            }

            Char(c) if plain => Some(AppEvent::Char(c)),

            Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
            Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
            Esc => Some(AppEvent::Escape),

            _ => None,
        }
    }

    fn map_key_insert(&self, key: KeyEvent) -> Option<AppEvent> {
        use KeyCode::*;
        use KeyModifiers as Mod;

        match key.code {
            Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

            Up => Some(AppEvent::Nav(Direction::Up)),
            Down => Some(AppEvent::Nav(Direction::Down)),
            Left => Some(AppEvent::Nav(Direction::Left)),
            Right => Some(AppEvent::Nav(Direction::Right)),

            // Only a non-character toggle key can leave a text input; a
            // character binding would make that letter untypeable.
            code if code == self.toggle_focus
                && !matches!(code, Char(_))
                && key.modifiers == Mod::NONE =>
            {
                Some(AppEvent::FocusNext)
            }

            Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
                Some(AppEvent::Char(c))
            }

            Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
            Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
            Esc => Some(AppEvent::Escape),

            _ => None,
        }
    }
}

/// Parse a keybinding string: a single character, or one of `Tab`, `Enter`,
/// `Esc`, `Backspace`, `Space`, `F1`–`F12`.
pub fn parse_key(raw: &str) -> Option<KeyCode> {
    let mut chars = raw.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }
    match raw.to_ascii_lowercase().as_str() {
        "tab" => Some(KeyCode::Tab),
        "enter" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        f if f.starts_with('f') => f[1..]
            .parse::<u8>()
            .ok()
            .filter(|n| (1..=12).contains(n))
            .map(KeyCode::F),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
