//! Key chord dispatch.
//!
//! The keymap is a single table shared by the host (which decides what a
//! chord does) and the page (which only forwards chords found in it, so
//! everything else keeps its default behaviour, e.g. typing into the
//! search bar).

use serde::Serialize;

use crate::app::{Message, Mode, Model};
use crate::view::PageEvent;
use crate::view::scripts::SCROLL_STEP;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    /// Any key the keymap never binds.
    Other,
}

impl KeyCode {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_dom(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }

    fn dom_name(self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Enter => "Enter".to_string(),
            Self::Escape => "Escape".to_string(),
            Self::Other => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A character typed without modifiers.
    pub fn plain(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::default())
    }

    /// A character typed with Ctrl held.
    pub fn ctrl(c: char) -> Self {
        Self::new(
            KeyCode::Char(c),
            Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        )
    }
}

/// Where a binding applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Regardless of focus.
    Global,
    /// While the document has focus.
    Normal,
    /// While the search bar has focus.
    Search,
}

impl Scope {
    const fn active_in(self, mode: Mode) -> bool {
        match self {
            Self::Global => true,
            Self::Normal => matches!(mode, Mode::Normal),
            Self::Search => matches!(mode, Mode::SearchActive),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    ToggleSearchBar,
    OpenFileDialog,
    Scroll { dx: i32, dy: i32 },
    NextMatch,
    PrevMatch,
    FocusSearch,
    CloseSearch,
}

impl Action {
    const fn message(self) -> Message {
        match self {
            Self::Quit => Message::Quit,
            Self::ToggleSearchBar => Message::ToggleSearchBar,
            Self::OpenFileDialog => Message::OpenFileDialog,
            Self::Scroll { dx, dy } => Message::ScrollBy { dx, dy },
            Self::NextMatch => Message::NextMatch,
            Self::PrevMatch => Message::PrevMatch,
            Self::FocusSearch => Message::FocusSearch,
            Self::CloseSearch => Message::CloseSearch,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    code: KeyCode,
    ctrl: bool,
    shift: bool,
    scope: Scope,
    action: Action,
}

impl Binding {
    const fn key(c: char, scope: Scope, action: Action) -> Self {
        Self {
            code: KeyCode::Char(c),
            ctrl: false,
            shift: false,
            scope,
            action,
        }
    }

    const fn ctrl(c: char, action: Action) -> Self {
        Self {
            code: KeyCode::Char(c),
            ctrl: true,
            shift: false,
            scope: Scope::Global,
            action,
        }
    }

    const fn named(code: KeyCode, shift: bool, action: Action) -> Self {
        Self {
            code,
            ctrl: false,
            shift,
            scope: Scope::Search,
            action,
        }
    }

    /// Characters already encode Shift, so it only matters for named keys.
    fn matches(&self, event: &KeyEvent) -> bool {
        let mods = event.modifiers;
        if mods.ctrl != self.ctrl || mods.alt || mods.meta || event.code != self.code {
            return false;
        }
        matches!(self.code, KeyCode::Char(_)) || mods.shift == self.shift
    }
}

const KEYMAP: &[Binding] = &[
    Binding::ctrl('q', Action::Quit),
    Binding::ctrl('f', Action::ToggleSearchBar),
    Binding::ctrl('o', Action::OpenFileDialog),
    Binding::key('h', Scope::Normal, Action::Scroll { dx: -SCROLL_STEP, dy: 0 }),
    Binding::key('j', Scope::Normal, Action::Scroll { dx: 0, dy: SCROLL_STEP }),
    Binding::key('k', Scope::Normal, Action::Scroll { dx: 0, dy: -SCROLL_STEP }),
    Binding::key('l', Scope::Normal, Action::Scroll { dx: SCROLL_STEP, dy: 0 }),
    Binding::key('n', Scope::Normal, Action::NextMatch),
    Binding::key('N', Scope::Normal, Action::PrevMatch),
    Binding::key('/', Scope::Normal, Action::FocusSearch),
    Binding::named(KeyCode::Enter, false, Action::NextMatch),
    Binding::named(KeyCode::Enter, true, Action::PrevMatch),
    Binding::named(KeyCode::Escape, false, Action::CloseSearch),
];

/// Resolve a key press in the current mode; `None` falls through to the page.
pub fn handle_key(event: &KeyEvent, model: &Model) -> Option<Message> {
    KEYMAP
        .iter()
        .find(|binding| binding.scope.active_in(model.mode) && binding.matches(event))
        .map(|binding| binding.action.message())
}

/// Translate a page message into an application message.
pub fn handle_page_event(event: PageEvent, model: &Model) -> Option<Message> {
    match event {
        PageEvent::Key {
            key,
            ctrl,
            alt,
            shift,
            meta,
        } => {
            let event = KeyEvent::new(
                KeyCode::from_dom(&key),
                Modifiers {
                    ctrl,
                    alt,
                    shift,
                    meta,
                },
            );
            let msg = handle_key(&event, model);
            if msg.is_none() {
                tracing::trace!(?event, mode = ?model.mode, "unbound key");
            }
            msg
        }
        PageEvent::SearchInput { query } => Some(Message::SearchInput(query)),
        PageEvent::SearchResult { query, total } => Some(Message::SearchResult { query, total }),
        PageEvent::Focus { target } => Some(Message::FocusChanged(target)),
    }
}

/// A binding as the page sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordSpec {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub scope: Scope,
}

/// Every chord the page should intercept and forward.
pub fn page_bindings() -> Vec<ChordSpec> {
    KEYMAP
        .iter()
        .map(|binding| ChordSpec {
            key: binding.code.dom_name(),
            ctrl: binding.ctrl,
            shift: binding.shift,
            scope: binding.scope,
        })
        .collect()
}
