//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`effects_for`]: Pure derivation of the side effects of a message
//! - [`Session`]: Executes effects against a [`ViewHost`](crate::view::ViewHost)
//! - [`App::run`]: Window, web view and event loop

mod effects;
mod event_loop;
mod input;
mod model;
mod session;
mod update;

pub use effects::{Effect, effects_for};
pub use input::{
    ChordSpec, KeyCode, KeyEvent, Modifiers, Scope, handle_key, handle_page_event, page_bindings,
};
pub use model::{Mode, Model};
pub use session::{Desktop, Session};
pub use update::{Message, update};

use crate::config::ThemeMode;
use crate::document::Document;

/// Main application struct that owns the window and runs the event loop.
pub struct App {
    document: Option<Document>,
    watch_enabled: bool,
    theme: ThemeMode,
    maximized: bool,
}

impl App {
    /// Create an application showing `document`, or asking for one when `None`.
    pub fn new(document: Option<Document>) -> Self {
        Self {
            document,
            watch_enabled: false,
            theme: ThemeMode::Auto,
            maximized: true,
        }
    }

    /// Enable or disable reloading when the file changes on disk.
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Set the page colour scheme.
    pub const fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Start with a maximized window.
    pub const fn with_maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }
}
