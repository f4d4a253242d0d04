use crate::config::ThemeMode;
use crate::document::Document;
use crate::search::SearchState;

/// Which part of the window receives key presses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// The document has focus; vi-style keys are live.
    #[default]
    Normal,
    /// The search bar has focus; text goes into the query.
    SearchActive,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug, Default, Clone)]
pub struct Model {
    /// The displayed document, `None` until the first load succeeds
    pub document: Option<Document>,
    pub mode: Mode,
    pub search: SearchState,
    /// Colour scheme of the generated page
    pub theme: ThemeMode,
    /// Set once the user asked to quit; the event loop exits after the
    /// current event
    pub quit_requested: bool,
}

impl Model {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    /// Window title for the current state.
    pub fn title(&self) -> String {
        self.document
            .as_ref()
            .map_or_else(|| crate::document::APP_TITLE.to_string(), Document::title)
    }
}
