use std::path::PathBuf;

use crate::app::{Mode, Model};
use crate::document::Document;
use crate::view::Focus;

/// All possible events and actions in the application.
///
/// These represent user input, page events and results of side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Scroll the page by a pixel offset
    ScrollBy { dx: i32, dy: i32 },
    /// Scroll to an element id inside the page
    JumpToAnchor(String),
    /// Hand an address to the system default handler
    OpenExternal(String),

    // Search
    /// Show or hide the search bar
    ToggleSearchBar,
    /// Show the search bar and give it focus
    FocusSearch,
    /// Hide the search bar and clear the search
    CloseSearch,
    /// Search bar text changed
    SearchInput(String),
    /// The page highlighted `total` matches for `query`
    SearchResult { query: String, total: usize },
    /// Go to next search match
    NextMatch,
    /// Go to previous search match
    PrevMatch,
    /// Keyboard focus moved inside the page
    FocusChanged(Focus),

    // Documents
    /// Ask the user for a file to open
    OpenFileDialog,
    /// The file dialog was dismissed
    FileDialogCancelled,
    /// Load the file at this path
    OpenPath(PathBuf),
    /// A document was read and should replace the current one
    DocumentLoaded(Document),
    /// Loading a document requested by the user failed
    LoadFailed(String),
    /// The watched file changed on disk
    FileChanged,
    /// Re-reading the watched file failed
    ReloadFailed(String),

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ToggleSearchBar => {
            if model.search.is_visible() {
                close_search(&mut model);
            } else {
                open_search(&mut model);
            }
        }
        Message::FocusSearch => open_search(&mut model),
        Message::CloseSearch => close_search(&mut model),
        Message::SearchInput(query) => model.search.set_query(query),
        Message::SearchResult { query, total } => {
            if !model.search.apply_result(&query, total) {
                tracing::debug!(%query, "dropping stale search result");
            }
        }
        Message::NextMatch => {
            model.search.next_match();
        }
        Message::PrevMatch => {
            model.search.previous_match();
        }
        Message::FocusChanged(Focus::Search) => {
            if model.search.is_visible() {
                model.mode = Mode::SearchActive;
            }
        }
        Message::FocusChanged(Focus::View) => model.mode = Mode::Normal,

        Message::DocumentLoaded(document) => {
            // The page is rebuilt, so the search bar starts hidden again.
            model.document = Some(document);
            model.search.close();
            model.mode = Mode::Normal;
        }
        Message::FileDialogCancelled => {
            if model.document.is_none() {
                model.quit_requested = true;
            }
        }

        Message::Quit => model.quit_requested = true,

        Message::ScrollBy { .. }
        | Message::JumpToAnchor(_)
        | Message::OpenExternal(_)
        | Message::OpenFileDialog
        | Message::OpenPath(_)
        | Message::LoadFailed(_)
        | Message::FileChanged
        | Message::ReloadFailed(_) => {}
    }
    model
}

fn open_search(model: &mut Model) {
    model.search.show();
    model.mode = Mode::SearchActive;
}

fn close_search(model: &mut Model) {
    model.search.close();
    model.mode = Mode::Normal;
}
