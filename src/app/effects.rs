use std::path::PathBuf;

use crate::app::{Message, Model};
use crate::document::{Source, html};
use crate::view::scripts;

/// A side effect requested by a message.
///
/// Effects are derived purely from the updated model and the message; the
/// [`Session`](crate::app::Session) executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace the page with this HTML
    Display(String),
    SetTitle(String),
    RunScript(String),
    Search(String),
    ClearSearch,
    ShowMatch(usize),
    SetSearchBarVisible(bool),
    OpenExternal(String),
    /// Show the file chooser
    PickFile,
    /// Load a document the user asked for
    Load(Source),
    /// Re-read the displayed file after it changed on disk
    Reload(PathBuf),
    ReportError(String),
}

/// Side effects of `msg`, given the model after `update`.
pub fn effects_for(model: &Model, msg: &Message) -> Vec<Effect> {
    match msg {
        Message::ScrollBy { dx, dy } => vec![Effect::RunScript(scripts::scroll_by(*dx, *dy))],
        Message::JumpToAnchor(id) => vec![Effect::RunScript(scripts::scroll_to_anchor(id))],
        Message::OpenExternal(target) => vec![Effect::OpenExternal(target.clone())],

        Message::ToggleSearchBar | Message::FocusSearch | Message::CloseSearch => {
            vec![Effect::SetSearchBarVisible(model.search.is_visible())]
        }
        Message::SearchInput(query) if query.is_empty() => vec![Effect::ClearSearch],
        Message::SearchInput(query) => vec![Effect::Search(query.clone())],
        Message::NextMatch | Message::PrevMatch => model
            .search
            .cursor()
            .map(|cursor| Effect::ShowMatch(cursor.current()))
            .into_iter()
            .collect(),

        Message::OpenFileDialog => vec![Effect::PickFile],
        Message::OpenPath(path) => vec![Effect::Load(Source::Path(path.clone()))],
        Message::DocumentLoaded(_) => match &model.document {
            Some(document) => vec![
                Effect::Display(html::page(&html::render(document.markdown()), model.theme)),
                Effect::SetTitle(model.title()),
            ],
            None => Vec::new(),
        },
        Message::LoadFailed(error) => {
            let mut effects = vec![Effect::ReportError(error.clone())];
            // Nothing on screen yet: let the user pick another file.
            if model.document.is_none() {
                effects.push(Effect::PickFile);
            }
            effects
        }
        Message::FileChanged => model
            .document
            .as_ref()
            .and_then(|document| document.path())
            .map(|path| Effect::Reload(path.to_path_buf()))
            .into_iter()
            .collect(),

        Message::SearchResult { .. }
        | Message::FocusChanged(_)
        | Message::FileDialogCancelled
        | Message::ReloadFailed(_)
        | Message::Quit => Vec::new(),
    }
}
