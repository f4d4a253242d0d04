use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::app::{Effect, Message, Model, effects_for, update};
use crate::document::{self, Document, Source};
use crate::view::ViewHost;

/// Operating system services used outside the web view.
pub trait Desktop {
    /// Show a modal file chooser; `None` when the user cancels.
    fn pick_markdown_file(&mut self, start_dir: Option<&Path>) -> Option<PathBuf>;

    /// Open `target` with the system default handler.
    ///
    /// # Errors
    /// Returns an error if no handler could be launched.
    fn open_external(&mut self, target: &str) -> std::io::Result<()>;

    /// Tell the user something went wrong.
    fn report_error(&mut self, message: &str);
}

/// Runs messages through `update` and executes their effects.
///
/// Effects that produce a result (file dialog, loads) feed a follow-up
/// message back into the queue, so one dispatch may cascade.
pub struct Session<H, D> {
    model: Model,
    host: H,
    desktop: D,
    queue: VecDeque<Message>,
}

impl<H: ViewHost, D: Desktop> Session<H, D> {
    pub fn new(model: Model, host: H, desktop: D) -> Self {
        Self {
            model,
            host,
            desktop,
            queue: VecDeque::new(),
        }
    }

    /// Show the initial document, or ask for one.
    pub fn start(&mut self, document: Option<Document>) {
        match document {
            Some(document) => self.dispatch(Message::DocumentLoaded(document)),
            None => self.dispatch(Message::OpenFileDialog),
        }
    }

    pub fn dispatch(&mut self, msg: Message) {
        self.queue.push_back(msg);
        while let Some(msg) = self.queue.pop_front() {
            if self.model.quit_requested {
                self.queue.clear();
                break;
            }
            tracing::debug!(?msg, mode = ?self.model.mode, "dispatch");
            let model = std::mem::take(&mut self.model);
            self.model = update(model, msg.clone());
            for effect in effects_for(&self.model, &msg) {
                if let Some(next) = self.apply(effect) {
                    self.queue.push_back(next);
                }
            }
        }
    }

    pub const fn model(&self) -> &Model {
        &self.model
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn desktop(&self) -> &D {
        &self.desktop
    }

    pub const fn should_quit(&self) -> bool {
        self.model.quit_requested
    }

    fn apply(&mut self, effect: Effect) -> Option<Message> {
        match effect {
            Effect::Display(html) => self.host.display(&html),
            Effect::SetTitle(title) => self.host.set_title(&title),
            Effect::RunScript(snippet) => self.host.run_script(&snippet),
            Effect::Search(query) => self.host.search(&query),
            Effect::ClearSearch => self.host.clear_search(),
            Effect::ShowMatch(index) => self.host.show_match(index),
            Effect::SetSearchBarVisible(visible) => self.host.set_search_bar_visible(visible),
            Effect::OpenExternal(target) => {
                tracing::info!(%target, "opening externally");
                if let Err(err) = self.desktop.open_external(&target) {
                    tracing::warn!(%target, %err, "failed to open link");
                }
            }
            Effect::PickFile => {
                let start_dir = self.model.document.as_ref().and_then(Document::directory);
                return Some(
                    self.desktop
                        .pick_markdown_file(start_dir)
                        .map_or(Message::FileDialogCancelled, Message::OpenPath),
                );
            }
            Effect::Load(source) => {
                return Some(match document::load(&source) {
                    Ok(document) => Message::DocumentLoaded(document),
                    Err(err) => {
                        tracing::error!(%err, "load failed");
                        Message::LoadFailed(err.to_string())
                    }
                });
            }
            Effect::Reload(path) => {
                return Some(match document::load(&Source::Path(path)) {
                    Ok(document) => Message::DocumentLoaded(document),
                    Err(err) => {
                        tracing::warn!(%err, "reload failed; keeping current view");
                        Message::ReloadFailed(err.to_string())
                    }
                });
            }
            Effect::ReportError(message) => self.desktop.report_error(&message),
        }
        None
    }
}
