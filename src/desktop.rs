//! Native dialogs and the system URL handler.

use std::path::{Path, PathBuf};

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::app::Desktop;
use crate::document::APP_TITLE;

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd", "mkdn", "txt"];

/// [`Desktop`] backed by `rfd` dialogs and the `open` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemDesktop;

impl Desktop for SystemDesktop {
    fn pick_markdown_file(&mut self, start_dir: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = FileDialog::new()
            .set_title("Open Markdown file")
            .add_filter("Markdown", MARKDOWN_EXTENSIONS);
        if let Some(dir) = start_dir {
            dialog = dialog.set_directory(dir);
        }
        let picked = dialog.pick_file();
        tracing::debug!(?picked, "file dialog closed");
        picked
    }

    fn open_external(&mut self, target: &str) -> std::io::Result<()> {
        open::that(target)
    }

    fn report_error(&mut self, message: &str) {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(APP_TITLE)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
        tracing::trace!(?result, "error dialog closed");
    }
}
