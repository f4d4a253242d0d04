//! The rendering surface.
//!
//! [`ViewHost`] is the seam between application state and the embedded web
//! view. Everything beyond loading HTML and setting the title is expressed
//! as a script injected into the page, so the default methods work for any
//! host that can run scripts.

pub mod page;
pub mod scripts;
mod webview;

pub use page::{Focus, PageEvent};
pub use webview::{UserEvent, WebViewHost, build_webview};

use crate::search::MATCH_LIMIT;

pub trait ViewHost {
    /// Replace the displayed page.
    fn display(&mut self, html: &str);

    /// Run a script in the page, ignoring any result.
    fn run_script(&mut self, snippet: &str);

    fn set_title(&mut self, title: &str);

    /// Highlight matches for `query` from the top of the page.
    fn search(&mut self, query: &str) {
        if query.is_empty() {
            self.clear_search();
        } else {
            self.run_script(&scripts::search(query, MATCH_LIMIT));
        }
    }

    fn clear_search(&mut self) {
        self.run_script(scripts::CLEAR_SEARCH);
    }

    fn show_match(&mut self, index: usize) {
        self.run_script(&scripts::show_match(index));
    }

    fn set_search_bar_visible(&mut self, visible: bool) {
        self.run_script(&scripts::set_search_bar_visible(visible));
    }
}
