// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. view::ViewHost)
    clippy::module_name_repetitions
)]

//! # mdview
//!
//! A minimal desktop markdown viewer.
//!
//! mdview renders a markdown file as HTML inside an embedded web view and
//! adds a few keyboard conveniences:
//! - vi-style scrolling (`h`/`j`/`k`/`l`)
//! - in-page search (`Ctrl+F`, `/`, `n`/`N`)
//! - links open in the system browser, never inside the viewer
//! - `Ctrl+O` to open another file, `Ctrl+Q` to quit
//!
//! ## Architecture
//!
//! mdview uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **Effects**: Pure description of side effects, executed by a session
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Loading markdown and rendering it to HTML
//! - [`view`]: The web view host and page scripts
//! - [`navigation`]: Navigation policy for the web view
//! - [`search`]: Search state
//! - [`watcher`]: File watching
//! - [`config`]: Saved default flags

pub mod app;
pub mod config;
pub mod desktop;
pub mod document;
pub mod error;
pub mod navigation;
pub mod search;
pub mod view;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Document, Source};
    pub use crate::error::ViewerError;
    pub use crate::view::ViewHost;
}
