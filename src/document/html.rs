//! Markdown to HTML with comrak.

use comrak::{Options, markdown_to_html};

use crate::config::ThemeMode;

const PAGE_STYLE: &str = include_str!("../../assets/page.css");

fn create_options() -> Options {
    let mut options = Options::default();

    // Raw HTML in untrusted markdown is shown as text, never executed.
    options.render.escape = true;
    options.render.unsafe_ = false;

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.shortcodes = true;
    // Heading ids let in-page `#anchor` links resolve.
    options.extension.header_ids = Some(String::new());
    options
}

/// Render markdown to an HTML fragment.
pub fn render(markdown: &str) -> String {
    markdown_to_html(markdown, &create_options())
}

/// Wrap a rendered fragment in a complete HTML page.
pub fn page(body: &str, theme: ThemeMode) -> String {
    let scheme = match theme {
        ThemeMode::Auto => "light dark",
        ThemeMode::Light => "light",
        ThemeMode::Dark => "dark",
    };
    format!(
        "<!DOCTYPE html>\n<html data-theme=\"{theme}\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"color-scheme\" content=\"{scheme}\">\n\
         <style>\n{PAGE_STYLE}</style>\n</head>\n<body>\n<main class=\"markdown-body\">\n{body}</main>\n</body>\n</html>\n",
        theme = theme.as_str(),
    )
}
