//! Scripts injected into the page.
//!
//! String arguments are encoded as JSON literals so arbitrary user input can
//! never break out of the call expression.

use serde::Serialize;
use serde_json::{Value, json};

use crate::search::literal_pattern;

const BOOTSTRAP_TEMPLATE: &str = include_str!("../../assets/bootstrap.js");
const CONFIG_PLACEHOLDER: &str = "__MDVIEW_CONFIG__";

/// Pixels scrolled by one vi-style key press.
pub const SCROLL_STEP: i32 = 100;

pub const CLEAR_SEARCH: &str = "window.mdview && window.mdview.clearSearch();";

/// The initialization script run on every page load.
///
/// `bindings` is the list of key chords the page forwards to the host.
///
/// # Errors
/// Returns an error if `bindings` cannot be serialized.
pub fn bootstrap(bindings: &impl Serialize, match_limit: usize) -> serde_json::Result<String> {
    let config = json!({
        "bindings": serde_json::to_value(bindings)?,
        "matchLimit": match_limit,
    });
    Ok(BOOTSTRAP_TEMPLATE.replace(CONFIG_PLACEHOLDER, &config.to_string()))
}

pub fn scroll_by(dx: i32, dy: i32) -> String {
    format!("window.scrollBy({{ left: {dx}, top: {dy} }});")
}

pub fn scroll_to_anchor(id: &str) -> String {
    format!(
        "window.mdview && window.mdview.scrollToAnchor({});",
        Value::from(id)
    )
}

/// Highlight up to `limit` case-insensitive matches of `query`.
///
/// The query travels twice: verbatim, to be echoed in the result message,
/// and as a literal pattern for the page to match with.
pub fn search(query: &str, limit: usize) -> String {
    format!(
        "window.mdview && window.mdview.search({}, {}, {limit});",
        Value::from(query),
        Value::from(literal_pattern(query))
    )
}

pub fn show_match(index: usize) -> String {
    format!("window.mdview && window.mdview.showMatch({index});")
}

pub fn set_search_bar_visible(visible: bool) -> String {
    format!("window.mdview && window.mdview.setSearchBarVisible({visible});")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_script_uses_offsets() {
        assert_eq!(
            scroll_by(0, SCROLL_STEP),
            "window.scrollBy({ left: 0, top: 100 });"
        );
        assert_eq!(
            scroll_by(-SCROLL_STEP, 0),
            "window.scrollBy({ left: -100, top: 0 });"
        );
    }

    #[test]
    fn test_search_query_is_json_encoded() {
        let script = search("it's \"quoted\"\n</script>", 25);
        assert_eq!(
            script,
            "window.mdview && window.mdview.search(\"it's \\\"quoted\\\"\\n</script>\", \
             \"it's \\\"quoted\\\"\\n<\\\\/script>\", 25);"
        );
    }

    #[test]
    fn test_search_passes_escaped_pattern() {
        assert_eq!(
            search("1+1", 25),
            "window.mdview && window.mdview.search(\"1+1\", \"1\\\\+1\", 25);"
        );
    }

    #[test]
    fn test_anchor_is_json_encoded() {
        assert_eq!(
            scroll_to_anchor("fn-1"),
            "window.mdview && window.mdview.scrollToAnchor(\"fn-1\");"
        );
    }

    #[test]
    fn test_bootstrap_embeds_config() {
        let script = bootstrap(&vec!["q"], 25).unwrap();
        assert!(!script.contains(CONFIG_PLACEHOLDER));
        assert!(script.contains(r#""matchLimit":25"#));
        assert!(script.contains(r#""bindings":["q"]"#));
    }
}
