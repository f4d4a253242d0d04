//! Messages posted by the page through `window.ipc.postMessage`.

use serde::Deserialize;

/// Which element of the page holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    /// The rendered document.
    View,
    /// The search bar input.
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PageEvent {
    /// A bound key chord, named as in `KeyboardEvent.key`.
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        meta: bool,
    },
    /// The search bar text changed.
    SearchInput { query: String },
    /// Matches were highlighted for `query`.
    SearchResult { query: String, total: usize },
    Focus { target: Focus },
}

impl PageEvent {
    /// Decode one IPC message body.
    ///
    /// # Errors
    /// Returns an error for bodies that are not a known JSON message.
    pub fn parse(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_event_defaults_missing_modifiers() {
        let event = PageEvent::parse(r#"{"type":"key","key":"j"}"#).unwrap();
        assert_eq!(
            event,
            PageEvent::Key {
                key: "j".to_string(),
                ctrl: false,
                alt: false,
                shift: false,
                meta: false,
            }
        );
    }

    #[test]
    fn test_parse_search_messages() {
        let event = PageEvent::parse(r#"{"type":"search-input","query":"Hello"}"#).unwrap();
        assert_eq!(
            event,
            PageEvent::SearchInput {
                query: "Hello".to_string()
            }
        );

        let event =
            PageEvent::parse(r#"{"type":"search-result","query":"Hello","total":3}"#).unwrap();
        assert_eq!(
            event,
            PageEvent::SearchResult {
                query: "Hello".to_string(),
                total: 3
            }
        );
    }

    #[test]
    fn test_parse_focus_event() {
        let event = PageEvent::parse(r#"{"type":"focus","target":"search"}"#).unwrap();
        assert_eq!(
            event,
            PageEvent::Focus {
                target: Focus::Search
            }
        );
    }

    #[test]
    fn test_unknown_message_is_rejected() {
        assert!(PageEvent::parse(r#"{"type":"navigate","url":"x"}"#).is_err());
        assert!(PageEvent::parse("not json").is_err());
    }
}
