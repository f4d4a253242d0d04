use std::path::{Path, PathBuf};

/// Title used when no file path is associated with the document.
pub const APP_TITLE: &str = "mdview";

/// A loaded markdown document.
///
/// Immutable once created; opening or reloading a file replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    markdown: String,
    path: Option<PathBuf>,
}

impl Document {
    /// Create a document that did not come from a file (standard input, tests).
    pub fn from_markdown(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            path: None,
        }
    }

    /// Create a document read from `path`.
    pub fn with_path(markdown: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            markdown: markdown.into(),
            path: Some(path.into()),
        }
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Window title for this document.
    pub fn title(&self) -> String {
        self.path.as_ref().map_or_else(
            || APP_TITLE.to_string(),
            |path| format!("{} - {APP_TITLE}", path.display()),
        )
    }

    /// Directory the file dialog should start in after this document.
    pub fn directory(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_includes_path() {
        let doc = Document::with_path("# Hi", "notes/today.md");
        assert_eq!(doc.title(), format!("{} - mdview", Path::new("notes/today.md").display()));
    }

    #[test]
    fn test_stdin_document_uses_app_title() {
        let doc = Document::from_markdown("# Hi");
        assert_eq!(doc.title(), "mdview");
        assert!(doc.path().is_none());
        assert!(doc.directory().is_none());
    }

    #[test]
    fn test_directory_of_bare_file_name_is_none() {
        let doc = Document::with_path("", "README.md");
        assert!(doc.directory().is_none());
        let doc = Document::with_path("", "docs/README.md");
        assert_eq!(doc.directory(), Some(Path::new("docs")));
    }
}
