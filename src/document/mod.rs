//! Markdown document loading and rendering.
//!
//! This module handles:
//! - Resolving the input source from the command line
//! - Reading a file or standard input into a [`Document`]
//! - Rendering markdown to an HTML page with comrak

pub mod html;
mod types;

pub use types::{APP_TITLE, Document};

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use crate::error::ViewerError;

/// Operand that selects standard input.
pub const STDIN_OPERAND: &str = "-";

/// Where markdown is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Stdin,
}

impl Source {
    /// Resolve the positional operands of the command line.
    ///
    /// Returns `Ok(None)` when no operand was given, meaning the user picks a
    /// file from a dialog.
    ///
    /// # Errors
    /// Returns [`ViewerError::Usage`] when more than one operand is given.
    pub fn from_args(operands: &[String]) -> Result<Option<Self>, ViewerError> {
        match operands {
            [] => Ok(None),
            [single] if single == STDIN_OPERAND => Ok(Some(Self::Stdin)),
            [single] => Ok(Some(Self::Path(PathBuf::from(single)))),
            _ => Err(ViewerError::Usage("Too many arguments given.".to_string())),
        }
    }
}

/// Load a document from `source`.
///
/// # Errors
/// Returns [`ViewerError::Io`] when the path cannot be opened or read, and
/// [`ViewerError::Stdin`] when standard input fails.
pub fn load(source: &Source) -> Result<Document, ViewerError> {
    match source {
        Source::Path(path) => {
            let bytes = fs::read(path).map_err(|source| ViewerError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded document");
            Ok(Document::with_path(
                String::from_utf8_lossy(&bytes).into_owned(),
                path.clone(),
            ))
        }
        Source::Stdin => {
            let markdown = read_lines(io::stdin().lock()).map_err(ViewerError::Stdin)?;
            tracing::debug!(bytes = markdown.len(), "loaded document from stdin");
            Ok(Document::from_markdown(markdown))
        }
    }
}

/// Read `reader` to the end, terminating every line with `'\n'`.
///
/// # Errors
/// Propagates read errors from `reader`.
pub fn read_lines(reader: impl BufRead) -> io::Result<String> {
    let mut input = String::new();
    for line in reader.split(b'\n') {
        let line = line?;
        input.push_str(&String::from_utf8_lossy(&line));
        input.push('\n');
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_no_operand_means_file_dialog() {
        assert_eq!(Source::from_args(&[]).unwrap(), None);
    }

    #[test]
    fn test_dash_selects_stdin() {
        assert_eq!(Source::from_args(&args(&["-"])).unwrap(), Some(Source::Stdin));
    }

    #[test]
    fn test_single_operand_is_path() {
        assert_eq!(
            Source::from_args(&args(&["README.md"])).unwrap(),
            Some(Source::Path(PathBuf::from("README.md")))
        );
    }

    #[test]
    fn test_two_operands_is_usage_error() {
        let err = Source::from_args(&args(&["a.md", "b.md"])).unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn test_load_missing_path_is_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.md");
        let err = load(&Source::Path(missing.clone())).unwrap_err();
        match err {
            ViewerError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_reads_file_and_keeps_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.md");
        std::fs::write(&path, "# Title\n\nbody").unwrap();

        let doc = load(&Source::Path(path.clone())).unwrap();
        assert_eq!(doc.markdown(), "# Title\n\nbody");
        assert_eq!(doc.path(), Some(path.as_path()));
    }

    #[test]
    fn test_load_tolerates_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.md");
        std::fs::write(&path, b"caf\xe9").unwrap();

        let doc = load(&Source::Path(path)).unwrap();
        assert!(doc.markdown().starts_with("caf"));
    }

    #[test]
    fn test_read_lines_terminates_every_line() {
        let text = read_lines(Cursor::new("one\ntwo")).unwrap();
        assert_eq!(text, "one\ntwo\n");
    }

    #[test]
    fn test_read_lines_keeps_blank_lines() {
        let text = read_lines(Cursor::new("# A\n\nbody\n")).unwrap();
        assert_eq!(text, "# A\n\nbody\n");
    }

    #[test]
    fn test_read_lines_empty_input() {
        assert_eq!(read_lines(Cursor::new("")).unwrap(), "");
    }
}
