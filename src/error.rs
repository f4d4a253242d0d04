//! Error taxonomy for loading documents and resolving the command line.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    /// The file could not be opened or read.
    #[error("Unable to open `{}' for reading: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Standard input could not be read.
    #[error("Unable to read standard input: {0}")]
    Stdin(#[source] io::Error),

    /// Wrong number of operands on the command line.
    #[error("{0}")]
    Usage(String),
}

impl ViewerError {
    pub const fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
