use std::io;
use std::path::PathBuf;

use hyph_text::HyphError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Hyph(#[from] HyphError),

    #[error("pattern file {}: {source}", .path.display())]
    Patterns {
        path: PathBuf,
        #[source]
        source: HyphError,
    },

    #[error("word file {}: {source}", .path.display())]
    Words {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Process exit status for this error. A closed stdout (`| head`) is a
    /// normal way for output to end.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(err) if err.kind() == io::ErrorKind::BrokenPipe => 0,
            _ => 1,
        }
    }
}
