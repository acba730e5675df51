use thiserror::Error;

use hyph_patricia::IndexError;

#[derive(Debug, Error)]
pub enum HyphError {
    #[error("out of memory while allocating {0}")]
    OutOfMemory(&'static str),

    #[error("invalid hyphenation policy: {reason}")]
    InvalidPolicy { reason: &'static str },

    #[error("pattern index: {0}")]
    Index(#[from] IndexError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern {pattern:?} on line {line}")]
    InvalidPattern { line: usize, pattern: String },
}
