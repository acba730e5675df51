use std::collections::TryReserveError;

use thiserror::Error;

/// Failures while growing a [`crate::PatriciaMap`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("out of memory while growing the index: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// The key equals a stored key once both are zero padded, so no bit
    /// separates them (for example `"ab"` and `"ab\0"`).
    #[error("key of {len} bytes is indistinguishable from a stored key under zero padding")]
    AmbiguousKey { len: usize },
}
