//! Character-boundary table for UTF-8 words.
//!
//! Built once per word so that a character window `[j, j + i)` maps to a byte
//! range without rescanning continuation bytes on every lookup. For `"abcábč"`
//! the table is `[0, 1, 2, 3, 5, 6, 8]`.

use std::ops::Range;

use smallvec::{SmallVec, smallvec};

use crate::error::HyphError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf8Offsets {
    /// One entry per character start plus the past-the-end sentinel.
    offsets: SmallVec<[usize; 32]>,
}

impl Utf8Offsets {
    /// Table for a zero-length word.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            offsets: smallvec![0],
        }
    }

    pub fn new(word: &str) -> Result<Self, HyphError> {
        let mut offsets: SmallVec<[usize; 32]> = SmallVec::new();
        offsets
            .try_reserve(word.chars().count() + 1)
            .map_err(|_| HyphError::OutOfMemory("utf-8 offset table"))?;
        offsets.extend(word.char_indices().map(|(at, _)| at));
        offsets.push(word.len());
        Ok(Self { offsets })
    }

    /// Table for raw bytes. Malformed UTF-8 yields the zero-length table.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HyphError> {
        match std::str::from_utf8(bytes) {
            Ok(word) => Self::new(word),
            Err(_) => Ok(Self::empty()),
        }
    }

    /// Number of characters in the word.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.offsets.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.char_count() == 0
    }

    /// Byte range of characters `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `end > self.char_count()` or `start > end`.
    #[must_use]
    pub fn byte_range(&self, start: usize, end: usize) -> Range<usize> {
        debug_assert!(start <= end);
        self.offsets[start]..self.offsets[end]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.offsets
    }
}

impl Default for Utf8Offsets {
    fn default() -> Self {
        Self::empty()
    }
}
