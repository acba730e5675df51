//! Liang pattern parsing and index construction.
//!
//! Patterns use TeX notation: letters interleaved with single-digit weights,
//! e.g. `"hy3ph"`, `".ach4"`, `"z5a2b"`. The digit before a character is the
//! weight of the boundary in front of it; a trailing digit weights the
//! boundary after the last character.

use std::fmt;
use std::path::Path;

use crate::PatternIndex;
use crate::error::HyphError;

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// A compiled pattern: key characters plus one weight per boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    /// Characters to match, digits removed.
    pub key: String,
    /// `key.chars().count() + 1` weights.
    pub code: Box<[u8]>,
}

impl Pattern {
    /// Compile one pattern token.
    ///
    /// Returns `None` when the token has no key characters.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut key = String::with_capacity(text.len());
        let mut code = Vec::with_capacity(text.len() + 1);
        let mut pending: Option<u8> = None;

        for ch in text.chars() {
            if let Some(digit) = ch.to_digit(10) {
                pending = Some(digit as u8);
            } else if !ch.is_whitespace() {
                code.push(pending.take().unwrap_or(0));
                key.push(ch);
            }
        }
        code.push(pending.unwrap_or(0));

        if key.is_empty() {
            return None;
        }
        debug_assert_eq!(code.len(), key.chars().count() + 1);
        Some(Self {
            key,
            code: code.into_boxed_slice(),
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (ch, &weight) in self.key.chars().zip(self.code.iter()) {
            if weight != 0 {
                write!(f, "{weight}")?;
            }
            write!(f, "{ch}")?;
        }
        match self.code.last() {
            Some(&weight) if weight != 0 && self.code.len() > 1 => write!(f, "{weight}"),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// PatternSet
// ---------------------------------------------------------------------------

/// Patterns in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse whitespace-separated patterns. Everything after `%` on a line is
    /// a comment.
    pub fn parse(source: &str) -> Result<Self, HyphError> {
        let mut patterns = Vec::new();
        for (line_no, line) in source.lines().enumerate() {
            let content = line.split('%').next().unwrap_or_default();
            for token in content.split_whitespace() {
                let pattern = Pattern::parse(token).ok_or_else(|| HyphError::InvalidPattern {
                    line: line_no + 1,
                    pattern: token.to_owned(),
                })?;
                patterns.push(pattern);
            }
        }
        Ok(Self { patterns })
    }

    /// Read and parse a pattern file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HyphError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let set = Self::parse(&source)?;
        tracing::debug!(
            message = "patterns.load",
            path = %path.display(),
            patterns = set.len()
        );
        Ok(set)
    }

    pub fn push(&mut self, pattern: Pattern) {
        self.patterns.push(pattern);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Insert every pattern into a fresh index. A repeated key keeps the
    /// weights of its last occurrence.
    pub fn build_index(&self) -> Result<PatternIndex, HyphError> {
        let mut index = PatternIndex::new(Box::default());
        for pattern in &self.patterns {
            index.insert(pattern.key.as_bytes(), pattern.code.clone())?;
        }
        tracing::debug!(
            message = "patterns.build_index",
            patterns = self.patterns.len(),
            keys = index.len(),
            nodes = index.node_count()
        );
        Ok(index)
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Pattern> for PatternSet {
    fn from_iter<I: IntoIterator<Item = Pattern>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}
