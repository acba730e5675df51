//! Deterministic hyphenation engine using Liang's TeX algorithm.
//!
//! The engine tests every contiguous substring of a bracketed word against a
//! [`PatternIndex`] and keeps, at each inter-character position, the largest
//! weight any matching pattern assigns there. Odd weights allow a break, even
//! weights forbid one. Same patterns + same word → same break points, always.
//!
//! # Architecture
//!
//! ```text
//! ".word." → Utf8Offsets (n chars, markers included)
//!          → for every length i in 1..=n, start j in 0..=n-i:
//!                lookup(word[off[j]..off[j+i]]) → max into HyphCode[j..=j+i]
//!          → zero left_min / right_min edges
//!          → emit chars 1..n-1, hyphen before char k when HyphCode[k] is odd
//! ```
//!
//! Lookups take byte slices of the caller's word, so the input is never
//! mutated and a built index can serve any number of threads at once.

use smallvec::{SmallVec, smallvec};

use crate::PatternIndex;
use crate::error::HyphError;
use crate::patterns::PatternSet;
use crate::utf8::Utf8Offsets;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Minimum characters before the first hyphenation point.
pub const DEFAULT_LEFT_MIN: usize = 2;
/// Minimum characters after the last hyphenation point.
pub const DEFAULT_RIGHT_MIN: usize = 2;
pub const DEFAULT_HYPHEN: char = '-';
/// Boundary marker bracketing words before matching.
pub const DEFAULT_MARKER: char = '.';

/// Break placement rules for one hyphenation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HyphenPolicy {
    left_min: usize,
    right_min: usize,
    hyphen_char: char,
    marker: char,
}

impl HyphenPolicy {
    /// Both minimums count characters of the unmarked word and must be at least 1.
    pub fn new(left_min: usize, right_min: usize, hyphen_char: char) -> Result<Self, HyphError> {
        if left_min == 0 {
            return Err(HyphError::InvalidPolicy {
                reason: "left_min must be at least 1",
            });
        }
        if right_min == 0 {
            return Err(HyphError::InvalidPolicy {
                reason: "right_min must be at least 1",
            });
        }
        Ok(Self {
            left_min,
            right_min,
            hyphen_char,
            marker: DEFAULT_MARKER,
        })
    }

    /// Use a boundary marker other than `.`.
    #[must_use]
    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    #[must_use]
    pub fn left_min(&self) -> usize {
        self.left_min
    }

    #[must_use]
    pub fn right_min(&self) -> usize {
        self.right_min
    }

    #[must_use]
    pub fn hyphen_char(&self) -> char {
        self.hyphen_char
    }

    #[must_use]
    pub fn marker(&self) -> char {
        self.marker
    }
}

impl Default for HyphenPolicy {
    fn default() -> Self {
        Self {
            left_min: DEFAULT_LEFT_MIN,
            right_min: DEFAULT_RIGHT_MIN,
            hyphen_char: DEFAULT_HYPHEN,
            marker: DEFAULT_MARKER,
        }
    }
}

// ---------------------------------------------------------------------------
// HyphCode
// ---------------------------------------------------------------------------

/// Order in which substring lengths are visited. The merged result is the
/// same either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanOrder {
    /// Shortest substrings first.
    #[default]
    Ascending,
    /// Longest substrings first.
    Descending,
}

/// Merged weights, one per character position of a word (`n + 1` entries).
///
/// Index `k` is the boundary before character `k`; index `n` is after the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyphCode {
    levels: SmallVec<[u8; 32]>,
}

impl HyphCode {
    /// All-zero code with `positions` entries.
    pub fn zeroed(positions: usize) -> Result<Self, HyphError> {
        let mut levels: SmallVec<[u8; 32]> = smallvec![];
        levels
            .try_reserve(positions)
            .map_err(|_| HyphError::OutOfMemory("hyphenation code"))?;
        levels.resize(positions, 0);
        Ok(Self { levels })
    }

    /// Fold `code` in at position `at` by pointwise maximum. Entries past the
    /// end of this code are ignored.
    pub fn merge(&mut self, at: usize, code: &[u8]) {
        let Some(tail) = self.levels.get_mut(at..) else {
            return;
        };
        for (slot, &weight) in tail.iter_mut().zip(code) {
            *slot = (*slot).max(weight);
        }
    }

    /// Look up every substring of `word` and merge the matches.
    ///
    /// `offsets` must describe `word`; a table for fewer characters scans
    /// only that prefix.
    pub fn scan(
        word: &[u8],
        offsets: &Utf8Offsets,
        index: &PatternIndex,
        order: ScanOrder,
    ) -> Result<Self, HyphError> {
        let n = offsets.char_count();
        let mut code = Self::zeroed(n + 1)?;

        for step in 1..=n {
            let len = match order {
                ScanOrder::Ascending => step,
                ScanOrder::Descending => n + 1 - step,
            };
            for start in 0..=n - len {
                let subword = &word[offsets.byte_range(start, start + len)];
                let weights = index.lookup(subword);
                if weights.is_empty() {
                    continue;
                }
                let weights = &weights[..weights.len().min(len + 1)];
                tracing::trace!(
                    message = "hyphenate.match",
                    subword = %String::from_utf8_lossy(subword),
                    start,
                    code = ?weights
                );
                code.merge(start, weights);
            }
        }
        Ok(code)
    }

    /// Zero positions `0..=left_min` and the last `right_min + 1` positions.
    ///
    /// With the leading marker at position 0 this leaves at least `left_min`
    /// word characters before, and `right_min` after, every surviving break.
    pub fn trim(&mut self, left_min: usize, right_min: usize) {
        let Some(n) = self.levels.len().checked_sub(1) else {
            return;
        };
        self.levels[..=left_min.min(n)].fill(0);
        self.levels[n - right_min.min(n)..].fill(0);
    }

    /// Whether position `k` carries an odd weight.
    #[must_use]
    pub fn is_break(&self, k: usize) -> bool {
        self.levels.get(k).is_some_and(|level| level % 2 == 1)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.levels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Surround `word` with `marker` on both sides.
#[must_use]
pub fn bracket(word: &str, marker: char) -> String {
    let mut out = String::with_capacity(word.len() + 2 * marker.len_utf8());
    out.push(marker);
    out.push_str(word);
    out.push(marker);
    out
}

/// Hyphenate a word already bracketed with boundary markers.
///
/// The first and last characters are taken as the markers and are not part
/// of the result. Words with fewer than two characters between the markers
/// come back unchanged.
pub fn hyphenate(word: &str, index: &PatternIndex, policy: &HyphenPolicy) -> Result<String, HyphError> {
    let offsets = Utf8Offsets::new(word)?;
    hyphenate_with(word, &offsets, index, policy)
}

/// Hyphenate raw bytes.
///
/// Malformed UTF-8 gets the zero-length offset table and finds no
/// hyphenation points: the bytes come back with a leading and trailing
/// marker removed, if present.
pub fn hyphenate_bytes(
    word: &[u8],
    index: &PatternIndex,
    policy: &HyphenPolicy,
) -> Result<Vec<u8>, HyphError> {
    let offsets = Utf8Offsets::from_bytes(word)?;
    let err = match std::str::from_utf8(word) {
        Ok(text) => return hyphenate_with(text, &offsets, index, policy).map(String::into_bytes),
        Err(err) => err,
    };
    debug_assert!(offsets.is_empty());
    tracing::debug!(
        message = "hyphenate.malformed_utf8",
        valid_up_to = err.valid_up_to(),
        len = word.len()
    );
    let mut marker = [0u8; 4];
    let marker = policy.marker().encode_utf8(&mut marker).as_bytes();
    let inner = word.strip_prefix(marker).unwrap_or(word);
    let inner = inner.strip_suffix(marker).unwrap_or(inner);
    Ok(inner.to_vec())
}

/// `offsets` must be the table for `word`.
fn hyphenate_with(
    word: &str,
    offsets: &Utf8Offsets,
    index: &PatternIndex,
    policy: &HyphenPolicy,
) -> Result<String, HyphError> {
    let _span = tracing::debug_span!("hyphenate", word).entered();

    let n = offsets.char_count();
    let mut code = HyphCode::scan(word.as_bytes(), offsets, index, ScanOrder::Ascending)?;
    // left_min >= 1, so this also clears the break before the first
    // character after the leading marker.
    code.trim(policy.left_min(), policy.right_min());

    let interior = 1..n.saturating_sub(1);
    let hyphens = interior.clone().filter(|&k| code.is_break(k)).count();

    let mut out = String::new();
    out.try_reserve(word.len() + hyphens * policy.hyphen_char().len_utf8())
        .map_err(|_| HyphError::OutOfMemory("hyphenated word"))?;
    for k in interior {
        if code.is_break(k) {
            out.push(policy.hyphen_char());
        }
        out.push_str(&word[offsets.byte_range(k, k + 1)]);
    }

    tracing::trace!(message = "hyphenate.result", code = ?code.as_slice(), result = %out);
    Ok(out)
}

// ---------------------------------------------------------------------------
// Hyphenator
// ---------------------------------------------------------------------------

/// A built pattern index paired with the policy to apply.
#[derive(Debug)]
pub struct Hyphenator {
    index: PatternIndex,
    policy: HyphenPolicy,
}

impl Hyphenator {
    #[must_use]
    pub fn new(index: PatternIndex, policy: HyphenPolicy) -> Self {
        Self { index, policy }
    }

    pub fn from_patterns(patterns: &PatternSet, policy: HyphenPolicy) -> Result<Self, HyphError> {
        Ok(Self::new(patterns.build_index()?, policy))
    }

    #[must_use]
    pub fn index(&self) -> &PatternIndex {
        &self.index
    }

    #[must_use]
    pub fn policy(&self) -> &HyphenPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: HyphenPolicy) {
        self.policy = policy;
    }

    /// Hyphenate a word that already carries boundary markers.
    pub fn hyphenate(&self, bracketed: &str) -> Result<String, HyphError> {
        hyphenate(bracketed, &self.index, &self.policy)
    }

    /// Bracket a raw word with the policy's marker, then hyphenate it.
    pub fn hyphenate_word(&self, word: &str) -> Result<String, HyphError> {
        self.hyphenate(&bracket(word, self.policy.marker()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
