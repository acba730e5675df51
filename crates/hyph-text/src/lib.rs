#![forbid(unsafe_code)]

//! Liang hyphenation over a PATRICIA pattern index.
//!
//! ```text
//! pattern file → PatternSet → PatternIndex (build once)
//! ".word." → Utf8Offsets → every substring looked up → HyphCode (pointwise max)
//!          → trim left/right minimums → odd levels become hyphens
//! ```
//!
//! # Example
//!
//! ```rust
//! use hyph_text::{HyphenPolicy, Hyphenator, PatternSet};
//!
//! let patterns = PatternSet::parse("hy1ph").unwrap();
//! let policy = HyphenPolicy::new(1, 1, '-').unwrap();
//! let hyphenator = Hyphenator::from_patterns(&patterns, policy).unwrap();
//! assert_eq!(hyphenator.hyphenate_word("hyphen").unwrap(), "hy-phen");
//! ```

mod error;
pub mod hyphenation;
pub mod patterns;
pub mod utf8;

pub use error::HyphError;
pub use hyph_patricia::{IndexError, PatriciaMap};
pub use hyphenation::{
    HyphCode, HyphenPolicy, Hyphenator, ScanOrder, bracket, hyphenate, hyphenate_bytes,
};
pub use patterns::{Pattern, PatternSet};
pub use utf8::Utf8Offsets;

/// Pattern index: key bytes → weight code, with the empty code as the miss value.
pub type PatternIndex = PatriciaMap<Box<[u8]>>;
