#![forbid(unsafe_code)]

//! Binary critical-bit (PATRICIA) trie keyed by byte strings.
//!
//! The trie stores one node per distinct key. Each node carries the index of
//! the first bit at which its key differs from its neighbours (the *critical
//! bit*); descent compares a single bit per node and stops as soon as it
//! follows an edge whose target has a critical bit no greater than the
//! current one. That back-edge names the nearest stored key, which is then
//! compared byte-for-byte.
//!
//! ```text
//! root(-1) ──0──▶ n(3) ──0──▶ n(9) ─┬─0──▶ ↺ self
//!                   │               └─1──▶ ↑ n(3)
//!                   └─1──▶ ↺ self
//! ```
//!
//! Insert and lookup cost O(key length in bits) and never rebalance. The map
//! is meant to be built once and then shared read-only.

pub mod bits;
mod error;
mod map;
mod walk;

pub use error::IndexError;
pub use map::{DropReclaim, PatriciaMap, Reclaim};
pub use walk::{NodeView, Visit, WalkFlags, WalkOrder};
