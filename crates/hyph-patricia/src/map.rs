//! Arena-backed PATRICIA map.
//!
//! Nodes live in a `Vec` and refer to each other by index. Node 0 is the
//! synthetic root: it owns the all-zero-bits key (if one was inserted), has
//! critical bit [`ROOT_BIT`] and a left slot that starts out pointing at
//! itself. Every other node is created by exactly one insert and owns exactly
//! one key; one of its two slots points back at itself when it is created.
//!
//! # Usage
//!
//! ```rust
//! use hyph_patricia::PatriciaMap;
//!
//! let mut map = PatriciaMap::new(0u32);
//! map.insert(b"hyph", 7).unwrap();
//! map.insert(b"hyphen", 9).unwrap();
//! map.insert(b"hyph", 8).unwrap(); // overwrite, no new node
//!
//! assert_eq!(*map.lookup(b"hyph"), 8);
//! assert_eq!(*map.lookup(b"hyp"), 0); // miss returns the default
//! assert_eq!(map.len(), 2);
//! ```

use std::convert::Infallible;
use std::fmt;

use crate::bits::{ROOT_BIT, bit_at, critical_bit, is_zero_key};
use crate::error::IndexError;
use crate::walk::{Visit, WalkFlags, WalkOrder};

pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    pub(crate) key: Box<[u8]>,
    /// `None` only on the root before a zero key is stored, and on any node
    /// after teardown.
    pub(crate) value: Option<V>,
    pub(crate) bit: i64,
    /// An empty slot (only the root's right slot) behaves as a self-loop.
    pub(crate) child: [Option<NodeId>; 2],
}

/// Cleanup capability for keys and values leaving the map.
///
/// Called with the previous value when an insert overwrites an existing key,
/// and with every stored key and value during teardown. Both methods default
/// to dropping their argument.
pub trait Reclaim<V> {
    fn reclaim_key(&mut self, key: Box<[u8]>) {
        drop(key);
    }

    fn reclaim_value(&mut self, value: V) {
        drop(value);
    }
}

/// Reclaim by dropping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropReclaim;

impl<V> Reclaim<V> for DropReclaim {}

/// Associative array from byte strings to `V`, with a default for misses.
pub struct PatriciaMap<V, R: Reclaim<V> = DropReclaim> {
    pub(crate) nodes: Vec<Node<V>>,
    default: V,
    reclaim: R,
    len: usize,
}

impl<V> PatriciaMap<V> {
    /// Create an empty map whose lookups return `default` on a miss.
    #[must_use]
    pub fn new(default: V) -> Self {
        Self::with_reclaim(default, DropReclaim)
    }
}

impl<V, R: Reclaim<V>> PatriciaMap<V, R> {
    /// Create an empty map that hands departing keys and values to `reclaim`.
    #[must_use]
    pub fn with_reclaim(default: V, reclaim: R) -> Self {
        let root = Node {
            key: Box::default(),
            value: None,
            bit: ROOT_BIT,
            child: [Some(ROOT), None],
        };
        Self {
            nodes: vec![root],
            default,
            reclaim,
            len: 0,
        }
    }

    /// Number of distinct keys stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena nodes, the root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn default_value(&self) -> &V {
        &self.default
    }

    #[inline]
    fn follow(&self, id: NodeId, slot: usize) -> NodeId {
        self.nodes[id].child[slot].unwrap_or(id)
    }

    /// Descend by the bits of `key` until a back-edge; returns the node it names.
    fn nearest(&self, key: &[u8]) -> NodeId {
        let mut id = ROOT;
        loop {
            let bit = self.nodes[id].bit;
            let next = self.follow(id, bit_at(key, bit));
            if self.nodes[next].bit <= bit {
                return next;
            }
            id = next;
        }
    }

    /// Value stored under `key`, or `None`.
    ///
    /// Every all-zero key (the empty key included) names the root entry,
    /// whatever its length.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&V> {
        if is_zero_key(key) {
            return self.nodes[ROOT].value.as_ref();
        }
        let node = &self.nodes[self.nearest(key)];
        if *node.key == *key {
            node.value.as_ref()
        } else {
            None
        }
    }

    /// Value stored under `key`, or the map's default.
    ///
    /// A miss and a stored value equal to the default are indistinguishable
    /// here; use [`Self::get`] when the difference matters.
    #[must_use]
    pub fn lookup(&self, key: &[u8]) -> &V {
        self.get(key).unwrap_or(&self.default)
    }

    #[must_use]
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Insert `value` under `key`, replacing any previous value.
    ///
    /// Replacing keeps the stored key and hands the old value to the
    /// [`Reclaim`] capability. All-zero keys are the exception: any of them
    /// replaces the root entry, and a differing old zero key is reclaimed too.
    /// A non-zero key equal to a stored one under zero padding (`"ab"` and
    /// `"ab\0"`) is rejected with [`IndexError::AmbiguousKey`]. On error the
    /// map is unchanged.
    pub fn insert(&mut self, key: &[u8], value: V) -> Result<(), IndexError> {
        if is_zero_key(key) {
            return self.insert_root(key, value);
        }

        let nearest = self.nearest(key);
        if *self.nodes[nearest].key == *key {
            self.replace_value(nearest, value);
            return Ok(());
        }

        let Some(bit) = critical_bit(&self.nodes[nearest].key, key) else {
            return Err(IndexError::AmbiguousKey { len: key.len() });
        };

        self.nodes.try_reserve(1)?;
        let stored = copy_key(key)?;

        // Stop above the first node whose critical bit passes ours, or at a back-edge.
        let mut parent = ROOT;
        let (slot, below) = loop {
            let parent_bit = self.nodes[parent].bit;
            let slot = bit_at(key, parent_bit);
            let below = self.follow(parent, slot);
            let below_bit = self.nodes[below].bit;
            if below_bit < bit && below_bit > parent_bit {
                parent = below;
            } else {
                break (slot, below);
            }
        };

        let id = self.nodes.len();
        let mut child = [Some(below); 2];
        child[bit_at(key, bit)] = Some(id);
        self.nodes.push(Node {
            key: stored,
            value: Some(value),
            bit,
            child,
        });
        self.nodes[parent].child[slot] = Some(id);
        self.len += 1;
        Ok(())
    }

    /// All-zero keys share the root: the latest one replaces both the stored
    /// key and the value.
    fn insert_root(&mut self, key: &[u8], value: V) -> Result<(), IndexError> {
        if *self.nodes[ROOT].key != *key {
            let old = std::mem::replace(&mut self.nodes[ROOT].key, copy_key(key)?);
            if self.nodes[ROOT].value.is_some() {
                self.reclaim.reclaim_key(old);
            }
        }
        if self.nodes[ROOT].value.is_none() {
            self.len += 1;
        }
        self.replace_value(ROOT, value);
        Ok(())
    }

    fn replace_value(&mut self, id: NodeId, value: V) {
        if let Some(old) = self.nodes[id].value.replace(value) {
            self.reclaim.reclaim_value(old);
        }
    }

    /// All stored entries, in post-order of the trie.
    #[must_use]
    pub fn entries(&self) -> Vec<(&[u8], &V)> {
        let mut out = Vec::with_capacity(self.len);
        let _ = self.walk(WalkOrder::PostOrder, WalkFlags::BRANCHES, |view| {
            if let Some(value) = view.value {
                out.push((view.key, value));
            }
            Ok::<(), Infallible>(())
        });
        out
    }

    /// Release every node, handing stored keys and values to the [`Reclaim`]
    /// capability in post-order. Returns the number of nodes released.
    pub fn destroy(mut self) -> usize {
        self.teardown()
    }

    fn teardown(&mut self) -> usize {
        let mut order = Vec::with_capacity(self.nodes.len());
        let _ = self.walk_ids(WalkOrder::PostOrder, WalkFlags::BRANCHES, &mut |id, _, _| {
            order.push(id);
            Ok::<(), Infallible>(())
        });

        let released = order.len();
        for id in order {
            let node = &mut self.nodes[id];
            if let Some(value) = node.value.take() {
                let key = std::mem::take(&mut node.key);
                self.reclaim.reclaim_value(value);
                self.reclaim.reclaim_key(key);
            }
        }
        self.nodes.clear();
        self.len = 0;
        tracing::trace!(message = "patricia.teardown", released);
        released
    }

    /// Depth-first walk driven by an explicit stack, so trie depth (up to
    /// eight levels per key byte) never reaches the call stack.
    pub(crate) fn walk_ids<E>(
        &self,
        order: WalkOrder,
        flags: WalkFlags,
        visit: &mut dyn FnMut(NodeId, usize, Visit) -> Result<(), E>,
    ) -> Result<(), E> {
        if self.nodes.is_empty() {
            return Ok(());
        }
        let branches = flags.contains(WalkFlags::BRANCHES);
        let mut stack = vec![(ROOT, 0usize, Stage::Enter)];

        while let Some((id, level, stage)) = stack.pop() {
            let slot = match stage {
                Stage::Enter => {
                    if order == WalkOrder::PreOrder && branches {
                        visit(id, level, Visit::Branch)?;
                    }
                    stack.push((id, level, Stage::Between));
                    0
                }
                Stage::Between => {
                    if order == WalkOrder::InOrder && branches {
                        visit(id, level, Visit::Branch)?;
                    }
                    stack.push((id, level, Stage::Exit));
                    1
                }
                Stage::Exit => {
                    if order == WalkOrder::PostOrder && branches {
                        visit(id, level, Visit::Branch)?;
                    }
                    continue;
                }
            };

            let node = &self.nodes[id];
            let Some(child) = node.child[slot] else {
                continue;
            };
            if self.nodes[child].bit <= node.bit {
                if flags.contains(WalkFlags::LEAVES) {
                    visit(child, level, Visit::Leaf)?;
                }
            } else {
                stack.push((child, level + 1, Stage::Enter));
            }
        }
        Ok(())
    }
}

/// Progress of a node on the walk stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Not yet visited; the left child comes next.
    Enter,
    /// Left side done; the right child comes next.
    Between,
    /// Both sides done.
    Exit,
}

fn copy_key(key: &[u8]) -> Result<Box<[u8]>, IndexError> {
    let mut stored = Vec::new();
    stored.try_reserve_exact(key.len())?;
    stored.extend_from_slice(key);
    Ok(stored.into_boxed_slice())
}

impl<V, R: Reclaim<V>> Drop for PatriciaMap<V, R> {
    fn drop(&mut self) {
        if !self.nodes.is_empty() {
            self.teardown();
        }
    }
}

impl<V, R: Reclaim<V>> fmt::Debug for PatriciaMap<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatriciaMap")
            .field("len", &self.len)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
