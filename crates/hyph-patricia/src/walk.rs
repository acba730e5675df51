//! Depth-first traversal of a [`PatriciaMap`].
//!
//! A node is visited as a *branch* when the walk passes through it, and as a
//! *leaf* when a back-edge points at it. Every node is a branch exactly once,
//! so a branch-only walk sees each stored entry once; leaf visits follow the
//! back-edges and may repeat a node.

use bitflags::bitflags;

use crate::map::{PatriciaMap, Reclaim};

bitflags! {
    /// Which kinds of visit a walk reports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WalkFlags: u8 {
        const LEAVES = 1 << 0;
        const BRANCHES = 1 << 1;
        const ALL = Self::LEAVES.bits() | Self::BRANCHES.bits();
    }
}

/// Position of a branch visit relative to its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WalkOrder {
    /// Between the left and the right child.
    #[default]
    InOrder,
    /// Before both children.
    PreOrder,
    /// After both children.
    PostOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visit {
    Leaf,
    Branch,
}

/// A node as seen by a walk callback.
#[derive(Debug)]
pub struct NodeView<'a, V> {
    pub key: &'a [u8],
    /// `None` for the root while no zero key is stored.
    pub value: Option<&'a V>,
    /// Critical bit; `-1` for the root.
    pub bit: i64,
    /// Depth of the branch the visit was made from.
    pub level: usize,
    pub visit: Visit,
}

impl<V, R: Reclaim<V>> PatriciaMap<V, R> {
    /// Walk the trie depth-first, calling `visit` for each visit selected by
    /// `flags`. An error from the callback stops the walk and is returned.
    pub fn walk<'a, E, F>(&'a self, order: WalkOrder, flags: WalkFlags, mut visit: F) -> Result<(), E>
    where
        F: FnMut(NodeView<'a, V>) -> Result<(), E>,
    {
        let nodes = &self.nodes;
        self.walk_ids(order, flags, &mut move |id, level, kind| {
            let node = &nodes[id];
            visit(NodeView {
                key: &node.key,
                value: node.value.as_ref(),
                bit: node.bit,
                level,
                visit: kind,
            })
        })
    }
}
