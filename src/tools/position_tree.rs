//! The intrusive binary search tree indexed by window position.
//!
//! Ported from `LZSS_InitTree`/`LZSS_ContractNode`/`LZSS_ReplaceNode`/
//! `LZSS_FindNextNode`/`LZSS_DeleteNode`/`LZSS_AddNode` in the original C
//! source (itself based on the tree in Mark Nelson's "The Data
//! Compression Book"). Node identity is the window position the node
//! describes — there is no heap allocation per node, only three parallel
//! arrays sized `WINDOW_SIZE + 1`.
//!
//! `UNUSED = 0` doubles as "no link" and as the position that is never a
//! real node (the driver starts writing at position 1). Every array has a
//! harmless scratch slot at index 0: writes aimed at a not-yet-registered
//! position land there and are never read back as if they were a real
//! node's data. This is the same trick the C source relies on via
//! zero-initialized globals, carried over deliberately rather than
//! papered over with an extra "already absent" guard.

use crate::params::{LOOKAHEAD, WINDOW_SIZE};
use crate::tools::ring_buffer::RingBuffer;

const UNUSED: usize = 0;
/// Sentinel root index, one past the last real window position.
pub const ROOT: usize = WINDOW_SIZE;

pub struct PositionTree {
    parent: Vec<usize>,
    small_child: Vec<usize>,
    large_child: Vec<usize>,
}

impl PositionTree {
    pub fn new() -> Self {
        Self {
            parent: vec![UNUSED; WINDOW_SIZE + 1],
            small_child: vec![UNUSED; WINDOW_SIZE + 1],
            large_child: vec![UNUSED; WINDOW_SIZE + 1],
        }
    }

    /// Establish the tree with a single real node. Always succeeds.
    pub fn init_tree(&mut self, first_position: usize) {
        self.parent[ROOT] = UNUSED;
        self.small_child[ROOT] = UNUSED;
        self.large_child[ROOT] = first_position;
        self.parent[first_position] = ROOT;
        self.small_child[first_position] = UNUSED;
        self.large_child[first_position] = UNUSED;
    }

    /// Insert `new_pos` and return the longest-common-prefix length and
    /// position encountered during the descent. A length of `LOOKAHEAD`
    /// collapses the matched node into `new_pos` rather than leaving a
    /// duplicate string in the tree.
    pub fn add_node(&mut self, new_pos: usize, window: &RingBuffer<u8>) -> (usize, usize) {
        if new_pos == UNUSED {
            // UNUSED doubles as END_OF_STREAM: this position is reserved
            // and must never become a real node, or it would become
            // indistinguishable from "no link" to every other node's
            // child/parent pointers. `win_pos` cycles through it once per
            // full trip around the window on long streams, so this is an
            // ordinary occurrence, not a bug.
            return (0, UNUSED);
        }
        debug_assert!(
            self.parent[new_pos] == UNUSED,
            "add_node: position {} is already in the tree (double insert)",
            new_pos
        );
        let mut test = self.large_child[ROOT];
        let mut best_len = 0usize;
        let mut match_pos = 0usize;
        loop {
            let mut i = 0usize;
            let mut delta: i16 = 0;
            while i < LOOKAHEAD {
                delta = window.get_abs(new_pos + i) as i16 - window.get_abs(test + i) as i16;
                if delta != 0 {
                    break;
                }
                i += 1;
            }
            if i >= best_len {
                best_len = i;
                match_pos = test;
                if best_len >= LOOKAHEAD {
                    self.replace_node(test, new_pos);
                    return (best_len, match_pos);
                }
            }
            if delta >= 0 {
                if self.large_child[test] == UNUSED {
                    self.attach(test, new_pos, Side::Large);
                    return (best_len, match_pos);
                }
                test = self.large_child[test];
            } else {
                if self.small_child[test] == UNUSED {
                    self.attach(test, new_pos, Side::Small);
                    return (best_len, match_pos);
                }
                test = self.small_child[test];
            }
        }
    }

    /// Remove `p` from the tree. A no-op if `p` was never registered —
    /// this happens routinely early in a stream, when the driver evicts
    /// a window slot that the look-ahead buffer never reached.
    pub fn delete_node(&mut self, p: usize) {
        if self.large_child[p] == UNUSED {
            let repl = self.small_child[p];
            self.contract(p, repl);
        } else if self.small_child[p] == UNUSED {
            let repl = self.large_child[p];
            self.contract(p, repl);
        } else {
            let repl = self.in_order_predecessor(p);
            let repl_small = self.small_child[repl];
            self.contract(repl, repl_small);
            self.replace_node(p, repl);
        }
    }

    fn attach(&mut self, parent: usize, child: usize, side: Side) {
        debug_assert!(
            self.parent[child] == UNUSED,
            "attach: position {} is already linked into the tree",
            child
        );
        match side {
            Side::Large => self.large_child[parent] = child,
            Side::Small => self.small_child[parent] = child,
        }
        self.parent[child] = parent;
        self.small_child[child] = UNUSED;
        self.large_child[child] = UNUSED;
    }

    /// The in-order predecessor of `node`: the rightmost descendant
    /// reached by going once to `small_child` then following
    /// `large_child` links to the end.
    fn in_order_predecessor(&self, node: usize) -> usize {
        let mut next = self.small_child[node];
        while self.large_child[next] != UNUSED {
            next = self.large_child[next];
        }
        next
    }

    /// Splice `new_node` (a descendant of `old_node`, or `UNUSED`) into
    /// `old_node`'s slot, then clear `old_node`.
    fn contract(&mut self, old_node: usize, new_node: usize) {
        self.parent[new_node] = self.parent[old_node];
        if self.large_child[self.parent[old_node]] == old_node {
            self.large_child[self.parent[old_node]] = new_node;
        } else {
            self.small_child[self.parent[old_node]] = new_node;
        }
        self.parent[old_node] = UNUSED;
        self.small_child[old_node] = UNUSED;
        self.large_child[old_node] = UNUSED;
    }

    /// Replace `old_node` with `new_node`, a node not currently linked in
    /// `old_node`'s place — `new_node` inherits `old_node`'s parent edge
    /// and both children.
    fn replace_node(&mut self, old_node: usize, new_node: usize) {
        let dad = self.parent[old_node];
        if self.small_child[dad] == old_node {
            self.small_child[dad] = new_node;
        } else {
            self.large_child[dad] = new_node;
        }
        self.parent[new_node] = self.parent[old_node];
        self.small_child[new_node] = self.small_child[old_node];
        self.large_child[new_node] = self.large_child[old_node];
        let s = self.small_child[new_node];
        let l = self.large_child[new_node];
        self.parent[s] = new_node;
        self.parent[l] = new_node;
        self.parent[old_node] = UNUSED;
        self.small_child[old_node] = UNUSED;
        self.large_child[old_node] = UNUSED;
    }

    /// `true` iff `p` currently has a parent edge, i.e. is in the tree.
    /// Exposed for the structural validator in the test suite.
    #[cfg(test)]
    pub fn is_linked(&self, p: usize) -> bool {
        self.parent[p] != UNUSED
    }

    #[cfg(test)]
    pub fn children(&self, p: usize) -> (usize, usize) {
        (self.small_child[p], self.large_child[p])
    }

    #[cfg(test)]
    pub fn parent_of(&self, p: usize) -> usize {
        self.parent[p]
    }
}

impl Default for PositionTree {
    fn default() -> Self {
        Self::new()
    }
}

enum Side {
    Small,
    Large,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_with(bytes: &[u8]) -> RingBuffer<u8> {
        let mut w = RingBuffer::create(0, WINDOW_SIZE);
        for (i, &b) in bytes.iter().enumerate() {
            w.set_abs(i, b);
        }
        w
    }

    #[test]
    fn init_tree_sets_up_single_root_child() {
        let mut tree = PositionTree::new();
        tree.init_tree(1);
        assert!(tree.is_linked(1));
        assert_eq!(tree.parent_of(1), ROOT);
        assert_eq!(tree.children(1), (UNUSED, UNUSED));
    }

    #[test]
    fn add_node_finds_growing_matches() {
        let mut data = vec![0u8; WINDOW_SIZE + LOOKAHEAD];
        for i in 0..LOOKAHEAD {
            data[1 + i] = b'a';
        }
        data[1 + LOOKAHEAD] = b'a'; // position 18 continues the run
        let window = window_with(&data);
        let mut tree = PositionTree::new();
        tree.init_tree(1);
        // position 2 repeats the same run of 'a' bytes seen from position 1
        let (len, pos) = tree.add_node(2, &window);
        assert_eq!(pos, 1);
        assert!(len >= LOOKAHEAD - 1);
    }

    #[test]
    fn add_node_never_inserts_position_zero() {
        let mut data = vec![0u8; WINDOW_SIZE + LOOKAHEAD];
        data[1] = b'x';
        let window = window_with(&data);
        let mut tree = PositionTree::new();
        tree.init_tree(1);
        let (len, pos) = tree.add_node(0, &window);
        assert_eq!((len, pos), (0, UNUSED));
        assert!(!tree.is_linked(0));
        // root's only child is still position 1, untouched by the call.
        assert_eq!(tree.children(ROOT).1, 1);
    }

    #[test]
    fn delete_on_unregistered_position_is_harmless() {
        let mut tree = PositionTree::new();
        tree.init_tree(1);
        tree.delete_node(500); // never inserted
        assert!(tree.is_linked(1));
        assert_eq!(tree.parent_of(1), ROOT);
    }

    #[test]
    fn delete_leaf_contracts_parent_link() {
        let mut data = vec![0u8; WINDOW_SIZE + LOOKAHEAD];
        data[1] = b'a';
        data[2] = b'b';
        let window = window_with(&data);
        let mut tree = PositionTree::new();
        tree.init_tree(1);
        tree.add_node(2, &window); // becomes a child of 1 (first byte differs)
        assert!(tree.is_linked(2));
        tree.delete_node(2);
        assert!(!tree.is_linked(2));
        let (s, l) = tree.children(1);
        assert_eq!(s.max(l), UNUSED);
    }

    #[test]
    fn delete_two_child_node_uses_in_order_predecessor() {
        // Build a small tree where position 1 has two children, then
        // delete position 1 and check the replacement inherits both
        // edges and the parent link is consistent.
        let mut data = vec![0u8; WINDOW_SIZE + LOOKAHEAD];
        data[1] = b'm';
        data[2] = b'a'; // smaller than 'm', goes small-child side
        data[3] = b'z'; // larger than 'm', goes large-child side
        data[4] = b'c'; // smaller than 'm', descends under position 2
        let window = window_with(&data);
        let mut tree = PositionTree::new();
        tree.init_tree(1);
        tree.add_node(2, &window);
        tree.add_node(3, &window);
        tree.add_node(4, &window);
        assert!(tree.is_linked(1) && tree.is_linked(2) && tree.is_linked(3) && tree.is_linked(4));
        tree.delete_node(1);
        assert!(!tree.is_linked(1));
        // root's child took over position 1's slot
        let new_root_child = tree.children(ROOT).1;
        assert_ne!(new_root_child, 1);
        assert_eq!(tree.parent_of(new_root_child), ROOT);
    }
}
