//! # B-tree Index (t = 2)
//!
//! This module implements the in-memory ordered index mapping 64-bit keys
//! to opaque 64-bit payloads (encoded record references). It is a classic
//! Cormen B-tree with minimum degree t = 2: every non-root node holds
//! between 1 and 3 keys and between 2 and 4 children, and the root may
//! drop below the minimum.
//!
//! ## Insert Algorithm
//!
//! ```text
//! 1. If the root is full (3 keys), allocate a new internal root above it
//!    and split the old root before descending
//! 2. Descend with insert_non_full, splitting any full child around its
//!    median (index t-1 = 1) before stepping into it
//! 3. At the target node, shift keys right and place the new entry
//! 4. A key already present updates its value in place (upsert), at
//!    whatever depth it is found
//! ```
//!
//! Pre-emptive splitting means the descent never needs to backtrack: a
//! parent always has room for a promoted median.
//!
//! ## Delete Algorithm
//!
//! Standard Cormen delete with the three cases:
//!
//! 1. Key in a leaf: shift-remove
//! 2. Key in an internal node: replace with the in-order predecessor when
//!    the left child can spare a key, else the successor from the right
//!    child, else merge both children around the separator and recurse
//! 3. Key below: before descending into a minimal child, refill it by
//!    borrowing from a sibling or merging with one. A merge with the left
//!    sibling only happens at the trailing child and shifts the descent
//!    index down by one
//!
//! A root emptied by a delete collapses: a leaf root frees to the empty
//! tree, an internal root is replaced by its single child.
//!
//! ## Traversal
//!
//! `for_each` and `range` drive an in-order walk through a visitor
//! closure; `range` prunes subtrees that cannot intersect `[lo, hi]`.
//! The stateful [`Cursor`](super::cursor::Cursor) serves the execution
//! VM's full scans.

use crate::config::{MAX_KEYS, MIN_DEGREE};

use super::cursor::Cursor;
use super::node::{Arena, NodeId};

#[derive(Debug)]
pub struct BTree {
    pub(crate) arena: Arena,
    pub(crate) root: Option<NodeId>,
    len: usize,
}

impl BTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Root-to-leaf depth in nodes; 0 for the empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut cursor = self.root;
        while let Some(id) = cursor {
            height += 1;
            let node = self.arena.get(id);
            cursor = if node.leaf { None } else { node.children[0] };
        }
        height
    }

    pub fn search(&self, key: u64) -> Option<u64> {
        let mut cursor = self.root?;
        loop {
            let node = self.arena.get(cursor);
            let pos = node.lower_bound(key);
            if pos < node.len && node.keys[pos] == key {
                return Some(node.values[pos]);
            }
            if node.leaf {
                return None;
            }
            cursor = node.child(pos);
        }
    }

    /// Inserts `key -> value`, overwriting the value in place when the key
    /// is already present.
    pub fn insert(&mut self, key: u64, value: u64) {
        let Some(root) = self.root else {
            let id = self.arena.alloc(true);
            let node = self.arena.get_mut(id);
            node.keys[0] = key;
            node.values[0] = value;
            node.len = 1;
            self.root = Some(id);
            self.len = 1;
            return;
        };

        if self.arena.get(root).len == MAX_KEYS {
            let new_root = self.arena.alloc(false);
            self.arena.get_mut(new_root).children[0] = Some(root);
            self.root = Some(new_root);
            self.split_child(new_root, 0);
            self.insert_non_full(new_root, key, value);
        } else {
            self.insert_non_full(root, key, value);
        }
    }

    fn insert_non_full(&mut self, id: NodeId, key: u64, value: u64) {
        let node = self.arena.get(id);
        let len = node.len;
        let pos = node.lower_bound(key);

        if pos < len && node.keys[pos] == key {
            self.arena.get_mut(id).values[pos] = value;
            return;
        }

        if node.leaf {
            let node = self.arena.get_mut(id);
            for j in (pos..len).rev() {
                node.keys[j + 1] = node.keys[j];
                node.values[j + 1] = node.values[j];
            }
            node.keys[pos] = key;
            node.values[pos] = value;
            node.len += 1;
            self.len += 1;
            return;
        }

        let mut ci = pos;
        if self.arena.get(node.child(ci)).len == MAX_KEYS {
            self.split_child(id, ci);
            // Re-decide against the promoted median.
            let node = self.arena.get(id);
            if node.keys[ci] == key {
                self.arena.get_mut(id).values[ci] = value;
                return;
            }
            if key > node.keys[ci] {
                ci += 1;
            }
        }

        let child = self.arena.get(id).child(ci);
        self.insert_non_full(child, key, value);
    }

    /// Splits the full child at `parent.children[i]` around its median
    /// (index t-1): the median moves up into the parent and the upper half
    /// becomes a new right sibling.
    fn split_child(&mut self, parent: NodeId, i: usize) {
        let y_id = self.arena.get(parent).child(i);
        let mut y = *self.arena.get(y_id);
        debug_assert_eq!(y.len, MAX_KEYS);

        let z_id = self.arena.alloc(y.leaf);
        let z = self.arena.get_mut(z_id);
        for j in 0..MIN_DEGREE - 1 {
            z.keys[j] = y.keys[j + MIN_DEGREE];
            z.values[j] = y.values[j + MIN_DEGREE];
        }
        if !y.leaf {
            for j in 0..MIN_DEGREE {
                z.children[j] = y.children[j + MIN_DEGREE];
                y.children[j + MIN_DEGREE] = None;
            }
        }
        z.len = MIN_DEGREE - 1;

        let median_key = y.keys[MIN_DEGREE - 1];
        let median_value = y.values[MIN_DEGREE - 1];
        y.len = MIN_DEGREE - 1;
        *self.arena.get_mut(y_id) = y;

        let parent = self.arena.get_mut(parent);
        for j in (i + 1..=parent.len).rev() {
            parent.children[j + 1] = parent.children[j];
        }
        parent.children[i + 1] = Some(z_id);
        for j in (i..parent.len).rev() {
            parent.keys[j + 1] = parent.keys[j];
            parent.values[j + 1] = parent.values[j];
        }
        parent.keys[i] = median_key;
        parent.values[i] = median_value;
        parent.len += 1;
    }

    /// Removes `key`, returning whether it was present. An emptied root
    /// collapses afterwards.
    pub fn delete(&mut self, key: u64) -> bool {
        let Some(root) = self.root else {
            return false;
        };

        let removed = self.delete_from(root, key);
        if removed {
            self.len -= 1;
        }

        let root_node = *self.arena.get(root);
        if root_node.len == 0 {
            self.root = if root_node.leaf {
                None
            } else {
                root_node.children[0]
            };
            self.arena.free(root);
        }

        removed
    }

    fn delete_from(&mut self, id: NodeId, key: u64) -> bool {
        let node = *self.arena.get(id);
        let pos = node.lower_bound(key);

        if pos < node.len && node.keys[pos] == key {
            if node.leaf {
                let node = self.arena.get_mut(id);
                for j in pos..node.len - 1 {
                    node.keys[j] = node.keys[j + 1];
                    node.values[j] = node.values[j + 1];
                }
                node.len -= 1;
                return true;
            }
            return self.delete_internal(id, pos, key);
        }

        if node.leaf {
            return false;
        }

        let mut ci = pos;
        if self.arena.get(node.child(ci)).len < MIN_DEGREE {
            ci = self.fill(id, ci);
        }
        let child = self.arena.get(id).child(ci);
        self.delete_from(child, key)
    }

    /// Deletes the key sitting at `pos` of internal node `id`.
    fn delete_internal(&mut self, id: NodeId, pos: usize, key: u64) -> bool {
        let node = *self.arena.get(id);
        let left = node.child(pos);
        let right = node.child(pos + 1);

        if self.arena.get(left).len >= MIN_DEGREE {
            let (pred_key, pred_value) = self.max_entry_of(left);
            let node = self.arena.get_mut(id);
            node.keys[pos] = pred_key;
            node.values[pos] = pred_value;
            self.delete_from(left, pred_key)
        } else if self.arena.get(right).len >= MIN_DEGREE {
            let (succ_key, succ_value) = self.min_entry_of(right);
            let node = self.arena.get_mut(id);
            node.keys[pos] = succ_key;
            node.values[pos] = succ_value;
            self.delete_from(right, succ_key)
        } else {
            self.merge_children(id, pos);
            self.delete_from(left, key)
        }
    }

    /// Brings `children[i]` up to `t` keys before a descent. Returns the
    /// child index to descend into, which shifts down by one when the
    /// trailing child had to merge with its left sibling.
    fn fill(&mut self, id: NodeId, i: usize) -> usize {
        let node = *self.arena.get(id);

        if i > 0 && self.arena.get(node.child(i - 1)).len >= MIN_DEGREE {
            self.borrow_from_prev(id, i);
            i
        } else if i < node.len && self.arena.get(node.child(i + 1)).len >= MIN_DEGREE {
            self.borrow_from_next(id, i);
            i
        } else if i < node.len {
            self.merge_children(id, i);
            i
        } else {
            self.merge_children(id, i - 1);
            i - 1
        }
    }

    /// Rotates the left sibling's last entry through the parent separator
    /// into the front of `children[i]`.
    fn borrow_from_prev(&mut self, id: NodeId, i: usize) {
        let node = *self.arena.get(id);
        let child_id = node.child(i);
        let sib_id = node.child(i - 1);
        let mut child = *self.arena.get(child_id);
        let mut sib = *self.arena.get(sib_id);

        for j in (0..child.len).rev() {
            child.keys[j + 1] = child.keys[j];
            child.values[j + 1] = child.values[j];
        }
        if !child.leaf {
            for j in (0..=child.len).rev() {
                child.children[j + 1] = child.children[j];
            }
        }

        child.keys[0] = node.keys[i - 1];
        child.values[0] = node.values[i - 1];
        if !child.leaf {
            child.children[0] = sib.children[sib.len];
            sib.children[sib.len] = None;
        }
        child.len += 1;

        let parent = self.arena.get_mut(id);
        parent.keys[i - 1] = sib.keys[sib.len - 1];
        parent.values[i - 1] = sib.values[sib.len - 1];
        sib.len -= 1;

        *self.arena.get_mut(child_id) = child;
        *self.arena.get_mut(sib_id) = sib;
    }

    /// Rotates the right sibling's first entry through the parent
    /// separator onto the back of `children[i]`.
    fn borrow_from_next(&mut self, id: NodeId, i: usize) {
        let node = *self.arena.get(id);
        let child_id = node.child(i);
        let sib_id = node.child(i + 1);
        let mut child = *self.arena.get(child_id);
        let mut sib = *self.arena.get(sib_id);

        child.keys[child.len] = node.keys[i];
        child.values[child.len] = node.values[i];
        if !child.leaf {
            child.children[child.len + 1] = sib.children[0];
        }
        child.len += 1;

        let parent = self.arena.get_mut(id);
        parent.keys[i] = sib.keys[0];
        parent.values[i] = sib.values[0];

        for j in 0..sib.len - 1 {
            sib.keys[j] = sib.keys[j + 1];
            sib.values[j] = sib.values[j + 1];
        }
        if !sib.leaf {
            for j in 0..sib.len {
                sib.children[j] = sib.children[j + 1];
            }
            sib.children[sib.len] = None;
        }
        sib.len -= 1;

        *self.arena.get_mut(child_id) = child;
        *self.arena.get_mut(sib_id) = sib;
    }

    /// Merges `children[i]`, the separator at `i` and `children[i + 1]`
    /// into `children[i]`, freeing the right node.
    fn merge_children(&mut self, id: NodeId, i: usize) {
        let node = *self.arena.get(id);
        let left_id = node.child(i);
        let right_id = node.child(i + 1);
        let mut left = *self.arena.get(left_id);
        let right = *self.arena.get(right_id);

        left.keys[left.len] = node.keys[i];
        left.values[left.len] = node.values[i];
        for j in 0..right.len {
            left.keys[left.len + 1 + j] = right.keys[j];
            left.values[left.len + 1 + j] = right.values[j];
        }
        if !left.leaf {
            for j in 0..=right.len {
                left.children[left.len + 1 + j] = right.children[j];
            }
        }
        left.len += 1 + right.len;
        debug_assert!(left.len <= MAX_KEYS);

        let parent = self.arena.get_mut(id);
        for j in i..parent.len - 1 {
            parent.keys[j] = parent.keys[j + 1];
            parent.values[j] = parent.values[j + 1];
        }
        for j in i + 1..parent.len {
            parent.children[j] = parent.children[j + 1];
        }
        parent.children[parent.len] = None;
        parent.len -= 1;

        *self.arena.get_mut(left_id) = left;
        self.arena.free(right_id);
    }

    fn min_entry_of(&self, mut id: NodeId) -> (u64, u64) {
        loop {
            let node = self.arena.get(id);
            if node.leaf {
                return (node.keys[0], node.values[0]);
            }
            id = node.child(0);
        }
    }

    fn max_entry_of(&self, mut id: NodeId) -> (u64, u64) {
        loop {
            let node = self.arena.get(id);
            if node.leaf {
                return (node.keys[node.len - 1], node.values[node.len - 1]);
            }
            id = node.child(node.len);
        }
    }

    /// Smallest key and its value.
    pub fn min(&self) -> Option<(u64, u64)> {
        self.root.map(|root| self.min_entry_of(root))
    }

    /// Largest key and its value.
    pub fn max(&self) -> Option<(u64, u64)> {
        self.root.map(|root| self.max_entry_of(root))
    }

    /// In-order visit of every entry.
    pub fn for_each<F: FnMut(u64, u64)>(&self, mut visitor: F) {
        if let Some(root) = self.root {
            self.visit_all(root, &mut visitor);
        }
    }

    fn visit_all<F: FnMut(u64, u64)>(&self, id: NodeId, visitor: &mut F) {
        let node = self.arena.get(id);
        for i in 0..=node.len {
            if !node.leaf {
                self.visit_all(node.child(i), visitor);
            }
            if i < node.len {
                visitor(node.keys[i], node.values[i]);
            }
        }
    }

    /// In-order visit of entries with keys in `[lo, hi]` inclusive,
    /// pruning subtrees that cannot intersect the range.
    pub fn range<F: FnMut(u64, u64)>(&self, lo: u64, hi: u64, mut visitor: F) {
        if let Some(root) = self.root {
            if lo <= hi {
                self.visit_range(root, lo, hi, &mut visitor);
            }
        }
    }

    fn visit_range<F: FnMut(u64, u64)>(&self, id: NodeId, lo: u64, hi: u64, visitor: &mut F) {
        let node = self.arena.get(id);
        for i in 0..=node.len {
            if !node.leaf {
                // Child i holds keys strictly between keys[i-1] and keys[i].
                let below = i == node.len || node.keys[i] > lo;
                let above = i == 0 || node.keys[i - 1] < hi;
                if below && above {
                    self.visit_range(node.child(i), lo, hi, visitor);
                }
            }
            if i < node.len && node.keys[i] >= lo && node.keys[i] <= hi {
                visitor(node.keys[i], node.values[i]);
            }
        }
    }

    /// Cursor positioned at the smallest key; invalid for the empty tree.
    pub fn cursor_first(&self) -> Cursor<'_> {
        Cursor::at_first(self)
    }

    /// Live arena nodes, for diagnostics.
    pub fn node_count(&self) -> usize {
        self.arena.live_nodes()
    }
}

impl Default for BTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_CHILDREN;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;

    /// Walks the whole tree checking the B-tree structural invariants:
    /// sorted keys, node fill bounds, uniform leaf depth and key bounds
    /// inherited from ancestors.
    fn check_invariants(tree: &BTree) {
        fn walk(
            tree: &BTree,
            id: NodeId,
            lo: Option<u64>,
            hi: Option<u64>,
            depth: usize,
            leaf_depth: &mut Option<usize>,
            is_root: bool,
        ) -> usize {
            let node = tree.arena.get(id);

            assert!(node.len <= MAX_KEYS);
            if !is_root {
                assert!(node.len >= MIN_DEGREE - 1, "underfull non-root node");
            } else {
                assert!(node.len >= 1, "empty root should have collapsed");
            }

            for w in node.keys[..node.len].windows(2) {
                assert!(w[0] < w[1], "keys out of order: {:?}", &node.keys[..node.len]);
            }
            if let Some(lo) = lo {
                assert!(node.keys[0] > lo);
            }
            if let Some(hi) = hi {
                assert!(node.keys[node.len - 1] < hi);
            }

            if node.leaf {
                match leaf_depth {
                    Some(d) => assert_eq!(*d, depth, "leaves at different depths"),
                    None => *leaf_depth = Some(depth),
                }
                for child in &node.children {
                    assert!(child.is_none());
                }
                return node.len;
            }

            for i in node.len + 1..MAX_CHILDREN {
                assert!(node.children[i].is_none());
            }

            let mut keys = node.len;
            for i in 0..=node.len {
                let child_lo = if i == 0 { lo } else { Some(node.keys[i - 1]) };
                let child_hi = if i == node.len { hi } else { Some(node.keys[i]) };
                keys += walk(
                    tree,
                    node.child(i),
                    child_lo,
                    child_hi,
                    depth + 1,
                    leaf_depth,
                    false,
                );
            }
            keys
        }

        match tree.root {
            None => assert_eq!(tree.len(), 0),
            Some(root) => {
                let mut leaf_depth = None;
                let keys = walk(tree, root, None, None, 1, &mut leaf_depth, true);
                assert_eq!(keys, tree.len(), "len out of sync with tree contents");
            }
        }
    }

    fn collect(tree: &BTree) -> Vec<(u64, u64)> {
        let mut out = Vec::new();
        tree.for_each(|k, v| out.push((k, v)));
        out
    }

    #[test]
    fn empty_tree_reports_nothing() {
        let tree = BTree::new();

        assert_eq!(tree.search(1), None);
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
        assert_eq!(tree.height(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn sequential_inserts_grow_the_tree() {
        let mut tree = BTree::new();
        for i in 1..=30u64 {
            tree.insert(i, i * 10);
            check_invariants(&tree);
        }

        assert!(tree.height() >= 3);
        for i in 1..=30u64 {
            assert_eq!(tree.search(i), Some(i * 10));
        }
        assert_eq!(tree.min(), Some((1, 10)));
        assert_eq!(tree.max(), Some((30, 300)));
        assert_eq!(tree.len(), 30);
    }

    #[test]
    fn descending_inserts_stay_balanced() {
        let mut tree = BTree::new();
        for i in (1..=100u64).rev() {
            tree.insert(i, i);
            check_invariants(&tree);
        }

        let entries = collect(&tree);
        assert_eq!(entries.len(), 100);
        assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn duplicate_insert_updates_value_in_place() {
        let mut tree = BTree::new();
        for i in 0..20u64 {
            tree.insert(i, i);
        }

        let len_before = tree.len();
        tree.insert(7, 700);
        tree.insert(0, 42);
        tree.insert(19, 1900);

        assert_eq!(tree.len(), len_before);
        assert_eq!(tree.search(7), Some(700));
        assert_eq!(tree.search(0), Some(42));
        assert_eq!(tree.search(19), Some(1900));
        check_invariants(&tree);
    }

    #[test]
    fn delete_from_leaf() {
        let mut tree = BTree::new();
        for i in 1..=3u64 {
            tree.insert(i, i);
        }

        assert!(tree.delete(2));
        assert_eq!(tree.search(2), None);
        assert_eq!(tree.search(1), Some(1));
        assert_eq!(tree.search(3), Some(3));
        check_invariants(&tree);
    }

    #[test]
    fn delete_missing_key_returns_false() {
        let mut tree = BTree::new();
        tree.insert(1, 1);

        assert!(!tree.delete(99));
        assert_eq!(tree.len(), 1);

        let mut empty = BTree::new();
        assert!(!empty.delete(1));
    }

    #[test]
    fn delete_last_key_collapses_to_empty() {
        let mut tree = BTree::new();
        tree.insert(5, 50);

        assert!(tree.delete(5));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn delete_everything_in_insertion_order() {
        let mut tree = BTree::new();
        for i in 0..64u64 {
            tree.insert(i, i);
        }
        for i in 0..64u64 {
            assert!(tree.delete(i), "missing key {i}");
            check_invariants(&tree);
        }

        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn delete_everything_in_reverse_order() {
        let mut tree = BTree::new();
        for i in 0..64u64 {
            tree.insert(i, i);
        }
        for i in (0..64u64).rev() {
            assert!(tree.delete(i), "missing key {i}");
            check_invariants(&tree);
        }

        assert!(tree.is_empty());
    }

    #[test]
    fn delete_interleaved_hits_all_rebalance_cases() {
        // Inside-out deletion order forces predecessor/successor pulls,
        // sibling borrows in both directions and merges at every level.
        let mut tree = BTree::new();
        for i in 0..128u64 {
            tree.insert(i, i * 2);
        }

        let mut order = Vec::new();
        let (mut lo, mut hi) = (0i64, 127i64);
        while lo <= hi {
            order.push(lo as u64);
            if lo != hi {
                order.push(hi as u64);
            }
            lo += 1;
            hi -= 1;
        }

        let mut remaining = 128usize;
        for key in order {
            assert!(tree.delete(key));
            remaining -= 1;
            assert_eq!(tree.len(), remaining);
            check_invariants(&tree);
        }
        assert!(tree.is_empty());
    }

    #[test]
    fn random_operations_agree_with_reference_map() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        let mut tree = BTree::new();
        let mut reference = BTreeMap::new();

        for _ in 0..4000 {
            let key = rng.gen_range(0..500u64);
            if rng.gen_bool(0.6) {
                let value = rng.gen::<u64>();
                tree.insert(key, value);
                reference.insert(key, value);
            } else {
                assert_eq!(tree.delete(key), reference.remove(&key).is_some());
            }

            assert_eq!(tree.len(), reference.len());
            assert_eq!(tree.search(key), reference.get(&key).copied());
        }

        check_invariants(&tree);
        let entries = collect(&tree);
        let expected: Vec<(u64, u64)> = reference.iter().map(|(&k, &v)| (k, v)).collect();
        assert_eq!(entries, expected);
        assert_eq!(tree.min(), expected.first().copied());
        assert_eq!(tree.max(), expected.last().copied());
    }

    #[test]
    fn range_is_inclusive_and_ordered() {
        let mut tree = BTree::new();
        for i in (0..100u64).step_by(2) {
            tree.insert(i, i + 1);
        }

        let mut hits = Vec::new();
        tree.range(10, 20, |k, v| hits.push((k, v)));
        assert_eq!(
            hits,
            vec![(10, 11), (12, 13), (14, 15), (16, 17), (18, 19), (20, 21)]
        );

        let mut hits = Vec::new();
        tree.range(11, 11, |k, _| hits.push(k));
        assert!(hits.is_empty());

        let mut hits = Vec::new();
        tree.range(98, u64::MAX, |k, _| hits.push(k));
        assert_eq!(hits, vec![98]);

        let mut hits = Vec::new();
        tree.range(50, 10, |k, _| hits.push(k));
        assert!(hits.is_empty());
    }

    #[test]
    fn for_each_visits_in_ascending_order() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut tree = BTree::new();
        for _ in 0..200 {
            let key = rng.gen::<u32>() as u64;
            tree.insert(key, key);
        }

        let entries = collect(&tree);
        assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(entries.len(), tree.len());
    }

    #[test]
    fn height_tracks_growth_and_shrink() {
        let mut tree = BTree::new();
        tree.insert(1, 1);
        assert_eq!(tree.height(), 1);

        for i in 2..=4u64 {
            tree.insert(i, i);
        }
        assert_eq!(tree.height(), 2);

        for i in 2..=4u64 {
            tree.delete(i);
        }
        assert_eq!(tree.height(), 1);
    }
}
