//! # B-tree Cursor
//!
//! A stateful in-order iterator over the tree, used by the execution VM
//! for full scans. The cursor keeps a descent stack of `(node, index)`
//! pairs; the top of the stack is the current entry.
//!
//! ## Stack Discipline
//!
//! For a leaf on top, the index is the current key within that leaf. For
//! an internal entry below the top, the index records which child the
//! descent took: when the subtree under that child is exhausted, the
//! separator key at the same index is the next entry (or the entry is
//! popped when the descent took the trailing child).
//!
//! ## Invalidation
//!
//! The cursor borrows the tree immutably, so the borrow checker rules out
//! mutation while a cursor is live; callers that need to mutate based on a
//! scan collect keys first and drop the cursor.

use smallvec::SmallVec;

use super::node::NodeId;
use super::tree::BTree;

pub struct Cursor<'a> {
    tree: &'a BTree,
    stack: SmallVec<[(NodeId, usize); 8]>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn at_first(tree: &'a BTree) -> Self {
        let mut cursor = Self {
            tree,
            stack: SmallVec::new(),
        };
        if let Some(root) = tree.root {
            cursor.descend_min(root);
        }
        cursor
    }

    /// Pushes the path to the smallest key of the subtree rooted at `id`.
    fn descend_min(&mut self, mut id: NodeId) {
        loop {
            self.stack.push((id, 0));
            let node = self.tree.arena.get(id);
            if node.leaf {
                break;
            }
            id = node.child(0);
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn key(&self) -> Option<u64> {
        let &(id, idx) = self.stack.last()?;
        Some(self.tree.arena.get(id).keys[idx])
    }

    pub fn value(&self) -> Option<u64> {
        let &(id, idx) = self.stack.last()?;
        Some(self.tree.arena.get(id).values[idx])
    }

    pub fn entry(&self) -> Option<(u64, u64)> {
        let &(id, idx) = self.stack.last()?;
        let node = self.tree.arena.get(id);
        Some((node.keys[idx], node.values[idx]))
    }

    /// Advances to the in-order successor; the cursor becomes invalid past
    /// the largest key.
    pub fn next(&mut self) {
        let Some(&(id, idx)) = self.stack.last() else {
            return;
        };
        let node = self.tree.arena.get(id);

        if node.leaf {
            if idx + 1 < node.len {
                self.stack.last_mut().expect("non-empty stack").1 = idx + 1;
                return;
            }

            self.stack.pop();
            while let Some(&(parent, pidx)) = self.stack.last() {
                if pidx < self.tree.arena.get(parent).len {
                    return;
                }
                self.stack.pop();
            }
        } else {
            // The separator at idx was just emitted; its right subtree
            // comes next, and on pop-back the separator at idx + 1 (if
            // any) follows that subtree.
            self.stack.last_mut().expect("non-empty stack").1 = idx + 1;
            let child = node.child(idx + 1);
            self.descend_min(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(tree: &BTree) -> Vec<(u64, u64)> {
        let mut cursor = tree.cursor_first();
        let mut out = Vec::new();
        while let Some(entry) = cursor.entry() {
            out.push(entry);
            cursor.next();
        }
        out
    }

    #[test]
    fn cursor_over_empty_tree_is_invalid() {
        let tree = BTree::new();
        let cursor = tree.cursor_first();

        assert!(!cursor.is_valid());
        assert_eq!(cursor.key(), None);
        assert_eq!(cursor.value(), None);
    }

    #[test]
    fn cursor_visits_single_entry() {
        let mut tree = BTree::new();
        tree.insert(42, 420);

        let mut cursor = tree.cursor_first();
        assert!(cursor.is_valid());
        assert_eq!(cursor.key(), Some(42));
        assert_eq!(cursor.value(), Some(420));

        cursor.next();
        assert!(!cursor.is_valid());
    }

    #[test]
    fn cursor_yields_ascending_order_over_deep_tree() {
        let mut tree = BTree::new();
        for i in (0..200u64).rev() {
            tree.insert(i, i * 3);
        }

        let entries = drain(&tree);
        assert_eq!(entries.len(), 200);
        for (i, &(k, v)) in entries.iter().enumerate() {
            assert_eq!(k, i as u64);
            assert_eq!(v, k * 3);
        }
    }

    #[test]
    fn cursor_matches_for_each() {
        let mut tree = BTree::new();
        for i in [13u64, 7, 29, 1, 99, 54, 22, 8, 3, 71, 40, 65] {
            tree.insert(i, i + 100);
        }

        let mut visited = Vec::new();
        tree.for_each(|k, v| visited.push((k, v)));

        assert_eq!(drain(&tree), visited);
    }

    #[test]
    fn next_past_the_end_stays_invalid() {
        let mut tree = BTree::new();
        tree.insert(1, 1);

        let mut cursor = tree.cursor_first();
        cursor.next();
        cursor.next();

        assert!(!cursor.is_valid());
        assert_eq!(cursor.entry(), None);
    }
}
