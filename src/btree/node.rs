//! B-tree node representation.
//!
//! A node holds a sorted run of keys and, when internal, exactly one more
//! child than it has keys. Nodes own their children outright; there are no
//! parent or sibling links.

use std::cmp::Ordering;

/// A single B-tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node<K> {
    /// Strictly increasing keys
    pub(crate) keys: Vec<K>,
    /// Child subtrees (empty for leaves)
    pub(crate) children: Vec<Box<Node<K>>>,
}

impl<K> Node<K> {
    /// Create an empty leaf
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a leaf holding a single key
    pub(crate) fn leaf(key: K) -> Self {
        Self {
            keys: vec![key],
            children: Vec::new(),
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn is_full(&self, max_keys: usize) -> bool {
        self.keys.len() >= max_keys
    }

    /// Total keys in this subtree
    pub(crate) fn key_count(&self) -> usize {
        self.keys.len() + self.children.iter().map(|c| c.key_count()).sum::<usize>()
    }

    /// Total nodes in this subtree, this one included
    pub(crate) fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    pub(crate) fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(|c| c.leaf_count()).sum()
        }
    }

    /// Number of levels from this node down to the leaves
    pub(crate) fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self;
        while let Some(child) = current.children.first() {
            current = child;
            height += 1;
        }
        height
    }

    /// Remove and return the largest key in this subtree.
    ///
    /// Descends the rightmost children to a leaf and pops its last key. When
    /// the rightmost subtree holds no keys, this node's last key is the
    /// maximum; it is removed together with that key-free subtree.
    pub(crate) fn take_max(&mut self) -> Option<K> {
        if self.is_leaf() {
            return self.keys.pop();
        }

        let last = self.children.len() - 1;
        if let Some(key) = self.children[last].take_max() {
            return Some(key);
        }

        let key = self.keys.pop()?;
        self.children.pop();
        Some(key)
    }

    /// Remove and return the smallest key in this subtree.
    ///
    /// Mirror of [`Node::take_max`] along the leftmost children.
    pub(crate) fn take_min(&mut self) -> Option<K> {
        if self.is_leaf() {
            if self.keys.is_empty() {
                return None;
            }
            return Some(self.keys.remove(0));
        }

        if let Some(key) = self.children[0].take_min() {
            return Some(key);
        }

        if self.keys.is_empty() {
            return None;
        }
        self.children.remove(0);
        Some(self.keys.remove(0))
    }
}

impl<K: Ord> Node<K> {
    /// Scan keys left to right for the first key `>= key`.
    ///
    /// Returns that position and whether the key there equals `key`. The
    /// position doubles as the child index to descend into.
    pub(crate) fn scan(&self, key: &K) -> (usize, bool) {
        for (idx, k) in self.keys.iter().enumerate() {
            match k.cmp(key) {
                Ordering::Less => continue,
                Ordering::Equal => return (idx, true),
                Ordering::Greater => return (idx, false),
            }
        }
        (self.keys.len(), false)
    }
}

impl<K> Default for Node<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn internal(keys: Vec<i32>, children: Vec<Node<i32>>) -> Node<i32> {
        Node {
            keys,
            children: children.into_iter().map(Box::new).collect(),
        }
    }

    fn leaf(keys: Vec<i32>) -> Node<i32> {
        Node {
            keys,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_new_leaf_node() {
        let node: Node<i32> = Node::new();
        assert!(node.keys.is_empty());
        assert!(node.is_leaf());

        let node = Node::leaf(7);
        assert_eq!(node.keys, vec![7]);
        assert!(node.is_leaf());
    }

    #[test]
    fn test_scan() {
        let node = leaf(vec![10, 20, 30]);
        assert_eq!(node.scan(&5), (0, false));
        assert_eq!(node.scan(&10), (0, true));
        assert_eq!(node.scan(&15), (1, false));
        assert_eq!(node.scan(&30), (2, true));
        assert_eq!(node.scan(&99), (3, false));

        let empty: Node<i32> = Node::new();
        assert_eq!(empty.scan(&1), (0, false));
    }

    #[test]
    fn test_counts_and_height() {
        let node = internal(
            vec![10, 20],
            vec![leaf(vec![1, 2]), leaf(vec![11]), leaf(vec![21, 22, 23])],
        );
        assert!(!node.is_leaf());
        assert_eq!(node.key_count(), 8);
        assert_eq!(node.node_count(), 4);
        assert_eq!(node.leaf_count(), 3);
        assert_eq!(node.height(), 2);
        assert!(node.is_full(2));
        assert!(!node.is_full(3));
    }

    #[test]
    fn test_take_max_descends_rightmost() {
        let mut node = internal(vec![10], vec![leaf(vec![1, 2]), leaf(vec![11, 12])]);
        assert_eq!(node.take_max(), Some(12));
        assert_eq!(node.take_max(), Some(11));
        assert_eq!(node.children.len(), 2);

        // Rightmost leaf is now empty: the separator is the maximum
        assert_eq!(node.take_max(), Some(10));
        assert!(node.keys.is_empty());
        assert_eq!(node.children.len(), 1);

        assert_eq!(node.take_max(), Some(2));
        assert_eq!(node.take_max(), Some(1));
        assert_eq!(node.take_max(), None);
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_take_min_descends_leftmost() {
        let mut node = internal(vec![10], vec![leaf(vec![1]), leaf(vec![11])]);
        assert_eq!(node.take_min(), Some(1));
        assert_eq!(node.take_min(), Some(10));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.take_min(), Some(11));
        assert_eq!(node.take_min(), None);
    }
}
