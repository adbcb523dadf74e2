//! B-tree core implementation.
//!
//! This module provides the main BTree struct with operations for:
//! - insert: Pre-emptive top-down splitting insertion
//! - find / find_and_retrieve: Point lookups
//! - find_and_remove: Removal by predecessor substitution
//! - count: Full key count

use super::node::Node;
use crate::error::{IndexError, Result};
use crate::types::BTreeConfig;
use crate::{TreeNode, TreeStats};
use std::cmp::Ordering;
use std::fmt::Debug;
use tracing::{debug, trace};

/// An in-memory B-tree over a totally ordered key type
///
/// Keys are unique. Removal never merges or borrows between siblings, so a
/// non-root node may drop below `t - 1` keys once keys have been removed.
#[derive(Debug, Clone)]
pub struct BTree<K> {
    /// Root node (None means empty tree)
    root: Option<Box<Node<K>>>,
    /// Node limits, fixed at construction
    config: BTreeConfig,
}

impl<K> BTree<K> {
    /// Create an empty B-tree with minimum degree `min_degree`
    ///
    /// Fails with [`IndexError::InvalidDegree`] when `min_degree < 2`.
    pub fn new(min_degree: usize) -> Result<Self> {
        Self::with_config(BTreeConfig::new(min_degree))
    }

    /// Create an empty B-tree from a configuration
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        config.validate()?;
        debug!(min_degree = config.min_degree, max_keys = config.max_keys(), "created b-tree");
        Ok(Self { root: None, config })
    }

    pub fn config(&self) -> BTreeConfig {
        self.config
    }

    pub fn min_degree(&self) -> usize {
        self.config.min_degree
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Get the height of the tree (0 for an empty tree)
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height())
    }

    /// Count every key in the tree by full traversal
    pub fn count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.key_count())
    }

    /// Get structural statistics about the tree
    pub fn stats(&self) -> TreeStats {
        match &self.root {
            Some(root) => TreeStats {
                key_count: root.key_count(),
                node_count: root.node_count(),
                leaf_count: root.leaf_count(),
                height: root.height(),
                min_degree: self.config.min_degree,
            },
            None => TreeStats {
                key_count: 0,
                node_count: 0,
                leaf_count: 0,
                height: 0,
                min_degree: self.config.min_degree,
            },
        }
    }

    /// Release every node, children before their parent
    ///
    /// The tree stays usable and is empty afterwards. Dropping the tree
    /// performs the same teardown.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            debug!(nodes = root.node_count(), "tearing down tree");
            drop(root);
        }
    }

    /// Replace a key-less root by its only child, or by nothing if it is a leaf
    fn collapse_root(&mut self) {
        while let Some(root) = self.root.as_mut() {
            if !root.keys.is_empty() {
                break;
            }
            let child = root.children.pop();
            debug!(shrunk_to_empty = child.is_none(), "collapsing key-less root");
            self.root = child;
        }
    }
}

impl<K: Ord> BTree<K> {
    /// Insert a key
    ///
    /// Fails with [`IndexError::DuplicateKey`] if the key is already present;
    /// the tree is not modified in that case. A full root is split before
    /// descending, growing the tree by one level.
    pub fn insert(&mut self, key: K) -> Result<()> {
        if self.find(&key) {
            return Err(IndexError::DuplicateKey);
        }

        let config = self.config;
        let root = match self.root.take() {
            Some(root) => root,
            None => {
                debug!("creating root leaf");
                self.root = Some(Box::new(Node::leaf(key)));
                return Ok(());
            }
        };

        let mut root = if root.is_full(config.max_keys()) {
            // Hang the old root under a new empty root and split it
            let mut new_root = Box::new(Node::new());
            new_root.children.push(root);
            Self::split_child(&mut new_root, config, 0);
            debug!(height = new_root.height(), "split root, tree grew");
            new_root
        } else {
            root
        };

        let result = Self::insert_non_full(&mut root, config, key);
        self.root = Some(root);
        result
    }

    /// Check whether a key is present
    pub fn find(&self, key: &K) -> bool {
        self.root
            .as_deref()
            .and_then(|root| Self::search(root, key))
            .is_some()
    }

    /// Look up a key and return the stored key
    ///
    /// Fails with [`IndexError::KeyNotFound`] if the key is absent or the
    /// tree is empty.
    pub fn find_and_retrieve(&self, key: &K) -> Result<&K> {
        let root = self.root.as_deref().ok_or(IndexError::KeyNotFound)?;
        Self::search(root, key).ok_or(IndexError::KeyNotFound)
    }

    /// Remove a key
    ///
    /// Fails with [`IndexError::KeyNotFound`] if the key is absent or the
    /// tree is empty; the tree is not modified in that case.
    pub fn find_and_remove(&mut self, key: &K) -> Result<()> {
        let root = self.root.as_deref_mut().ok_or(IndexError::KeyNotFound)?;
        Self::remove_recursive(root, key)?;
        self.collapse_root();
        Ok(())
    }

    /// Recursive search for a key
    fn search<'a>(node: &'a Node<K>, key: &K) -> Option<&'a K> {
        let (idx, found) = node.scan(key);

        if found {
            return Some(&node.keys[idx]);
        }
        if node.is_leaf() {
            return None;
        }
        Self::search(&node.children[idx], key)
    }

    /// Insert into a subtree whose root is known to have room
    fn insert_non_full(node: &mut Node<K>, config: BTreeConfig, key: K) -> Result<()> {
        let (mut idx, found) = node.scan(&key);
        if found {
            return Err(IndexError::DuplicateKey);
        }

        if node.is_leaf() {
            node.keys.insert(idx, key);
            return Ok(());
        }

        if node.children[idx].is_full(config.max_keys()) {
            Self::split_child(node, config, idx);

            // The promoted median now separates the two halves
            match key.cmp(&node.keys[idx]) {
                Ordering::Greater => idx += 1,
                Ordering::Equal => return Err(IndexError::DuplicateKey),
                Ordering::Less => {}
            }
        }

        Self::insert_non_full(&mut node.children[idx], config, key)
    }

    /// Split the full child at `idx` (`2t - 1` keys) into two nodes of
    /// `t - 1` keys, promoting the median into `parent` at `idx`.
    fn split_child(parent: &mut Node<K>, config: BTreeConfig, idx: usize) {
        let t = config.min_degree;
        let child = &mut parent.children[idx];
        let mut sibling = Box::new(Node::new());

        sibling.keys = child.keys.split_off(t);
        if !child.is_leaf() {
            sibling.children = child.children.split_off(t);
        }
        let median = child.keys.remove(t - 1);
        debug_assert_eq!(child.keys.len(), config.min_keys());
        debug_assert_eq!(sibling.keys.len(), config.min_keys());

        trace!(child = idx, leaf = sibling.is_leaf(), "split full child");
        parent.keys.insert(idx, median);
        parent.children.insert(idx + 1, sibling);
    }

    /// Recursive removal
    ///
    /// Nothing is modified unless the key is found.
    fn remove_recursive(node: &mut Node<K>, key: &K) -> Result<()> {
        let (idx, found) = node.scan(key);

        if found {
            if node.is_leaf() {
                node.keys.remove(idx);
            } else {
                Self::substitute_key(node, idx);
            }
            return Ok(());
        }

        if node.is_leaf() {
            return Err(IndexError::KeyNotFound);
        }

        // No merge or borrow follows; the child may end up with fewer
        // than t - 1 keys.
        Self::remove_recursive(&mut node.children[idx], key)
    }

    /// Overwrite the internal key at `idx` with its in-order predecessor,
    /// removing the predecessor from the left subtree.
    ///
    /// A left subtree without keys has no predecessor; the successor from
    /// the right subtree is used instead. When neither neighbouring subtree
    /// holds a key, the key is dropped along with its key-free right subtree.
    fn substitute_key(node: &mut Node<K>, idx: usize) {
        if let Some(pred) = node.children[idx].take_max() {
            node.keys[idx] = pred;
            return;
        }

        if let Some(succ) = node.children[idx + 1].take_min() {
            debug!(idx, "left subtree empty, substituted successor");
            node.keys[idx] = succ;
            return;
        }

        debug!(idx, "both subtrees empty, dropping key and right subtree");
        node.keys.remove(idx);
        node.children.remove(idx + 1);
    }
}

impl<K: Clone> BTree<K> {
    /// Export the tree structure for visualization
    pub fn export_tree(&self) -> Option<TreeNode<K>> {
        self.root.as_deref().map(Self::export_node)
    }

    fn export_node(node: &Node<K>) -> TreeNode<K> {
        TreeNode {
            is_leaf: node.is_leaf(),
            keys: node.keys.clone(),
            children: node.children.iter().map(|c| Self::export_node(c)).collect(),
        }
    }
}

impl<K: Ord + Debug> BTree<K> {
    /// Debug search - traces the path through the tree
    pub fn debug_find(&self, key: &K) -> Vec<String> {
        let mut trace = Vec::new();
        let root = match self.root.as_deref() {
            Some(root) => root,
            None => {
                trace.push("Tree is empty".to_string());
                return trace;
            }
        };

        trace.push(format!("Searching for key: {:?}", key));
        trace.push(format!(
            "Min degree: {}, Height: {}",
            self.config.min_degree,
            root.height()
        ));

        Self::search_with_trace(root, key, 0, &mut trace);
        trace
    }

    fn search_with_trace(node: &Node<K>, key: &K, depth: usize, trace: &mut Vec<String>) {
        trace.push(format!(
            "  Depth {}: is_leaf={}, keys={:?}",
            depth,
            node.is_leaf(),
            node.keys
        ));

        let (idx, found) = node.scan(key);
        if found {
            trace.push(format!("  FOUND at index {}", idx));
        } else if node.is_leaf() {
            trace.push("  NOT FOUND in leaf".to_string());
        } else {
            trace.push(format!("  -> Descending to child {}", idx));
            Self::search_with_trace(&node.children[idx], key, depth + 1, trace);
        }
    }
}

impl<K> Default for BTree<K> {
    fn default() -> Self {
        Self {
            root: None,
            config: BTreeConfig::default(),
        }
    }
}
