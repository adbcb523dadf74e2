//! # BTree Index
//!
//! An in-memory B-tree index over any totally ordered key type.
//!
//! ## Architecture
//!
//! - **B-Tree Layer** (`btree`): Nodes and the tree algorithms (insert, search, delete, count)
//! - **Types** (`types`): Node-limit configuration
//! - **Errors** (`error`): Duplicate and missing key conditions
//!
//! Insertion splits full nodes on the way down, so a single descent always
//! finds room. Deletion replaces internal keys with their in-order
//! predecessor and never merges or borrows between siblings.
//!
//! The tree is not synchronized. Callers sharing it between threads must
//! wrap it in their own lock.
//!
//! ## Usage
//!
//! ```rust
//! use btree_index::{BTree, IndexError};
//!
//! let mut tree = BTree::new(3)?;
//!
//! tree.insert(10)?;
//! tree.insert(20)?;
//! assert_eq!(tree.insert(10), Err(IndexError::DuplicateKey));
//!
//! assert!(tree.find(&20));
//! assert_eq!(tree.find_and_retrieve(&10)?, &10);
//!
//! tree.find_and_remove(&10)?;
//! assert_eq!(tree.find_and_remove(&10), Err(IndexError::KeyNotFound));
//! assert_eq!(tree.count(), 1);
//! # Ok::<(), IndexError>(())
//! ```

pub mod btree;
pub mod error;
pub mod types;

pub use error::{IndexError, Result};
pub use types::{BTreeConfig, DEFAULT_MIN_DEGREE, MAX_DEGREE, MIN_DEGREE};

// Re-export main public API
pub use btree::BTree;

use serde::{Deserialize, Serialize};

/// Node snapshot for visualization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode<K> {
    /// Whether this is a leaf node
    pub is_leaf: bool,
    /// Keys in this node
    pub keys: Vec<K>,
    /// Child nodes (only for internal nodes)
    pub children: Vec<TreeNode<K>>,
}

impl<K> TreeNode<K> {
    /// Number of levels below and including this node
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(|c| c.depth()).max().unwrap_or(0)
    }
}

/// Tree statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    /// Total number of keys
    pub key_count: usize,
    /// Total number of nodes
    pub node_count: usize,
    /// Number of leaf nodes
    pub leaf_count: usize,
    /// Height of the B-tree (0 when empty)
    pub height: usize,
    /// Minimum degree the tree was built with
    pub min_degree: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() -> Result<()> {
        let mut tree = BTree::with_config(BTreeConfig::default())?;

        tree.insert(1)?;
        assert!(tree.find(&1));
        assert_eq!(tree.insert(1), Err(IndexError::DuplicateKey));

        tree.find_and_remove(&1)?;
        assert!(!tree.find(&1));
        assert_eq!(tree.find_and_retrieve(&1), Err(IndexError::KeyNotFound));
        assert_eq!(tree.count(), 0);

        Ok(())
    }

    #[test]
    fn test_snapshot_depth_matches_height() -> Result<()> {
        let mut tree = BTree::new(2)?;
        for key in 0..50 {
            tree.insert(key)?;
        }

        let snapshot = tree.export_tree().unwrap();
        assert_eq!(snapshot.depth(), tree.height());
        assert_eq!(tree.stats().height, tree.height());

        let json = serde_json::to_string(&tree.stats()).unwrap();
        assert!(json.contains("\"keyCount\":50"));
        Ok(())
    }
}
