//! B-tree implementation.
//!
//! This module provides an in-memory B-tree that supports:
//! - Point lookups (find, find_and_retrieve)
//! - Insertions with pre-emptive splitting (insert)
//! - Deletions by predecessor substitution (find_and_remove)
//! - Key counting (count)

mod node;
mod tree;

pub use tree::BTree;
