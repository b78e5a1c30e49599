#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! An AVL tree ordered set of `i32` keys.
//!
//! ```
//! use avl_tree::BalancedTree;
//!
//! let mut tree = BalancedTree::new();
//! for key in 1..=5 {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.height(), 3);
//! assert!(tree.remove(3));
//! assert!(!tree.contains(3));
//! ```
//!
//! Rebalancing can be switched off separately for insertions and removals
//! through [`TreeConfig`], turning the tree into a plain binary search tree.

mod arena;
mod balance;
mod balanced_tree;
mod config;
mod remove;
#[cfg(test)]
mod test_util;

pub use balanced_tree::BalancedTree;
pub use config::{DuplicatePolicy, TreeConfig};
