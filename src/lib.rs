//! Sorted binary trees that expose their structure.
//!
//! The crate is built around the [`Tree`](tree/trait.Tree.html) contract: a collection of unique
//! values organized as a rooted tree that can be updated, queried for structural relationships,
//! and traversed in the usual orders. [`SortedTree`](tree/trait.SortedTree.html) adds in-order
//! neighbour queries for trees whose values are ordered.
//!
//! [`RedBlackTree`](red_black_tree/struct.RedBlackTree.html) is the provided implementation.
//! Its nodes live in a [`TypedArena`](arena/struct.TypedArena.html) and refer to each other by
//! handle, which gives every node a link to its parent without shared ownership.
//!
//! # Examples
//!
//! ```
//! use sorted_trees::red_black_tree::RedBlackTree;
//! use sorted_trees::tree::{SortedTree, Tree};
//!
//! let mut tree = RedBlackTree::new();
//! for value in &[6, 3, 9, 1, 4] {
//!     tree.insert(*value);
//! }
//!
//! assert_eq!(Tree::root(&tree), Some(&6));
//! assert_eq!(Tree::in_order(&tree), vec![&1, &3, &4, &6, &9]);
//! assert_eq!(SortedTree::successor(&tree, &4), Ok(Some(&6)));
//! ```

#![cfg_attr(feature = "clippy", feature(plugin))]
#![cfg_attr(feature = "clippy", plugin(clippy))]

pub mod arena;
mod entry;
pub mod error;
pub mod red_black_tree;
pub mod tree;
