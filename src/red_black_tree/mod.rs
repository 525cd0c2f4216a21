//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Every node is either red or black. The root is black, a red node never has a red child, and
//! every path from a node down to a missing child passes through the same number of black nodes.
//! Together these keep the height of a tree with `n` values below `2 * log2(n + 1)`.

mod map;
mod node;
mod policy;
mod query;
mod serialize;
mod tree;

pub use self::map::{RedBlackMap, RedBlackMapIntoIter, RedBlackMapIter};
pub use self::node::Color;
pub use self::policy::ReplacementPolicy;
pub use self::query::{RedBlackTreeIntoIter, RedBlackTreeIter};
pub use self::tree::RedBlackTree;
