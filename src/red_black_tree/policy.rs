use crate::red_black_tree::node::Side;
use rand::{Rng, SeedableRng, XorShiftRng};
use std::fmt;

/// Decides which neighbour takes the place of a removed node that has two children.
///
/// Deleting a node with two children copies the value of its in-order successor or predecessor
/// into it and unlinks that neighbour instead. Both choices keep the tree valid; they only differ
/// in which subtree shrinks. The default is `Successor`, which makes deletion deterministic.
///
/// # Examples
///
/// ```
/// use sorted_trees::red_black_tree::{RedBlackTree, ReplacementPolicy};
///
/// let mut tree = RedBlackTree::with_policy(ReplacementPolicy::seeded([1, 2, 3, 4]));
/// tree.insert(2);
/// tree.insert(1);
/// tree.insert(3);
/// assert!(tree.remove(&2));
/// assert_eq!(tree.in_order(), vec![&1, &3]);
/// ```
#[derive(Clone)]
pub enum ReplacementPolicy {
    /// Always replace with the in-order successor.
    Successor,
    /// Always replace with the in-order predecessor.
    Predecessor,
    /// Flip a coin on every two-child deletion.
    Random(XorShiftRng),
}

impl ReplacementPolicy {
    /// Returns a `Random` policy seeded from the thread-local generator.
    pub fn random() -> Self {
        ReplacementPolicy::Random(rand::weak_rng())
    }

    /// Returns a `Random` policy with a fixed seed, so that the sequence of choices is
    /// reproducible.
    ///
    /// # Panics
    ///
    /// Panics if every word of `seed` is zero.
    pub fn seeded(seed: [u32; 4]) -> Self {
        ReplacementPolicy::Random(SeedableRng::from_seed(seed))
    }

    /// Returns the subtree the replacement is taken from: `Right` for the successor, `Left` for
    /// the predecessor.
    pub(crate) fn choose(&mut self) -> Side {
        match self {
            ReplacementPolicy::Successor => Side::Right,
            ReplacementPolicy::Predecessor => Side::Left,
            ReplacementPolicy::Random(rng) => {
                if rng.gen::<bool>() {
                    Side::Right
                } else {
                    Side::Left
                }
            },
        }
    }
}

impl Default for ReplacementPolicy {
    fn default() -> Self {
        ReplacementPolicy::Successor
    }
}

impl fmt::Debug for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplacementPolicy::Successor => write!(f, "Successor"),
            ReplacementPolicy::Predecessor => write!(f, "Predecessor"),
            ReplacementPolicy::Random(_) => write!(f, "Random"),
        }
    }
}
