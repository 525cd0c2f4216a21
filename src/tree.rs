//! The query and mutation contract shared by the trees in this crate.

use crate::error::{Error, Result};

/// A tree of unique values.
///
/// Every value in a tree is unique: inserting a value equal to one already present replaces the
/// stored value and reports that no node was added. Traversals return fully materialized
/// snapshots rather than lazy cursors.
pub trait Tree<T> {
    /// Inserts a value, returning `true` if a new node was created and `false` if an equal value
    /// was replaced.
    fn insert(&mut self, value: T) -> bool;

    /// Inserts every value of `values`, returning `true` if any new node was created.
    fn insert_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        values
            .into_iter()
            .fold(false, |changed, value| self.insert(value) || changed)
    }

    /// Inserts `child` under `parent`. Trees that decide placement on their own return
    /// `Error::Unsupported`.
    fn add_child(&mut self, parent: &T, child: T) -> Result<bool>;

    /// Inserts every value of `children` under `parent`, stopping at the first error.
    fn add_all_children<I>(&mut self, parent: &T, children: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let mut changed = false;
        for child in children {
            changed |= self.add_child(parent, child)?;
        }
        Ok(changed)
    }

    /// Removes a value, returning `true` if it was present.
    fn remove(&mut self, value: &T) -> bool;

    /// Removes every value of `values`, returning `true` if any was present.
    fn remove_all<'a, I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
        Self: Sized,
    {
        values
            .into_iter()
            .fold(false, |changed, value| self.remove(value) || changed)
    }

    /// Keeping only the values of another collection is not supported by any tree.
    fn retain_all<'a, I>(&mut self, _values: I) -> Result<bool>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
        Self: Sized,
    {
        Err(Error::Unsupported(
            "a tree cannot keep only the values of another collection",
        ))
    }

    fn contains(&self, value: &T) -> bool;

    fn contains_all<'a, I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
        Self: Sized,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Returns the number of values in the tree.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of nodes on the longest root-to-leaf path, or `0` for an empty tree.
    fn depth(&self) -> usize;

    fn clear(&mut self);

    fn root(&self) -> Option<&T>;

    /// Returns the parent of `value`, or `None` if `value` is the root.
    fn parent(&self, value: &T) -> Result<Option<&T>>;

    fn children(&self, value: &T) -> Result<Vec<&T>>;

    /// Returns the other children of the parent of `value`.
    fn siblings(&self, value: &T) -> Result<Vec<&T>>;

    /// Returns the values of the nodes without children.
    fn leaves(&self) -> Vec<&T>;

    fn in_order(&self) -> Vec<&T>;

    fn pre_order(&self) -> Vec<&T>;

    fn post_order(&self) -> Vec<&T>;

    fn level_order(&self) -> Vec<&T>;

    /// Returns the deepest node that is an ancestor of, or equal to, both values.
    fn common_ancestor(&self, a: &T, b: &T) -> Result<&T>;

    /// Returns `true` if `node` lies strictly above `child`. Fails if `child` is absent.
    fn is_ancestor(&self, node: &T, child: &T) -> Result<bool>;

    /// Returns `true` if `node` lies strictly below `parent`. Fails if either value is absent.
    fn is_descendant(&self, parent: &T, node: &T) -> Result<bool>;
}

/// A tree that keeps its values in ascending order.
pub trait SortedTree<T>: Tree<T>
where
    T: Ord,
{
    /// Returns the next larger value, or `None` if `value` is the largest.
    fn successor(&self, value: &T) -> Result<Option<&T>>;

    /// Returns the next smaller value, or `None` if `value` is the smallest.
    fn predecessor(&self, value: &T) -> Result<Option<&T>>;
}
