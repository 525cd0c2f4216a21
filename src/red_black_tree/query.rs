use crate::arena::Entry;
use crate::error::{Error, Result};
use crate::red_black_tree::node::{Color, Side};
use crate::red_black_tree::tree::RedBlackTree;
use std::borrow::Borrow;
use std::collections::VecDeque;
use std::vec;

impl<T> RedBlackTree<T> {
    pub(crate) fn value_at(&self, id: Entry) -> &T {
        &self.arena[id].value
    }

    pub(crate) fn value_at_mut(&mut self, id: Entry) -> &mut T {
        &mut self.arena[id].value
    }

    // Returns the in-order neighbour of `id`: the successor for `Side::Right` and the predecessor
    // for `Side::Left`.
    pub(crate) fn neighbour(&self, mut id: Entry, side: Side) -> Option<Entry> {
        if let Some(child) = self.arena[id].child(side) {
            return Some(self.extreme(child, side.opposite()));
        }
        while let Some(parent) = self.arena[id].parent {
            if self.arena[parent].child(side.opposite()) == Some(id) {
                return Some(parent);
            }
            id = parent;
        }
        None
    }

    // Number of nodes between `id` and the root, both included.
    fn level(&self, mut id: Entry) -> usize {
        let mut level = 1;
        while let Some(parent) = self.arena[id].parent {
            level += 1;
            id = parent;
        }
        level
    }

    /// Returns `true` if the tree contains a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert!(!tree.contains(&0));
    /// assert!(tree.contains(&1));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).is_some()
    }

    /// Returns the stored value that is equal to `value`, or `None` if there is none.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).map(|id| self.value_at(id))
    }

    /// Returns the value at the root of the tree, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&T> {
        self.root.map(|id| self.value_at(id))
    }

    /// Returns the color of the node holding `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::{Color, RedBlackTree};
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.color(&1), Ok(Color::Black));
    /// assert_eq!(tree.color(&2), Ok(Color::Red));
    /// ```
    pub fn color<Q>(&self, value: &Q) -> Result<Color>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_existing(value)?;
        Ok(self.arena[id].color)
    }

    /// Returns the parent of `value`, or `None` if `value` is at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let tree = (1..=3).collect::<RedBlackTree<u32>>();
    /// assert_eq!(tree.parent(&1), Ok(Some(&2)));
    /// assert_eq!(tree.parent(&2), Ok(None));
    /// assert!(tree.parent(&4).is_err());
    /// ```
    pub fn parent<Q>(&self, value: &Q) -> Result<Option<&T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_existing(value)?;
        Ok(self.arena[id].parent.map(|parent| self.value_at(parent)))
    }

    /// Returns the left child of `value`, if it has one.
    pub fn left<Q>(&self, value: &Q) -> Result<Option<&T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_existing(value)?;
        Ok(self.arena[id].left.map(|child| self.value_at(child)))
    }

    /// Returns the right child of `value`, if it has one.
    pub fn right<Q>(&self, value: &Q) -> Result<Option<&T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_existing(value)?;
        Ok(self.arena[id].right.map(|child| self.value_at(child)))
    }

    /// Returns the children of `value` from left to right.
    pub fn children<Q>(&self, value: &Q) -> Result<Vec<&T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_existing(value)?;
        let node = &self.arena[id];
        Ok(node
            .left
            .iter()
            .chain(node.right.iter())
            .map(|child| self.value_at(*child))
            .collect())
    }

    /// Returns the other child of the parent of `value`. The root has no siblings.
    pub fn siblings<Q>(&self, value: &Q) -> Result<Vec<&T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_existing(value)?;
        let parent = match self.arena[id].parent {
            Some(parent) => &self.arena[parent],
            None => return Ok(Vec::new()),
        };
        let sibling = if parent.left == Some(id) {
            parent.right
        } else {
            parent.left
        };
        Ok(sibling.into_iter().map(|sibling| self.value_at(sibling)).collect())
    }

    /// Returns `true` if the node holding `value` has no children.
    pub fn is_leaf<Q>(&self, value: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_existing(value)?;
        Ok(self.arena[id].is_leaf())
    }

    /// Returns the values of the nodes without children, from left to right.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let tree = (1..=3).collect::<RedBlackTree<u32>>();
    /// assert_eq!(tree.leaves(), vec![&1, &3]);
    /// ```
    pub fn leaves(&self) -> Vec<&T> {
        self.in_order_entries()
            .into_iter()
            .filter(|id| self.arena[*id].is_leaf())
            .map(|id| self.value_at(id))
            .collect()
    }

    /// Returns the minimum value of the tree, or `None` if the tree is empty.
    pub fn min(&self) -> Option<&T> {
        self.root
            .map(|root| self.value_at(self.extreme(root, Side::Left)))
    }

    /// Returns the maximum value of the tree, or `None` if the tree is empty.
    pub fn max(&self) -> Option<&T> {
        self.root
            .map(|root| self.value_at(self.extreme(root, Side::Right)))
    }

    /// Returns the smallest value greater than `value`, or `None` if `value` is the maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let tree = (1..=3).collect::<RedBlackTree<u32>>();
    /// assert_eq!(tree.successor(&1), Ok(Some(&2)));
    /// assert_eq!(tree.successor(&3), Ok(None));
    /// assert!(tree.successor(&4).is_err());
    /// ```
    pub fn successor<Q>(&self, value: &Q) -> Result<Option<&T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_existing(value)?;
        Ok(self.neighbour(id, Side::Right).map(|id| self.value_at(id)))
    }

    /// Returns the largest value smaller than `value`, or `None` if `value` is the minimum.
    pub fn predecessor<Q>(&self, value: &Q) -> Result<Option<&T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_existing(value)?;
        Ok(self.neighbour(id, Side::Left).map(|id| self.value_at(id)))
    }

    /// Returns the deepest value whose subtree contains both `a` and `b`. A value is its own
    /// common ancestor with itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let tree = (1..=7).collect::<RedBlackTree<u32>>();
    /// assert_eq!(tree.root(), Some(&2));
    /// assert_eq!(tree.common_ancestor(&5, &7), Ok(&6));
    /// assert_eq!(tree.common_ancestor(&1, &7), Ok(&2));
    /// assert_eq!(tree.common_ancestor(&4, &7), Ok(&4));
    /// ```
    pub fn common_ancestor<Q>(&self, a: &Q, b: &Q) -> Result<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut a = self.find_existing(a)?;
        let mut b = self.find_existing(b)?;
        let mut level_a = self.level(a);
        let mut level_b = self.level(b);

        while level_a > level_b {
            a = self.arena[a].parent.ok_or(Error::NotFound)?;
            level_a -= 1;
        }
        while level_b > level_a {
            b = self.arena[b].parent.ok_or(Error::NotFound)?;
            level_b -= 1;
        }
        while a != b {
            a = self.arena[a].parent.ok_or(Error::NotFound)?;
            b = self.arena[b].parent.ok_or(Error::NotFound)?;
        }
        Ok(self.value_at(a))
    }

    /// Returns `true` if `node` lies strictly above `child`. A value is never its own ancestor.
    /// A `node` that is not in the tree is not an ancestor of anything, but a missing `child` is
    /// an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let tree = (1..=3).collect::<RedBlackTree<u32>>();
    /// assert_eq!(tree.is_ancestor(&2, &1), Ok(true));
    /// assert_eq!(tree.is_ancestor(&1, &2), Ok(false));
    /// assert_eq!(tree.is_ancestor(&2, &2), Ok(false));
    /// assert_eq!(tree.is_ancestor(&9, &1), Ok(false));
    /// assert!(tree.is_ancestor(&2, &9).is_err());
    /// ```
    pub fn is_ancestor<Q>(&self, node: &Q, child: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let child = self.find_existing(child)?;
        let node = match self.find(node) {
            Some(node) => node,
            None => return Ok(false),
        };
        let mut curr = self.arena[child].parent;
        while let Some(id) = curr {
            if id == node {
                return Ok(true);
            }
            curr = self.arena[id].parent;
        }
        Ok(false)
    }

    /// Returns `true` if `node` lies strictly below `parent`. Both values have to be in the tree.
    pub fn is_descendant<Q>(&self, parent: &Q, node: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_existing(parent)?;
        self.is_ancestor(parent, node)
    }

    pub(crate) fn in_order_entries(&self) -> Vec<Entry> {
        let mut ret = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut curr = self.root;
        loop {
            while let Some(id) = curr {
                stack.push(id);
                curr = self.arena[id].left;
            }
            match stack.pop() {
                Some(id) => {
                    ret.push(id);
                    curr = self.arena[id].right;
                },
                None => return ret,
            }
        }
    }

    /// Returns the values in ascending order.
    pub fn in_order(&self) -> Vec<&T> {
        self.in_order_entries()
            .into_iter()
            .map(|id| self.value_at(id))
            .collect()
    }

    /// Returns the values with every node before its left and right subtrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let tree = (1..=3).collect::<RedBlackTree<u32>>();
    /// assert_eq!(tree.pre_order(), vec![&2, &1, &3]);
    /// assert_eq!(tree.post_order(), vec![&1, &3, &2]);
    /// ```
    pub fn pre_order(&self) -> Vec<&T> {
        let mut ret = Vec::with_capacity(self.len());
        let mut stack: Vec<Entry> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            ret.push(&node.value);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        ret
    }

    /// Returns the values with every node after its left and right subtrees.
    pub fn post_order(&self) -> Vec<&T> {
        let mut ret = Vec::with_capacity(self.len());
        let mut stack: Vec<Entry> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = &self.arena[id];
            ret.push(&node.value);
            stack.extend(node.left);
            stack.extend(node.right);
        }
        ret.reverse();
        ret
    }

    /// Returns the values level by level, each level from left to right.
    pub fn level_order(&self) -> Vec<&T> {
        let mut ret = Vec::with_capacity(self.len());
        let mut queue: VecDeque<Entry> = self.root.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            let node = &self.arena[id];
            ret.push(&node.value);
            queue.extend(node.left);
            queue.extend(node.right);
        }
        ret
    }

    /// Returns an iterator over the tree. The iterator will yield values using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(3);
    /// tree.insert(1);
    ///
    /// let mut iterator = tree.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackTreeIter<'_, T> {
        RedBlackTreeIter {
            tree: self,
            stack: Vec::new(),
            curr: self.root,
            remaining: self.len(),
        }
    }
}

impl<T> IntoIterator for RedBlackTree<T> {
    type IntoIter = RedBlackTreeIntoIter<T>;
    type Item = T;

    fn into_iter(mut self) -> Self::IntoIter {
        let entries = self.in_order_entries();
        let values = entries
            .into_iter()
            .map(|id| self.arena.free(id).value)
            .collect::<Vec<T>>();
        RedBlackTreeIntoIter {
            values: values.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T>
where
    T: 'a,
{
    type IntoIter = RedBlackTreeIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackTree<T>`.
///
/// This iterator yields the values of the tree in ascending order.
pub struct RedBlackTreeIntoIter<T> {
    values: vec::IntoIter<T>,
}

impl<T> Iterator for RedBlackTreeIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

/// An iterator for `RedBlackTree<T>`.
///
/// This iterator traverses the tree in-order and yields immutable references.
pub struct RedBlackTreeIter<'a, T> {
    tree: &'a RedBlackTree<T>,
    stack: Vec<Entry>,
    curr: Option<Entry>,
    remaining: usize,
}

impl<'a, T> Iterator for RedBlackTreeIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(id) = self.curr {
            self.stack.push(id);
            self.curr = tree.arena[id].left;
        }
        let node = &tree.arena[self.stack.pop()?];
        self.curr = node.right;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for RedBlackTreeIter<'a, T> where T: 'a {}
