use crate::arena::{Entry, TypedArena};
use crate::error::{Error, Result};
use crate::red_black_tree::node::{Color, Link, Node, Side};
use crate::red_black_tree::policy::ReplacementPolicy;
use crate::tree::{SortedTree, Tree};
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::mem;

/// The outcome of a descent from the root.
pub(crate) enum Search {
    Found(Entry),
    /// The value belongs in the given child slot, or at the root if the tree is empty.
    Vacant(Option<(Entry, Side)>),
}

/// An ordered set of unique values implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black.
/// The root is black, no red node has a red parent, and every path from a node down to a missing
/// child passes through the same number of black nodes. Together these keep the longest
/// root-to-leaf path at most twice as long as the shortest, so searches, insertions, and removals
/// take `O(log n)` time.
///
/// Nodes live in a `TypedArena` and refer to their parent and children through arena handles, so
/// rebalancing can walk upwards without shared ownership.
///
/// # Examples
///
/// ```
/// use sorted_trees::red_black_tree::RedBlackTree;
///
/// let mut tree = RedBlackTree::new();
/// assert!(tree.insert(3));
/// assert!(tree.insert(1));
/// assert!(tree.insert(2));
/// assert!(!tree.insert(2));
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.root(), Some(&2));
/// assert_eq!(tree.successor(&2), Ok(Some(&3)));
///
/// assert!(tree.remove(&1));
/// assert_eq!(tree.in_order(), vec![&2, &3]);
/// ```
pub struct RedBlackTree<T> {
    pub(crate) arena: TypedArena<Node<T>>,
    pub(crate) root: Link,
    len: usize,
    depth: usize,
    policy: ReplacementPolicy,
}

impl<T> RedBlackTree<T> {
    /// Constructs a new, empty `RedBlackTree<T>` that replaces removed nodes with their
    /// successor.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_policy(ReplacementPolicy::default())
    }

    /// Constructs a new, empty `RedBlackTree<T>` with a specific replacement policy for
    /// two-child deletions.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::{RedBlackTree, ReplacementPolicy};
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::with_policy(ReplacementPolicy::Predecessor);
    /// ```
    pub fn with_policy(policy: ReplacementPolicy) -> Self {
        RedBlackTree {
            arena: TypedArena::new(),
            root: None,
            len: 0,
            depth: 0,
            policy,
        }
    }

    /// Returns the policy used to replace removed nodes that have two children.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let tree: RedBlackTree<u32> = RedBlackTree::new();
    /// assert_eq!(format!("{:?}", tree.policy()), "Successor");
    /// ```
    pub fn policy(&self) -> &ReplacementPolicy {
        &self.policy
    }

    /// Changes the replacement policy. Values already in the tree keep their positions; the new
    /// policy applies from the next removal on.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::{RedBlackTree, ReplacementPolicy};
    ///
    /// let mut tree = (1..=3).collect::<RedBlackTree<u32>>();
    /// tree.set_policy(ReplacementPolicy::Predecessor);
    /// assert_eq!(format!("{:?}", tree.policy()), "Predecessor");
    ///
    /// assert!(tree.remove(&2));
    /// assert_eq!(tree.root(), Some(&1));
    /// ```
    pub fn set_policy(&mut self, policy: ReplacementPolicy) {
        self.policy = policy;
    }

    /// Returns the number of values in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes on the longest path from the root to a leaf. An empty tree has
    /// a depth of `0` and a lone root a depth of `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.depth(), 0);
    /// tree.insert(1);
    /// tree.insert(2);
    /// assert_eq!(tree.depth(), 2);
    /// ```
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Removes every value from the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.depth(), 0);
    /// ```
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
        self.depth = 0;
    }

    /// Inserts a value into the tree. Returns `true` if a new node was created and `false` if an
    /// equal value was already present, in which case the stored value is replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        self.replace(value).is_none()
    }

    /// Inserts a value into the tree. If an equal value already exists, it is replaced and
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// assert_eq!(tree.replace(1), None);
    /// assert_eq!(tree.replace(1), Some(1));
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T>
    where
        T: Ord,
    {
        let slot = match self.search_by(|stored| value.cmp(stored)) {
            Search::Found(id) => return Some(mem::replace(&mut self.arena[id].value, value)),
            Search::Vacant(slot) => slot,
        };

        match slot {
            None => {
                let id = self.arena.allocate(Node::new(value, Color::Black, None));
                self.root = Some(id);
            },
            Some((parent, side)) => {
                let id = self.arena.allocate(Node::new(value, Color::Red, Some(parent)));
                self.arena[parent].set_child(side, Some(id));
                self.insert_fixup(id);
            },
        }

        self.len += 1;
        self.depth = self.measure_depth();
        None
    }

    /// Removes a value from the tree. Returns `true` if the value was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(1);
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes a value from the tree and returns the stored value, or `None` if it was absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use sorted_trees::red_black_tree::RedBlackTree;
    ///
    /// let mut tree = RedBlackTree::new();
    /// tree.insert(String::from("a"));
    /// assert_eq!(tree.take("a"), Some(String::from("a")));
    /// assert_eq!(tree.take("a"), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(value)?;
        Some(self.remove_entry(id))
    }

    pub(crate) fn search_by<F>(&self, mut cmp: F) -> Search
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut curr = match self.root {
            Some(root) => root,
            None => return Search::Vacant(None),
        };
        loop {
            let node = &self.arena[curr];
            let side = match cmp(&node.value) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Search::Found(curr),
            };
            match node.child(side) {
                Some(child) => curr = child,
                None => return Search::Vacant(Some((curr, side))),
            }
        }
    }

    pub(crate) fn find_by<F>(&self, cmp: F) -> Option<Entry>
    where
        F: FnMut(&T) -> Ordering,
    {
        match self.search_by(cmp) {
            Search::Found(id) => Some(id),
            Search::Vacant(_) => None,
        }
    }

    pub(crate) fn find<Q>(&self, value: &Q) -> Option<Entry>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_by(|stored| value.cmp(stored.borrow()))
    }

    pub(crate) fn find_existing<Q>(&self, value: &Q) -> Result<Entry>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).ok_or(Error::NotFound)
    }

    pub(crate) fn is_red(&self, link: Link) -> bool {
        match link {
            Some(id) => self.arena[id].color == Color::Red,
            None => false,
        }
    }

    fn side_in(&self, parent: Entry, child: Entry) -> Side {
        if self.arena[parent].left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    // Points whichever link referred to `old` (a child slot of `parent`, or the root) at `new`.
    fn replace_child(&mut self, parent: Link, old: Entry, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_in(parent, old);
                self.arena[parent].set_child(side, new);
            },
        }
    }

    // Moves `pivot` down towards `side` and lifts its child on the opposite side into its place.
    // `rotate(p, Side::Left)` is a left rotation at `p`.
    fn rotate(&mut self, pivot: Entry, side: Side) {
        let opposite = side.opposite();
        let child = self.arena[pivot]
            .child(opposite)
            .expect("Expected a child to rotate into the pivot's place.");
        let inner = self.arena[child].child(side);
        let parent = self.arena[pivot].parent;
        trace!("rotating {:?} at {:?}", side, pivot);

        self.arena[child].parent = parent;
        self.replace_child(parent, pivot, Some(child));

        self.arena[child].set_child(side, Some(pivot));
        self.arena[pivot].parent = Some(child);

        self.arena[pivot].set_child(opposite, inner);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(pivot);
        }
    }

    fn insert_fixup(&mut self, mut child: Entry) {
        loop {
            let parent = match self.arena[child].parent {
                Some(parent) => parent,
                None => {
                    trace!("insert case 1: recoloring the root black");
                    self.arena[child].color = Color::Black;
                    return;
                },
            };

            if self.arena[parent].color == Color::Black {
                trace!("insert case 2: parent is black");
                return;
            }

            let grandparent = self.arena[parent]
                .parent
                .expect("Expected a red node to have a parent.");
            let parent_side = self.side_in(grandparent, parent);
            let uncle = self.arena[grandparent].child(parent_side.opposite());

            if self.is_red(uncle) {
                trace!("insert case 3: red uncle, pushing red up to the grandparent");
                self.arena[parent].color = Color::Black;
                if let Some(uncle) = uncle {
                    self.arena[uncle].color = Color::Black;
                }
                self.arena[grandparent].color = Color::Red;
                child = grandparent;
                continue;
            }

            let parent = if self.side_in(parent, child) != parent_side {
                trace!("insert case 4: straightening a zig-zag");
                self.rotate(parent, parent_side);
                child
            } else {
                parent
            };

            trace!("insert case 5: rotating at the grandparent");
            self.arena[parent].color = Color::Black;
            self.arena[grandparent].color = Color::Red;
            self.rotate(grandparent, parent_side.opposite());
            return;
        }
    }

    // Returns the leftmost or rightmost node of the subtree rooted at `id`.
    pub(crate) fn extreme(&self, mut id: Entry, side: Side) -> Entry {
        while let Some(child) = self.arena[id].child(side) {
            id = child;
        }
        id
    }

    pub(crate) fn remove_entry(&mut self, id: Entry) -> T {
        let target = {
            let node = &self.arena[id];
            match (node.left, node.right) {
                (Some(left), Some(right)) => match self.policy.choose() {
                    Side::Right => {
                        debug!("replacing a node with two children by its successor");
                        self.extreme(right, Side::Left)
                    },
                    Side::Left => {
                        debug!("replacing a node with two children by its predecessor");
                        self.extreme(left, Side::Right)
                    },
                },
                _ => id,
            }
        };

        let removed = self.unlink(target);
        let value = if target == id {
            removed
        } else {
            mem::replace(&mut self.arena[id].value, removed)
        };

        self.len -= 1;
        self.depth = self.measure_depth();
        value
    }

    // Detaches a node with at most one child, restoring the invariants before it is freed.
    fn unlink(&mut self, id: Entry) -> T {
        let (color, child) = {
            let node = &self.arena[id];
            (node.color, node.left.or(node.right))
        };

        if color == Color::Black {
            if self.is_red(child) {
                trace!("delete: recoloring the promoted red child black");
                if let Some(child) = child {
                    self.arena[child].color = Color::Black;
                }
            } else {
                self.delete_fixup(id);
            }
        }

        let parent = self.arena[id].parent;
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        self.replace_child(parent, id, child);
        self.arena.free(id).value
    }

    // `node` carries an extra black that has to be absorbed or pushed towards the root.
    fn delete_fixup(&mut self, mut node: Entry) {
        loop {
            let parent = match self.arena[node].parent {
                Some(parent) => parent,
                None => {
                    trace!("delete case 1: reached the root");
                    return;
                },
            };
            let side = self.side_in(parent, node);
            let far = side.opposite();
            let mut sibling = self.arena[parent]
                .child(far)
                .expect("Expected a doubly black node to have a sibling.");

            if self.arena[sibling].color == Color::Red {
                trace!("delete case 2: red sibling");
                self.arena[sibling].color = Color::Black;
                self.arena[parent].color = Color::Red;
                self.rotate(parent, side);
                sibling = self.arena[parent]
                    .child(far)
                    .expect("Expected a doubly black node to have a sibling.");
            }

            let near_nephew = self.arena[sibling].child(side);
            let far_nephew = self.arena[sibling].child(far);

            if !self.is_red(near_nephew) && !self.is_red(far_nephew) {
                self.arena[sibling].color = Color::Red;
                if self.arena[parent].color == Color::Black {
                    trace!("delete case 3: pushing the extra black up to the parent");
                    node = parent;
                    continue;
                }
                trace!("delete case 4: absorbing the extra black into the red parent");
                self.arena[parent].color = Color::Black;
                return;
            }

            if !self.is_red(far_nephew) {
                trace!("delete case 5: rotating the red near nephew outwards");
                let near_nephew = near_nephew.expect("Expected a red near nephew.");
                self.arena[sibling].color = Color::Red;
                self.arena[near_nephew].color = Color::Black;
                self.rotate(sibling, far);
                sibling = near_nephew;
            }

            trace!("delete case 6: rotating at the parent");
            let far_nephew = self.arena[sibling]
                .child(far)
                .expect("Expected a red far nephew.");
            self.arena[sibling].color = self.arena[parent].color;
            self.arena[parent].color = Color::Black;
            self.arena[far_nephew].color = Color::Black;
            self.rotate(parent, side);
            return;
        }
    }

    fn measure_depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((id, level)) = stack.pop() {
            depth = cmp::max(depth, level);
            let node = &self.arena[id];
            for child in node.left.iter().chain(node.right.iter()) {
                stack.push((*child, level + 1));
            }
        }
        depth
    }
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Copies node by node in breadth-first order so that the copy does not depend on recursion
// depth. The copy gets a compact arena of its own.
impl<T> Clone for RedBlackTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut arena = TypedArena::with_capacity(self.len);
        let mut root = None;
        let mut queue = VecDeque::new();
        if let Some(id) = self.root {
            queue.push_back((id, None));
        }

        while let Some((source, slot)) = queue.pop_front() {
            let node = &self.arena[source];
            let parent = slot.map(|(parent, _)| parent);
            let copy = arena.allocate(Node::new(node.value.clone(), node.color, parent));
            match slot {
                None => root = Some(copy),
                Some((parent, side)) => arena[parent].set_child(side, Some(copy)),
            }
            for &side in &[Side::Left, Side::Right] {
                if let Some(child) = node.child(side) {
                    queue.push_back((child, Some((copy, side))));
                }
            }
        }

        RedBlackTree {
            arena,
            root,
            len: self.len,
            depth: self.depth,
            policy: self.policy.clone(),
        }
    }
}

// Two trees are equal when they hold equal values in the same shape. Colors are not compared.
impl<T> PartialEq for RedBlackTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let mut stack = vec![(self.root, other.root)];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {},
                (Some(a), Some(b)) => {
                    let (a, b) = (&self.arena[a], &other.arena[b]);
                    if a.value != b.value {
                        return false;
                    }
                    stack.push((a.left, b.left));
                    stack.push((a.right, b.right));
                },
                _ => return false,
            }
        }
        true
    }
}

impl<T> Eq for RedBlackTree<T> where T: Eq {}

impl<T> Hash for RedBlackTree<T>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T> fmt::Debug for RedBlackTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = RedBlackTree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> Tree<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn insert(&mut self, value: T) -> bool {
        RedBlackTree::insert(self, value)
    }

    fn add_child(&mut self, _parent: &T, _child: T) -> Result<bool> {
        Err(Error::Unsupported(
            "a red black tree decides the parent of a value on its own",
        ))
    }

    fn remove(&mut self, value: &T) -> bool {
        RedBlackTree::remove(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        RedBlackTree::contains(self, value)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn clear(&mut self) {
        RedBlackTree::clear(self)
    }

    fn root(&self) -> Option<&T> {
        RedBlackTree::root(self)
    }

    fn parent(&self, value: &T) -> Result<Option<&T>> {
        RedBlackTree::parent(self, value)
    }

    fn children(&self, value: &T) -> Result<Vec<&T>> {
        RedBlackTree::children(self, value)
    }

    fn siblings(&self, value: &T) -> Result<Vec<&T>> {
        RedBlackTree::siblings(self, value)
    }

    fn leaves(&self) -> Vec<&T> {
        RedBlackTree::leaves(self)
    }

    fn in_order(&self) -> Vec<&T> {
        RedBlackTree::in_order(self)
    }

    fn pre_order(&self) -> Vec<&T> {
        RedBlackTree::pre_order(self)
    }

    fn post_order(&self) -> Vec<&T> {
        RedBlackTree::post_order(self)
    }

    fn level_order(&self) -> Vec<&T> {
        RedBlackTree::level_order(self)
    }

    fn common_ancestor(&self, a: &T, b: &T) -> Result<&T> {
        RedBlackTree::common_ancestor(self, a, b)
    }

    fn is_ancestor(&self, node: &T, child: &T) -> Result<bool> {
        RedBlackTree::is_ancestor(self, node, child)
    }

    fn is_descendant(&self, parent: &T, node: &T) -> Result<bool> {
        RedBlackTree::is_descendant(self, parent, node)
    }
}

impl<T> SortedTree<T> for RedBlackTree<T>
where
    T: Ord,
{
    fn successor(&self, value: &T) -> Result<Option<&T>> {
        RedBlackTree::successor(self, value)
    }

    fn predecessor(&self, value: &T) -> Result<Option<&T>> {
        RedBlackTree::predecessor(self, value)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::RedBlackTree;
    use crate::error::Error;
    use crate::red_black_tree::node::{Color, Side};
    use crate::red_black_tree::ReplacementPolicy;
    use crate::tree::Tree;
    use rand::{Rng, SeedableRng, XorShiftRng};
    use std::collections::BTreeSet;

    // Checks every structural invariant and returns the black height of the tree.
    pub(crate) fn check_invariants<T: Ord>(tree: &RedBlackTree<T>) -> usize {
        let root = match tree.root {
            None => {
                assert_eq!(tree.len(), 0);
                assert_eq!(tree.depth(), 0);
                assert!(tree.arena.is_empty());
                return 0;
            },
            Some(root) => root,
        };
        assert_eq!(tree.arena[root].color, Color::Black);
        assert_eq!(tree.arena[root].parent, None);

        let mut black_height = None;
        let mut count = 0;
        let mut depth = 0;
        let mut stack = vec![(root, 1, 1)];
        while let Some((id, level, blacks)) = stack.pop() {
            count += 1;
            depth = depth.max(level);
            let node = &tree.arena[id];
            for &side in &[Side::Left, Side::Right] {
                match node.child(side) {
                    Some(child) => {
                        let child_node = &tree.arena[child];
                        assert_eq!(child_node.parent, Some(id));
                        if node.color == Color::Red {
                            assert_eq!(child_node.color, Color::Black);
                        }
                        let child_blacks = match child_node.color {
                            Color::Black => blacks + 1,
                            Color::Red => blacks,
                        };
                        stack.push((child, level + 1, child_blacks));
                    },
                    None => match black_height {
                        None => black_height = Some(blacks),
                        Some(expected) => assert_eq!(expected, blacks),
                    },
                }
            }
        }

        assert_eq!(count, tree.len());
        assert_eq!(count, tree.arena.len());
        assert_eq!(depth, tree.depth());
        let values = tree.in_order();
        assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        black_height.unwrap_or(0)
    }

    fn sample_tree() -> RedBlackTree<&'static str> {
        let mut tree = RedBlackTree::new();
        for value in &[
            "C6", "C3", "C9", "C1", "C4", "C7", "CB", "C2", "C5", "C8", "CA", "CC",
        ] {
            tree.insert(*value);
        }
        tree
    }

    #[test]
    fn test_len_empty() {
        let tree: RedBlackTree<u32> = RedBlackTree::new();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.is_empty());
        check_invariants(&tree);
    }

    #[test]
    fn test_insert_root_is_black() {
        let mut tree = RedBlackTree::new();
        assert!(tree.insert(1));
        assert_eq!(tree.color(&1), Ok(Color::Black));
        assert_eq!(tree.depth(), 1);
        check_invariants(&tree);
    }

    #[test]
    fn test_insert_replace() {
        let mut tree = RedBlackTree::new();
        assert_eq!(tree.replace(1), None);
        assert_eq!(tree.replace(1), Some(1));
        assert!(!tree.insert(1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_ascending_rotates_at_root() {
        let mut tree = RedBlackTree::new();
        tree.insert(1);
        tree.insert(2);
        tree.insert(3);
        assert_eq!(tree.root(), Some(&2));
        assert_eq!(tree.color(&1), Ok(Color::Red));
        assert_eq!(tree.color(&3), Ok(Color::Red));
        assert_eq!(tree.depth(), 2);
        check_invariants(&tree);
    }

    #[test]
    fn test_insert_zig_zag() {
        let mut tree = RedBlackTree::new();
        tree.insert(3);
        tree.insert(1);
        tree.insert(2);
        assert_eq!(tree.root(), Some(&2));
        assert_eq!(tree.pre_order(), vec![&2, &1, &3]);
        check_invariants(&tree);
    }

    #[test]
    fn test_insert_recolors_with_red_uncle() {
        let mut tree = RedBlackTree::new();
        tree.insert(2);
        tree.insert(1);
        tree.insert(3);
        tree.insert(4);
        assert_eq!(tree.color(&1), Ok(Color::Black));
        assert_eq!(tree.color(&3), Ok(Color::Black));
        assert_eq!(tree.color(&4), Ok(Color::Red));
        assert_eq!(tree.color(&2), Ok(Color::Black));
        check_invariants(&tree);
    }

    #[test]
    fn test_sample_shape() {
        let tree = sample_tree();
        assert_eq!(tree.root(), Some(&"C6"));
        assert_eq!(tree.depth(), 4);
        assert_eq!(
            tree.level_order(),
            vec![&"C6", &"C3", &"C9", &"C1", &"C4", &"C7", &"CB", &"C2", &"C5", &"C8", &"CA", &"CC"],
        );
        check_invariants(&tree);
    }

    #[test]
    fn test_remove_red_leaf() {
        let mut tree = sample_tree();
        assert!(tree.remove(&"C2"));
        assert_eq!(
            tree.pre_order(),
            vec![&"C6", &"C3", &"C1", &"C4", &"C5", &"C9", &"C7", &"C8", &"CB", &"CA", &"CC"],
        );
        check_invariants(&tree);
    }

    #[test]
    fn test_remove_black_with_red_child() {
        let mut tree = sample_tree();
        assert!(tree.remove(&"C1"));
        assert_eq!(tree.color(&"C2"), Ok(Color::Black));
        assert_eq!(
            tree.pre_order(),
            vec![&"C6", &"C3", &"C2", &"C4", &"C5", &"C9", &"C7", &"C8", &"CB", &"CA", &"CC"],
        );
        check_invariants(&tree);
    }

    #[test]
    fn test_remove_root_with_successor() {
        let mut tree = sample_tree();
        assert!(tree.remove(&"C6"));
        assert_eq!(tree.root(), Some(&"C7"));
        assert_eq!(tree.len(), 11);
        check_invariants(&tree);
    }

    #[test]
    fn test_remove_root_with_predecessor() {
        let mut tree = sample_tree();
        tree.set_policy(ReplacementPolicy::Predecessor);
        assert!(tree.remove(&"C6"));
        assert_eq!(tree.root(), Some(&"C5"));
        check_invariants(&tree);
    }

    #[test]
    fn test_remove_black_leaf() {
        let mut tree = RedBlackTree::new();
        for value in &[4, 2, 6, 1, 3, 5, 7] {
            tree.insert(*value);
        }
        tree.remove(&1);
        tree.remove(&3);
        assert_eq!(tree.color(&2), Ok(Color::Black));
        assert!(tree.is_leaf(&2).unwrap());
        assert!(tree.remove(&2));
        assert_eq!(tree.root(), Some(&6));
        assert_eq!(tree.in_order(), vec![&4, &5, &6, &7]);
        check_invariants(&tree);
    }

    #[test]
    fn test_remove_missing() {
        let mut tree = sample_tree();
        assert!(!tree.remove(&"Not present"));
        assert_eq!(tree.len(), 12);
        let mut empty: RedBlackTree<u32> = RedBlackTree::new();
        assert!(!empty.remove(&1));
    }

    #[test]
    fn test_remove_all_values() {
        let mut tree = sample_tree();
        for value in tree.clone().in_order() {
            assert!(tree.remove(value));
            check_invariants(&tree);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_set_policy() {
        let mut tree = sample_tree();
        assert_eq!(format!("{:?}", tree.policy()), "Successor");

        tree.set_policy(ReplacementPolicy::Predecessor);
        assert_eq!(format!("{:?}", tree.policy()), "Predecessor");
        assert!(tree.remove(&"C6"));
        assert_eq!(tree.root(), Some(&"C5"));
        check_invariants(&tree);

        tree.set_policy(ReplacementPolicy::Successor);
        assert!(tree.remove(&"C5"));
        assert_eq!(tree.root(), Some(&"C7"));
        check_invariants(&tree);

        let cloned = tree.clone();
        assert_eq!(format!("{:?}", cloned.policy()), "Successor");
    }

    #[test]
    fn test_add_child_unsupported() {
        let mut tree = sample_tree();
        match Tree::add_child(&mut tree, &"C6", "New") {
            Err(Error::Unsupported(_)) => {},
            other => panic!("unexpected result {:?}", other),
        }
        match tree.add_all_children(&"C6", vec!["New", "Other"]) {
            Err(Error::Unsupported(_)) => {},
            other => panic!("unexpected result {:?}", other),
        }
        assert!(tree.retain_all(vec![&"C6"]).is_err());
        assert_eq!(tree.len(), 12);
    }

    #[test]
    fn test_trait_bulk_operations() {
        let mut tree = RedBlackTree::new();
        assert!(Tree::insert_all(&mut tree, vec![1, 2, 3]));
        assert!(!Tree::insert_all(&mut tree, vec![1, 2]));
        assert!(tree.contains_all(&[1, 3]));
        assert!(!tree.contains_all(&[1, 4]));
        assert!(Tree::remove_all(&mut tree, &[3, 4]));
        assert!(!Tree::remove_all(&mut tree, &[3, 4]));
        assert_eq!(Tree::len(&tree), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let tree = sample_tree();
        let mut clone = tree.clone();
        assert_eq!(clone, tree);
        check_invariants(&clone);

        clone.remove(&"C2");
        assert_ne!(clone, tree);
        assert_eq!(tree.len(), 12);
        assert!(tree.contains(&"C2"));
    }

    #[test]
    fn test_eq_ignores_colors() {
        let tree = sample_tree();
        let mut other = tree.clone();
        let id = other.find(&"C2").unwrap();
        other.arena[id].color = Color::Black;
        assert_eq!(tree, other);
    }

    #[test]
    fn test_eq_depends_on_shape() {
        let a = (1..=3).collect::<RedBlackTree<u32>>();
        let mut b = RedBlackTree::new();
        for value in &[1, 2, 3, 4] {
            b.insert(*value);
        }
        b.remove(&4);
        assert_eq!(a, b);

        let ascending = (1..=4).collect::<RedBlackTree<u32>>();
        let descending = (1..=4).rev().collect::<RedBlackTree<u32>>();
        assert_eq!(ascending.in_order(), descending.in_order());
        assert_ne!(ascending, descending);

        let empty: RedBlackTree<u32> = RedBlackTree::new();
        assert_ne!(a, empty);
        assert_eq!(empty, RedBlackTree::new());
    }

    #[test]
    fn test_debug() {
        let tree = (1..=3).collect::<RedBlackTree<u32>>();
        assert_eq!(format!("{:?}", tree), "{1, 2, 3}");
    }

    #[test]
    fn test_random_operations_keep_invariants() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = RedBlackTree::with_policy(ReplacementPolicy::seeded([2, 2, 2, 2]));
        let mut expected = BTreeSet::new();

        for _ in 0..2_000 {
            let value = rng.gen_range(0, 200);
            if rng.gen::<bool>() {
                assert_eq!(tree.insert(value), expected.insert(value));
            } else {
                assert_eq!(tree.remove(&value), expected.remove(&value));
            }
            check_invariants(&tree);
        }

        assert_eq!(
            tree.in_order(),
            expected.iter().collect::<Vec<&u32>>(),
        );
    }

    #[test]
    fn test_depth_is_logarithmic() {
        let tree = (0..1_023).collect::<RedBlackTree<u32>>();
        let black_height = check_invariants(&tree);
        assert!(tree.depth() <= 2 * 10);
        assert!(black_height >= tree.depth() / 2);
    }
}
