use rand::Rng;
use sorted_trees::error::Error;
use sorted_trees::red_black_tree::{Color, RedBlackTree, ReplacementPolicy};
use sorted_trees::tree::{SortedTree, Tree};
use std::collections::BTreeSet;
use std::fmt;

const NUM_OF_OPERATIONS: usize = 100_000;

const SAMPLE: [&str; 12] = [
    "C6", "C3", "C9", "C1", "C4", "C7", "CB", "C2", "C5", "C8", "CA", "CC",
];

fn sample_tree() -> RedBlackTree<&'static str> {
    SAMPLE.iter().cloned().collect()
}

// Returns the black height of the subtree rooted at `value`, checking the coloring and the parent
// links of every node on the way.
fn black_height<T>(tree: &RedBlackTree<T>, value: &T) -> usize
where
    T: Ord + fmt::Debug,
{
    let color = tree.color(value).unwrap();
    let mut heights = Vec::new();
    for child in &[tree.left(value).unwrap(), tree.right(value).unwrap()] {
        match child {
            Some(child) => {
                assert_eq!(tree.parent(*child).unwrap(), Some(value));
                if color == Color::Red {
                    assert_eq!(tree.color(*child).unwrap(), Color::Black);
                }
                heights.push(black_height(tree, *child));
            },
            None => heights.push(1),
        }
    }
    assert_eq!(heights[0], heights[1]);
    heights[0] + if color == Color::Black { 1 } else { 0 }
}

fn assert_red_black<T>(tree: &RedBlackTree<T>)
where
    T: Ord + fmt::Debug,
{
    if let Some(root) = tree.root() {
        assert_eq!(tree.color(root), Ok(Color::Black));
        assert_eq!(tree.parent(root), Ok(None));
        black_height(tree, root);
    }
    let values = tree.in_order();
    assert_eq!(values.len(), tree.len());
    assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn int_test_sample_tree() {
    let tree = sample_tree();
    let mut expected = SAMPLE.to_vec();
    expected.sort();

    assert_eq!(tree.in_order(), expected.iter().collect::<Vec<_>>());
    assert_eq!(tree.root(), Some(&"C6"));
    assert_eq!(tree.depth(), 4);
    assert_eq!(tree.successor(&"C5"), Ok(Some(&"C6")));
    assert_eq!(tree.predecessor(&"C9"), Ok(Some(&"C8")));
    assert_eq!(tree.leaves(), vec![&"C2", &"C5", &"C8", &"CA", &"CC"]);
    assert_eq!(tree.common_ancestor(&"C6", &"C6"), Ok(&"C6"));
    assert_eq!(tree.common_ancestor(&"C2", &"C5"), Ok(&"C3"));
    assert_eq!(tree.common_ancestor(&"C2", &"CC"), Ok(&"C6"));
    assert_red_black(&tree);
}

#[test]
fn int_test_remove_root() {
    for policy in vec![ReplacementPolicy::Successor, ReplacementPolicy::Predecessor] {
        let mut tree = RedBlackTree::with_policy(policy);
        tree.extend(SAMPLE.iter().cloned());

        assert!(tree.remove(&"C6"));
        assert_eq!(tree.len(), 11);
        assert!(!tree.contains(&"C6"));
        for value in SAMPLE.iter().filter(|value| **value != "C6") {
            assert!(tree.contains(value));
        }
        assert_red_black(&tree);
    }
}

#[test]
fn int_test_empty_tree() {
    let tree: RedBlackTree<u32> = RedBlackTree::new();
    assert!(tree.leaves().is_empty());
    assert!(tree.in_order().is_empty());
    assert!(tree.level_order().is_empty());
    assert_eq!(tree.depth(), 0);
    assert_eq!(tree.root(), None);
    assert_eq!(tree.parent(&1), Err(Error::NotFound));
    assert_eq!(tree.common_ancestor(&1, &1), Err(Error::NotFound));
}

#[test]
fn int_test_red_black_tree() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = RedBlackTree::with_policy(ReplacementPolicy::seeded([3, 3, 3, 3]));
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let value = rng.gen_range(0, 10_000);

        if rng.gen::<bool>() {
            assert_eq!(tree.insert(value), expected.insert(value));
        } else {
            assert_eq!(tree.remove(&value), expected.remove(&value));
        }
    }

    assert_eq!(tree.len(), expected.len());
    assert_eq!(
        tree.iter().collect::<Vec<&u32>>(),
        expected.iter().collect::<Vec<&u32>>(),
    );
    assert_red_black(&tree);

    for value in &expected {
        let successor = tree.successor(value).unwrap();
        assert_eq!(successor, expected.range(value + 1..).next());
        if let Some(successor) = successor {
            assert_eq!(tree.predecessor(successor), Ok(Some(value)));
        }
    }

    for value in expected.iter() {
        assert!(tree.remove(value));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.depth(), 0);
}

#[test]
fn int_test_traversals_agree() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([2, 2, 2, 2]);
    let tree = (0..1000)
        .map(|_| rng.gen::<u32>())
        .collect::<RedBlackTree<u32>>();

    let mut pre_order = tree.pre_order();
    let mut post_order = tree.post_order();
    let mut level_order = tree.level_order();
    assert_eq!(pre_order.first(), tree.root().as_ref());
    assert_eq!(post_order.last(), tree.root().as_ref());
    assert_eq!(level_order.first(), tree.root().as_ref());

    pre_order.sort();
    post_order.sort();
    level_order.sort();
    assert_eq!(pre_order, tree.in_order());
    assert_eq!(post_order, tree.in_order());
    assert_eq!(level_order, tree.in_order());
}

#[test]
fn int_test_clone() {
    let mut tree = sample_tree();
    let cloned = tree.clone();

    assert_eq!(tree, cloned);
    assert_eq!(cloned.pre_order(), tree.pre_order());
    for value in SAMPLE.iter() {
        assert_eq!(cloned.color(value), tree.color(value));
    }

    tree.remove(&"C6");
    assert_ne!(tree, cloned);
    assert_eq!(cloned.len(), 12);
    assert_red_black(&cloned);
}

fn fill<U>(tree: &mut U, values: &[u32]) -> bool
where
    U: Tree<u32>,
{
    tree.insert_all(values.iter().cloned())
}

fn neighbours<U>(tree: &U, value: &u32) -> (Option<u32>, Option<u32>)
where
    U: SortedTree<u32>,
{
    (
        tree.predecessor(value).unwrap().cloned(),
        tree.successor(value).unwrap().cloned(),
    )
}

#[test]
fn int_test_tree_contract() {
    let mut tree = RedBlackTree::new();
    assert!(fill(&mut tree, &[5, 1, 9, 3, 7]));
    assert!(!fill(&mut tree, &[1, 9]));

    assert_eq!(neighbours(&tree, &5), (Some(3), Some(7)));
    assert_eq!(neighbours(&tree, &1), (None, Some(3)));
    assert!(Tree::contains_all(&tree, &[1, 3, 5]));
    assert!(!Tree::contains_all(&tree, &[1, 2]));
    assert_eq!(
        Tree::add_child(&mut tree, &5, 6),
        Err(Error::Unsupported("a red black tree decides the parent of a value on its own")),
    );
    assert!(Tree::retain_all(&mut tree, &[1]).is_err());
    assert!(Tree::remove_all(&mut tree, &[1, 2, 3]));
    assert_eq!(Tree::in_order(&tree), vec![&5, &7, &9]);

    Tree::clear(&mut tree);
    assert!(Tree::is_empty(&tree));
}

#[test]
fn int_test_seeded_policy_is_reproducible() {
    let build = || {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([5, 5, 5, 5]);
        let mut tree = RedBlackTree::with_policy(ReplacementPolicy::seeded([6, 6, 6, 6]));
        for _ in 0..10_000 {
            let value = rng.gen_range(0, 1000);
            if rng.gen::<bool>() {
                tree.insert(value);
            } else {
                tree.remove(&value);
            }
        }
        tree
    };

    let tree = build();
    let other = build();
    assert_eq!(tree, other);
    assert_eq!(tree.pre_order(), other.pre_order());
    assert_eq!(format!("{:?}", tree.policy()), "Random");
    assert_red_black(&tree);
}
