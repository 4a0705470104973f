use std::cmp::Ordering;
use std::fmt;

use tracing::{error, trace};

use crate::compare::{Compare, NaturalOrder};
use crate::config::{CheckMode, TreeConfig};
use crate::error::{TreeError, TreeResult};
use crate::node::{self, Color, Link};
use crate::traverse::{Order, Traversal};

/// Outcome of a lookup, with the number of nodes visited on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    /// Whether a matching item is stored
    pub found: bool,
    /// Nodes compared before the search ended
    pub iterations: usize,
}

/// Shape summary returned by [`LlrbTree::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Number of stored items
    pub len: usize,
    /// Nodes on the longest root-to-leaf path
    pub height: usize,
    /// Black nodes on every root-to-leaf path
    pub black_height: usize,
}

/// Largest height a valid tree of `len` items can reach:
/// `2 * ceil(log2(len + 1))`.
pub fn height_bound(len: usize) -> usize {
    2 * (usize::BITS - len.leading_zeros()) as usize
}

/// Left-leaning red-black tree ordered by a [`Compare`] implementation.
///
/// Items double as keys: inserting an item equal to a stored one is a
/// no-op. Insert, delete and lookup are `O(log n)`; the height never
/// exceeds `2 * log2(n + 1)`.
#[derive(Clone)]
pub struct LlrbTree<T, C = NaturalOrder> {
    root: Link<T>,
    count: usize,
    cmp: C,
    config: TreeConfig,
}

impl<T: Ord> LlrbTree<T> {
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Ord> Default for LlrbTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> LlrbTree<T, C> {
    /// Number of stored items. Maintained on every mutation.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.count = 0;
    }

    pub fn config(&self) -> TreeConfig {
        self.config
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Nodes on the longest root-to-leaf path. Walks the whole tree.
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Ascending walk.
    pub fn iter(&self) -> Traversal<'_, T> {
        self.iter_order(Order::InOrder)
    }

    pub fn iter_order(&self, order: Order) -> Traversal<'_, T> {
        Traversal::new(self.root.as_deref(), self.count, order)
    }

    /// Lookup driven by `probe`, which reports how the wanted item orders
    /// relative to each stored value it is shown.
    pub fn probe_by<F>(&self, mut probe: F) -> Lookup
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut link = &self.root;
        let mut iterations = 0;
        while let Some(node) = link {
            iterations += 1;
            match probe(&node.value) {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => {
                    return Lookup {
                        found: true,
                        iterations,
                    };
                }
            }
        }
        Lookup {
            found: false,
            iterations,
        }
    }

    pub fn find_by<F>(&self, probe: F) -> bool
    where
        F: FnMut(&T) -> Ordering,
    {
        self.probe_by(probe).found
    }
}

impl<T, C: Compare<T>> LlrbTree<T, C> {
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            root: None,
            count: 0,
            cmp,
            config: TreeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn find(&self, item: &T) -> bool {
        self.probe(item).found
    }

    pub fn probe(&self, item: &T) -> Lookup {
        let cmp = &self.cmp;
        self.probe_by(|stored| cmp.compare(item, stored))
    }

    /// Stores `item` unless an equal item is already present. Returns
    /// whether a new node was created.
    pub fn insert(&mut self, item: T) -> bool {
        let (mut root, inserted) = node::insert(self.root.take(), item, &self.cmp);
        root.color = Color::Black;
        self.root = Some(root);
        if inserted {
            self.count += 1;
        }
        trace!(inserted, len = self.count, "insert");
        self.check_invariants("insert");
        inserted
    }

    /// Removes the item equal to `item`. Returns whether one was removed.
    ///
    /// The tree must not be empty: callers are expected to check
    /// [`LlrbTree::is_empty`] first, and a delete on an empty tree reports
    /// [`TreeError::EmptyTree`] instead of touching the missing root.
    pub fn delete(&mut self, item: &T) -> TreeResult<bool> {
        let Some(root) = self.root.take() else {
            return Err(TreeError::EmptyTree);
        };
        let cmp = &self.cmp;
        let (root, deleted) = node::delete(root, &|stored: &T| cmp.compare(item, stored));
        self.finish_delete(root, deleted)
    }

    /// Like [`LlrbTree::delete`], with the target described by `probe` as in
    /// [`LlrbTree::probe_by`].
    pub fn delete_by<F>(&mut self, probe: F) -> TreeResult<bool>
    where
        F: Fn(&T) -> Ordering,
    {
        let Some(root) = self.root.take() else {
            return Err(TreeError::EmptyTree);
        };
        let (root, deleted) = node::delete(root, &probe);
        self.finish_delete(root, deleted)
    }

    fn finish_delete(&mut self, root: Link<T>, deleted: bool) -> TreeResult<bool> {
        self.root = root;
        if let Some(root) = self.root.as_mut() {
            root.color = Color::Black;
        }
        if deleted {
            self.count -= 1;
        }
        trace!(deleted, len = self.count, "delete");
        self.check_invariants("delete");
        Ok(deleted)
    }

    /// Checks every structural invariant: black root, left-leaning red
    /// links, no consecutive reds, equal black height on every path, items
    /// in comparator order and a count matching the node total.
    pub fn validate(&self) -> TreeResult<TreeStats> {
        if node::is_red(&self.root) {
            return Err(TreeError::RedRoot);
        }
        let mut nodes = 0;
        let black_height = self.check_subtree(&self.root, None, None, &mut nodes)?;
        if nodes != self.count {
            return Err(TreeError::CountMismatch {
                expected: self.count,
                actual: nodes,
            });
        }
        Ok(TreeStats {
            len: self.count,
            height: self.height(),
            black_height,
        })
    }

    fn check_subtree(
        &self,
        link: &Link<T>,
        lower: Option<&T>,
        upper: Option<&T>,
        nodes: &mut usize,
    ) -> TreeResult<usize> {
        let Some(node) = link else {
            return Ok(0);
        };
        *nodes += 1;

        if node::is_red(&node.right) {
            return Err(TreeError::RightLeaningRed);
        }
        if node.is_red() && node::is_red(&node.left) {
            return Err(TreeError::ConsecutiveReds);
        }
        if lower.is_some_and(|low| self.cmp.compare(low, &node.value) != Ordering::Less)
            || upper.is_some_and(|high| self.cmp.compare(&node.value, high) != Ordering::Less)
        {
            return Err(TreeError::OutOfOrder);
        }

        let left = self.check_subtree(&node.left, lower, Some(&node.value), nodes)?;
        let right = self.check_subtree(&node.right, Some(&node.value), upper, nodes)?;
        if left != right {
            return Err(TreeError::UnbalancedBlacks { left, right });
        }
        Ok(left + usize::from(!node.is_red()))
    }

    fn check_invariants(&self, op: &'static str) {
        match self.config.checks {
            CheckMode::Off => {}
            CheckMode::Log => {
                if let Err(err) = self.validate() {
                    error!(op, %err, "tree invariant violated");
                }
            }
            CheckMode::Strict => {
                if let Err(err) = self.validate() {
                    panic!("tree invariant violated after {op}: {err}");
                }
            }
        }
    }
}

impl<T, C: Compare<T>> Extend<T> for LlrbTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T: Ord> FromIterator<T> for LlrbTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, T, C> IntoIterator for &'a LlrbTree<T, C> {
    type Item = &'a T;
    type IntoIter = Traversal<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for LlrbTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::BTreeSet;
    use tracing_subscriber::EnvFilter;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn strict_tree() -> LlrbTree<i64> {
        LlrbTree::new().with_config(TreeConfig::strict())
    }


    #[test]
    fn test_height_bound_values() {
        assert_eq!(height_bound(0), 0);
        assert_eq!(height_bound(1), 2);
        assert_eq!(height_bound(2), 4);
        assert_eq!(height_bound(3), 4);
        assert_eq!(height_bound(4), 6);
        assert_eq!(height_bound(7), 6);
        assert_eq!(height_bound(8), 8);
    }

    #[test]
    fn test_config_and_comparator_accessors() {
        let tree: LlrbTree<i64> = LlrbTree::new();
        assert_eq!(tree.config(), TreeConfig::default());
        assert_eq!(tree.config().checks, CheckMode::Off);
        assert_eq!(*tree.comparator(), NaturalOrder);

        let tree = tree.with_config(TreeConfig::strict());
        assert_eq!(tree.config().checks, CheckMode::Strict);

        let by_abs = |a: &i64, b: &i64| a.abs().cmp(&b.abs());
        let tree: LlrbTree<i64, _> = LlrbTree::with_comparator(by_abs);
        assert_eq!(tree.comparator().compare(&-3, &2), Ordering::Greater);
    }

    #[test]
    fn test_insert_and_search() {
        init_tracing();
        let mut tree = strict_tree();

        assert!(tree.insert(10));
        assert!(tree.insert(20));
        assert!(tree.insert(5));
        assert!(tree.insert(15));

        assert!(tree.find(&10));
        assert!(tree.find(&20));
        assert!(tree.find(&5));
        assert!(tree.find(&15));

        assert!(!tree.find(&25));
        assert!(!tree.find(&0));
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_red_black_properties() {
        let mut tree = strict_tree();
        for key in [10, 20, 5, 15, 25] {
            tree.insert(key);
        }
        let stats = tree.validate().expect("valid tree");
        assert_eq!(stats.len, 5);
        assert!(stats.height <= height_bound(5));
        assert!(stats.black_height >= 1);
    }

    #[test]
    fn test_duplicate_insert_keeps_first_value() {
        let by_key = |a: &(i32, &str), b: &(i32, &str)| a.0.cmp(&b.0);
        let mut tree: LlrbTree<(i32, &str), _> = LlrbTree::with_comparator(by_key);

        assert!(tree.insert((1, "first")));
        assert!(!tree.insert((1, "second")));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.iter().next(), Some(&(1, "first")));
    }

    #[test]
    fn test_probe_counts_iterations() {
        let mut tree = LlrbTree::new();
        for value in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(value);
        }
        assert_eq!(tree.probe(&4), Lookup { found: true, iterations: 1 });
        assert_eq!(tree.probe(&2), Lookup { found: true, iterations: 2 });
        assert_eq!(tree.probe(&7), Lookup { found: true, iterations: 3 });
        assert_eq!(tree.probe(&8), Lookup { found: false, iterations: 3 });

        let empty: LlrbTree<i32> = LlrbTree::new();
        assert_eq!(empty.probe(&1), Lookup { found: false, iterations: 0 });
    }

    #[test]
    fn test_height_bound_sequential_reverse_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x11b);
        let mut sequential = LlrbTree::new();
        let mut reverse = LlrbTree::new();
        let mut random = LlrbTree::new();

        let mut i: i64 = 0;
        for n in 1..14 {
            let limit: i64 = 1 << n;
            while i < limit {
                sequential.insert(i);
                reverse.insert(-i);
                random.insert(rng.gen_range(0..i64::MAX));
                i += 1;
            }
            for tree in [&sequential, &reverse, &random] {
                assert!(
                    tree.height() <= height_bound(tree.len()),
                    "height {} exceeds bound for {} items",
                    tree.height(),
                    tree.len()
                );
            }
        }
        sequential.validate().expect("sequential valid");
        reverse.validate().expect("reverse valid");
        random.validate().expect("random valid");
    }

    #[test]
    fn test_delete_random_keeps_invariants() {
        init_tracing();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut tree = strict_tree();
        let mut model = BTreeSet::new();

        for _ in 0..2000 {
            let key = rng.gen_range(0..500);
            assert_eq!(tree.insert(key), model.insert(key));
        }
        for _ in 0..2000 {
            let key = rng.gen_range(0..500);
            let before = tree.len();
            let deleted = if tree.is_empty() {
                false
            } else {
                tree.delete(&key).expect("tree not empty")
            };
            assert_eq!(deleted, model.remove(&key));
            assert_eq!(tree.len(), before - usize::from(deleted));
            assert!(!tree.find(&key));
        }
        assert!(tree.iter().copied().eq(model.iter().copied()));
    }

    #[test]
    fn test_delete_absent_item() {
        let mut tree = strict_tree();
        for key in 0..64 {
            tree.insert(key * 2);
        }
        for key in 0..64 {
            assert_eq!(tree.delete(&(key * 2 + 1)), Ok(false));
        }
        assert_eq!(tree.delete(&-1), Ok(false));
        assert_eq!(tree.delete(&1000), Ok(false));
        assert_eq!(tree.len(), 64);
        assert!(tree.iter().copied().eq((0..64).map(|k| k * 2)));
    }

    #[test]
    fn test_delete_empty_tree_errors() {
        let mut tree: LlrbTree<i64> = LlrbTree::new();
        assert_eq!(tree.delete(&1), Err(TreeError::EmptyTree));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_delete_all_to_empty() {
        let mut tree = strict_tree();
        for key in 0..100 {
            tree.insert(key);
        }
        for key in (0..100).rev() {
            assert_eq!(tree.delete(&key), Ok(true));
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.delete(&0), Err(TreeError::EmptyTree));
    }

    #[test]
    fn test_delete_by_probe() {
        let mut tree = strict_tree();
        for key in 0..32 {
            tree.insert(key);
        }
        assert_eq!(tree.delete_by(|stored| 17.cmp(stored)), Ok(true));
        assert_eq!(tree.delete_by(|stored| 17.cmp(stored)), Ok(false));
        assert!(!tree.find_by(|stored| 17.cmp(stored)));
        assert_eq!(tree.len(), 31);
    }

    #[test]
    fn test_clear_and_reuse() {
        let mut tree: LlrbTree<i64> = (0..10).collect();
        assert_eq!(tree.len(), 10);
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.insert(3));
        assert_eq!(format!("{:?}", tree), "{3}");
    }

    #[test]
    fn test_validate_detects_red_root() {
        let mut tree: LlrbTree<i32> = LlrbTree::new();
        tree.root = Some(Box::new(Node {
            value: 1,
            left: None,
            right: None,
            color: Color::Red,
        }));
        tree.count = 1;
        assert_eq!(tree.validate(), Err(TreeError::RedRoot));
    }

    #[test]
    fn test_validate_detects_right_leaning_red() {
        let mut tree: LlrbTree<i32> = LlrbTree::new();
        tree.root = Some(Box::new(Node {
            value: 1,
            left: None,
            right: Some(Box::new(Node {
                value: 2,
                left: None,
                right: None,
                color: Color::Red,
            })),
            color: Color::Black,
        }));
        tree.count = 2;
        assert_eq!(tree.validate(), Err(TreeError::RightLeaningRed));
    }

    #[test]
    fn test_validate_detects_disorder_and_count() {
        let mut tree: LlrbTree<i32> = LlrbTree::new();
        tree.root = Some(Box::new(Node {
            value: 1,
            left: Some(Box::new(Node {
                value: 2,
                left: None,
                right: None,
                color: Color::Red,
            })),
            right: None,
            color: Color::Black,
        }));
        tree.count = 2;
        assert_eq!(tree.validate(), Err(TreeError::OutOfOrder));

        let mut tree: LlrbTree<i32> = (0..3).collect();
        tree.count = 4;
        assert_eq!(
            tree.validate(),
            Err(TreeError::CountMismatch { expected: 4, actual: 3 })
        );
    }

    #[test]
    fn test_validate_detects_black_imbalance() {
        let mut tree: LlrbTree<i32> = LlrbTree::new();
        tree.root = Some(Box::new(Node {
            value: 2,
            left: Some(Box::new(Node {
                value: 1,
                left: None,
                right: None,
                color: Color::Black,
            })),
            right: None,
            color: Color::Black,
        }));
        tree.count = 2;
        assert_eq!(
            tree.validate(),
            Err(TreeError::UnbalancedBlacks { left: 1, right: 0 })
        );
    }

    #[test]
    #[should_panic(expected = "tree invariant violated")]
    fn test_strict_checks_panic_on_corruption() {
        let mut tree = strict_tree();
        tree.insert(1);
        tree.count = 7;
        tree.insert(2);
    }

    #[test]
    fn test_log_checks_do_not_panic() {
        init_tracing();
        let mut tree: LlrbTree<i64> =
            LlrbTree::new().with_config(TreeConfig::default().with_checks(CheckMode::Log));
        tree.insert(1);
        tree.count = 7;
        tree.insert(2);
        assert_eq!(tree.len(), 8);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u16),
        Delete(u16),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u16..256).prop_map(Op::Insert),
            (0u16..256).prop_map(Op::Delete),
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_btreeset(ops in prop::collection::vec(arb_op(), 0..300)) {
            let mut tree = LlrbTree::new();
            let mut model = BTreeSet::new();

            for op in &ops {
                match *op {
                    Op::Insert(key) => prop_assert_eq!(tree.insert(key), model.insert(key)),
                    Op::Delete(key) => {
                        if tree.is_empty() {
                            prop_assert_eq!(tree.delete(&key), Err(TreeError::EmptyTree));
                        } else {
                            prop_assert_eq!(tree.delete(&key), Ok(model.remove(&key)));
                        }
                    }
                }
                prop_assert_eq!(tree.len(), model.len());
            }

            prop_assert!(tree.validate().is_ok());
            prop_assert!(tree.height() <= height_bound(tree.len()));
            prop_assert!(tree.iter().eq(model.iter()));
            prop_assert!(tree.iter_order(Order::ReverseOrder).eq(model.iter().rev()));
        }
    }
}
