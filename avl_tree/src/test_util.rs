use std::fs::File;
use std::sync::Once;

use simplelog::{Config, LevelFilter, WriteLogger};

use crate::arena::NodeId;
use crate::balanced_tree::BalancedTree;

/// Routes the tree's log output into a file in the temp directory.
pub(crate) fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let path = std::env::temp_dir().join("avl_tree_test.log");
        if let Ok(file) = File::create(path) {
            let _ = WriteLogger::init(LevelFilter::Trace, Config::default(), file);
        }
    });
}

/// Expected shape of a (sub)tree, compared against the real tree with `==`.
#[derive(Debug)]
pub(crate) struct TestNode {
    pub(crate) key: i32,
    /// `None` for the root, whose parent is the sentinel.
    pub(crate) parent_k: Option<i32>,
    pub(crate) left_k: Option<Box<TestNode>>,
    pub(crate) right_k: Option<Box<TestNode>>,
}

impl TestNode {
    pub(crate) fn leaf(key: i32, parent: i32) -> Self {
        Self {
            key,
            parent_k: Some(parent),
            left_k: None,
            right_k: None,
        }
    }

    fn eq_at(&self, tree: &BalancedTree, id: NodeId) -> bool {
        let node = &tree.nodes[id];
        if self.key != node.key {
            return false;
        }

        let parent = (!node.parent.is_sentinel()).then(|| tree.nodes[node.parent].key);
        if parent != self.parent_k {
            return false;
        }

        let child_eq = |actual: Option<NodeId>, expected: &Option<Box<TestNode>>| {
            match (actual, expected) {
                (None, None) => true,
                (Some(actual), Some(expected)) => expected.eq_at(tree, actual),
                _ => false,
            }
        };

        child_eq(node.left, &self.left_k) && child_eq(node.right, &self.right_k)
    }
}

impl PartialEq<BalancedTree> for TestNode {
    fn eq(&self, other: &BalancedTree) -> bool {
        match other.root() {
            Some(root) => self.eq_at(other, root),
            None => false,
        }
    }
}

/// Keys in ascending order.
pub(crate) fn keys(tree: &BalancedTree) -> Vec<i32> {
    let mut items = Vec::with_capacity(tree.len());
    if let Some(root) = tree.root() {
        tree.inorder_for_each_core(root, &mut |id| items.push(tree.nodes[id].key));
    }
    items
}

/// Checks link consistency, key order, cached heights and node accounting,
/// plus the AVL property if the tree is configured to keep it.
pub(crate) fn assert_invariants(tree: &BalancedTree) {
    let sentinel = &tree.nodes[NodeId::SENTINEL];
    assert_eq!(sentinel.right, None, "sentinel right slot must stay empty");

    let Some(root) = sentinel.left else {
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.allocated_nodes(), 0);
        return;
    };
    assert_eq!(tree.nodes[root].parent, NodeId::SENTINEL);

    let check_avl = tree.config().is_balanced();
    let mut count = 0;

    // returns the freshly computed height of the subtree at `id`
    fn inner(
        tree: &BalancedTree,
        id: NodeId,
        lower: Option<i32>,
        upper: Option<i32>,
        check_avl: bool,
        count: &mut usize,
    ) -> u32 {
        *count += 1;
        let node = &tree.nodes[id];
        if let Some(lower) = lower {
            assert!(lower < node.key, "{} must be greater than {lower}: {tree:#?}", node.key);
        }
        if let Some(upper) = upper {
            assert!(node.key < upper, "{} must be less than {upper}: {tree:#?}", node.key);
        }

        let mut height_of = |child: Option<NodeId>, lower: Option<i32>, upper: Option<i32>| match child {
            Some(child) => {
                assert_eq!(tree.nodes[child].parent, id, "broken parent link of {child:?}");
                inner(tree, child, lower, upper, check_avl, count)
            }
            None => 0,
        };
        let left = height_of(node.left, lower, Some(node.key));
        let right = height_of(node.right, Some(node.key), upper);

        let height = 1 + left.max(right);
        assert_eq!(node.height, height, "stale height at key {}", node.key);
        if check_avl {
            assert!(
                (right as i32 - left as i32).abs() <= 1,
                "key {} is out of balance: {tree:#?}",
                node.key
            );
        }
        height
    }

    inner(tree, root, None, None, check_avl, &mut count);
    assert_eq!(count, tree.len());
    assert_eq!(count, tree.allocated_nodes());
}
