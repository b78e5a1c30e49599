use core::cmp::Ordering;
use core::fmt;

use log::debug;

use crate::arena::{Arena, Node, NodeId};
use crate::config::{DuplicatePolicy, TreeConfig};

/// An AVL tree based ordered set of `i32` keys.
///
/// The real root hangs off the left slot of a permanent sentinel node, so
/// every data node has a parent and neither splicing nor rebalancing needs to
/// special case the root.
pub struct BalancedTree {
    // INVARIANTS:
    //  * `nodes[SENTINEL].left` is the root, `nodes[SENTINEL].right` is always `None`
    //  * `len == nodes.live()`
    //  * `nodes[x].height` is the height of the subtree at `x` whenever no
    //    public operation is in progress
    pub(crate) nodes: Arena,
    pub(crate) len: usize,
    config: TreeConfig,
}

impl Default for BalancedTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BalancedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct NodeDebug<'a> {
            tree: &'a BalancedTree,
            id: NodeId,
        }

        impl fmt::Debug for NodeDebug<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let nodes = &self.tree.nodes;
                let node = &nodes[self.id];
                let key_of = |id: Option<NodeId>| id.map(|id| nodes[id].key);
                let parent = (!node.parent.is_sentinel()).then(|| nodes[node.parent].key);

                f.debug_struct("Node")
                    .field("key", &node.key)
                    .field("height", &node.height)
                    .field("parent", &parent)
                    .field("left", &key_of(node.left))
                    .field("right", &key_of(node.right))
                    .finish()
            }
        }

        struct TreeDebug<'a> {
            tree: &'a BalancedTree,
            root: NodeId,
        }

        impl fmt::Debug for TreeDebug<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut f = f.debug_list();
                let tree = self.tree;
                tree.inorder_for_each_core(self.root, &mut |id| {
                    f.entry(&NodeDebug { tree, id });
                });
                f.finish()
            }
        }

        let mut f = f.debug_struct("BalancedTree");
        f.field("len", &self.len);

        match self.root() {
            None => {
                f.field("root", &None::<i32>);
                let nodes: &[i32] = &[];
                f.field("nodes", &nodes);
            }
            Some(root) => {
                f.field("root", &Some(NodeDebug { tree: self, id: root }));
                f.field("nodes", &TreeDebug { tree: self, root });
            }
        }

        f.finish()
    }
}

impl BalancedTree {
    /// Creates an empty tree with both balancing passes enabled and duplicate
    /// keys rejected.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            nodes: Arena::new(),
            len: 0,
            config,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of data nodes currently held by the node storage.
    ///
    /// Equals [`len`](Self::len) after every public operation.
    #[inline]
    pub fn allocated_nodes(&self) -> usize {
        self.nodes.live()
    }

    /// Height of the whole tree, 0 when empty.
    pub fn height(&self) -> usize {
        self.height_of(self.root()) as usize
    }

    #[inline]
    pub(crate) fn root(&self) -> Option<NodeId> {
        self.nodes[NodeId::SENTINEL].left
    }

    pub fn contains(&self, key: i32) -> bool {
        self.find_node(key).is_some()
    }

    pub(crate) fn find_node(&self, key: i32) -> Option<NodeId> {
        let mut cur = self.root();
        while let Some(id) = cur {
            let node = &self.nodes[id];
            match node.key.cmp(&key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => cur = node.right,
                Ordering::Greater => cur = node.left,
            }
        }

        None
    }

    pub fn min(&self) -> Option<i32> {
        self.root().map(|root| self.nodes[self.min_of(root)].key)
    }

    pub(crate) fn min_of(&self, root: NodeId) -> NodeId {
        let mut x = root;
        while let Some(left) = self.nodes[x].left {
            x = left;
        }

        x
    }

    pub fn max(&self) -> Option<i32> {
        self.root().map(|root| {
            let mut x = root;
            while let Some(right) = self.nodes[x].right {
                x = right;
            }
            self.nodes[x].key
        })
    }

    /// Adds `key` to the tree.
    ///
    /// Returns `false` only if the key was already present and the
    /// [`DuplicatePolicy`] is `Reject`, in which case the tree is unchanged.
    pub fn insert(&mut self, key: i32) -> bool {
        let Some(root) = self.root() else {
            let new_node = self.nodes.alloc(Node::leaf(key, NodeId::SENTINEL));
            self.nodes[NodeId::SENTINEL].left = Some(new_node);
            self.len = 1;
            return true;
        };

        // Move left/right down the tree until we find an empty slot,
        // equal keys continue to the left
        let mut parent = root;
        let go_right = loop {
            let node = &self.nodes[parent];
            let ord = node.key.cmp(&key);
            if ord == Ordering::Equal && self.config.duplicates == DuplicatePolicy::Reject {
                debug!("key {key} is already present");
                return false;
            }

            let go_right = ord == Ordering::Less;
            match if go_right { node.right } else { node.left } {
                Some(next) => parent = next,
                None => break go_right,
            }
        };

        // new_node is a leaf, it cannot have left or right subtrees
        let new_node = self.nodes.alloc(Node::leaf(key, parent));
        if go_right {
            self.nodes[parent].right = Some(new_node);
        } else {
            self.nodes[parent].left = Some(new_node);
        }

        self.retrace(parent, self.config.insertion_balancing);
        self.len += 1;
        true
    }

    /// Removes every key. Does nothing on an empty tree.
    pub fn clear(&mut self) {
        let Some(root) = self.root() else {
            return;
        };

        // post-order: both subtrees of a node are released before the node
        let mut stack = vec![(root, false)];
        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                self.nodes.release(id);
                continue;
            }

            stack.push((id, true));
            let node = &self.nodes[id];
            if let Some(right) = node.right {
                stack.push((right, false));
            }
            if let Some(left) = node.left {
                stack.push((left, false));
            }
        }

        debug_assert_eq!(self.nodes.live(), 0);
        self.nodes.reset();
        self.len = 0;
    }

    /// Calls `f` on every node of the subtree at `node` in key order.
    ///
    /// Uses an explicit stack, unbalanced trees can be as deep as they are long.
    pub(crate) fn inorder_for_each_core<F>(&self, node: NodeId, f: &mut F)
    where
        F: FnMut(NodeId),
    {
        let mut stack = Vec::new();
        let mut cur = Some(node);
        loop {
            while let Some(id) = cur {
                stack.push(id);
                cur = self.nodes[id].left;
            }

            let Some(id) = stack.pop() else {
                break;
            };
            f(id);
            cur = self.nodes[id].right;
        }
    }
}
