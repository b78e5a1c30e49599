use log::trace;

use crate::arena::NodeId;
use crate::balanced_tree::BalancedTree;

/// Restructuring applied by [`BalancedTree::balance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rotation {
    /// RR case: a single left rotation.
    Left,
    /// LL case: a single right rotation.
    Right,
    /// RL case: right rotation of the right child, then left rotation.
    RightLeft,
    /// LR case: left rotation of the left child, then right rotation.
    LeftRight,
}

impl BalancedTree {
    #[inline]
    pub(crate) fn height_of(&self, node: Option<NodeId>) -> u32 {
        node.map_or(0, |id| self.nodes[id].height)
    }

    /// `height(right) - height(left)`
    pub(crate) fn balance_factor(&self, id: NodeId) -> i32 {
        let node = &self.nodes[id];
        self.height_of(node.right) as i32 - self.height_of(node.left) as i32
    }

    /// Recomputes the cached height of `id` from its children.
    #[inline]
    pub(crate) fn update_height(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        let height = 1 + self.height_of(node.left).max(self.height_of(node.right));
        self.nodes[id].height = height;
    }

    /// Walks from `start` up to the sentinel, refreshing cached heights and,
    /// if `rebalance` is set, balancing every node on the way.
    pub(crate) fn retrace(&mut self, start: NodeId, rebalance: bool) {
        let mut cur = start;
        while !cur.is_sentinel() {
            self.update_height(cur);
            if rebalance {
                self.balance(cur);
            }
            // after a rotation this is the promoted child, which is balanced
            // once more before moving on to the old parent
            cur = self.nodes[cur].parent;
        }
    }

    /// Restores `|balance_factor| <= 1` at `id`, assuming both of its subtrees
    /// are already balanced and differ in height by at most 2.
    ///
    /// A heavy child with equal subtree heights is handled by a single
    /// rotation. That case only arises after a removal, and a double rotation
    /// there can leave the demoted child two levels out of balance.
    pub(crate) fn balance(&mut self, id: NodeId) -> Option<Rotation> {
        let bf = self.balance_factor(id);
        let rotation = if bf >= 2 {
            if self.balance_factor(self.right_of(id)) >= 0 {
                Rotation::Left
            } else {
                Rotation::RightLeft
            }
        } else if bf <= -2 {
            if self.balance_factor(self.left_of(id)) <= 0 {
                Rotation::Right
            } else {
                Rotation::LeftRight
            }
        } else {
            return None;
        };

        trace!(
            "{rotation:?} rotation at key {} (balance factor {bf})",
            self.nodes[id].key
        );
        match rotation {
            Rotation::Left => self.rotate_left(id),
            Rotation::Right => self.rotate_right(id),
            Rotation::RightLeft => {
                self.rotate_right(self.right_of(id));
                self.rotate_left(id);
            }
            Rotation::LeftRight => {
                self.rotate_left(self.left_of(id));
                self.rotate_right(id);
            }
        }

        Some(rotation)
    }

    pub(crate) fn right_of(&self, id: NodeId) -> NodeId {
        match self.nodes[id].right {
            Some(right) => right,
            None => unreachable!("{id:?} has no right child"),
        }
    }

    pub(crate) fn left_of(&self, id: NodeId) -> NodeId {
        match self.nodes[id].left {
            Some(left) => left,
            None => unreachable!("{id:?} has no left child"),
        }
    }

    pub(crate) fn rotate_left(&mut self, cur: NodeId) {
        //    p                       p
        //    |                       |
        // +-cur-+               +-child-+
        // |     |       -->     |       |
        // a  +-child-+       +-cur-+    c
        //    |       |       |     |
        //    b       c       a     b
        // where a, b, c can be any subtrees
        let parent = self.nodes[cur].parent;
        let child = self.right_of(cur);
        let b = self.nodes[child].left;

        // attach child to parent
        self.nodes.replace_child(parent, cur, Some(child));
        self.nodes[child].parent = parent;

        // attach b to cur
        self.nodes[cur].right = b;
        self.nodes.set_parent(b, cur);

        // attach cur to child
        self.nodes[child].left = Some(cur);
        self.nodes[cur].parent = child;

        self.update_height(cur);
        self.update_height(child);
    }

    pub(crate) fn rotate_right(&mut self, cur: NodeId) {
        //          p              p
        //          |              |
        //      +-cur-+        +-child-+
        //      |     |        |       |
        // +-child-+  c  -->   a    +-cur-+
        // |       |                |     |
        // a       b                b     c
        // where a, b, c can be any subtrees
        let parent = self.nodes[cur].parent;
        let child = self.left_of(cur);
        let b = self.nodes[child].right;

        // attach child to parent
        self.nodes.replace_child(parent, cur, Some(child));
        self.nodes[child].parent = parent;

        // attach b to cur
        self.nodes[cur].left = b;
        self.nodes.set_parent(b, cur);

        // attach cur to child
        self.nodes[child].right = Some(cur);
        self.nodes[cur].parent = child;

        self.update_height(cur);
        self.update_height(child);
    }
}
