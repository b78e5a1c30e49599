use log::debug;

use crate::arena::NodeId;
use crate::balanced_tree::BalancedTree;

impl BalancedTree {
    /// Removes `key` from the tree.
    ///
    /// Returns `false`, leaving the tree untouched, if the key is not present.
    pub fn remove(&mut self, key: i32) -> bool {
        let Some(node) = self.find_node(key) else {
            return false;
        };

        //            ┌──── 10 ────┐
        //            │            │
        //       ┌─── 5 ─┐      ┌─ 15 ─┐
        //       │       │      │      │
        //    ┌─ 3       7      12     20
        //    │
        //    1
        //
        // 1, 7, 12 and 20 have no children, 3 has one, 5, 10 and 15 have two
        let start = match self.nodes[node].child_count() {
            0 => self.remove_leaf(node),
            1 => self.remove_with_one_child(node),
            _ => self.remove_with_two_children(node),
        };

        if let Some(start) = start {
            self.retrace(start, self.config().deletion_balancing);
        }
        self.len -= 1;
        true
    }

    /// Unlinks a childless `node` from its parent.
    ///
    /// Returns the node to start retracing from.
    fn remove_leaf(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes[node].parent;
        self.nodes.replace_child(parent, node, None);
        let node = self.nodes.release(node);
        debug!("removed leaf {}", node.key);
        Some(parent)
    }

    /// Replaces `node` by its only child.
    ///
    /// Returns the node to start retracing from, which is `None` when `node`
    /// was the root: there is nothing above its child to rebalance.
    fn remove_with_one_child(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes[node].parent;
        let Some(child) = self.nodes[node].any_child() else {
            unreachable!("{node:?} has no children");
        };

        let start = if parent.is_sentinel() {
            self.nodes[parent].left = Some(child);
            None
        } else {
            self.nodes.replace_child(parent, node, Some(child));
            Some(parent)
        };
        self.nodes[child].parent = parent;

        let node = self.nodes.release(node);
        debug!("removed {} with one child", node.key);
        start
    }

    /// Moves the key of the in-order successor into `node` and unlinks the
    /// successor instead.
    ///
    /// Returns the successor's former parent, the node to start retracing from.
    fn remove_with_two_children(&mut self, node: NodeId) -> Option<NodeId> {
        // There is a right subtree, so the successor is its minimum.
        // Being a minimum it has no left child, but it may have a right one.
        let successor = self.min_of(self.right_of(node));
        let successor_parent = self.nodes[successor].parent;
        let successor_right = self.nodes[successor].right;

        let removed_key = self.nodes[node].key;
        self.nodes[node].key = self.nodes[successor].key;

        self.nodes
            .replace_child(successor_parent, successor, successor_right);
        self.nodes.set_parent(successor_right, successor_parent);

        let successor = self.nodes.release(successor);
        debug!(
            "removed {removed_key} by moving its successor {} into its place",
            successor.key
        );
        Some(successor_parent)
    }
}
