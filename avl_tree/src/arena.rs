use core::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

/// Stable handle of a node stored in an [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    /// Slot 0 is permanently occupied by the sentinel, whose `left` is the
    /// real root of the tree.
    pub(crate) const SENTINEL: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub(crate) fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            f.write_str("#sentinel")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) key: i32,
    /// Height of the subtree rooted at this node, a leaf has height 1.
    pub(crate) height: u32,
    pub(crate) parent: NodeId,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

impl Node {
    pub(crate) fn leaf(key: i32, parent: NodeId) -> Self {
        Self {
            key,
            height: 1,
            parent,
            left: None,
            right: None,
        }
    }

    fn sentinel() -> Self {
        Self {
            key: 0,
            height: 0,
            parent: NodeId::SENTINEL,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn child_count(&self) -> usize {
        usize::from(self.left.is_some()) + usize::from(self.right.is_some())
    }

    /// Returns the left child if there is one, the right child otherwise.
    #[inline]
    pub(crate) fn any_child(&self) -> Option<NodeId> {
        self.left.or(self.right)
    }
}

#[derive(Debug)]
enum Slot {
    Occupied(Node),
    Vacant,
}

/// Node storage of a tree.
///
/// Released slots are recycled by later allocations. Accessing a released
/// slot through a stale [`NodeId`] panics.
pub(crate) struct Arena {
    // INVARIANTS:
    //  * `slots[0]` is always `Occupied` by the sentinel
    //  * every id in `free` points to a `Vacant` slot and appears only once
    slots: Vec<Slot>,
    free: Vec<NodeId>,
}

impl Arena {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Slot::Occupied(Node::sentinel())],
            free: Vec::new(),
        }
    }

    /// Number of occupied slots, not counting the sentinel.
    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - 1 - self.free.len()
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                let slot = &mut self.slots[id.index()];
                debug_assert!(matches!(slot, Slot::Vacant));
                *slot = Slot::Occupied(node);
                id
            }
            None => {
                assert!(
                    self.slots.len() <= u32::MAX as usize,
                    "node arena is full"
                );
                let id = NodeId(self.slots.len() as u32);
                self.slots.push(Slot::Occupied(node));
                id
            }
        }
    }

    /// Frees the slot of `id` and returns the node that was stored there.
    ///
    /// The caller must have unlinked the node from the tree beforehand.
    pub(crate) fn release(&mut self, id: NodeId) -> Node {
        assert!(!id.is_sentinel(), "the sentinel cannot be released");
        match mem::replace(&mut self.slots[id.index()], Slot::Vacant) {
            Slot::Occupied(node) => {
                self.free.push(id);
                node
            }
            Slot::Vacant => panic!("node {id:?} released twice"),
        }
    }

    /// Drops every data slot, leaving only an unlinked sentinel.
    pub(crate) fn reset(&mut self) {
        self.slots.truncate(1);
        self.free.clear();
        self[NodeId::SENTINEL] = Node::sentinel();
    }

    /// Makes `parent` point to `new` in the child slot currently holding `old`.
    ///
    /// Panics if `old` is not a child of `parent`.
    pub(crate) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: Option<NodeId>) {
        let p = &mut self[parent];
        if p.left == Some(old) {
            p.left = new;
        } else {
            assert_eq!(p.right, Some(old), "{old:?} is not a child of {parent:?}");
            p.right = new;
        }
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, child: Option<NodeId>, parent: NodeId) {
        if let Some(child) = child {
            self[child].parent = parent;
        }
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        match &self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("access to released node {id:?}"),
        }
    }
}

impl IndexMut<NodeId> for Arena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.slots[id.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant => panic!("access to released node {id:?}"),
        }
    }
}
