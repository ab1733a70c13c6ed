/*!
# Node Representation

Nodes are addressed by a `u32` id that is handed out by the owning [`Graph`](crate::repr::Graph).
The handle is a thin newtype so that node ids, edge ids and half-edge ids cannot be mixed up;
all information about a node (degrees, rotation) is stored in the graph and queried through the
traits in [`ops`](crate::ops).
*/

use std::fmt::{Debug, Display};

/// Raw id type shared by all handles.
pub type RawId = u32;

/// Sentinel used for "no element" inside index-linked lists.
pub(crate) const NIL: RawId = RawId::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = u32;

/// Handle of a node. Only valid for the graph that created it and only until the node is deleted.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Node(pub(crate) RawId);

impl Node {
    /// Returns the id of the node
    pub const fn id(self) -> RawId {
        self.0
    }

    /// Returns the id of the node as `usize`, suitable for indexing id-based tables
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}
