use std::fmt::{Debug, Display};

use crate::{Node, node::RawId};

/// We limit the number of edges to `2^32 - 1` (and thus half-edges to `2^32`).
pub type NumEdges = u32;

/// Handle of an edge.
///
/// An edge with id `k` owns exactly the two half-edges `2k` and `2k + 1`, which are twins of each
/// other. Which of the two is the source-side half-edge is stored in the graph, since
/// reversing an edge swaps the roles without touching ids.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Edge(pub(crate) RawId);

/// Handle of a half-edge (adjacency entry), i.e. one end of an edge as seen from one of its
/// endpoints. Half-edges are the elements of a node's rotation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct AdjEntry(pub(crate) RawId);

impl Edge {
    /// Returns the id of the edge
    pub const fn id(self) -> RawId {
        self.0
    }

    /// Returns the id of the edge as `usize`, suitable for indexing id-based tables
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the two half-edges owned by this edge: `(2k, 2k + 1)`
    pub(crate) const fn halves(self) -> (AdjEntry, AdjEntry) {
        (AdjEntry(self.0 << 1), AdjEntry((self.0 << 1) | 1))
    }
}

impl AdjEntry {
    /// Returns the id of the half-edge
    pub const fn id(self) -> RawId {
        self.0
    }

    /// Returns the id of the half-edge as `usize`, suitable for indexing id-based tables
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other half-edge of the same edge
    pub const fn twin(self) -> AdjEntry {
        AdjEntry(self.0 ^ 1)
    }

    /// The edge this half-edge realizes
    pub const fn edge(self) -> Edge {
        Edge(self.0 >> 1)
    }

    /// Returns *true* for exactly one of the two half-edges of every edge.
    /// Scanning only these visits every edge once.
    pub const fn is_even(self) -> bool {
        self.0 & 1 == 0
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

impl Display for AdjEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a{}", self.0)
    }
}

impl Debug for AdjEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

/// Side of an anchor half-edge at which a new half-edge is inserted
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Before,
    After,
}

/// Where a half-edge is placed inside a rotation.
///
/// A [`Node`] converts into [`Position::Back`], so `graph.new_edge(u, v)` appends at both ends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Position {
    /// Append to the rotation of the node
    Back(Node),
    /// Prepend to the rotation of the node
    Front(Node),
    /// Insert directly before the given half-edge (at its node)
    Before(AdjEntry),
    /// Insert directly after the given half-edge (at its node)
    After(AdjEntry),
}

impl Position {
    /// Position next to `adj` on the given side
    pub const fn at(adj: AdjEntry, dir: Direction) -> Self {
        match dir {
            Direction::Before => Position::Before(adj),
            Direction::After => Position::After(adj),
        }
    }

    /// Returns the anchor half-edge if the position is relative to one
    pub const fn anchor(self) -> Option<AdjEntry> {
        match self {
            Position::Before(adj) | Position::After(adj) => Some(adj),
            Position::Back(_) | Position::Front(_) => None,
        }
    }
}

impl From<Node> for Position {
    fn from(value: Node) -> Self {
        Position::Back(value)
    }
}

impl From<&Node> for Position {
    fn from(value: &Node) -> Self {
        Position::Back(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twins_share_edge() {
        let e = Edge(7);
        let (src, tgt) = e.halves();
        assert_eq!(src.id(), 14);
        assert_eq!(tgt.id(), 15);
        assert_eq!(src.twin(), tgt);
        assert_eq!(tgt.twin(), src);
        assert_eq!(src.edge(), e);
        assert_eq!(tgt.edge(), e);
        assert!(src.is_even());
        assert!(!tgt.is_even());
    }

    #[test]
    fn positions() {
        let adj = AdjEntry(3);
        assert_eq!(Position::at(adj, Direction::After), Position::After(adj));
        assert_eq!(Position::at(adj, Direction::Before).anchor(), Some(adj));
        assert_eq!(Position::from(Node(2)), Position::Back(Node(2)));
        assert_eq!(Position::Front(Node(2)).anchor(), None);
    }
}
