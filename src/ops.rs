/*!
# Read Access

Traits through which algorithms query a graph. [`Graph`](crate::repr::Graph) implements all of
them; algorithms in [`algo`](crate::algo) are written against the traits only.

Handles are plain ids, so every accessor takes the handle as an argument. Accessors on elements
that do not (or no longer) exist panic.
*/

use crate::*;

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_nodes() == 0
    }

    /// Returns an iterator over all nodes in list order
    fn nodes(&self) -> impl Iterator<Item = Node> + '_;

    /// First node of the node list
    fn first_node(&self) -> Option<Node>;

    /// Last node of the node list
    fn last_node(&self) -> Option<Node>;

    /// Successor of `v` in the node list.
    /// ** Panics if `v` does not exist **
    fn succ_node(&self, v: Node) -> Option<Node>;

    /// Predecessor of `v` in the node list.
    /// ** Panics if `v` does not exist **
    fn pred_node(&self, v: Node) -> Option<Node>;

    /// Returns *true* if `v` is a node of the graph
    fn contains_node(&self, v: Node) -> bool;

    /// Strict upper bound on all node ids; tables of this size can be indexed by any node
    fn node_index_bound(&self) -> usize;
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of (visible) edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no (visible) edges
    fn is_edgeless(&self) -> bool {
        self.number_of_edges() == 0
    }

    /// Returns an iterator over all visible edges in list order
    fn edges(&self) -> impl Iterator<Item = Edge> + '_;

    fn first_edge(&self) -> Option<Edge>;

    fn last_edge(&self) -> Option<Edge>;

    /// Successor of `e` in its edge list (the hidden list for hidden edges).
    /// ** Panics if `e` does not exist **
    fn succ_edge(&self, e: Edge) -> Option<Edge>;

    /// Predecessor of `e` in its edge list (the hidden list for hidden edges).
    /// ** Panics if `e` does not exist **
    fn pred_edge(&self, e: Edge) -> Option<Edge>;

    /// Returns *true* if `e` is an edge of the graph (visible or hidden)
    fn contains_edge(&self, e: Edge) -> bool;

    /// Strict upper bound on all edge ids
    fn edge_index_bound(&self) -> usize;

    /// Strict upper bound on all half-edge ids
    fn adj_index_bound(&self) -> usize {
        self.edge_index_bound() << 1
    }
}

/// Traits pertaining getters for rotations, endpoints and half-edges
pub trait AdjacencyList: GraphNodeOrder + GraphEdgeOrder + Sized {
    /// Number of edges entering `v` (a self-loop counts once).
    /// ** Panics if `v` does not exist **
    fn indeg(&self, v: Node) -> NumEdges;

    /// Number of edges leaving `v` (a self-loop counts once).
    /// ** Panics if `v` does not exist **
    fn outdeg(&self, v: Node) -> NumEdges;

    /// Number of half-edges in the rotation of `v`
    fn degree(&self, v: Node) -> NumEdges {
        self.indeg(v) + self.outdeg(v)
    }

    /// Returns *true* if `v` has no incident (visible) edges
    fn is_isolated(&self, v: Node) -> bool {
        self.degree(v) == 0
    }

    /// Returns an iterator over the rotation of `v`
    /// ** Panics if `v` does not exist **
    fn adj_entries(&self, v: Node) -> impl Iterator<Item = AdjEntry> + '_;

    fn first_adj(&self, v: Node) -> Option<AdjEntry>;

    fn last_adj(&self, v: Node) -> Option<AdjEntry>;

    /// Successor of `adj` in the rotation of its node (no wrap-around)
    fn succ(&self, adj: AdjEntry) -> Option<AdjEntry>;

    /// Predecessor of `adj` in the rotation of its node (no wrap-around)
    fn pred(&self, adj: AdjEntry) -> Option<AdjEntry>;

    /// Successor of `adj`, continuing with the first half-edge after the last one
    fn cyclic_succ(&self, adj: AdjEntry) -> AdjEntry {
        match self.succ(adj) {
            Some(next) => next,
            None => self.first_adj(self.adj_node(adj)).unwrap_or(adj),
        }
    }

    /// Predecessor of `adj`, continuing with the last half-edge before the first one
    fn cyclic_pred(&self, adj: AdjEntry) -> AdjEntry {
        match self.pred(adj) {
            Some(prev) => prev,
            None => self.last_adj(self.adj_node(adj)).unwrap_or(adj),
        }
    }

    /// Node whose rotation contains `adj`.
    /// ** Panics if `adj` does not exist **
    fn adj_node(&self, adj: AdjEntry) -> Node;

    /// Edge realized by `adj`
    fn adj_edge(&self, adj: AdjEntry) -> Edge {
        adj.edge()
    }

    /// The other half-edge of the same edge
    fn twin(&self, adj: AdjEntry) -> AdjEntry {
        adj.twin()
    }

    /// Node at the other end of the edge of `adj`
    fn twin_node(&self, adj: AdjEntry) -> Node {
        self.adj_node(adj.twin())
    }

    /// Next half-edge on the face boundary to the right of `adj` in an embedded graph
    fn face_cycle_succ(&self, adj: AdjEntry) -> AdjEntry {
        self.cyclic_succ(adj.twin())
    }

    /// Inverse of [`AdjacencyList::face_cycle_succ`]
    fn face_cycle_pred(&self, adj: AdjEntry) -> AdjEntry {
        self.cyclic_pred(adj).twin()
    }

    /// Source of `e`.
    /// ** Panics if `e` does not exist **
    fn source(&self, e: Edge) -> Node;

    /// Target of `e`.
    /// ** Panics if `e` does not exist **
    fn target(&self, e: Edge) -> Node;

    /// Half-edge of `e` at its source
    fn adj_source(&self, e: Edge) -> AdjEntry;

    /// Half-edge of `e` at its target
    fn adj_target(&self, e: Edge) -> AdjEntry;

    /// Returns *true* if `adj` is the source-side half-edge of its edge
    fn is_source_side(&self, adj: AdjEntry) -> bool {
        self.adj_source(adj.edge()) == adj
    }

    /// Returns *true* if both endpoints of `e` coincide
    fn is_self_loop(&self, e: Edge) -> bool {
        self.source(e) == self.target(e)
    }

    /// Returns the endpoint of `e` that is not `v`.
    /// ** Panics if `v` is not an endpoint of `e` **
    fn opposite(&self, e: Edge, v: Node) -> Node {
        let (s, t) = (self.source(e), self.target(e));
        assert!(v == s || v == t, "{v} is not an endpoint of {e}");
        if v == s { t } else { s }
    }

    /// Returns the endpoints `(source, target)` of `e`
    fn endpoints(&self, e: Edge) -> (Node, Node) {
        (self.source(e), self.target(e))
    }

    /// Returns an iterator over the opposite endpoints of the rotation of `v` (with repetitions)
    fn neighbors_of(&self, v: Node) -> impl Iterator<Item = Node> + '_ {
        self.adj_entries(v).map(move |adj| self.twin_node(adj))
    }

    /// Returns an iterator over the edges leaving `v`
    fn out_edges_of(&self, v: Node) -> impl Iterator<Item = Edge> + '_ {
        self.adj_entries(v)
            .filter(move |&adj| self.is_source_side(adj))
            .map(AdjEntry::edge)
    }

    /// Returns an iterator over the edges entering `v`
    fn in_edges_of(&self, v: Node) -> impl Iterator<Item = Edge> + '_ {
        self.adj_entries(v)
            .filter(move |&adj| !self.is_source_side(adj))
            .map(AdjEntry::edge)
    }

    /// Returns the number of isolated nodes
    fn number_of_isolated_nodes(&self) -> NumNodes {
        self.nodes().filter(|&v| self.is_isolated(v)).count() as NumNodes
    }
}
