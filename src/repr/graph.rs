use std::{
    fmt::{Debug, Display},
    sync::{Arc, Mutex},
};

use itertools::Itertools;

use super::{
    table::{IdTable, MIN_EDGE_TABLE_SIZE, MIN_NODE_TABLE_SIZE},
    *,
};
use crate::{
    node::RawId,
    registry::{GraphObserver, Registration, Registry, TableKind, TableListener, lock},
    utils::{chain::Chain, slots::Slots},
};

#[derive(Debug, Clone, Default)]
pub(crate) struct NodeData {
    pub indeg: NumEdges,
    pub outdeg: NumEdges,
    pub rotation: Chain,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeData {
    pub source: Node,
    pub target: Node,
    pub adj_src: AdjEntry,
    pub adj_tgt: AdjEntry,
    pub hidden: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct AdjData {
    pub node: Node,
}

/// A dynamic directed multigraph whose nodes carry an ordered rotation of half-edges.
///
/// Nodes, edges and half-edges are referred to by [`Node`], [`Edge`] and [`AdjEntry`] handles;
/// the records behind them live in id-indexed arenas owned by the graph. Read access goes through
/// the traits in [`ops`](crate::ops), edits through the methods in this module.
///
/// Auxiliary arrays ([`NodeArray`](crate::registry::NodeArray), ...) and
/// [`GraphObserver`]s subscribe to a graph and are kept in sync with every edit.
pub struct Graph {
    pub(crate) node_slots: Slots<NodeData>,
    pub(crate) edge_slots: Slots<EdgeData>,
    pub(crate) adj_slots: Slots<AdjData>,
    pub(crate) node_list: Chain,
    pub(crate) edge_list: Chain,
    pub(crate) hidden_list: Chain,
    pub(crate) node_ids: IdTable,
    pub(crate) edge_ids: IdTable,
    pub(crate) registry: Registry,
    pub(crate) consistency_checks: bool,
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            node_slots: Slots::default(),
            edge_slots: Slots::default(),
            adj_slots: Slots::default(),
            node_list: Chain::default(),
            edge_list: Chain::default(),
            hidden_list: Chain::default(),
            node_ids: IdTable::new(MIN_NODE_TABLE_SIZE),
            edge_ids: IdTable::new(MIN_EDGE_TABLE_SIZE),
            registry: Registry::default(),
            consistency_checks: false,
        }
    }
}

impl Graph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the full consistency check after bulk operations
    /// (`clear`, `assign`, `construct*`, `reverse_all_edges`) and complex edits
    /// (`split`, `unsplit`, `contract`, `split_node`). Each check costs `O(n + m)`.
    pub fn with_consistency_checks(mut self, enabled: bool) -> Self {
        self.consistency_checks = enabled;
        self
    }

    /// Setter for [`Graph::with_consistency_checks`]
    pub fn set_consistency_checks(&mut self, enabled: bool) {
        self.consistency_checks = enabled;
    }

    pub fn consistency_checks_enabled(&self) -> bool {
        self.consistency_checks
    }

    /// Size every registered node array provides
    pub fn node_table_size(&self) -> usize {
        self.node_ids.table_size()
    }

    /// Size every registered edge array provides
    pub fn edge_table_size(&self) -> usize {
        self.edge_ids.table_size()
    }

    /// Size every registered half-edge array provides (always twice the edge table size)
    pub fn adj_entry_table_size(&self) -> usize {
        self.edge_ids.table_size() << 1
    }

    /// Largest node id handed out so far
    pub fn max_node_index(&self) -> Option<RawId> {
        self.node_ids.id_count().checked_sub(1)
    }

    /// Largest edge id handed out so far
    pub fn max_edge_index(&self) -> Option<RawId> {
        self.edge_ids.id_count().checked_sub(1)
    }

    /// Largest half-edge id handed out so far
    pub fn max_adj_entry_index(&self) -> Option<RawId> {
        self.max_edge_index().map(|e| (e << 1) | 1)
    }

    /// Returns *true* if `e` is currently hidden.
    /// ** Panics if `e` does not exist **
    pub fn is_hidden(&self, e: Edge) -> bool {
        self.edge(e).hidden
    }

    /// Number of currently hidden edges
    pub fn number_of_hidden_edges(&self) -> NumEdges {
        self.hidden_list.len()
    }

    /// Returns an iterator over the hidden edges in the order they were hidden
    pub fn hidden_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.hidden_list.iter(&self.edge_slots.links).map(Edge)
    }

    /// Registers an auxiliary table of the given kind. The table is immediately expected to
    /// provide the current table size of that kind.
    pub fn register_table(&self, kind: TableKind, table: Arc<dyn TableListener>) -> Registration {
        self.registry.register_table(kind, table)
    }

    /// Registers a structural observer; it is notified after all previously registered ones
    pub fn register_observer<O>(&self, observer: Arc<Mutex<O>>) -> Registration
    where
        O: GraphObserver + Send + 'static,
    {
        self.registry.register_observer(observer)
    }

    pub fn number_of_registered_tables(&self, kind: TableKind) -> usize {
        self.registry.number_of_tables(kind)
    }

    pub fn number_of_registered_observers(&self) -> usize {
        self.registry.number_of_observers()
    }

    /// Tells all observers to re-derive their state from scratch
    pub fn reinit_structures(&self) {
        self.notify(|obs, graph| obs.reinit(graph));
    }

    pub(crate) fn notify(&self, event: impl Fn(&mut dyn GraphObserver, &Graph)) {
        for observer in self.registry.observers() {
            event(&mut *lock(&observer), self);
        }
    }

    pub(crate) fn node(&self, v: Node) -> &NodeData {
        &self.node_slots[v.0]
    }

    pub(crate) fn node_mut(&mut self, v: Node) -> &mut NodeData {
        &mut self.node_slots[v.0]
    }

    pub(crate) fn edge(&self, e: Edge) -> &EdgeData {
        &self.edge_slots[e.0]
    }

    pub(crate) fn edge_mut(&mut self, e: Edge) -> &mut EdgeData {
        &mut self.edge_slots[e.0]
    }

    /// Asserts the full consistency check if it is enabled
    pub(crate) fn check_if_enabled(&self) {
        if !self.consistency_checks {
            return;
        }
        if let Err(err) = self.check_consistency() {
            panic!("graph consistency violated: {err}");
        }
    }
}

impl GraphNodeOrder for Graph {
    fn number_of_nodes(&self) -> NumNodes {
        self.node_list.len()
    }

    fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.node_list.iter(&self.node_slots.links).map(Node)
    }

    fn first_node(&self) -> Option<Node> {
        self.node_list.first().map(Node)
    }

    fn last_node(&self) -> Option<Node> {
        self.node_list.last().map(Node)
    }

    fn succ_node(&self, v: Node) -> Option<Node> {
        assert!(self.contains_node(v), "{v} is not a node of this graph");
        Chain::next(&self.node_slots.links, v.0).map(Node)
    }

    fn pred_node(&self, v: Node) -> Option<Node> {
        assert!(self.contains_node(v), "{v} is not a node of this graph");
        Chain::prev(&self.node_slots.links, v.0).map(Node)
    }

    fn contains_node(&self, v: Node) -> bool {
        self.node_slots.contains(v.0)
    }

    fn node_index_bound(&self) -> usize {
        self.node_ids.id_count() as usize
    }
}

impl GraphEdgeOrder for Graph {
    fn number_of_edges(&self) -> NumEdges {
        self.edge_list.len()
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edge_list.iter(&self.edge_slots.links).map(Edge)
    }

    fn first_edge(&self) -> Option<Edge> {
        self.edge_list.first().map(Edge)
    }

    fn last_edge(&self) -> Option<Edge> {
        self.edge_list.last().map(Edge)
    }

    fn succ_edge(&self, e: Edge) -> Option<Edge> {
        assert!(self.contains_edge(e), "{e} is not an edge of this graph");
        Chain::next(&self.edge_slots.links, e.0).map(Edge)
    }

    fn pred_edge(&self, e: Edge) -> Option<Edge> {
        assert!(self.contains_edge(e), "{e} is not an edge of this graph");
        Chain::prev(&self.edge_slots.links, e.0).map(Edge)
    }

    fn contains_edge(&self, e: Edge) -> bool {
        self.edge_slots.contains(e.0)
    }

    fn edge_index_bound(&self) -> usize {
        self.edge_ids.id_count() as usize
    }
}

impl AdjacencyList for Graph {
    fn indeg(&self, v: Node) -> NumEdges {
        self.node(v).indeg
    }

    fn outdeg(&self, v: Node) -> NumEdges {
        self.node(v).outdeg
    }

    fn adj_entries(&self, v: Node) -> impl Iterator<Item = AdjEntry> + '_ {
        self.node(v).rotation.iter(&self.adj_slots.links).map(AdjEntry)
    }

    fn first_adj(&self, v: Node) -> Option<AdjEntry> {
        self.node(v).rotation.first().map(AdjEntry)
    }

    fn last_adj(&self, v: Node) -> Option<AdjEntry> {
        self.node(v).rotation.last().map(AdjEntry)
    }

    fn succ(&self, adj: AdjEntry) -> Option<AdjEntry> {
        Chain::next(&self.adj_slots.links, adj.0).map(AdjEntry)
    }

    fn pred(&self, adj: AdjEntry) -> Option<AdjEntry> {
        Chain::prev(&self.adj_slots.links, adj.0).map(AdjEntry)
    }

    fn adj_node(&self, adj: AdjEntry) -> Node {
        self.adj_slots[adj.0].node
    }

    fn source(&self, e: Edge) -> Node {
        self.edge(e).source
    }

    fn target(&self, e: Edge) -> Node {
        self.edge(e).target
    }

    fn adj_source(&self, e: Edge) -> AdjEntry {
        self.edge(e).adj_src
    }

    fn adj_target(&self, e: Edge) -> AdjEntry {
        self.edge(e).adj_tgt
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph(n={}, m={}; {})",
            self.number_of_nodes(),
            self.number_of_edges(),
            self.edges()
                .map(|e| format!("({},{})", self.source(e).id(), self.target(e).id()))
                .join(" ")
        )
    }
}

impl Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes().collect_vec())
            .field(
                "edges",
                &self
                    .edges()
                    .map(|e| (e, self.source(e), self.target(e)))
                    .collect_vec(),
            )
            .field("hidden", &self.hidden_edges().collect_vec())
            .field("node_table_size", &self.node_table_size())
            .field("edge_table_size", &self.edge_table_size())
            .finish()
    }
}

impl Drop for Graph {
    fn drop(&mut self) {
        self.restore_all_edges();
        self.registry.disconnect_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph() {
        let graph = Graph::new();
        assert!(graph.is_empty());
        assert!(graph.is_edgeless());
        assert_eq!(graph.first_node(), None);
        assert_eq!(graph.first_edge(), None);
        assert_eq!(graph.max_node_index(), None);
        assert_eq!(graph.max_adj_entry_index(), None);
        assert_eq!(graph.node_table_size(), MIN_NODE_TABLE_SIZE);
        assert_eq!(graph.adj_entry_table_size(), 2 * MIN_EDGE_TABLE_SIZE);
        assert!(!graph.consistency_checks_enabled());
        assert!(Graph::new().with_consistency_checks(true).consistency_checks_enabled());
    }

    #[test]
    fn accessors() {
        let mut graph = Graph::new();
        let [u, v, w] = [(); 3].map(|_| graph.new_node());
        let e0 = graph.new_edge(u, v);
        let e1 = graph.new_edge(v, w);
        let lp = graph.new_edge(w, w);

        assert_eq!(graph.nodes().collect_vec(), vec![u, v, w]);
        assert_eq!(graph.edges().collect_vec(), vec![e0, e1, lp]);
        assert_eq!(graph.succ_node(u), Some(v));
        assert_eq!(graph.pred_node(u), None);
        assert_eq!(graph.last_edge(), Some(lp));
        assert_eq!(graph.pred_edge(lp), Some(e1));

        assert_eq!(graph.endpoints(e0), (u, v));
        assert_eq!(graph.opposite(e1, w), v);
        assert!(graph.is_self_loop(lp));
        assert_eq!((graph.indeg(w), graph.outdeg(w)), (2, 1));
        assert_eq!(graph.degree(w), 3);

        let a = graph.adj_source(e0);
        assert_eq!(graph.adj_node(a), u);
        assert_eq!(graph.twin(a), graph.adj_target(e0));
        assert_eq!(graph.twin_node(a), v);
        assert_eq!(graph.adj_edge(a), e0);
        assert!(graph.is_source_side(a));

        assert_eq!(graph.neighbors_of(v).collect_vec(), vec![u, w]);
        assert_eq!(graph.out_edges_of(v).collect_vec(), vec![e1]);
        assert_eq!(graph.in_edges_of(w).collect_vec(), vec![e1, lp]);

        assert_eq!(graph.max_node_index(), Some(2));
        assert_eq!(graph.max_adj_entry_index(), Some(5));
        assert_eq!(graph.to_string(), "Graph(n=3, m=3; (0,1) (1,2) (2,2))");
    }

    #[test]
    fn cyclic_and_face_traversal() {
        let mut graph = Graph::new();
        let [u, v, w] = [(); 3].map(|_| graph.new_node());
        let e0 = graph.new_edge(u, v);
        let e1 = graph.new_edge(u, w);

        let a0 = graph.adj_source(e0);
        let a1 = graph.adj_source(e1);
        assert_eq!(graph.succ(a0), Some(a1));
        assert_eq!(graph.succ(a1), None);
        assert_eq!(graph.cyclic_succ(a1), a0);
        assert_eq!(graph.cyclic_pred(a0), a1);

        // single half-edge rotations wrap onto themselves
        let b0 = graph.adj_target(e0);
        assert_eq!(graph.cyclic_succ(b0), b0);

        assert_eq!(graph.face_cycle_succ(a0), b0);
        assert_eq!(graph.face_cycle_succ(b0), a1);
        assert_eq!(graph.face_cycle_pred(a1), b0);
    }
}
