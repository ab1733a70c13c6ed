//! Shared helpers for the unit tests of this crate

use rand::Rng;

use crate::prelude::*;

/// Creates a graph with `n` nodes and `m` edges between endpoints drawn uniformly at random.
/// Without `loops`, self-loops are redrawn (which requires `n > 1` if `m > 0`).
pub(crate) fn random_multigraph<R: Rng>(rng: &mut R, n: NumNodes, m: NumEdges, loops: bool) -> Graph {
    let mut graph = Graph::new();
    let nodes: Vec<Node> = (0..n).map(|_| graph.new_node()).collect();

    for _ in 0..m {
        let u = nodes[rng.random_range(0..nodes.len())];
        let mut v = nodes[rng.random_range(0..nodes.len())];
        while !loops && u == v {
            v = nodes[rng.random_range(0..nodes.len())];
        }
        graph.new_edge(u, v);
    }

    graph
}

/// `(indeg, outdeg)` of every node in list order
pub(crate) fn degree_sequence<G: AdjacencyList>(graph: &G) -> Vec<(NumEdges, NumEdges)> {
    graph
        .nodes()
        .map(|v| (graph.indeg(v), graph.outdeg(v)))
        .collect()
}

/// Rotation of `v` as a vector
pub(crate) fn rotation<G: AdjacencyList>(graph: &G, v: Node) -> Vec<AdjEntry> {
    graph.adj_entries(v).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    NodeAdded(Node),
    NodeDeleted(Node),
    EdgeAdded(Edge),
    EdgeDeleted(Edge),
    Cleared,
    Reinit,
}

/// Observer recording every notification. Counts deletions reported for elements that are
/// already gone (or not yet linked) in `late_notifications`.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub events: Vec<Event>,
    pub late_notifications: usize,
}

impl GraphObserver for Recorder {
    fn node_added(&mut self, _graph: &Graph, v: Node) {
        self.events.push(Event::NodeAdded(v));
    }

    fn node_deleted(&mut self, graph: &Graph, v: Node) {
        if !graph.contains_node(v) || !graph.nodes().any(|u| u == v) {
            self.late_notifications += 1;
        }
        self.events.push(Event::NodeDeleted(v));
    }

    fn edge_added(&mut self, graph: &Graph, e: Edge) {
        if !graph.contains_edge(e) {
            self.late_notifications += 1;
        }
        self.events.push(Event::EdgeAdded(e));
    }

    fn edge_deleted(&mut self, graph: &Graph, e: Edge) {
        let linked = graph.contains_edge(e)
            && graph.adj_entries(graph.source(e)).any(|adj| adj == graph.adj_source(e))
            && graph.adj_entries(graph.target(e)).any(|adj| adj == graph.adj_target(e));
        if !linked {
            self.late_notifications += 1;
        }
        self.events.push(Event::EdgeDeleted(e));
    }

    fn cleared(&mut self, _graph: &Graph) {
        self.events.push(Event::Cleared);
    }

    fn reinit(&mut self, _graph: &Graph) {
        self.events.push(Event::Reinit);
    }
}
