use std::ops::Range;

use super::*;

/// Nodes and edges of a graph grouped by connected component (ignoring edge directions).
///
/// Component `i` owns the nodes `nodes()[start_node(i)..stop_node(i)]` and the edges
/// `edges()[start_edge(i)..stop_edge(i)]`; every visible edge is listed exactly once.
/// Components are numbered in the order of their first node in the node list.
#[derive(Debug, Clone)]
pub struct CCsInfo {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_starts: Vec<usize>,
    edge_starts: Vec<usize>,
    component: Vec<usize>,
}

impl CCsInfo {
    /// Computes the components of `graph` with an explicit-stack DFS
    pub fn new<G: AdjacencyList>(graph: &G) -> Self {
        let mut info = Self {
            nodes: Vec::with_capacity(graph.len()),
            edges: Vec::with_capacity(graph.number_of_edges() as usize),
            node_starts: vec![0],
            edge_starts: vec![0],
            component: vec![usize::MAX; graph.node_index_bound()],
        };

        let mut stack = Vec::new();
        for root in graph.nodes() {
            if info.component[root.index()] != usize::MAX {
                continue;
            }

            let cc = info.node_starts.len() - 1;
            info.component[root.index()] = cc;
            stack.push(root);

            while let Some(v) = stack.pop() {
                info.nodes.push(v);
                for adj in graph.adj_entries(v) {
                    // the even half-edge of every edge lies in exactly one rotation
                    if adj.is_even() {
                        info.edges.push(adj.edge());
                    }

                    let w = graph.twin_node(adj);
                    if info.component[w.index()] == usize::MAX {
                        info.component[w.index()] = cc;
                        stack.push(w);
                    }
                }
            }

            info.node_starts.push(info.nodes.len());
            info.edge_starts.push(info.edges.len());
        }

        info
    }

    /// Number of connected components (isolated nodes count as components)
    pub fn number_of_components(&self) -> usize {
        self.node_starts.len() - 1
    }

    /// All nodes, grouped by component
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges, grouped by component
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Index of the first node of component `cc` in [`CCsInfo::nodes`]
    pub fn start_node(&self, cc: usize) -> usize {
        self.node_starts[cc]
    }

    /// Index one past the last node of component `cc`
    pub fn stop_node(&self, cc: usize) -> usize {
        self.node_starts[cc + 1]
    }

    /// Index of the first edge of component `cc` in [`CCsInfo::edges`]
    pub fn start_edge(&self, cc: usize) -> usize {
        self.edge_starts[cc]
    }

    /// Index one past the last edge of component `cc`
    pub fn stop_edge(&self, cc: usize) -> usize {
        self.edge_starts[cc + 1]
    }

    pub fn node_range(&self, cc: usize) -> Range<usize> {
        self.start_node(cc)..self.stop_node(cc)
    }

    pub fn edge_range(&self, cc: usize) -> Range<usize> {
        self.start_edge(cc)..self.stop_edge(cc)
    }

    /// Nodes of component `cc`.
    /// ** Panics if `cc >= number_of_components()` **
    pub fn nodes_of(&self, cc: usize) -> &[Node] {
        &self.nodes[self.node_range(cc)]
    }

    /// Edges of component `cc`.
    /// ** Panics if `cc >= number_of_components()` **
    pub fn edges_of(&self, cc: usize) -> &[Edge] {
        &self.edges[self.edge_range(cc)]
    }

    /// The `i`-th node of the grouped node order
    pub fn node(&self, i: usize) -> Node {
        self.nodes[i]
    }

    /// The `i`-th edge of the grouped edge order
    pub fn edge(&self, i: usize) -> Edge {
        self.edges[i]
    }

    /// Component of `v`, or `None` if `v` was not a node when the partition was computed
    pub fn component_of(&self, v: Node) -> Option<usize> {
        self.component
            .get(v.index())
            .copied()
            .filter(|&cc| cc != usize::MAX)
    }
}

/// Connectivity queries available on every graph
pub trait Components: AdjacencyList {
    /// Computes the [`CCsInfo`] of the graph
    fn ccs_info(&self) -> CCsInfo {
        CCsInfo::new(self)
    }

    fn number_of_connected_components(&self) -> usize {
        self.ccs_info().number_of_components()
    }

    /// Returns *true* if the graph has at most one connected component
    fn is_connected(&self) -> bool {
        self.number_of_connected_components() <= 1
    }
}

impl<G: AdjacencyList> Components for G {}
