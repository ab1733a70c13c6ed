use itertools::Itertools;
use tracing::debug;

use super::{
    graph::{AdjData, EdgeData, NodeData},
    *,
};
use crate::{
    algo::CCsInfo,
    registry::{EdgeArray, NodeArray},
};

/// Maps the nodes and edges of a source graph to their copies.
/// Both arrays are registered with the *source* graph; elements that were not copied map to `None`.
pub struct GraphMapping {
    pub nodes: NodeArray<Option<Node>>,
    pub edges: EdgeArray<Option<Edge>>,
}

impl GraphMapping {
    /// Creates an empty mapping for `source`
    pub fn new(source: &Graph) -> Self {
        Self {
            nodes: NodeArray::new(source, None),
            edges: EdgeArray::new(source, None),
        }
    }

    /// Copy of the source node `v`
    pub fn node(&self, v: Node) -> Option<Node> {
        self.nodes.get(v)
    }

    /// Copy of the source edge `e`
    pub fn edge(&self, e: Edge) -> Option<Edge> {
        self.edges.get(e)
    }
}

impl Graph {
    /// Replaces the contents of `self` by a copy of the given nodes and edges of `source`.
    /// Every edge must have both endpoints among `nodes`. Fresh ids are assigned in the order of
    /// `nodes` and `edges`; rotations follow the rotations in `source`.
    ///
    /// Subscribers are informed only once the rebuild is complete.
    fn copy_subgraph(
        &mut self,
        source: &Graph,
        nodes: &[Node],
        edges: &[Edge],
        mapping: Option<&mut GraphMapping>,
    ) {
        self.reset_storage();

        let mut node_map = vec![None; source.node_index_bound()];
        for &v in nodes {
            let id = self.node_ids.allocate_unchecked();
            self.node_slots.insert(id, NodeData::default());
            self.node_list.push_back(&mut self.node_slots.links, id);
            node_map[v.index()] = Some(Node(id));
        }

        let mut edge_map = vec![None; source.edge_index_bound()];
        for &e in edges {
            let (s, t) = source.endpoints(e);
            let (Some(s), Some(t)) = (node_map[s.index()], node_map[t.index()]) else {
                panic!("{e} leaves the set of copied nodes");
            };

            let id = self.edge_ids.allocate_unchecked();
            let copy = Edge(id);
            let (adj_src, adj_tgt) = copy.halves();
            self.adj_slots.insert(adj_src.0, AdjData { node: s });
            self.adj_slots.insert(adj_tgt.0, AdjData { node: t });
            self.edge_slots.insert(
                id,
                EdgeData {
                    source: s,
                    target: t,
                    adj_src,
                    adj_tgt,
                    hidden: false,
                },
            );
            self.edge_list.push_back(&mut self.edge_slots.links, id);
            edge_map[e.index()] = Some(copy);
        }

        // the first half-edge of a self-loop met in the rotation becomes its source side
        let mut loop_seen = vec![false; source.edge_index_bound()];
        for &v in nodes {
            let Some(copy_v) = node_map[v.index()] else {
                continue;
            };

            for adj in source.adj_entries(v) {
                let e = adj.edge();
                let Some(copy_e) = edge_map[e.index()] else {
                    continue;
                };

                let outgoing = if source.is_self_loop(e) {
                    !std::mem::replace(&mut loop_seen[e.index()], true)
                } else {
                    source.is_source_side(adj)
                };

                let data = self.edge(copy_e);
                let half = if outgoing { data.adj_src } else { data.adj_tgt };
                let node = &mut self.node_slots[copy_v.0];
                node.rotation.push_back(&mut self.adj_slots.links, half.0);
                if outgoing {
                    node.outdeg += 1;
                } else {
                    node.indeg += 1;
                }
            }
        }

        if let Some(mapping) = mapping {
            mapping.nodes.fill(None);
            mapping.edges.fill(None);
            for &v in nodes {
                mapping.nodes.set(v, node_map[v.index()]);
            }
            for &e in edges {
                mapping.edges.set(e, edge_map[e.index()]);
            }
        }

        self.finish_rebuild();
    }

    /// Fits the table sizes to the new id counts, reinitializes all registered tables and
    /// tells the observers to reinitialize
    fn finish_rebuild(&mut self) {
        let node_size = self.node_ids.fit();
        let edge_size = self.edge_ids.fit();
        debug!(
            nodes = self.number_of_nodes(),
            edges = self.number_of_edges(),
            node_size,
            edge_size,
            "rebuilt graph"
        );

        self.registry.reinit(node_size, edge_size);
        self.reinit_structures();
        self.check_if_enabled();
    }

    /// Replaces `self` by a copy of `source` (without its hidden edges)
    pub fn assign(&mut self, source: &Graph) {
        let nodes = source.nodes().collect_vec();
        let edges = source.edges().collect_vec();
        self.copy_subgraph(source, &nodes, &edges, None);
    }

    /// Like [`Graph::assign`] but returns where each element of `source` ended up
    pub fn assign_with_mapping(&mut self, source: &Graph) -> GraphMapping {
        let mut mapping = GraphMapping::new(source);
        self.construct(source, &mut mapping);
        mapping
    }

    /// Replaces `self` by a copy of `source` and records the copies in `mapping`, which has to
    /// be created for `source`
    pub fn construct(&mut self, source: &Graph, mapping: &mut GraphMapping) {
        let nodes = source.nodes().collect_vec();
        let edges = source.edges().collect_vec();
        self.copy_subgraph(source, &nodes, &edges, Some(mapping));
    }

    /// Replaces `self` by the connected component `cc` of `source`, as computed by `info`
    /// ** Panics if `cc` is out of range **
    pub fn construct_init_by_cc(
        &mut self,
        source: &Graph,
        info: &CCsInfo,
        cc: usize,
    ) -> GraphMapping {
        let mut mapping = GraphMapping::new(source);
        self.copy_subgraph(source, info.nodes_of(cc), info.edges_of(cc), Some(&mut mapping));
        mapping
    }

    /// Replaces `self` by the subgraph of `source` consisting of `nodes` and all of their
    /// incident edges. `nodes` must be closed under adjacency (e.g. a union of components).
    pub fn construct_init_by_nodes(&mut self, source: &Graph, nodes: &[Node]) -> GraphMapping {
        let edges = nodes
            .iter()
            .flat_map(|&v| source.adj_entries(v))
            .filter(|adj| adj.is_even())
            .map(AdjEntry::edge)
            .collect_vec();

        let mut mapping = GraphMapping::new(source);
        self.copy_subgraph(source, nodes, &edges, Some(&mut mapping));
        mapping
    }

    /// Replaces `self` by the subgraph of `source` induced by `nodes` filtered by `active`
    pub fn construct_init_by_active_nodes(
        &mut self,
        source: &Graph,
        nodes: &[Node],
        active: &NodeArray<bool>,
    ) -> GraphMapping {
        let (nodes, edges) = {
            let active = active.lock();
            let nodes = nodes.iter().copied().filter(|&v| active[v]).collect_vec();
            let edges = nodes
                .iter()
                .flat_map(|&v| source.out_edges_of(v))
                .filter(|&e| active[source.target(e)])
                .collect_vec();
            (nodes, edges)
        };

        let mut mapping = GraphMapping::new(source);
        self.copy_subgraph(source, &nodes, &edges, Some(&mut mapping));
        mapping
    }
}

impl Clone for Graph {
    fn clone(&self) -> Self {
        let mut graph = Graph::new().with_consistency_checks(self.consistency_checks);
        graph.assign(self);
        graph
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use crate::{
        prelude::*,
        testing::{Event, Recorder, degree_sequence, random_multigraph, rotation},
    };

    #[test]
    fn copy_preserves_degrees() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for (n, m) in [(1, 0), (10, 30), (50, 200), (100, 150)] {
            let source = random_multigraph(rng, n, m, true);
            let copy = source.clone();

            assert!(copy.consistency_check());
            assert_eq!(copy.number_of_nodes(), source.number_of_nodes());
            assert_eq!(copy.number_of_edges(), source.number_of_edges());
            assert_eq!(degree_sequence(&copy), degree_sequence(&source));
        }
    }

    #[test]
    fn mapping_follows_rotations() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);
        let mut source = random_multigraph(rng, 20, 60, true);
        // punch holes into the id ranges
        for _ in 0..5 {
            let v = source.choose_node(rng).unwrap();
            source.del_node(v);
        }

        let mut copy = Graph::new();
        let mapping = copy.assign_with_mapping(&source);

        for v in source.nodes() {
            let image = mapping.node(v).unwrap();
            let mapped = rotation(&source, v)
                .into_iter()
                .map(|adj| mapping.edge(adj.edge()).unwrap())
                .collect_vec();
            assert_eq!(
                rotation(&copy, image)
                    .into_iter()
                    .map(AdjEntry::edge)
                    .collect_vec(),
                mapped
            );
        }
        for e in source.edges() {
            let image = mapping.edge(e).unwrap();
            let (s, t) = source.endpoints(e);
            assert_eq!(
                copy.endpoints(image),
                (mapping.node(s).unwrap(), mapping.node(t).unwrap())
            );
        }
        assert_eq!(copy.max_node_index(), Some(source.number_of_nodes() - 1));
    }

    #[test]
    fn self_loop_tie_break() {
        let mut source = Graph::new();
        let v = source.new_node();
        let e = source.new_edge(v, v);
        // the target half comes first in the rotation
        source.reverse_adj_edges(v);

        let copy = source.clone();
        let f = copy.first_edge().unwrap();
        let v2 = copy.first_node().unwrap();
        assert_eq!(rotation(&copy, v2), vec![copy.adj_source(f), copy.adj_target(f)]);
        assert_eq!((copy.indeg(v2), copy.outdeg(v2)), (1, 1));
        assert!(source.contains_edge(e));
    }

    #[test]
    fn rebuild_reinitializes_subscribers() {
        let mut source = Graph::new();
        let [u, v] = [(); 2].map(|_| source.new_node());
        source.new_edge(u, v);

        let mut target = Graph::new();
        for _ in 0..40 {
            target.new_node();
        }
        let mut labels = NodeArray::new(&target, 0u8);
        labels.set(Node(3), 1);
        let recorder = Arc::new(Mutex::new(Recorder::default()));
        let _registration = target.register_observer(recorder.clone());

        target.assign(&source);
        assert_eq!(target.node_table_size(), MIN_NODE_TABLE_SIZE);
        assert_eq!(labels.capacity(), MIN_NODE_TABLE_SIZE);
        assert_eq!(labels.get(Node(3)), 0);
        assert_eq!(recorder.lock().unwrap().events, vec![Event::Reinit]);
    }

    #[test]
    fn component_copy() {
        let mut source = Graph::new();
        let a = (0..3).map(|_| source.new_node()).collect_vec();
        let b = (0..4).map(|_| source.new_node()).collect_vec();
        for i in 0..3 {
            source.new_edge(a[i], a[(i + 1) % 3]);
        }
        for i in 0..3 {
            source.new_edge(b[i], b[i + 1]);
        }
        source.new_edge(b[0], b[0]);

        let info = CCsInfo::new(&source);
        let mut copy = Graph::new().with_consistency_checks(true);
        let cc = (0..info.number_of_components())
            .find(|&cc| info.nodes_of(cc).contains(&b[0]))
            .unwrap();
        let mapping = copy.construct_init_by_cc(&source, &info, cc);

        assert_eq!(copy.number_of_nodes(), 4);
        assert_eq!(copy.number_of_edges(), 4);
        assert_eq!(mapping.node(a[0]), None);
        assert_eq!(copy.node_index_bound(), 4);
        let loop_copy = copy.edges().find(|&e| copy.is_self_loop(e)).unwrap();
        assert_eq!(copy.source(loop_copy), mapping.node(b[0]).unwrap());

        let mapping = copy.construct_init_by_nodes(&source, &a);
        assert_eq!(copy.number_of_nodes(), 3);
        assert_eq!(copy.number_of_edges(), 3);
        assert_eq!(degree_sequence(&copy), vec![(1, 1); 3]);
        assert!(mapping.node(a[2]).is_some());
    }

    #[test]
    fn induced_subgraph() {
        let rng = &mut Pcg64Mcg::seed_from_u64(9);
        let source = random_multigraph(rng, 30, 120, true);

        let mut active = NodeArray::new(&source, false);
        let nodes = source.nodes().collect_vec();
        for &v in nodes.iter().step_by(2) {
            active.set(v, true);
        }

        let mut copy = Graph::new();
        let mapping = copy.construct_init_by_active_nodes(&source, &nodes, &active);
        assert!(copy.consistency_check());
        assert_eq!(copy.number_of_nodes(), 15);

        let induced = source
            .edges()
            .filter(|&e| active.get(source.source(e)) && active.get(source.target(e)))
            .collect_vec();
        assert_eq!(copy.number_of_edges() as usize, induced.len());
        for e in induced {
            assert!(mapping.edge(e).is_some());
        }
    }
}
