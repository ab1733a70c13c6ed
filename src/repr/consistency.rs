use itertools::Itertools;
use thiserror::Error;
use tracing::warn;

use super::*;
use crate::node::RawId;

/// First violated invariant found by [`Graph::check_consistency`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("the node list holds {listed} nodes but {stored} are stored")]
    NodeCount { listed: NumNodes, stored: NumNodes },

    #[error("the edge lists hold {listed} edges but {stored} are stored")]
    EdgeCount { listed: NumEdges, stored: NumEdges },

    #[error("the {kind} table of size {size} cannot hold id count {count}")]
    TableTooSmall {
        kind: &'static str,
        size: usize,
        count: RawId,
    },

    #[error("{kind} id {id} is not below the id count {count}")]
    IdOutOfRange {
        kind: &'static str,
        id: RawId,
        count: RawId,
    },

    #[error("{node} lists {len} half-edges but {reachable} are reachable in its rotation")]
    Rotation {
        node: Node,
        len: NumEdges,
        reachable: usize,
    },

    #[error("{adj} is in the rotation of {node} but claims to belong to {owner}")]
    WrongOwner { adj: AdjEntry, node: Node, owner: Node },

    #[error("{adj} in the rotation of {node} belongs to a missing or hidden edge")]
    DanglingAdj { adj: AdjEntry, node: Node },

    #[error(
        "{node} stores (indeg {indeg}, outdeg {outdeg}) but its rotation yields \
         (indeg {found_in}, outdeg {found_out})"
    )]
    Degree {
        node: Node,
        indeg: NumEdges,
        outdeg: NumEdges,
        found_in: NumEdges,
        found_out: NumEdges,
    },

    #[error("the half-edges of {edge} are not the twin pair it owns")]
    Twin { edge: Edge },

    #[error("{edge} should end at {expected} but its half-edge {adj} sits at {found}")]
    Endpoint {
        edge: Edge,
        adj: AdjEntry,
        expected: Node,
        found: Node,
    },

    #[error("the hidden flag of {edge} does not match the list it is in")]
    HiddenFlag { edge: Edge },

    #[error("the rotations hold {found} half-edges but there are {expected}")]
    HalfEdgeCount { found: usize, expected: usize },
}

impl Graph {
    /// Verifies all structural invariants in `O(n + m)` and reports the first violation.
    /// Never modifies the graph.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.check_ids()?;

        let mut half_edges = 0;
        for v in self.nodes() {
            let data = self.node(v);
            let len = data.rotation.len();
            let reachable = self.adj_entries(v).take(len as usize + 1).count();
            if reachable != len as usize {
                return Err(ConsistencyError::Rotation {
                    node: v,
                    len,
                    reachable,
                });
            }

            let (mut found_in, mut found_out) = (0, 0);
            for adj in self.adj_entries(v) {
                let owner = match self.adj_slots.get(adj.0) {
                    Some(adj_data) => adj_data.node,
                    None => return Err(ConsistencyError::DanglingAdj { adj, node: v }),
                };
                if owner != v {
                    return Err(ConsistencyError::WrongOwner {
                        adj,
                        node: v,
                        owner,
                    });
                }

                match self.edge_slots.get(adj.edge().0) {
                    Some(edge) if !edge.hidden && edge.adj_src == adj => found_out += 1,
                    Some(edge) if !edge.hidden && edge.adj_tgt == adj => found_in += 1,
                    _ => return Err(ConsistencyError::DanglingAdj { adj, node: v }),
                }
            }

            if (found_in, found_out) != (data.indeg, data.outdeg)
                || found_in + found_out != len
            {
                return Err(ConsistencyError::Degree {
                    node: v,
                    indeg: data.indeg,
                    outdeg: data.outdeg,
                    found_in,
                    found_out,
                });
            }
            half_edges += len as usize;
        }

        for e in self.edges() {
            self.check_edge(e, false)?;
        }
        for e in self.hidden_edges() {
            self.check_edge(e, true)?;
        }

        let expected = 2 * self.number_of_edges() as usize;
        if half_edges != expected {
            return Err(ConsistencyError::HalfEdgeCount {
                found: half_edges,
                expected,
            });
        }

        Ok(())
    }

    /// Like [`Graph::check_consistency`], but only reports (and logs) whether the graph is
    /// consistent
    pub fn consistency_check(&self) -> bool {
        match self.check_consistency() {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "graph consistency check failed");
                false
            }
        }
    }

    fn check_ids(&self) -> Result<(), ConsistencyError> {
        for (kind, ids) in [("node", &self.node_ids), ("edge", &self.edge_ids)] {
            if ids.table_size() < ids.id_count() as usize {
                return Err(ConsistencyError::TableTooSmall {
                    kind,
                    size: ids.table_size(),
                    count: ids.id_count(),
                });
            }
        }

        let node_ids = (0..self.node_slots.bound() as RawId)
            .filter(|&id| self.node_slots.contains(id))
            .collect_vec();
        let edge_ids = (0..self.edge_slots.bound() as RawId)
            .filter(|&id| self.edge_slots.contains(id))
            .collect_vec();

        for (kind, ids, count) in [
            ("node", &node_ids, self.node_ids.id_count()),
            ("edge", &edge_ids, self.edge_ids.id_count()),
        ] {
            if let Some(&id) = ids.last().filter(|&&id| id >= count) {
                return Err(ConsistencyError::IdOutOfRange { kind, id, count });
            }
        }

        let stored = node_ids.len() as NumNodes;
        let listed = self.nodes().take(node_ids.len() + 1).count() as NumNodes;
        if listed != stored || listed != self.number_of_nodes() {
            return Err(ConsistencyError::NodeCount { listed, stored });
        }

        let stored = edge_ids.len() as NumEdges;
        let listed = (self.edges().take(edge_ids.len() + 1).count()
            + self.hidden_edges().take(edge_ids.len() + 1).count()) as NumEdges;
        if listed != stored || listed != self.number_of_edges() + self.number_of_hidden_edges() {
            return Err(ConsistencyError::EdgeCount { listed, stored });
        }

        Ok(())
    }

    fn check_edge(&self, e: Edge, hidden: bool) -> Result<(), ConsistencyError> {
        let Some(data) = self.edge_slots.get(e.0) else {
            return Err(ConsistencyError::HiddenFlag { edge: e });
        };
        if data.hidden != hidden {
            return Err(ConsistencyError::HiddenFlag { edge: e });
        }

        let (even, odd) = e.halves();
        let owns = (data.adj_src, data.adj_tgt) == (even, odd)
            || (data.adj_src, data.adj_tgt) == (odd, even);
        if !owns || data.adj_src.twin() != data.adj_tgt {
            return Err(ConsistencyError::Twin { edge: e });
        }

        for (adj, expected) in [(data.adj_src, data.source), (data.adj_tgt, data.target)] {
            let Some(adj_data) = self.adj_slots.get(adj.0) else {
                return Err(ConsistencyError::Twin { edge: e });
            };
            if adj_data.node != expected {
                return Err(ConsistencyError::Endpoint {
                    edge: e,
                    adj,
                    expected,
                    found: adj_data.node,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use crate::{prelude::*, testing::random_multigraph};

    use super::ConsistencyError;

    #[test]
    fn random_graphs_are_consistent() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);
        for (n, m) in [(0, 0), (1, 3), (30, 100), (100, 50)] {
            let graph = random_multigraph(rng, n, m, true);
            assert_eq!(graph.check_consistency(), Ok(()));
        }
    }

    #[test]
    fn check_is_read_only() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);
        let mut graph = random_multigraph(rng, 20, 50, true);
        let e = graph.first_edge().unwrap();
        graph.hide_edge(e);

        let before = format!("{graph:?}");
        for _ in 0..3 {
            assert!(graph.consistency_check());
        }
        assert_eq!(format!("{graph:?}"), before);
        assert!(graph.is_hidden(e));
    }

    #[test]
    fn detects_broken_degrees() {
        let mut graph = Graph::new();
        let [u, v] = [(); 2].map(|_| graph.new_node());
        graph.new_edge(u, v);
        graph.node_mut(v).indeg += 1;

        assert!(matches!(
            graph.check_consistency(),
            Err(ConsistencyError::Degree { node, found_in: 1, .. }) if node == v
        ));
        assert!(!graph.consistency_check());
        graph.node_mut(v).indeg -= 1;
    }

    #[test]
    fn detects_broken_endpoints() {
        let mut graph = Graph::new();
        let [u, v] = [(); 2].map(|_| graph.new_node());
        let e = graph.new_edge(u, v);
        graph.edge_mut(e).target = u;

        assert!(matches!(
            graph.check_consistency(),
            Err(ConsistencyError::Endpoint { edge, expected, .. }) if edge == e && expected == u
        ));
        graph.edge_mut(e).target = v;
        assert!(graph.consistency_check());
    }
}
