use super::*;

/// Genus of the embedding given by the rotations of a graph
pub trait Genus: AdjacencyList {
    /// Number of face cycles, i.e. orbits of [`AdjacencyList::face_cycle_succ`]
    fn number_of_face_cycles(&self) -> usize {
        let mut visited = vec![false; self.adj_index_bound()];
        let mut faces = 0;

        for e in self.edges() {
            for start in [self.adj_source(e), self.adj_target(e)] {
                if visited[start.index()] {
                    continue;
                }

                faces += 1;
                let mut adj = start;
                loop {
                    visited[adj.index()] = true;
                    adj = self.face_cycle_succ(adj);
                    if adj == start {
                        break;
                    }
                }
            }
        }

        faces
    }

    /// Evaluates `(m - n - isolated - faces + 2 * components) / 2`.
    ///
    /// The value is only meaningful if the rotations describe an embedding; for arbitrary
    /// rotations it is merely the result of the formula. Returns `0` for the empty graph.
    fn genus(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }

        let m = self.number_of_edges() as i64;
        let n = self.number_of_nodes() as i64;
        let isolated = self.number_of_isolated_nodes() as i64;
        let faces = self.number_of_face_cycles() as i64;
        let components = CCsInfo::new(self).number_of_components() as i64;

        (m - n - isolated - faces + 2 * components) / 2
    }
}

impl<G: AdjacencyList> Genus for G {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn triangle() {
        let mut graph = Graph::new();
        let nodes = (0..3).map(|_| graph.new_node()).collect_vec();
        for i in 0..3 {
            graph.new_edge(nodes[i], nodes[(i + 1) % 3]);
        }

        assert_eq!(graph.number_of_face_cycles(), 2);
        assert_eq!(graph.genus(), 0);
    }

    #[test]
    fn trivial_graphs() {
        let mut graph = Graph::new();
        assert_eq!(graph.genus(), 0);

        let v = graph.new_node();
        graph.new_node();
        assert_eq!(graph.genus(), 0);

        graph.new_edge(v, v);
        assert_eq!(graph.number_of_face_cycles(), 2);
        assert_eq!(graph.genus(), 0);
    }

    #[test]
    fn k4_embeddings() {
        let mut graph = Graph::new();
        let nodes = (0..4).map(|_| graph.new_node()).collect_vec();
        for (i, j) in (0..4).tuple_combinations() {
            graph.new_edge(nodes[i], nodes[j]);
        }

        // rotations in creation order yield only two face cycles
        assert_eq!(graph.number_of_face_cycles(), 2);
        assert_eq!(graph.genus(), 1);

        // mirroring keeps the genus
        graph.reverse_all_adj_edges();
        assert_eq!(graph.genus(), 1);
    }
}
