/*!
`dyngraph` is the core of a graph library for **dynamic** directed multigraphs:
nodes and edges are inserted, deleted, moved, split, contracted and temporarily hidden while any
number of auxiliary per-node, per-edge and per-half-edge arrays stay in sync with the graph.

# Representation

Every node, edge and **half-edge** (the end of an edge as seen from one of its endpoints) is
addressed by a `u32` handle: [`Node`], [`Edge`] and [`AdjEntry`].
Edge `k` owns the half-edges `2k` and `2k + 1`, which are twins of each other.
The half-edges incident to a node form its **rotation**, an ordered list that algorithms on
embedded graphs may interpret cyclically (see [`AdjacencyList::face_cycle_succ`](ops::AdjacencyList::face_cycle_succ)).

Self-loops and parallel edges are allowed. A self-loop contributes one half-edge to the in- and
one to the out-degree of its node.

# Auxiliary Arrays and Observers

Ids are handed out sequentially. The graph maintains a *table size* per kind of element (a power
of two, at least 16) and every registered [`NodeArray`](registry::NodeArray),
[`EdgeArray`](registry::EdgeArray) or [`AdjEntryArray`](registry::AdjEntryArray) is grown
whenever the table size grows. Structural changes are reported to registered
[`GraphObserver`](registry::GraphObserver)s.

# Usage

- [`prelude`] includes the handles, the read traits in [`ops`], the [`Graph`](repr::Graph)
  itself, auxiliary arrays and all algorithm traits,
- [`repr`] includes the graph and its edit operations,
- [`registry`] includes auxiliary arrays, observers and the registration mechanism,
- [`algo`] includes connected components ([`CCsInfo`](algo::CCsInfo)) and the genus.

In most use-cases, `use dyngraph::prelude::*;` suffices.

```
use dyngraph::prelude::*;

let mut graph = Graph::new();
let [u, v, w] = [(); 3].map(|_| graph.new_node());
let e = graph.new_edge(u, v);
graph.new_edge(v, w);
graph.new_edge(w, u);
assert_eq!(graph.genus(), 0);

let mut weight = EdgeArray::new(&graph, 0.0f64);
weight.set(e, 2.5);

let e2 = graph.split(e);
assert_eq!(graph.number_of_nodes(), 4);
assert_eq!(weight.get(e), 2.5);
assert_eq!(weight.get(e2), 0.0);
```
*/

pub mod algo;
pub mod edge;
pub mod node;
pub mod ops;
pub mod registry;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;
pub mod utils;

pub use edge::*;
pub use node::*;

/// `dyngraph::prelude` includes the handles, the read traits, the graph, auxiliary arrays and all
/// algorithm traits.
pub mod prelude {
    pub use super::{
        algo::*,
        edge::*,
        node::*,
        ops::*,
        registry::{
            AdjEntryArray, AuxArray, EdgeArray, GraphObserver, NodeArray, Registration,
            TableKind, TableListener,
        },
        repr::*,
    };
}
