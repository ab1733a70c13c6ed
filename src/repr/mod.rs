/*!
# Graph Representation

[`Graph`] stores nodes, edges and half-edges in id-indexed arenas:

- Edge `k` owns the half-edges `2k` and `2k + 1`, so twins are found by flipping the lowest bit
  and a scan over the even half-edge ids visits every edge exactly once.
- The rotation of a node, the node list, the edge list and the list of hidden edges are
  index-linked chains, so insertion next to a known element and removal are `O(1)`.
- Ids are handed out sequentially by an [`IdTable`], which also maintains the *table size*
  (the next power of two above the id count, at least 16) every registered auxiliary table has
  to provide.

The edit engine lives in `edit`, whole-graph copies in `copy` and the consistency check in
`consistency`.
*/

use crate::{ops::*, *};

mod consistency;
mod copy;
mod edit;
mod graph;

pub mod table;

pub use consistency::*;
pub use copy::*;
pub use graph::*;
pub use table::{IdTable, MIN_EDGE_TABLE_SIZE, MIN_NODE_TABLE_SIZE};
