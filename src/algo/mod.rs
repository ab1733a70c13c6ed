/*!
# Graph Algorithms

Algorithms written against the read traits in [`ops`](crate::ops):

- [`CCsInfo`] partitions nodes and edges by connected component; it is the basis for
  [`Graph::construct_init_by_cc`](crate::repr::Graph::construct_init_by_cc).
- [`Genus`] evaluates Euler's formula over the face cycles of the current rotations.
*/

mod components;
mod genus;

use crate::prelude::*;

pub use components::*;
pub use genus::*;
