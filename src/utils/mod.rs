/*!
# Utilities

Storage building blocks of [`Graph`](crate::repr::Graph):
- [`Chain`](chain::Chain): an intrusive doubly-linked list over ids whose links live in a shared
  table, used for rotations and for the node and edge lists,
- [`Slots`](slots::Slots): an id-indexed arena holding one record and one link per id.

You probably do not need to interact with this module directly.
*/

pub mod chain;
pub mod slots;

pub use chain::{Chain, ChainIter, Link};
pub use slots::Slots;
