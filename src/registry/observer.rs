use crate::prelude::*;

/// Receives structural notifications from a [`Graph`].
///
/// Callbacks run synchronously inside the editing call, in registration order. Deletions are
/// reported *before* the element is unlinked, so the observer can still inspect its endpoints and
/// rotation. All methods default to doing nothing.
pub trait GraphObserver {
    fn node_added(&mut self, _graph: &Graph, _v: Node) {}

    fn node_deleted(&mut self, _graph: &Graph, _v: Node) {}

    fn edge_added(&mut self, _graph: &Graph, _e: Edge) {}

    fn edge_deleted(&mut self, _graph: &Graph, _e: Edge) {}

    /// The graph is about to drop all of its nodes and edges
    fn cleared(&mut self, _graph: &Graph) {}

    /// The graph was rebuilt from scratch (e.g. by `assign`); cached state must be re-derived
    fn reinit(&mut self, _graph: &Graph) {}
}
