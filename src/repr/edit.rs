/*!
# Edit Engine

All structural modifications of a [`Graph`]. Every public method leaves the graph consistent
(twin linkage, rotations, degree counters and list sizes agree) and keeps all registered tables
at the current table sizes. Contract violations (stale handles, anchors at the wrong node,
invalid merges) panic.
*/

use fxhash::FxHashSet;
use rand::Rng;
use tracing::debug;

use super::{
    graph::{AdjData, EdgeData, NodeData},
    *,
};
use crate::{node::RawId, registry::TableKind};

impl Graph {
    fn allocate_node_id(&mut self, id: Option<RawId>) -> RawId {
        let (id, grown) = match id {
            None => self.node_ids.allocate(),
            Some(id) => {
                debug_assert!(!self.node_slots.contains(id), "node id {id} is already in use");
                (id, self.node_ids.claim(id))
            }
        };

        if let Some(size) = grown {
            debug!(kind = "node", size, "growing tables");
            self.registry.enlarge(TableKind::Node, size);
        }
        id
    }

    fn allocate_edge_id(&mut self, id: Option<RawId>) -> RawId {
        let (id, grown) = match id {
            None => self.edge_ids.allocate(),
            Some(id) => {
                debug_assert!(!self.edge_slots.contains(id), "edge id {id} is already in use");
                (id, self.edge_ids.claim(id))
            }
        };

        if let Some(size) = grown {
            debug!(kind = "edge", size, "growing tables");
            self.registry.enlarge(TableKind::Edge, size);
            self.registry.enlarge(TableKind::AdjEntry, size << 1);
        }
        id
    }

    /// Node a position refers to.
    /// ** Panics if the node or anchor does not exist or the anchor is hidden **
    fn position_node(&self, pos: Position) -> Node {
        match pos {
            Position::Back(v) | Position::Front(v) => {
                assert!(self.contains_node(v), "{v} is not a node of this graph");
                v
            }
            Position::Before(anchor) | Position::After(anchor) => {
                assert!(
                    !self.edge(anchor.edge()).hidden,
                    "{anchor} belongs to a hidden edge"
                );
                self.adj_node(anchor)
            }
        }
    }

    /// Links the (unlinked) half-edge `adj` into a rotation and returns the node it now belongs to
    fn link_adj(&mut self, adj: AdjEntry, pos: Position) -> Node {
        let v = self.position_node(pos);
        self.adj_slots[adj.0].node = v;

        let links = &mut self.adj_slots.links;
        let rotation = &mut self.node_slots[v.0].rotation;
        match pos {
            Position::Back(_) => rotation.push_back(links, adj.0),
            Position::Front(_) => rotation.push_front(links, adj.0),
            Position::Before(anchor) => rotation.insert_before(links, adj.0, anchor.0),
            Position::After(anchor) => rotation.insert_after(links, adj.0, anchor.0),
        }
        v
    }

    /// Removes `adj` from the rotation of its node and returns that node
    fn unlink_adj(&mut self, adj: AdjEntry) -> Node {
        let v = self.adj_node(adj);
        self.node_slots[v.0]
            .rotation
            .unlink(&mut self.adj_slots.links, adj.0);
        v
    }

    fn change_degree(&mut self, v: Node, outgoing: bool, delta: i32) {
        let data = self.node_mut(v);
        let deg = if outgoing {
            &mut data.outdeg
        } else {
            &mut data.indeg
        };
        *deg = deg.wrapping_add_signed(delta);
    }

    fn assert_visible(&self, e: Edge) {
        assert!(!self.edge(e).hidden, "{e} is hidden");
    }

    /// Creates a new isolated node at the end of the node list
    pub fn new_node(&mut self) -> Node {
        self.create_node(None)
    }

    /// Creates a new isolated node with the given id.
    /// The id must not be in use; the id counter advances past it.
    pub fn new_node_with_id(&mut self, id: RawId) -> Node {
        self.create_node(Some(id))
    }

    fn create_node(&mut self, id: Option<RawId>) -> Node {
        let id = self.allocate_node_id(id);
        self.node_slots.insert(id, NodeData::default());
        self.node_list.push_back(&mut self.node_slots.links, id);

        let v = Node(id);
        self.notify(|obs, graph| obs.node_added(graph, v));
        v
    }

    /// Creates a new edge at the end of the edge list. Source and target are either nodes
    /// (appending the new half-edges to their rotations) or [`Position`]s inside a rotation.
    /// ```
    /// use dyngraph::prelude::*;
    ///
    /// let mut graph = Graph::new();
    /// let (u, v) = (graph.new_node(), graph.new_node());
    /// let e0 = graph.new_edge(u, v);
    /// let e1 = graph.new_edge(Position::Before(graph.adj_source(e0)), v);
    /// assert_eq!(graph.first_adj(u), Some(graph.adj_source(e1)));
    /// ```
    pub fn new_edge(&mut self, source: impl Into<Position>, target: impl Into<Position>) -> Edge {
        self.create_edge(source.into(), target.into(), None)
    }

    /// Like [`Graph::new_edge`] but with an explicit id, which must not be in use
    pub fn new_edge_with_id(
        &mut self,
        source: impl Into<Position>,
        target: impl Into<Position>,
        id: RawId,
    ) -> Edge {
        self.create_edge(source.into(), target.into(), Some(id))
    }

    fn create_edge(&mut self, source: Position, target: Position, id: Option<RawId>) -> Edge {
        let s = self.position_node(source);
        let t = self.position_node(target);

        let e = Edge(self.allocate_edge_id(id));
        let (adj_src, adj_tgt) = e.halves();
        self.adj_slots.insert(adj_src.0, AdjData { node: s });
        self.adj_slots.insert(adj_tgt.0, AdjData { node: t });
        self.edge_slots.insert(
            e.0,
            EdgeData {
                source: s,
                target: t,
                adj_src,
                adj_tgt,
                hidden: false,
            },
        );
        self.edge_list.push_back(&mut self.edge_slots.links, e.0);

        self.link_adj(adj_src, source);
        self.link_adj(adj_tgt, target);
        self.node_mut(s).outdeg += 1;
        self.node_mut(t).indeg += 1;

        self.notify(|obs, graph| obs.edge_added(graph, e));
        e
    }

    /// Deletes `v` together with all of its incident edges. Observers learn about the node
    /// first, then about every incident edge.
    /// ** Panics if `v` does not exist or has hidden incident edges **
    pub fn del_node(&mut self, v: Node) {
        assert!(self.contains_node(v), "{v} is not a node of this graph");
        assert!(
            self.hidden_edges()
                .all(|e| self.source(e) != v && self.target(e) != v),
            "{v} has hidden incident edges"
        );

        self.notify(|obs, graph| obs.node_deleted(graph, v));
        while let Some(adj) = self.first_adj(v) {
            self.del_edge(adj.edge());
        }

        self.node_list.unlink(&mut self.node_slots.links, v.0);
        self.node_slots.remove(v.0);
    }

    /// Deletes `e`, which may also be hidden.
    /// ** Panics if `e` does not exist **
    pub fn del_edge(&mut self, e: Edge) {
        assert!(self.contains_edge(e), "{e} is not an edge of this graph");
        self.notify(|obs, graph| obs.edge_deleted(graph, e));

        let data = self.edge_slots.remove(e.0);
        if data.hidden {
            self.hidden_list.unlink(&mut self.edge_slots.links, e.0);
        } else {
            self.edge_list.unlink(&mut self.edge_slots.links, e.0);
            self.unlink_adj(data.adj_src);
            self.unlink_adj(data.adj_tgt);
            self.node_mut(data.source).outdeg -= 1;
            self.node_mut(data.target).indeg -= 1;
        }
        self.adj_slots.remove(data.adj_src.0);
        self.adj_slots.remove(data.adj_tgt.0);
    }

    /// Removes `e` from the edge list and the rotations of its endpoints, keeping its ids and
    /// endpoints for [`Graph::restore_edge`].
    /// ** Panics if `e` does not exist or is already hidden **
    pub fn hide_edge(&mut self, e: Edge) {
        self.assert_visible(e);
        let data = self.edge(e).clone();

        self.unlink_adj(data.adj_src);
        self.unlink_adj(data.adj_tgt);
        self.node_mut(data.source).outdeg -= 1;
        self.node_mut(data.target).indeg -= 1;

        self.edge_list.unlink(&mut self.edge_slots.links, e.0);
        self.hidden_list.push_back(&mut self.edge_slots.links, e.0);
        self.edge_mut(e).hidden = true;
    }

    /// Reinserts the hidden edge `e` at the end of the edge list and of both rotations.
    /// ** Panics if `e` is not hidden **
    pub fn restore_edge(&mut self, e: Edge) {
        assert!(self.edge(e).hidden, "{e} is not hidden");
        let data = self.edge(e).clone();

        self.hidden_list.unlink(&mut self.edge_slots.links, e.0);
        self.edge_list.push_back(&mut self.edge_slots.links, e.0);
        self.edge_mut(e).hidden = false;

        self.link_adj(data.adj_src, Position::Back(data.source));
        self.link_adj(data.adj_tgt, Position::Back(data.target));
        self.node_mut(data.source).outdeg += 1;
        self.node_mut(data.target).indeg += 1;
    }

    /// Restores all hidden edges, most recently hidden first
    pub fn restore_all_edges(&mut self) {
        while let Some(e) = self.hidden_list.last() {
            self.restore_edge(Edge(e));
        }
    }

    /// Moves the half-edge `adj` to `pos`, updating the endpoint its edge has at that side
    fn move_half(&mut self, adj: AdjEntry, pos: Position) {
        let e = adj.edge();
        self.assert_visible(e);
        assert_ne!(pos.anchor(), Some(adj), "{adj} cannot be moved next to itself");

        let outgoing = self.is_source_side(adj);
        let old = self.unlink_adj(adj);
        self.change_degree(old, outgoing, -1);

        let new = self.link_adj(adj, pos);
        self.change_degree(new, outgoing, 1);
        let data = self.edge_mut(e);
        if outgoing {
            data.source = new;
        } else {
            data.target = new;
        }
    }

    /// Makes the node at `pos` the new source of `e`.
    /// ** Panics if `e` is hidden **
    pub fn move_source(&mut self, e: Edge, pos: impl Into<Position>) {
        let adj = self.adj_source(e);
        self.move_half(adj, pos.into());
    }

    /// Makes the node at `pos` the new target of `e`.
    /// ** Panics if `e` is hidden **
    pub fn move_target(&mut self, e: Edge, pos: impl Into<Position>) {
        let adj = self.adj_target(e);
        self.move_half(adj, pos.into());
    }

    /// Moves both ends of `e`
    pub fn move_edge(&mut self, e: Edge, source: impl Into<Position>, target: impl Into<Position>) {
        self.move_source(e, source);
        self.move_target(e, target);
    }

    /// Moves the half-edge `adj` to the end of the rotation of `w`; its edge now has `w` as
    /// source or target, depending on the side of `adj`
    pub fn move_adj_to_node(&mut self, adj: AdjEntry, w: Node) {
        self.move_half(adj, Position::Back(w));
    }

    /// Moves `adj` next to `anchor` inside the rotation of their common node
    /// ** Panics if both are equal or belong to different nodes **
    pub fn move_adj(&mut self, adj: AdjEntry, dir: Direction, anchor: AdjEntry) {
        assert_ne!(adj, anchor, "{adj} cannot be moved next to itself");
        let v = self.adj_node(adj);
        assert_eq!(v, self.adj_node(anchor), "{adj} and {anchor} are at different nodes");
        self.assert_visible(adj.edge());

        let links = &mut self.adj_slots.links;
        let rotation = &mut self.node_slots[v.0].rotation;
        rotation.unlink(links, adj.0);
        match dir {
            Direction::Before => rotation.insert_before(links, adj.0, anchor.0),
            Direction::After => rotation.insert_after(links, adj.0, anchor.0),
        }
    }

    /// Exchanges the positions of `a` and `b` within the rotation of their common node
    /// ** Panics if they belong to different nodes or to hidden edges **
    pub fn swap_adj_edges(&mut self, a: AdjEntry, b: AdjEntry) {
        self.assert_visible(a.edge());
        self.assert_visible(b.edge());
        let v = self.adj_node(a);
        assert_eq!(v, self.adj_node(b), "{a} and {b} are at different nodes");
        if a == b {
            return;
        }

        let (a_next, b_next) = (self.succ(a), self.succ(b));
        let links = &mut self.adj_slots.links;
        let rotation = &mut self.node_slots[v.0].rotation;

        if a_next == Some(b) {
            rotation.unlink(links, a.0);
            rotation.insert_after(links, a.0, b.0);
        } else if b_next == Some(a) {
            rotation.unlink(links, b.0);
            rotation.insert_after(links, b.0, a.0);
        } else {
            rotation.unlink(links, a.0);
            match b_next {
                Some(next) => rotation.insert_before(links, a.0, next.0),
                None => rotation.push_back(links, a.0),
            }
            rotation.unlink(links, b.0);
            match a_next {
                Some(next) => rotation.insert_before(links, b.0, next.0),
                None => rotation.push_back(links, b.0),
            }
        }
    }

    /// Reverses the rotation of `v`
    pub fn reverse_adj_edges(&mut self, v: Node) {
        self.node_slots[v.0]
            .rotation
            .reverse(&mut self.adj_slots.links);
    }

    /// Reverses the rotations of all nodes (mirrors an embedding)
    pub fn reverse_all_adj_edges(&mut self) {
        for v in self.nodes().collect::<Vec<_>>() {
            self.reverse_adj_edges(v);
        }
    }

    /// Rearranges the rotation of `v` to `order`.
    /// ** Panics if `order` is not a permutation of the rotation of `v` **
    pub fn sort_adj(&mut self, v: Node, order: &[AdjEntry]) {
        assert_eq!(
            order.len(),
            self.degree(v) as usize,
            "order has to list each half-edge of {v} once"
        );
        let mut seen = FxHashSet::default();
        for &adj in order {
            assert!(
                !self.edge(adj.edge()).hidden && self.adj_node(adj) == v && seen.insert(adj),
                "{adj} is not a (unique) half-edge of {v}"
            );
        }

        let links = &mut self.adj_slots.links;
        let rotation = &mut self.node_slots[v.0].rotation;
        rotation.clear();
        for adj in order {
            rotation.push_back(links, adj.0);
        }
    }

    /// Swaps source and target of `e` (and the roles of its half-edges) without changing ids
    pub fn reverse_edge(&mut self, e: Edge) {
        let data = self.edge_mut(e);
        std::mem::swap(&mut data.source, &mut data.target);
        std::mem::swap(&mut data.adj_src, &mut data.adj_tgt);
        let (s, t, hidden) = (data.source, data.target, data.hidden);

        if !hidden && s != t {
            self.change_degree(s, true, 1);
            self.change_degree(s, false, -1);
            self.change_degree(t, false, 1);
            self.change_degree(t, true, -1);
        }
    }

    /// Reverses every visible edge
    pub fn reverse_all_edges(&mut self) {
        for e in self.edges().collect::<Vec<_>>() {
            self.reverse_edge(e);
        }
        self.check_if_enabled();
    }

    /// Subdivides `e = (v, w)` by a new node `u` into `e = (v, u)` and the returned edge
    /// `e2 = (u, w)`.
    ///
    /// `e` keeps both of its half-edges; its target half-edge now sits at `u`. The half-edge
    /// that takes its place in the rotation of `w` belongs to `e2`, and registered half-edge
    /// tables copy the old entry over to it.
    /// ** Panics if `e` is hidden **
    pub fn split(&mut self, e: Edge) -> Edge {
        self.assert_visible(e);
        let u = self.new_node();

        let e2 = Edge(self.allocate_edge_id(None));
        let (e2_src, e2_tgt) = e2.halves();
        let EdgeData {
            target: w,
            adj_tgt: old_tgt,
            ..
        } = self.edge(e).clone();

        self.registry.reset_adj_index(e2_tgt.index(), old_tgt.index());

        self.adj_slots.insert(e2_src.0, AdjData { node: u });
        self.adj_slots.insert(e2_tgt.0, AdjData { node: w });
        self.adj_slots[old_tgt.0].node = u;

        let links = &mut self.adj_slots.links;
        self.node_slots[w.0].rotation.replace(links, old_tgt.0, e2_tgt.0);
        let at_u = &mut self.node_slots[u.0];
        at_u.rotation.push_back(links, old_tgt.0);
        at_u.rotation.push_back(links, e2_src.0);
        at_u.indeg = 1;
        at_u.outdeg = 1;

        self.edge_mut(e).target = u;
        self.edge_slots.insert(
            e2.0,
            EdgeData {
                source: u,
                target: w,
                adj_src: e2_src,
                adj_tgt: e2_tgt,
                hidden: false,
            },
        );
        self.edge_list.push_back(&mut self.edge_slots.links, e2.0);

        self.notify(|obs, graph| obs.edge_added(graph, e2));
        self.check_if_enabled();
        e2
    }

    /// Undoes [`Graph::split`]: `e_in = (v, u)` and `e_out = (u, w)` become `e_in = (v, w)`
    /// and `u` as well as `e_out` are deleted. `e_in` takes over the position of `e_out` in the
    /// rotation of `w`, and registered half-edge tables copy the entry of the target half-edge
    /// of `e_out` to the one of `e_in`.
    /// ** Panics if `u` does not have exactly one incoming and one outgoing edge or if one of
    /// the edges is a self-loop **
    pub fn unsplit(&mut self, e_in: Edge, e_out: Edge) {
        self.assert_visible(e_in);
        self.assert_visible(e_out);
        let u = self.target(e_in);
        assert_eq!(u, self.source(e_out), "{e_in} and {e_out} do not meet");
        assert!(
            self.indeg(u) == 1 && self.outdeg(u) == 1,
            "{u} has to have exactly one incoming and one outgoing edge"
        );
        assert!(
            !self.is_self_loop(e_in) && !self.is_self_loop(e_out),
            "cannot unsplit self-loops"
        );

        self.notify(|obs, graph| obs.edge_deleted(graph, e_out));
        self.notify(|obs, graph| obs.node_deleted(graph, u));

        let in_tgt = self.adj_target(e_in);
        let EdgeData {
            target: w,
            adj_src: out_src,
            adj_tgt: out_tgt,
            ..
        } = self.edge_slots.remove(e_out.0);
        self.registry.reset_adj_index(in_tgt.index(), out_tgt.index());

        let links = &mut self.adj_slots.links;
        let rotation = &mut self.node_slots[u.0].rotation;
        rotation.unlink(links, in_tgt.0);
        rotation.unlink(links, out_src.0);
        self.node_slots[w.0].rotation.replace(links, out_tgt.0, in_tgt.0);

        self.adj_slots[in_tgt.0].node = w;
        self.adj_slots.remove(out_src.0);
        self.adj_slots.remove(out_tgt.0);
        self.edge_mut(e_in).target = w;
        self.edge_list.unlink(&mut self.edge_slots.links, e_out.0);

        self.node_list.unlink(&mut self.node_slots.links, u.0);
        self.node_slots.remove(u.0);
        self.check_if_enabled();
    }

    /// Undoes [`Graph::split`] at `u`, which must have degree two.
    /// ** Panics if `u` does not have exactly one incoming and one outgoing edge **
    pub fn unsplit_node(&mut self, u: Node) {
        let (Some(first), Some(last)) = (self.first_adj(u), self.last_adj(u)) else {
            panic!("{u} has no incident edges");
        };

        let (mut e_in, mut e_out) = (first.edge(), last.edge());
        if self.target(e_in) != u {
            std::mem::swap(&mut e_in, &mut e_out);
        }
        self.unsplit(e_in, e_out);
    }

    /// Contracts `e = (v, w)` into `v`: all other half-edges of `w` are moved in front of the
    /// source half-edge of `e` (keeping their cyclic order), after which `w` and `e` are deleted.
    /// Edges between `v` and `w` become self-loops. Returns `v`.
    /// ** Panics if `e` is a self-loop **
    pub fn contract(&mut self, e: Edge) -> Node {
        self.assert_visible(e);
        assert!(!self.is_self_loop(e), "cannot contract self-loop {e}");
        let (v, w) = self.endpoints(e);
        let (adj_src, adj_tgt) = (self.adj_source(e), self.adj_target(e));

        let mut moving = Vec::with_capacity(self.degree(w) as usize);
        let mut adj = self.cyclic_succ(adj_tgt);
        while adj != adj_tgt {
            moving.push(adj);
            adj = self.cyclic_succ(adj);
        }

        for adj in moving {
            self.move_half(adj, Position::Before(adj_src));
        }

        self.del_node(w);
        self.check_if_enabled();
        v
    }

    /// Splits the node `v` of `adj_left` and `adj_right`: the new node `w` receives all
    /// half-edges from `adj_right` (inclusive) to `adj_left` (exclusive) in cyclic order, and
    /// a new edge `(v, w)` is inserted in front of `adj_left` and `adj_right`. Returns `w`.
    /// ** Panics if the half-edges are equal or at different nodes **
    pub fn split_node(&mut self, adj_left: AdjEntry, adj_right: AdjEntry) -> Node {
        assert_ne!(adj_left, adj_right, "split_node needs two distinct half-edges");
        let v = self.adj_node(adj_left);
        assert_eq!(v, self.adj_node(adj_right), "{adj_left} and {adj_right} are at different nodes");

        let w = self.new_node();
        let mut moving = Vec::new();
        let mut adj = adj_right;
        while adj != adj_left {
            moving.push(adj);
            adj = self.cyclic_succ(adj);
        }
        for adj in moving {
            self.move_adj_to_node(adj, w);
        }

        self.new_edge(Position::Before(adj_left), Position::Before(adj_right));
        self.check_if_enabled();
        w
    }

    /// Removes all nodes and edges (including hidden ones). Ids start at zero again and all
    /// registered tables are reinitialized to the minimum size.
    pub fn clear(&mut self) {
        self.notify(|obs, graph| obs.cleared(graph));
        debug!(
            nodes = self.number_of_nodes(),
            edges = self.number_of_edges(),
            "clearing graph"
        );

        self.reset_storage();
        self.registry
            .reinit(self.node_table_size(), self.edge_table_size());
        self.check_if_enabled();
    }

    /// Forgets all elements and ids without informing any subscriber
    pub(crate) fn reset_storage(&mut self) {
        self.node_slots.clear();
        self.edge_slots.clear();
        self.adj_slots.clear();
        self.node_list.clear();
        self.edge_list.clear();
        self.hidden_list.clear();
        self.node_ids.reset();
        self.edge_ids.reset();
    }

    /// Returns a node chosen uniformly at random, or `None` if the graph is empty
    pub fn choose_node<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Node> {
        if self.is_empty() {
            return None;
        }
        let rank = rng.random_range(0..self.number_of_nodes());
        self.nodes().nth(rank as usize)
    }

    /// Returns a visible edge chosen uniformly at random, or `None` if there is none
    pub fn choose_edge<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Edge> {
        if self.is_edgeless() {
            return None;
        }
        let rank = rng.random_range(0..self.number_of_edges());
        self.edges().nth(rank as usize)
    }

    /// Returns an edge between `u` and `v` in either direction.
    /// Scans the rotation of the endpoint with smaller degree.
    pub fn search_edge(&self, u: Node, v: Node) -> Option<Edge> {
        let (scan, other) = if self.degree(u) <= self.degree(v) {
            (u, v)
        } else {
            (v, u)
        };
        self.adj_entries(scan)
            .find(|&adj| self.twin_node(adj) == other)
            .map(AdjEntry::edge)
    }

    /// Returns an edge from `u` to `v`
    pub fn search_directed_edge(&self, u: Node, v: Node) -> Option<Edge> {
        let adj = if self.outdeg(u) <= self.indeg(v) {
            self.adj_entries(u)
                .find(|&adj| self.is_source_side(adj) && self.twin_node(adj) == v)
        } else {
            self.adj_entries(v)
                .find(|&adj| !self.is_source_side(adj) && self.twin_node(adj) == u)
        };
        adj.map(AdjEntry::edge)
    }

    /// Sets the edge id counter so that the next sequential edge gets id `max_id + 1`
    /// (or `0` if `max_id` is `None`). Lowering keeps the table sizes; raising the counter past
    /// them grows all edge and half-edge tables.
    /// ** Panics if a visible or hidden edge has a larger id **
    pub fn reset_edge_id_count(&mut self, max_id: Option<RawId>) {
        let count = max_id.map_or(0, |m| m + 1);
        assert!(
            self.edges()
                .chain(self.hidden_edges())
                .all(|e| e.id() < count),
            "there are edges with ids above {max_id:?}"
        );

        debug!(count, "resetting edge id count");
        if let Some(size) = self.edge_ids.set_id_count(count) {
            debug!(kind = "edge", size, "growing tables");
            self.registry.enlarge(TableKind::Edge, size);
            self.registry.enlarge(TableKind::AdjEntry, size << 1);
        }
    }
}
