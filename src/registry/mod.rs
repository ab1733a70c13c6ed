/*!
# Registration & Observers

Any number of auxiliary tables and structural observers can subscribe to a [`Graph`]:

- A [`TableListener`] is keyed by node, edge or half-edge id. It is told to grow whenever the
  corresponding table size of the graph grows, to reinitialize after the graph was rebuilt from
  scratch, and to copy a half-edge slot when `split`/`unsplit` relabel a half-edge.
  [`AuxArray`] ([`NodeArray`], [`EdgeArray`], [`AdjEntryArray`]) is the standard implementation.
- A [`GraphObserver`] receives a callback for every node/edge insertion or deletion, when the
  graph is cleared, and when it was reconstructed.

Subscribing returns a [`Registration`]. Dropping it (or calling [`Registration::unregister`])
unsubscribes again. All bookkeeping is guarded by a single mutex per graph, so tables may be
created and dropped from other threads while holding `&Graph`. When the graph is dropped, all
tables are disconnected and every outstanding [`Registration`] becomes inert.
*/

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use smallvec::SmallVec;
use tracing::trace;

mod array;
mod observer;

pub use array::*;
pub use observer::*;

/// Kind of id an auxiliary table is indexed with
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TableKind {
    Node,
    Edge,
    AdjEntry,
}

impl TableKind {
    const fn slot(self) -> usize {
        match self {
            TableKind::Node => 0,
            TableKind::Edge => 1,
            TableKind::AdjEntry => 2,
        }
    }
}

/// Interface of an auxiliary table registered with a graph.
///
/// Methods take `&self` since the graph only holds a shared reference; implementations use
/// interior mutability. They are called while the registry lock is held and must not register
/// or unregister anything themselves.
pub trait TableListener: Send + Sync {
    /// The table must provide at least `capacity` slots. Existing entries keep their index.
    fn enlarge(&self, capacity: usize);

    /// The graph was rebuilt: discard all entries and provide `capacity` fresh slots.
    fn reinit(&self, capacity: usize);

    /// The element formerly known under `old_index` is now known under `new_index`.
    /// Only sent to half-edge tables.
    fn reset_index(&self, _new_index: usize, _old_index: usize) {}

    /// The graph is gone; the table will not receive any further calls.
    fn disconnect(&self) {}
}

/// Observer as stored in the registry
pub type SharedObserver = Arc<Mutex<dyn GraphObserver + Send>>;

/// Locks a mutex, ignoring poisoning (a panicking observer must not wedge the graph)
pub(crate) fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Opaque identifier of a subscription
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Channel {
    Table(TableKind),
    Observer,
}

#[derive(Default)]
struct Subscribers {
    next_token: u64,
    tables: [Vec<(Token, Arc<dyn TableListener>)>; 3],
    observers: Vec<(Token, SharedObserver)>,
}

/// Subscribers taken out of the registry; dropped only after the registry lock is released, as
/// dropping them may in turn drop registrations
type Released = (Vec<Arc<dyn TableListener>>, Vec<SharedObserver>);

fn take_token<T>(list: &mut Vec<(Token, T)>, token: Token) -> Option<T> {
    let pos = list.iter().position(|(t, _)| *t == token)?;
    Some(list.remove(pos).1)
}

impl Subscribers {
    fn issue(&mut self) -> Token {
        let token = Token(self.next_token);
        self.next_token += 1;
        token
    }

    /// Moves the subscriber of `token` into `released`; returns *false* if it is unknown
    fn remove(&mut self, channel: Channel, token: Token, released: &mut Released) -> bool {
        match channel {
            Channel::Table(kind) => take_token(&mut self.tables[kind.slot()], token)
                .map(|table| released.0.push(table))
                .is_some(),
            Channel::Observer => take_token(&mut self.observers, token)
                .map(|obs| released.1.push(obs))
                .is_some(),
        }
    }
}

/// Subscriber lists of one graph
#[derive(Default)]
pub(crate) struct Registry {
    inner: Arc<Mutex<Subscribers>>,
}

impl Registry {
    fn subscription(&self, channel: Channel, token: Token) -> Registration {
        Registration {
            token,
            channel,
            registry: Arc::downgrade(&self.inner),
        }
    }

    pub fn register_table(&self, kind: TableKind, table: Arc<dyn TableListener>) -> Registration {
        let mut subs = lock(&self.inner);
        let token = subs.issue();
        subs.tables[kind.slot()].push((token, table));
        trace!(?kind, ?token, "registered table");
        self.subscription(Channel::Table(kind), token)
    }

    pub fn register_observer(&self, observer: SharedObserver) -> Registration {
        let mut subs = lock(&self.inner);
        let token = subs.issue();
        subs.observers.push((token, observer));
        trace!(?token, "registered observer");
        self.subscription(Channel::Observer, token)
    }

    pub fn number_of_tables(&self, kind: TableKind) -> usize {
        lock(&self.inner).tables[kind.slot()].len()
    }

    pub fn number_of_observers(&self) -> usize {
        lock(&self.inner).observers.len()
    }

    pub fn enlarge(&self, kind: TableKind, capacity: usize) {
        for (_, table) in &lock(&self.inner).tables[kind.slot()] {
            table.enlarge(capacity);
        }
    }

    /// Reinitializes all tables to the given node/edge table sizes
    pub fn reinit(&self, node_capacity: usize, edge_capacity: usize) {
        let subs = lock(&self.inner);
        let capacities = [node_capacity, edge_capacity, edge_capacity << 1];
        for (list, capacity) in subs.tables.iter().zip(capacities) {
            for (_, table) in list {
                table.reinit(capacity);
            }
        }
    }

    pub fn reset_adj_index(&self, new_index: usize, old_index: usize) {
        for (_, table) in &lock(&self.inner).tables[TableKind::AdjEntry.slot()] {
            table.reset_index(new_index, old_index);
        }
    }

    /// Snapshot of the observers in registration order; taken so that callbacks run without the
    /// registry lock being held
    pub fn observers(&self) -> SmallVec<[SharedObserver; 4]> {
        lock(&self.inner)
            .observers
            .iter()
            .map(|(_, obs)| obs.clone())
            .collect()
    }

    /// Disconnects and forgets every subscriber
    pub fn disconnect_all(&self) {
        let mut released: Released = Default::default();
        {
            let mut subs = lock(&self.inner);
            for list in &mut subs.tables {
                for (_, table) in list.drain(..) {
                    table.disconnect();
                    released.0.push(table);
                }
            }
            released.1.extend(subs.observers.drain(..).map(|(_, obs)| obs));
        }
        drop(released);
    }
}

/// Handle of a subscription. Unsubscribes when dropped.
///
/// Only a weak reference to the registry is kept, so a registration may outlive its graph; it
/// then does nothing.
#[must_use = "dropping a Registration unsubscribes immediately"]
pub struct Registration {
    token: Token,
    channel: Channel,
    registry: Weak<Mutex<Subscribers>>,
}

impl Registration {
    pub fn token(&self) -> Token {
        self.token
    }

    /// Returns *true* if the subscription is still known to a living graph
    pub fn is_attached(&self) -> bool {
        self.registry.upgrade().is_some_and(|inner| {
            let subs = lock(&inner);
            match self.channel {
                Channel::Table(kind) => subs.tables[kind.slot()]
                    .iter()
                    .any(|(t, _)| *t == self.token),
                Channel::Observer => subs.observers.iter().any(|(t, _)| *t == self.token),
            }
        })
    }

    /// Explicitly unsubscribes (equivalent to dropping)
    pub fn unregister(self) {}
}

impl Drop for Registration {
    fn drop(&mut self) {
        let Some(inner) = self.registry.upgrade() else {
            return;
        };
        let mut released: Released = Default::default();
        let removed = lock(&inner).remove(self.channel, self.token, &mut released);
        if removed {
            trace!(token = ?self.token, "unregistered");
        }
        drop(released);
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("token", &self.token)
            .field("channel", &self.channel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Default)]
    struct Counting {
        enlarged: AtomicUsize,
        reinits: AtomicUsize,
        disconnected: AtomicUsize,
    }

    impl TableListener for Counting {
        fn enlarge(&self, capacity: usize) {
            self.enlarged.store(capacity, Ordering::Relaxed);
        }

        fn reinit(&self, capacity: usize) {
            self.reinits.store(capacity, Ordering::Relaxed);
        }

        fn disconnect(&self) {
            self.disconnected.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn register_dispatch_unregister() {
        let registry = Registry::default();
        let nodes = Arc::new(Counting::default());
        let adjs = Arc::new(Counting::default());

        let reg_nodes = registry.register_table(TableKind::Node, nodes.clone());
        let reg_adjs = registry.register_table(TableKind::AdjEntry, adjs.clone());
        assert_ne!(reg_nodes.token(), reg_adjs.token());
        assert_eq!(registry.number_of_tables(TableKind::Node), 1);
        assert_eq!(registry.number_of_tables(TableKind::Edge), 0);

        registry.enlarge(TableKind::Node, 64);
        assert_eq!(nodes.enlarged.load(Ordering::Relaxed), 64);
        assert_eq!(adjs.enlarged.load(Ordering::Relaxed), 0);

        registry.reinit(16, 32);
        assert_eq!(nodes.reinits.load(Ordering::Relaxed), 16);
        assert_eq!(adjs.reinits.load(Ordering::Relaxed), 64);

        assert!(reg_nodes.is_attached());
        reg_nodes.unregister();
        assert_eq!(registry.number_of_tables(TableKind::Node), 0);

        registry.disconnect_all();
        assert_eq!(adjs.disconnected.load(Ordering::Relaxed), 1);
        assert!(!reg_adjs.is_attached());
    }

    #[test]
    fn unregistering_releases_subscribers() {
        let registry = Registry::default();
        let table = Arc::new(Counting::default());
        let reg = registry.register_table(TableKind::Edge, table.clone());
        assert_eq!(Arc::strong_count(&table), 2);
        drop(reg);
        assert_eq!(Arc::strong_count(&table), 1);

        let reg = registry.register_table(TableKind::Node, table.clone());
        registry.disconnect_all();
        assert_eq!(Arc::strong_count(&table), 1);
        assert_eq!(table.disconnected.load(Ordering::Relaxed), 1);

        // already released; dropping must not touch anything
        drop(reg);
        assert_eq!(registry.number_of_tables(TableKind::Node), 0);
    }

    #[test]
    fn registration_outlives_registry() {
        let registry = Registry::default();
        let reg = registry.register_table(TableKind::Edge, Arc::new(Counting::default()));
        drop(registry);
        assert!(!reg.is_attached());
        drop(reg);
    }
}
