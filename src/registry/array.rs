use std::{
    marker::PhantomData,
    ops::{Index, IndexMut},
    sync::{Arc, Mutex, MutexGuard},
};

use super::{Registration, TableKind, TableListener, lock};
use crate::prelude::*;

/// Handle types that can index an auxiliary table
pub trait TableKey: Copy {
    const KIND: TableKind;

    /// Slot of the element in the table
    fn slot(self) -> usize;

    /// Size the table currently has to provide for `graph`
    fn table_size(graph: &Graph) -> usize;
}

impl TableKey for Node {
    const KIND: TableKind = TableKind::Node;

    fn slot(self) -> usize {
        self.index()
    }

    fn table_size(graph: &Graph) -> usize {
        graph.node_table_size()
    }
}

impl TableKey for Edge {
    const KIND: TableKind = TableKind::Edge;

    fn slot(self) -> usize {
        self.index()
    }

    fn table_size(graph: &Graph) -> usize {
        graph.edge_table_size()
    }
}

impl TableKey for AdjEntry {
    const KIND: TableKind = TableKind::AdjEntry;

    fn slot(self) -> usize {
        self.index()
    }

    fn table_size(graph: &Graph) -> usize {
        graph.adj_entry_table_size()
    }
}

struct ArrayTable<T> {
    data: Vec<T>,
    default: T,
    attached: bool,
}

impl<T: Clone + Send> TableListener for Mutex<ArrayTable<T>> {
    fn enlarge(&self, capacity: usize) {
        let table = &mut *lock(self);
        if table.data.len() < capacity {
            table.data.resize(capacity, table.default.clone());
        }
    }

    fn reinit(&self, capacity: usize) {
        let table = &mut *lock(self);
        table.data.clear();
        table.data.resize(capacity, table.default.clone());
    }

    fn reset_index(&self, new_index: usize, old_index: usize) {
        let table = &mut *lock(self);
        table.data[new_index] = table.data[old_index].clone();
    }

    fn disconnect(&self) {
        lock(self).attached = false;
    }
}

/// Array indexed by the nodes, edges or half-edges of a graph.
///
/// The array registers itself with the graph on creation: it grows together with the graph's
/// tables (keeping all values at their index and filling new slots with the default) and is reset
/// to the default when the graph is cleared or rebuilt. Dropping the array unregisters it.
///
/// Values are stored behind a mutex shared with the graph. Single values are accessed via
/// [`AuxArray::get`] / [`AuxArray::set`]; for bulk access, [`AuxArray::lock`] returns a guard that
/// supports indexing. Do not hold a guard while editing the graph: if the edit grows the tables,
/// the graph blocks on the guard.
///
/// ```
/// use dyngraph::prelude::*;
///
/// let mut graph = Graph::new();
/// let u = graph.new_node();
/// let mut color = NodeArray::new(&graph, 0u8);
/// color.set(u, 3);
///
/// let vs: Vec<Node> = (0..100).map(|_| graph.new_node()).collect();
/// assert_eq!(color.get(u), 3);
/// assert_eq!(color.get(vs[99]), 0);
/// ```
pub struct AuxArray<K: TableKey, T> {
    table: Arc<Mutex<ArrayTable<T>>>,
    registration: Registration,
    _key: PhantomData<K>,
}

/// Array with one entry per node id
pub type NodeArray<T> = AuxArray<Node, T>;

/// Array with one entry per edge id
pub type EdgeArray<T> = AuxArray<Edge, T>;

/// Array with one entry per half-edge id
pub type AdjEntryArray<T> = AuxArray<AdjEntry, T>;

impl<K, T> AuxArray<K, T>
where
    K: TableKey,
    T: Clone + Send + 'static,
{
    /// Creates an array for `graph` with every entry set to `default`
    pub fn new(graph: &Graph, default: T) -> Self {
        let table = Arc::new(Mutex::new(ArrayTable {
            data: vec![default.clone(); K::table_size(graph)],
            default,
            attached: true,
        }));
        let registration = graph.register_table(K::KIND, table.clone());

        Self {
            table,
            registration,
            _key: PhantomData,
        }
    }

    /// Returns a clone of the value stored for `key`.
    /// ** Panics if `key` lies outside of the table **
    pub fn get(&self, key: K) -> T {
        lock(&self.table).data[key.slot()].clone()
    }

    /// Stores `value` for `key`.
    /// ** Panics if `key` lies outside of the table **
    pub fn set(&mut self, key: K, value: T) {
        lock(&self.table).data[key.slot()] = value;
    }

    /// Applies `f` to the value stored for `key`
    pub fn update<R>(&mut self, key: K, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut lock(&self.table).data[key.slot()])
    }

    /// Sets every entry to `value`
    pub fn fill(&mut self, value: T) {
        lock(&self.table).data.fill(value);
    }

    /// Returns a copy of the whole table
    pub fn to_vec(&self) -> Vec<T> {
        lock(&self.table).data.clone()
    }

    /// Returns the value new slots are initialized with
    pub fn default_value(&self) -> T {
        lock(&self.table).default.clone()
    }

    /// Locks the table for indexed access
    pub fn lock(&self) -> ArrayGuard<'_, K, T> {
        ArrayGuard {
            guard: lock(&self.table),
            _key: PhantomData,
        }
    }
}

impl<K: TableKey, T> AuxArray<K, T> {
    /// Number of slots currently provided
    pub fn capacity(&self) -> usize {
        lock(&self.table).data.len()
    }

    /// Returns *false* once the graph the array was created for has been dropped
    pub fn is_attached(&self) -> bool {
        lock(&self.table).attached && self.registration.is_attached()
    }
}

/// Exclusive view into an [`AuxArray`]
pub struct ArrayGuard<'a, K, T> {
    guard: MutexGuard<'a, ArrayTable<T>>,
    _key: PhantomData<K>,
}

impl<K, T> ArrayGuard<'_, K, T> {
    /// The raw table, indexed by id
    pub fn as_slice(&self) -> &[T] {
        &self.guard.data
    }
}

impl<K: TableKey, T> Index<K> for ArrayGuard<'_, K, T> {
    type Output = T;

    fn index(&self, key: K) -> &T {
        &self.guard.data[key.slot()]
    }
}

impl<K: TableKey, T> IndexMut<K> for ArrayGuard<'_, K, T> {
    fn index_mut(&mut self, key: K) -> &mut T {
        &mut self.guard.data[key.slot()]
    }
}
