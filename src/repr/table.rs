/*!
# Identity & Table Growth

Node and edge ids are handed out sequentially (or claimed explicitly). Every registered auxiliary
array must provide at least "table size" slots, where the table size is always a power of two
(at least [`MIN_NODE_TABLE_SIZE`] / [`MIN_EDGE_TABLE_SIZE`]) strictly larger than the current id
count. Tables only ever double, so the `O(#arrays)` fan-out on growth amortizes to `O(1)` per
insertion. Half-edge tables always have twice the size of the edge table.
*/

use crate::node::RawId;

/// Initial (and minimal) size of node tables
pub const MIN_NODE_TABLE_SIZE: usize = 1 << 4;

/// Initial (and minimal) size of edge tables
pub const MIN_EDGE_TABLE_SIZE: usize = 1 << 4;

/// Doubles `start` until it exceeds `id_count`
pub const fn next_power2(mut start: usize, id_count: usize) -> usize {
    while start <= id_count {
        start <<= 1;
    }
    start
}

/// Id counter together with the table size derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTable {
    id_count: RawId,
    table_size: usize,
    min_size: usize,
}

impl IdTable {
    pub const fn new(min_size: usize) -> Self {
        Self {
            id_count: 0,
            table_size: min_size,
            min_size,
        }
    }

    /// Number of ids handed out so far (one more than the largest id)
    pub fn id_count(&self) -> RawId {
        self.id_count
    }

    /// Current table size
    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// Returns the next sequential id. If the table had to grow, the new size is returned as well.
    pub fn allocate(&mut self) -> (RawId, Option<usize>) {
        let mut grown = None;
        if self.id_count as usize >= self.table_size {
            self.table_size = next_power2(self.table_size, self.id_count as usize);
            grown = Some(self.table_size);
        }

        let id = self.id_count;
        self.id_count += 1;
        (id, grown)
    }

    /// Hands out the next id without growing the table. Used while rebuilding a graph from
    /// scratch, followed by [`IdTable::fit`].
    pub fn allocate_unchecked(&mut self) -> RawId {
        let id = self.id_count;
        self.id_count += 1;
        id
    }

    /// Marks the explicitly chosen `id` as used. If the table had to grow, the new size is returned.
    pub fn claim(&mut self, id: RawId) -> Option<usize> {
        if id < self.id_count {
            return None;
        }

        self.id_count = id + 1;
        if id as usize >= self.table_size {
            self.table_size = next_power2(self.table_size, id as usize);
            Some(self.table_size)
        } else {
            None
        }
    }

    /// Sets the id count to `count`. Lowering never shrinks the table; raising it past the table
    /// size grows the table, whose new size is returned.
    pub fn set_id_count(&mut self, count: RawId) -> Option<usize> {
        self.id_count = count;
        if count as usize > self.table_size {
            self.table_size = next_power2(self.table_size, count as usize - 1);
            Some(self.table_size)
        } else {
            None
        }
    }

    /// Recomputes the table size from scratch for the current id count
    pub fn fit(&mut self) -> usize {
        self.table_size = next_power2(self.min_size, self.id_count as usize);
        self.table_size
    }

    /// Forgets all ids and returns to the minimal table size
    pub fn reset(&mut self) {
        self.id_count = 0;
        self.table_size = self.min_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn powers() {
        assert_eq!(next_power2(16, 0), 16);
        assert_eq!(next_power2(16, 15), 16);
        assert_eq!(next_power2(16, 16), 32);
        assert_eq!(next_power2(16, 100), 128);
        assert_eq!(next_power2(32, 31), 32);
    }

    #[test]
    fn sequential_growth_doubles_once() {
        let mut table = IdTable::new(MIN_NODE_TABLE_SIZE);
        let mut growths = Vec::new();
        for expected in 0..=MIN_NODE_TABLE_SIZE as RawId {
            let (id, grown) = table.allocate();
            assert_eq!(id, expected);
            growths.extend(grown);
        }
        assert_eq!(growths, vec![2 * MIN_NODE_TABLE_SIZE]);
        assert_eq!(table.id_count(), MIN_NODE_TABLE_SIZE as RawId + 1);
        assert!(table.table_size() > table.id_count() as usize);
    }

    #[test]
    fn sparse_claims() {
        let mut table = IdTable::new(MIN_EDGE_TABLE_SIZE);
        assert_eq!(table.claim(3), None);
        assert_eq!(table.id_count(), 4);

        assert_eq!(table.claim(100), Some(128));
        assert_eq!(table.id_count(), 101);

        // smaller ids do not move the counter back
        assert_eq!(table.claim(50), None);
        assert_eq!(table.id_count(), 101);

        assert_eq!(table.allocate(), (101, None));

        assert_eq!(table.set_id_count(5), None);
        assert_eq!(table.fit(), 16);
        table.reset();
        assert_eq!((table.id_count(), table.table_size()), (0, 16));
    }

    #[test]
    fn raised_count_grows_table() {
        let mut table = IdTable::new(MIN_EDGE_TABLE_SIZE);
        assert_eq!(table.set_id_count(16), None);
        assert_eq!(table.allocate(), (16, Some(32)));

        assert_eq!(table.set_id_count(100), Some(128));
        assert_eq!(table.allocate(), (100, None));
        assert!(table.table_size() > table.id_count() as usize - 1);

        // a counter already past the table size is caught by the next allocation
        table.id_count = 200;
        assert_eq!(table.allocate(), (200, Some(256)));
    }
}
