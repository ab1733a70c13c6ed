use std::ops::{Index, IndexMut};

use super::chain::Link;
use crate::node::RawId;

/// Id-indexed arena: slot `id` holds the record of the element with that id (or nothing if the
/// id is unused) together with the element's [`Link`] for the chain it is a member of.
///
/// Slots are created on demand and freed slots stay addressable, so an id can be reused once the
/// caller decides it is free again.
#[derive(Debug, Clone)]
pub struct Slots<T> {
    items: Vec<Option<T>>,
    pub(crate) links: Vec<Link>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            links: Vec::new(),
        }
    }
}

impl<T> Slots<T> {
    /// Number of addressable slots (one more than the largest id ever stored)
    pub fn bound(&self) -> usize {
        self.items.len()
    }

    /// Stores `value` under `id`.
    /// ** Panics (in debug builds) if `id` is occupied **
    pub fn insert(&mut self, id: RawId, value: T) {
        let idx = id as usize;
        if idx >= self.items.len() {
            self.items.resize_with(idx + 1, || None);
            self.links.resize(idx + 1, Link::UNLINKED);
        }
        debug_assert!(self.items[idx].is_none(), "id {id} is already in use");
        self.items[idx] = Some(value);
    }

    /// Frees slot `id` and returns its record.
    /// ** Panics if `id` is vacant **
    pub fn remove(&mut self, id: RawId) -> T {
        match self.items.get_mut(id as usize).and_then(Option::take) {
            Some(value) => value,
            None => panic!("no element with id {id}"),
        }
    }

    pub fn get(&self, id: RawId) -> Option<&T> {
        self.items.get(id as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: RawId) -> Option<&mut T> {
        self.items.get_mut(id as usize).and_then(Option::as_mut)
    }

    /// Returns *true* if slot `id` is occupied
    pub fn contains(&self, id: RawId) -> bool {
        self.get(id).is_some()
    }

    /// Frees all slots
    pub fn clear(&mut self) {
        self.items.clear();
        self.links.clear();
    }
}

impl<T> Index<RawId> for Slots<T> {
    type Output = T;

    fn index(&self, id: RawId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("no element with id {id}"),
        }
    }
}

impl<T> IndexMut<RawId> for Slots<T> {
    fn index_mut(&mut self, id: RawId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("no element with id {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove() {
        let mut slots = Slots::default();
        slots.insert(3, 'a');
        slots.insert(0, 'b');
        assert_eq!(slots.bound(), 4);
        assert_eq!(slots.links.len(), 4);
        assert!(slots.contains(3));
        assert!(!slots.contains(1));
        assert!(!slots.contains(10));

        slots.insert(9, 'd');
        assert_eq!(slots.bound(), 10);
        assert_eq!(slots.remove(3), 'a');
        assert!(!slots.contains(3));
        assert_eq!(slots[9], 'd');

        slots[0] = 'c';
        assert_eq!(slots.remove(0), 'c');
        assert_eq!(slots.get(0), None);

        slots.clear();
        assert_eq!(slots.bound(), 0);
    }

    #[test]
    #[should_panic]
    fn index_vacant() {
        let slots: Slots<u8> = Slots::default();
        let _ = slots[2];
    }
}
