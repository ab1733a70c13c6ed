/*!
# Index-linked Chains

A [`Chain`] is an intrusive doubly-linked list over integer ids whose `prev`/`next` links live in a
separate `[Link]` table indexed by id. Several chains may share one link table as long as every id
is a member of at most one of them at a time: all rotations of a graph share the half-edge link
table, and the edge list and the hidden-edge list share the edge link table.

All operations except iteration and [`Chain::reverse`] are `O(1)`.
*/

use crate::node::{NIL, RawId};

/// Predecessor and successor of an id inside its chain (`NIL` if none)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Link {
    pub prev: RawId,
    pub next: RawId,
}

impl Link {
    pub const UNLINKED: Link = Link {
        prev: NIL,
        next: NIL,
    };
}

impl Default for Link {
    fn default() -> Self {
        Self::UNLINKED
    }
}

/// Head, tail and length of an index-linked list
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Chain {
    head: RawId,
    tail: RawId,
    len: u32,
}

impl Default for Chain {
    fn default() -> Self {
        Self {
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }
}

#[inline]
fn some(id: RawId) -> Option<RawId> {
    (id != NIL).then_some(id)
}

impl Chain {
    /// Returns the number of elements in the chain
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Returns *true* if the chain has no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First element
    pub fn first(&self) -> Option<RawId> {
        some(self.head)
    }

    /// Last element
    pub fn last(&self) -> Option<RawId> {
        some(self.tail)
    }

    /// Successor of `id` within the chain
    pub fn next(links: &[Link], id: RawId) -> Option<RawId> {
        some(links[id as usize].next)
    }

    /// Predecessor of `id` within the chain
    pub fn prev(links: &[Link], id: RawId) -> Option<RawId> {
        some(links[id as usize].prev)
    }

    /// Appends `id` (which must be unlinked)
    pub fn push_back(&mut self, links: &mut [Link], id: RawId) {
        links[id as usize] = Link {
            prev: self.tail,
            next: NIL,
        };
        match some(self.tail) {
            Some(tail) => links[tail as usize].next = id,
            None => self.head = id,
        }
        self.tail = id;
        self.len += 1;
    }

    /// Prepends `id` (which must be unlinked)
    pub fn push_front(&mut self, links: &mut [Link], id: RawId) {
        links[id as usize] = Link {
            prev: NIL,
            next: self.head,
        };
        match some(self.head) {
            Some(head) => links[head as usize].prev = id,
            None => self.tail = id,
        }
        self.head = id;
        self.len += 1;
    }

    /// Inserts `id` directly after `anchor` (which must be a member of this chain)
    pub fn insert_after(&mut self, links: &mut [Link], id: RawId, anchor: RawId) {
        let next = links[anchor as usize].next;
        links[id as usize] = Link { prev: anchor, next };
        links[anchor as usize].next = id;
        match some(next) {
            Some(next) => links[next as usize].prev = id,
            None => self.tail = id,
        }
        self.len += 1;
    }

    /// Inserts `id` directly before `anchor` (which must be a member of this chain)
    pub fn insert_before(&mut self, links: &mut [Link], id: RawId, anchor: RawId) {
        let prev = links[anchor as usize].prev;
        links[id as usize] = Link { prev, next: anchor };
        links[anchor as usize].prev = id;
        match some(prev) {
            Some(prev) => links[prev as usize].next = id,
            None => self.head = id,
        }
        self.len += 1;
    }

    /// Removes `id` (which must be a member of this chain)
    pub fn unlink(&mut self, links: &mut [Link], id: RawId) {
        let Link { prev, next } = links[id as usize];
        match some(prev) {
            Some(prev) => links[prev as usize].next = next,
            None => self.head = next,
        }
        match some(next) {
            Some(next) => links[next as usize].prev = prev,
            None => self.tail = prev,
        }
        links[id as usize] = Link::UNLINKED;
        self.len -= 1;
    }

    /// Puts the unlinked id `new` at the position of the member `old`, which becomes unlinked
    pub fn replace(&mut self, links: &mut [Link], old: RawId, new: RawId) {
        let link = links[old as usize];
        links[new as usize] = link;
        links[old as usize] = Link::UNLINKED;
        match some(link.prev) {
            Some(prev) => links[prev as usize].next = new,
            None => self.head = new,
        }
        match some(link.next) {
            Some(next) => links[next as usize].prev = new,
            None => self.tail = new,
        }
    }

    /// Reverses the order of the chain in `O(len)`
    pub fn reverse(&mut self, links: &mut [Link]) {
        let mut cur = self.head;
        while let Some(id) = some(cur) {
            let link = &mut links[id as usize];
            std::mem::swap(&mut link.prev, &mut link.next);
            cur = link.prev;
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Forgets all members without touching their links
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Iterates over the members from head to tail
    pub fn iter<'a>(&self, links: &'a [Link]) -> ChainIter<'a> {
        ChainIter {
            links,
            cur: self.head,
        }
    }
}

/// Iterator over the members of a [`Chain`]
#[derive(Clone)]
pub struct ChainIter<'a> {
    links: &'a [Link],
    cur: RawId,
}

impl Iterator for ChainIter<'_> {
    type Item = RawId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = some(self.cur)?;
        self.cur = self.links[id as usize].next;
        Some(id)
    }
}
