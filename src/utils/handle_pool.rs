use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::binary_heap::BinaryHeap;

use super::handle::{Handle, HandleIndex};

#[derive(PartialEq, Eq)]
struct InverseHandleIndex(HandleIndex);

impl PartialOrd for InverseHandleIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InverseHandleIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

/// `HandlePool` manages the manipulations of a `Handle` collection, which are
/// created with a continuous `index` field. It also have the ability to find
/// out the current status of a specified `Handle`.
///
/// An odd version means the slot is alive. Freeing bumps the version to even,
/// so a stale `Handle` is never mistaken for the one reusing its slot.
#[derive(Default)]
pub struct HandlePool {
    versions: Vec<HandleIndex>,
    frees: BinaryHeap<InverseHandleIndex>,
}

impl HandlePool {
    pub fn new() -> HandlePool {
        Default::default()
    }

    /// Creates a unused `Handle`.
    pub fn create<T>(&mut self) -> T
    where
        T: From<Handle>,
    {
        if let Some(InverseHandleIndex(index)) = self.frees.pop() {
            let index = index as usize;
            self.versions[index] += 1;
            Handle::new(index as HandleIndex, self.versions[index]).into()
        } else {
            self.versions.push(1);
            Handle::new(self.versions.len() as HandleIndex - 1, 1).into()
        }
    }

    /// Returns true if this `Handle` was created by `HandlePool`, and has not been
    /// freed yet.
    pub fn contains<T>(&self, handle: T) -> bool
    where
        T: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;
        self.is_alive_at(index) && (self.versions[index] == handle.version())
    }

    #[inline]
    fn is_alive_at(&self, index: usize) -> bool {
        (index < self.versions.len()) && ((self.versions[index] & 0x1) == 1)
    }

    /// Recycles the `Handle` index, and mark its version as dead. Returns false
    /// if the handle has already been freed.
    pub fn free<T>(&mut self, handle: T) -> bool
    where
        T: Borrow<Handle>,
    {
        let handle = handle.borrow();
        if !self.contains(handle) {
            false
        } else {
            self.versions[handle.index() as usize] += 1;
            self.frees.push(InverseHandleIndex(handle.index()));
            true
        }
    }

    /// Returns the total number of alive handle in this `HandlePool`.
    #[inline]
    pub fn len(&self) -> usize {
        self.versions.len() - self.frees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the alive handles of this `HandlePool`.
    pub fn iter<'a, T>(&'a self) -> impl Iterator<Item = T> + 'a
    where
        T: From<Handle> + 'a,
    {
        self.versions
            .iter()
            .enumerate()
            .filter(|&(_, v)| v & 0x1 == 1)
            .map(|(i, &v)| Handle::new(i as HandleIndex, v).into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reuse() {
        let mut pool = HandlePool::new();
        let h1: Handle = pool.create();
        let h2: Handle = pool.create();
        assert_eq!(pool.len(), 2);
        assert!(pool.contains(h1));

        assert!(pool.free(h1));
        assert!(!pool.contains(h1));
        assert!(!pool.free(h1));

        let h3: Handle = pool.create();
        assert_eq!(h3.index(), h1.index());
        assert!(h3.version() != h1.version());
        assert!(!pool.contains(h1));
        assert!(pool.contains(h3));

        let alive: Vec<Handle> = pool.iter().collect();
        assert_eq!(alive, vec![h3, h2]);
    }

    #[test]
    fn smallest_index_first() {
        let mut pool = HandlePool::new();
        let handles: Vec<Handle> = (0..4).map(|_| pool.create()).collect();
        pool.free(handles[3]);
        pool.free(handles[1]);

        let h: Handle = pool.create();
        assert_eq!(h.index(), 1);
        assert_eq!(pool.len(), 3);
    }
}
