use std::borrow::Borrow;

use super::handle::Handle;

/// A sparse vector indexed by `Handle`, a slot is only visible through a handle
/// of the same version it was created with.
#[derive(Debug)]
pub struct DataVec<T>
where
    T: Sized,
{
    buf: Vec<Option<T>>,
    versions: Vec<u32>,
}

impl<T> Default for DataVec<T> {
    fn default() -> Self {
        DataVec {
            buf: Vec::new(),
            versions: Vec::new(),
        }
    }
}

impl<T> DataVec<T>
where
    T: Sized,
{
    pub fn new() -> Self {
        Default::default()
    }

    pub fn get<H>(&self, handle: H) -> Option<&T>
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;
        match self.versions.get(index) {
            Some(&v) if v == handle.version() => self.buf[index].as_ref(),
            _ => None,
        }
    }

    pub fn get_mut<H>(&mut self, handle: H) -> Option<&mut T>
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;
        match self.versions.get(index) {
            Some(&v) if v == handle.version() => self.buf[index].as_mut(),
            _ => None,
        }
    }

    pub fn create<H>(&mut self, handle: H, value: T)
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;

        while self.buf.len() <= index {
            self.buf.push(None);
            self.versions.push(0);
        }

        self.buf[index] = Some(value);
        self.versions[index] = handle.version();
    }

    pub fn free<H>(&mut self, handle: H) -> Option<T>
    where
        H: Borrow<Handle>,
    {
        let handle = handle.borrow();
        let index = handle.index() as usize;
        match self.versions.get(index) {
            Some(&v) if v == handle.version() => self.buf[index].take(),
            _ => None,
        }
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.buf.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn versioned_access() {
        let mut v = DataVec::new();
        let h1 = Handle::new(2, 1);
        v.create(h1, "reflection");
        assert_eq!(v.get(h1), Some(&"reflection"));
        assert_eq!(v.get(Handle::new(2, 3)), None);
        assert_eq!(v.get(Handle::new(0, 1)), None);

        assert_eq!(v.free(Handle::new(2, 3)), None);
        assert_eq!(v.free(h1), Some("reflection"));
        assert_eq!(v.free(h1), None);
        assert!(v.is_empty());
    }
}
