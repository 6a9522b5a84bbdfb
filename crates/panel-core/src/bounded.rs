//! Fixed-capacity owned container.
//!
//! `BoundedVec` owns its backing storage and a live count. The storage is
//! reserved once, fallibly, up to the declared capacity and is never grown
//! beyond it; `clear` drops the items but keeps the storage for the next
//! generation.

use crate::error::{CoreError, CoreResult};

/// Owned sequence that never holds more than `capacity` items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedVec<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedVec<T> {
    /// Create an empty container. No storage is reserved until the first push.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Append an item.
    ///
    /// Fails with `CapacityExceeded` when full and with `Allocation` when the
    /// backing storage cannot be reserved. The container is unchanged on error.
    pub fn try_push(&mut self, item: T) -> CoreResult<()> {
        if self.is_full() {
            return Err(CoreError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.reserve_storage()?;
        self.items.push(item);
        Ok(())
    }

    fn reserve_storage(&mut self) -> CoreResult<()> {
        let missing = self.capacity.saturating_sub(self.items.capacity());
        if missing == 0 {
            return Ok(());
        }
        let additional = self.capacity - self.items.len();
        self.items
            .try_reserve_exact(additional)
            .map_err(|_| CoreError::Allocation(additional * std::mem::size_of::<T>()))
    }

    /// Drop every item. Backing storage is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut v = BoundedVec::new(3);
        assert!(v.is_empty());
        for i in 0..3 {
            v.try_push(i).unwrap();
        }
        assert!(v.is_full());
        assert_eq!(
            v.try_push(3),
            Err(CoreError::CapacityExceeded { capacity: 3 })
        );
        assert_eq!(v.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_storage_reserved_once() {
        let mut v = BoundedVec::new(4);
        v.try_push("a").unwrap();
        let storage = v.items.as_ptr();
        assert!(v.items.capacity() >= 4);
        v.try_push("b").unwrap();
        v.try_push("c").unwrap();
        assert_eq!(v.items.as_ptr(), storage);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut v = BoundedVec::new(2);
        v.try_push(String::from("x")).unwrap();
        v.clear();
        assert_eq!(v.len(), 0);
        assert_eq!(v.capacity, 2);
        v.try_push(String::from("y")).unwrap();
        assert_eq!(v.get(0).map(String::as_str), Some("y"));
    }

    #[test]
    fn test_zero_capacity_rejects_everything() {
        let mut v: BoundedVec<u8> = BoundedVec::new(0);
        assert!(v.is_full());
        assert!(v.try_push(1).is_err());
        assert!(v.get(0).is_none());
    }
}
