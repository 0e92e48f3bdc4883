// item.rs

use std::{rc, sync};

/// A non-owning reference to a host-owned object.
///
/// Holding an `ItemRef` must never keep the object alive. Once the host
/// destroys the object, `is_alive` reports false for every reference to it.
pub trait ItemRef {
    fn is_alive(&self) -> bool;

    /// Identity comparison: true when both references point at the same object.
    fn same_item(&self, other: &Self) -> bool;
}

impl<T: ?Sized> ItemRef for rc::Weak<T> {
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }

    fn same_item(&self, other: &Self) -> bool {
        rc::Weak::ptr_eq(self, other)
    }
}

impl<T: ?Sized> ItemRef for sync::Weak<T> {
    fn is_alive(&self) -> bool {
        self.strong_count() > 0
    }

    fn same_item(&self, other: &Self) -> bool {
        sync::Weak::ptr_eq(self, other)
    }
}
