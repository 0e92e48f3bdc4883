// entry.rs

use itertools::{EitherOrBoth, Itertools};

use crate::item::ItemRef;

/// One recorded snapshot of selected items, in selection order.
///
/// Entries are never edited once they are stored in a history; stale
/// references are skipped on read through [`Entry::alive`].
#[derive(Debug, Clone)]
pub struct Entry<R> {
    items: Vec<R>,
}

impl<R> Entry<R> {
    pub fn new(items: Vec<R>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// All stored references, including dead ones.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn into_items(self) -> Vec<R> {
        self.items
    }
}

impl<R: ItemRef> Entry<R> {
    /// The pruned view: references that are still alive, in order.
    /// Recomputed on every call since liveness can change between calls.
    pub fn alive(&self) -> impl Iterator<Item = &R> + '_ {
        self.items.iter().filter(|item| item.is_alive())
    }

    /// True if nothing in this entry is alive (or it never held anything).
    pub fn is_dead(&self) -> bool {
        self.alive().next().is_none()
    }

    /// Positional comparison of the two pruned views.
    pub fn same_items(&self, other: &Self) -> bool {
        self.alive()
            .zip_longest(other.alive())
            .all(|pair| matches!(pair, EitherOrBoth::Both(a, b) if a.same_item(b)))
    }

    /// True if `self` is dead, or its pruned view matches `other`'s.
    ///
    /// Only the receiver is checked for being dead: a dead entry is
    /// interchangeable with anything, while a live entry compared against a
    /// dead one is only equivalent if it is dead too. Navigation relies on
    /// this ordering, so callers must not swap the arguments.
    pub fn is_null_or_equal(&self, other: &Self) -> bool {
        self.is_dead() || self.same_items(other)
    }
}

impl<R> Default for Entry<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R> From<Vec<R>> for Entry<R> {
    fn from(items: Vec<R>) -> Self {
        Self::new(items)
    }
}

impl<R> FromIterator<R> for Entry<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
