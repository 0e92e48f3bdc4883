// history.rs

use log::{debug, trace};

use crate::entry::Entry;
use crate::item::ItemRef;

/// Maximum number of entries a history keeps before evicting the oldest.
pub const MAX_HISTORY: usize = 15;

/// A bounded back/forward log of selections with a cursor on the current one.
///
/// Entries after the cursor are the "forward" branch and are dropped as soon
/// as a new selection is committed. Stale entries (all references dead, or
/// identical to the entry being navigated away from) are not cleaned up
/// eagerly; `back` and `forward` delete them as they walk over them.
#[derive(Debug, Clone)]
pub struct History<R> {
    entries: Vec<Entry<R>>,
    cursor: Option<usize>,
}

impl<R> History<R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_HISTORY),
            cursor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        MAX_HISTORY
    }

    /// Index of the current entry, `None` while the history is empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Entry<R>> {
        self.cursor.map(|c| &self.entries[c])
    }

    pub fn get(&self, n: usize) -> Option<&Entry<R>> {
        self.entries.get(n)
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[Entry<R>] {
        &self.entries
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    fn check_invariants(&self) {
        debug_assert!(self.entries.len() <= MAX_HISTORY);
        match self.cursor {
            Some(c) => debug_assert!(c < self.entries.len()),
            None => debug_assert!(self.entries.is_empty()),
        }
    }
}

impl<R: ItemRef> History<R> {
    /// Commits `entry` as the current selection.
    ///
    /// Returns false, leaving the history untouched, when `entry` is dead or
    /// matches the current entry. Otherwise the forward branch is discarded,
    /// the oldest entry is evicted if the history is full, and `entry`
    /// becomes the new tail.
    pub fn add(&mut self, entry: Entry<R>) -> bool {
        let unchanged = match self.current() {
            Some(current) => entry.is_null_or_equal(current),
            None => entry.is_null_or_equal(&Entry::empty()),
        };
        if unchanged {
            return false;
        }

        if self.entries.len() == MAX_HISTORY {
            self.entries.remove(0);
            self.cursor = self.cursor.and_then(|c| c.checked_sub(1));
            trace!("history full, evicted oldest entry");
        }

        let next = self.cursor.map_or(0, |c| c + 1);
        if next < self.entries.len() {
            trace!("discarding {} forward entries", self.entries.len() - next);
        }
        self.entries.truncate(next);
        self.entries.push(entry);
        self.cursor = Some(next);

        self.check_invariants();
        true
    }

    /// Steps toward older entries.
    ///
    /// Every entry walked over that is dead or equal to the entry being left
    /// is removed, so the cursor lands on the first genuinely different
    /// selection (or on the oldest slot). Returns the landed entry when the
    /// host should select it, i.e. when something in it is still alive.
    pub fn back(&mut self) -> Option<&Entry<R>> {
        let mut cursor = match self.cursor {
            Some(c) if c > 0 => c,
            _ => return None,
        };

        let mut leaving = cursor;
        let mut pruned = 0;
        while cursor > 0 {
            cursor -= 1;
            if !self.entries[cursor].is_null_or_equal(&self.entries[leaving]) {
                break;
            }
            // The slot at `cursor` now holds the next newer entry; the next
            // pass steps past it again.
            self.entries.remove(cursor);
            leaving -= 1;
            pruned += 1;
        }

        self.land(cursor, pruned, "back")
    }

    /// Steps toward newer entries, pruning the same way as [`History::back`].
    pub fn forward(&mut self) -> Option<&Entry<R>> {
        let mut cursor = match self.cursor {
            Some(c) if c + 1 < self.entries.len() => c,
            _ => return None,
        };

        let leaving = cursor;
        let mut pruned = 0;
        while cursor + 1 < self.entries.len() {
            cursor += 1;
            if !self.entries[cursor].is_null_or_equal(&self.entries[leaving]) {
                break;
            }
            self.entries.remove(cursor);
            cursor -= 1;
            pruned += 1;
        }

        self.land(cursor, pruned, "forward")
    }

    fn land(&mut self, cursor: usize, pruned: usize, direction: &str) -> Option<&Entry<R>> {
        self.cursor = Some(cursor);
        self.check_invariants();
        debug!(
            "moved {} to entry {} of {} (pruned {})",
            direction,
            cursor,
            self.entries.len(),
            pruned
        );

        let landed = &self.entries[cursor];
        if landed.is_dead() {
            None
        } else {
            Some(landed)
        }
    }
}

impl<R> Default for History<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::{Rc, Weak};

    type Obj = Rc<&'static str>;
    type Sel = Entry<Weak<&'static str>>;

    fn obj(name: &'static str) -> Obj {
        Rc::new(name)
    }

    fn sel(objects: &[&Obj]) -> Sel {
        objects.iter().map(|o| Rc::downgrade(o)).collect()
    }

    fn names(entry: &Sel) -> Vec<&'static str> {
        entry.alive().filter_map(|w| w.upgrade()).map(|rc| *rc).collect()
    }

    fn current_names(history: &History<Weak<&'static str>>) -> Vec<&'static str> {
        history.current().map(names).unwrap_or_default()
    }

    fn history_of(objects: &[&Obj]) -> History<Weak<&'static str>> {
        let mut history = History::new();
        for o in objects {
            assert!(history.add(sel(&[*o])));
        }
        history
    }

    #[test]
    fn new_history_is_empty() {
        let mut history: History<Weak<&'static str>> = History::new();
        assert!(history.is_empty());
        assert_eq!(history.cursor(), None);
        assert!(history.current().is_none());
        assert!(history.back().is_none());
        assert!(history.forward().is_none());
        assert_eq!(history.cursor(), None);
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn add_moves_cursor_to_new_tail() {
        let (a, b) = (obj("a"), obj("b"));
        let history = history_of(&[&a, &b]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(current_names(&history), vec!["b"]);
    }

    #[test]
    fn adding_current_selection_again_is_a_noop() {
        let (a, b) = (obj("a"), obj("b"));
        let mut history = history_of(&[&a]);
        assert!(history.add(sel(&[&a, &b])));
        assert!(!history.add(sel(&[&a, &b])));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn adding_a_dead_selection_is_a_noop() {
        let a = obj("a");
        let mut history: History<Weak<&'static str>> = History::new();
        assert!(!history.add(Sel::empty()));
        assert!(history.is_empty());

        assert!(history.add(sel(&[&a])));
        let gone = obj("gone");
        let stale = sel(&[&gone]);
        drop(gone);
        assert!(!history.add(stale));
        assert!(!history.add(Sel::empty()));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn full_history_evicts_oldest() {
        let objects: Vec<Obj> = (0..20).map(|_| obj("x")).collect();
        let mut history: History<Weak<&'static str>> = History::new();
        for o in &objects {
            assert!(history.add(sel(&[o])));
            assert!(history.len() <= MAX_HISTORY);
        }
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.cursor(), Some(MAX_HISTORY - 1));

        let first = &history.entries()[0].items()[0];
        assert!(first.same_item(&Rc::downgrade(&objects[5])));
    }

    #[test]
    fn eviction_while_behind_the_tail_keeps_cursor_on_same_entry() {
        let objects: Vec<Obj> = (0..MAX_HISTORY).map(|_| obj("x")).collect();
        let refs: Vec<&Obj> = objects.iter().collect();
        let mut history = history_of(&refs);
        for _ in 0..3 {
            history.back();
        }
        assert_eq!(history.cursor(), Some(11));

        let fresh = obj("fresh");
        assert!(history.add(sel(&[&fresh])));
        // One evicted at the front, three forward entries discarded.
        assert_eq!(history.len(), 12);
        assert_eq!(history.cursor(), Some(11));
        assert!(history.entries()[10].items()[0].same_item(&Rc::downgrade(&objects[11])));
    }

    #[test]
    fn commit_after_back_discards_forward_branch() {
        let (a, b, c, d) = (obj("a"), obj("b"), obj("c"), obj("d"));
        let mut history = history_of(&[&a, &b, &c]);
        history.back();
        assert_eq!(current_names(&history), vec!["b"]);

        assert!(history.add(sel(&[&d])));
        assert_eq!(history.len(), 3);
        assert!(!history.can_go_forward());
        assert!(history.forward().is_none());
        let all: Vec<_> = history.entries().iter().map(names).collect();
        assert_eq!(all, vec![vec!["a"], vec!["b"], vec!["d"]]);
    }

    #[test]
    fn back_then_forward_returns_to_tail() {
        let (a, b, c) = (obj("a"), obj("b"), obj("c"));
        let mut history = history_of(&[&a, &b, &c]);

        let landed = history.back().map(names);
        assert_eq!(landed, Some(vec!["b"]));
        let landed = history.forward().map(names);
        assert_eq!(landed, Some(vec!["c"]));
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn back_and_forward_are_noops_at_the_ends() {
        let (a, b) = (obj("a"), obj("b"));
        let mut history = history_of(&[&a, &b]);
        assert!(history.forward().is_none());
        assert_eq!(history.cursor(), Some(1));

        history.back();
        assert!(history.back().is_none());
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn back_removes_dead_entry_and_lands_on_older_one() {
        let (a, b, c) = (obj("a"), obj("b"), obj("c"));
        let mut history = history_of(&[&a, &b, &c]);
        drop(b);

        let landed = history.back().map(names);
        assert_eq!(landed, Some(vec!["a"]));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn back_collapses_entries_that_became_equal_to_the_one_left() {
        let (a, c, d) = (obj("a"), obj("c"), obj("d"));
        let mut history: History<Weak<&'static str>> = History::new();
        history.add(sel(&[&a]));
        history.add(sel(&[&c, &d]));
        history.add(sel(&[&c]));
        drop(d);

        let landed = history.back().map(names);
        assert_eq!(landed, Some(vec!["a"]));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn back_compares_against_the_entry_left_not_its_neighbour() {
        // [a] [b d] [b] [c] with d destroyed reads as [a] [b] [b] [c]. The
        // adjacent pair of [b]s survives until a step away from one of them.
        let (a, b, c, d) = (obj("a"), obj("b"), obj("c"), obj("d"));
        let mut history: History<Weak<&'static str>> = History::new();
        history.add(sel(&[&a]));
        history.add(sel(&[&b, &d]));
        history.add(sel(&[&b]));
        history.add(sel(&[&c]));
        drop(d);

        let landed = history.back().map(names);
        assert_eq!(landed, Some(vec!["b"]));
        assert_eq!(history.len(), 4);
        assert_eq!(history.cursor(), Some(2));

        let landed = history.back().map(names);
        assert_eq!(landed, Some(vec!["a"]));
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn back_can_remove_the_oldest_entry() {
        let (a, b) = (obj("a"), obj("b"));
        let mut history = history_of(&[&a, &b]);
        drop(a);

        let landed = history.back().map(names);
        assert_eq!(landed, Some(vec!["b"]));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn back_over_an_all_dead_past_leaves_only_the_current_entry() {
        let (a, b, c) = (obj("a"), obj("b"), obj("c"));
        let mut history = history_of(&[&a, &b, &c]);
        drop(a);
        drop(b);

        let landed = history.back().map(names);
        assert_eq!(landed, Some(vec!["c"]));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn leaving_a_dead_entry_stops_at_the_first_live_one() {
        let (a, b, c) = (obj("a"), obj("b"), obj("c"));
        let mut history = history_of(&[&a, &b, &c]);
        drop(c);

        let landed = history.back().map(names);
        assert_eq!(landed, Some(vec!["b"]));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn forward_removes_dead_entries() {
        let (a, b, c) = (obj("a"), obj("b"), obj("c"));
        let mut history = history_of(&[&a, &b, &c]);
        history.back();
        history.back();
        assert_eq!(history.cursor(), Some(0));
        drop(b);

        let landed = history.forward().map(names);
        assert_eq!(landed, Some(vec!["c"]));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn forward_collapses_a_run_of_dead_entries() {
        let (a, b, c, d) = (obj("a"), obj("b"), obj("c"), obj("d"));
        let mut history = history_of(&[&a, &b, &c, &d]);
        for _ in 0..3 {
            history.back();
        }
        assert_eq!(history.cursor(), Some(0));
        drop(b);
        drop(c);

        let landed = history.forward().map(names);
        assert_eq!(landed, Some(vec!["d"]));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(current_names(&history), vec!["d"]);
    }

    #[test]
    fn forward_removes_entries_that_became_equal_to_the_one_left() {
        let (a, b, x) = (obj("a"), obj("b"), obj("x"));
        let mut history = History::new();
        assert!(history.add(sel(&[&a])));
        assert!(history.add(sel(&[&a, &x])));
        assert!(history.add(sel(&[&b])));
        history.back();
        history.back();
        assert_eq!(history.cursor(), Some(0));
        drop(x);

        let landed = history.forward().map(names);
        assert_eq!(landed, Some(vec!["b"]));
        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(names(history.get(0).unwrap()), vec!["a"]);
    }

    #[test]
    fn forward_over_a_dead_tail_stays_put() {
        let (a, b) = (obj("a"), obj("b"));
        let mut history = history_of(&[&a, &b]);
        history.back();
        drop(b);

        let landed = history.forward().map(names);
        assert_eq!(landed, Some(vec!["a"]));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn landing_on_a_dead_entry_asks_for_no_selection() {
        let (a, b) = (obj("a"), obj("b"));
        let mut history = history_of(&[&a, &b]);
        history.back();
        drop(a);
        drop(b);

        assert!(history.forward().is_none());
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn can_go_flags_track_cursor() {
        let (a, b) = (obj("a"), obj("b"));
        let mut history = history_of(&[&a]);
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
        history.add(sel(&[&b]));
        assert!(history.can_go_back());
        history.back();
        assert!(history.can_go_forward());
        assert!(!history.can_go_back());
    }
}
