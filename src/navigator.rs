// navigator.rs

use log::debug;

use crate::entry::Entry;
use crate::history::History;
use crate::item::ItemRef;

/// The host side of navigation: makes an entry the active selection.
pub trait SelectionHost<R> {
    fn apply_selection(&mut self, entry: &Entry<R>);
}

impl<R, F> SelectionHost<R> for F
where
    F: FnMut(&Entry<R>),
{
    fn apply_selection(&mut self, entry: &Entry<R>) {
        self(entry)
    }
}

/// Owns the selection history of one host session.
///
/// The host reports every selection change through
/// [`Navigator::notify_selection_changed`] (including the initial one at
/// startup) and wires its "navigate back"/"navigate forward" commands to
/// [`Navigator::back`] and [`Navigator::forward`]. Navigation hands the landed
/// entry back to the host through [`SelectionHost::apply_selection`].
pub struct Navigator<R, H> {
    history: History<R>,
    host: H,
}

impl<R, H> Navigator<R, H>
where
    R: ItemRef,
    H: SelectionHost<R>,
{
    pub fn new(host: H) -> Self {
        Self {
            history: History::new(),
            host,
        }
    }

    /// Records a selection observed by the host. Never calls back into the host.
    pub fn notify_selection_changed(&mut self, entry: Entry<R>) -> bool {
        let added = self.history.add(entry);
        if added {
            debug!("recorded selection, history length {}", self.history.len());
        }
        added
    }

    /// Returns true if the host was asked to apply a selection.
    pub fn back(&mut self) -> bool {
        match self.history.back() {
            Some(entry) => {
                self.host.apply_selection(entry);
                true
            }
            None => false,
        }
    }

    /// Returns true if the host was asked to apply a selection.
    pub fn forward(&mut self) -> bool {
        match self.history.forward() {
            Some(entry) => {
                self.host.apply_selection(entry);
                true
            }
            None => false,
        }
    }

    pub fn history(&self) -> &History<R> {
        &self.history
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}
