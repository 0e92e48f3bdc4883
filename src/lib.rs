//! Browser-style back/forward navigation over a bounded history of
//! selections whose items may be destroyed between visits.
//!
//! The engine lives in [`history`] and [`entry`]; [`navigator`] wires it to a
//! host. The remaining modules implement `selhist`, a small terminal host
//! that edits a toy scene.

pub mod builtins;
pub mod completion;
pub mod config;
pub mod entry;
pub mod error;
pub mod history;
pub mod item;
pub mod navigator;
pub mod parser;
pub mod pipeline;
pub mod repl;
pub mod scene;

pub use entry::Entry;
pub use history::{History, MAX_HISTORY};
pub use item::ItemRef;
pub use navigator::{Navigator, SelectionHost};
