pub mod common;
pub mod entry;

pub use common::{Displayable, Identifiable};
pub use entry::{Entry, EntryKind, NewEntry, Stamp};
