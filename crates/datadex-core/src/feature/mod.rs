// ── Feature slices ──
//
// One module per feature: its message enum, request action creators,
// state slice, and pure reducer. Coordinators live in `crate::effects`.

pub mod announcements;
pub mod bookmark;
pub mod feedback;
pub mod issue;
pub mod last_indexed;
pub mod notification;
pub mod popular_tables;
pub mod search;
pub mod table_metadata;
pub mod tags;
pub mod user;

use crate::message::Message;

/// A pure state transition.
///
/// Implementations return `self` untouched for messages that belong to
/// another feature, and never perform I/O.
pub trait Reducer: Sized {
    fn reduce(self, message: &Message) -> Self;
}
