//! Events delivered to observers

use crate::toast::{Toast, ToastId};

/// What an observer receives for a channel
#[derive(Debug, Clone, PartialEq)]
pub enum ToastEvent {
    /// A record seen for the first time
    Created(Toast),
    /// An existing record was changed or reopened
    Updated(Toast),
    /// The record with this id should leave the screen
    Dismissed { id: ToastId },
}

impl ToastEvent {
    /// Id of the record this event is about
    pub fn id(&self) -> &ToastId {
        match self {
            ToastEvent::Created(t) | ToastEvent::Updated(t) => &t.id,
            ToastEvent::Dismissed { id } => id,
        }
    }

    /// The full record, unless this is a dismissal
    pub fn toast(&self) -> Option<&Toast> {
        match self {
            ToastEvent::Created(t) | ToastEvent::Updated(t) => Some(t),
            ToastEvent::Dismissed { .. } => None,
        }
    }

    /// Whether this is a dismissal
    pub fn is_dismissal(&self) -> bool {
        matches!(self, ToastEvent::Dismissed { .. })
    }
}
