//! Commands' observable outputs and triggers.
//!
//! The core never holds callbacks. Every command returns the notices it
//! produced and the integration layer dispatches them (to a UI, over a
//! channel, into test assertions), mirroring how the engine's event bus
//! keeps producers and consumers decoupled.

use crate::id::{FieldId, TicketId};

/// What caused a pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// The input value changed while the user is typing. A single
    /// delimiter-free value is buffered, not validated.
    Typing,
    /// An explicit commit action: Enter, or a paste ending in a delimiter.
    Commit,
    /// Focus left the field. Behaves as [`Trigger::Commit`] unless the field
    /// disables blur validation.
    Blur,
}

/// A state change observable by the integration layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// At least one entry was committed or removed; carries the new full list.
    ListChanged(Vec<String>),
    /// The residual input buffer changed; carries the new buffer value.
    BufferChanged(String),
    /// The capacity gate refused a commit attempt. State is unchanged.
    CapacityRefused,
}

/// Handed to a deferred classifier when a run suspends on a candidate.
///
/// The receiver arranges for
/// [`resolve_validation`](crate::MultiEmailStore::resolve_validation) to be
/// called with this ticket once the check completes. There is no
/// cancellation: a resolution for an abandoned run is simply dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeferredRequest {
    pub field: FieldId,
    pub ticket: TicketId,
    pub candidate: String,
}
