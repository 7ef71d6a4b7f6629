//! Internal per-field state.

use crate::pipeline::SuspendedRun;

/// State for a single multi-email field.
///
/// Not exposed publicly; owned and mutated by
/// [`MultiEmailStore`](crate::MultiEmailStore) through the commit pipeline.
/// The committed list and the buffer are jointly exhaustive for unsaved user
/// intent: no other place holds address data.
#[derive(Default)]
pub(crate) struct FieldState {
    /// Committed entries in insertion order.
    pub emails: Vec<String>,
    /// Residual text not yet committed. Fully replaced on every run.
    pub buffer: String,
    /// True while a deferred validation is in flight for this field.
    pub spinning: bool,
    /// A run suspended at a `Pending` classification, if any. At most one
    /// per field; starting a new run abandons it.
    pub suspended: Option<SuspendedRun>,
}
