//! Opaque identifiers for input fields and in-flight validations.
//!
//! Both types are plain `u64` newtypes so the core stays decoupled from any
//! DOM, widget-tree, or framework identifier scheme. Integration layers
//! convert their native ids at call boundaries.

/// Opaque identifier for one multi-email field within a
/// [`MultiEmailStore`](crate::MultiEmailStore).
///
/// The raw value has no meaning inside this crate; it is only a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldId(u64);

impl FieldId {
    /// Create a `FieldId` from a raw u64 value.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the underlying raw value.
    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for FieldId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

/// Identifier for one in-flight deferred validation.
///
/// Allocated by the store when a run suspends on a deferred classifier and
/// handed back through [`resolve_validation`](crate::MultiEmailStore::resolve_validation).
/// A ticket is only ever valid for the run that created it; resolutions with
/// a stale ticket are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TicketId(u64);

impl TicketId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_id_round_trip() {
        let id = FieldId::from_raw(7);
        assert_eq!(id.as_raw(), 7);
        assert_eq!(FieldId::from(7u64), id);
    }

    #[test]
    fn ticket_ids_compare_by_value() {
        assert_eq!(TicketId::from_raw(1), TicketId::from_raw(1));
        assert_ne!(TicketId::from_raw(1), TicketId::from_raw(2));
    }
}
