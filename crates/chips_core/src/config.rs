//! Per-field configuration.

use crate::delimiter::DelimiterSet;
use crate::events::DeferredRequest;

/// Capacity gate: receives the current committed count and returns whether
/// another commit attempt may proceed.
pub type CapacityGate = Box<dyn Fn(usize) -> bool + Send>;

/// Synchronous external address check.
pub type SyncCheck = Box<dyn Fn(&str) -> bool + Send>;

/// Starter for a deferred address check. Invoked with the request when a run
/// suspends; the implementation hands the request to whatever executes the
/// check (see the `runtime_validate` crate for the stock worker).
pub type DeferredStart = Box<dyn FnMut(DeferredRequest) + Send>;

/// How candidate tokens are classified.
///
/// The variant is chosen once at configuration time; the pipeline never
/// inspects return-value shapes at runtime to tell synchronous and deferred
/// validators apart.
pub enum Classifier {
    /// The built-in structural `local@domain` check from the `address` crate.
    Builtin,
    /// An injected synchronous predicate.
    Custom(SyncCheck),
    /// An injected deferred check; classification suspends the run until the
    /// matching resolution arrives.
    Deferred(DeferredStart),
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::Builtin
    }
}

/// Immutable-per-run configuration for one field.
///
/// Plain struct update syntax is the intended construction style:
///
/// ```
/// use chips_core::FieldConfig;
///
/// let config = FieldConfig {
///     allow_display_name: true,
///     strip_display_name: true,
///     ..FieldConfig::default()
/// };
/// ```
#[derive(Default)]
pub struct FieldConfig {
    /// Overrides the delimiter set. `None` selects the default class for the
    /// current display-name mode (see [`DelimiterSet::default_for`]).
    pub delimiter: Option<DelimiterSet>,
    /// Recognize `"Name <addr>"` entries on the invalid-retry path.
    pub allow_display_name: bool,
    /// Commit only the bracketed address of a display-name entry.
    pub strip_display_name: bool,
    /// Disable case-insensitive deduplication against the committed list.
    pub allow_duplicate: bool,
    /// Token classification strategy.
    pub classifier: Classifier,
    /// Optional gate limiting how many entries may be committed.
    pub capacity: Option<CapacityGate>,
    /// When `false`, blur-triggered runs are suppressed entirely.
    pub suppress_blur_validation: bool,
    /// Seeds the buffer at registration.
    pub initial_input_value: String,
    /// Seeds the committed list at registration, filtered through the
    /// synchronous validation path.
    pub initial_emails: Vec<String>,
}

impl FieldConfig {
    /// The delimiter set this field splits on.
    pub(crate) fn delimiters(&self) -> DelimiterSet {
        self.delimiter
            .clone()
            .unwrap_or_else(|| DelimiterSet::default_for(self.allow_display_name))
    }
}
