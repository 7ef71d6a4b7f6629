//! Central store for multi-email field state.
//!
//! The store owns every field's committed list and buffer and is the only
//! mutation path for them; all edits go through the commit pipeline or the
//! explicit removal/reset commands. It is UI-agnostic: commands return the
//! [`Notice`]s they produced and the integration layer decides what to do
//! with them.

use std::collections::HashMap;

use crate::config::{Classifier, FieldConfig};
use crate::events::{Notice, Trigger};
use crate::id::{FieldId, TicketId};
use crate::pipeline::{self, eq_case_insensitive};
use crate::state::FieldState;

/// Central store for multi-email input fields.
///
/// # Example
///
/// ```
/// use chips_core::{FieldConfig, FieldId, MultiEmailStore, Trigger};
///
/// let mut store = MultiEmailStore::new();
/// let id = FieldId::from_raw(1);
/// store.register(id, FieldConfig::default());
///
/// store.process_input(id, "a@b.com, not-yet", Trigger::Typing);
/// assert_eq!(store.emails(id), Some(&["a@b.com".to_string()][..]));
/// assert_eq!(store.buffer(id), Some("not-yet"));
/// ```
#[derive(Default)]
pub struct MultiEmailStore {
    fields: HashMap<FieldId, FieldEntry>,
    // Monotonic across the whole store; doubles as the run-generation
    // discipline for stale resolutions (see the pipeline module docs).
    next_ticket: u64,
}

struct FieldEntry {
    config: FieldConfig,
    state: FieldState,
}

impl MultiEmailStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field with its configuration and seed state.
    ///
    /// Seed entries are filtered through the synchronous validation path and
    /// deduplicated like any other commit. Registering an id twice is a
    /// no-op, like `ensure_initial` semantics elsewhere in the engine.
    pub fn register(&mut self, id: FieldId, config: FieldConfig) {
        if self.fields.contains_key(&id) {
            return;
        }
        let mut state = FieldState {
            buffer: config.initial_input_value.clone(),
            ..FieldState::default()
        };
        for entry in &config.initial_emails {
            let Some(value) = passes_sync(&config, entry) else {
                log::debug!(target: "chips.store", "seed entry {:?} rejected", entry);
                continue;
            };
            if !config.allow_duplicate
                && state.emails.iter().any(|e| eq_case_insensitive(e, &value))
            {
                continue;
            }
            state.emails.push(value);
        }
        self.fields.insert(id, FieldEntry { config, state });
    }

    /// Returns `true` if an entry exists for this field.
    pub fn is_registered(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    /// Run the commit pipeline over `value`.
    ///
    /// This is the entry point for every input-changing action: keystrokes
    /// ([`Trigger::Typing`]), Enter or a trailing-delimiter paste
    /// ([`Trigger::Commit`]), and focus loss ([`Trigger::Blur`]).
    pub fn process_input(&mut self, id: FieldId, value: &str, trigger: Trigger) -> Vec<Notice> {
        let Some(entry) = self.fields.get_mut(&id) else {
            log::trace!(target: "chips.store", "process_input on unregistered field {id:?}");
            return Vec::new();
        };
        pipeline::process_input(
            id,
            &mut entry.config,
            &mut entry.state,
            &mut self.next_ticket,
            value,
            trigger,
        )
    }

    /// Deliver the outcome of a deferred validation.
    ///
    /// `Err` is treated as a rejected check (the candidate classifies
    /// `Invalid`). Resolutions whose ticket no longer matches the suspended
    /// run are dropped.
    pub fn resolve_validation(
        &mut self,
        id: FieldId,
        ticket: TicketId,
        result: Result<bool, String>,
    ) -> Vec<Notice> {
        let Some(entry) = self.fields.get_mut(&id) else {
            log::trace!(target: "chips.store", "resolution for unregistered field {id:?}");
            return Vec::new();
        };
        pipeline::resolve_validation(
            id,
            &mut entry.config,
            &mut entry.state,
            &mut self.next_ticket,
            ticket,
            result,
        )
    }

    /// Remove the committed entry at `index`, shifting later entries left.
    ///
    /// Out-of-range indices are a safe no-op. Emits a list-changed notice
    /// only when a removal actually occurred.
    pub fn remove_at(&mut self, id: FieldId, index: usize) -> Vec<Notice> {
        let Some(entry) = self.fields.get_mut(&id) else {
            return Vec::new();
        };
        if index >= entry.state.emails.len() {
            log::trace!(target: "chips.store", "remove_at({index}) out of range, ignoring");
            return Vec::new();
        }
        entry.state.emails.remove(index);
        vec![Notice::ListChanged(entry.state.emails.clone())]
    }

    /// Remove the last committed entry, but only while the buffer is empty.
    ///
    /// The conventional binding is Backspace in an empty input.
    pub fn remove_last(&mut self, id: FieldId) -> Vec<Notice> {
        let Some(entry) = self.fields.get_mut(&id) else {
            return Vec::new();
        };
        if !entry.state.buffer.is_empty() || entry.state.emails.is_empty() {
            return Vec::new();
        }
        entry.state.emails.pop();
        vec![Notice::ListChanged(entry.state.emails.clone())]
    }

    /// Replace the committed list wholesale with the subset of `entries`
    /// passing the synchronous validation path.
    ///
    /// No merging with the existing list takes place; this is for externally
    /// driven reinitialization, not incremental editing. The buffer is left
    /// untouched.
    pub fn reset_from(&mut self, id: FieldId, entries: &[String]) -> Vec<Notice> {
        let Some(entry) = self.fields.get_mut(&id) else {
            return Vec::new();
        };
        let mut emails: Vec<String> = Vec::new();
        for candidate in entries {
            let Some(value) = passes_sync(&entry.config, candidate) else {
                continue;
            };
            if !entry.config.allow_duplicate
                && emails.iter().any(|e| eq_case_insensitive(e, &value))
            {
                continue;
            }
            emails.push(value);
        }
        if emails == entry.state.emails {
            return Vec::new();
        }
        entry.state.emails = emails;
        vec![Notice::ListChanged(entry.state.emails.clone())]
    }

    /// The committed list for this field, if registered.
    pub fn emails(&self, id: FieldId) -> Option<&[String]> {
        self.fields.get(&id).map(|e| e.state.emails.as_slice())
    }

    /// The residual buffer for this field, if registered.
    pub fn buffer(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).map(|e| e.state.buffer.as_str())
    }

    /// Returns `true` while a deferred validation is in flight.
    pub fn is_spinning(&self, id: FieldId) -> bool {
        self.fields.get(&id).is_some_and(|e| e.state.spinning)
    }

    /// Number of committed entries (0 for unregistered fields).
    pub fn len(&self, id: FieldId) -> usize {
        self.fields.get(&id).map_or(0, |e| e.state.emails.len())
    }

    /// Returns `true` if the field has no committed entries.
    pub fn is_empty(&self, id: FieldId) -> bool {
        self.len(id) == 0
    }
}

/// The synchronous validation path used for seeding and resets.
///
/// Deferred classifiers cannot be awaited here, so they fall back to the
/// built-in structural check.
fn passes_sync(config: &FieldConfig, candidate: &str) -> Option<String> {
    let accepted = match &config.classifier {
        Classifier::Builtin | Classifier::Deferred(_) => address::is_address(candidate),
        Classifier::Custom(check) => check(candidate),
    };
    if accepted {
        return Some(candidate.to_string());
    }
    if config.allow_display_name {
        if let Some(entry) = address::split_display_name(candidate) {
            let value = if config.strip_display_name {
                entry.address.to_string()
            } else {
                candidate.to_string()
            };
            return Some(value);
        }
    }
    None
}
