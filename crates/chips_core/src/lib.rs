//! # chips_core
//!
//! UI-agnostic tokenize-validate-commit core for multi-email input fields.
//!
//! Free-form text containing addresses separated by arbitrary delimiters is
//! incrementally converted into a committed, de-duplicated list, while
//! unrecognized or incomplete text stays in an editable buffer:
//! - [`MultiEmailStore`]: central store of per-field committed lists and
//!   buffers, keyed by an opaque [`FieldId`]
//! - [`FieldConfig`] / [`Classifier`]: per-field policy, including plugged-in
//!   synchronous or deferred address validation
//! - [`DelimiterSet`]: the token-splitting character class, validated at
//!   configuration time
//!
//! ## Design Principles
//!
//! This crate is intentionally UI-agnostic and does not depend on:
//! - Any graphics or widget framework
//! - An async runtime; deferred validation is plain request/resolution
//!   message passing (the `runtime_validate` crate provides a stock worker)
//! - Platform-specific APIs
//!
//! Commands return the [`Notice`]s they produce instead of invoking
//! callbacks, so the pipeline can be tested independently and reused across
//! frontends. Malformed tokens are a classification outcome, never an error:
//! the only fallible operation is delimiter-class parsing, which fails at
//! configuration time.

mod config;
mod delimiter;
mod events;
mod id;
mod pipeline;
mod state;
mod store;
mod tokenize;

pub use config::{CapacityGate, Classifier, DeferredStart, FieldConfig, SyncCheck};
pub use delimiter::{DelimiterError, DelimiterSet};
pub use events::{DeferredRequest, Notice, Trigger};
pub use id::{FieldId, TicketId};
pub use store::MultiEmailStore;

// Re-exported for integration layers that tokenize outside the pipeline
// (e.g. paste preprocessing).
pub use tokenize::{Tokenized, split};
