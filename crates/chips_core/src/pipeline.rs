//! The commit pipeline: tokenize, classify, deduplicate, settle.
//!
//! A run walks `Splitting -> PerTokenLoop -> Settling`. Deferred
//! classification suspends the loop at an explicit [`SuspendedRun`] object
//! (never closure-captured state) and resumes when the matching resolution
//! arrives. Tickets are allocated from one monotonic counter per store, so a
//! ticket comparison is also a run-generation check: a resolution for any
//! abandoned run can never match the ticket of the run currently suspended.

use std::collections::VecDeque;

use crate::config::{Classifier, FieldConfig};
use crate::events::{DeferredRequest, Notice, Trigger};
use crate::id::{FieldId, TicketId};
use crate::state::FieldState;
use crate::tokenize::{self, Tokenized};

/// A pipeline run parked at a `Pending` classification.
pub(crate) struct SuspendedRun {
    /// Ticket the resolution must present.
    pub ticket: TicketId,
    /// The token under validation.
    pub token: String,
    /// Tokens not yet processed, in order.
    pub remaining: VecDeque<String>,
    /// Tokens accepted so far, awaiting settling.
    pub commits: Vec<String>,
    /// Buffer candidate produced by the loop so far.
    pub residue: String,
}

/// Loop state for an active (non-suspended) run.
struct RunData {
    remaining: VecDeque<String>,
    commits: Vec<String>,
    residue: String,
}

impl RunData {
    fn over(tokens: VecDeque<String>) -> Self {
        Self {
            remaining: tokens,
            commits: Vec::new(),
            residue: String::new(),
        }
    }
}

/// Entry point for every input-changing action.
pub(crate) fn process_input(
    field: FieldId,
    config: &mut FieldConfig,
    state: &mut FieldState,
    next_ticket: &mut u64,
    value: &str,
    trigger: Trigger,
) -> Vec<Notice> {
    if trigger == Trigger::Blur && config.suppress_blur_validation {
        return Vec::new();
    }

    // A newer run supersedes any suspended one. Its in-flight resolution
    // will present a ticket that no longer matches and be dropped.
    if let Some(run) = state.suspended.take() {
        log::trace!(
            target: "chips.pipeline",
            "abandoning suspended run for ticket {:?}",
            run.ticket
        );
        state.spinning = false;
    }

    let mut notices = Vec::new();
    if value.is_empty() {
        set_buffer(state, String::new(), &mut notices);
        return notices;
    }

    match tokenize::split(value, &config.delimiters()) {
        Tokenized::Single(raw) => {
            if trigger == Trigger::Typing {
                // Mid-typing a single address: buffer it, validate nothing.
                set_buffer(state, raw, &mut notices);
                return notices;
            }
            if let Some(gate) = &config.capacity {
                if !gate(state.emails.len()) {
                    log::debug!(
                        target: "chips.pipeline",
                        "capacity gate refused a commit at {} entries",
                        state.emails.len()
                    );
                    notices.push(Notice::CapacityRefused);
                    return notices;
                }
            }
            let token = raw.trim().to_string();
            if token.is_empty() {
                set_buffer(state, String::new(), &mut notices);
                return notices;
            }
            drive(field, config, state, next_ticket, RunData::over(VecDeque::from([token])))
        }
        Tokenized::Batch(tokens) => {
            drive(field, config, state, next_ticket, RunData::over(tokens.into()))
        }
    }
}

/// Feed the result of a deferred check back into the suspended run.
pub(crate) fn resolve_validation(
    field: FieldId,
    config: &mut FieldConfig,
    state: &mut FieldState,
    next_ticket: &mut u64,
    ticket: TicketId,
    result: Result<bool, String>,
) -> Vec<Notice> {
    let Some(run) = state.suspended.take() else {
        log::trace!(
            target: "chips.pipeline",
            "dropping resolution for ticket {:?}: no suspended run",
            ticket
        );
        return Vec::new();
    };
    if run.ticket != ticket {
        log::trace!(
            target: "chips.pipeline",
            "dropping stale resolution for ticket {:?}: current is {:?}",
            ticket,
            run.ticket
        );
        state.suspended = Some(run);
        return Vec::new();
    }

    // Cleared unconditionally, whatever the outcome.
    state.spinning = false;

    let accepted = match result {
        Ok(accepted) => accepted,
        Err(err) => {
            log::warn!(
                target: "chips.pipeline",
                "deferred validation of {:?} failed ({err}); treating as invalid",
                run.token
            );
            false
        }
    };

    let mut data = RunData {
        remaining: run.remaining,
        commits: run.commits,
        residue: run.residue,
    };
    apply_verdict(config, &state.emails, &mut data, run.token, accepted);
    drive(field, config, state, next_ticket, data)
}

/// The per-token loop. Consumes tokens FIFO until the batch is exhausted or
/// a deferred classification suspends the run.
fn drive(
    field: FieldId,
    config: &mut FieldConfig,
    state: &mut FieldState,
    next_ticket: &mut u64,
    mut run: RunData,
) -> Vec<Notice> {
    while let Some(token) = run.remaining.pop_front() {
        let verdict = match &mut config.classifier {
            Classifier::Builtin => address::is_address(&token),
            Classifier::Custom(check) => check(&token),
            Classifier::Deferred(start) => {
                *next_ticket += 1;
                let ticket = TicketId::from_raw(*next_ticket);
                log::debug!(
                    target: "chips.pipeline",
                    "deferring validation of {:?} under ticket {:?}",
                    token,
                    ticket
                );
                state.spinning = true;
                start(DeferredRequest {
                    field,
                    ticket,
                    candidate: token.clone(),
                });
                state.suspended = Some(SuspendedRun {
                    ticket,
                    token,
                    remaining: run.remaining,
                    commits: run.commits,
                    residue: run.residue,
                });
                // Settling has not run yet; notices come with the resolution.
                return Vec::new();
            }
        };
        apply_verdict(config, &state.emails, &mut run, token, verdict);
    }
    settle(config, state, run)
}

/// The Valid/Invalid branch for one token, including the display-name retry.
fn apply_verdict(
    config: &FieldConfig,
    committed: &[String],
    run: &mut RunData,
    token: String,
    accepted: bool,
) {
    if accepted {
        try_commit(config, committed, run, token);
        return;
    }

    if config.allow_display_name {
        if let Some(entry) = address::split_display_name(&token) {
            let value = if config.strip_display_name {
                entry.address.to_string()
            } else {
                token
            };
            try_commit(config, committed, run, value);
            return;
        }
    }

    if run.remaining.is_empty() {
        // Trailing partial entry: survives into the buffer for further editing.
        run.residue = token;
    } else {
        // Interior junk is dropped, never preserved.
        log::trace!(target: "chips.pipeline", "dropping interior token {:?}", token);
    }
}

fn try_commit(config: &FieldConfig, committed: &[String], run: &mut RunData, value: String) {
    if !config.allow_duplicate {
        let duplicate = committed
            .iter()
            .chain(run.commits.iter())
            .any(|existing| eq_case_insensitive(existing, &value));
        if duplicate {
            log::trace!(target: "chips.pipeline", "dropping duplicate {:?}", value);
            return;
        }
    }
    run.commits.push(value);
}

/// Append the run's commits and replace the buffer, emitting notices.
fn settle(config: &FieldConfig, state: &mut FieldState, run: RunData) -> Vec<Notice> {
    let mut appended = 0usize;
    for value in run.commits {
        // Re-check against the live list: entries may have been removed or
        // reset while this run was suspended.
        if !config.allow_duplicate
            && state.emails.iter().any(|e| eq_case_insensitive(e, &value))
        {
            continue;
        }
        state.emails.push(value);
        appended += 1;
    }

    let mut notices = Vec::new();
    if appended > 0 {
        log::debug!(
            target: "chips.pipeline",
            "committed {appended} entr{} ({} total)",
            if appended == 1 { "y" } else { "ies" },
            state.emails.len()
        );
        notices.push(Notice::ListChanged(state.emails.clone()));
    }
    set_buffer(state, run.residue, &mut notices);
    notices
}

fn set_buffer(state: &mut FieldState, value: String, notices: &mut Vec<Notice>) {
    if state.buffer != value {
        state.buffer = value;
        notices.push(Notice::BufferChanged(state.buffer.clone()));
    }
}

pub(crate) fn eq_case_insensitive(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
