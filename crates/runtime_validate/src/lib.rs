//! Background runtime for deferred address checks.
//!
//! The core suspends a pipeline run when a [`Classifier::Deferred`]
//! classifier is asked for a verdict; this crate provides the stock worker
//! that actually executes the check off the driving thread. Commands flow in
//! over one mpsc channel, resolutions flow out over another, and the
//! integration layer forwards each [`ValidateEvent`] into
//! [`MultiEmailStore::resolve_validation`].
//!
//! There is no cancellation: a check for an abandoned run completes anyway
//! and its resolution is dropped at the store boundary.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use chips_core::{Classifier, FieldId, TicketId};

/// Work order for the validation worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidateCommand {
    Check {
        field: FieldId,
        ticket: TicketId,
        candidate: String,
    },
}

/// Resolution produced by the validation worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidateEvent {
    Checked {
        field: FieldId,
        ticket: TicketId,
        result: Result<bool, String>,
    },
}

/// The user-supplied checking function. `Err` marks a check that could not
/// be carried out (network failure, timeout); the core treats it as a
/// rejected candidate.
pub type Checker = Arc<dyn Fn(&str) -> Result<bool, String> + Send + Sync>;

/// Spawn the validation worker thread.
///
/// The worker runs until the command channel closes.
pub fn start_validation_runtime(
    cmd_rx: Receiver<ValidateCommand>,
    evt_tx: Sender<ValidateEvent>,
    checker: Checker,
) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ValidateCommand::Check {
                    field,
                    ticket,
                    candidate,
                } => {
                    log::trace!(
                        target: "runtime.validate",
                        "checking {candidate:?} for ticket {ticket:?}"
                    );
                    let result = checker(&candidate);
                    let _ = evt_tx.send(ValidateEvent::Checked {
                        field,
                        ticket,
                        result,
                    });
                }
            }
        }
        log::debug!(target: "runtime.validate", "command channel closed, worker exiting");
    });
}

/// Build a [`Classifier::Deferred`] that forwards every request to the
/// validation runtime over `cmd_tx`.
pub fn deferred_classifier(cmd_tx: Sender<ValidateCommand>) -> Classifier {
    Classifier::Deferred(Box::new(move |req| {
        let _ = cmd_tx.send(ValidateCommand::Check {
            field: req.field,
            ticket: req.ticket,
            candidate: req.candidate,
        });
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chips_core::{FieldConfig, MultiEmailStore, Trigger};
    use std::sync::mpsc;

    #[test]
    fn worker_checks_and_reports_back() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        start_validation_runtime(
            cmd_rx,
            evt_tx,
            Arc::new(|candidate: &str| Ok(candidate.ends_with("@ok.example"))),
        );

        let field = FieldId::from_raw(1);
        let ticket = TicketId::from_raw(1);
        cmd_tx
            .send(ValidateCommand::Check {
                field,
                ticket,
                candidate: "user@ok.example".to_string(),
            })
            .unwrap();

        assert_eq!(
            evt_rx.recv().unwrap(),
            ValidateEvent::Checked {
                field,
                ticket,
                result: Ok(true),
            }
        );
    }

    #[test]
    fn checker_errors_propagate_as_err_results() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        start_validation_runtime(
            cmd_rx,
            evt_tx,
            Arc::new(|_: &str| Err("backend unreachable".to_string())),
        );

        cmd_tx
            .send(ValidateCommand::Check {
                field: FieldId::from_raw(1),
                ticket: TicketId::from_raw(1),
                candidate: "user@x.com".to_string(),
            })
            .unwrap();

        let ValidateEvent::Checked { result, .. } = evt_rx.recv().unwrap();
        assert_eq!(result, Err("backend unreachable".to_string()));
    }

    #[test]
    fn end_to_end_through_the_store() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        start_validation_runtime(
            cmd_rx,
            evt_tx,
            Arc::new(|candidate: &str| Ok(candidate.contains("@corp."))),
        );

        let field = FieldId::from_raw(7);
        let mut store = MultiEmailStore::new();
        store.register(
            field,
            FieldConfig {
                classifier: deferred_classifier(cmd_tx),
                ..FieldConfig::default()
            },
        );

        store.process_input(field, "jane@corp.example, jane@gmail.com", Trigger::Typing);
        while store.is_spinning(field) {
            let ValidateEvent::Checked { field, ticket, result } = evt_rx.recv().unwrap();
            store.resolve_validation(field, ticket, result);
        }

        assert_eq!(
            store.emails(field),
            Some(&["jane@corp.example".to_string()][..])
        );
        assert_eq!(store.buffer(field), Some("jane@gmail.com"));
    }
}
