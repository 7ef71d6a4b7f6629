//! Interactive terminal demo for the multi-email input core.
//!
//! Each line typed is processed as a commit-triggered input, so pasting
//! `a@x.com, b@x.com junk` shows the tokenize-validate-commit behavior
//! directly. Commands:
//!
//! - `:rm N`     remove the committed entry at index N
//! - `:reset A,B` replace the committed list from the given values
//! - `:quit`     exit
//!
//! Flags: `--display-name`, `--strip`, `--allow-dup`, `--max N`,
//! `--deferred` (route validation through the background worker with
//! simulated latency).

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chips_core::{FieldConfig, FieldId, MultiEmailStore, Notice, Trigger};
use runtime_validate::{ValidateEvent, deferred_classifier, start_validation_runtime};

struct Options {
    display_name: bool,
    strip: bool,
    allow_dup: bool,
    max: Option<usize>,
    deferred: bool,
}

fn parse_args() -> Options {
    let mut opts = Options {
        display_name: false,
        strip: false,
        allow_dup: false,
        max: None,
        deferred: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--display-name" => opts.display_name = true,
            "--strip" => opts.strip = true,
            "--allow-dup" => opts.allow_dup = true,
            "--deferred" => opts.deferred = true,
            "--max" => match args.next().and_then(|n| n.parse().ok()) {
                Some(n) => opts.max = Some(n),
                None => {
                    eprintln!("--max expects a number");
                    std::process::exit(2);
                }
            },
            other => {
                eprintln!("unknown flag {other:?}");
                std::process::exit(2);
            }
        }
    }
    opts
}

fn main() -> io::Result<()> {
    let opts = parse_args();
    let field = FieldId::from_raw(1);
    let mut store = MultiEmailStore::new();

    let evt_rx = opts.deferred.then(|| {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (evt_tx, evt_rx) = mpsc::channel();
        start_validation_runtime(
            cmd_rx,
            evt_tx,
            Arc::new(|candidate: &str| {
                // Simulated slow backend; accept anything with an '@'.
                thread::sleep(Duration::from_millis(300));
                Ok(candidate.contains('@'))
            }),
        );
        store.register(
            field,
            FieldConfig {
                classifier: deferred_classifier(cmd_tx),
                ..config_from(&opts)
            },
        );
        evt_rx
    });
    if evt_rx.is_none() {
        store.register(field, config_from(&opts));
    }

    let stdin = io::stdin();
    print_state(&store, field);
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let notices = match line.trim() {
            ":quit" => break,
            cmd if cmd.starts_with(":rm ") => match cmd[4..].trim().parse() {
                Ok(index) => store.remove_at(field, index),
                Err(_) => {
                    eprintln!("usage: :rm N");
                    Vec::new()
                }
            },
            cmd if cmd.starts_with(":reset ") => {
                let entries: Vec<String> =
                    cmd[7..].split(',').map(|s| s.trim().to_string()).collect();
                store.reset_from(field, &entries)
            }
            _ => store.process_input(field, &line, Trigger::Commit),
        };
        report(&notices);

        if let Some(evt_rx) = &evt_rx {
            while store.is_spinning(field) {
                println!("  (validating...)");
                let Ok(ValidateEvent::Checked {
                    field,
                    ticket,
                    result,
                }) = evt_rx.recv() else {
                    break;
                };
                report(&store.resolve_validation(field, ticket, result));
            }
        }

        print_state(&store, field);
        prompt()?;
    }
    Ok(())
}

fn config_from(opts: &Options) -> FieldConfig {
    FieldConfig {
        allow_display_name: opts.display_name,
        strip_display_name: opts.strip,
        allow_duplicate: opts.allow_dup,
        capacity: opts.max.map(|max| {
            Box::new(move |count: usize| count < max) as chips_core::CapacityGate
        }),
        ..FieldConfig::default()
    }
}

fn report(notices: &[Notice]) {
    for notice in notices {
        match notice {
            Notice::ListChanged(list) => println!("  list changed: {list:?}"),
            Notice::BufferChanged(buffer) => println!("  buffer changed: {buffer:?}"),
            Notice::CapacityRefused => println!("  capacity refused"),
        }
    }
}

fn print_state(store: &MultiEmailStore, field: FieldId) {
    let emails = store.emails(field).unwrap_or(&[]);
    for (index, email) in emails.iter().enumerate() {
        println!("[{index}] {email}");
    }
    if let Some(buffer) = store.buffer(field) {
        if !buffer.is_empty() {
            println!("(buffer: {buffer:?})");
        }
    }
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}
