use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::InteractiveArgs;
use crate::commands::{build_fetcher, render_options};
use crate::error::SearchError;
use crate::fetch::Fetcher;
use crate::model::ResultEntry;
use crate::render::{PlaceholderCycle, RenderOptions, write_session_text};
use crate::search::{Completion, SearchSession, execute};

const QUIT_COMMAND: &str = ":quit";

enum Event {
    Line(String),
    InputClosed,
    Completed {
        seq: u64,
        outcome: Result<Vec<ResultEntry>, SearchError>,
    },
}

pub fn run(args: InteractiveArgs) -> Result<()> {
    let fetcher = build_fetcher(&args.endpoint);
    let options = render_options(&args.display);

    info!(
        endpoint = %fetcher.endpoint(),
        theme = args.display.theme.as_str(),
        "interactive search started"
    );

    let stdin = io::BufReader::new(io::stdin());
    let mut stdout = io::stdout().lock();
    run_loop(stdin, &mut stdout, Arc::new(fetcher), &options)
}

/// Drives a session from line input. Each search runs on its own thread;
/// superseded responses are dropped by the session.
fn run_loop<R, W>(
    input: R,
    out: &mut W,
    fetcher: Arc<dyn Fetcher>,
    options: &RenderOptions,
) -> Result<()>
where
    R: BufRead + Send + 'static,
    W: Write,
{
    let (sender, receiver) = mpsc::channel::<Event>();

    let line_sender = sender.clone();
    thread::spawn(move || {
        for line in input.lines() {
            let Ok(line) = line else {
                break;
            };
            if line_sender.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = line_sender.send(Event::InputClosed);
    });

    let mut session = SearchSession::new();
    let mut placeholder = PlaceholderCycle::default();
    let mut input_closed = false;

    write!(out, "{}", placeholder.prompt())?;
    out.flush()?;

    while let Ok(event) = receiver.recv() {
        match event {
            Event::Line(line) => {
                if line.trim() == QUIT_COMMAND {
                    break;
                }

                match session.begin(&line) {
                    Ok(ticket) => {
                        writeln!(out, "Searching...")?;
                        let fetcher = Arc::clone(&fetcher);
                        let sender = sender.clone();
                        thread::spawn(move || {
                            let outcome = execute(&ticket.request, fetcher.as_ref());
                            let _ = sender.send(Event::Completed {
                                seq: ticket.seq,
                                outcome,
                            });
                        });
                    }
                    Err(_) => {
                        write_session_text(out, &session, options)?;
                        placeholder.advance();
                        write!(out, "{}", placeholder.prompt())?;
                    }
                }
            }
            Event::InputClosed => {
                input_closed = true;
                if !session.is_loading() {
                    break;
                }
            }
            Event::Completed { seq, outcome } => {
                if session.complete(seq, outcome) == Completion::Stale {
                    continue;
                }
                write_session_text(out, &session, options)?;
                if input_closed {
                    break;
                }
                placeholder.advance();
                write!(out, "{}", placeholder.prompt())?;
            }
        }
        out.flush()?;
    }

    out.flush()?;
    debug!(state = ?session.state(), "interactive search finished");
    Ok(())
}
