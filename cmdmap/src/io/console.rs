//! Server console: the non-actor caller and its read loop.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument};

use crate::dispatch::{Caller, Dispatcher};

/// Sink for messages addressed to the console caller.
pub trait Console: Send + Sync {
    fn send_message(&self, message: &str);
}

/// Console that prints replies to stdout.
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn send_message(&self, message: &str) {
        println!("{message}");
    }
}

/// Counters reported when the console input is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleSummary {
    /// Lines read, blank ones included.
    pub lines: usize,
    /// Lines whose handler ran to completion.
    pub executed: usize,
    /// Lines refused before reaching a handler.
    pub rejected: usize,
    /// Lines whose handler returned an error.
    pub failed: usize,
}

/// Dispatch every line of `input` as the console until EOF.
///
/// `prompt` is written to `prompt_out` before each read; pass an empty
/// prompt to disable it. A failing handler is logged and reported to the
/// console, then the loop moves on to the next line. Only I/O errors on
/// `input` or `prompt_out` end the loop early.
#[instrument(skip_all)]
pub fn run_console<R: BufRead, W: Write>(
    dispatcher: &Dispatcher,
    input: R,
    mut prompt_out: W,
    prompt: &str,
) -> Result<ConsoleSummary> {
    let mut summary = ConsoleSummary::default();
    let mut lines = input.lines();
    loop {
        if !prompt.is_empty() {
            prompt_out
                .write_all(prompt.as_bytes())
                .and_then(|()| prompt_out.flush())
                .context("write console prompt")?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read console input")?;
        summary.lines += 1;

        match dispatcher.invoke(Caller::Console, &line) {
            Ok(outcome) if outcome.is_executed() => summary.executed += 1,
            Ok(_) => summary.rejected += 1,
            Err(err) => {
                summary.failed += 1;
                error!("command error: {err:#}");
                dispatcher
                    .console()
                    .send_message(&format!("Command error: {err:#}"));
            }
        }
    }

    debug!(?summary, "console input closed");
    info!(
        lines = summary.lines,
        failed = summary.failed,
        "console closed"
    );
    Ok(summary)
}
