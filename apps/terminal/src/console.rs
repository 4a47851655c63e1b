//! # Operator Console Loop
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Console Loop                                    │
//! │                                                                         │
//! │   tokio::select! {                                                      │
//! │     line  = input.next_line()  ──► parse ──► dispatch ──► print reply   │
//! │     event = export_events.recv() ─────────────────────► print result   │
//! │   }                                                                     │
//! │                                                                         │
//! │   quit / EOF ──► wait for in-flight export ──► print pending events     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so the loop runs against stdin/stdout in
//! the binary and against in-memory buffers in tests.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::parse_command;
use crate::commands::{dispatch, Flow};
use crate::error::AppResult;
use crate::export::ExportEvent;
use crate::state::AppState;

const PROMPT: &str = "> ";

fn banner(state: &AppState) -> String {
    let reading = state.reading();
    format!(
        "QuickBill POS  {}  {} {}\nType `help` for commands.\n",
        state.restaurant.live().name,
        reading.date,
        reading.time
    )
}

fn describe_event(event: &ExportEvent) -> String {
    match event {
        ExportEvent::Finished { path } => format!("Exported {}\n", path.display()),
        ExportEvent::Failed { path, error } => {
            format!("error[EXPORT_ERROR]: {} not written: {}\n", path.display(), error)
        }
    }
}

/// Reads operator lines until `quit` or end of input.
///
/// Command errors are printed and the loop continues; only I/O errors on
/// the console itself end it early.
pub async fn run_console<R, W>(
    state: &mut AppState,
    events: &mut mpsc::Receiver<ExportEvent>,
    input: R,
    out: &mut W,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    out.write_all(banner(state).as_bytes()).await?;
    out.write_all(PROMPT.as_bytes()).await?;
    out.flush().await?;

    loop {
        let reply = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Console input closed");
                    break;
                };
                if line.trim().is_empty() {
                    String::new()
                } else {
                    match parse_command(&line) {
                        Ok(command) => match dispatch(state, command).await {
                            Ok(Flow::Continue(text)) => text,
                            Ok(Flow::Quit) => break,
                            Err(e) => {
                                debug!(code = %e.code, "Command failed");
                                format!("{}\n", e)
                            }
                        },
                        // Help output and usage errors both come back as clap errors.
                        Err(e) => e.to_string(),
                    }
                }
            }
            Some(event) = events.recv() => {
                format!("\n{}", describe_event(&event))
            }
        };

        out.write_all(reply.as_bytes()).await?;
        out.write_all(PROMPT.as_bytes()).await?;
        out.flush().await?;
    }

    if state.exporter.is_exporting() {
        info!("Waiting for in-flight export before exit");
    }
    state.exporter.wait_idle().await;
    while let Ok(event) = events.try_recv() {
        out.write_all(describe_event(&event).as_bytes()).await?;
    }
    out.write_all(b"Bye\n").await?;
    out.flush().await?;

    Ok(())
}
