//! Send command: one message, reply streamed to stdout.

use std::io::{self, Write};
use std::sync::Arc;

use color_eyre::Result;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::adapters::ReqwestTransport;
use crate::config::ClientConfig;
use crate::session::{ChatSession, SendOutcome, SessionSnapshot};
use crate::state::ToolCallStatus;

/// Exit status used when the user interrupts the reply.
pub const EXIT_INTERRUPTED: u8 = 130;

/// Tracks what has already been written so each snapshot prints only news.
#[derive(Debug, Default)]
pub struct ReplyPrinter {
    printed: usize,
    status_line: Option<String>,
    tools_reported: usize,
}

impl ReplyPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assistant text not yet printed.
    pub fn content_delta<'a>(&mut self, snapshot: &'a SessionSnapshot) -> &'a str {
        let content = snapshot.assistant_content().unwrap_or("");
        let delta = content.get(self.printed..).unwrap_or("");
        self.printed = content.len();
        delta
    }

    /// Status line, when it changed to a new non-empty value.
    pub fn status_change(&mut self, snapshot: &SessionSnapshot) -> Option<String> {
        if snapshot.status_line == self.status_line {
            return None;
        }
        self.status_line = snapshot.status_line.clone();
        self.status_line.clone()
    }

    /// Lines describing tool calls that started since the last call.
    pub fn new_tools(&mut self, snapshot: &SessionSnapshot) -> Vec<String> {
        let lines = snapshot
            .tool_calls
            .iter()
            .skip(self.tools_reported)
            .map(|tool| format!("[tool] {}", tool.name))
            .collect();
        self.tools_reported = snapshot.tool_calls.len();
        lines
    }
}

/// Stream snapshot changes to `out` until the session goes away.
///
/// Stops at the first failed write (closed pipe and the like); the send
/// itself keeps running.
pub async fn print_updates<W: Write>(
    mut updates: watch::Receiver<SessionSnapshot>,
    mut out: W,
) -> io::Result<()> {
    let mut printer = ReplyPrinter::new();
    while updates.changed().await.is_ok() {
        let snapshot = updates.borrow_and_update().clone();
        for line in printer.new_tools(&snapshot) {
            eprintln!("{}", line);
        }
        if let Some(status) = printer.status_change(&snapshot) {
            eprintln!("... {}", status);
        }
        let delta = printer.content_delta(&snapshot);
        if !delta.is_empty() {
            out.write_all(delta.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

/// Handle the send command, returning the process exit status.
pub async fn handle_send_command(
    config: ClientConfig,
    conversation_id: &str,
    message: &str,
) -> Result<u8> {
    let allow_writes = config.allow_write_operations;
    let transport = ReqwestTransport::new(config)?;
    let mut session =
        ChatSession::new(Arc::new(transport)).with_allow_write_operations(allow_writes);

    let updates = session.subscribe();
    let printer = tokio::spawn(async move {
        if let Err(e) = print_updates(updates, std::io::stdout()).await {
            tracing::debug!(error = %e, "Stopped printing reply");
        }
    });

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    let outcome = session
        .send_message_with_cancel(conversation_id, message, &cancel)
        .await;
    interrupt.abort();

    let snapshot = session.snapshot();
    let hint = session
        .last_error()
        .map(|e| e.category().recovery_hint());
    // Dropping the session closes the watch channel and ends the printer
    drop(session);
    printer.await?;
    println!();

    for tool in snapshot
        .tool_calls
        .iter()
        .filter(|t| t.status == ToolCallStatus::Error)
    {
        eprintln!(
            "[tool] {} failed: {}",
            tool.name,
            tool.error_message.as_deref().unwrap_or("unknown error")
        );
    }
    if let Some(tokens) = snapshot.last_usage.as_ref().and_then(|u| u.tokens_used) {
        tracing::info!(tokens, "Reply complete");
    }

    Ok(match outcome {
        SendOutcome::Completed => 0,
        SendOutcome::Cancelled => {
            eprintln!("Interrupted.");
            EXIT_INTERRUPTED
        }
        SendOutcome::Failed(kind) => {
            let message = snapshot.error.unwrap_or_else(|| format!("{:?}", kind));
            eprintln!("Error: {}", message);
            if let Some(hint) = hint {
                eprintln!("{}", hint);
            }
            1
        }
    })
}
