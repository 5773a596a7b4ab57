//! Line-based input handler.
//!
//! Reads stdin on a dedicated thread and forwards each line as an
//! [`AppCommand`]. A plain line is the label text field, an empty line is
//! the toggle button and `:`-prefixed lines are commands; `::` escapes a
//! label that starts with a colon.

use crate::{AppCommand, AppResult};

use std::{io::BufRead, thread::JoinHandle};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Usage text printed for `:help`.
pub(crate) const USAGE: &str = "\
  <text>        set the note name
  ::<text>      set a note name starting with ':'
  <enter>       start / stop recording
  :list         show saved notes
  :delete <id>  delete a saved note
  :clear        clear the note name
  :help         show this help
  :quit         stop recording and exit";

/// Forwards stdin lines to the application.
pub struct InputHandler;

impl InputHandler {
    /// Spawn the reader thread.
    ///
    /// The thread exits when stdin closes (sending [`AppCommand::Shutdown`])
    /// or when the receiving side is dropped. A thread blocked in `read_line`
    /// at exit is left to the OS.
    #[track_caller]
    pub fn spawn(command_tx: mpsc::Sender<AppCommand>) -> AppResult<JoinHandle<()>> {
        let handle = std::thread::Builder::new()
            .name("stdin-reader".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let line = match line {
                        Ok(line) => line,
                        Err(e) => {
                            warn!(error = %e, "Failed to read input line");
                            break;
                        }
                    };

                    let command = parse_line(&line);
                    debug!(command = ?command, "Input received");

                    if command_tx.blocking_send(command).is_err() {
                        return;
                    }
                }

                info!("Input closed");
                let _ = command_tx.blocking_send(AppCommand::Shutdown);
            })?;

        Ok(handle)
    }
}

/// Map one input line to a command.
pub fn parse_line(line: &str) -> AppCommand {
    let line = line.trim_end_matches('\r');

    if line.trim().is_empty() {
        return AppCommand::Press;
    }

    let trimmed = line.trim_start();

    // `::` escapes a label that starts with a colon.
    if let Some(rest) = trimmed.strip_prefix("::") {
        let indent = &line[..line.len() - trimmed.len()];
        return AppCommand::SetLabel(format!("{}:{}", indent, rest));
    }

    let Some(command) = trimmed.strip_prefix(':') else {
        return AppCommand::SetLabel(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("list" | "ls"), None, None) => AppCommand::ListNotes,
        (Some("clear"), None, None) => AppCommand::SetLabel(String::new()),
        (Some("help" | "h" | "?"), None, None) => AppCommand::Help,
        (Some("quit" | "q" | "exit"), None, None) => AppCommand::Shutdown,
        (Some("delete" | "rm"), Some(id), None) => match id.parse::<u64>() {
            Ok(id) => AppCommand::DeleteNote { id },
            Err(_) => AppCommand::Invalid {
                reason: format!("Not a note id: {}", id),
            },
        },
        (Some("delete" | "rm"), None, None) => AppCommand::Invalid {
            reason: "Usage: :delete <id>".to_string(),
        },
        _ => AppCommand::Invalid {
            reason: format!("Unknown command: :{}", command.trim()),
        },
    }
}
