use crate::{AppCommand, AppResult, ConsoleNotifier, NoteStore, input_handler::USAGE};

use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use voice_notes_core::{CaptureService, Clock, PressOutcome, Recorder};

/// Main application state.
///
/// Owns the recorder, which in turn owns the note store as its sink. All
/// commands are handled one at a time on the runtime's single thread.
pub struct App<C, K>
where
    C: CaptureService,
{
    pub(crate) recorder: Recorder<C, NoteStore, ConsoleNotifier, K>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
}

impl<C, K> App<C, K>
where
    C: CaptureService,
    K: Clock,
{
    /// Run the main application event loop until shutdown or input closes.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Voice-Notes starting");

        println!("Audio Recorder");
        println!("{}", USAGE);
        self.print_status();

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                AppCommand::SetLabel(label) => {
                    self.recorder.set_label(label);
                }
                AppCommand::Press => {
                    self.press().await;
                }
                AppCommand::ListNotes => {
                    self.list_notes();
                }
                AppCommand::DeleteNote { id } => {
                    match self.recorder.sink_mut().delete(id) {
                        Ok(Some(note)) => println!("Deleted \"{}\"", note.name),
                        Ok(None) => println!("No note with id {}", id),
                        Err(e) => {
                            warn!(id = id, error = ?e, "Failed to delete note");
                            println!("Could not delete note {}", id);
                        }
                    }
                }
                AppCommand::Help => {
                    println!("{}", USAGE);
                }
                AppCommand::Invalid { reason } => {
                    println!("{}", reason);
                }
                AppCommand::Shutdown => {
                    info!("Shutdown requested");
                    break;
                }
            }

            self.print_status();
        }

        self.shutdown().await
    }

    async fn press(&mut self) {
        match self.recorder.press().await {
            PressOutcome::Started => println!("Recording..."),
            PressOutcome::Stopped(note) => {
                println!("Saved \"{}\" ({})", note.name, note.uri);
            }
            // The notifier has already shown the notice.
            PressOutcome::PermissionDenied => {}
            PressOutcome::Failed => println!("Recording failed, see log for details"),
        }
    }

    /// Finalize an in-flight recording so it is not lost on exit.
    #[instrument(skip(self))]
    async fn shutdown(mut self) -> AppResult<()> {
        if self.recorder.is_recording() {
            info!("Stopping active recording before exit");
            if let Some(note) = self.recorder.stop().await? {
                println!("Saved \"{}\" ({})", note.name, note.uri);
            }
        }

        info!("Voice-Notes shut down successfully");

        Ok(())
    }

    fn list_notes(&self) {
        let notes = self.recorder.sink().notes();
        if notes.is_empty() {
            println!("No notes yet");
            return;
        }
        for note in notes {
            println!("{:>15}  {}  {}", note.id, note.name, note.uri);
        }
    }

    fn print_status(&self) {
        let label = self.recorder.label();
        if label.is_empty() {
            println!("[{}] (unnamed)", self.recorder.action_caption());
        } else {
            println!("[{}] name: {}", self.recorder.action_caption(), label);
        }
    }
}
