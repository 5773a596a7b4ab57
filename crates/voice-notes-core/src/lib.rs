//! Voice Notes Core Library
//!
//! Audio note recorder: an explicit Idle/Recording state machine over an
//! injected capture capability, producing named note records for a sink.
//!
//! # Example
//!
//! ```no_run
//! use voice_notes_core::{CoreResult, CpalCaptureService, Note, Recorder};
//!
//! use std::time::Duration;
//!
//! # async fn run() -> CoreResult<()> {
//! let capture = CpalCaptureService::new("recordings");
//! let mut notes: Vec<Note> = Vec::new();
//! let mut recorder = Recorder::new(capture, |note: Note| notes.push(note), |msg: &str| {
//!     eprintln!("{}", msg)
//! });
//!
//! recorder.set_label("  Standup  ");
//! recorder.start().await?;
//! std::thread::sleep(Duration::from_secs(3));
//! let note = recorder.stop().await?;
//!
//! println!("Recorded: {:?}", note);
//! # Ok(())
//! # }
//! ```

mod capture;
mod clock;
mod error;
mod note;
mod notice;
mod recorder;

pub use {
    capture::{
        AudioMode, CaptureService, CpalCaptureService, CpalRecording, ParsePresetError,
        PermissionStatus, QualityPreset,
    },
    clock::{Clock, SystemClock},
    error::{RecorderError, Result as CoreResult},
    note::{Note, NoteSink},
    notice::Notifier,
    recorder::{PERMISSION_REQUIRED_NOTICE, PressOutcome, Recorder, RecorderState, RecorderStatus},
};

#[cfg(test)]
mod tests;
