use crate::{
    AudioMode, CaptureService, Clock, CoreResult, Note, NoteSink, Notifier, PermissionStatus,
    QualityPreset, RecorderError, RecorderState, RecorderStatus, SystemClock,
};

use std::{panic::Location, time::Instant};

use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// Notice shown when microphone access is refused.
pub const PERMISSION_REQUIRED_NOTICE: &str = "Permission to access microphone is required";

/// Result of pressing the toggle control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// A recording is now in progress.
    Started,
    /// The recording was finalized and this note was handed to the sink.
    Stopped(Note),
    /// Microphone access was refused; the user has been notified.
    PermissionDenied,
    /// Starting or stopping failed; details are in the log.
    Failed,
}

/// Audio note recorder.
///
/// Holds the label being typed and, while recording, the capture handle.
/// Start and Stop take `&mut self`, so they never overlap; a second Start
/// while recording is rejected rather than opening another capture.
///
/// Every completed recording produces exactly one [`Note`] for the sink.
pub struct Recorder<C, S, N, K = SystemClock>
where
    C: CaptureService,
{
    capture: C,
    sink: S,
    notifier: N,
    clock: K,
    preset: QualityPreset,
    mode: AudioMode,
    state: RecorderState<C::Handle>,
    label: String,
}

impl<C, S, N> Recorder<C, S, N, SystemClock>
where
    C: CaptureService,
    S: NoteSink,
    N: Notifier,
{
    /// Create an idle recorder using the wall clock for note ids.
    pub fn new(capture: C, sink: S, notifier: N) -> Self {
        Self::with_clock(capture, sink, notifier, SystemClock)
    }
}

impl<C, S, N, K> Recorder<C, S, N, K>
where
    C: CaptureService,
    S: NoteSink,
    N: Notifier,
    K: Clock,
{
    /// Create an idle recorder with an explicit clock.
    pub fn with_clock(capture: C, sink: S, notifier: N, clock: K) -> Self {
        Self {
            capture,
            sink,
            notifier,
            clock,
            preset: QualityPreset::default(),
            mode: AudioMode::default(),
            state: RecorderState::Idle,
            label: String::new(),
        }
    }

    /// Use `preset` for subsequent recordings.
    pub fn with_preset(mut self, preset: QualityPreset) -> Self {
        self.preset = preset;
        self
    }

    /// Apply `mode` before each capture.
    pub fn with_audio_mode(mut self, mode: AudioMode) -> Self {
        self.mode = mode;
        self
    }

    /// Current label text, untrimmed.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label. Editable at any time, including mid-recording.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// True iff a capture handle is held.
    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    /// Current status of the toggle control.
    pub fn status(&self) -> RecorderStatus {
        self.state.status()
    }

    /// Caption for the toggle control.
    pub fn action_caption(&self) -> &'static str {
        self.status().action_caption()
    }

    /// The injected note sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the injected note sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The injected notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The capture service.
    pub fn capture(&self) -> &C {
        &self.capture
    }

    /// Start recording.
    ///
    /// # Errors
    ///
    /// - [`RecorderError::AlreadyRecording`] if a capture is in progress.
    /// - [`RecorderError::PermissionDenied`] if microphone access is refused;
    ///   the notifier has been told.
    /// - Any capture error from configuring or opening the session.
    ///
    /// The recorder stays idle on every error.
    #[instrument(skip(self), fields(preset = %self.preset))]
    pub async fn start(&mut self) -> CoreResult<()> {
        if self.is_recording() {
            return Err(RecorderError::AlreadyRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match self.capture.request_permission().await? {
            PermissionStatus::Granted => {}
            PermissionStatus::Denied => {
                self.notifier.notify(PERMISSION_REQUIRED_NOTICE);
                return Err(RecorderError::PermissionDenied {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        self.capture.configure(self.mode).await?;
        let handle = self.capture.start_capture(self.preset).await?;

        self.state = RecorderState::Recording {
            handle,
            started_at: Instant::now(),
        };

        info!("Recording started");

        Ok(())
    }

    /// Stop recording and hand the finished note to the sink.
    ///
    /// Returns `Ok(None)` without side effects when nothing is recording.
    /// The recorder is idle as soon as this is called; finalization runs
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns the capture error if finalization fails. The handle has been
    /// consumed, no note is produced and the label is kept.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> CoreResult<Option<Note>> {
        let RecorderState::Recording { handle, started_at } =
            std::mem::replace(&mut self.state, RecorderState::Idle)
        else {
            debug!("Stop ignored, nothing is recording");
            return Ok(None);
        };

        let uri = self.capture.finalize_capture(handle).await?;
        let note = Note::new(self.clock.now_millis(), uri, &self.label);

        info!(
            id = note.id,
            uri = %note.uri,
            name = %note.name,
            duration_ms = started_at.elapsed().as_millis(),
            "Recording stopped"
        );

        self.sink.add_new_note(note.clone());
        self.label.clear();

        Ok(Some(note))
    }

    /// Press the toggle control: start when idle, stop when recording.
    ///
    /// Failures are logged here and never propagated.
    #[instrument(skip(self))]
    pub async fn press(&mut self) -> PressOutcome {
        if self.is_recording() {
            match self.stop().await {
                Ok(Some(note)) => PressOutcome::Stopped(note),
                Ok(None) => PressOutcome::Failed,
                Err(e) => {
                    error!(error = ?e, "Failed to stop recording");
                    PressOutcome::Failed
                }
            }
        } else {
            match self.start().await {
                Ok(()) => PressOutcome::Started,
                Err(e) if e.is_permission_denied() => {
                    warn!("Microphone permission denied");
                    PressOutcome::PermissionDenied
                }
                Err(e) => {
                    error!(error = ?e, "Failed to start recording");
                    PressOutcome::Failed
                }
            }
        }
    }
}
