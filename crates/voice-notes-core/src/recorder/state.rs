use std::time::Instant;

/// Recorder state. The handle exists only while recording.
pub enum RecorderState<H> {
    /// Not currently recording.
    Idle,
    /// Currently recording audio.
    Recording {
        /// Capture session owned until stop.
        handle: H,
        /// When recording started.
        started_at: Instant,
    },
}

impl<H> RecorderState<H> {
    /// Handle-free view of this state.
    pub fn status(&self) -> RecorderStatus {
        match self {
            RecorderState::Idle => RecorderStatus::Idle,
            RecorderState::Recording { .. } => RecorderStatus::Recording,
        }
    }
}

/// What the toggle control currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderStatus {
    /// Ready to start.
    Idle,
    /// Recording, ready to stop.
    Recording,
}

impl RecorderStatus {
    /// Caption of the single action control.
    pub fn action_caption(self) -> &'static str {
        match self {
            RecorderStatus::Idle => "Start Recording",
            RecorderStatus::Recording => "Stop Recording",
        }
    }
}
