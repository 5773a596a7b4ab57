use crate::{CoreResult, QualityPreset};

/// Outcome of a microphone permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// Microphone access granted.
    Granted,
    /// Microphone access refused.
    Denied,
}

/// Platform audio session flags applied before a capture starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMode {
    /// Whether the session may record at all.
    pub allows_recording: bool,
    /// Keep the session usable while the device is muted or in silent mode.
    pub plays_in_silent_mode: bool,
}

impl Default for AudioMode {
    fn default() -> Self {
        Self {
            allows_recording: true,
            plays_in_silent_mode: true,
        }
    }
}

/// Microphone permission and capture capability.
///
/// Everything the recorder needs from the platform goes through this trait
/// so it can be replaced by a fake in tests. A handle returned by
/// [`start_capture`](CaptureService::start_capture) is single-use: passing it
/// to [`finalize_capture`](CaptureService::finalize_capture) consumes it
/// whether or not finalization succeeds.
#[allow(async_fn_in_trait)]
pub trait CaptureService {
    /// An active capture session.
    type Handle;

    /// Ask for microphone access.
    async fn request_permission(&mut self) -> CoreResult<PermissionStatus>;

    /// Apply session flags for the next capture.
    async fn configure(&mut self, mode: AudioMode) -> CoreResult<()>;

    /// Open a new capture session at the given preset.
    async fn start_capture(&mut self, preset: QualityPreset) -> CoreResult<Self::Handle>;

    /// Flush and release the session, returning the recorded file's location.
    async fn finalize_capture(&mut self, handle: Self::Handle) -> CoreResult<String>;
}
