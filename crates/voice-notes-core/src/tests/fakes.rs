use crate::{
    AudioMode, CaptureService, Clock, CoreResult, Note, NoteSink, Notifier, PermissionStatus,
    QualityPreset, RecorderError,
};

use std::panic::Location;

use error_location::ErrorLocation;

pub(crate) const FAKE_URI: &str = "file:///tmp/recordings/fake.wav";

/// Capture call, in the order the recorder made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CaptureCall {
    RequestPermission,
    Configure(AudioMode),
    StartCapture(QualityPreset),
    FinalizeCapture(u32),
}

#[derive(Debug)]
pub(crate) struct FakeHandle(u32);

/// Scriptable stand-in for the platform capture service.
pub(crate) struct FakeCapture {
    pub(crate) permission: PermissionStatus,
    pub(crate) fail_permission: bool,
    pub(crate) fail_configure: bool,
    pub(crate) fail_start: bool,
    pub(crate) fail_finalize: bool,
    pub(crate) calls: Vec<CaptureCall>,
    pub(crate) open_handles: usize,
    next_handle: u32,
}

impl FakeCapture {
    pub(crate) fn granted() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            fail_permission: false,
            fail_configure: false,
            fail_start: false,
            fail_finalize: false,
            calls: Vec::new(),
            open_handles: 0,
            next_handle: 1,
        }
    }

    pub(crate) fn denied() -> Self {
        Self {
            permission: PermissionStatus::Denied,
            ..Self::granted()
        }
    }

    pub(crate) fn starts(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, CaptureCall::StartCapture(_)))
            .count()
    }
}

impl CaptureService for FakeCapture {
    type Handle = FakeHandle;

    async fn request_permission(&mut self) -> CoreResult<PermissionStatus> {
        self.calls.push(CaptureCall::RequestPermission);
        if self.fail_permission {
            return Err(RecorderError::NoMicrophoneFound {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(self.permission)
    }

    async fn configure(&mut self, mode: AudioMode) -> CoreResult<()> {
        self.calls.push(CaptureCall::Configure(mode));
        if self.fail_configure {
            return Err(RecorderError::DeviceError {
                reason: "audio session unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }

    async fn start_capture(&mut self, preset: QualityPreset) -> CoreResult<FakeHandle> {
        self.calls.push(CaptureCall::StartCapture(preset));
        if self.fail_start {
            return Err(RecorderError::DeviceError {
                reason: "device busy".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        let handle = FakeHandle(self.next_handle);
        self.next_handle += 1;
        self.open_handles += 1;
        Ok(handle)
    }

    async fn finalize_capture(&mut self, handle: FakeHandle) -> CoreResult<String> {
        self.calls.push(CaptureCall::FinalizeCapture(handle.0));
        self.open_handles -= 1;
        if self.fail_finalize {
            return Err(RecorderError::CaptureFailed {
                reason: "flush failed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(FAKE_URI.to_string())
    }
}

#[derive(Debug, Default)]
pub(crate) struct CollectingSink {
    pub(crate) notes: Vec<Note>,
}

impl NoteSink for CollectingSink {
    fn add_new_note(&mut self, note: Note) {
        self.notes.push(note);
    }
}

#[derive(Debug, Default)]
pub(crate) struct CollectingNotifier {
    pub(crate) messages: Vec<String>,
}

impl Notifier for CollectingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}
