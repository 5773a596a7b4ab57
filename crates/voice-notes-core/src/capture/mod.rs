mod cpal_service;
mod preset;
mod service;

#[cfg(test)]
pub(crate) use cpal_service::{SharedWriter, discard_recording, finish_recording, push_frame};

pub use {
    cpal_service::{CpalCaptureService, CpalRecording},
    preset::{ParsePresetError, QualityPreset},
    service::{AudioMode, CaptureService, PermissionStatus},
};
