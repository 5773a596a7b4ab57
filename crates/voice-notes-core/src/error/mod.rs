use error_location::ErrorLocation;
use thiserror::Error;

/// Recorder and capture errors with source location tracking.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// The user or the platform refused microphone access.
    #[error("Microphone permission denied {location}")]
    PermissionDenied {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Start was pressed while a recording handle is already held.
    #[error("A recording is already in progress {location}")]
    AlreadyRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No audio input device found.
    #[error("No microphone found {location}")]
    NoMicrophoneFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The configured audio mode does not allow recording.
    #[error("Audio mode does not allow recording {location}")]
    RecordingNotAllowed {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Starting or finalizing a capture session failed.
    #[error("Capture failed: {reason} {location}")]
    CaptureFailed {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Writing the WAV container failed.
    #[error("WAV error: {source} {location}")]
    WavError {
        /// Underlying error from hound.
        #[source]
        source: hound::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl RecorderError {
    /// True for the failure that is surfaced to the user as a notice.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, RecorderError::PermissionDenied { .. })
    }

    /// True for platform failures while starting or stopping a capture.
    ///
    /// These are logged only; the user sees no message.
    pub fn is_capture_failure(&self) -> bool {
        matches!(
            self,
            RecorderError::NoMicrophoneFound { .. }
                | RecorderError::RecordingNotAllowed { .. }
                | RecorderError::DeviceError { .. }
                | RecorderError::CaptureFailed { .. }
                | RecorderError::WavError { .. }
                | RecorderError::IoError { .. }
        )
    }
}

impl From<hound::Error> for RecorderError {
    #[track_caller]
    fn from(source: hound::Error) -> Self {
        RecorderError::WavError {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

impl From<std::io::Error> for RecorderError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        RecorderError::IoError {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

/// Result type alias using [`RecorderError`].
pub type Result<T> = std::result::Result<T, RecorderError>;
