use crate::config::{DEFAULT_PLAYS_IN_SILENT_MODE, default_plays_in_silent_mode};

use serde::{Deserialize, Serialize};
use voice_notes_core::AudioMode;

/// Audio session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Keep recording while the device is muted or in silent mode.
    #[serde(default = "default_plays_in_silent_mode")]
    pub plays_in_silent_mode: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            plays_in_silent_mode: DEFAULT_PLAYS_IN_SILENT_MODE,
        }
    }
}

impl AudioConfig {
    /// Session flags passed to the capture service before each recording.
    pub fn audio_mode(&self) -> AudioMode {
        AudioMode {
            allows_recording: true,
            plays_in_silent_mode: self.plays_in_silent_mode,
        }
    }
}
