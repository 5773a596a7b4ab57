use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use voice_notes_core::QualityPreset;

/// Recording output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Directory recordings are written to.
    pub output_dir: PathBuf,

    /// Quality preset (`"high"` or `"low"`).
    #[serde(default)]
    pub preset: QualityPreset,
}
