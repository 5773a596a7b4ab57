use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recording quality presets.
///
/// Both presets record 16-bit PCM at the input device's native sample rate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityPreset {
    /// Stereo.
    #[default]
    #[serde(rename = "high")]
    HighQuality,
    /// Mono.
    #[serde(rename = "low")]
    LowQuality,
}

impl QualityPreset {
    /// Channel count written to the output file.
    pub fn channels(self) -> u16 {
        match self {
            QualityPreset::HighQuality => 2,
            QualityPreset::LowQuality => 1,
        }
    }

    /// Bits per sample written to the output file.
    pub fn bits_per_sample(self) -> u16 {
        16
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityPreset::HighQuality => write!(f, "high"),
            QualityPreset::LowQuality => write!(f, "low"),
        }
    }
}

/// Unrecognized preset name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown quality preset: {0:?} (expected \"high\" or \"low\")")]
pub struct ParsePresetError(
    /// The rejected input.
    pub String,
);

impl FromStr for QualityPreset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "high_quality" => Ok(QualityPreset::HighQuality),
            "low" | "low_quality" => Ok(QualityPreset::LowQuality),
            _ => Err(ParsePresetError(s.to_string())),
        }
    }
}
