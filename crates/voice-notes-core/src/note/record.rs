use serde::{Deserialize, Serialize};

/// A finalized audio note.
///
/// Built by the [`Recorder`](crate::Recorder) when a recording stops and
/// handed to the injected [`NoteSink`](crate::NoteSink), which owns it from
/// then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Capture-completion timestamp in milliseconds since the Unix epoch.
    pub id: u64,
    /// Location of the finalized audio file, as reported by the capture service.
    pub uri: String,
    /// Display name.
    pub name: String,
}

impl Note {
    /// Build a note from a stop timestamp, a file location and the raw label.
    pub fn new(id: u64, uri: impl Into<String>, label: &str) -> Self {
        Self {
            id,
            uri: uri.into(),
            name: Self::display_name(label, id),
        }
    }

    /// The trimmed label, or `"Audio <id>"` when nothing is left after trimming.
    pub fn display_name(label: &str, id: u64) -> String {
        match label.trim() {
            "" => format!("Audio {}", id),
            trimmed => trimmed.to_string(),
        }
    }
}
