
use std::path::PathBuf;

/// Fresh scratch directory under the system temp dir.
pub(crate) fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("voice-notes-{}-{}", tag, uuid::Uuid::new_v4()))
}
