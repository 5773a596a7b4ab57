use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Note store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// TOML file holding saved notes.
    pub notes_path: PathBuf,
}
