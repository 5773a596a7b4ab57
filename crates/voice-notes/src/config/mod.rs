mod audio_config;
#[allow(clippy::module_inception)]
mod config;
mod recording_config;
mod storage_config;

pub(crate) use {
    audio_config::AudioConfig, config::Config, config::project_dirs,
    recording_config::RecordingConfig, storage_config::StorageConfig,
};

pub(crate) const DEFAULT_PLAYS_IN_SILENT_MODE: bool = true;

pub(crate) fn default_plays_in_silent_mode() -> bool {
    DEFAULT_PLAYS_IN_SILENT_MODE
}
