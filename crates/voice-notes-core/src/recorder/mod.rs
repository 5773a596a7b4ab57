#[allow(clippy::module_inception)]
mod recorder;
mod state;

pub use {
    recorder::{PERMISSION_REQUIRED_NOTICE, PressOutcome, Recorder},
    state::{RecorderState, RecorderStatus},
};
