//! Voice-Notes: record named audio notes from the terminal.

mod app;
mod app_command;
mod config;
mod console_notifier;
mod error;
mod input_handler;
mod logging;
mod note_store;
#[cfg(test)]
mod tests;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    console_notifier::ConsoleNotifier,
    error::{AppError, Result as AppResult},
    input_handler::InputHandler,
    note_store::NoteStore,
};

use crate::config::{Config, project_dirs};

use tokio::sync::mpsc;
use tracing::error;
use voice_notes_core::{CpalCaptureService, Recorder};

/// Application entry point.
fn main() {
    let log_dir = match project_dirs() {
        Ok(dirs) => dirs.data_dir().join("logs"),
        Err(e) => {
            eprintln!("Failed to locate data directory: {}", e);
            std::process::exit(1);
        }
    };

    // Flushes buffered log lines when dropped.
    let log_guard = match logging::init(&log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let store = match NoteStore::open(&config.storage.notes_path) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open note store: {:?}", e);
            eprintln!("Failed to open note store: {}", e);
            std::process::exit(1);
        }
    };

    let capture = CpalCaptureService::new(&config.recording.output_dir);
    let recorder = Recorder::new(capture, store, ConsoleNotifier)
        .with_preset(config.recording.preset)
        .with_audio_mode(config.audio.audio_mode());

    let (command_tx, command_rx) = mpsc::channel(32);

    if let Err(e) = InputHandler::spawn(command_tx) {
        error!("Failed to start input handler: {:?}", e);
        std::process::exit(1);
    }

    // Single-threaded runtime: the recorder and its capture handle never
    // leave this thread.
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    let app = App {
        recorder,
        command_rx,
    };

    if let Err(e) = rt.block_on(app.run()) {
        error!(error = ?e, "App error");
        eprintln!("{}", e);
        drop(log_guard);
        std::process::exit(1);
    }

    drop(log_guard);
}
