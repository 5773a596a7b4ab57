//! TOML-backed note storage.
//!
//! Acts as the recorder's note sink: every finished recording lands here and
//! is persisted immediately. Notes are keyed by id; a note whose id is
//! already stored is dropped.

use crate::{AppError, AppResult};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};
use voice_notes_core::{Note, NoteSink};

#[derive(Debug, Default, Serialize, Deserialize)]
struct NotesFile {
    #[serde(default)]
    notes: Vec<Note>,
}

/// Persistent list of recorded notes, oldest first.
#[derive(Debug)]
pub struct NoteStore {
    path: PathBuf,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Open the store at `path`. A missing file is an empty store.
    #[track_caller]
    #[instrument]
    pub fn open(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(notes_path = ?path, "No note store yet, starting empty");
            return Ok(Self {
                path: path.to_path_buf(),
                notes: Vec::new(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|e| AppError::StorageError {
            reason: format!("Failed to read notes: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let file: NotesFile = toml::from_str(&contents).map_err(|e| AppError::StorageError {
            reason: format!("Failed to parse notes: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(notes_path = ?path, count = file.notes.len(), "Note store loaded");

        Ok(Self {
            path: path.to_path_buf(),
            notes: file.notes,
        })
    }

    /// Stored notes, oldest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Look up a note by id.
    pub fn get(&self, id: u64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Store `note` unless its id is already present.
    ///
    /// Returns whether the note was added.
    #[track_caller]
    #[instrument(skip(self, note), fields(id = note.id))]
    pub fn insert(&mut self, note: Note) -> AppResult<bool> {
        if self.get(note.id).is_some() {
            warn!("Note with this id already stored, ignoring duplicate");
            return Ok(false);
        }

        let mut notes = self.notes.clone();
        notes.push(note);
        self.save(&notes)?;
        self.notes = notes;

        Ok(true)
    }

    /// Remove the note with `id` and its local audio file.
    ///
    /// Returns the removed note, or `None` if no note had that id.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: u64) -> AppResult<Option<Note>> {
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            return Ok(None);
        };

        let mut notes = self.notes.clone();
        let note = notes.remove(index);
        self.save(&notes)?;
        self.notes = notes;

        if let Some(path) = note.uri.strip_prefix("file://") {
            if let Err(e) = fs::remove_file(path) {
                warn!(error = %e, uri = %note.uri, "Failed to remove audio file");
            }
        }

        info!(name = %note.name, "Note deleted");

        Ok(Some(note))
    }

    /// Write `notes` using the temp-file-then-rename pattern.
    ///
    /// Callers commit `notes` to memory only after this succeeds, so memory
    /// and disk never disagree.
    #[track_caller]
    fn save(&self, notes: &[Note]) -> AppResult<()> {
        let file = NotesFile {
            notes: notes.to_vec(),
        };

        let contents = toml::to_string_pretty(&file).map_err(|e| AppError::StorageError {
            reason: format!("Failed to serialize notes: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("toml.tmp");
        let mut temp_file = fs::File::create(&temp_path)?;
        temp_file.write_all(contents.as_bytes())?;
        temp_file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        debug!(notes_path = ?self.path, count = notes.len(), "Note store saved");

        Ok(())
    }
}

impl NoteSink for NoteStore {
    fn add_new_note(&mut self, note: Note) {
        let id = note.id;
        if let Err(e) = self.insert(note) {
            error!(id = id, error = ?e, "Failed to persist note");
        }
    }
}
