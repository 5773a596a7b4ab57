/// Commands sent from the input handler to the main application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Replace the note label with the typed text.
    SetLabel(String),
    /// Press the Start/Stop toggle.
    Press,
    /// Print stored notes.
    ListNotes,
    /// Delete a stored note.
    DeleteNote {
        /// Id of the note to delete.
        id: u64,
    },
    /// Print usage.
    Help,
    /// Input that could not be understood.
    Invalid {
        /// Why the input was rejected.
        reason: String,
    },
    /// Request application shutdown.
    Shutdown,
}
