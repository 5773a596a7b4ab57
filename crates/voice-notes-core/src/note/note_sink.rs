use crate::Note;

/// Receiver of finalized notes.
///
/// The recorder calls [`add_new_note`](NoteSink::add_new_note) exactly once
/// per completed recording. Storage and deduplication are up to the sink.
/// Any `FnMut(Note)` closure is a sink.
pub trait NoteSink {
    /// Take ownership of a freshly recorded note.
    fn add_new_note(&mut self, note: Note);
}

impl<F> NoteSink for F
where
    F: FnMut(Note),
{
    fn add_new_note(&mut self, note: Note) {
        self(note)
    }
}
