mod note_sink;
mod record;

pub use {note_sink::NoteSink, record::Note};
