//! Core types: Note, Version history, NoteId (ULID), partial updates

mod history;
mod note;
mod note_id;
mod update;

pub use history::{MAX_VERSIONS, Version, VersionHistory, record_version};
pub use note::{Note, NoteBuilder};
pub use note_id::{NoteId, ParseNoteIdError};
pub use update::NoteUpdate;
