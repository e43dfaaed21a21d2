use crate::AdminNoteDto;
use serde::Serialize;

/// List of all notes with owner info
#[derive(Debug, Serialize)]
pub struct AdminNoteListResponse {
    pub notes: Vec<AdminNoteDto>,
}
