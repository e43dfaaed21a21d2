use crate::NoteDto;
use serde::Serialize;

/// List of notes response
#[derive(Debug, Serialize)]
pub struct NoteListResponse {
    pub notes: Vec<NoteDto>,
}
