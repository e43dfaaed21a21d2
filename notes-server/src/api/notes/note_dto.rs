use notes_core::Note;

use serde::Serialize;

/// Note DTO for JSON serialization
#[derive(Debug, Serialize)]
pub struct NoteDto {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Note> for NoteDto {
    fn from(n: Note) -> Self {
        Self {
            id: n.id.to_string(),
            user_id: n.user_id.to_string(),
            title: n.title,
            description: n.description,
            created_at: n.created_at.timestamp(),
            updated_at: n.updated_at.timestamp(),
        }
    }
}
