use notes_db::NoteWithOwner;

use serde::Serialize;

/// Note plus owner identity, as shown on the admin dashboard
#[derive(Debug, Serialize)]
pub struct AdminNoteDto {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub owner_name: String,
    pub owner_email: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<NoteWithOwner> for AdminNoteDto {
    fn from(n: NoteWithOwner) -> Self {
        Self {
            id: n.note.id.to_string(),
            user_id: n.note.user_id.to_string(),
            title: n.note.title,
            description: n.note.description,
            owner_name: n.owner_name,
            owner_email: n.owner_email,
            created_at: n.note.created_at.timestamp(),
            updated_at: n.note.updated_at.timestamp(),
        }
    }
}
