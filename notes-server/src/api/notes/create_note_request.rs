use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Note title (required)
    pub title: String,

    /// Note body (required)
    pub description: String,
}
