use serde::Serialize;

/// Response for delete operations
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
