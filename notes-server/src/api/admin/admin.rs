//! Admin REST API handlers
//!
//! Every handler runs the gate in order: authenticate (extractor), then
//! authorize (`require_role`). Nothing here can change a role; roles are
//! only written by the out-of-band notes-admin tool.

use crate::{
    AdminNoteDto, AdminNoteListResponse, ApiError, ApiResult, AppState, AuthUser, DeleteResponse,
    UserDto, UserListResponse,
};

use notes_core::Role;
use notes_db::{NoteRepository, UserRepository};

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/admin/users
///
/// List all users
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> ApiResult<Json<UserListResponse>> {
    claims.require_role(Role::Admin)?;

    let repo = UserRepository::new(state.pool.clone());
    let users = repo.find_all().await?;

    Ok(Json(UserListResponse {
        users: users.into_iter().map(UserDto::from).collect(),
    }))
}

/// GET /api/admin/notes
///
/// List all notes with owner info
pub async fn list_all_notes(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> ApiResult<Json<AdminNoteListResponse>> {
    claims.require_role(Role::Admin)?;

    let repo = NoteRepository::new(state.pool.clone());
    let notes = repo.find_all_with_owner().await?;

    Ok(Json(AdminNoteListResponse {
        notes: notes.into_iter().map(AdminNoteDto::from).collect(),
    }))
}

/// DELETE /api/admin/notes/:id
///
/// Delete any note
pub async fn delete_any_note(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    claims.require_role(Role::Admin)?;

    let note_id = Uuid::parse_str(&id)?;

    let repo = NoteRepository::new(state.pool.clone());
    let deleted = repo.delete_by_id(note_id).await?;

    if !deleted {
        return Err(ApiError::not_found("Note not found"));
    }

    log::info!("note {} deleted by admin {}", note_id, claims.sub);

    Ok(Json(DeleteResponse {
        message: "Note deleted by admin".to_string(),
    }))
}
