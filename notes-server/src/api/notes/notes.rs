//! Note REST API handlers
//!
//! All routes require a valid bearer token and operate on the caller's own
//! notes only; the admin surface has its own handlers.

use crate::{
    ApiError, ApiResult, AppState, AuthUser, CreateNoteRequest, DeleteResponse, NoteDto,
    NoteListResponse, UpdateNoteRequest,
};

use notes_core::Note;
use notes_db::NoteRepository;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/notes
///
/// Create a note owned by the caller
pub async fn create_note(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteDto>)> {
    if req.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required", Some("title")));
    }
    if req.description.trim().is_empty() {
        return Err(ApiError::validation(
            "Description is required",
            Some("description"),
        ));
    }

    let note = Note::new(claims.user_id()?, req.title, req.description);

    let repo = NoteRepository::new(state.pool.clone());
    repo.create(&note).await?;

    Ok((StatusCode::CREATED, Json(note.into())))
}

/// GET /api/notes
///
/// List the caller's notes, newest first
pub async fn list_notes(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> ApiResult<Json<NoteListResponse>> {
    let repo = NoteRepository::new(state.pool.clone());
    let notes = repo.find_by_user(claims.user_id()?).await?;

    Ok(Json(NoteListResponse {
        notes: notes.into_iter().map(NoteDto::from).collect(),
    }))
}

/// PUT /api/notes/:id
///
/// Update a note the caller owns
pub async fn update_note(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<NoteDto>> {
    let note_id = Uuid::parse_str(&id)?;

    let repo = NoteRepository::new(state.pool.clone());
    let mut note = repo
        .find_by_id(note_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Note not found"))?;

    if note.user_id != claims.user_id()? {
        return Err(ApiError::forbidden("You cannot update this note"));
    }

    if let Some(title) = req.title {
        note.title = title;
    }
    if let Some(description) = req.description {
        note.description = description;
    }

    repo.update(&note).await?;

    let note = repo
        .find_by_id(note_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Note not found"))?;

    Ok(Json(note.into()))
}

/// DELETE /api/notes/:id
///
/// Delete a note the caller owns. Missing and foreign notes get the same
/// response.
pub async fn delete_note(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let note_id = Uuid::parse_str(&id)?;

    let repo = NoteRepository::new(state.pool.clone());
    let deleted = repo
        .delete_by_id_for_user(note_id, claims.user_id()?)
        .await?;

    if !deleted {
        return Err(ApiError::not_found("Note not found or not authorized"));
    }

    Ok(Json(DeleteResponse {
        message: "Deleted successfully".to_string(),
    }))
}
