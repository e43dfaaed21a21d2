//! Note repository for CRUD operations on notes.

use crate::{DbError, Result as DbErrorResult};

use notes_core::Note;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// A note joined with its owner, as surfaced by the admin listing.
#[derive(Debug, Clone)]
pub struct NoteWithOwner {
    pub note: Note,
    pub owner_name: String,
    pub owner_email: String,
}

pub struct NoteRepository {
    pool: SqlitePool,
}

impl NoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, note: &Note) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO notes (id, user_id, title, description, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(note.id.to_string())
        .bind(note.user_id.to_string())
        .bind(&note.title)
        .bind(&note.description)
        .bind(note.created_at.timestamp())
        .bind(note.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Note>> {
        let row = sqlx::query(
            "SELECT id, user_id, title, description, created_at, updated_at \
             FROM notes WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_note(&r)).transpose()
    }

    /// A user's notes, newest first.
    pub async fn find_by_user(&self, user_id: Uuid) -> DbErrorResult<Vec<Note>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, description, created_at, updated_at \
             FROM notes WHERE user_id = ? ORDER BY created_at DESC, id",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_note).collect()
    }

    /// Every note with its owner's name and email (admin listing).
    pub async fn find_all_with_owner(&self) -> DbErrorResult<Vec<NoteWithOwner>> {
        let rows = sqlx::query(
            r#"
                SELECT n.id, n.user_id, n.title, n.description, n.created_at, n.updated_at,
                       u.name AS owner_name, u.email AS owner_email
                FROM notes n
                JOIN users u ON u.id = n.user_id
                ORDER BY n.created_at DESC, n.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| {
                Ok(NoteWithOwner {
                    note: map_note(r)?,
                    owner_name: r
                        .try_get("owner_name")
                        .map_err(|e| DbError::decode(format!("note.owner_name: {}", e)))?,
                    owner_email: r
                        .try_get("owner_email")
                        .map_err(|e| DbError::decode(format!("note.owner_email: {}", e)))?,
                })
            })
            .collect()
    }

    pub async fn update(&self, note: &Note) -> DbErrorResult<()> {
        sqlx::query("UPDATE notes SET title = ?, description = ?, updated_at = ? WHERE id = ?")
            .bind(&note.title)
            .bind(&note.description)
            .bind(Utc::now().timestamp())
            .bind(note.id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Unconditional delete (admin path).
    pub async fn delete_by_id(&self, id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Owner-scoped delete; false when the note is missing or foreign.
    pub async fn delete_by_id_for_user(&self, id: Uuid, user_id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_note(row: &SqliteRow) -> DbErrorResult<Note> {
    let id: String = row
        .try_get("id")
        .map_err(|e| DbError::decode(format!("note.id: {}", e)))?;
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| DbError::decode(format!("note.user_id: {}", e)))?;
    let created_at: i64 = row
        .try_get("created_at")
        .map_err(|e| DbError::decode(format!("note.created_at: {}", e)))?;
    let updated_at: i64 = row
        .try_get("updated_at")
        .map_err(|e| DbError::decode(format!("note.updated_at: {}", e)))?;

    Ok(Note {
        id: Uuid::parse_str(&id).map_err(|e| DbError::decode(format!("note.id: {}", e)))?,
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| DbError::decode(format!("note.user_id: {}", e)))?,
        title: row
            .try_get("title")
            .map_err(|e| DbError::decode(format!("note.title: {}", e)))?,
        description: row
            .try_get("description")
            .map_err(|e| DbError::decode(format!("note.description: {}", e)))?,
        created_at: DateTime::from_timestamp(created_at, 0)
            .ok_or_else(|| DbError::decode("note.created_at out of range"))?,
        updated_at: DateTime::from_timestamp(updated_at, 0)
            .ok_or_else(|| DbError::decode("note.updated_at out of range"))?,
    })
}
