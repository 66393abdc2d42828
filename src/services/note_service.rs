//! Note service - per-user note CRUD.
//!
//! A note that belongs to someone else is reported exactly like a missing
//! one, so ids of other users' notes cannot be probed.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Note, NoteListItem};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait NoteService: Send + Sync {
    /// Titles of the user's notes, most recently updated first
    async fn get_note_list_items(&self, user_id: Uuid) -> AppResult<Vec<NoteListItem>>;

    /// Note owned by `user_id`, `NotFound` otherwise
    async fn get_note(&self, id: Uuid, user_id: Uuid) -> AppResult<Note>;

    async fn create_note(&self, user_id: Uuid, title: String, body: String) -> AppResult<Note>;

    /// Delete a note owned by `user_id`, `NotFound` otherwise
    async fn delete_note(&self, id: Uuid, user_id: Uuid) -> AppResult<()>;
}

pub struct NoteManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> NoteManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> NoteService for NoteManager<U> {
    async fn get_note_list_items(&self, user_id: Uuid) -> AppResult<Vec<NoteListItem>> {
        let notes = self.uow.notes().list_for_user(user_id).await?;
        Ok(notes.into_iter().map(NoteListItem::from).collect())
    }

    async fn get_note(&self, id: Uuid, user_id: Uuid) -> AppResult<Note> {
        self.uow
            .notes()
            .find_for_user(id, user_id)
            .await?
            .ok_or_not_found("Note")
    }

    async fn create_note(&self, user_id: Uuid, title: String, body: String) -> AppResult<Note> {
        let note = self.uow.notes().create(user_id, title, body).await?;
        tracing::info!(note_id = %note.id, user_id = %user_id, "Note created");
        Ok(note)
    }

    async fn delete_note(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        if !self.uow.notes().delete_for_user(id, user_id).await? {
            return Err(AppError::NotFound("Note"));
        }
        tracing::info!(note_id = %id, user_id = %user_id, "Note deleted");
        Ok(())
    }
}
