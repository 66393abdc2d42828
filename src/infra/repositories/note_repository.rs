//! Note repository. Every query is scoped to the owning user.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::note::{self, ActiveModel, Entity as NoteEntity};
use crate::domain::Note;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes of a user, most recently updated first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Note>>;

    /// Find a note only if `user_id` owns it
    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Note>>;

    async fn create(&self, user_id: Uuid, title: String, body: String) -> AppResult<Note>;

    /// Delete a note owned by `user_id`; false when nothing matched
    async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<bool>;
}

/// SeaORM-backed note repository
pub struct NoteStore {
    db: DatabaseConnection,
}

impl NoteStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteRepository for NoteStore {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Note>> {
        let models = NoteEntity::find()
            .filter(note::Column::UserId.eq(user_id))
            .order_by_desc(note::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Note::from).collect())
    }

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Note>> {
        let result = NoteEntity::find_by_id(id)
            .filter(note::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Note::from))
    }

    async fn create(&self, user_id: Uuid, title: String, body: String) -> AppResult<Note> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title),
            body: Set(body),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(Note::from(model))
    }

    async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = NoteEntity::delete_many()
            .filter(note::Column::Id.eq(id))
            .filter(note::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
