//! Note domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A note owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    #[schema(example = "Groceries")]
    pub title: String,
    #[schema(example = "Milk, eggs, coffee")]
    pub body: String,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entry in a user's note list
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NoteListItem {
    pub id: Uuid,
    pub title: String,
}

impl From<Note> for NoteListItem {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
        }
    }
}
