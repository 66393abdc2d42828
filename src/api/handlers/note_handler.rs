//! Note handlers. Every route requires a signed-in user.

use axum::{
    extract::{Path, State},
    response::{Json, Redirect},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::{FormSchema, RequireUser, ValidatedForm};
use crate::api::AppState;
use crate::config::NOTES_PATH;
use crate::domain::{Note, NoteListItem};
use crate::errors::AppResult;

/// New note form
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct NoteForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Groceries")]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Body is required"))]
    #[schema(example = "Milk, eggs, coffee")]
    pub body: String,
}

impl FormSchema for NoteForm {}

/// Notes index data
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteListData {
    pub note_list_items: Vec<NoteListItem>,
}

/// Single note data
#[derive(Debug, Serialize, ToSchema)]
pub struct NoteData {
    pub note: Note,
}

/// Create note routes
pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes))
        .route("/notes/new", get(new_note_page).post(create_note))
        .route("/notes/:id", get(get_note).post(delete_note))
}

/// List the current user's notes
#[utoipa::path(
    get,
    path = "/notes",
    tag = "Notes",
    responses(
        (status = 200, description = "Note titles, most recently updated first", body = NoteListData),
        (status = 303, description = "Not signed in, redirect to login")
    )
)]
pub async fn list_notes(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> AppResult<Json<NoteListData>> {
    let note_list_items = state.note_service.get_note_list_items(user.id).await?;
    Ok(Json(NoteListData { note_list_items }))
}

/// New note page loader
#[utoipa::path(
    get,
    path = "/notes/new",
    tag = "Notes",
    responses(
        (status = 200, description = "Signed in"),
        (status = 303, description = "Not signed in, redirect to login")
    )
)]
pub async fn new_note_page(RequireUser(_user): RequireUser) -> Json<Value> {
    Json(json!({}))
}

/// Create a note
#[utoipa::path(
    post,
    path = "/notes/new",
    tag = "Notes",
    request_body(content = NoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Note created, redirect to it"),
        (status = 400, description = "Field errors", body = crate::types::ActionData)
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ValidatedForm(form): ValidatedForm<NoteForm>,
) -> AppResult<Redirect> {
    let note = state
        .note_service
        .create_note(user.id, form.title, form.body)
        .await?;

    Ok(Redirect::to(&format!("{}/{}", NOTES_PATH, note.id)))
}

/// Show one of the current user's notes
#[utoipa::path(
    get,
    path = "/notes/{id}",
    tag = "Notes",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 200, description = "The note", body = NoteData),
        (status = 400, description = "Malformed ID"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn get_note(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NoteData>> {
    let note = state.note_service.get_note(id, user.id).await?;
    Ok(Json(NoteData { note }))
}

/// Delete one of the current user's notes
#[utoipa::path(
    post,
    path = "/notes/{id}",
    tag = "Notes",
    params(("id" = Uuid, Path, description = "Note ID")),
    responses(
        (status = 303, description = "Note deleted, redirect to /notes"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn delete_note(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<Uuid>,
) -> AppResult<Redirect> {
    state.note_service.delete_note(id, user.id).await?;
    Ok(Redirect::to(NOTES_PATH))
}
