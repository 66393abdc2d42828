//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{auth_handler, note_handler, root_handler};
use crate::domain::{Note, NoteListItem, UserResponse};
use crate::types::{ActionData, FormErrors};

/// OpenAPI documentation for the notes server
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes Server",
        version = "0.1.0",
        description = "Session-authenticated notes application with Axum, SeaORM and Redis",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Layout
        root_handler::root,
        root_handler::health,
        // Authentication
        auth_handler::join_page,
        auth_handler::join,
        auth_handler::login_page,
        auth_handler::login,
        auth_handler::logout,
        // Notes
        note_handler::list_notes,
        note_handler::new_note_page,
        note_handler::create_note,
        note_handler::get_note,
        note_handler::delete_note,
    ),
    components(
        schemas(
            // Domain types
            UserResponse,
            Note,
            NoteListItem,
            // Form types
            FormErrors,
            ActionData,
            auth_handler::JoinForm,
            auth_handler::LoginForm,
            note_handler::NoteForm,
            // Loader data
            root_handler::RootData,
            note_handler::NoteListData,
            note_handler::NoteData,
        )
    ),
    tags(
        (name = "Layout", description = "Root layout data"),
        (name = "Health", description = "Dependency health"),
        (name = "Authentication", description = "Join, login and logout"),
        (name = "Notes", description = "The signed-in user's notes")
    )
)]
pub struct ApiDoc;
