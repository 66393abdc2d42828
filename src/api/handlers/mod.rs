//! HTTP request handlers.

pub mod auth_handler;
pub mod note_handler;
pub mod root_handler;

pub use auth_handler::auth_routes;
pub use note_handler::note_routes;
