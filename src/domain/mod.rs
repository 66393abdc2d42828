//! Domain layer - Core business entities and logic
//!
//! Users, their notes, the sessions that tie a browser to a user, and the
//! password value object. No infrastructure concerns live here.

pub mod note;
pub mod password;
pub mod session;
pub mod user;

pub use note::{Note, NoteListItem};
pub use password::Password;
pub use session::Session;
pub use user::{User, UserResponse};
