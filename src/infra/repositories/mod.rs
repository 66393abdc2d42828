//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod note_repository;
mod user_repository;

pub use note_repository::{NoteRepository, NoteStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(test)]
pub use note_repository::MockNoteRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
