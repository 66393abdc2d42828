//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! Repository access goes through the Unit of Work; sessions go through
//! the session store.

mod auth_service;
pub mod container;
mod note_service;
mod session_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator};
pub use note_service::{NoteManager, NoteService};
pub use session_service::{SessionManager, SessionService};
pub use user_service::{UserManager, UserService};
