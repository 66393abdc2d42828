//! Infrastructure layer - External systems integration
//!
//! - Database connections, migrations and repositories (SeaORM)
//! - Redis-backed session store and rate limiter
//! - Health probes

pub mod cache;
pub mod db;
pub mod health;
pub mod rate_limiter;
pub mod repositories;
pub mod session_store;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use health::HealthCheck;
pub use rate_limiter::RateLimiter;
pub use repositories::{NoteRepository, NoteStore, UserRepository, UserStore};
pub use session_store::SessionStore;
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(test)]
pub use repositories::{MockNoteRepository, MockUserRepository};
#[cfg(test)]
pub use session_store::MockSessionStore;
