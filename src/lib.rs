//! Notes Server - session-authenticated notes application
//!
//! Users join or log in with email and password, get an opaque signed
//! session cookie backed by Redis, and manage their own notes stored in
//! Postgres.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Users, notes, sessions and the password value object
//! - **services**: Application use cases and business logic
//! - **infra**: Database, Redis session store and rate limiter
//! - **api**: HTTP handlers, middleware, session cookies and routes
//! - **types**: Shared types (form errors)
//! - **utils**: Redirect sanitizing
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Note, Password, Session, User};
pub use errors::{AppError, AppResult};
pub use infra::Cache;
