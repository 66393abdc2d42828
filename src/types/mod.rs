//! Shared types for DRY compliance.

mod form;

pub use form::{ActionData, FormErrors, REQUIRED_MESSAGE};
