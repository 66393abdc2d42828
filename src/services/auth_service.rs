//! Authentication service - account creation and credential checks.
//!
//! Password hashing is delegated to the domain `Password` value object;
//! repository access goes through the Unit of Work.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Password, User};
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Hash the password and store a new user.
    ///
    /// Fails with `AppError::Conflict` if the email is taken, even when a
    /// concurrent request registered it after the caller's pre-check.
    async fn create_user(&self, email: String, password: String) -> AppResult<User>;

    /// Return the user when email and password match, `None` otherwise.
    /// Unknown emails and wrong passwords are indistinguishable.
    async fn verify_login(&self, email: &str, password: &str) -> AppResult<Option<User>>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn create_user(&self, email: String, password: String) -> AppResult<User> {
        let password_hash = Password::new(&password)?.into_string();
        let user = self.uow.users().create(email, password_hash).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn verify_login(&self, email: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.uow.users().find_by_email(email).await? else {
            // Same argon2 cost as a real check so timing can't enumerate emails
            Password::verify_decoy(password);
            return Ok(None);
        };

        let stored = Password::from_hash(user.password_hash.clone());
        if stored.verify(password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
