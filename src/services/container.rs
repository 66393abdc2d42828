//! Service Container - Centralized service access.
//!
//! Handlers depend on service traits only; this is the one place that
//! knows which implementations back them.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, NoteManager, NoteService, SessionManager, SessionService,
    UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{Cache, Persistence, SessionStore, UnitOfWork};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get note service
    fn notes(&self) -> Arc<dyn NoteService>;

    /// Get session service
    fn sessions(&self) -> Arc<dyn SessionService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    note_service: Arc<dyn NoteService>,
    session_service: Arc<dyn SessionService>,
}

impl Services {
    /// Wire every service over one unit of work and session store
    pub fn new<U: UnitOfWork + 'static>(
        uow: Arc<U>,
        sessions: Arc<dyn SessionStore>,
        config: &Config,
    ) -> Self {
        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone())),
            user_service: Arc::new(UserManager::new(uow.clone())),
            note_service: Arc::new(NoteManager::new(uow)),
            session_service: Arc::new(SessionManager::new(sessions, config)),
        }
    }

    /// Create service container from a database connection and the Redis cache
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        cache: Arc<Cache>,
        config: &Config,
    ) -> Self {
        Self::new(Arc::new(Persistence::new(db)), cache, config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn notes(&self) -> Arc<dyn NoteService> {
        self.note_service.clone()
    }

    fn sessions(&self) -> Arc<dyn SessionService> {
        self.session_service.clone()
    }
}
