//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::infra::{Cache, Database, HealthCheck, RateLimiter};
use crate::services::{
    AuthService, NoteService, ServiceContainer, Services, SessionService, UserService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Note service
    pub note_service: Arc<dyn NoteService>,
    /// Session service
    pub session_service: Arc<dyn SessionService>,
    /// Request counter for rate limiting
    pub rate_limiter: Arc<dyn RateLimiter>,
    /// Database probe
    pub database: Arc<dyn HealthCheck>,
    /// Redis probe
    pub cache: Arc<dyn HealthCheck>,
    /// Whether session cookies carry the `Secure` attribute
    pub cookie_secure: bool,
    /// Whether rate limiting keys on forwarded client addresses
    pub trust_proxy: bool,
    cookie_key: Key,
}

impl AppState {
    /// Create application state from the database, the Redis cache and config.
    pub fn from_config(database: Arc<Database>, cache: Arc<Cache>, config: Config) -> Self {
        let services = Services::from_connection(database.get_connection(), cache.clone(), &config);

        Self::new(&services, cache.clone(), database, cache, &config)
    }

    /// Create application state with injected infrastructure.
    pub fn new(
        services: &Services,
        rate_limiter: Arc<dyn RateLimiter>,
        database: Arc<dyn HealthCheck>,
        cache: Arc<dyn HealthCheck>,
        config: &Config,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            note_service: services.notes(),
            session_service: services.sessions(),
            rate_limiter,
            database,
            cache,
            cookie_secure: config.cookie_secure,
            trust_proxy: config.trust_proxy,
            cookie_key: Key::derive_from(config.session_secret_bytes()),
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
