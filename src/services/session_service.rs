//! Session service - starting, resolving and ending user sessions.

use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::Session;
use crate::errors::AppResult;
use crate::infra::SessionStore;

#[async_trait]
pub trait SessionService: Send + Sync {
    /// Create and persist a session for `user_id`.
    async fn start(&self, user_id: Uuid, remember: bool) -> AppResult<Session>;

    /// Live session for `id`; `None` when unknown or expired.
    async fn resolve(&self, id: &str) -> AppResult<Option<Session>>;

    /// Destroy the session. Unknown ids are ignored.
    async fn end(&self, id: &str) -> AppResult<()>;

    /// How long a session lives.
    fn lifetime(&self, remember: bool) -> Duration;
}

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
    remember_ttl: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, config: &Config) -> Self {
        Self {
            store,
            ttl: Duration::seconds(config.session_ttl_seconds()),
            remember_ttl: Duration::seconds(config.remember_ttl_seconds()),
        }
    }
}

#[async_trait]
impl SessionService for SessionManager {
    async fn start(&self, user_id: Uuid, remember: bool) -> AppResult<Session> {
        let session = Session::new(user_id, remember, self.lifetime(remember));
        self.store.save(&session).await?;

        tracing::debug!(user_id = %user_id, remember, "Session started");
        Ok(session)
    }

    async fn resolve(&self, id: &str) -> AppResult<Option<Session>> {
        match self.store.load(id).await? {
            Some(session) if session.is_expired() => {
                self.store.delete(id).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn end(&self, id: &str) -> AppResult<()> {
        self.store.delete(id).await
    }

    fn lifetime(&self, remember: bool) -> Duration {
        if remember {
            self.remember_ttl
        } else {
            self.ttl
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockSessionStore;
    use mockall::predicate::eq;

    fn config() -> Config {
        Config::with_session_secret("test-session-secret-with-32-chars!!")
    }

    #[tokio::test]
    async fn test_remembered_session_lives_longer() {
        let mut store = MockSessionStore::new();
        store.expect_save().times(2).returning(|_| Ok(()));
        let manager = SessionManager::new(Arc::new(store), &config());

        let user_id = Uuid::new_v4();
        let short = manager.start(user_id, false).await.unwrap();
        let long = manager.start(user_id, true).await.unwrap();

        assert!(long.expires_at > short.expires_at);
        assert!(long.remember);
        assert!(!short.remember);
        assert!(manager.lifetime(true) > manager.lifetime(false));
    }

    #[tokio::test]
    async fn test_expired_session_is_dropped() {
        let expired = Session::new(Uuid::new_v4(), false, Duration::seconds(-5));
        let id = expired.id.clone();

        let mut store = MockSessionStore::new();
        store
            .expect_load()
            .with(eq(id.clone()))
            .returning(move |_| Ok(Some(expired.clone())));
        store
            .expect_delete()
            .with(eq(id.clone()))
            .times(1)
            .returning(|_| Ok(()));

        let manager = SessionManager::new(Arc::new(store), &config());
        assert!(manager.resolve(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unknown_session_resolves_to_none() {
        let mut store = MockSessionStore::new();
        store.expect_load().returning(|_| Ok(None));
        store.expect_delete().times(0);

        let manager = SessionManager::new(Arc::new(store), &config());
        assert!(manager.resolve("missing").await.unwrap().is_none());
    }
}
