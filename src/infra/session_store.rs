//! Session persistence.

use async_trait::async_trait;

use super::Cache;
use crate::config::CACHE_PREFIX_SESSION;
use crate::domain::Session;
use crate::errors::AppResult;

#[cfg(test)]
use mockall::automock;

/// Storage for server-side sessions. Entries expire on their own at
/// `Session::expires_at`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, session: &Session) -> AppResult<()>;

    async fn load(&self, id: &str) -> AppResult<Option<Session>>;

    async fn delete(&self, id: &str) -> AppResult<()>;
}

fn session_key(id: &str) -> String {
    format!("{}{}", CACHE_PREFIX_SESSION, id)
}

#[async_trait]
impl SessionStore for Cache {
    async fn save(&self, session: &Session) -> AppResult<()> {
        self.set_with_ttl(&session_key(&session.id), session, session.ttl_seconds())
            .await
    }

    async fn load(&self, id: &str) -> AppResult<Option<Session>> {
        self.get(&session_key(id)).await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        Cache::delete(self, &session_key(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_keys_are_namespaced() {
        assert_eq!(session_key("abc"), "session:abc");
    }
}
