//! Fixed-window request counting.

use async_trait::async_trait;

use super::Cache;
use crate::errors::AppResult;

#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Count one request for `identifier`. Returns (count in window, allowed).
    async fn hit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)>;
}

#[async_trait]
impl RateLimiter for Cache {
    async fn hit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        self.check_rate_limit(identifier, max_requests, window_seconds)
            .await
    }
}
