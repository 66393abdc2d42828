//! Server-side session record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Association between a browser (via the session cookie) and a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque random identifier carried by the cookie
    pub id: String,
    pub user_id: Uuid,
    /// Whether the user asked to stay signed in
    pub remember: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Start a session for `user_id` that lives for `lifetime`.
    pub fn new(user_id: Uuid, remember: bool, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: generate_session_id(),
            user_id,
            remember,
            created_at: now,
            expires_at: now + lifetime,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    /// Remaining lifetime in whole seconds (zero once expired).
    pub fn ttl_seconds(&self) -> u64 {
        (self.expires_at - Utc::now()).num_seconds().max(0) as u64
    }
}

/// 256 bits of randomness from two v4 UUIDs, hex encoded.
fn generate_session_id() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}
