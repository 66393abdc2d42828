//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SESSION_REMEMBER_DAYS, DEFAULT_SESSION_TTL_HOURS, MIN_SESSION_SECRET_LENGTH,
    SECONDS_PER_DAY, SECONDS_PER_HOUR,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    session_secret: String,
    pub session_ttl_hours: i64,
    pub session_remember_days: i64,
    /// Mark the session cookie `Secure` (HTTPS only)
    pub cookie_secure: bool,
    /// Read the client address from `X-Forwarded-For`/`X-Real-IP`
    /// (only when a reverse proxy in front overwrites those headers)
    pub trust_proxy: bool,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("session_remember_days", &self.session_remember_days)
            .field("cookie_secure", &self.cookie_secure)
            .field("trust_proxy", &self.trust_proxy)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Configuration with development defaults and the given session secret.
    ///
    /// # Panics
    /// Panics if the secret is shorter than the signing key requires.
    pub fn with_session_secret(session_secret: impl Into<String>) -> Self {
        let session_secret = session_secret.into();
        if session_secret.len() < MIN_SESSION_SECRET_LENGTH {
            panic!(
                "SESSION_SECRET must be at least {} characters long",
                MIN_SESSION_SECRET_LENGTH
            );
        }

        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            session_secret,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            session_remember_days: DEFAULT_SESSION_REMEMBER_DAYS,
            cookie_secure: !cfg!(debug_assertions),
            trust_proxy: false,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if SESSION_SECRET is not set in a release build, or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let session_secret = env::var("SESSION_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("SESSION_SECRET not set, using insecure default for development");
                "dev-session-secret-minimum-32-chars!!".to_string()
            } else {
                panic!("SESSION_SECRET environment variable must be set in production");
            }
        });

        let mut config = Self::with_session_secret(session_secret);

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(url) = env::var("REDIS_URL") {
            config.redis_url = url;
        }
        if let Some(hours) = parse_var("SESSION_TTL_HOURS") {
            config.session_ttl_hours = hours;
        }
        if let Some(days) = parse_var("SESSION_REMEMBER_DAYS") {
            config.session_remember_days = days;
        }
        if let Some(secure) = parse_var("COOKIE_SECURE") {
            config.cookie_secure = secure;
        }
        if let Some(trust) = parse_var("TRUST_PROXY") {
            config.trust_proxy = trust;
        }
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = parse_var("SERVER_PORT") {
            config.server_port = port;
        }

        config
    }

    /// Secret bytes the cookie signing key is derived from.
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.as_bytes()
    }

    /// Server-side lifetime of an unremembered session, in seconds.
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_hours * SECONDS_PER_HOUR
    }

    /// Lifetime of a remembered session, in seconds.
    pub fn remember_ttl_seconds(&self) -> i64 {
        self.session_remember_days * SECONDS_PER_DAY
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
