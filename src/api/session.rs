//! Session cookie handling.
//!
//! The cookie carries only the signed session id. Everything else lives in
//! the session store.

use axum::{
    extract::OriginalUri,
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{LOGIN_PATH, SESSION_COOKIE_NAME};
use crate::domain::{Session, User};
use crate::errors::{AppError, AppResult};

/// Session and user resolved for the current request.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session: Session,
    pub user: User,
}

/// Resolve the cookie in `jar` to a live session and its user.
///
/// Unknown or expired sessions, and sessions whose user no longer exists,
/// resolve to `None`.
pub async fn resolve_session(
    state: &AppState,
    jar: &SignedCookieJar,
) -> AppResult<Option<CurrentSession>> {
    let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
        return Ok(None);
    };

    let Some(session) = state.session_service.resolve(cookie.value()).await? else {
        return Ok(None);
    };

    match state.user_service.get_user(session.user_id).await {
        Ok(user) => Ok(Some(CurrentSession { session, user })),
        Err(AppError::NotFound(_)) => {
            tracing::debug!(user_id = %session.user_id, "Session user no longer exists");
            state.session_service.end(&session.id).await?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

pub fn get_user(parts: &Parts) -> Option<User> {
    parts
        .extensions
        .get::<CurrentSession>()
        .map(|current| current.user.clone())
}

pub fn get_user_id(parts: &Parts) -> Option<Uuid> {
    parts
        .extensions
        .get::<CurrentSession>()
        .map(|current| current.user.id)
}

/// The current user, or a redirect to the login page that comes back here.
pub fn require_user(parts: &Parts) -> Result<User, Redirect> {
    get_user(parts).ok_or_else(|| Redirect::to(&login_redirect(parts)))
}

fn login_redirect(parts: &Parts) -> String {
    let uri = parts
        .extensions
        .get::<OriginalUri>()
        .map(|original| &original.0)
        .unwrap_or(&parts.uri);

    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    format!("{}?redirectTo={}", LOGIN_PATH, urlencoding::encode(target))
}

/// Start a session for `user_id`, set the cookie and redirect to `redirect_to`.
///
/// `redirect_to` must already be sanitized.
pub async fn create_user_session(
    state: &AppState,
    jar: SignedCookieJar,
    user_id: Uuid,
    remember: bool,
    redirect_to: &str,
) -> AppResult<(SignedCookieJar, Redirect)> {
    let session = state.session_service.start(user_id, remember).await?;

    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, session.id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure);

    // Browser-session cookie unless the user asked to be remembered
    if remember {
        let lifetime = state.session_service.lifetime(true);
        cookie = cookie.max_age(time::Duration::seconds(lifetime.num_seconds()));
    }

    Ok((jar.add(cookie), Redirect::to(redirect_to)))
}

/// Destroy the current session (if any), clear the cookie and redirect to `/`.
pub async fn logout(
    state: &AppState,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Redirect)> {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        state.session_service.end(cookie.value()).await?;
        tracing::info!("Session ended");
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE_NAME).path("/"));
    Ok((jar, Redirect::to("/")))
}
