//! Session resolution middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::SignedCookieJar;

use crate::api::session::resolve_session;
use crate::api::AppState;
use crate::errors::AppError;

/// Resolves the session cookie once per request.
///
/// On success the `CurrentSession` is injected into the request extensions,
/// where the user extractors pick it up. Anonymous requests pass through
/// untouched.
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(current) = resolve_session(&state, &jar).await? {
        request.extensions_mut().insert(current);
    }

    Ok(next.run(request).await)
}
