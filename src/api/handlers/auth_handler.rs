//! Authentication handlers: join, login and logout.

use axum::{
    extract::State,
    middleware,
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{is_checked, FormSchema, OptionalUser, ValidatedForm};
use crate::api::middleware::rate_limit_auth_middleware;
use crate::api::session::{create_user_session, logout as end_session};
use crate::api::AppState;
use crate::config::{DEFAULT_REDIRECT, LOGIN_DEFAULT_REDIRECT};
use crate::errors::{AppError, AppResult};
use crate::utils::safe_redirect_or;

pub const USER_EXISTS_MESSAGE: &str = "A user already exists with this email";

/// Registration form
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinForm {
    #[validate(email(message = "Invalid email"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Please use a longer password"))]
    #[schema(example = "correct horse battery", min_length = 8)]
    pub password: String,
    /// Local path to continue to after joining
    #[serde(default)]
    #[schema(example = "/notes")]
    pub redirect_to: Option<String>,
}

impl FormSchema for JoinForm {
    const REQUIRED: &'static [&'static str] = &["email", "password"];
}

/// Login form
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[validate(email(message = "Invalid email"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[validate(length(min = 8, message = "Please use a longer password"))]
    #[schema(example = "correct horse battery")]
    pub password: String,
    /// Checkbox; `on` keeps the user signed in across browser restarts
    #[serde(default)]
    #[schema(example = "on")]
    pub remember: Option<String>,
    #[serde(default)]
    #[schema(example = "/notes")]
    pub redirect_to: Option<String>,
}

impl FormSchema for LoginForm {
    const REQUIRED: &'static [&'static str] = &["email", "password"];
}

impl LoginForm {
    pub fn remember(&self) -> bool {
        is_checked(self.remember.as_deref())
    }
}

/// Create authentication routes. Only the form actions count against the
/// stricter auth rate limit.
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let auth_limit = middleware::from_fn_with_state(state, rate_limit_auth_middleware);

    Router::new()
        .route(
            "/join",
            get(join_page).merge(post(join).route_layer(auth_limit.clone())),
        )
        .route(
            "/login",
            get(login_page).merge(post(login).route_layer(auth_limit)),
        )
        .route("/logout", get(logout_page).post(logout))
}

/// Signed-in users have nothing to do on the join and login pages.
fn anonymous_only(user: OptionalUser) -> Response {
    match user.0 {
        Some(_) => Redirect::to(DEFAULT_REDIRECT).into_response(),
        None => Json(json!({})).into_response(),
    }
}

/// Join page loader
#[utoipa::path(
    get,
    path = "/join",
    tag = "Authentication",
    responses(
        (status = 200, description = "Anonymous visitor"),
        (status = 303, description = "Already signed in, redirect to /")
    )
)]
pub async fn join_page(user: OptionalUser) -> Response {
    anonymous_only(user)
}

/// Register a new user and sign them in
#[utoipa::path(
    post,
    path = "/join",
    tag = "Authentication",
    request_body(content = JoinForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "User created, session cookie set"),
        (status = 400, description = "Field errors", body = crate::types::ActionData),
        (status = 429, description = "Too many attempts")
    )
)]
pub async fn join(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidatedForm(form): ValidatedForm<JoinForm>,
) -> AppResult<(SignedCookieJar, Redirect)> {
    let redirect_to = safe_redirect_or(form.redirect_to.as_deref(), DEFAULT_REDIRECT);

    if state
        .user_service
        .get_user_by_email(&form.email)
        .await?
        .is_some()
    {
        return Err(AppError::field("email", USER_EXISTS_MESSAGE));
    }

    // The unique index catches a concurrent join that won the race
    let user = match state.auth_service.create_user(form.email, form.password).await {
        Ok(user) => user,
        Err(AppError::Conflict(_)) => return Err(AppError::field("email", USER_EXISTS_MESSAGE)),
        Err(e) => return Err(e),
    };

    create_user_session(&state, jar, user.id, false, &redirect_to).await
}

/// Login page loader
#[utoipa::path(
    get,
    path = "/login",
    tag = "Authentication",
    responses(
        (status = 200, description = "Anonymous visitor"),
        (status = 303, description = "Already signed in, redirect to /")
    )
)]
pub async fn login_page(user: OptionalUser) -> Response {
    anonymous_only(user)
}

/// Verify credentials and start a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in, session cookie set"),
        (status = 400, description = "Field errors or invalid credentials", body = crate::types::ActionData),
        (status = 429, description = "Too many attempts")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> AppResult<(SignedCookieJar, Redirect)> {
    let redirect_to = safe_redirect_or(form.redirect_to.as_deref(), LOGIN_DEFAULT_REDIRECT);
    let remember = form.remember();

    let Some(user) = state
        .auth_service
        .verify_login(&form.email, &form.password)
        .await?
    else {
        tracing::warn!("Rejected login attempt");
        return Err(AppError::InvalidCredentials);
    };

    tracing::info!(user_id = %user.id, remember, "User logged in");
    create_user_session(&state, jar, user.id, remember, &redirect_to).await
}

/// Sign out
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Authentication",
    responses(
        (status = 303, description = "Session destroyed, cookie cleared, redirect to /")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<(SignedCookieJar, Redirect)> {
    end_session(&state, jar).await
}

/// Visiting the logout URL directly just goes home
pub async fn logout_page() -> Redirect {
    Redirect::to(DEFAULT_REDIRECT)
}
