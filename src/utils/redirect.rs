//! Redirect target sanitizing.

/// Return `to` when it is a same-origin path, otherwise `default`.
///
/// Only values starting with a single `/` are accepted. `//host` and
/// `/\host` are protocol-relative to browsers and would leave the site.
/// Browsers drop tabs and newlines inside a `Location` before resolving it,
/// so the target must be visible ASCII throughout. That is also the only
/// form a `Location` header value can carry.
pub fn safe_redirect(to: &str, default: &str) -> String {
    if !to.starts_with('/')
        || to.starts_with("//")
        || to.starts_with("/\\")
        || !to.chars().all(|c| c.is_ascii_graphic())
    {
        return default.to_string();
    }

    to.to_string()
}

/// Like `safe_redirect`, for an optional form or query value.
pub fn safe_redirect_or(to: Option<&str>, default: &str) -> String {
    safe_redirect(to.unwrap_or_default(), default)
}
