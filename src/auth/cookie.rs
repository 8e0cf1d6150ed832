use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::auth::session::SESSION_TTL_SECS;

pub const AUTH_COOKIE: &str = "auth-token";

/// `secure` is only set in production so the panel works over plain HTTP
/// during development.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(time::Duration::seconds(SESSION_TTL_SECS))
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, "")).path("/").build()
}
