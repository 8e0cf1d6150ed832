use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::auth::cookie::AUTH_COOKIE;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAccess {
    Allow,
    RedirectTo(&'static str),
}

/// Routing rules for the browser pages.
pub fn page_access(path: &str, authenticated: bool) -> PageAccess {
    if path.starts_with("/admin-secret") {
        return PageAccess::Allow;
    }
    if path.starts_with("/dashboard") && !authenticated {
        return PageAccess::RedirectTo("/login");
    }
    if path == "/login" && authenticated {
        return PageAccess::RedirectTo("/dashboard");
    }
    if path == "/" {
        return PageAccess::RedirectTo("/login");
    }
    PageAccess::Allow
}

/// Page middleware: unauthenticated visitors are sent to the login form
/// instead of receiving a 401.
pub async fn guard_pages(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let user = jar
        .get(AUTH_COOKIE)
        .and_then(|cookie| state.keys.verify(cookie.value()));

    match page_access(&path, user.is_some()) {
        PageAccess::Allow => {
            if let Some(claims) = user {
                tracing::debug!(user_id = claims.user_id, path = %path, "Page access granted");
            }
            next.run(request).await
        }
        PageAccess::RedirectTo(target) => {
            tracing::debug!(path = %path, to = target, "Redirecting page request");
            Redirect::to(target).into_response()
        }
    }
}
