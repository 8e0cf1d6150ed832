use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;

use crate::auth::cookie::AUTH_COOKIE;
use crate::state::AppState;
use crate::utils::error::AppError;

/// The administrator behind a request, proven by the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(AUTH_COOKIE).ok_or_else(|| {
            AppError::AuthError("Não autorizado - Token não encontrado".to_string())
        })?;

        let claims = state
            .keys
            .verify(cookie.value())
            .ok_or_else(|| AppError::AuthError("Não autorizado - Token inválido".to_string()))?;

        Ok(AuthUser {
            user_id: claims.user_id,
        })
    }
}
