use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::auth::{clear_session_cookie, session_cookie, verify_password, AUTH_COOKIE};
use crate::db::users;
use crate::models::user::{LoginRequest, SessionUser};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::Json;
use crate::utils::response::{empty_success, respond, success};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Response), AppError> {
    let (email, password) = request.credentials()?;
    let pool = state.db.ready().await?;

    let user = users::find_by_email(pool, email)
        .await?
        .filter(|user| verify_password(password, &user.password))
        .ok_or_else(|| {
            tracing::info!(email = %email, "Rejected login attempt");
            AppError::AuthError("Email ou senha incorretos".to_string())
        })?;

    let token = state.keys.issue(user.id)?;
    tracing::info!(user_id = user.id, "User logged in");

    let jar = jar.add(session_cookie(token, state.config.production));
    Ok((
        jar,
        success(SessionUser::from(user), "Login realizado com sucesso"),
    ))
}

pub async fn logout(jar: CookieJar) -> (CookieJar, Response) {
    (
        jar.remove(clear_session_cookie()),
        empty_success("Logout realizado com sucesso"),
    )
}

pub async fn verify(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let Some(cookie) = jar.get(AUTH_COOKIE) else {
        return rejected("Token não encontrado");
    };

    match state.keys.verify(cookie.value()) {
        Some(claims) => respond(
            StatusCode::OK,
            true,
            Some(SessionStatus {
                authenticated: true,
                user_id: Some(claims.user_id),
            }),
            "Token válido",
        ),
        None => rejected("Token inválido"),
    }
}

fn rejected(message: &str) -> Response {
    respond(
        StatusCode::UNAUTHORIZED,
        false,
        Some(SessionStatus {
            authenticated: false,
            user_id: None,
        }),
        message,
    )
}
