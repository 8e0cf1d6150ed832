//! Hidden account panel. Every call carries the shared admin secret instead
//! of a session token.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};
use serde::Serialize;

use crate::auth::hash_password;
use crate::db::users;
use crate::handlers::parse_id;
use crate::models::user::{can_remove_admin, CreateUserRequest, SecretRequest};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::Json;
use crate::utils::response::{empty_success, success};

pub const SECRET_HEADER: &str = "x-admin-secret";

const LAST_ADMIN: &str = "Não é possível deletar o último usuário administrador";

#[derive(Debug, Serialize)]
pub struct ResetAdmin {
    pub email: String,
}

fn body_secret(body: &Option<Json<SecretRequest>>) -> Option<&str> {
    body.as_ref()
        .and_then(|Json(body)| body.secret_password.as_deref())
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let secret = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
    state.require_admin_secret(secret)?;

    let pool = state.db.ready().await?;
    let users = users::list(pool).await?;
    Ok(success(users, "Usuários carregados"))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Response, AppError> {
    state.require_admin_secret(request.secret_password.as_deref())?;
    let new_user = request.validate()?;

    let pool = state.db.ready().await?;
    if users::email_taken(pool, &new_user.email).await? {
        return Err(AppError::ValidationError(
            "Email já está em uso".to_string(),
        ));
    }

    let hash = hash_password(&new_user.password)?;
    let user = users::insert(pool, &new_user.name, &new_user.email, &hash).await?;

    tracing::info!(user_id = user.id, email = %user.email, "Admin user created");
    Ok(success(user, "Usuário criado com sucesso"))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    body: Option<Json<SecretRequest>>,
) -> Result<Response, AppError> {
    state.require_admin_secret(body_secret(&body))?;
    let id = parse_id(&raw_id, "ID de usuário inválido")?;

    let pool = state.db.ready().await?;
    let user = users::find(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Usuário não encontrado".to_string()))?;

    if !can_remove_admin(users::count(pool).await?) {
        return Err(AppError::ValidationError(LAST_ADMIN.to_string()));
    }

    // The guarded delete closes the gap between the count and the delete.
    if !users::delete_unless_last(pool, id).await? {
        return Err(AppError::ValidationError(LAST_ADMIN.to_string()));
    }

    tracing::info!(user_id = id, email = %user.email, "Admin user deleted");
    Ok(empty_success("Usuário deletado com sucesso"))
}

/// Restores the configured default admin and its default password, creating
/// the account if it is gone.
pub async fn reset_admin(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SecretRequest>>,
) -> Result<Response, AppError> {
    state.require_admin_secret(body_secret(&body))?;

    let pool = state.db.ready().await?;
    let admin = &state.db.seed().admin;
    let hash = hash_password(&admin.password)?;

    let user = users::upsert_by_email(pool, &admin.name, &admin.email, &hash).await?;

    tracing::warn!(user_id = user.id, email = %user.email, "Default admin user reset");
    Ok(success(
        ResetAdmin { email: user.email },
        "Usuário administrador redefinido",
    ))
}
