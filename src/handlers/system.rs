use std::sync::Arc;

use axum::{extract::State, response::Response};
use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::db::{events, users};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

#[derive(Debug, Serialize)]
pub struct InitStatus {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    /// Whether the schema had already been set up before this call.
    pub was_initialized: bool,
    pub events_count: i64,
    pub users_count: i64,
    pub timestamp: NaiveDateTime,
}

/// Forces schema initialization.
pub async fn init(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    state.db.ready().await?;
    Ok(success(
        InitStatus { status: "ready" },
        "Banco de dados inicializado com sucesso",
    ))
}

pub async fn database_health(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    sqlx::query("SELECT 1").execute(state.db.pool()).await?;
    let was_initialized = state.db.is_initialized();
    let pool = state.db.ready().await?;

    let (events_count, users_count) =
        tokio::try_join!(events::count(pool, None), users::count(pool))?;

    Ok(success(
        DatabaseHealth {
            was_initialized,
            events_count,
            users_count,
            timestamp: Local::now().naive_local(),
        },
        "Conexão com o banco de dados funcionando",
    ))
}
