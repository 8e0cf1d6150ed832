use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Response,
};
use chrono::Local;

use crate::auth::AuthUser;
use crate::db::events;
use crate::handlers::parse_id;
use crate::models::invite::{self, InviteQuery};
use crate::models::pagination::{ListQuery, PageInfo};
use crate::models::{EventPage, EventPayload, EventStatus};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{Json, Query};
use crate::utils::response::{created, empty_success, success};

const INVALID_ID: &str = "ID do evento inválido";

fn not_found() -> AppError {
    AppError::NotFound("Evento não encontrado".to_string())
}

/// Lists one page of events. Reading the list first settles every past
/// scheduled event, so callers always see current statuses.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, AppError> {
    let page = query.page_request();
    let status = query.status_filter()?;
    let pool = state.db.ready().await?;

    let today = Local::now().date_naive();
    match events::settle_past_events(pool, today).await {
        Ok(0) => {}
        Ok(settled) => tracing::info!(settled, "Past events marked as realizado"),
        Err(e) => tracing::warn!(error = %e, "Failed to update event statuses"),
    }

    let (rows, total) = tokio::try_join!(
        events::list(pool, status, page),
        events::count(pool, status)
    )?;

    tracing::debug!(
        page = page.page,
        limit = page.limit,
        status = status.map(EventStatus::as_str),
        found = rows.len(),
        total,
        "Listed events"
    );

    Ok(success(
        EventPage {
            events: rows,
            pagination: PageInfo::new(page, total),
        },
        "Eventos carregados",
    ))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    let pool = state.db.ready().await?;

    let event = events::find(pool, id).await?.ok_or_else(not_found)?;
    Ok(success(event, "Evento encontrado"))
}

pub async fn event_invite(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    Query(query): Query<InviteQuery>,
) -> Result<Response, AppError> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    let pool = state.db.ready().await?;

    let event = events::find(pool, id).await?.ok_or_else(not_found)?;
    Ok(success(invite::render(&event, query.style), "Convite gerado"))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<EventPayload>,
) -> Result<Response, AppError> {
    let mut draft = payload.validate()?;
    // New events always start scheduled.
    draft.status = EventStatus::Andamento;

    let pool = state.db.ready().await?;
    let event = events::insert(pool, &draft).await?;

    tracing::info!(event_id = event.id, user_id = user.user_id, "Event created");
    Ok(created(event, "Evento criado com sucesso"))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(raw_id): Path<String>,
    Json(payload): Json<EventPayload>,
) -> Result<Response, AppError> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    let draft = payload.validate()?;

    let pool = state.db.ready().await?;
    let event = events::update(pool, id, &draft)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(event_id = id, user_id = user.user_id, status = %event.status, "Event updated");
    Ok(success(event, "Evento atualizado com sucesso"))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&raw_id, INVALID_ID)?;
    let pool = state.db.ready().await?;

    if !events::delete(pool, id).await? {
        return Err(not_found());
    }

    tracing::info!(event_id = id, user_id = user.user_id, "Event deleted");
    Ok(empty_success("Evento excluído com sucesso"))
}
