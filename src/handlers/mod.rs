use axum::response::Response;
use serde::Serialize;

use crate::utils::error::AppError;
use crate::utils::response::success;

pub mod admin;
pub mod auth;
pub mod events;
pub mod pages;
pub mod system;

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "scout-events-api",
    };

    success(payload, "Health check successful")
}

/// Path ids arrive as text so a malformed id becomes a 400 with a readable
/// message instead of the extractor's default rejection.
pub(crate) fn parse_id(raw: &str, message: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::ValidationError(message.to_string()))
}
