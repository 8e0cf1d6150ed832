//! Local versions of [`axum::Json`] and [`axum::extract::Query`] that reject
//! with [`AppError`], so malformed input gets the same error envelope as any
//! other validation failure.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::utils::error::AppError;

pub struct Json<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Json(value))
    }
}

pub struct Query<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state).await?;
        Ok(Query(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match rejection {
            JsonRejection::JsonDataError(e) => format!("Dados inválidos: {}", e.body_text()),
            JsonRejection::JsonSyntaxError(e) => format!("JSON malformado: {}", e.body_text()),
            JsonRejection::MissingJsonContentType(_) => {
                "O corpo deve ser enviado como application/json".to_string()
            }
            JsonRejection::BytesRejection(_) => {
                "Não foi possível ler o corpo da requisição".to_string()
            }
            other => {
                warn!(rejection = ?other, "Unhandled JSON rejection");
                "Corpo da requisição inválido".to_string()
            }
        };
        AppError::ValidationError(message)
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::ValidationError(format!(
            "Parâmetros inválidos: {}",
            rejection.body_text()
        ))
    }
}
