//! Unified error handling for the server.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pos_engine::Collection;
use serde::Serialize;

/// Body of every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Engine error: {0}")]
    Engine(#[from] pos_engine::Error),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// User-facing message for a record missing from `collection`.
pub fn not_found_message(collection: Collection) -> String {
    match collection {
        Collection::Products => "Producto no encontrado",
        Collection::Customers => "Cliente no encontrado",
        Collection::Orders => "Pedido no encontrado",
        Collection::Sales => "Venta no encontrada",
    }
    .to_string()
}

/// Error response body.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// The generic 500 body.
    pub fn internal() -> Self {
        Self {
            error: INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            AppError::Engine(pos_engine::Error::RecordNotFound { collection, .. }) => {
                (StatusCode::NOT_FOUND, not_found_message(*collection))
            }
            AppError::Engine(
                e @ (pos_engine::Error::IdExhausted | pos_engine::Error::InvalidPayload(_)),
            ) => {
                tracing::error!("Engine error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
