//! Order routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use pos_engine::{Collection, Record};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::handlers::{handle_create, handle_delete, handle_process_order, DeleteResponse};
use crate::AppState;

/// Create order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pedidos", get(list_pending).post(create_order))
        .route("/pedidos/{id}", delete(delete_order))
        .route("/pedidos/{id}/procesar", put(process_order))
}

/// GET /pedidos - only orders still pending.
async fn list_pending(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.store.pending_orders().await)
}

/// POST /pedidos
async fn create_order(
    State(state): State<AppState>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Record>> {
    let Json(fields) = body?;
    let record = handle_create(&state.store, Collection::Orders, fields).await?;
    Ok(Json(record))
}

/// PUT /pedidos/{id}/procesar
async fn process_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>> {
    let order = handle_process_order(&state.store, &id).await?;
    Ok(Json(order))
}

/// DELETE /pedidos/{id}
async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let response = handle_delete(&state.store, Collection::Orders, &id).await?;
    Ok(Json(response))
}
