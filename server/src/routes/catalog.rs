//! Product and customer routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, put},
    Json, Router,
};
use pos_engine::{Collection, Record};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::handlers::{handle_create, handle_delete, handle_update_product, DeleteResponse};
use crate::AppState;

/// Create product and customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/productos", get(list_products).post(create_product))
        .route(
            "/productos/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/clientes", get(list_customers).post(create_customer))
}

/// GET /productos
async fn list_products(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.store.list(Collection::Products).await)
}

/// POST /productos
async fn create_product(
    State(state): State<AppState>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Record>> {
    let Json(fields) = body?;
    let record = handle_create(&state.store, Collection::Products, fields).await?;
    Ok(Json(record))
}

/// PUT /productos/{id}
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Record>> {
    let Json(patch) = body?;
    let record = handle_update_product(&state.store, &id, patch).await?;
    Ok(Json(record))
}

/// DELETE /productos/{id}
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let response = handle_delete(&state.store, Collection::Products, &id).await?;
    Ok(Json(response))
}

/// GET /clientes
async fn list_customers(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.store.list(Collection::Customers).await)
}

/// POST /clientes
async fn create_customer(
    State(state): State<AppState>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Record>> {
    let Json(fields) = body?;
    let record = handle_create(&state.store, Collection::Customers, fields).await?;
    Ok(Json(record))
}
