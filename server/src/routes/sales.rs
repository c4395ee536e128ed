//! Sales and cash closing routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use pos_engine::{CashClosing, Collection, Record};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::handlers::{handle_closing, handle_create};
use crate::AppState;

/// Create sales routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ventas", get(list_sales).post(create_sale))
        .route("/cierre", get(closing))
}

/// GET /ventas
async fn list_sales(State(state): State<AppState>) -> Json<Vec<Record>> {
    Json(state.store.list(Collection::Sales).await)
}

/// POST /ventas
async fn create_sale(
    State(state): State<AppState>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Record>> {
    let Json(fields) = body?;
    let record = handle_create(&state.store, Collection::Sales, fields).await?;
    Ok(Json(record))
}

/// GET /cierre - today's cash closing.
async fn closing(State(state): State<AppState>) -> Json<CashClosing> {
    Json(handle_closing(&state.store, Utc::now()).await)
}
