//! Products and customers.

use super::DeleteResponse;
use crate::db::CollectionStore;
use crate::error::{not_found_message, AppError, Result};
use chrono::Utc;
use pos_engine::{parse_record_id, Collection, Record};
use serde_json::{Map, Value};

/// Create a product or a customer.
pub async fn handle_create(
    store: &CollectionStore,
    collection: Collection,
    fields: Map<String, Value>,
) -> Result<Record> {
    let record = store.create(collection, fields, Utc::now()).await?;
    tracing::info!(collection = %collection, id = ?record.id(), "Record created");
    Ok(record)
}

/// Shallow-merge `patch` into the product addressed by `raw_id`.
pub async fn handle_update_product(
    store: &CollectionStore,
    raw_id: &str,
    patch: Map<String, Value>,
) -> Result<Record> {
    let id = parse_record_id(raw_id)
        .ok_or_else(|| AppError::NotFound(not_found_message(Collection::Products)))?;

    let record = store.update(Collection::Products, id, patch).await?;
    tracing::info!(id, "Product updated");
    Ok(record)
}

/// Delete every record addressed by `raw_id`. Always succeeds unless the file
/// cannot be written.
pub async fn handle_delete(
    store: &CollectionStore,
    collection: Collection,
    raw_id: &str,
) -> Result<DeleteResponse> {
    let Some(id) = parse_record_id(raw_id) else {
        tracing::debug!(collection = %collection, raw_id, "Delete with unparseable id, nothing to do");
        return Ok(DeleteResponse { success: true });
    };

    let removed = store.delete(collection, id).await?;
    tracing::info!(collection = %collection, id, removed, "Records deleted");
    Ok(DeleteResponse { success: true })
}
