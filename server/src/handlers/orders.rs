//! Order lifecycle: pending → processed.

use crate::db::CollectionStore;
use crate::error::{not_found_message, AppError, Result};
use chrono::Utc;
use pos_engine::{parse_record_id, Collection, Record};

/// Mark the order addressed by `raw_id` as processed.
pub async fn handle_process_order(store: &CollectionStore, raw_id: &str) -> Result<Record> {
    let id = parse_record_id(raw_id)
        .ok_or_else(|| AppError::NotFound(not_found_message(Collection::Orders)))?;

    let order = store.process_order(id, Utc::now()).await?;
    tracing::info!(id, "Order processed");
    Ok(order)
}
