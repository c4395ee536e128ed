//! CRUD transformations over an in-memory collection.
//!
//! Every function here works on a `Vec<Record>` that was loaded whole from
//! storage and will be saved whole afterwards. None of them touch IO.

use crate::collection::{OrderStatus, PROCESSED_AT_FIELD, STATUS_FIELD};
use crate::{clock::iso_timestamp, error::Result, Collection, Error, Record, RecordId};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Highest id currently stored, used as a floor for the next id.
pub fn max_id(records: &[Record]) -> Option<RecordId> {
    records.iter().filter_map(Record::id).max()
}

/// Append a record at the end of the collection and return it.
pub fn insert(records: &mut Vec<Record>, record: Record) -> Record {
    records.push(record.clone());
    record
}

/// Shallow-merge `patch` into the first record carrying `id`.
pub fn update(
    records: &mut [Record],
    collection: Collection,
    id: RecordId,
    patch: Map<String, Value>,
) -> Result<Record> {
    let record = records
        .iter_mut()
        .find(|r| r.has_id(id))
        .ok_or(Error::RecordNotFound { collection, id })?;

    record.merge(patch);
    Ok(record.clone())
}

/// Remove every record carrying `id`. Returns how many were removed; zero is
/// not an error.
pub fn remove(records: &mut Vec<Record>, id: RecordId) -> usize {
    let before = records.len();
    records.retain(|r| !r.has_id(id));
    before - records.len()
}

/// Move an order to the processed state and stamp when it happened.
pub fn mark_processed(records: &mut [Record], id: RecordId, now: DateTime<Utc>) -> Result<Record> {
    let order = records
        .iter_mut()
        .find(|r| r.has_id(id))
        .ok_or(Error::RecordNotFound {
            collection: Collection::Orders,
            id,
        })?;

    order.set(STATUS_FIELD, OrderStatus::Processed.as_str());
    order.set(PROCESSED_AT_FIELD, iso_timestamp(now));
    Ok(order.clone())
}

/// Orders still waiting to be processed, in stored order.
pub fn pending(records: &[Record]) -> Vec<Record> {
    records
        .iter()
        .filter(|r| OrderStatus::of(r) == Some(OrderStatus::Pending))
        .cloned()
        .collect()
}
