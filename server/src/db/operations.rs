//! Read-modify-write operations on whole collections.

use super::CollectionStore;
use crate::error::Result;
use chrono::{DateTime, Utc};
use pos_engine::{millis, operation, Collection, Record, RecordId};
use serde_json::{Map, Value};

impl CollectionStore {
    /// All records of a collection, in stored order.
    pub async fn list(&self, collection: Collection) -> Vec<Record> {
        self.load(collection.name()).await
    }

    /// Append a new record built from `fields` and return it.
    pub async fn create(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<Record> {
        self.modify(collection.name(), |records| {
            let id = self.next_id(millis(now), operation::max_id(records))?;
            let record = collection.new_record(id, fields, now);
            Ok(operation::insert(records, record))
        })
        .await
    }

    /// Shallow-merge `patch` into the record with `id`.
    pub async fn update(
        &self,
        collection: Collection,
        id: RecordId,
        patch: Map<String, Value>,
    ) -> Result<Record> {
        self.modify(collection.name(), |records| {
            operation::update(records, collection, id, patch)
        })
        .await
    }

    /// Remove every record with `id`, returning how many were removed.
    pub async fn delete(&self, collection: Collection, id: RecordId) -> Result<usize> {
        self.modify(collection.name(), |records| {
            Ok(operation::remove(records, id))
        })
        .await
    }

    /// Mark the order with `id` as processed.
    pub async fn process_order(&self, id: RecordId, now: DateTime<Utc>) -> Result<Record> {
        self.modify(Collection::Orders.name(), |records| {
            operation::mark_processed(records, id, now)
        })
        .await
    }

    /// Orders still pending, in stored order.
    pub async fn pending_orders(&self) -> Vec<Record> {
        operation::pending(&self.list(Collection::Orders).await)
    }
}
