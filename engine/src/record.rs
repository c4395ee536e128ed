//! Record type for stored data.
//!
//! A record is an open JSON object. The store only owns a handful of fields
//! (`id` and the timestamps); everything else a client sends is kept as-is.

use crate::{error::Result, Error, RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the identity field.
pub const ID_FIELD: &str = "id";

/// A data record in a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Canonical id of the record.
    ///
    /// Older files may hold the id as a numeric string, so both forms are
    /// accepted.
    pub fn id(&self) -> Option<RecordId> {
        self.0.get(ID_FIELD).and_then(value_to_id)
    }

    /// Whether this record carries the given id.
    pub fn has_id(&self, id: RecordId) -> bool {
        self.id() == Some(id)
    }

    /// Get a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Get a string field.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Set a field, keeping its position if it already exists.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Shallow merge: every field of `patch` overwrites the field of the same
    /// name. Nested values are replaced whole. The id is never overwritten.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        for (field, value) in patch {
            if field == ID_FIELD {
                continue;
            }
            self.0.insert(field, value);
        }
    }

    /// Borrow the underlying object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::InvalidPayload(format!("expected object, got {other}"))),
        }
    }
}

/// Parse an id coming from outside (a path segment). `None` means no stored
/// record can carry it.
pub fn parse_record_id(raw: &str) -> Option<RecordId> {
    raw.trim().parse().ok()
}

fn value_to_id(value: &Value) -> Option<RecordId> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
