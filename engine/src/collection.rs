//! The four collections of the POS and the stored shape of their records.

use crate::clock::iso_timestamp;
use crate::record::ID_FIELD;
use crate::{Record, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Creation timestamp of products and customers.
pub const CREATED_AT_FIELD: &str = "fechaCreacion";
/// Creation timestamp of orders and sales.
pub const DATE_FIELD: &str = "fecha";
/// Order status.
pub const STATUS_FIELD: &str = "estado";
/// When an order was processed.
pub const PROCESSED_AT_FIELD: &str = "fechaProcesado";
/// User that placed an order.
pub const USER_FIELD: &str = "usuario";
/// Placeholder user for orders that name none.
pub const UNKNOWN_USER: &str = "desconocido";

/// A named collection, persisted as one JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    #[serde(rename = "productos")]
    Products,
    #[serde(rename = "clientes")]
    Customers,
    #[serde(rename = "pedidos")]
    Orders,
    #[serde(rename = "ventas")]
    Sales,
}

impl Collection {
    /// Every collection, in startup order.
    pub const ALL: [Collection; 4] = [
        Collection::Products,
        Collection::Customers,
        Collection::Orders,
        Collection::Sales,
    ];

    /// Storage name of the collection.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Products => "productos",
            Collection::Customers => "clientes",
            Collection::Orders => "pedidos",
            Collection::Sales => "ventas",
        }
    }

    /// File backing the collection.
    pub fn file_name(self) -> String {
        format!("{}.json", self.name())
    }

    /// Which field carries the creation timestamp.
    pub fn created_at_field(self) -> &'static str {
        match self {
            Collection::Products | Collection::Customers => CREATED_AT_FIELD,
            Collection::Orders | Collection::Sales => DATE_FIELD,
        }
    }

    /// Build a new record from client-supplied fields.
    ///
    /// The id comes first, then the client's fields, then whatever the store
    /// stamps. A client-supplied `id` is dropped.
    pub fn new_record(
        self,
        id: RecordId,
        fields: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Record {
        let mut record = Record::new();
        record.set(ID_FIELD, id);

        let user = match fields.get(USER_FIELD) {
            Some(Value::Null) | Some(Value::Bool(false)) | None => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
            Some(other) => Some(other.clone()),
        };

        record.merge(fields);

        if self == Collection::Orders {
            record.set(STATUS_FIELD, OrderStatus::Pending.as_str());
        }
        record.set(self.created_at_field(), iso_timestamp(now));
        if self == Collection::Orders {
            record.set(USER_FIELD, user.unwrap_or_else(|| UNKNOWN_USER.into()));
        }

        record
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Two-state order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "procesado")]
    Processed,
}

impl OrderStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pendiente",
            OrderStatus::Processed => "procesado",
        }
    }

    /// Status of a stored order, if it carries a known one.
    pub fn of(record: &Record) -> Option<Self> {
        match record.get_str(STATUS_FIELD)? {
            "pendiente" => Some(OrderStatus::Pending),
            "procesado" => Some(OrderStatus::Processed),
            _ => None,
        }
    }
}
