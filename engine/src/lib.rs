//! # POS Engine
//!
//! Record model and pure transformations behind the point-of-sale backend.
//!
//! This crate holds everything that can be decided without touching a disk:
//! what a stored record looks like, how ids are handed out, how create,
//! update, delete and order processing change a collection, and how the daily
//! cash closing is computed. Persistence lives in the server crate.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine only sees in-memory collections
//! - **Deterministic**: the current time is always passed in
//! - **Open records**: fields the engine does not own pass through untouched
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Record`] is a JSON object with an `id`. Ids are canonical
//! [`RecordId`] values; a stored id written as a numeric string matches the
//! same number.
//!
//! ### Collections
//!
//! Four [`Collection`]s exist: products, customers, orders and sales. Each
//! knows how to stamp a freshly created record.
//!
//! ### Operations
//!
//! The [`operation`] module contains the whole-collection transformations:
//! [`operation::insert`], [`operation::update`], [`operation::remove`],
//! [`operation::mark_processed`] and [`operation::pending`].
//!
//! ### Cash closing
//!
//! [`cash_closing`] sums today's sales per payment method.
//!
//! ## Quick Start
//!
//! ```rust
//! use pos_engine::{operation, Collection, IdGenerator, Record};
//! use chrono::{TimeZone, Utc};
//! use serde_json::json;
//!
//! let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
//! let mut ids = IdGenerator::new();
//! let mut products: Vec<Record> = Vec::new();
//!
//! // 1. Create a record
//! let fields = json!({"codigo": "A1", "menor": 10}).as_object().cloned().unwrap();
//! let id = ids.next(1_000, operation::max_id(&products)).unwrap();
//! let created = operation::insert(
//!     &mut products,
//!     Collection::Products.new_record(id, fields, now),
//! );
//!
//! // 2. Update it
//! let patch = json!({"menor": 20}).as_object().cloned().unwrap();
//! let updated = operation::update(&mut products, Collection::Products, id, patch).unwrap();
//! assert_eq!(updated.get("codigo"), created.get("codigo"));
//! assert_eq!(updated.get("menor"), Some(&json!(20)));
//! ```

pub mod clock;
pub mod closing;
pub mod collection;
pub mod error;
pub mod operation;
pub mod record;

// Re-export main types at crate root
pub use clock::{iso_date, iso_timestamp, millis, IdGenerator};
pub use closing::{cash_closing, CashClosing, PaymentMethod};
pub use collection::{Collection, OrderStatus};
pub use error::Error;
pub use record::{parse_record_id, Record};

/// Type aliases for clarity
pub type RecordId = u64;
pub type CollectionName = String;
pub type Timestamp = u64;
