//! Collection storage on disk.
//!
//! Each collection is one pretty-printed JSON array in the data directory.

mod operations;
mod store;

pub use store::*;
