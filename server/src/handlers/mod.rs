//! Request handlers for the POS collections.

mod catalog;
mod orders;
mod sales;

pub use catalog::*;
pub use orders::*;
pub use sales::*;

use serde::Serialize;

/// Response of every delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
