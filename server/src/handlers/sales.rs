//! Cash closing over the sales collection.

use crate::db::CollectionStore;
use chrono::{DateTime, Utc};
use pos_engine::{cash_closing, CashClosing, Collection};

/// Closing for the UTC calendar day of `now`.
pub async fn handle_closing(store: &CollectionStore, now: DateTime<Utc>) -> CashClosing {
    let sales = store.list(Collection::Sales).await;
    let closing = cash_closing(&sales, now.date_naive());
    tracing::debug!(
        sales = closing.sale_count,
        total = %closing.total,
        "Cash closing computed"
    );
    closing
}
