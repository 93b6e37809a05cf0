//! Collaborator contracts consumed by the analytics engine.
//!
//! The engine is storage-agnostic: it reads invoices through
//! [`InvoiceStore`] and keeps computed results in a [`MrrCache`]. Both
//! traits are object-safe and synchronous; implementations own their
//! transport concerns (connection handling, timeouts, retries).

use anyhow::Result;
use chrono::NaiveDate;

use crate::schema::{Invoice, TotalMrr};

/// Persistent invoice ledger, scoped by user and uploaded file.
pub trait InvoiceStore: Send + Sync {
    /// Persists a batch of invoices and returns them as stored.
    fn add_invoices(&self, invoices: Vec<Invoice>) -> Result<Vec<Invoice>>;

    /// Invoices of one ledger whose billing period overlaps `[from, to]`,
    /// both bounds inclusive.
    fn invoices_by_period(
        &self,
        user_id: &str,
        file_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Invoice>>;

    /// Removes every invoice belonging to the given ledger.
    fn delete_invoices(&self, user_id: &str, file_id: &str) -> Result<()>;
}

/// Cache of computed results keyed by [`cache_key`](crate::schema::cache_key).
///
/// A miss is an empty [`TotalMrr`] with no error; callers treat an empty
/// `total` vector as the miss sentinel rather than a distinguished
/// not-found error.
pub trait MrrCache: Send + Sync {
    fn get_mrr(&self, key: &str) -> Result<TotalMrr>;

    /// Stores a computed result and returns the cached value.
    fn set_mrr(&self, key: &str, mrr: &TotalMrr) -> Result<TotalMrr>;
}
