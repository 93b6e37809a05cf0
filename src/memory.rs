//! In-memory implementations of the collaborator contracts.
//!
//! Thread-safe behind `RwLock`, with no persistence across restarts.
//! Suitable for tests, demos and single-instance embedding; production
//! deployments implement [`InvoiceStore`] and [`MrrCache`] over their own
//! backends instead.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;
use chrono::NaiveDate;

use crate::schema::{Invoice, TotalMrr};
use crate::store::{InvoiceStore, MrrCache};

#[derive(Default)]
pub struct InMemoryInvoiceStore {
    invoices: RwLock<Vec<Invoice>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InvoiceStore for InMemoryInvoiceStore {
    fn add_invoices(&self, invoices: Vec<Invoice>) -> Result<Vec<Invoice>> {
        self.invoices
            .write()
            .unwrap()
            .extend(invoices.iter().cloned());
        Ok(invoices)
    }

    fn invoices_by_period(
        &self,
        user_id: &str,
        file_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Invoice>> {
        let invoices = self.invoices.read().unwrap();
        Ok(invoices
            .iter()
            .filter(|invoice| {
                invoice.user_id == user_id
                    && invoice.file_id == file_id
                    && invoice.period_start <= to
                    && invoice.period_end >= from
            })
            .cloned()
            .collect())
    }

    fn delete_invoices(&self, user_id: &str, file_id: &str) -> Result<()> {
        self.invoices
            .write()
            .unwrap()
            .retain(|invoice| !(invoice.user_id == user_id && invoice.file_id == file_id));
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMrrCache {
    entries: RwLock<HashMap<String, TotalMrr>>,
}

impl InMemoryMrrCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MrrCache for InMemoryMrrCache {
    fn get_mrr(&self, key: &str) -> Result<TotalMrr> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(key).cloned().unwrap_or_default())
    }

    fn set_mrr(&self, key: &str, mrr: &TotalMrr) -> Result<TotalMrr> {
        self.entries
            .write()
            .unwrap()
            .insert(key.to_string(), mrr.clone());
        Ok(mrr.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PaidPlan;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn invoice(user_id: &str, file_id: &str, period_start: NaiveDate) -> Invoice {
        Invoice {
            user_id: user_id.to_string(),
            file_id: file_id.to_string(),
            customer_id: 1,
            period_start,
            period_end: period_start,
            paid_plan: PaidPlan::Monthly,
            paid_amount: dec!(100),
        }
    }

    #[test]
    fn test_period_filter_is_inclusive_and_scoped() {
        let store = InMemoryInvoiceStore::new();
        let mut spanning = invoice("user", "file", date(2021, 6, 1));
        spanning.period_end = date(2022, 5, 31);

        store
            .add_invoices(vec![
                invoice("user", "file", date(2021, 10, 1)),
                invoice("user", "file", date(2021, 12, 31)),
                invoice("user", "file", date(2022, 1, 1)),
                invoice("user", "other", date(2021, 10, 1)),
                invoice("someone", "file", date(2021, 10, 1)),
                spanning,
            ])
            .unwrap();

        let found = store
            .invoices_by_period("user", "file", date(2021, 10, 1), date(2021, 12, 31))
            .unwrap();

        // Both window-bound invoices plus the billing period that overlaps
        // the window from outside it.
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_delete_removes_only_the_given_ledger() {
        let store = InMemoryInvoiceStore::new();
        store
            .add_invoices(vec![
                invoice("user", "file", date(2021, 10, 1)),
                invoice("user", "other", date(2021, 10, 1)),
            ])
            .unwrap();

        store.delete_invoices("user", "file").unwrap();

        let remaining = store
            .invoices_by_period("user", "other", date(2021, 1, 1), date(2021, 12, 31))
            .unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn test_cache_miss_is_empty_result_without_error() {
        let cache = InMemoryMrrCache::new();
        let missed = cache.get_mrr("unknown").unwrap();
        assert!(missed.is_empty());
    }

    #[test]
    fn test_cache_round_trip() {
        let cache = InMemoryMrrCache::new();
        let mrr = TotalMrr {
            new: vec![dec!(100)],
            total: vec![dec!(100)],
            ..Default::default()
        };

        let stored = cache.set_mrr("key", &mrr).unwrap();
        assert_eq!(stored, mrr);

        let fetched = cache.get_mrr("key").unwrap();
        assert_eq!(fetched, mrr);
    }
}
