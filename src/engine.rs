use chrono::{Datelike, NaiveDate};
use log::{debug, info};

use crate::aggregate::{merge_by_customer, sum_portfolio, total_mrr};
use crate::error::{AnalyticsError, Result};
use crate::movement::classify_timeline;
use crate::schema::{cache_key, TotalMrr};
use crate::spreader::spread_invoice;
use crate::store::{InvoiceStore, MrrCache};
use crate::utils::{last_day_of_month, month_labels};

/// Textual format of the window bounds accepted by the engine.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Drives the full MRR pipeline with cache-aside semantics.
///
/// Both collaborators are injected at construction. The engine holds no
/// other state, so one instance can serve concurrent callers as long as
/// the collaborators themselves are safe for concurrent use.
pub struct AnalyticsEngine<S, C> {
    storage: S,
    cache: C,
}

impl<S, C> AnalyticsEngine<S, C>
where
    S: InvoiceStore,
    C: MrrCache,
{
    pub fn new(storage: S, cache: C) -> Self {
        Self { storage, cache }
    }

    /// Computes the per-month MRR decomposition for one ledger over the
    /// given reporting window.
    ///
    /// Returns the month labels covering the window together with the six
    /// movement vectors and their derived total. A cached result with a
    /// non-empty `total` is returned as-is; the month labels are always
    /// recomputed locally.
    pub fn compute_analytics(
        &self,
        user_id: &str,
        file_id: &str,
        period_start: &str,
        period_end: &str,
    ) -> Result<(Vec<String>, TotalMrr)> {
        let start = NaiveDate::parse_from_str(period_start, DATE_FORMAT).map_err(|source| {
            AnalyticsError::InvalidPeriodStart {
                value: period_start.to_string(),
                source,
            }
        })?;
        let end = NaiveDate::parse_from_str(period_end, DATE_FORMAT).map_err(|source| {
            AnalyticsError::InvalidPeriodEnd {
                value: period_end.to_string(),
                source,
            }
        })?;

        if start > end {
            return Err(AnalyticsError::PeriodOrder { start, end });
        }

        let key = cache_key(user_id, file_id, period_start, period_end);
        let cached = self
            .cache
            .get_mrr(&key)
            .map_err(|source| AnalyticsError::CacheRead {
                key: key.clone(),
                source,
            })?;

        let months = month_labels(start, end);

        if !cached.is_empty() {
            debug!("Serving MRR for key {} from cache", key);
            return Ok((months, cached));
        }

        // The fetch window runs through the last day of the final month, so
        // invoices billed late in a partially specified month are captured.
        let fetch_end = last_day_of_month(end.year(), end.month());
        let invoices = self
            .storage
            .invoices_by_period(user_id, file_id, start, fetch_end)
            .map_err(|source| AnalyticsError::Storage {
                from: start,
                to: fetch_end,
                source,
            })?;

        info!(
            "Computing MRR over {} invoices for key {}",
            invoices.len(),
            key
        );

        let months_count = months.len();
        let flows = invoices
            .iter()
            .map(|invoice| spread_invoice(invoice, months_count, start))
            .collect();
        let customers = merge_by_customer(flows)?;

        let timelines: Vec<_> = customers
            .iter()
            .map(|customer| classify_timeline(&customer.months))
            .collect();
        let result = total_mrr(&sum_portfolio(&timelines, months_count));

        self.cache
            .set_mrr(&key, &result)
            .map_err(|source| AnalyticsError::CacheWrite {
                key: key.clone(),
                source,
            })?;

        Ok((months, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryInvoiceStore, InMemoryMrrCache};
    use crate::schema::{Invoice, PaidPlan};
    use rust_decimal_macros::dec;

    fn invoice(customer_id: u32, period_start: &str, plan: PaidPlan, amount: &str) -> Invoice {
        let start = NaiveDate::parse_from_str(period_start, DATE_FORMAT).unwrap();
        Invoice {
            user_id: "user".to_string(),
            file_id: "file".to_string(),
            customer_id,
            period_start: start,
            period_end: start,
            paid_plan: plan,
            paid_amount: amount.parse().unwrap(),
        }
    }

    fn engine_with(
        invoices: Vec<Invoice>,
    ) -> AnalyticsEngine<InMemoryInvoiceStore, InMemoryMrrCache> {
        let storage = InMemoryInvoiceStore::new();
        storage.add_invoices(invoices).unwrap();
        AnalyticsEngine::new(storage, InMemoryMrrCache::new())
    }

    #[test]
    fn test_unparseable_start_names_the_bound() {
        let engine = engine_with(vec![]);
        let err = engine
            .compute_analytics("user", "file", "wrongPeriod", "2021-10-31")
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidPeriodStart { .. }));
        assert!(err.to_string().contains("wrongPeriod"));
    }

    #[test]
    fn test_unparseable_end_names_the_bound() {
        let engine = engine_with(vec![]);
        let err = engine
            .compute_analytics("user", "file", "2021-10-01", "wrongPeriod")
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidPeriodEnd { .. }));
    }

    #[test]
    fn test_start_after_end_is_rejected() {
        let engine = engine_with(vec![]);
        let err = engine
            .compute_analytics("user", "file", "2021-02-02", "2021-01-02")
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::PeriodOrder { .. }));
    }

    #[test]
    fn test_empty_window_is_no_data() {
        let engine = engine_with(vec![]);
        let err = engine
            .compute_analytics("user", "file", "2021-10-01", "2021-10-31")
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::NoData));
    }

    #[test]
    fn test_single_invoice_single_month() {
        let engine = engine_with(vec![invoice(1, "2021-10-01", PaidPlan::Monthly, "100")]);

        let (months, mrr) = engine
            .compute_analytics("user", "file", "2021-10-01", "2021-10-31")
            .unwrap();

        assert_eq!(months, vec!["10.2021"]);
        assert_eq!(mrr.new, vec![dec!(100)]);
        assert_eq!(mrr.total, vec![dec!(100)]);
    }

    #[test]
    fn test_trailing_partial_month_is_fetched_in_full() {
        // The invoice is billed after the window end date but inside the
        // window's final calendar month.
        let engine = engine_with(vec![invoice(1, "2021-10-20", PaidPlan::Monthly, "100")]);

        let (_, mrr) = engine
            .compute_analytics("user", "file", "2021-10-01", "2021-10-15")
            .unwrap();

        assert_eq!(mrr.new, vec![dec!(100)]);
    }

    #[test]
    fn test_cached_result_short_circuits_storage() {
        let storage = InMemoryInvoiceStore::new();
        storage
            .add_invoices(vec![invoice(1, "2021-10-01", PaidPlan::Monthly, "100")])
            .unwrap();
        let engine = AnalyticsEngine::new(storage, InMemoryMrrCache::new());

        let (_, first) = engine
            .compute_analytics("user", "file", "2021-10-01", "2021-10-31")
            .unwrap();

        // Losing the underlying invoices no longer affects the window.
        engine.storage.delete_invoices("user", "file").unwrap();

        let (months, second) = engine
            .compute_analytics("user", "file", "2021-10-01", "2021-10-31")
            .unwrap();
        assert_eq!(months, vec!["10.2021"]);
        assert_eq!(second, first);
    }
}
