use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaidPlan {
    #[schemars(description = "One payment covers a single calendar month")]
    Monthly,

    #[schemars(
        description = "One payment covers twelve calendar months and is amortized evenly across them"
    )]
    Annually,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Invoice {
    #[schemars(description = "Owner of the uploaded ledger this invoice belongs to")]
    pub user_id: String,

    #[schemars(description = "Ledger file this invoice was loaded from")]
    pub file_id: String,

    pub customer_id: u32,

    #[schemars(description = "First day of the billing cycle the payment covers, YYYY-MM-DD")]
    pub period_start: NaiveDate,

    #[schemars(description = "Last day of the billing cycle the payment covers, YYYY-MM-DD")]
    pub period_end: NaiveDate,

    pub paid_plan: PaidPlan,

    #[schemars(description = "Full amount paid on this invoice, before any amortization")]
    pub paid_amount: Decimal,
}

/// Money attributed to one customer (or one invoice) in each month of the
/// reporting window. Index 0 is the first month of the window.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerFlow {
    pub customer_id: u32,
    pub months: Vec<Decimal>,
}

/// Revenue movement for a single month. The classifier produces records
/// with at most one non-zero field; portfolio sums may populate several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub new: Decimal,
    pub old: Decimal,
    pub reactivation: Decimal,
    pub expansion: Decimal,
    pub contraction: Decimal,
    pub churn: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TotalMrr {
    #[schemars(description = "Revenue from customers seen with positive revenue for the first time")]
    pub new: Vec<Decimal>,

    #[schemars(description = "Revenue unchanged from the previous month")]
    pub old: Vec<Decimal>,

    #[schemars(description = "Revenue resuming after a gap for a previously seen customer")]
    pub reactivation: Vec<Decimal>,

    #[schemars(description = "Upsell on top of a non-zero previous month")]
    pub expansion: Vec<Decimal>,

    #[schemars(description = "Negative; partial downgrade while still paying")]
    pub contraction: Vec<Decimal>,

    #[schemars(description = "Negative; full loss of a previously paying customer")]
    pub churn: Vec<Decimal>,

    #[schemars(description = "Per-month sum of all six movement categories")]
    pub total: Vec<Decimal>,
}

impl TotalMrr {
    /// An empty `total` vector is the cache-miss sentinel.
    pub fn is_empty(&self) -> bool {
        self.total.is_empty()
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(TotalMrr)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// Deterministic cache key for one computed result. Derived per request,
/// never persisted as an entity.
pub fn cache_key(user_id: &str, file_id: &str, period_start: &str, period_end: &str) -> String {
    format!("{}.{}-{}-{}", user_id, file_id, period_start, period_end)
}
