//! # MRR Analytics
//!
//! A library for decomposing a ledger of customer invoices into Monthly
//! Recurring Revenue movement (new, retained, reactivated, expanded,
//! contracted, churned) over an arbitrary reporting window.
//!
//! ## Core Concepts
//!
//! - **Reporting window**: the caller-supplied `[period_start, period_end]`
//!   range, expanded to whole calendar months
//! - **Money-per-period**: the per-month amount vector attributed to one
//!   invoice or one customer; annual payments are amortized at one twelfth
//!   per covered month
//! - **Movement**: how a customer's monthly revenue changed relative to the
//!   prior month, classified into six mutually exclusive categories
//! - **Cache-aside**: computed results are kept in a pluggable cache keyed
//!   by `(user, file, window)`; a hit skips the invoice fetch entirely
//!
//! ## Example
//!
//! ```rust,ignore
//! use mrr_analytics::*;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let storage = InMemoryInvoiceStore::new();
//! storage.add_invoices(vec![Invoice {
//!     user_id: "user".to_string(),
//!     file_id: "invoices.csv".to_string(),
//!     customer_id: 1,
//!     period_start: NaiveDate::from_ymd_opt(2021, 10, 1).unwrap(),
//!     period_end: NaiveDate::from_ymd_opt(2021, 10, 31).unwrap(),
//!     paid_plan: PaidPlan::Monthly,
//!     paid_amount: dec!(100),
//! }])?;
//!
//! let engine = AnalyticsEngine::new(storage, InMemoryMrrCache::new());
//! let (months, mrr) = engine.compute_analytics(
//!     "user",
//!     "invoices.csv",
//!     "2021-10-01",
//!     "2021-12-31",
//! )?;
//! ```

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod memory;
pub mod movement;
pub mod schema;
pub mod spreader;
pub mod store;
pub mod utils;

pub use aggregate::{merge_by_customer, sum_portfolio, total_mrr};
pub use engine::{AnalyticsEngine, DATE_FORMAT};
pub use error::{AnalyticsError, Result};
pub use memory::{InMemoryInvoiceStore, InMemoryMrrCache};
pub use movement::{classify, classify_timeline, ActivityState};
pub use schema::*;
pub use spreader::spread_invoice;
pub use store::{InvoiceStore, MrrCache};
