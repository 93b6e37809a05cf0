use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Failed to parse period start '{value}': {source}")]
    InvalidPeriodStart {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Failed to parse period end '{value}': {source}")]
    InvalidPeriodEnd {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Period start {start} must precede period end {end}")]
    PeriodOrder { start: NaiveDate, end: NaiveDate },

    #[error("No data found for given period")]
    NoData,

    #[error("Failed to read cached MRR for key '{key}': {source}")]
    CacheRead { key: String, source: anyhow::Error },

    #[error("Failed to cache computed MRR for key '{key}': {source}")]
    CacheWrite { key: String, source: anyhow::Error },

    #[error("Failed to load invoices for window {from} to {to}: {source}")]
    Storage {
        from: NaiveDate,
        to: NaiveDate,
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
