use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily closing price scraped from the source site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Ticker symbol the point belongs to
    pub ticker: String,

    /// Trading date
    pub date: NaiveDate,

    /// Closing price
    pub close: f64,
}

impl PricePoint {
    pub fn new(ticker: impl Into<String>, date: NaiveDate, close: f64) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            close,
        }
    }
}

/// Chronologically ordered price history for a single ticker
pub type PriceSeries = Vec<PricePoint>;
