//! Assembles per-ticker indicator series into the run's ranked table.
//!
//! Known limitation: the first ticker summarized in a run fixes the five
//! calendar-date column labels for every later ticker. Tickers whose
//! trading calendar differs are placed under those labels positionally,
//! so their values can sit under dates they did not trade on. The labels
//! are a presentation schema, not an alignment guarantee.

use crate::constants::SUMMARY_DAYS;
use crate::models::{IndicatorSeries, ResultTable, TickerSummary};
use crate::utils::format_date_label;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// The trailing normalized values for one ticker, oldest first
pub type SummaryTail = Vec<(NaiveDate, f64)>;

/// Extract the last five normalized values in date order.
///
/// Returns `None` when fewer than five rows are available, in which case
/// the ticker is excluded from the run's table entirely.
pub fn summarize(indicators: &IndicatorSeries) -> Option<SummaryTail> {
    // Every row of an IndicatorSeries carries a normalized value (the
    // no-adjust EMA has no undefined warmup rows), so the tail is taken
    // directly from the series.
    if indicators.len() < SUMMARY_DAYS {
        return None;
    }

    let tail = indicators[indicators.len() - SUMMARY_DAYS..]
        .iter()
        .map(|point| (point.date, round2(point.macd_normalized)))
        .collect();
    Some(tail)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Accumulates summaries for one run and produces the sorted table
#[derive(Default)]
pub struct TableBuilder {
    date_columns: Option<Vec<String>>,
    rows: Vec<TickerSummary>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one ticker's tail. The first tail added fixes the run's date
    /// labels; later tails are placed under them by position.
    pub fn push(&mut self, ticker: &str, company: &str, tail: &SummaryTail) {
        if self.date_columns.is_none() {
            self.date_columns = Some(
                tail.iter()
                    .map(|(date, _)| format_date_label(*date))
                    .collect(),
            );
        }

        self.rows.push(TickerSummary {
            ticker: ticker.to_string(),
            company: company.to_string(),
            values: tail.iter().map(|(_, value)| *value).collect(),
        });
    }

    /// Sort ascending by the most recent day's value and produce the table.
    /// `None` when no ticker survived the run.
    pub fn build(mut self) -> Option<ResultTable> {
        let date_columns = self.date_columns?;

        // Stable sort keeps input order on ties
        self.rows.sort_by(|a, b| {
            let left = a.values.last().copied().unwrap_or(0.0);
            let right = b.values.last().copied().unwrap_or(0.0);
            left.partial_cmp(&right).unwrap_or(Ordering::Equal)
        });

        Some(ResultTable {
            date_columns,
            rows: self.rows,
        })
    }
}
