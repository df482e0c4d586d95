//! Background analysis worker.
//!
//! One task is spawned per submission. It walks the deduplicated ticker
//! list sequentially, records a per-ticker outcome after each ticker
//! finishes (never before), and publishes the sorted table plus the done
//! flag as its final act. Per-ticker failures are logged and skipped; the
//! run itself never aborts.

use crate::error::AppError;
use crate::models::{indicators::compute_indicators, TickerOutcome};
use crate::services::{summarize, PriceSource, SharedRunState, TableBuilder};
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[instrument(skip(tickers, source, state), fields(total = tickers.len()))]
pub async fn run(tickers: Vec<String>, source: Arc<dyn PriceSource>, state: SharedRunState) {
    info!("Starting analysis run");

    let mut builder = TableBuilder::new();

    for (idx, ticker) in tickers.iter().enumerate() {
        let outcome = process_ticker(ticker, source.as_ref(), &mut builder).await;
        match &outcome {
            TickerOutcome::Completed => {
                info!(ticker = %ticker, "Ticker completed");
            }
            other => {
                warn!(ticker = %ticker, outcome = ?other, "Ticker excluded from results");
            }
        }

        let mut run = state.write().await;
        run.outcomes.push((ticker.clone(), outcome));
        run.progress.current = idx + 1;
    }

    let table = builder.build();
    let mut run = state.write().await;
    let summarized = table.as_ref().map(|t| t.rows.len()).unwrap_or(0);
    run.result = table;
    run.progress.done = true;
    info!(summarized, "Analysis run completed");
}

async fn process_ticker(
    ticker: &str,
    source: &dyn PriceSource,
    builder: &mut TableBuilder,
) -> TickerOutcome {
    let series = source.fetch_price_history(ticker).await;
    let company = source.fetch_company_name(ticker).await;

    if series.is_empty() {
        return TickerOutcome::NoData;
    }

    let indicators = match compute_indicators(&series) {
        Ok(indicators) => indicators,
        Err(AppError::InsufficientData { points, .. }) => {
            return TickerOutcome::InsufficientData { points };
        }
        Err(AppError::NormalizationUndefined { .. }) => {
            return TickerOutcome::NormalizationUndefined;
        }
        Err(e) => {
            warn!(ticker, error = %e, "Indicator computation failed");
            return TickerOutcome::NoData;
        }
    };

    match summarize(&indicators) {
        Some(tail) => {
            builder.push(ticker, &company, &tail);
            TickerOutcome::Completed
        }
        // Only reachable if SUMMARY_DAYS were raised above
        // MIN_SERIES_POINTS; constants.rs asserts the relation
        None => TickerOutcome::InsufficientData {
            points: indicators.len(),
        },
    }
}
