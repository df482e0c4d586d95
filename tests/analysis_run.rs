//! End-to-end analysis runs against a mocked price source.

use async_trait::async_trait;
use chrono::NaiveDate;
use macd_screener::models::{PricePoint, PriceSeries, TickerOutcome};
use macd_screener::services::{PriceSource, RunStore};
use macd_screener::utils::parse_ticker_list;
use macd_screener::worker;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Deterministic in-memory source: a fixed number of trading days per
/// ticker, closes following a sine wave so the MACD gap is never constant.
struct MockSource {
    days: HashMap<String, usize>,
}

impl MockSource {
    fn new(days: &[(&str, usize)]) -> Arc<Self> {
        Arc::new(Self {
            days: days
                .iter()
                .map(|(ticker, n)| (ticker.to_string(), *n))
                .collect(),
        })
    }
}

fn synthetic_series(ticker: &str, days: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..days)
        .map(|i| {
            let close = 100.0 + 10.0 * (i as f64 * 0.4).sin();
            PricePoint::new(ticker, start + chrono::Duration::days(i as i64), close)
        })
        .collect()
}

#[async_trait]
impl PriceSource for MockSource {
    async fn fetch_company_name(&self, ticker: &str) -> String {
        // Small delay so progress can be observed mid-run
        tokio::time::sleep(Duration::from_millis(2)).await;
        format!("{} Corp", ticker)
    }

    async fn fetch_price_history(&self, ticker: &str) -> PriceSeries {
        tokio::time::sleep(Duration::from_millis(2)).await;
        match self.days.get(ticker) {
            Some(&days) => synthetic_series(ticker, days),
            None => PriceSeries::new(),
        }
    }
}

#[tokio::test]
async fn end_to_end_run_with_short_ticker_excluded() {
    let tickers = parse_ticker_list("TICK1\nTICK2\n\nTICK1");
    assert_eq!(tickers.len(), 2);

    let source = MockSource::new(&[("TICK1", 40), ("TICK2", 10)]);
    let store = RunStore::new();
    let (_, state) = store.create_run(tickers.len()).await;

    worker::run(tickers, source, state.clone()).await;

    let run = state.read().await;
    assert_eq!(run.progress.total, 2);
    assert_eq!(run.progress.current, 2);
    assert!(run.progress.done);

    let table = run.result.as_ref().expect("table should exist");
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].ticker, "TICK1");
    assert_eq!(table.rows[0].company, "TICK1 Corp");
    assert_eq!(table.rows[0].values.len(), 5);
    assert_eq!(table.date_columns.len(), 5);

    let outcomes: HashMap<_, _> = run.outcomes.iter().cloned().collect();
    assert_eq!(outcomes["TICK1"], TickerOutcome::Completed);
    assert_eq!(
        outcomes["TICK2"],
        TickerOutcome::InsufficientData { points: 10 }
    );
}

#[tokio::test]
async fn thirty_four_points_excluded_thirty_five_included() {
    let source = MockSource::new(&[("SHORT", 34), ("EXACT", 35)]);
    let store = RunStore::new();
    let (_, state) = store.create_run(2).await;

    worker::run(
        vec!["SHORT".to_string(), "EXACT".to_string()],
        source,
        state.clone(),
    )
    .await;

    let run = state.read().await;
    let table = run.result.as_ref().expect("table should exist");
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].ticker, "EXACT");
    assert_eq!(
        run.outcomes[0],
        (
            "SHORT".to_string(),
            TickerOutcome::InsufficientData { points: 34 }
        )
    );
}

#[tokio::test]
async fn unknown_ticker_reports_no_data() {
    let source = MockSource::new(&[("KNOWN", 40)]);
    let store = RunStore::new();
    let (_, state) = store.create_run(2).await;

    worker::run(
        vec!["MISSING".to_string(), "KNOWN".to_string()],
        source,
        state.clone(),
    )
    .await;

    let run = state.read().await;
    assert_eq!(run.outcomes[0], ("MISSING".to_string(), TickerOutcome::NoData));
    assert_eq!(run.result.as_ref().unwrap().rows.len(), 1);
}

#[tokio::test]
async fn rerun_is_deterministic() {
    let tickers = vec!["AAA".to_string(), "BBB".to_string()];
    let source = MockSource::new(&[("AAA", 50), ("BBB", 60)]);
    let store = RunStore::new();

    let mut tables = Vec::new();
    for _ in 0..2 {
        let (_, state) = store.create_run(tickers.len()).await;
        worker::run(tickers.clone(), source.clone(), state.clone()).await;
        let run = state.read().await;
        tables.push(serde_json::to_string(run.result.as_ref().unwrap()).unwrap());
    }

    assert_eq!(tables[0], tables[1]);
}

#[tokio::test]
async fn progress_is_monotonic_and_completes() {
    let source = MockSource::new(&[("A", 40), ("B", 40), ("C", 40)]);
    let store = RunStore::new();
    let tickers = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let (_, state) = store.create_run(tickers.len()).await;

    let handle = tokio::spawn(worker::run(tickers, source, state.clone()));

    let mut last_current = 0;
    loop {
        let progress = state.read().await.progress.clone();
        assert!(progress.current >= last_current, "progress went backwards");
        assert!(progress.current <= progress.total);
        last_current = progress.current;
        if progress.done {
            assert_eq!(progress.current, progress.total);
            break;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    handle.await.unwrap();
}
