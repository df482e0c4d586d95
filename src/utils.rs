use crate::constants::DATE_LABEL_FORMAT;
use chrono::NaiveDate;
use std::collections::HashSet;

/// Parse an uploaded ticker list: one symbol per line, whitespace trimmed,
/// blank lines ignored, duplicates removed. Order of the surviving tickers
/// is not guaranteed to match the input.
pub fn parse_ticker_list(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tickers = Vec::new();

    for line in input.lines() {
        let ticker = line.trim();
        if ticker.is_empty() {
            continue;
        }
        if seen.insert(ticker.to_string()) {
            tickers.push(ticker.to_string());
        }
    }

    tickers
}

/// Render a trading date as a result-table column label (e.g. 05-Jan-2024)
pub fn format_date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// Resolve the listening port: PORT environment variable, else the default
pub fn resolve_port(default: u16) -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
