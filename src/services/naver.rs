//! Naver Finance scraping client.
//!
//! Two page shapes are consumed: the per-ticker company profile (display
//! name) and the paginated daily price history table. Both require a
//! browser-like User-Agent or Naver rejects the request. HTML extraction
//! lives in free functions over `&str` so fixtures can be parsed in tests
//! without a network, and so no non-Send `scraper::Html` value is ever
//! held across an await point.

use crate::constants::{
    HISTORY_PAGES, NAVER_DATE_FORMAT, NAVER_HISTORY_URL, NAVER_PROFILE_URL, UNKNOWN_COMPANY,
    USER_AGENT,
};
use crate::error::{AppError, Result};
use crate::models::{PricePoint, PriceSeries};
use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

/// Source of company names and price histories, mockable in tests
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Display name for a ticker; "Unknown" on any failure
    async fn fetch_company_name(&self, ticker: &str) -> String;

    /// Daily price history sorted ascending by date; empty on total failure
    async fn fetch_price_history(&self, ticker: &str) -> PriceSeries;
}

pub struct NaverClient {
    client: reqwest::Client,
}

impl NaverClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PriceSource for NaverClient {
    async fn fetch_company_name(&self, ticker: &str) -> String {
        let url = format!("{}?code={}", NAVER_PROFILE_URL, ticker);
        match self.get_text(&url).await {
            Ok(html) => company_name_from_profile(&html),
            Err(e) => {
                warn!(ticker, error = %e, "Company name lookup failed");
                UNKNOWN_COMPANY.to_string()
            }
        }
    }

    async fn fetch_price_history(&self, ticker: &str) -> PriceSeries {
        let mut series = PriceSeries::new();

        for page in 1..=HISTORY_PAGES {
            let url = format!("{}?code={}&page={}", NAVER_HISTORY_URL, ticker, page);
            match self.get_text(&url).await {
                Ok(html) => {
                    let rows = parse_history_rows(ticker, &html);
                    debug!(ticker, page, rows = rows.len(), "Fetched history page");
                    series.extend(rows);
                }
                Err(e) => {
                    // A failed page truncates this ticker's history; the
                    // run itself carries on.
                    warn!(ticker, page, error = %e, "History page fetch failed, skipping");
                }
            }
        }

        series.sort_by_key(|point| point.date);
        series
    }
}

/// Company display name from a profile page, falling back to the
/// "Unknown" sentinel when the page is malformed or the element is missing
pub fn company_name_from_profile(html: &str) -> String {
    extract_company_name(html).unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

/// Extract the company display name from a profile page
pub fn extract_company_name(html: &str) -> Option<String> {
    let selector = Selector::parse("div.wrap_company h2").ok()?;
    let document = Html::parse_document(html);
    let element = document.select(&selector).next()?;
    let name = element.text().collect::<String>().trim().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Extract (date, close) rows from one daily-history page.
///
/// Naver pads its table with spacer rows; anything without at least 7
/// cells, or whose date/price cells fail to parse, is skipped silently.
pub fn parse_history_rows(ticker: &str, html: &str) -> Vec<PricePoint> {
    let row_selector = match Selector::parse("table.type2 tr") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let cell_selector = match Selector::parse("td") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let document = Html::parse_document(html);
    let mut points = Vec::new();

    for row in document.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < 7 {
            continue;
        }

        match parse_history_row(ticker, &cells) {
            Ok(point) => points.push(point),
            Err(_) => continue,
        }
    }

    points
}

/// Parse one history row's cells: cell 0 holds the trading date, cell 1
/// the comma-grouped closing price
fn parse_history_row(ticker: &str, cells: &[String]) -> Result<PricePoint> {
    let date = NaiveDate::parse_from_str(&cells[0], NAVER_DATE_FORMAT)
        .map_err(|e| AppError::Parse(format!("bad date {:?}: {}", cells[0], e)))?;
    let close = cells[1]
        .replace(',', "")
        .parse::<f64>()
        .map_err(|e| AppError::Parse(format!("bad close {:?}: {}", cells[1], e)))?;
    Ok(PricePoint::new(ticker, date, close))
}
