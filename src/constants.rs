//! Tunable constants for the analysis pipeline.

/// Span of the fast EMA feeding the MACD line
pub const EMA_FAST_SPAN: usize = 12;

/// Span of the slow EMA feeding the MACD line
pub const EMA_SLOW_SPAN: usize = 26;

/// Span of the EMA smoothing the MACD into the signal line
pub const SIGNAL_SPAN: usize = 9;

/// Minimum number of price points required before indicators are computed.
///
/// Covers the 26-period slow EMA warmup plus the 9-period signal warmup;
/// series shorter than this are discarded entirely, never partially
/// processed.
pub const MIN_SERIES_POINTS: usize = 35;

/// Number of trailing normalized values reported per ticker
pub const SUMMARY_DAYS: usize = 5;

// Any series long enough for indicators is long enough to summarize
const _: () = assert!(SUMMARY_DAYS <= MIN_SERIES_POINTS);

/// Number of daily-price pages pulled per ticker.
///
/// Naver lists 10 trading days per page, so 19 pages comfortably exceeds
/// the 35-point minimum even with failed pages. A tunable, not a contract
/// with the source site.
pub const HISTORY_PAGES: u32 = 19;

/// Default listening port, overridable via the PORT environment variable
pub const DEFAULT_PORT: u16 = 10000;

/// Naver Finance company profile page, keyed by ticker
pub const NAVER_PROFILE_URL: &str = "https://finance.naver.com/item/main.nhn";

/// Naver Finance paginated daily price history, keyed by ticker and page
pub const NAVER_HISTORY_URL: &str = "https://finance.naver.com/item/sise_day.nhn";

/// Browser-like identification header; Naver rejects bare clients
pub const USER_AGENT: &str = "Mozilla/5.0";

/// Date format used by Naver's daily price table (e.g. 2024.01.05)
pub const NAVER_DATE_FORMAT: &str = "%Y.%m.%d";

/// Date format used for result table column labels (e.g. 05-Jan-2024)
pub const DATE_LABEL_FORMAT: &str = "%d-%b-%Y";

/// Sentinel company name when the profile lookup fails
pub const UNKNOWN_COMPANY: &str = "Unknown";
