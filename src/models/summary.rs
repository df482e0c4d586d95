use serde::Serialize;

/// Ranked per-ticker summary: the five most recent normalized MACD-gap
/// values, aligned with the run's shared date labels.
#[derive(Debug, Clone, Serialize)]
pub struct TickerSummary {
    pub ticker: String,
    pub company: String,
    /// Values under the run's date labels, oldest first, rounded to 2 decimals
    pub values: Vec<f64>,
}

/// Full output of one analysis run
#[derive(Debug, Clone, Serialize)]
pub struct ResultTable {
    /// Five calendar-date column labels, fixed by the first summarized ticker
    pub date_columns: Vec<String>,
    /// Rows sorted ascending by the value under the lastmost date label
    pub rows: Vec<TickerSummary>,
}

/// Per-ticker disposition recorded while a run progresses.
///
/// Failures never abort the run; they are logged here and the ticker is
/// simply absent from the final table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TickerOutcome {
    Completed,
    /// No rows survived fetching at all
    NoData,
    /// Fewer than the required number of price points
    InsufficientData { points: usize },
    /// Constant MACD gap, min-max normalization has no range
    NormalizationUndefined,
}
