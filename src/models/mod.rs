mod price;
mod summary;
pub mod indicators;

pub use indicators::{IndicatorPoint, IndicatorSeries};
pub use price::{PricePoint, PriceSeries};
pub use summary::{ResultTable, TickerOutcome, TickerSummary};
