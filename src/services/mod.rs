pub mod aggregator;
pub mod naver;
pub mod run_store;

pub use aggregator::{summarize, SummaryTail, TableBuilder};
pub use naver::{NaverClient, PriceSource};
pub use run_store::{Progress, RunState, RunStore, SharedRunState, SharedRunStore};
