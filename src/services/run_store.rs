//! Per-run progress and result slots.
//!
//! Each analysis submission gets its own run id, progress record, outcome
//! log, and result slot, so a second submission never corrupts a run that
//! is still in flight. The store also tracks the most recent submission so
//! the id-less `/progress` and `/result` endpoints keep their original
//! single-slot behavior. Completed runs are retained until process exit.

use crate::models::{ResultTable, TickerOutcome};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Snapshot of one run's progress, polled by clients
#[derive(Debug, Clone, Default, Serialize)]
pub struct Progress {
    /// Ticker count for this run (after deduplication)
    pub total: usize,
    /// 1-based index of the ticker most recently completed
    pub current: usize,
    /// True only after the full run, including the final sort, completes
    pub done: bool,
}

/// Mutable state of one analysis run
#[derive(Debug, Default)]
pub struct RunState {
    pub progress: Progress,
    /// Per-ticker dispositions, in processing order
    pub outcomes: Vec<(String, TickerOutcome)>,
    pub result: Option<ResultTable>,
}

pub type SharedRunState = Arc<RwLock<RunState>>;

/// Process-wide registry of runs
#[derive(Default)]
pub struct RunStore {
    runs: RwLock<HashMap<Uuid, SharedRunState>>,
    latest: RwLock<Option<Uuid>>,
}

pub type SharedRunStore = Arc<RunStore>;

impl RunStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new run and mark it as the latest submission
    pub async fn create_run(&self, total: usize) -> (Uuid, SharedRunState) {
        let id = Uuid::new_v4();
        let state = Arc::new(RwLock::new(RunState {
            progress: Progress {
                total,
                current: 0,
                done: false,
            },
            ..RunState::default()
        }));

        self.runs.write().await.insert(id, state.clone());
        *self.latest.write().await = Some(id);
        (id, state)
    }

    pub async fn get(&self, id: Uuid) -> Option<SharedRunState> {
        self.runs.read().await.get(&id).cloned()
    }

    /// The most recently submitted run, if any
    pub async fn latest(&self) -> Option<SharedRunState> {
        let id = (*self.latest.read().await)?;
        self.get(id).await
    }

    /// Look up by id, falling back to the latest run when no id is given
    pub async fn resolve(&self, id: Option<Uuid>) -> Option<SharedRunState> {
        match id {
            Some(id) => self.get(id).await,
            None => self.latest().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_run_initializes_progress() {
        let store = RunStore::new();
        let (_, state) = store.create_run(3).await;
        let state = state.read().await;
        assert_eq!(state.progress.total, 3);
        assert_eq!(state.progress.current, 0);
        assert!(!state.progress.done);
        assert!(state.result.is_none());
    }

    #[tokio::test]
    async fn test_latest_tracks_most_recent_submission() {
        let store = RunStore::new();
        let (first_id, _) = store.create_run(1).await;
        let (second_id, _) = store.create_run(2).await;
        assert_ne!(first_id, second_id);

        let latest = store.latest().await.unwrap();
        assert_eq!(latest.read().await.progress.total, 2);
    }

    #[tokio::test]
    async fn test_runs_do_not_collide() {
        let store = RunStore::new();
        let (first_id, first) = store.create_run(1).await;
        let (_, second) = store.create_run(5).await;

        first.write().await.progress.current = 1;
        assert_eq!(second.read().await.progress.current, 0);
        assert_eq!(
            store.get(first_id).await.unwrap().read().await.progress.current,
            1
        );
    }

    #[tokio::test]
    async fn test_resolve_unknown_id() {
        let store = RunStore::new();
        store.create_run(1).await;
        assert!(store.resolve(Some(Uuid::new_v4())).await.is_none());
        assert!(store.resolve(None).await.is_some());
    }
}
