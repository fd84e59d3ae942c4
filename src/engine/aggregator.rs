//! engine::aggregator
//!
//! Fan a probe out over every registered repository and collect the
//! results in registration order.
//!
//! # Design
//!
//! One tokio task is spawned per repository, so all probes run
//! concurrently (optionally bounded by a semaphore). The join handles are
//! kept in registration order and awaited in that order: slot `i` of the
//! report is always filled by the probe for entry `i`, however the probes
//! interleave. Each task writes only its own slot.
//!
//! # Invariants
//!
//! - `report.results.len() == entries.len()`
//! - `report.results[i].path == entries[i].path()`
//! - A failing or panicking probe fills its slot with an error and never
//!   aborts the run
//! - No retries

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::core::types::{RepoState, RepositoryEntry, StatusResult};
use crate::vcs::{classify, CommandRunner, ProcessRunner, StatusProbe};

/// Outcome of a full status run.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// One result per registry entry, in registry order.
    pub results: Vec<StatusResult>,
    /// Wall time of the whole run.
    #[serde(skip)]
    pub elapsed: Duration,
}

impl StatusReport {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of results in `state`.
    pub fn count(&self, state: RepoState) -> usize {
        self.results.iter().filter(|r| r.state == state).count()
    }

    /// One-line summary, e.g. `3 repositories: 1 clean, 1 dirty, 1 error`.
    pub fn summary(&self) -> String {
        let noun = if self.len() == 1 {
            "repository"
        } else {
            "repositories"
        };
        format!(
            "{} {}: {} clean, {} dirty, {} error",
            self.len(),
            noun,
            self.count(RepoState::Clean),
            self.count(RepoState::Dirty),
            self.count(RepoState::Error),
        )
    }
}

/// Runs a [`StatusProbe`] over a list of repositories.
pub struct StatusAggregator<R: CommandRunner + 'static = ProcessRunner> {
    probe: Arc<StatusProbe<R>>,
    limit: Option<Arc<Semaphore>>,
}

impl<R: CommandRunner + 'static> StatusAggregator<R> {
    pub fn new(probe: StatusProbe<R>) -> Self {
        Self {
            probe: Arc::new(probe),
            limit: None,
        }
    }

    /// Bound the number of probes in flight. `None` runs all at once.
    pub fn with_max_concurrency(mut self, max: Option<usize>) -> Self {
        self.limit = max.map(|n| Arc::new(Semaphore::new(n.max(1))));
        self
    }

    /// Probe every entry and return results in entry order.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run_all(&self, entries: &[RepositoryEntry], detailed: bool) -> StatusReport {
        let started = Instant::now();
        tracing::debug!(count = entries.len(), detailed, "dispatching probes");

        let handles: Vec<JoinHandle<StatusResult>> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| self.spawn_probe(index, entry.path().to_string(), detailed))
            .collect();

        let mut results = Vec::with_capacity(entries.len());
        for (handle, entry) in handles.into_iter().zip(entries) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!(path = entry.path(), error = %e, "probe task failed");
                    StatusResult::error(
                        entry.path(),
                        classify(entry.as_path()),
                        format!("probe task failed: {}", e),
                    )
                }
            };
            results.push(result);
        }

        let report = StatusReport {
            results,
            elapsed: started.elapsed(),
        };
        tracing::debug!(elapsed = ?report.elapsed, "{}", report.summary());
        report
    }

    fn spawn_probe(&self, index: usize, path: String, detailed: bool) -> JoinHandle<StatusResult> {
        let probe = Arc::clone(&self.probe);
        let limit = self.limit.clone();

        tokio::spawn(async move {
            // The semaphore is never closed, so acquisition only fails if
            // that changes; run unbounded rather than drop the probe.
            let _permit = match limit {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };

            let started = Instant::now();
            let result = probe.probe(&path, detailed).await;
            tracing::debug!(
                index,
                path = %path,
                state = %result.state,
                elapsed = ?started.elapsed(),
                "probe finished"
            );
            result
        })
    }
}
