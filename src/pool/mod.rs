// tugboat: multi-repository management for Gitea and GitHub
//
// SPDX-FileCopyrightText: 2026 Tugboat Developers
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded fan-out/fan-in task runner.
//!
//! ```text
//!  items --send--> [flume jobs] --recv_async--> worker 1..W (JoinSet)
//!                                                   |
//!                                                 f(item)
//!                                                   |
//!  Vec<R> <--drain-- [flume results] <--send--------+
//! ```
//!
//! Results come back in completion order. A job that needs to report a
//! failure encodes it in `R`; a job that panics takes the whole run down.


use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::trace;

/// Number of workers used when none is configured.
#[must_use]
pub fn default_workers() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Worker count for `items` jobs: `0` means [`default_workers`], and there
/// are never more workers than jobs.
#[must_use]
pub fn effective_workers(workers: usize, items: usize) -> usize {
    let workers = if workers == 0 {
        default_workers()
    } else {
        workers
    };
    workers.min(items)
}

/// Runs `f` once for every item with at most `workers` jobs in flight.
///
/// Returns exactly one result per item, in no particular order. No workers
/// are spawned for an empty input.
///
/// # Panics
///
/// Resumes the panic of any job that panicked.
pub async fn run<T, R, F, Fut>(items: Vec<T>, workers: usize, f: F) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
{
    let total = items.len();
    if total == 0 {
        return Vec::new();
    }
    let workers = effective_workers(workers, total);
    trace!(jobs = total, workers, "starting worker pool");

    let (job_tx, job_rx) = flume::bounded::<T>(total);
    let (result_tx, result_rx) = flume::bounded::<R>(total);
    for item in items {
        // Capacity equals the item count and the receiver is alive.
        if job_tx.send(item).is_err() {
            break;
        }
    }
    drop(job_tx);

    let f = Arc::new(f);
    let mut set = JoinSet::new();
    for _ in 0..workers {
        let job_rx = job_rx.clone();
        let result_tx = result_tx.clone();
        let f = Arc::clone(&f);
        set.spawn(async move {
            while let Ok(item) = job_rx.recv_async().await {
                let result = f(item).await;
                if result_tx.send_async(result).await.is_err() {
                    break;
                }
            }
        });
    }
    drop(result_tx);

    while let Some(joined) = set.join_next().await {
        if let Err(e) = joined
            && e.is_panic()
        {
            std::panic::resume_unwind(e.into_panic());
        }
    }

    result_rx.drain().collect()
}
