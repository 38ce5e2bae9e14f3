//! Interval polling of server-side lists.
//!
//! Admin and repartidor views show queues that change on the server
//! (pending registrations, assigned orders). A [`Poller`] re-fetches such a
//! list on a fixed interval and whenever the view asks for a refresh, and
//! replaces the published [`Snapshot`] wholesale with each response.
//!
//! Dropping the [`PollHandle`] stops the task. A fetch that is in flight at
//! that moment is abandoned and its result is never published.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reparto_data::FetchError;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A list the poller can fetch.
#[async_trait]
pub trait PollSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;

    /// Short label for logs.
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<Vec<Self::Item>, FetchError>;
}

/// The latest state of a polled list.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    /// Items from the last successful fetch.
    pub items: Vec<T>,
    /// Number of successful fetches so far. Zero until the first one lands.
    pub generation: u64,
    pub fetched_at: Option<DateTime<Utc>>,
    /// Error from the most recent fetch, cleared by the next success.
    pub last_error: Option<String>,
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            generation: 0,
            fetched_at: None,
            last_error: None,
        }
    }
}

impl<T> Snapshot<T> {
    /// Whether the first fetch has completed, successfully or not.
    pub fn is_loaded(&self) -> bool {
        self.generation > 0 || self.last_error.is_some()
    }
}

/// Shortest gap between scheduled fetches. `tokio::time::interval`
/// panics on a zero period.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Starts polling tasks.
pub struct Poller;

impl Poller {
    /// Spawn a task that fetches `source` now, every `interval`, and on
    /// every [`PollHandle::refresh`].
    ///
    /// Intervals shorter than [`MIN_INTERVAL`] are raised to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<S: PollSource>(source: S, interval: Duration) -> PollHandle<S::Item> {
        if interval < MIN_INTERVAL {
            tracing::warn!(
                source = source.name(),
                ?interval,
                "poll interval below minimum, using {:?}",
                MIN_INTERVAL
            );
        }
        let interval = interval.max(MIN_INTERVAL);
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::default());
        // One slot: refresh requests made while a fetch is pending coalesce.
        let (refresh_tx, refresh_rx) = mpsc::channel(1);

        let task = tokio::spawn(run(source, interval, snapshot_tx, refresh_rx));

        PollHandle {
            task,
            refresh_tx,
            snapshot_rx,
        }
    }
}

async fn run<S: PollSource>(
    source: S,
    interval: Duration,
    snapshot_tx: watch::Sender<Snapshot<S::Item>>,
    mut refresh_rx: mpsc::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::debug!(source = source.name(), ?interval, "poller started");

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            request = refresh_rx.recv() => {
                if request.is_none() {
                    break;
                }
                ticker.reset();
            }
        }

        match source.fetch().await {
            Ok(items) => {
                tracing::debug!(source = source.name(), count = items.len(), "poll succeeded");
                snapshot_tx.send_modify(|snap| {
                    snap.items = items;
                    snap.generation += 1;
                    snap.fetched_at = Some(Utc::now());
                    snap.last_error = None;
                });
            }
            Err(e) => {
                if e.is_transient() {
                    tracing::warn!(source = source.name(), error = %e, "poll failed, will retry");
                } else {
                    tracing::error!(source = source.name(), error = %e, "poll failed");
                }
                snapshot_tx.send_modify(|snap| snap.last_error = Some(e.to_string()));
            }
        }
    }

    tracing::debug!(source = source.name(), "poller stopped");
}

/// Owner of a running poll task.
pub struct PollHandle<T> {
    task: JoinHandle<()>,
    refresh_tx: mpsc::Sender<()>,
    snapshot_rx: watch::Receiver<Snapshot<T>>,
}

impl<T: Clone> PollHandle<T> {
    /// Ask for an immediate fetch, e.g. when the view regains focus.
    pub fn refresh(&self) {
        // A full slot means a refresh is already queued.
        let _ = self.refresh_tx.try_send(());
    }

    /// Copy of the latest snapshot.
    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver for rendering loops that want every update.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<T>> {
        self.snapshot_rx.clone()
    }

    /// Wait until a snapshot newer than the last one seen through this
    /// handle is published.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.snapshot_rx.changed().await.ok()?;
        Some(self.snapshot_rx.borrow_and_update().clone())
    }

    /// Stop polling and wait for the task to finish.
    pub async fn stop(mut self) {
        self.task.abort();
        let _ = (&mut self.task).await;
    }
}

impl<T> Drop for PollHandle<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        fail_after: Option<usize>,
    }

    #[async_trait]
    impl PollSource for CountingSource {
        type Item = usize;

        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch(&self) -> Result<Vec<usize>, FetchError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            match self.fail_after {
                Some(limit) if n > limit => Err(FetchError::Timeout),
                _ => Ok(vec![n]),
            }
        }
    }

    fn source(fail_after: Option<usize>) -> (CountingSource, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            CountingSource {
                calls: calls.clone(),
                fail_after,
            },
            calls,
        )
    }

    async fn next<T: Clone>(handle: &mut PollHandle<T>) -> Snapshot<T> {
        tokio::time::timeout(Duration::from_secs(2), handle.changed())
            .await
            .expect("poller published nothing")
            .expect("poller task ended")
    }

    #[tokio::test]
    async fn test_first_fetch_is_immediate() {
        let (src, _) = source(None);
        let mut handle = Poller::spawn(src, Duration::from_secs(3600));

        let snap = next(&mut handle).await;
        assert_eq!(snap.generation, 1);
        assert_eq!(snap.items, vec![1]);
        assert!(snap.fetched_at.is_some());
    }

    #[tokio::test]
    async fn test_refresh_triggers_fetch_and_replaces_items() {
        let (src, calls) = source(None);
        let mut handle = Poller::spawn(src, Duration::from_secs(3600));
        next(&mut handle).await;

        handle.refresh();
        let snap = next(&mut handle).await;
        assert_eq!(snap.generation, 2);
        assert_eq!(snap.items, vec![2]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_interval_keeps_polling() {
        let (src, _) = source(None);
        let mut handle = Poller::spawn(src, Duration::from_millis(10));
        let mut last = 0;
        while last < 3 {
            let generation = next(&mut handle).await.generation;
            assert!(generation > last);
            last = generation;
        }
    }

    #[tokio::test]
    async fn test_zero_interval_still_polls() {
        let (src, _) = source(None);
        let mut handle = Poller::spawn(src, Duration::ZERO);

        assert_eq!(next(&mut handle).await.generation, 1);
        assert!(next(&mut handle).await.generation >= 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_items() {
        let (src, _) = source(Some(1));
        let mut handle = Poller::spawn(src, Duration::from_secs(3600));
        next(&mut handle).await;

        handle.refresh();
        let snap = next(&mut handle).await;
        assert_eq!(snap.items, vec![1]);
        assert_eq!(snap.generation, 1);
        assert!(snap.last_error.is_some());
        assert!(snap.is_loaded());
    }

    #[tokio::test]
    async fn test_stop_ends_polling() {
        let (src, calls) = source(None);
        let mut handle = Poller::spawn(src, Duration::from_millis(5));
        next(&mut handle).await;

        handle.stop().await;
        let after_stop = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn test_drop_ends_polling() {
        let (src, calls) = source(None);
        let mut handle = Poller::spawn(src, Duration::from_millis(5));
        let rx = handle.subscribe();
        next(&mut handle).await;

        drop(handle);
        tokio::time::sleep(Duration::from_millis(20)).await;
        let settled = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(calls.load(Ordering::SeqCst), settled);
        assert!(rx.has_changed().is_err());
    }
}
