//! Cache-keyed async data slot.
//!
//! One [`AsyncData`] per cache key. Concurrent fetches through the same slot
//! share one in-flight future; the outcome lands in a [`DataState`] that
//! observers follow through a `watch` channel.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::watch;

use crate::error::ClientError;

type InFlight<T> = Shared<BoxFuture<'static, Result<T, ClientError>>>;

/// Snapshot of a slot: last good value, last failure, whether a fetch runs
#[derive(Debug, Clone)]
pub struct DataState<T> {
    pub data: Option<T>,
    pub pending: bool,
    pub error: Option<ClientError>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for DataState<T> {
    fn default() -> Self {
        Self {
            data: None,
            pending: false,
            error: None,
            fetched_at: None,
        }
    }
}

pub struct AsyncData<T: Clone + Send + Sync + 'static> {
    key: String,
    state: watch::Sender<DataState<T>>,
    in_flight: Mutex<Option<InFlight<T>>>,
}

impl<T: Clone + Send + Sync + 'static> AsyncData<T> {
    pub fn new(key: impl Into<String>) -> Self {
        let (state, _) = watch::channel(DataState::default());
        Self {
            key: key.into(),
            state,
            in_flight: Mutex::new(None),
        }
    }

    /// Slot that starts out with a value computed elsewhere
    pub fn hydrated(key: impl Into<String>, value: T) -> Self {
        let slot = Self::new(key);
        slot.set(value);
        slot
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> Option<T> {
        self.state.borrow().data.clone()
    }

    pub fn state(&self) -> DataState<T> {
        self.state.borrow().clone()
    }

    pub fn pending(&self) -> bool {
        self.state.borrow().pending
    }

    pub fn error(&self) -> Option<ClientError> {
        self.state.borrow().error.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DataState<T>> {
        self.state.subscribe()
    }

    /// Replace the value without fetching
    pub fn set(&self, value: T) {
        self.state.send_modify(|state| {
            state.data = Some(value);
            state.error = None;
            state.fetched_at = Some(Utc::now());
        });
    }

    /// Cached value if there is one, otherwise fetch it.
    pub async fn load<F, Fut>(&self, fetch: F) -> Result<T, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        if let Some(value) = self.get() {
            return Ok(value);
        }
        self.run(fetch, true).await
    }

    /// Fetch again. A failure is recorded in the error slot and the previous
    /// value, if any, is kept and returned.
    pub async fn refresh<F, Fut>(&self, fetch: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let result = self.run(fetch, true).await;
        self.settle(result)
    }

    /// Like [`refresh`](Self::refresh), but never joins a fetch already in
    /// flight: that fetch's outcome is no longer recorded. For when the
    /// inputs the running fetch was built from have changed.
    pub async fn restart<F, Fut>(&self, fetch: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let result = self.run(fetch, false).await;
        self.settle(result)
    }

    fn settle(&self, result: Result<T, ClientError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "refresh failed, keeping previous value");
                self.get()
            }
        }
    }

    async fn run<F, Fut>(&self, fetch: F, join: bool) -> Result<T, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let shared = {
            let mut slot = self.lock();
            match slot.as_ref().filter(|_| join) {
                Some(running) => {
                    tracing::trace!(key = %self.key, "joining in-flight fetch");
                    running.clone()
                }
                None => {
                    if slot.is_some() {
                        tracing::debug!(key = %self.key, "superseding in-flight fetch");
                    }
                    let started = fetch().boxed().shared();
                    *slot = Some(started.clone());
                    self.state.send_modify(|state| state.pending = true);
                    started
                }
            }
        };

        let result = shared.clone().await;

        // first waiter to finish records the outcome for everyone; a
        // superseded fetch no longer owns the slot and records nothing
        let mut slot = self.lock();
        if slot.as_ref().is_some_and(|running| running.ptr_eq(&shared)) {
            *slot = None;
            self.record(&result);
        }
        result
    }

    fn record(&self, result: &Result<T, ClientError>) {
        self.state.send_modify(|state| {
            state.pending = false;
            match result {
                Ok(value) => {
                    state.data = Some(value.clone());
                    state.error = None;
                    state.fetched_at = Some(Utc::now());
                }
                Err(err) => state.error = Some(err.clone()),
            }
        });
    }

    fn lock(&self) -> MutexGuard<'_, Option<InFlight<T>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting(
        calls: &Arc<AtomicUsize>,
        result: Result<u32, ClientError>,
    ) -> impl FnOnce() -> BoxFuture<'static, Result<u32, ClientError>> {
        let calls = calls.clone();
        move || {
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                result
            }
            .boxed()
        }
    }

    fn failure() -> ClientError {
        ClientError::Http {
            status: 503,
            message: "down".into(),
        }
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let slot = AsyncData::new("answer");
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            slot.load(counting(&calls, Ok(42))),
            slot.load(counting(&calls, Ok(7))),
        );

        assert_eq!(a.unwrap(), 42);
        assert_eq!(b.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!slot.pending());
        assert!(slot.state().fetched_at.is_some());
    }

    #[tokio::test]
    async fn cached_value_skips_fetch() {
        let slot = AsyncData::hydrated("answer", 1);
        let calls = Arc::new(AtomicUsize::new(0));
        assert_eq!(slot.load(counting(&calls, Ok(2))).await.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn first_load_failure_is_returned() {
        let slot: AsyncData<u32> = AsyncData::new("answer");
        let calls = Arc::new(AtomicUsize::new(0));
        let err = slot.load(counting(&calls, Err(failure()))).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
        assert!(slot.error().is_some());
        assert!(slot.get().is_none());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_value() {
        let slot = AsyncData::hydrated("answer", 5);
        let calls = Arc::new(AtomicUsize::new(0));

        let kept = slot.refresh(counting(&calls, Err(failure()))).await;
        assert_eq!(kept, Some(5));
        assert!(slot.error().is_some());

        let fresh = slot.refresh(counting(&calls, Ok(6))).await;
        assert_eq!(fresh, Some(6));
        assert!(slot.error().is_none());
    }

    #[tokio::test]
    async fn restart_supersedes_in_flight_fetch() {
        let slot = Arc::new(AsyncData::new("answer"));
        let (release, gate) = tokio::sync::oneshot::channel::<()>();

        let stale = tokio::spawn({
            let slot = slot.clone();
            async move {
                slot.refresh(move || {
                    async move {
                        let _ = gate.await;
                        Ok(1)
                    }
                    .boxed()
                })
                .await
            }
        });
        tokio::task::yield_now().await;
        while !slot.pending() {
            tokio::task::yield_now().await;
        }

        let calls = Arc::new(AtomicUsize::new(0));
        let fresh = slot.restart(counting(&calls, Ok(2))).await;
        assert_eq!(fresh, Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        release.send(()).unwrap();
        assert_eq!(stale.await.unwrap(), Some(1));
        assert_eq!(slot.get(), Some(2));
        assert!(!slot.pending());
    }

    #[tokio::test]
    async fn refresh_joins_in_flight_fetch() {
        let slot = AsyncData::new("answer");
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            slot.refresh(counting(&calls, Ok(3))),
            slot.refresh(counting(&calls, Ok(4))),
        );
        assert_eq!((a, b), (Some(3), Some(3)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn observers_see_updates() {
        let slot = AsyncData::new("answer");
        let mut rx = slot.subscribe();
        let calls = Arc::new(AtomicUsize::new(0));

        slot.load(counting(&calls, Ok(9))).await.unwrap();
        let state = rx.wait_for(|state| state.data.is_some()).await.unwrap();
        assert_eq!(state.data, Some(9));
    }
}
