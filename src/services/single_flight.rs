// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Single-flight coordination for idempotent async operations.
//!
//! The first caller starts the operation and publishes a shared handle;
//! callers arriving while it is pending await that same handle instead of
//! starting their own. Once it resolves the slot is emptied, so the next
//! call starts a fresh operation.

use crate::error::Result;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

type SharedResult<T> = Shared<BoxFuture<'static, Result<T>>>;

/// A pending operation, tagged so a finished caller only clears its own.
struct Flight<T: Clone> {
    id: u64,
    future: SharedResult<T>,
}

/// Coordinator allowing at most one in-flight operation at a time.
pub struct SingleFlight<T: Clone> {
    slot: Mutex<Option<Flight<T>>>,
    next_id: AtomicU64,
}

impl<T: Clone> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `start()` unless an operation is already pending, in which case
    /// join it. Every joined caller receives the same result.
    ///
    /// `start` is only invoked by the caller that actually begins a flight.
    pub async fn run<F, Fut>(&self, start: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let (id, future) = {
            let mut slot = self.lock();
            match slot.as_ref() {
                Some(flight) => {
                    tracing::debug!(flight = flight.id, "Joining in-flight operation");
                    (flight.id, flight.future.clone())
                }
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let future = start().boxed().shared();
                    *slot = Some(Flight {
                        id,
                        future: future.clone(),
                    });
                    (id, future)
                }
            }
        };

        let result = future.await;

        let mut slot = self.lock();
        if slot.as_ref().is_some_and(|flight| flight.id == id) {
            *slot = None;
        }

        result
    }

    /// Detach any pending operation. Callers already waiting on it still
    /// get its result; new callers start a fresh one.
    pub fn reset(&self) {
        self.lock().take();
    }

    /// Whether an operation is currently pending.
    pub fn in_flight(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Flight<T>>> {
        // The guarded section never panics mid-update, so a poisoned lock
        // still holds a consistent value.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    async fn slow_value(calls: Arc<AtomicUsize>, value: &'static str) -> Result<String> {
        calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(value.to_string())
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_operation() {
        let flight = Arc::new(SingleFlight::<String>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = vec![];
        for _ in 0..5 {
            let flight = flight.clone();
            let calls = calls.clone();
            handles.push(tokio::spawn(async move {
                flight.run(|| slow_value(calls, "token-1")).await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "token-1");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!flight.in_flight());
    }

    #[tokio::test]
    async fn test_sequential_calls_start_new_operations() {
        let flight = SingleFlight::<String>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        flight.run(|| slow_value(calls.clone(), "a")).await.unwrap();
        let second = flight.run(|| slow_value(calls.clone(), "b")).await.unwrap();

        assert_eq!(second, "b");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_errors_are_shared_and_not_cached() {
        let flight = Arc::new(SingleFlight::<String>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = |calls: Arc<AtomicUsize>| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Err::<String, _>(ApiError::AuthRequired("rejected".to_string()))
        };

        let (a, b) = tokio::join!(
            flight.run(|| failing(calls.clone())),
            flight.run(|| failing(calls.clone()))
        );
        assert!(a.unwrap_err().is_auth_required());
        assert!(b.unwrap_err().is_auth_required());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let retry = flight.run(|| slow_value(calls.clone(), "ok")).await;
        assert_eq!(retry.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reset_detaches_pending_operation() {
        let flight = Arc::new(SingleFlight::<String>::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let first = {
            let flight = flight.clone();
            let calls = calls.clone();
            tokio::spawn(async move { flight.run(|| slow_value(calls, "old")).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(flight.in_flight());

        flight.reset();
        let second = flight.run(|| slow_value(calls.clone(), "new")).await.unwrap();

        assert_eq!(first.await.unwrap().unwrap(), "old");
        assert_eq!(second, "new");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
