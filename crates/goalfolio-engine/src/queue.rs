//! Sequential fetch queue.
//!
//! Items are processed strictly one at a time in input order. A failing item
//! is recorded and the queue moves on. Between items the queue waits for a
//! configurable delay, but never after the last item.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Boxed future returned by a [`WaitFn`].
pub type WaitFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Delay implementation, injectable for tests.
pub type WaitFn = Arc<dyn Fn(Duration) -> WaitFuture + Send + Sync>;

/// Outcome status of a queue item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueItemStatus {
    /// The request succeeded.
    Fulfilled,
    /// The request failed.
    Rejected,
}

impl QueueItemStatus {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueItemStatus::Fulfilled => "fulfilled",
            QueueItemStatus::Rejected => "rejected",
        }
    }
}

/// Result of processing one queue item.
#[derive(Debug, Clone, PartialEq)]
pub enum QueueItemResult<I, T, E> {
    /// The request succeeded.
    Fulfilled {
        /// The input item.
        item: I,
        /// The produced value.
        value: T,
    },
    /// The request failed.
    Rejected {
        /// The input item.
        item: I,
        /// Why it failed.
        reason: E,
    },
}

impl<I, T, E> QueueItemResult<I, T, E> {
    fn from_result(item: I, result: Result<T, E>) -> Self {
        match result {
            Ok(value) => QueueItemResult::Fulfilled { item, value },
            Err(reason) => QueueItemResult::Rejected { item, reason },
        }
    }

    /// The input item.
    pub fn item(&self) -> &I {
        match self {
            QueueItemResult::Fulfilled { item, .. } | QueueItemResult::Rejected { item, .. } => {
                item
            }
        }
    }

    /// Fulfilled or rejected.
    pub fn status(&self) -> QueueItemStatus {
        match self {
            QueueItemResult::Fulfilled { .. } => QueueItemStatus::Fulfilled,
            QueueItemResult::Rejected { .. } => QueueItemStatus::Rejected,
        }
    }

    /// True if fulfilled.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, QueueItemResult::Fulfilled { .. })
    }

    /// Converts back into a `Result`, keeping the item.
    pub fn into_result(self) -> (I, Result<T, E>) {
        match self {
            QueueItemResult::Fulfilled { item, value } => (item, Ok(value)),
            QueueItemResult::Rejected { item, reason } => (item, Err(reason)),
        }
    }
}

/// Runs requests one after another with a pause in between.
#[derive(Clone)]
pub struct SequentialQueue {
    delay: Duration,
    wait: WaitFn,
}

fn tokio_sleep(delay: Duration) -> WaitFuture {
    Box::pin(tokio::time::sleep(delay))
}

impl SequentialQueue {
    /// Create a queue that sleeps on the tokio timer between items.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            wait: Arc::new(tokio_sleep),
        }
    }

    /// Replace the wait function.
    pub fn with_wait(mut self, wait: WaitFn) -> Self {
        self.wait = wait;
        self
    }

    /// The delay between items.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Processes `items` in order, one request at a time.
    ///
    /// Every item yields exactly one result, in input order. The delay is
    /// awaited between items only, and skipped entirely when zero.
    pub async fn run_sequential<I, T, E, F, Fut>(
        &self,
        items: Vec<I>,
        mut request: F,
    ) -> Vec<QueueItemResult<I, T, E>>
    where
        I: Clone,
        F: FnMut(I) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let total = items.len();
        let mut results = Vec::with_capacity(total);

        for (index, item) in items.into_iter().enumerate() {
            let outcome = request(item.clone()).await;
            results.push(QueueItemResult::from_result(item, outcome));

            if index + 1 < total && !self.delay.is_zero() {
                (self.wait)(self.delay).await;
            }
        }

        results
    }
}

impl Default for SequentialQueue {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_REQUEST_DELAY)
    }
}

impl std::fmt::Debug for SequentialQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequentialQueue")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn counting_wait(counter: Arc<AtomicUsize>) -> WaitFn {
        Arc::new(move |_delay| {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::pin(async {})
        })
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_queue() {
        let waits = Arc::new(AtomicUsize::new(0));
        let queue = SequentialQueue::new(Duration::from_millis(500)).with_wait(counting_wait(waits.clone()));

        let results = queue
            .run_sequential(vec![1, 2], |n| async move {
                if n == 2 {
                    Err("boom")
                } else {
                    Ok(n * 10)
                }
            })
            .await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0], QueueItemResult::Fulfilled { item: 1, value: 10 });
        assert_eq!(results[1].status(), QueueItemStatus::Rejected);
        assert_eq!(*results[1].item(), 2);
        assert_eq!(waits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_delay_never_waits() {
        let waits = Arc::new(AtomicUsize::new(0));
        let queue = SequentialQueue::new(Duration::ZERO).with_wait(counting_wait(waits.clone()));

        let results = queue
            .run_sequential(vec!["a", "b", "c"], |s| async move { Ok::<_, ()>(s.len()) })
            .await;

        assert!(results.iter().all(QueueItemResult::is_fulfilled));
        assert_eq!(waits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_and_single_item() {
        let waits = Arc::new(AtomicUsize::new(0));
        let queue = SequentialQueue::new(Duration::from_millis(10)).with_wait(counting_wait(waits.clone()));

        let empty = queue
            .run_sequential(Vec::<u8>::new(), |n| async move { Ok::<_, ()>(n) })
            .await;
        assert!(empty.is_empty());

        let single = queue.run_sequential(vec![7u8], |n| async move { Ok::<_, ()>(n) }).await;
        assert_eq!(single.len(), 1);
        assert_eq!(waits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_requests_run_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let queue = SequentialQueue::new(Duration::ZERO);

        let seen = log.clone();
        queue
            .run_sequential(vec![3, 1, 2], move |n| {
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push(n);
                    Ok::<_, ()>(())
                }
            })
            .await;

        assert_eq!(*log.lock().unwrap(), vec![3, 1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_wait_sleeps_between_items() {
        let queue = SequentialQueue::new(Duration::from_millis(500));
        let start = tokio::time::Instant::now();

        queue
            .run_sequential(vec![1, 2, 3], |n| async move { Ok::<_, ()>(n) })
            .await;

        assert!(start.elapsed() >= Duration::from_millis(1000));
    }
}
