use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Delay applied to search-as-you-type.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Trailing-edge debounce: of a burst of calls, only the last one runs.
///
/// This does not cancel work that already started; a slow fetch from an
/// earlier burst can still finish after a newer one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn search() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }

    /// Wait out the delay. True if no newer call arrived in the meantime.
    pub async fn settle(&self) -> bool {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Run `action` unless a later call superseded this one.
    pub async fn run<F, Fut, T>(&self, action: F) -> Option<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if self.settle().await {
            Some(action().await)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn only_last_call_in_burst_runs() {
        let debouncer = Debouncer::search();
        let first = async { debouncer.run(|| async { "r" }).await };
        let second = async {
            sleep(Duration::from_millis(100)).await;
            debouncer.run(|| async { "re" }).await
        };
        let third = async {
            sleep(Duration::from_millis(200)).await;
            debouncer.run(|| async { "red" }).await
        };

        let results = tokio::join!(first, second, third);
        assert_eq!(results, (None, None, Some("red")));
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_calls_all_run() {
        let debouncer = Debouncer::new(Duration::from_millis(50));
        assert_eq!(debouncer.run(|| async { 1 }).await, Some(1));
        assert_eq!(debouncer.run(|| async { 2 }).await, Some(2));
    }
}
