//! Debounced tracking of the first visible grid index.
//!
//! Range changes arrive in bursts while the user scrolls. Only the last one in
//! a quiet window is written; the pending write is aborted when the tracker is
//! cancelled or dropped so nothing lands after the view is gone.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

use super::store::ScrollStore;

pub const SCROLL_KEY_PREFIX: &str = "scroll-position-";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Storage key for a model's scroll position.
pub fn storage_key(model_id: &str) -> String {
    format!("{SCROLL_KEY_PREFIX}{model_id}")
}

/// Range of flat indices currently rendered by the virtualized grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Start,
}

/// Where to scroll when a model page is revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollTarget {
    pub index: usize,
    pub align: Align,
}

impl ScrollTarget {
    /// First flat index of the row containing `index`.
    pub fn row_start(&self, columns: usize) -> usize {
        if columns == 0 {
            return 0;
        }
        self.index - self.index % columns
    }
}

/// Persists scroll position for one model through an injected store.
pub struct ScrollTracker {
    key: String,
    store: Arc<dyn ScrollStore>,
    debounce: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl ScrollTracker {
    pub fn new(model_id: &str, store: Arc<dyn ScrollStore>) -> Self {
        Self {
            key: storage_key(model_id),
            store,
            debounce: DEFAULT_DEBOUNCE,
            pending: Mutex::new(None),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the saved position. Unreadable or garbage values restore nothing.
    pub async fn restore(&self) -> Option<ScrollTarget> {
        let raw = match self.store.get(&self.key).await {
            Ok(v) => v?,
            Err(e) => {
                tracing::warn!("failed to read scroll position '{}': {:#}", self.key, e);
                return None;
            }
        };
        match raw.trim().parse::<usize>() {
            Ok(index) => {
                tracing::debug!("restoring '{}' to index {}", self.key, index);
                Some(ScrollTarget {
                    index,
                    align: Align::Start,
                })
            }
            Err(_) => {
                tracing::warn!("ignoring invalid scroll position '{}' = {:?}", self.key, raw);
                None
            }
        }
    }

    /// Record a range change; the write happens after the debounce window.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn range_changed(&self, range: VisibleRange) {
        let store = Arc::clone(&self.store);
        let key = self.key.clone();
        let value = range.start_index.to_string();
        let debounce = self.debounce;

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(prev) = pending.take() {
            prev.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            match store.set(&key, &value).await {
                Ok(()) => tracing::debug!("saved scroll position '{}' = {}", key, value),
                Err(e) => tracing::warn!("failed to save scroll position '{}': {:#}", key, e),
            }
        }));
    }

    /// Drop any pending write.
    pub fn cancel(&self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = pending {
            handle.abort();
        }
    }

    /// Wait for a pending write to land.
    pub async fn settle(&self) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = pending
            && let Err(e) = handle.await
        {
            tracing::debug!("scroll write task ended early: {}", e);
        }
    }
}

impl Drop for ScrollTracker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scroll::MemoryStore;
    use async_trait::async_trait;

    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: Mutex<Vec<(String, String)>>,
    }

    impl CountingStore {
        fn writes(&self) -> Vec<(String, String)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ScrollStore for CountingStore {
        async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
            self.writes
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string()));
            self.inner.set(key, value).await
        }
    }

    fn range(start: usize) -> VisibleRange {
        VisibleRange {
            start_index: start,
            end_index: start + 30,
        }
    }

    #[test]
    fn keys_are_scoped_by_model() {
        assert_eq!(storage_key("foo"), "scroll-position-foo");
        assert_ne!(storage_key("foo"), storage_key("bar"));
    }

    #[test]
    fn row_start_aligns_to_row() {
        let t = ScrollTarget {
            index: 42,
            align: Align::Start,
        };
        assert_eq!(t.row_start(5), 40);
        assert_eq!(t.row_start(7), 42);
        assert_eq!(t.row_start(0), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_writes_once_with_last_value() {
        let store = Arc::new(CountingStore::default());
        let tracker = ScrollTracker::new("foo", store.clone());
        for i in 0..10 {
            tracker.range_changed(range(i * 3));
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
        assert!(store.writes().is_empty());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(
            store.writes(),
            vec![("scroll-position-foo".to_string(), "27".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn restores_per_model() {
        let store = Arc::new(MemoryStore::new());
        {
            let tracker = ScrollTracker::new("foo", store.clone());
            tracker.range_changed(range(42));
            tracker.settle().await;
        }
        let revisit = ScrollTracker::new("foo", store.clone());
        assert_eq!(
            revisit.restore().await,
            Some(ScrollTarget {
                index: 42,
                align: Align::Start
            })
        );
        let other = ScrollTracker::new("bar", store.clone());
        assert_eq!(other.restore().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_write() {
        let store = Arc::new(CountingStore::default());
        let tracker = ScrollTracker::new("foo", store.clone());
        tracker.range_changed(range(9));
        drop(tracker);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(store.writes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn separate_windows_each_write() {
        let store = Arc::new(CountingStore::default());
        let tracker =
            ScrollTracker::new("foo", store.clone()).with_debounce(Duration::from_millis(100));
        tracker.range_changed(range(1));
        tokio::time::sleep(Duration::from_millis(150)).await;
        tracker.range_changed(range(2));
        tokio::time::sleep(Duration::from_millis(150)).await;
        let values: Vec<String> = store.writes().into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn garbage_value_restores_nothing() {
        let store = Arc::new(MemoryStore::new());
        store.set(&storage_key("foo"), "not-a-number").await.unwrap();
        let tracker = ScrollTracker::new("foo", store);
        assert_eq!(tracker.restore().await, None);
    }
}
