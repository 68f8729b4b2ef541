//! Change notification for list snapshots.
//!
//! [`SnapshotFeed`] holds the latest snapshot in a `tokio::sync::watch`
//! channel. Subscribers wake on every publish and re-run the composition
//! pipeline against the new snapshot. [`FileSnapshotSource`] feeds it by
//! polling a snapshot file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use trolley_core::ShoppingList;

use crate::files::decode_snapshot;

/// Latest snapshot, or `None` before the first publish.
pub type SnapshotReceiver = watch::Receiver<Option<Arc<ShoppingList>>>;

/// Broadcasts the latest list snapshot to any number of subscribers.
#[derive(Debug)]
pub struct SnapshotFeed {
    tx: watch::Sender<Option<Arc<ShoppingList>>>,
}

impl Default for SnapshotFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotFeed {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Receiver that sees every snapshot published after this call.
    #[must_use]
    pub fn subscribe(&self) -> SnapshotReceiver {
        self.tx.subscribe()
    }

    /// Replace the current snapshot and wake subscribers.
    pub fn publish(&self, list: ShoppingList) -> Arc<ShoppingList> {
        let list = Arc::new(list);
        tracing::debug!(
            list_id = %list.id,
            entries = list.entries.len(),
            subscribers = self.tx.receiver_count(),
            "publishing snapshot"
        );
        self.tx.send_replace(Some(Arc::clone(&list)));
        list
    }

    /// The most recently published snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<ShoppingList>> {
        self.tx.borrow().clone()
    }
}

/// Polls a snapshot file and publishes it whenever its content changes.
#[derive(Debug)]
pub struct FileSnapshotSource {
    path: PathBuf,
    interval: Duration,
    last_seen: Option<String>,
}

impl FileSnapshotSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            path: path.into(),
            interval,
            last_seen: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check the file once, returning whether a new snapshot was published.
    ///
    /// Unreadable or unparseable content is logged and the previously
    /// published snapshot stays current.
    pub async fn poll_once(&mut self, feed: &SnapshotFeed) -> bool {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "snapshot unreadable");
                return false;
            }
        };
        if self.last_seen.as_deref() == Some(content.as_str()) {
            return false;
        }

        let decoded = decode_snapshot(&self.path, &content);
        self.last_seen = Some(content);
        match decoded {
            Ok(list) => {
                feed.publish(list);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "keeping previous snapshot");
                false
            }
        }
    }

    /// Poll until the task is aborted.
    pub async fn run(mut self, feed: Arc<SnapshotFeed>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(
            path = %self.path.display(),
            interval_ms = self.interval.as_millis(),
            "watching snapshot"
        );

        loop {
            ticker.tick().await;
            self.poll_once(&feed).await;
        }
    }
}
