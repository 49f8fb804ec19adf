//! In-memory tree store.
//!
//! The default backend for tests and single-process use. Mirrors the
//! semantics a real remote document store would provide, including
//! notification of the writing process's own subscriptions.

use std::sync::{Mutex, RwLock};

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::trace;

use super::{paths_related, tree_get, tree_set, BoxFuture, TreeStore};
use crate::error::Result;

struct Watcher {
    path: String,
    tx: mpsc::UnboundedSender<Value>,
}

/// An in-memory [`TreeStore`].
#[derive(Default)]
pub struct MemoryStore {
    root: RwLock<Value>,
    watchers: Mutex<Vec<Watcher>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Value::Object(serde_json::Map::new())),
            watchers: Mutex::new(Vec::new()),
        }
    }

    fn notify(&self, changed_path: &str) {
        let root = self.root.read().expect("store lock poisoned");
        let mut watchers = self.watchers.lock().expect("watcher lock poisoned");
        watchers.retain(|watcher| !watcher.tx.is_closed());
        for watcher in watchers.iter() {
            if paths_related(&watcher.path, changed_path) {
                let snapshot = tree_get(&root, &watcher.path)
                    .cloned()
                    .unwrap_or(Value::Null);
                // Receiver may race with close; a failed send is fine.
                let _ = watcher.tx.send(snapshot);
            }
        }
    }
}

impl TreeStore for MemoryStore {
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Option<Value>>> {
        Box::pin(async move {
            let root = self.root.read().expect("store lock poisoned");
            Ok(tree_get(&root, path).cloned())
        })
    }

    fn set<'a>(&'a self, path: &'a str, record: Value) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            {
                let mut root = self.root.write().expect("store lock poisoned");
                tree_set(&mut root, path, record);
            }
            trace!(path, "Memory store write");
            self.notify(path);
            Ok(())
        })
    }

    fn subscribe(&self, path: &str) -> mpsc::UnboundedReceiver<Value> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.watchers
            .lock()
            .expect("watcher lock poisoned")
            .push(Watcher {
                path: path.to_string(),
                tx,
            });
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_set_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a/b").await.unwrap(), None);
        store.set("a/b", json!({"x": 1})).await.unwrap();
        assert_eq!(store.get("a/b").await.unwrap(), Some(json!({"x": 1})));
        assert_eq!(store.get("a").await.unwrap(), Some(json!({"b": {"x": 1}})));
    }

    #[tokio::test]
    async fn test_subscribe_fires_on_own_write() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe("a");
        store.set("a", json!(1)).await.unwrap();
        assert_eq!(rx.recv().await, Some(json!(1)));
    }

    #[tokio::test]
    async fn test_subscribe_fires_on_descendant_write() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe("profiles/X");
        store.set("profiles/X/advanced/visible", json!(true)).await.unwrap();
        let update = rx.recv().await.unwrap();
        assert_eq!(update["advanced"]["visible"], json!(true));
    }

    #[tokio::test]
    async fn test_subscribe_fires_on_ancestor_write() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe("a/b/c");
        store.set("a", json!({"b": {"c": 7}})).await.unwrap();
        assert_eq!(rx.recv().await, Some(json!(7)));
    }

    #[tokio::test]
    async fn test_unrelated_write_does_not_fire() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe("a");
        store.set("b", json!(1)).await.unwrap();
        store.set("a", json!(2)).await.unwrap();
        // First delivery is for "a", not "b"
        assert_eq!(rx.recv().await, Some(json!(2)));
    }

    #[tokio::test]
    async fn test_dropped_subscriber_is_pruned() {
        let store = MemoryStore::new();
        let rx = store.subscribe("a");
        drop(rx);
        store.set("a", json!(1)).await.unwrap();
        assert!(store.watchers.lock().unwrap().is_empty());
    }
}
