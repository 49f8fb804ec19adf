//! File-backed tree store.
//!
//! Persists the whole tree as one pretty-printed JSON document, loaded
//! at open and rewritten on every set. Subscriptions only observe writes
//! made through this process; cross-process change notification is a
//! remote-store concern, not a file concern.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{paths_related, tree_get, tree_set, BoxFuture, TreeStore};
use crate::error::{LtError, Result};

struct Watcher {
    path: String,
    tx: mpsc::UnboundedSender<Value>,
}

/// A [`TreeStore`] backed by a JSON document on disk.
pub struct FileStore {
    file_path: PathBuf,
    root: RwLock<Value>,
    watchers: Mutex<Vec<Watcher>>,
}

/// Default store document location under the platform data directory.
#[must_use]
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ltc")
        .join("store.json")
}

impl FileStore {
    /// Open (or create) the store document at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        let root = if file_path.exists() {
            let content = std::fs::read_to_string(&file_path).map_err(|e| {
                LtError::StoreReadFailed {
                    path: file_path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            serde_json::from_str(&content).map_err(|e| {
                LtError::ConfigParse(format!(
                    "Store document {} is not valid JSON: {e}",
                    file_path.display()
                ))
            })?
        } else {
            debug!(path = %file_path.display(), "Store document absent, starting empty");
            Value::Object(serde_json::Map::new())
        };

        info!(path = %file_path.display(), "Opened file store");
        Ok(Self {
            file_path,
            root: RwLock::new(root),
            watchers: Mutex::new(Vec::new()),
        })
    }

    fn flush(&self, root: &Value) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(root)
            .map_err(|e| LtError::Other(format!("Serializing store document: {e}")))?;
        // Write-then-rename so a crash never leaves a torn document
        let tmp = self.file_path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.file_path)?;
        Ok(())
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
                let _ = watcher.tx.send(snapshot);
            }
        }
    }
}

impl TreeStore for FileStore {
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
                self.flush(&root).map_err(|e| LtError::StoreWriteFailed {
                    path: path.to_string(),
                    reason: e.to_string(),
                })?;
            }
            debug!(path, "File store write");
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
