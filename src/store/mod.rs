//! Remote tree-store abstraction.
//!
//! The engine talks to any key-value/document store with get/set/subscribe
//! semantics through the [`TreeStore`] trait. Paths are `/`-separated and
//! address subtrees of one JSON document, so a leaf write updates just
//! that node and notifies both ancestor and descendant subscribers.
//!
//! Two implementations ship: [`MemoryStore`] (in-memory, the test double
//! and default) and [`FileStore`] (a JSON document on disk).

mod file;
mod memory;

pub use file::{default_store_path, FileStore};
pub use memory::MemoryStore;

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::Result;

/// Boxed future type used by the dyn-compatible store trait.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Get/set/subscribe over a JSON tree.
///
/// Subscriptions fire whenever the subtree at the subscribed path
/// changes, including for writes made by this same process.
pub trait TreeStore: Send + Sync {
    /// Read the subtree at `path`. `None` when nothing is stored there.
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<Option<Value>>>;

    /// Replace the subtree at `path`, creating intermediate nodes.
    fn set<'a>(&'a self, path: &'a str, record: Value) -> BoxFuture<'a, Result<()>>;

    /// Stream of the subtree at `path`, one item per change.
    fn subscribe(&self, path: &str) -> mpsc::UnboundedReceiver<Value>;
}

/// Type alias for a shared boxed store.
pub type SharedStore = std::sync::Arc<dyn TreeStore>;

/// Store paths used for profiles.
pub mod paths {
    /// Root of all profiles.
    pub const PROFILES: &str = "profiles";

    /// Legacy flat record for `name`.
    #[must_use]
    pub fn basic(name: &str) -> String {
        format!("{PROFILES}/{name}/basic")
    }

    /// Advanced (current-schema) record for `name`.
    #[must_use]
    pub fn advanced(name: &str) -> String {
        format!("{PROFILES}/{name}/advanced")
    }

    /// A leaf inside the advanced config record, e.g.
    /// `field("Noticias", "config/main_text/visible")`.
    #[must_use]
    pub fn field(name: &str, relative: &str) -> String {
        format!("{PROFILES}/{name}/advanced/{relative}")
    }
}

/// Split a path into non-empty segments.
pub(crate) fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// True when one path is an ancestor of the other (or they are equal).
pub(crate) fn paths_related(a: &str, b: &str) -> bool {
    let a = segments(a);
    let b = segments(b);
    let common = a.len().min(b.len());
    a[..common] == b[..common]
}

/// Read the subtree at `path` within `root`.
pub(crate) fn tree_get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    for segment in segments(path) {
        node = node.get(segment)?;
    }
    Some(node)
}

/// Replace the subtree at `path` within `root`, creating intermediate
/// objects. Non-object intermediates are overwritten.
pub(crate) fn tree_set(root: &mut Value, path: &str, record: Value) {
    let parts = segments(path);
    if parts.is_empty() {
        *root = record;
        return;
    }

    let mut node = root;
    for segment in &parts[..parts.len() - 1] {
        if !node.is_object() {
            *node = Value::Object(serde_json::Map::new());
        }
        node = node
            .as_object_mut()
            .expect("just ensured object")
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
    }
    if !node.is_object() {
        *node = Value::Object(serde_json::Map::new());
    }
    node.as_object_mut()
        .expect("just ensured object")
        .insert(parts[parts.len() - 1].to_string(), record);
}
