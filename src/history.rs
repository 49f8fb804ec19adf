//! Bounded undo/redo history over configuration snapshots.
//!
//! Linear-undo policy: recording after an undo discards the forward
//! branch. Only locally authored edits (and explicitly restored backups)
//! are recorded; externally-pushed remote updates bypass history.

use tracing::trace;

/// Maximum number of retained snapshots.
pub const HISTORY_CAP: usize = 50;

/// A bounded snapshot stack with a cursor.
#[derive(Debug, Clone)]
pub struct History<T> {
    snapshots: Vec<T>,
    /// Index of the current snapshot; meaningless while empty.
    cursor: usize,
}

impl<T: Clone> History<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: 0,
        }
    }

    /// Record a new snapshot.
    ///
    /// If undo has occurred since the last record, the redo branch is
    /// pruned first. When the stack exceeds [`HISTORY_CAP`], the oldest
    /// snapshot is evicted.
    pub fn record(&mut self, snapshot: T) {
        if !self.snapshots.is_empty() && self.cursor + 1 < self.snapshots.len() {
            trace!(
                pruned = self.snapshots.len() - self.cursor - 1,
                "Pruning redo branch"
            );
            self.snapshots.truncate(self.cursor + 1);
        }

        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;

        if self.snapshots.len() > HISTORY_CAP {
            self.snapshots.remove(0);
            self.cursor -= 1;
        }
    }

    /// Step back one snapshot. Fails at the oldest retained snapshot.
    pub fn undo(&mut self) -> Option<T> {
        if self.snapshots.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Step forward one snapshot. Fails at the newest snapshot.
    pub fn redo(&mut self) -> Option<T> {
        if self.snapshots.is_empty() || self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.snapshots[self.cursor].clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Whether an undo would currently succeed.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor > 0
    }

    /// Whether a redo would currently succeed.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.snapshots.is_empty() && self.cursor + 1 < self.snapshots.len()
    }
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}
