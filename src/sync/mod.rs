//! Synchronization controller: owns the live configuration snapshot and
//! orchestrates local edits, remote pushes, debounced analysis, and
//! persistence.
//!
//! All mutation is by snapshot replacement over a watch channel, so
//! concurrent readers always see a complete, consistent tree and no
//! locks guard the configuration itself.

mod repo;

pub use repo::ProfileRepository;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, trace, warn};

use crate::engine::{recommend, validate, Recommendation, ValidationReport};
use crate::error::{LtError, Result};
use crate::history::History;
use crate::model::{LowerThirdConfig, Profile};
use crate::store::{paths, SharedStore};

/// Quiescence window for analysis recomputation, in milliseconds.
pub const DEBOUNCE_MS: u64 = 500;

/// Combined output of one analysis pass.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub validation: ValidationReport,
    pub recommendations: Vec<Recommendation>,
}

/// Outcome of one fire-and-forget persistence attempt.
#[derive(Debug, Clone)]
pub struct PersistOutcome {
    pub profile: String,
    pub result: std::result::Result<(), String>,
}

/// An element whose visibility can be toggled through a leaf write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Logo,
    MainText,
    SecondaryText,
    Theme,
    Advertisement,
}

impl Element {
    /// Path segment of this element inside the config record.
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::MainText => "main_text",
            Self::SecondaryText => "secondary_text",
            Self::Theme => "theme",
            Self::Advertisement => "advertisement",
        }
    }
}

/// One of the three text slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotId {
    Main,
    Secondary,
    Theme,
}

impl SlotId {
    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Main => "main_text",
            Self::Secondary => "secondary_text",
            Self::Theme => "theme",
        }
    }
}

/// The synchronization controller for one profile.
pub struct SyncController {
    store: SharedStore,
    repo: ProfileRepository,
    name: String,
    live_tx: watch::Sender<LowerThirdConfig>,
    analysis_tx: watch::Sender<Analysis>,
    history: Mutex<History<LowerThirdConfig>>,
    profile_meta: Mutex<Profile>,
    persist_tx: mpsc::UnboundedSender<PersistOutcome>,
    persist_rx: Mutex<Option<mpsc::UnboundedReceiver<PersistOutcome>>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl SyncController {
    /// Start a controller for `name`.
    ///
    /// Loads the profile from the store (legacy migration included); when
    /// the store has no record at all, falls back to the built-in default
    /// preset. Either way the current state is persisted once so the
    /// advanced record exists before any leaf write targets it.
    pub async fn start(store: SharedStore, name: &str) -> Result<Arc<Self>> {
        repo::check_name(name)?;
        let repo = ProfileRepository::new(Arc::clone(&store));

        let profile = match repo.load(name).await {
            Ok(profile) => profile,
            Err(LtError::ProfileNotFound { .. }) => {
                info!(name, "No stored profile, starting from the built-in preset");
                Profile::with_defaults(name)
            }
            Err(e) => return Err(e),
        };

        let config = profile.config.clone();
        let (live_tx, _) = watch::channel(config.clone());
        let (analysis_tx, _) = watch::channel(Analysis {
            validation: validate(&config),
            recommendations: recommend(&config),
        });
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();

        let mut history = History::new();
        history.record(config);

        let controller = Arc::new(Self {
            store,
            repo,
            name: name.to_string(),
            live_tx,
            analysis_tx,
            history: Mutex::new(history),
            profile_meta: Mutex::new(profile),
            persist_tx,
            persist_rx: Mutex::new(Some(persist_rx)),
            tasks: Mutex::new(Vec::new()),
        });

        // Make sure both records exist (this also upgrades a profile
        // loaded through the legacy fallback)
        controller.persist_now().await?;

        controller.spawn_debounce_task();
        controller.spawn_subscription_task();
        info!(name, "Synchronization controller started");
        Ok(controller)
    }

    /// Profile this controller synchronizes.
    #[must_use]
    pub fn profile_name(&self) -> &str {
        &self.name
    }

    /// Watch channel of the live configuration. New subscribers see the
    /// latest snapshot immediately.
    #[must_use]
    pub fn live(&self) -> watch::Receiver<LowerThirdConfig> {
        self.live_tx.subscribe()
    }

    /// A clone of the current live snapshot.
    #[must_use]
    pub fn current(&self) -> LowerThirdConfig {
        self.live_tx.borrow().clone()
    }

    /// Watch channel of debounced analysis results.
    #[must_use]
    pub fn analysis(&self) -> watch::Receiver<Analysis> {
        self.analysis_tx.subscribe()
    }

    /// A snapshot of the profile metadata wrapping the live config.
    #[must_use]
    pub fn profile(&self) -> Profile {
        let mut profile = self.profile_meta.lock().expect("meta lock poisoned").clone();
        profile.config = self.current();
        profile
    }

    /// Take the persistence-outcome receiver. Yields `None` after the
    /// first call.
    #[must_use]
    pub fn take_persist_events(&self) -> Option<mpsc::UnboundedReceiver<PersistOutcome>> {
        self.persist_rx.lock().expect("persist lock poisoned").take()
    }

    /// Apply a locally authored edit.
    ///
    /// The snapshot is normalized by the optimization clamp, recorded
    /// into history, published to live subscribers, and persisted in the
    /// background. The caller never blocks on persistence.
    pub fn apply_edit(self: &Arc<Self>, config: LowerThirdConfig) {
        let config = config.optimized();
        self.history
            .lock()
            .expect("history lock poisoned")
            .record(config.clone());
        self.live_tx.send_replace(config);
        trace!(name = %self.name, "Local edit applied");
        self.spawn_persist();
    }

    /// Record an explicitly restored backup as a local edit.
    pub fn restore_backup(self: &Arc<Self>, config: LowerThirdConfig) {
        info!(name = %self.name, "Restoring configuration backup");
        self.apply_edit(config);
    }

    /// Step back to the previous snapshot.
    pub fn undo(self: &Arc<Self>) -> Result<LowerThirdConfig> {
        let snapshot = self
            .history
            .lock()
            .expect("history lock poisoned")
            .undo()
            .ok_or(LtError::NothingToUndo)?;
        self.live_tx.send_replace(snapshot.clone());
        self.spawn_persist();
        Ok(snapshot)
    }

    /// Step forward to the next snapshot.
    pub fn redo(self: &Arc<Self>) -> Result<LowerThirdConfig> {
        let snapshot = self
            .history
            .lock()
            .expect("history lock poisoned")
            .redo()
            .ok_or(LtError::NothingToRedo)?;
        self.live_tx.send_replace(snapshot.clone());
        self.spawn_persist();
        Ok(snapshot)
    }

    /// Toggle one element's visibility through a low-latency leaf write,
    /// avoiding a rewrite of the whole record. Like any local edit the
    /// write happens in the background; its outcome arrives on the
    /// persistence channel.
    pub fn set_visibility(self: &Arc<Self>, element: Element, visible: bool) {
        let mut config = self.current();
        match element {
            Element::Logo => config.logo.visible = visible,
            Element::MainText => config.main_text.visible = visible,
            Element::SecondaryText => config.secondary_text.visible = visible,
            Element::Theme => config.theme.visible = visible,
            Element::Advertisement => config.advertisement.visible = visible,
        }
        self.history
            .lock()
            .expect("history lock poisoned")
            .record(config.clone());
        self.live_tx.send_replace(config);

        let path = paths::field(&self.name, &format!("config/{}/visible", element.segment()));
        self.spawn_leaf_write(path, json!(visible));
    }

    /// Replace one text slot's content through a leaf write.
    pub fn set_slot_text(self: &Arc<Self>, slot: SlotId, text: &str) {
        let mut config = self.current();
        match slot {
            SlotId::Main => config.main_text.content = text.to_string(),
            SlotId::Secondary => config.secondary_text.content = text.to_string(),
            SlotId::Theme => config.theme.content = text.to_string(),
        }
        self.history
            .lock()
            .expect("history lock poisoned")
            .record(config.clone());
        self.live_tx.send_replace(config);

        let path = paths::field(&self.name, &format!("config/{}/content", slot.segment()));
        self.spawn_leaf_write(path, json!(text));
    }

    /// Persist the current state synchronously (both records).
    pub async fn persist_now(&self) -> Result<()> {
        let profile = {
            let mut meta = self.profile_meta.lock().expect("meta lock poisoned");
            meta.config = self.live_tx.borrow().clone().optimized();
            meta.clone()
        };
        self.repo.save(&profile).await
    }

    /// Tear down the remote subscription and the debounce timer.
    /// In-flight persistence writes are not cancelled; their outcomes
    /// simply become moot.
    pub fn shutdown(&self) {
        for task in self.tasks.lock().expect("task lock poisoned").drain(..) {
            task.abort();
        }
        debug!(name = %self.name, "Synchronization controller shut down");
    }

    fn spawn_leaf_write(self: &Arc<Self>, path: String, value: serde_json::Value) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let result = this.store.set(&path, value).await;
            if let Err(e) = &result {
                warn!(name = %this.name, path, error = %e, "Leaf write failed");
            }
            let _ = this.persist_tx.send(PersistOutcome {
                profile: this.name.clone(),
                result: result.map_err(|e| e.to_string()),
            });
        });
    }

    fn spawn_persist(self: &Arc<Self>) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let result = this.persist_now().await;
            if let Err(e) = &result {
                warn!(name = %this.name, error = %e, "Background persistence failed");
            }
            let _ = this.persist_tx.send(PersistOutcome {
                profile: this.name.clone(),
                result: result.map_err(|e| e.to_string()),
            });
        });
    }

    /// Debounced analysis: a burst of changes produces one pass, always
    /// against the latest snapshot.
    fn spawn_debounce_task(self: &Arc<Self>) {
        let analysis_tx = self.analysis_tx.clone();
        let mut live_rx = self.live_tx.subscribe();

        let task = tokio::spawn(async move {
            loop {
                if live_rx.changed().await.is_err() {
                    return;
                }
                // Absorb further changes until the window stays quiet
                loop {
                    match timeout(Duration::from_millis(DEBOUNCE_MS), live_rx.changed()).await {
                        Ok(Ok(())) => {}
                        Ok(Err(_)) => return,
                        Err(_) => break,
                    }
                }
                let snapshot = live_rx.borrow_and_update().clone();
                trace!("Debounce window elapsed, analyzing");
                let _ = analysis_tx.send(Analysis {
                    validation: validate(&snapshot),
                    recommendations: recommend(&snapshot),
                });
            }
        });
        self.tasks.lock().expect("task lock poisoned").push(task);
    }

    /// Remote pushes replace live state directly, bypassing history.
    fn spawn_subscription_task(self: &Arc<Self>) {
        let mut store_rx = self.store.subscribe(&paths::advanced(&self.name));
        let this = Arc::downgrade(self);

        let task = tokio::spawn(async move {
            while let Some(record) = store_rx.recv().await {
                let Some(controller) = this.upgrade() else {
                    return;
                };
                if !record.is_object() {
                    continue;
                }
                let profile = crate::codec::decode_profile(&record);
                {
                    let mut meta = controller
                        .profile_meta
                        .lock()
                        .expect("meta lock poisoned");
                    let config = profile.config.clone();
                    *meta = profile;
                    // Self-echoed writes carry the state we already hold;
                    // only genuinely external updates replace live state.
                    controller.live_tx.send_if_modified(|current| {
                        if *current == config {
                            false
                        } else {
                            debug!(name = %controller.name, "Remote update applied");
                            *current = config;
                            true
                        }
                    });
                }
            }
        });
        self.tasks.lock().expect("task lock poisoned").push(task);
    }
}

impl Drop for SyncController {
    fn drop(&mut self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }
}
