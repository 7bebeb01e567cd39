//! Periodic autosave of the editing state.
//!
//! Fire-and-forget: each tick overwrites the whole snapshot, so a skipped
//! or overlapping save has no correctness impact. Save failures are logged
//! and otherwise ignored; the next tick tries again.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, warn};

use crate::draft::EditorState;

use super::{DraftStore, SessionSnapshot};

/// Default interval between snapshots
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Background task that snapshots the shared editing state on a timer
pub struct Autosaver {
    store: Arc<dyn DraftStore>,
    state: Arc<RwLock<EditorState>>,
    interval: Duration,
    shutdown_rx: mpsc::Receiver<()>,
}

impl Autosaver {
    /// Create an autosaver and the sender used to stop it
    pub fn new(
        store: Arc<dyn DraftStore>,
        state: Arc<RwLock<EditorState>>,
    ) -> (Self, mpsc::Sender<()>) {
        Self::with_interval(store, state, DEFAULT_INTERVAL)
    }

    pub fn with_interval(
        store: Arc<dyn DraftStore>,
        state: Arc<RwLock<EditorState>>,
        interval: Duration,
    ) -> (Self, mpsc::Sender<()>) {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        (
            Self {
                store,
                state,
                interval,
                shutdown_rx,
            },
            shutdown_tx,
        )
    }

    /// Run until the shutdown sender fires or is dropped.
    ///
    /// Takes one final snapshot on shutdown so the last edits survive.
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        // The first tick completes immediately; skip it so a fresh session
        // does not clobber a snapshot the caller has not rehydrated yet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.save_once().await;
                }
                _ = self.shutdown_rx.recv() => {
                    self.save_once().await;
                    debug!("autosaver stopped");
                    break;
                }
            }
        }
    }

    async fn save_once(&self) {
        let snapshot = SessionSnapshot::from(&*self.state.read().await);
        if let Err(err) = self.store.save(&snapshot) {
            warn!(%err, "autosave failed");
        }
    }
}
