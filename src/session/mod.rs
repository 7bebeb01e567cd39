//! Session persistence for the authoring draft.
//!
//! The wizard core never touches storage directly; it is handed a
//! [`DraftStore`] so tests can run against the in-memory store and the
//! application against the file-backed one.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

use crate::draft::{
    AnalysisRef, DurationFilter, EditorState, IndicatorDraft, IndicatorQuery, SectionStates,
    UserQueryCondition, VisRef,
};

pub mod autosave;

pub use autosave::Autosaver;

/// Name of the snapshot file inside the session directory
const SNAPSHOT_FILE: &str = "session.json";

/// The dataset portion of the query: where the statements come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DatasetSnapshot {
    pub lrs_stores: BTreeSet<String>,
    pub platforms: BTreeSet<String>,
}

/// The filter portion of the query: what is selected within the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterSnapshot {
    pub activity_types: BTreeSet<String>,
    pub activities: BTreeMap<String, Vec<String>>,
    pub action_on_activities: BTreeSet<String>,
    pub duration: DurationFilter,
    pub user_query_condition: UserQueryCondition,
}

/// One persisted snapshot of the authoring session.
///
/// The top-level keys (`session`, `dataset`, `filters`, `analysis`,
/// `visualization`) are fixed; rehydrating a snapshot reproduces the
/// editing state field for field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionSnapshot {
    pub session: IndicatorDraft,
    pub dataset: DatasetSnapshot,
    pub filters: FilterSnapshot,
    pub analysis: AnalysisRef,
    pub visualization: VisRef,
    #[serde(default)]
    pub sections: SectionStates,
}

impl From<&EditorState> for SessionSnapshot {
    fn from(state: &EditorState) -> Self {
        Self {
            session: state.draft.clone(),
            dataset: DatasetSnapshot {
                lrs_stores: state.query.lrs_stores.clone(),
                platforms: state.query.platforms.clone(),
            },
            filters: FilterSnapshot {
                activity_types: state.query.activity_types.clone(),
                activities: state.query.activities.clone(),
                action_on_activities: state.query.action_on_activities.clone(),
                duration: state.query.duration,
                user_query_condition: state.query.user_query_condition,
            },
            analysis: state.analysis.clone(),
            visualization: state.visualization.clone(),
            sections: state.sections,
        }
    }
}

impl SessionSnapshot {
    /// Rebuild the editing state this snapshot was taken from
    pub fn into_editor_state(self) -> EditorState {
        EditorState {
            draft: self.session,
            query: IndicatorQuery {
                lrs_stores: self.dataset.lrs_stores,
                platforms: self.dataset.platforms,
                activity_types: self.filters.activity_types,
                activities: self.filters.activities,
                action_on_activities: self.filters.action_on_activities,
                duration: self.filters.duration,
                user_query_condition: self.filters.user_query_condition,
            },
            analysis: self.analysis,
            visualization: self.visualization,
            sections: self.sections,
        }
    }
}

/// Storage for the session snapshot.
///
/// `load` returns `Ok(None)` both when nothing was saved yet and when the
/// stored snapshot cannot be parsed; callers fall back to a fresh draft.
pub trait DraftStore: Send + Sync {
    fn load(&self) -> Result<Option<SessionSnapshot>>;
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Snapshot persisted as one JSON file, overwritten whole on every save
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(SNAPSHOT_FILE),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl DraftStore for FileDraftStore {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).context("Failed to read session file")?;
        match serde_json::from_str(&contents) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(err) => {
                // A corrupt snapshot must not take the session down
                warn!(path = %self.path.display(), %err, "discarding unreadable session snapshot");
                Ok(None)
            }
        }
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).context("Failed to create session directory")?;
        }
        let contents = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, contents).context("Failed to write session file")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).context("Failed to remove session file")?;
        }
        Ok(())
    }
}

/// In-memory store for tests and headless embedding
#[derive(Default)]
pub struct MemoryDraftStore {
    inner: Mutex<Option<SessionSnapshot>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        let inner = self.inner.lock().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(inner.clone())
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let mut inner = self.inner.lock().map_err(|_| anyhow!("store lock poisoned"))?;
        *inner = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut inner = self.inner.lock().map_err(|_| anyhow!("store lock poisoned"))?;
        *inner = None;
        Ok(())
    }
}
