use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use cn_core::clipboard::ClipSample;
use cn_core::ids::TaskId;
use cn_core::reminder::ReminderTask;

use super::snapshot::{SnapshotRef, StoreSnapshot, SNAPSHOT_VERSION};

#[derive(Debug, Default)]
pub(crate) struct Tables {
    /// Oldest at the front.
    pub clips: VecDeque<ClipSample>,
    pub tasks: BTreeMap<TaskId, ReminderTask>,
}

/// Clip and task tables with optional JSON persistence.
pub struct RecordStore {
    tables: Mutex<Tables>,
    snapshot_path: Option<PathBuf>,
}

impl RecordStore {
    /// Volatile store, used by tests and when no data dir is available.
    pub fn in_memory() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            snapshot_path: None,
        }
    }

    /// Open (or create) the store persisted at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = StoreSnapshot::load(&path).await?;
        let version = snapshot.version;

        let tables = Tables {
            clips: snapshot.clips.into_iter().collect(),
            tasks: snapshot
                .tasks
                .into_iter()
                .map(|task| (task.id.clone(), task))
                .collect(),
        };
        info!(
            path = %path.display(),
            version,
            clips = tables.clips.len(),
            tasks = tables.tasks.len(),
            "Record store opened"
        );

        Ok(Self {
            tables: Mutex::new(tables),
            snapshot_path: Some(path),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().await
    }

    /// Persist the current tables. Called with the lock held so snapshots
    /// land in mutation order.
    pub(crate) async fn commit(&self, tables: &Tables) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            clips: &tables.clips,
            tasks: tables.tasks.values().collect(),
        };
        snapshot.save(path).await
    }
}
