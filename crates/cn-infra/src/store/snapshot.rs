use std::collections::VecDeque;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::warn;

use cn_core::clipboard::ClipSample;
use cn_core::reminder::ReminderTask;

use crate::fs::atomic_write;

pub(crate) const SNAPSHOT_VERSION: u32 = 1;

/// On-disk layout of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct StoreSnapshot {
    #[serde(default)]
    pub version: u32,
    /// Oldest first.
    #[serde(default)]
    pub clips: Vec<ClipSample>,
    #[serde(default)]
    pub tasks: Vec<ReminderTask>,
}

impl StoreSnapshot {
    /// Read the snapshot at `path`. A missing file is an empty store; an
    /// unreadable one is moved aside so the app can still start.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("read store failed: {}", path.display()))
            }
        };

        match serde_json::from_slice::<StoreSnapshot>(&content) {
            Ok(snapshot) => Ok(snapshot),
            Err(err) => {
                let mut aside = path.as_os_str().to_owned();
                aside.push(".corrupt");
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Store snapshot unreadable, moving it aside and starting empty"
                );
                fs::rename(path, &aside)
                    .await
                    .with_context(|| format!("move corrupt store aside: {}", path.display()))?;
                Ok(Self::default())
            }
        }
    }
}

/// Borrowed view written on every commit, same layout as [`StoreSnapshot`].
#[derive(Serialize)]
pub(crate) struct SnapshotRef<'a> {
    pub version: u32,
    pub clips: &'a VecDeque<ClipSample>,
    pub tasks: Vec<&'a ReminderTask>,
}

impl SnapshotRef<'_> {
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_vec(self).context("serialize store failed")?;
        atomic_write(path, &content).await
    }
}
