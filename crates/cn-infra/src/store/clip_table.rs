use async_trait::async_trait;
use tracing::debug;

use cn_core::clipboard::ClipSample;
use cn_core::ids::ClipId;
use cn_core::ports::{AppendOutcome, ClipRepositoryError, ClipRepositoryPort};

use super::RecordStore;

fn storage(err: anyhow::Error) -> ClipRepositoryError {
    ClipRepositoryError::Storage(format!("{err:#}"))
}

#[async_trait]
impl ClipRepositoryPort for RecordStore {
    async fn append_clip(
        &self,
        sample: ClipSample,
        max_count: usize,
    ) -> Result<AppendOutcome, ClipRepositoryError> {
        let mut tables = self.lock().await;

        if tables
            .clips
            .back()
            .is_some_and(|latest| latest.content.same_as(&sample.content))
        {
            return Ok(AppendOutcome::DuplicateOfLatest);
        }

        tables.clips.push_back(sample);
        let cap = max_count.max(1);
        let mut evicted = 0;
        while tables.clips.len() > cap {
            tables.clips.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            debug!(evicted, cap, "Evicted oldest clips");
        }

        self.commit(&tables).await.map_err(storage)?;
        Ok(AppendOutcome::Appended { evicted })
    }

    async fn list_clips(&self, limit: Option<usize>) -> Result<Vec<ClipSample>, ClipRepositoryError> {
        let tables = self.lock().await;
        let limit = limit.unwrap_or(usize::MAX);
        Ok(tables.clips.iter().rev().take(limit).cloned().collect())
    }

    async fn get_clip(&self, id: &ClipId) -> Result<Option<ClipSample>, ClipRepositoryError> {
        let tables = self.lock().await;
        Ok(tables.clips.iter().find(|clip| &clip.id == id).cloned())
    }

    async fn delete_clip(&self, id: &ClipId) -> Result<(), ClipRepositoryError> {
        let mut tables = self.lock().await;
        let position = tables
            .clips
            .iter()
            .position(|clip| &clip.id == id)
            .ok_or_else(|| ClipRepositoryError::NotFound(id.clone()))?;
        tables.clips.remove(position);

        self.commit(&tables).await.map_err(storage)
    }
}
