use async_trait::async_trait;

use crate::clipboard::ClipSample;
use crate::ids::ClipId;
use crate::ports::errors::ClipRepositoryError;

/// What [`ClipRepositoryPort::append_clip`] did with the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Stored; `evicted` oldest samples were dropped to stay within the cap.
    Appended { evicted: usize },
    /// Identical to the newest stored sample; nothing written.
    DuplicateOfLatest,
}

/// Clip history table.
///
/// 剪贴板历史表：最多保存 `max_count` 条，旧记录先淘汰。
#[async_trait]
pub trait ClipRepositoryPort: Send + Sync {
    async fn append_clip(
        &self,
        sample: ClipSample,
        max_count: usize,
    ) -> Result<AppendOutcome, ClipRepositoryError>;

    /// Newest first.
    async fn list_clips(&self, limit: Option<usize>) -> Result<Vec<ClipSample>, ClipRepositoryError>;

    async fn get_clip(&self, id: &ClipId) -> Result<Option<ClipSample>, ClipRepositoryError>;

    async fn delete_clip(&self, id: &ClipId) -> Result<(), ClipRepositoryError>;
}
