use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info_span, Instrument};

use cn_core::clipboard::{ClipKind, ClipSample};
use cn_core::ids::ClipId;
use cn_core::ports::ClipRepositoryPort;

const PREVIEW_CHARS: usize = 120;

/// List row for the history view; images are not shipped inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipPreview {
    pub id: ClipId,
    pub kind: ClipKind,
    pub preview: String,
    pub size_bytes: usize,
    pub captured_at: DateTime<Utc>,
}

impl From<&ClipSample> for ClipPreview {
    fn from(sample: &ClipSample) -> Self {
        Self {
            id: sample.id.clone(),
            kind: sample.content.kind(),
            preview: sample.preview(PREVIEW_CHARS),
            size_bytes: sample.content.size_bytes(),
            captured_at: sample.captured_at,
        }
    }
}

/// Newest-first clip history.
pub struct ListClips {
    clip_repo: Arc<dyn ClipRepositoryPort>,
}

impl ListClips {
    pub fn new(clip_repo: Arc<dyn ClipRepositoryPort>) -> Self {
        Self { clip_repo }
    }

    pub async fn execute(&self, limit: Option<usize>) -> Result<Vec<ClipPreview>> {
        let span = info_span!("usecase.list_clips.execute", ?limit);

        async {
            let clips = self.clip_repo.list_clips(limit).await?;
            Ok(clips.iter().map(ClipPreview::from).collect())
        }
        .instrument(span)
        .await
    }
}
