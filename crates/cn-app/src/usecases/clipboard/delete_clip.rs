use std::sync::Arc;

use anyhow::Result;
use tracing::{info, info_span, Instrument};

use cn_core::ids::ClipId;
use cn_core::ports::ClipRepositoryPort;

pub struct DeleteClip {
    clip_repo: Arc<dyn ClipRepositoryPort>,
}

impl DeleteClip {
    pub fn new(clip_repo: Arc<dyn ClipRepositoryPort>) -> Self {
        Self { clip_repo }
    }

    pub async fn execute(&self, id: &ClipId) -> Result<()> {
        let span = info_span!("usecase.delete_clip.execute", clip_id = %id);

        async {
            self.clip_repo.delete_clip(id).await?;
            info!("Clip deleted");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
