//! Persist a captured clip and notify the UI.
//! 保存捕获到的剪贴板内容并通知前端。

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, info, info_span, Instrument};

use cn_core::clipboard::{ClipContent, ClipSample};
use cn_core::ports::{
    AppEvent, AppEventEmitterPort, AppendOutcome, ClipRepositoryPort, ClipboardChangeHandler,
    ClockPort,
};

/// Callback the platform watcher invokes for every captured change.
///
/// The watcher has already updated its dedup trackers before calling in, so
/// a failure here loses at most this one sample.
pub struct HandleClipCaptured {
    clip_repo: Arc<dyn ClipRepositoryPort>,
    emitter: Arc<dyn AppEventEmitterPort>,
    clock: Arc<dyn ClockPort>,
    max_clips: usize,
}

impl HandleClipCaptured {
    pub fn new(
        clip_repo: Arc<dyn ClipRepositoryPort>,
        emitter: Arc<dyn AppEventEmitterPort>,
        clock: Arc<dyn ClockPort>,
        max_clips: usize,
    ) -> Self {
        Self {
            clip_repo,
            emitter,
            clock,
            max_clips,
        }
    }

    pub async fn execute(&self, content: ClipContent) -> Result<Option<ClipSample>> {
        let kind = content.kind();
        let span = info_span!(
            "usecase.handle_clip_captured.execute",
            kind = ?kind,
            size = content.size_bytes()
        );

        async {
            let sample = ClipSample::new(content, self.clock.now());

            let outcome = self
                .clip_repo
                .append_clip(sample.clone(), self.max_clips)
                .await
                .context("append captured clip")?;

            match outcome {
                AppendOutcome::DuplicateOfLatest => {
                    debug!("Clip identical to latest stored sample, skipped");
                    Ok(None)
                }
                AppendOutcome::Appended { evicted } => {
                    info!(clip_id = %sample.id, evicted, "Clip stored");
                    self.emitter.emit(AppEvent::ClipAdded {
                        clip_id: sample.id.clone(),
                        kind,
                    })?;
                    Ok(Some(sample))
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl ClipboardChangeHandler for HandleClipCaptured {
    async fn on_clip_captured(&self, content: ClipContent) -> Result<()> {
        self.execute(content).await.map(|_| ())
    }
}
