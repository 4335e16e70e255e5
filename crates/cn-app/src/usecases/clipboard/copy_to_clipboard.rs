//! Write a stored clip (or arbitrary content) back to the system clipboard
//! without the watcher recording it again.
//!
//! 将历史内容写回系统剪贴板，并避免监听器把这次写入当作新复制。

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};

use cn_core::clipboard::ClipContent;
use cn_core::ids::ClipId;
use cn_core::ports::{CaptureGatePort, ClipRepositoryError, ClipRepositoryPort, SystemClipboardPort};
use cn_core::settings::CaptureSettings;

/// Delays of the programmatic write protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteTiming {
    /// Time for the OS clipboard to settle after the write.
    pub settle: Duration,
    /// Time between arming suppression and resuming the watcher.
    pub resume_delay: Duration,
}

impl WriteTiming {
    pub const MIN_SETTLE: Duration = Duration::from_millis(150);
    pub const MIN_RESUME_DELAY: Duration = Duration::from_millis(100);

    pub fn from_settings(capture: &CaptureSettings) -> Self {
        Self {
            settle: Duration::from_millis(capture.write_settle_ms).max(Self::MIN_SETTLE),
            resume_delay: Duration::from_millis(capture.resume_delay_ms)
                .max(Self::MIN_RESUME_DELAY),
        }
    }
}

impl Default for WriteTiming {
    fn default() -> Self {
        Self {
            settle: Self::MIN_SETTLE,
            resume_delay: Self::MIN_RESUME_DELAY,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CopyToClipboardError {
    #[error("clip not found: {0}")]
    NotFound(ClipId),

    #[error(transparent)]
    Repository(#[from] ClipRepositoryError),

    #[error("clipboard write failed: {0:#}")]
    Write(anyhow::Error),
}

pub struct CopyToClipboard {
    clip_repo: Arc<dyn ClipRepositoryPort>,
    system_clipboard: Arc<dyn SystemClipboardPort>,
    gate: Arc<dyn CaptureGatePort>,
    timing: WriteTiming,
}

impl CopyToClipboard {
    pub fn new(
        clip_repo: Arc<dyn ClipRepositoryPort>,
        system_clipboard: Arc<dyn SystemClipboardPort>,
        gate: Arc<dyn CaptureGatePort>,
        timing: WriteTiming,
    ) -> Self {
        Self {
            clip_repo,
            system_clipboard,
            gate,
            timing,
        }
    }

    /// Copy a stored clip by id.
    pub async fn execute(&self, id: &ClipId) -> Result<(), CopyToClipboardError> {
        let span = info_span!("usecase.copy_to_clipboard.execute", clip_id = %id);

        async {
            let sample = self
                .clip_repo
                .get_clip(id)
                .await?
                .ok_or_else(|| CopyToClipboardError::NotFound(id.clone()))?;

            self.write_content(&sample.content).await
        }
        .instrument(span)
        .await
    }

    /// Run the programmatic write protocol:
    /// pause, write, settle, arm suppression, delay, resume.
    pub async fn write_content(&self, content: &ClipContent) -> Result<(), CopyToClipboardError> {
        self.gate.pause_capture();

        if let Err(err) = self.system_clipboard.write(content) {
            // nothing was written, so there is no echo to suppress
            self.gate.resume_capture();
            warn!(error = %err, "Clipboard write failed");
            return Err(CopyToClipboardError::Write(err));
        }

        tokio::time::sleep(self.timing.settle).await;
        self.gate.arm_echo_suppression();
        tokio::time::sleep(self.timing.resume_delay).await;
        self.gate.resume_capture();

        info!(kind = ?content.kind(), "Content written to system clipboard");
        Ok(())
    }
}
