use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info_span, warn, Instrument};

use cn_core::ports::HotkeyPort;

/// Re-register the global hotkey when the OS dropped it. Idempotent; run on
/// a periodic check and whenever the surface becomes visible.
///
/// 快捷键丢失时重新注册（幂等）。
pub struct EnsureHotkeyRegistered {
    hotkey: Arc<dyn HotkeyPort>,
    accelerator: String,
}

impl EnsureHotkeyRegistered {
    pub fn new(hotkey: Arc<dyn HotkeyPort>, accelerator: impl Into<String>) -> Self {
        Self {
            hotkey,
            accelerator: accelerator.into(),
        }
    }

    pub fn accelerator(&self) -> &str {
        &self.accelerator
    }

    /// Returns `true` when a (re-)registration happened.
    pub async fn execute(&self) -> Result<bool> {
        let span = info_span!("usecase.ensure_hotkey.execute", accelerator = %self.accelerator);

        async {
            if self.hotkey.is_registered(&self.accelerator).await? {
                debug!("Hotkey still registered");
                return Ok(false);
            }

            warn!("Hotkey not registered, registering");
            self.hotkey
                .register(&self.accelerator)
                .await
                .with_context(|| format!("register hotkey {}", self.accelerator))?;
            Ok(true)
        }
        .instrument(span)
        .await
    }
}
