use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};
use clipboard_rs::ClipboardContext;
use tracing::{debug, debug_span};

use cn_core::clipboard::{ClipContent, SystemClipboardSnapshot};
use cn_core::ports::SystemClipboardPort;

use super::common::CommonClipboardImpl;

/// System clipboard backed by clipboard-rs.
///
/// 基于 clipboard-rs 的系统剪贴板实现。
pub struct LocalClipboard {
    inner: Mutex<ClipboardContext>,
}

impl LocalClipboard {
    #[cfg(target_os = "linux")]
    pub fn new() -> Result<Self> {
        use clipboard_rs::ClipboardContextX11Options;

        let context =
            ClipboardContext::new_with_options(ClipboardContextX11Options { read_timeout: None })
                .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))?;
        Ok(Self {
            inner: Mutex::new(context),
        })
    }

    #[cfg(not(target_os = "linux"))]
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))?;
        Ok(Self {
            inner: Mutex::new(context),
        })
    }

    fn context(&self) -> Result<MutexGuard<'_, ClipboardContext>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("clipboard context lock poisoned"))
    }
}

impl SystemClipboardPort for LocalClipboard {
    fn read_snapshot(&self) -> Result<SystemClipboardSnapshot> {
        let span = debug_span!("platform.clipboard.read");
        span.in_scope(|| {
            let mut ctx = self.context()?;
            CommonClipboardImpl::read_snapshot(&mut ctx)
        })
    }

    fn write(&self, content: &ClipContent) -> Result<()> {
        let span = debug_span!(
            "platform.clipboard.write",
            kind = ?content.kind(),
            size = content.size_bytes()
        );
        span.in_scope(|| {
            let mut ctx = self.context()?;
            CommonClipboardImpl::write_content(&mut ctx, content)?;

            debug!("Wrote content to system clipboard");
            Ok(())
        })
    }
}
