use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tauri::{AppHandle, Manager, WebviewWindow};

use cn_core::ports::SurfacePort;

/// The popup window. Readiness is reported by the frontend through the
/// `surface_ready` command once it has rendered the current history.
pub struct TauriSurface {
    app: AppHandle,
    label: String,
    content_ready: Arc<AtomicBool>,
}

impl TauriSurface {
    pub fn new(app: AppHandle, label: impl Into<String>) -> Self {
        Self {
            app,
            label: label.into(),
            content_ready: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn mark_content_ready(&self) {
        self.content_ready.store(true, Ordering::Release);
    }

    fn window(&self) -> Result<WebviewWindow> {
        self.app
            .get_webview_window(&self.label)
            .ok_or_else(|| anyhow!("Surface window '{}' not found", self.label))
    }
}

#[async_trait]
impl SurfacePort for TauriSurface {
    async fn show(&self) -> Result<()> {
        self.window()?.show()?;
        Ok(())
    }

    async fn hide(&self) -> Result<()> {
        self.window()?.hide()?;
        Ok(())
    }

    async fn focus(&self) -> Result<()> {
        self.window()?.set_focus()?;
        Ok(())
    }

    async fn is_content_ready(&self) -> Result<bool> {
        Ok(self.content_ready.load(Ordering::Acquire))
    }

    async fn reset_content(&self) -> Result<()> {
        self.content_ready.store(false, Ordering::Release);
        Ok(())
    }
}
