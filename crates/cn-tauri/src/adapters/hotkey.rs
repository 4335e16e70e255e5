use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tauri::{AppHandle, Manager};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};
use tracing::{info, warn};

use cn_core::ports::HotkeyPort;

use crate::bootstrap::AppRuntime;

/// Global shortcut registration. A press is routed to the toggle
/// coordinator held in the managed [`AppRuntime`].
pub struct TauriHotkey {
    app: AppHandle,
}

impl TauriHotkey {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

#[async_trait]
impl HotkeyPort for TauriHotkey {
    async fn is_registered(&self, accelerator: &str) -> Result<bool> {
        Ok(self.app.global_shortcut().is_registered(accelerator))
    }

    async fn register(&self, accelerator: &str) -> Result<()> {
        self.app
            .global_shortcut()
            .on_shortcut(accelerator, |app, _shortcut, event| {
                if event.state() != ShortcutState::Pressed {
                    return;
                }
                let Some(runtime) = app.try_state::<Arc<AppRuntime>>() else {
                    warn!("Hotkey pressed before runtime was ready");
                    return;
                };
                let coordinator = runtime.coordinator().clone();
                tauri::async_runtime::spawn(async move {
                    if let Err(err) = coordinator.hotkey_pressed().await {
                        warn!(error = ?err, "Hotkey toggle failed");
                    }
                });
            })?;

        info!(accelerator, "Global hotkey registered");
        Ok(())
    }
}
