use anyhow::Result;
use tauri::{AppHandle, Emitter};

use cn_core::ports::{AppEvent, AppEventEmitterPort};

/// Broadcasts [`AppEvent`]s to every webview under their kebab-case name.
pub struct TauriEventEmitter {
    app: AppHandle,
}

impl TauriEventEmitter {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl AppEventEmitterPort for TauriEventEmitter {
    fn emit(&self, event: AppEvent) -> Result<()> {
        self.app.emit(event.name(), &event)?;
        Ok(())
    }
}
