use anyhow::Result;
use async_trait::async_trait;
use tauri::AppHandle;
use tauri_plugin_notification::NotificationExt;
use tracing::debug;

use cn_core::ports::{NotificationPort, TaskNotification};

/// Desktop notifications through `tauri-plugin-notification`.
///
/// 通过通知插件发送桌面通知。
pub struct TauriNotifier {
    app: AppHandle,
}

impl TauriNotifier {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

#[async_trait]
impl NotificationPort for TauriNotifier {
    async fn notify(&self, notification: TaskNotification) -> Result<()> {
        self.app
            .notification()
            .builder()
            .title(&notification.title)
            .body(&notification.body)
            .show()?;

        debug!(task_id = %notification.task_id, "Notification shown");
        Ok(())
    }
}
