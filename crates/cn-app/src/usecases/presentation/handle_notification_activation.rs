use std::sync::Arc;

use anyhow::Result;
use tracing::{info, info_span, Instrument};

use cn_core::ids::TaskId;
use cn_core::ports::{AppEvent, AppEventEmitterPort};

use super::ToggleCoordinator;

/// A reminder notification was activated: bring the surface up and let the
/// UI navigate to the task.
///
/// 用户点击提醒通知：显示弹窗并跳转到对应任务。
pub struct HandleNotificationActivation {
    coordinator: Arc<ToggleCoordinator>,
    emitter: Arc<dyn AppEventEmitterPort>,
}

impl HandleNotificationActivation {
    pub fn new(coordinator: Arc<ToggleCoordinator>, emitter: Arc<dyn AppEventEmitterPort>) -> Self {
        Self {
            coordinator,
            emitter,
        }
    }

    pub async fn execute(&self, task_id: TaskId) -> Result<()> {
        let span = info_span!("usecase.handle_notification_activation.execute", task_id = %task_id);

        async {
            self.coordinator.show_requested().await?;
            self.emitter.emit(AppEvent::TaskActivated { task_id })?;
            info!("Notification activation handled");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
