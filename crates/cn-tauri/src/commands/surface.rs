//! Popup surface commands
//! 弹窗相关的 Tauri 命令

use std::sync::Arc;

use tauri::State;
use tracing::debug;

use cn_core::ports::SurfacePort;
use cn_core::TaskId;

use super::map_err;
use crate::bootstrap::AppRuntime;

/// Called by the frontend once the history list has rendered.
#[tauri::command]
pub fn surface_ready(runtime: State<'_, Arc<AppRuntime>>) {
    debug!("Surface reported content ready");
    runtime.surface().mark_content_ready();
}

#[tauri::command]
pub async fn hide_surface(runtime: State<'_, Arc<AppRuntime>>) -> Result<(), String> {
    runtime.surface().hide().await.map_err(map_err)?;
    let coordinator = runtime.coordinator().clone();
    coordinator.surface_hidden().await.map_err(map_err)
}

/// A reminder notification was clicked; bring the surface up on that task.
#[tauri::command]
pub async fn open_task(runtime: State<'_, Arc<AppRuntime>>, task_id: String) -> Result<(), String> {
    runtime
        .usecases()
        .notification_activation()
        .execute(TaskId::from(task_id))
        .await
        .map_err(map_err)
}
