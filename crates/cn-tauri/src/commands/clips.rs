//! Clip history commands
//! 剪贴板历史相关的 Tauri 命令

use std::sync::Arc;

use tauri::State;
use tracing::{error, info};

use cn_app::usecases::clipboard::{ClipPreview, PinClipRequest};
use cn_core::reminder::ReminderTask;
use cn_core::ClipId;

use super::map_err;
use crate::bootstrap::AppRuntime;

/// Get clip history, newest first
/// 获取剪贴板历史（最新在前）
#[tauri::command]
pub async fn list_clips(
    runtime: State<'_, Arc<AppRuntime>>,
    limit: Option<usize>,
) -> Result<Vec<ClipPreview>, String> {
    runtime
        .usecases()
        .list_clips()
        .execute(limit)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to list clips");
            map_err(e)
        })
}

/// Write a stored clip back to the system clipboard without capturing it
/// again.
#[tauri::command]
pub async fn copy_clip(runtime: State<'_, Arc<AppRuntime>>, clip_id: String) -> Result<(), String> {
    let clip_id = ClipId::from(clip_id);
    runtime
        .usecases()
        .copy_to_clipboard()
        .execute(&clip_id)
        .await
        .map_err(map_err)
}

#[tauri::command]
pub async fn delete_clip(
    runtime: State<'_, Arc<AppRuntime>>,
    clip_id: String,
) -> Result<(), String> {
    let clip_id = ClipId::from(clip_id);
    runtime
        .usecases()
        .delete_clip()
        .execute(&clip_id)
        .await
        .map_err(map_err)
}

/// Turn a text clip into a reminder task
/// 将文本条目固定为提醒任务
#[tauri::command]
pub async fn pin_clip(
    runtime: State<'_, Arc<AppRuntime>>,
    clip_id: String,
    request: PinClipRequest,
) -> Result<ReminderTask, String> {
    let clip_id = ClipId::from(clip_id);
    runtime
        .usecases()
        .pin_clip()
        .execute(&clip_id, request)
        .await
        .map_err(map_err)
}

/// Pause or resume capture for this session. The stored setting is not
/// touched.
#[tauri::command]
pub async fn set_capture_enabled(
    runtime: State<'_, Arc<AppRuntime>>,
    enabled: bool,
) -> Result<(), String> {
    info!(enabled, "Capture toggled from UI");
    if enabled {
        runtime
            .usecases()
            .start_clipboard_watcher()
            .execute()
            .await
            .map_err(map_err)
    } else {
        runtime
            .usecases()
            .stop_clipboard_watcher()
            .execute()
            .await
            .map_err(map_err)
    }
}
