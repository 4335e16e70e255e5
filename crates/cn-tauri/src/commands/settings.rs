//! Settings-related Tauri commands
//! 设置相关的 Tauri 命令

use std::sync::Arc;

use tauri::State;
use tracing::info;

use cn_core::Settings;

use super::map_err;
use crate::bootstrap::AppRuntime;

#[tauri::command]
pub async fn get_settings(runtime: State<'_, Arc<AppRuntime>>) -> Result<Settings, String> {
    runtime
        .usecases()
        .get_settings()
        .execute()
        .await
        .map_err(map_err)
}

/// Validate and persist settings. Capture, reminder and hotkey changes take
/// effect on the next launch.
#[tauri::command]
pub async fn update_settings(
    runtime: State<'_, Arc<AppRuntime>>,
    settings: Settings,
) -> Result<(), String> {
    runtime
        .usecases()
        .update_settings()
        .execute(settings)
        .await
        .map_err(map_err)?;
    info!("Settings saved from UI");
    Ok(())
}
