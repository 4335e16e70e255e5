//! Reminder task commands
//! 提醒任务相关的 Tauri 命令

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tauri::State;
use tracing::warn;

use cn_core::reminder::{NewTask, ReminderTask, TaskEdit};
use cn_core::TaskId;

use super::map_err;
use crate::bootstrap::AppRuntime;

#[tauri::command]
pub async fn create_task(
    runtime: State<'_, Arc<AppRuntime>>,
    task: NewTask,
) -> Result<ReminderTask, String> {
    runtime
        .usecases()
        .create_task()
        .execute(task)
        .await
        .map_err(|e| {
            warn!(error = %e, "Task rejected");
            map_err(e)
        })
}

#[tauri::command]
pub async fn edit_task(
    runtime: State<'_, Arc<AppRuntime>>,
    task_id: String,
    edit: TaskEdit,
) -> Result<ReminderTask, String> {
    let task_id = TaskId::from(task_id);
    runtime
        .usecases()
        .edit_task()
        .execute(&task_id, edit)
        .await
        .map_err(map_err)
}

#[tauri::command]
pub async fn snooze_task(
    runtime: State<'_, Arc<AppRuntime>>,
    task_id: String,
    until: DateTime<Utc>,
) -> Result<ReminderTask, String> {
    let task_id = TaskId::from(task_id);
    runtime
        .usecases()
        .snooze_task()
        .execute(&task_id, until)
        .await
        .map_err(map_err)
}

#[tauri::command]
pub async fn complete_task(
    runtime: State<'_, Arc<AppRuntime>>,
    task_id: String,
) -> Result<(), String> {
    let task_id = TaskId::from(task_id);
    runtime
        .usecases()
        .complete_task()
        .execute(&task_id)
        .await
        .map_err(map_err)
}

#[tauri::command]
pub async fn delete_task(
    runtime: State<'_, Arc<AppRuntime>>,
    task_id: String,
) -> Result<(), String> {
    let task_id = TaskId::from(task_id);
    runtime
        .usecases()
        .delete_task()
        .execute(&task_id)
        .await
        .map_err(map_err)
}

/// 获取任务列表，按触发时间升序
#[tauri::command]
pub async fn list_tasks(
    runtime: State<'_, Arc<AppRuntime>>,
    include_completed: Option<bool>,
) -> Result<Vec<ReminderTask>, String> {
    runtime
        .usecases()
        .list_tasks()
        .execute(include_completed.unwrap_or(false))
        .await
        .map_err(map_err)
}
