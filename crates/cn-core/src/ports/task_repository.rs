use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::ids::TaskId;
use crate::ports::errors::TaskRepositoryError;
use crate::reminder::ReminderTask;

/// Reminder task table.
///
/// 提醒任务表。
#[async_trait]
pub trait TaskRepositoryPort: Send + Sync {
    /// Tasks that are not completed, not notified, triggered at or before
    /// `now` and not snoozed past `now`, ascending by `trigger_at`.
    async fn list_due_tasks(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReminderTask>, TaskRepositoryError>;

    /// Record that the scanner fired `fired`: move its trigger and set
    /// `notified`. Applies only while the stored task still has the schedule
    /// of `fired`; returns `false` and leaves the store alone when the task
    /// was edited, snoozed, completed or deleted in the meantime.
    async fn update_task_trigger(
        &self,
        fired: &ReminderTask,
        trigger_at: DateTime<Utc>,
        notified: bool,
    ) -> Result<bool, TaskRepositoryError>;

    async fn mark_completed(&self, id: &TaskId) -> Result<(), TaskRepositoryError>;

    async fn insert_task(&self, task: ReminderTask) -> Result<(), TaskRepositoryError>;

    async fn get_task(&self, id: &TaskId) -> Result<Option<ReminderTask>, TaskRepositoryError>;

    /// Replace a stored task wholesale.
    async fn update_task(&self, task: ReminderTask) -> Result<(), TaskRepositoryError>;

    async fn delete_task(&self, id: &TaskId) -> Result<(), TaskRepositoryError>;

    /// All tasks, ascending by `trigger_at`.
    async fn list_tasks(&self) -> Result<Vec<ReminderTask>, TaskRepositoryError>;
}
