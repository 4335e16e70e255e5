//! Task lifecycle commands: create, edit, snooze, complete, delete, list.
//! 任务生命周期命令。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, info_span, Instrument};

use cn_core::ids::TaskId;
use cn_core::ports::{ClockPort, TaskRepositoryError, TaskRepositoryPort};
use cn_core::reminder::{NewTask, ReminderTask, TaskEdit, TaskValidationError};

#[derive(Debug, thiserror::Error)]
pub enum TaskCommandError {
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskCommandError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TaskCommandError::Repository(TaskRepositoryError::NotFound(_))
        )
    }
}

async fn load_task(
    repo: &dyn TaskRepositoryPort,
    id: &TaskId,
) -> Result<ReminderTask, TaskCommandError> {
    repo.get_task(id)
        .await?
        .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()).into())
}

/// Create a task. Malformed recurrence input is rejected before anything is
/// stored.
#[derive(Clone)]
pub struct CreateTask {
    task_repo: Arc<dyn TaskRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl CreateTask {
    pub fn new(task_repo: Arc<dyn TaskRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { task_repo, clock }
    }

    pub async fn execute(&self, new_task: NewTask) -> Result<ReminderTask, TaskCommandError> {
        let span = info_span!("usecase.create_task.execute");

        async {
            new_task.validate()?;
            let task = new_task.into_task(self.clock.now());
            self.task_repo.insert_task(task.clone()).await?;

            info!(
                task_id = %task.id,
                trigger_at = %task.trigger_at,
                recurring = task.is_recurring(),
                "Task created"
            );
            Ok(task)
        }
        .instrument(span)
        .await
    }
}

pub struct EditTask {
    task_repo: Arc<dyn TaskRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl EditTask {
    pub fn new(task_repo: Arc<dyn TaskRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { task_repo, clock }
    }

    /// Apply a partial edit. Changing the trigger or the recurrence resets
    /// `notified` so the task fires again.
    pub async fn execute(
        &self,
        id: &TaskId,
        edit: TaskEdit,
    ) -> Result<ReminderTask, TaskCommandError> {
        let span = info_span!("usecase.edit_task.execute", task_id = %id);

        async {
            edit.validate()?;
            let mut task = load_task(self.task_repo.as_ref(), id).await?;
            task.apply_edit(edit, self.clock.now());
            self.task_repo.update_task(task.clone()).await?;

            info!(notified = task.notified, "Task edited");
            Ok(task)
        }
        .instrument(span)
        .await
    }
}

pub struct SnoozeTask {
    task_repo: Arc<dyn TaskRepositoryPort>,
    clock: Arc<dyn ClockPort>,
}

impl SnoozeTask {
    pub fn new(task_repo: Arc<dyn TaskRepositoryPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { task_repo, clock }
    }

    /// Hold the task back until `until`. A one-shot task that already fired
    /// is re-armed so it fires again once the snooze expires.
    pub async fn execute(
        &self,
        id: &TaskId,
        until: DateTime<Utc>,
    ) -> Result<ReminderTask, TaskCommandError> {
        let span = info_span!("usecase.snooze_task.execute", task_id = %id, until = %until);

        async {
            let now = self.clock.now();
            if until <= now {
                return Err(TaskValidationError::SnoozeInPast(until).into());
            }

            let mut task = load_task(self.task_repo.as_ref(), id).await?;
            task.snoozed_until = Some(until);
            task.notified = false;
            task.updated_at = now;
            self.task_repo.update_task(task.clone()).await?;

            info!("Task snoozed");
            Ok(task)
        }
        .instrument(span)
        .await
    }
}

pub struct CompleteTask {
    task_repo: Arc<dyn TaskRepositoryPort>,
}

impl CompleteTask {
    pub fn new(task_repo: Arc<dyn TaskRepositoryPort>) -> Self {
        Self { task_repo }
    }

    pub async fn execute(&self, id: &TaskId) -> Result<(), TaskCommandError> {
        let span = info_span!("usecase.complete_task.execute", task_id = %id);

        async {
            self.task_repo.mark_completed(id).await?;
            info!("Task completed");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

pub struct DeleteTask {
    task_repo: Arc<dyn TaskRepositoryPort>,
}

impl DeleteTask {
    pub fn new(task_repo: Arc<dyn TaskRepositoryPort>) -> Self {
        Self { task_repo }
    }

    pub async fn execute(&self, id: &TaskId) -> Result<(), TaskCommandError> {
        let span = info_span!("usecase.delete_task.execute", task_id = %id);

        async {
            self.task_repo.delete_task(id).await?;
            info!("Task deleted");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

pub struct ListTasks {
    task_repo: Arc<dyn TaskRepositoryPort>,
}

impl ListTasks {
    pub fn new(task_repo: Arc<dyn TaskRepositoryPort>) -> Self {
        Self { task_repo }
    }

    /// Tasks ascending by trigger; completed ones only when asked for.
    pub async fn execute(
        &self,
        include_completed: bool,
    ) -> Result<Vec<ReminderTask>, TaskCommandError> {
        let span = info_span!("usecase.list_tasks.execute", include_completed);

        async {
            let mut tasks = self.task_repo.list_tasks().await?;
            if !include_completed {
                tasks.retain(|task| !task.completed);
            }
            Ok(tasks)
        }
        .instrument(span)
        .await
    }
}
