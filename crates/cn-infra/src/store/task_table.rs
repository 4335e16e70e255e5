use async_trait::async_trait;
use chrono::{DateTime, Utc};

use cn_core::ids::TaskId;
use cn_core::ports::{TaskRepositoryError, TaskRepositoryPort};
use cn_core::reminder::ReminderTask;

use super::record_store::Tables;
use super::RecordStore;

fn storage(err: anyhow::Error) -> TaskRepositoryError {
    TaskRepositoryError::Storage(format!("{err:#}"))
}

fn by_trigger(mut tasks: Vec<ReminderTask>) -> Vec<ReminderTask> {
    tasks.sort_by(|a, b| a.trigger_at.cmp(&b.trigger_at).then_with(|| a.id.cmp(&b.id)));
    tasks
}

fn task_mut<'a>(
    tables: &'a mut Tables,
    id: &TaskId,
) -> Result<&'a mut ReminderTask, TaskRepositoryError> {
    tables
        .tasks
        .get_mut(id)
        .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))
}

#[async_trait]
impl TaskRepositoryPort for RecordStore {
    async fn list_due_tasks(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ReminderTask>, TaskRepositoryError> {
        let tables = self.lock().await;
        let due = tables
            .tasks
            .values()
            .filter(|task| task.is_due(now))
            .cloned()
            .collect();
        Ok(by_trigger(due))
    }

    async fn update_task_trigger(
        &self,
        fired: &ReminderTask,
        trigger_at: DateTime<Utc>,
        notified: bool,
    ) -> Result<bool, TaskRepositoryError> {
        let mut tables = self.lock().await;
        let Some(task) = tables.tasks.get_mut(&fired.id) else {
            return Ok(false);
        };
        if !task.same_schedule(fired) {
            return Ok(false);
        }
        task.trigger_at = trigger_at;
        task.notified = notified;
        task.updated_at = Utc::now();

        self.commit(&tables).await.map_err(storage)?;
        Ok(true)
    }

    async fn mark_completed(&self, id: &TaskId) -> Result<(), TaskRepositoryError> {
        let mut tables = self.lock().await;
        let task = task_mut(&mut tables, id)?;
        task.completed = true;
        task.updated_at = Utc::now();

        self.commit(&tables).await.map_err(storage)
    }

    async fn insert_task(&self, task: ReminderTask) -> Result<(), TaskRepositoryError> {
        let mut tables = self.lock().await;
        if tables.tasks.contains_key(&task.id) {
            return Err(TaskRepositoryError::Storage(format!(
                "task {} already exists",
                task.id
            )));
        }
        tables.tasks.insert(task.id.clone(), task);

        self.commit(&tables).await.map_err(storage)
    }

    async fn get_task(&self, id: &TaskId) -> Result<Option<ReminderTask>, TaskRepositoryError> {
        let tables = self.lock().await;
        Ok(tables.tasks.get(id).cloned())
    }

    async fn update_task(&self, task: ReminderTask) -> Result<(), TaskRepositoryError> {
        let mut tables = self.lock().await;
        let stored = task_mut(&mut tables, &task.id)?;
        *stored = task;

        self.commit(&tables).await.map_err(storage)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), TaskRepositoryError> {
        let mut tables = self.lock().await;
        tables
            .tasks
            .remove(id)
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;

        self.commit(&tables).await.map_err(storage)
    }

    async fn list_tasks(&self) -> Result<Vec<ReminderTask>, TaskRepositoryError> {
        let tables = self.lock().await;
        Ok(by_trigger(tables.tasks.values().cloned().collect()))
    }
}
