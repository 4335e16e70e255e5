use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ids::TaskId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNotification {
    pub task_id: TaskId,
    pub title: String,
    /// Already truncated to the display length.
    pub body: String,
}

/// Desktop notification sink.
#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn notify(&self, notification: TaskNotification) -> Result<()>;
}
