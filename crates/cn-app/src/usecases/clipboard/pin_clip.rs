//! Pin a clip as a reminder task.
//! 将剪贴板内容固定为提醒任务。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info_span, Instrument};

use cn_core::clipboard::ClipContent;
use cn_core::ids::ClipId;
use cn_core::ports::ClipRepositoryPort;
use cn_core::reminder::{NewTask, Priority, RecurrenceSpec, ReminderTask};

use crate::usecases::reminder::{CreateTask, TaskCommandError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinClipRequest {
    pub title: Option<String>,
    pub trigger_at: DateTime<Utc>,
    #[serde(default)]
    pub recurrence: Option<RecurrenceSpec>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PinClipError {
    #[error("clip not found: {0}")]
    NotFound(ClipId),

    #[error("only text clips can be pinned")]
    NotText,

    #[error(transparent)]
    Repository(#[from] cn_core::ports::ClipRepositoryError),

    #[error(transparent)]
    Task(#[from] TaskCommandError),
}

pub struct PinClip {
    clip_repo: Arc<dyn ClipRepositoryPort>,
    create_task: CreateTask,
}

impl PinClip {
    pub fn new(clip_repo: Arc<dyn ClipRepositoryPort>, create_task: CreateTask) -> Self {
        Self {
            clip_repo,
            create_task,
        }
    }

    pub async fn execute(
        &self,
        id: &ClipId,
        request: PinClipRequest,
    ) -> Result<ReminderTask, PinClipError> {
        let span = info_span!("usecase.pin_clip.execute", clip_id = %id);

        async {
            let sample = self
                .clip_repo
                .get_clip(id)
                .await?
                .ok_or_else(|| PinClipError::NotFound(id.clone()))?;

            let ClipContent::Text { text } = sample.content else {
                return Err(PinClipError::NotText);
            };

            let task = self
                .create_task
                .execute(NewTask {
                    content: text,
                    title: request.title,
                    trigger_at: request.trigger_at,
                    recurrence: request.recurrence,
                    priority: request.priority,
                    category: request.category,
                })
                .await?;
            Ok(task)
        }
        .instrument(span)
        .await
    }
}
