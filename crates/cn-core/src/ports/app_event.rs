use anyhow::Result;
use serde::Serialize;

use crate::clipboard::ClipKind;
use crate::ids::{ClipId, TaskId};

/// Events pushed to the UI.
///
/// 推送给前端的事件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AppEvent {
    #[serde(rename_all = "camelCase")]
    ClipAdded { clip_id: ClipId, kind: ClipKind },
    /// A reminder notification went out; the UI lists it as clickable.
    #[serde(rename_all = "camelCase")]
    TaskNotified { task_id: TaskId, title: String },
    #[serde(rename_all = "camelCase")]
    TaskActivated { task_id: TaskId },
    SurfaceShown,
    SurfaceHidden,
}

impl AppEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::ClipAdded { .. } => "clip-added",
            AppEvent::TaskNotified { .. } => "task-notified",
            AppEvent::TaskActivated { .. } => "task-activated",
            AppEvent::SurfaceShown => "surface-shown",
            AppEvent::SurfaceHidden => "surface-hidden",
        }
    }
}

pub trait AppEventEmitterPort: Send + Sync {
    fn emit(&self, event: AppEvent) -> Result<()>;
}
