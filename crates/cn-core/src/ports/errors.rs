use thiserror::Error;

use crate::ids::{ClipId, TaskId};

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("system data-local directory is unavailable")]
    DataLocalDirUnavailable,
}

#[derive(Debug, Error)]
pub enum TaskRepositoryError {
    #[error("task not found: {0}")]
    NotFound(TaskId),

    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Error)]
pub enum ClipRepositoryError {
    #[error("clip not found: {0}")]
    NotFound(ClipId),

    #[error("storage error: {0}")]
    Storage(String),
}
