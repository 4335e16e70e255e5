//! Clipboard change handler port
//!
//! Callback interface the platform watcher invokes for every captured change.
//! The platform layer depends on this abstraction; `cn-app` implements it.

use anyhow::Result;

use crate::clipboard::ClipContent;

/// Callback handler for captured clipboard content.
///
/// Dedup and echo suppression have already been applied by the watcher, so
/// every call represents exactly one new user copy.
#[async_trait::async_trait]
pub trait ClipboardChangeHandler: Send + Sync {
    async fn on_clip_captured(&self, content: ClipContent) -> Result<()>;
}
