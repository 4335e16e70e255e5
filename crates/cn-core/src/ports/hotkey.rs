use anyhow::Result;
use async_trait::async_trait;

/// Global hotkey registration.
#[async_trait]
pub trait HotkeyPort: Send + Sync {
    async fn is_registered(&self, accelerator: &str) -> Result<bool>;
    async fn register(&self, accelerator: &str) -> Result<()>;
}
