use anyhow::Result;
use async_trait::async_trait;

/// The single popup surface (window) toggled by the global hotkey.
///
/// 全局快捷键控制的唯一弹出窗口。
#[async_trait]
pub trait SurfacePort: Send + Sync {
    async fn show(&self) -> Result<()>;
    async fn hide(&self) -> Result<()>;
    async fn focus(&self) -> Result<()>;

    /// Whether the surface content has rendered and reported ready.
    async fn is_content_ready(&self) -> Result<bool>;

    /// Drop readiness and any per-show content state.
    async fn reset_content(&self) -> Result<()>;
}
