//! # Application Dependencies / 应用依赖
//!
//! Dependency grouping for wiring the use cases.
//! 用例装配所需的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern. It only groups parameters;
//! every port is required.

use std::sync::Arc;

use cn_core::ports::*;

/// Application dependency grouping (non-Builder, just parameter grouping)
/// 应用依赖分组（非 Builder，仅参数打包）
#[derive(Clone)]
pub struct AppDeps {
    // Clipboard dependencies / 剪贴板依赖
    pub system_clipboard: Arc<dyn SystemClipboardPort>,
    pub capture_gate: Arc<dyn CaptureGatePort>,
    pub watcher_control: Arc<dyn WatcherControlPort>,

    // Storage dependencies / 存储依赖
    pub clip_repo: Arc<dyn ClipRepositoryPort>,
    pub task_repo: Arc<dyn TaskRepositoryPort>,

    // Host dependencies / 宿主依赖
    pub notifier: Arc<dyn NotificationPort>,
    pub surface: Arc<dyn SurfacePort>,
    pub hotkey: Arc<dyn HotkeyPort>,
    pub emitter: Arc<dyn AppEventEmitterPort>,

    // Settings dependencies / 设置依赖
    pub settings: Arc<dyn SettingsPort>,

    // System dependencies / 系统依赖
    pub clock: Arc<dyn ClockPort>,
}
