//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `cn-app` and the
//! adapters in `cn-platform`, `cn-infra` and `cn-tauri`. Core code never
//! touches the OS, the store file or the window system directly.
//!
//! 端口定义了用例层与适配器之间的契约。

pub mod app_dirs;
pub mod app_event;
mod capture_gate;
mod clip_repository;
mod clipboard_change_handler;
mod clock;
pub mod errors;
mod hotkey;
mod notification;
pub mod settings;
mod surface;
mod system_clipboard;
mod task_repository;
pub mod watcher_control;

pub use app_dirs::AppDirsPort;
pub use app_event::{AppEvent, AppEventEmitterPort};
pub use capture_gate::CaptureGatePort;
pub use clip_repository::{AppendOutcome, ClipRepositoryPort};
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use clock::*;
pub use errors::{AppDirsError, ClipRepositoryError, TaskRepositoryError};
pub use hotkey::HotkeyPort;
pub use notification::{NotificationPort, TaskNotification};
pub use settings::{SettingsMigrationPort, SettingsPort};
pub use surface::SurfacePort;
pub use system_clipboard::SystemClipboardPort;
pub use task_repository::TaskRepositoryPort;
pub use watcher_control::{WatcherControlError, WatcherControlPort};
