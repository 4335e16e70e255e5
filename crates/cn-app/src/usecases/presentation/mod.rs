//! Presentation surface use cases
//! 弹窗显示/隐藏相关用例

mod ensure_hotkey;
mod handle_notification_activation;
mod toggle_coordinator;

pub use ensure_hotkey::EnsureHotkeyRegistered;
pub use handle_notification_activation::HandleNotificationActivation;
pub use toggle_coordinator::{ReadinessPolicy, ToggleCoordinator};
