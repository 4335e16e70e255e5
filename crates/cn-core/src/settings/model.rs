use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSettings {
    /// 是否记录剪贴板历史
    pub enabled: bool,
    pub poll_interval_ms: u64,
    /// 历史记录上限，超出后按 FIFO 淘汰
    pub max_clips: usize,
    /// Wait after a programmatic write before arming echo suppression.
    pub write_settle_ms: u64,
    /// Wait after arming before the watcher resumes.
    pub resume_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderSettings {
    pub scan_interval_secs: u64,
    /// 启动后首次扫描的延迟
    pub startup_delay_secs: u64,
    pub notification_body_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    /// Accelerator string, e.g. `CmdOrCtrl+Shift+V`.
    pub hotkey: String,
    pub focus_debounce_ms: u64,
    pub readiness_first_backoff_ms: u64,
    pub readiness_backoff_ms: u64,
    pub readiness_max_attempts: u32,
    pub hotkey_check_interval_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Files written before versioning carry no field and read as 1.
    #[serde(default = "legacy_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub capture: CaptureSettings,

    #[serde(default)]
    pub reminders: ReminderSettings,

    #[serde(default)]
    pub presentation: PresentationSettings,
}

fn legacy_schema_version() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsValidationError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("hotkey must not be empty")]
    EmptyHotkey,
}

impl Settings {
    /// Reject values that would stall a timer or make the history useless.
    pub fn validate(&self) -> Result<(), SettingsValidationError> {
        let checks: [(&'static str, u64); 7] = [
            ("capture.poll_interval_ms", self.capture.poll_interval_ms),
            ("capture.max_clips", self.capture.max_clips as u64),
            ("reminders.scan_interval_secs", self.reminders.scan_interval_secs),
            (
                "reminders.notification_body_len",
                self.reminders.notification_body_len as u64,
            ),
            (
                "presentation.readiness_backoff_ms",
                self.presentation.readiness_backoff_ms,
            ),
            (
                "presentation.readiness_max_attempts",
                u64::from(self.presentation.readiness_max_attempts),
            ),
            (
                "presentation.hotkey_check_interval_secs",
                self.presentation.hotkey_check_interval_secs,
            ),
        ];
        if let Some((field, _)) = checks.iter().find(|(_, value)| *value == 0) {
            return Err(SettingsValidationError::Zero { field: *field });
        }
        if self.presentation.hotkey.trim().is_empty() {
            return Err(SettingsValidationError::EmptyHotkey);
        }
        Ok(())
    }
}
