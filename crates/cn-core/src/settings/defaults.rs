use super::model::*;

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ms: 500,
            max_clips: 200,
            write_settle_ms: 150,
            resume_delay_ms: 100,
        }
    }
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            scan_interval_secs: 30,
            startup_delay_secs: 3,
            notification_body_len: 100,
        }
    }
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            hotkey: "CmdOrCtrl+Shift+V".to_string(),
            focus_debounce_ms: 200,
            readiness_first_backoff_ms: 30,
            readiness_backoff_ms: 200,
            readiness_max_attempts: 20,
            hotkey_check_interval_secs: 60,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            capture: CaptureSettings::default(),
            reminders: ReminderSettings::default(),
            presentation: PresentationSettings::default(),
        }
    }
}
