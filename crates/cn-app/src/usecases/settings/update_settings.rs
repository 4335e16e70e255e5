//! Use case for updating application settings
//! 更新应用设置的用例

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, info_span, Instrument};

use cn_core::ports::SettingsPort;
use cn_core::settings::{Settings, SettingsValidationError, CURRENT_SCHEMA_VERSION};

#[derive(Debug, thiserror::Error)]
pub enum UpdateSettingsError {
    #[error("invalid schema version: expected {expected}, got {found}")]
    SchemaVersion { expected: u32, found: u32 },

    #[error(transparent)]
    Invalid(#[from] SettingsValidationError),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Use case for updating application settings.
///
/// ## Behavior / 行为
/// - Validates the new settings
/// - Loads current settings and logs changed fields with old/new values
/// - Persists settings through the settings port
pub struct UpdateSettings {
    settings: Arc<dyn SettingsPort>,
}

impl UpdateSettings {
    pub fn new(settings: Arc<dyn SettingsPort>) -> Self {
        Self { settings }
    }

    pub async fn execute(&self, settings: Settings) -> Result<(), UpdateSettingsError> {
        let span = info_span!("usecase.update_settings.execute");

        async {
            if settings.schema_version != CURRENT_SCHEMA_VERSION {
                return Err(UpdateSettingsError::SchemaVersion {
                    expected: CURRENT_SCHEMA_VERSION,
                    found: settings.schema_version,
                });
            }
            settings.validate()?;

            let old_settings = self.settings.load().await?;
            let changes = diff_settings(&old_settings, &settings);
            if changes.is_empty() {
                info!("Updating application settings (no changes detected)");
            } else {
                info!(changed_fields = %changes.join(", "), "Updating application settings");
            }

            self.settings.save(&settings).await?;
            info!("Settings updated successfully");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

/// `section.field: old → new` for every leaf that differs.
fn diff_settings(old: &Settings, new: &Settings) -> Vec<String> {
    let (Ok(old), Ok(new)) = (serde_json::to_value(old), serde_json::to_value(new)) else {
        return Vec::new();
    };
    let mut changes = Vec::new();
    diff_values("", &old, &new, &mut changes);
    changes
}

fn diff_values(path: &str, old: &Value, new: &Value, out: &mut Vec<String>) {
    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            for (key, new_value) in new_map {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match old_map.get(key) {
                    Some(old_value) => diff_values(&child, old_value, new_value, out),
                    None => out.push(format!("{child}: (unset) → {new_value}")),
                }
            }
        }
        _ if old != new => out.push(format!("{path}: {old} → {new}")),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockSettingsPort {
        stored: Mutex<Settings>,
        save_count: AtomicUsize,
    }

    impl MockSettingsPort {
        fn new(initial: Settings) -> Self {
            Self {
                stored: Mutex::new(initial),
                save_count: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SettingsPort for MockSettingsPort {
        async fn load(&self) -> anyhow::Result<Settings> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn save(&self, settings: &Settings) -> anyhow::Result<()> {
            self.save_count.fetch_add(1, Ordering::SeqCst);
            *self.stored.lock().unwrap() = settings.clone();
            Ok(())
        }
    }

    #[tokio::test]
    async fn saves_valid_settings() {
        let repo = Arc::new(MockSettingsPort::new(Settings::default()));
        let mut updated = Settings::default();
        updated.capture.max_clips = 50;

        UpdateSettings::new(repo.clone())
            .execute(updated.clone())
            .await
            .unwrap();

        assert_eq!(repo.save_count.load(Ordering::SeqCst), 1);
        assert_eq!(*repo.stored.lock().unwrap(), updated);
    }

    #[tokio::test]
    async fn rejects_invalid_settings_without_saving() {
        let repo = Arc::new(MockSettingsPort::new(Settings::default()));
        let mut updated = Settings::default();
        updated.reminders.scan_interval_secs = 0;

        let err = UpdateSettings::new(repo.clone())
            .execute(updated)
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateSettingsError::Invalid(_)));
        assert_eq!(repo.save_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejects_stale_schema_version() {
        let repo = Arc::new(MockSettingsPort::new(Settings::default()));
        let mut updated = Settings::default();
        updated.schema_version = 1;

        let err = UpdateSettings::new(repo).execute(updated).await.unwrap_err();
        assert!(matches!(err, UpdateSettingsError::SchemaVersion { found: 1, .. }));
    }

    #[test]
    fn diff_lists_changed_leaves() {
        let old = Settings::default();
        let mut new = old.clone();
        new.capture.enabled = false;
        new.presentation.hotkey = "Alt+Space".into();

        let changes = diff_settings(&old, &new);
        assert_eq!(changes.len(), 2);
        assert!(changes.contains(&"capture.enabled: true → false".to_string()));
        assert!(changes
            .iter()
            .any(|c| c.starts_with("presentation.hotkey: \"CmdOrCtrl+Shift+V\"")));
    }

    #[test]
    fn diff_is_empty_without_changes() {
        let settings = Settings::default();
        assert!(diff_settings(&settings, &settings).is_empty());
    }
}
