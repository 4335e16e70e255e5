use cn_core::ports::SettingsMigrationPort;
use cn_core::settings::{CaptureSettings, Settings, CURRENT_SCHEMA_VERSION};
use tracing::warn;

/// v1 stored `max_clips = 0` for "unlimited"; v2 always keeps a bound.
pub struct MigrationV1ToV2;

impl SettingsMigrationPort for MigrationV1ToV2 {
    fn from_version(&self) -> u32 {
        1
    }

    fn to_version(&self) -> u32 {
        2
    }

    fn migrate(&self, mut settings: Settings) -> Settings {
        if settings.capture.max_clips == 0 {
            settings.capture.max_clips = CaptureSettings::default().max_clips;
        }
        settings.schema_version = self.to_version();
        settings
    }
}

pub struct SettingsMigrator {
    migrations: Vec<Box<dyn SettingsMigrationPort>>,
}

impl Default for SettingsMigrator {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsMigrator {
    pub fn new() -> Self {
        Self {
            migrations: vec![Box::new(MigrationV1ToV2)],
        }
    }

    pub fn migrate_to_latest(&self, mut settings: Settings) -> Settings {
        while settings.schema_version < CURRENT_SCHEMA_VERSION {
            let current = settings.schema_version;

            let Some(migration) = self
                .migrations
                .iter()
                .find(|m| m.from_version() == current)
            else {
                warn!(
                    from = current,
                    to = CURRENT_SCHEMA_VERSION,
                    "No settings migration path, stamping current version"
                );
                settings.schema_version = CURRENT_SCHEMA_VERSION;
                break;
            };

            settings = migration.migrate(settings);
        }

        settings
    }
}
