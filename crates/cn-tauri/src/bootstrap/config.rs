//! # Settings Loader / 设置加载器
//!
//! Resolves the data directory and loads `settings.json` before the Tauri
//! builder starts. Loading never blocks startup: an unreadable or invalid
//! file is logged and replaced by defaults for this run (the file itself is
//! left alone so the user can fix it).

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use cn_core::app_dirs::AppDirs;
use cn_core::ports::{AppDirsPort, SettingsPort};
use cn_core::Settings;
use cn_infra::FileSettingsRepository;

pub struct LoadedSettings {
    pub app_dirs: AppDirs,
    pub repository: Arc<FileSettingsRepository>,
    pub settings: Settings,
}

pub async fn load_settings(dirs: &dyn AppDirsPort) -> anyhow::Result<LoadedSettings> {
    let app_dirs = dirs.get_app_dirs().context("resolve app data directory")?;
    let repository = Arc::new(FileSettingsRepository::new(app_dirs.settings_path()));

    let settings = match repository.load().await {
        Ok(settings) => match settings.validate() {
            Ok(()) => settings,
            Err(err) => {
                warn!(error = %err, "Settings invalid, using defaults for this session");
                Settings::default()
            }
        },
        Err(err) => {
            error!(error = ?err, "Failed to load settings, using defaults for this session");
            Settings::default()
        }
    };

    info!(
        data_root = %app_dirs.app_data_root.display(),
        schema_version = settings.schema_version,
        "Settings loaded"
    );

    Ok(LoadedSettings {
        app_dirs,
        repository,
        settings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cn_core::ports::AppDirsError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct FixedDirs(PathBuf);

    impl AppDirsPort for FixedDirs {
        fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
            Ok(AppDirs {
                app_data_root: self.0.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = load_settings(&FixedDirs(dir.path().to_path_buf()))
            .await
            .unwrap();

        assert_eq!(loaded.settings, Settings::default());
        assert_eq!(loaded.app_dirs.app_data_root, dir.path());
    }

    #[tokio::test]
    async fn test_invalid_settings_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "schema_version": 2, "capture": { "poll_interval_ms": 0 } }"#,
        )
        .unwrap();

        let loaded = load_settings(&FixedDirs(dir.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(loaded.settings, Settings::default());
    }

    #[tokio::test]
    async fn test_unparseable_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), "not json").unwrap();

        let loaded = load_settings(&FixedDirs(dir.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(loaded.settings, Settings::default());
    }

    #[test]
    fn test_unavailable_data_dir_is_an_error() {
        struct NoDirs;
        impl AppDirsPort for NoDirs {
            fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
                Err(AppDirsError::DataLocalDirUnavailable)
            }
        }

        let rt = tokio::runtime::Runtime::new().unwrap();
        assert!(rt.block_on(load_settings(&NoDirs)).is_err());
    }
}
