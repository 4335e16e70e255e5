use std::path::PathBuf;

/// Resolved per-installation directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    pub fn settings_path(&self) -> PathBuf {
        self.app_data_root.join("settings.json")
    }

    pub fn store_path(&self) -> PathBuf {
        self.app_data_root.join("store.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_live_under_data_root() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/clipnest"),
        };
        assert_eq!(dirs.settings_path(), PathBuf::from("/tmp/clipnest/settings.json"));
        assert_eq!(dirs.store_path(), PathBuf::from("/tmp/clipnest/store.json"));
        assert!(dirs.logs_dir().ends_with("logs"));
    }
}
