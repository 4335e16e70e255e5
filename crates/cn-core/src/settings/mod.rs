pub mod defaults;
pub mod model;

pub use model::{
    CaptureSettings, PresentationSettings, ReminderSettings, Settings, SettingsValidationError,
    CURRENT_SCHEMA_VERSION,
};
