mod fs;
pub mod settings;
pub mod store;
pub mod time;

pub use settings::FileSettingsRepository;
pub use store::RecordStore;
pub use time::SystemClock;
