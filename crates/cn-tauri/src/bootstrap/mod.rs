pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_settings, LoadedSettings};
pub use run::run_app;
pub use wiring::{AppRuntime, AppRuntimeSeed, UseCases};
