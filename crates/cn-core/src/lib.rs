//! # cn-core
//!
//! Core domain models and business logic for ClipNest.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the clipboard capture state machine, reminder recurrence (including the cron
//! evaluator), the presentation toggle state machine, settings and the ports
//! implemented by the outer crates.

pub mod app_dirs;
pub mod clipboard;
pub mod ids;
pub mod ports;
pub mod presentation;
pub mod reminder;
pub mod settings;

// Re-export commonly used types at the crate root
pub use clipboard::{ClipContent, ClipKind, ClipSample, SystemClipboardSnapshot};
pub use ids::{ClipId, TaskId};
pub use reminder::{RecurrenceSpec, ReminderTask};
pub use settings::Settings;
