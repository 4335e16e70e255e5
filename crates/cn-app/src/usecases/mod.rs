//! Business logic use cases
//!
//! ```text
//! [ClipboardWatcher] ──▶ HandleClipCaptured ──▶ clip table ──▶ `clip-added`
//! [Scanner ticker]   ──▶ ScanDueTasks ──▶ notification + task table
//! [Hotkey / focus]   ──▶ ToggleCoordinator ──▶ surface
//! ```

pub mod clipboard;
pub mod presentation;
pub mod reminder;
pub mod settings;
mod start_clipboard_watcher;
mod stop_clipboard_watcher;

pub use start_clipboard_watcher::{StartClipboardWatcher, StartClipboardWatcherError};
pub use stop_clipboard_watcher::{StopClipboardWatcher, StopClipboardWatcherError};
